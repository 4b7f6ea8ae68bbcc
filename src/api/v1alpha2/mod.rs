//! The v1alpha2 schema - served, converting through the v1alpha1 hub.

mod cluster;
pub mod conversion;
mod machine;
mod machine_template;
mod types;

pub use cluster::{MicrovmCluster, MicrovmClusterSpec, MicrovmClusterStatus};
pub use machine::{MicrovmMachine, MicrovmMachineSpec, MicrovmMachineStatus};
pub use machine_template::{
    MicrovmMachineTemplate, MicrovmMachineTemplateResource, MicrovmMachineTemplateSpec,
};
pub use types::{
    ApiEndpoint, FailureDomain, MachineAddress, MachineAddressType, MicrovmHost, Placement,
    PlacementStrategy, StaticPoolPlacement, TemplateObjectMeta,
};

/// Version string of this schema.
pub const VERSION: &str = "v1alpha2";
