//! The v1alpha1 schema - the storage (hub) version.
//!
//! Every other served version converts through the types in this module.

mod cluster;
mod machine;
mod machine_template;
mod types;

pub use cluster::{MicrovmCluster, MicrovmClusterSpec, MicrovmClusterStatus};
pub use machine::{MicrovmMachine, MicrovmMachineSpec, MicrovmMachineStatus};
pub use machine_template::{
    MicrovmMachineTemplate, MicrovmMachineTemplateResource, MicrovmMachineTemplateSpec,
};
pub use types::{
    ApiEndpoint, FailureDomainSpec, MachineAddress, MachineAddressType, MicrovmHost, Placement,
    PlacementStrategy, StaticPoolPlacement, TemplateObjectMeta,
};

/// Version string of this schema.
pub const VERSION: &str = "v1alpha1";
