//! The v1alpha1 MicrovmMachineTemplate resource.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conversion::Hub;

use super::machine::MicrovmMachineSpec;
use super::types::TemplateObjectMeta;

/// A template from which machine sets stamp out microvm machines.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha1",
    kind = "MicrovmMachineTemplate",
    plural = "microvmmachinetemplates",
    namespaced,
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmMachineTemplateSpec {
    /// The resource stamped out for each machine.
    #[serde(default)]
    pub template: MicrovmMachineTemplateResource,
}

/// The machine resource a template produces.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmMachineTemplateResource {
    /// Metadata stamped onto created machines (labels and annotations only).
    #[serde(default)]
    pub metadata: TemplateObjectMeta,

    /// Spec of the machines to create.
    #[serde(default)]
    pub spec: MicrovmMachineSpec,
}

impl Hub for MicrovmMachineTemplate {}
