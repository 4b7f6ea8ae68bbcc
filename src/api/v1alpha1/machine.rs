//! The v1alpha1 MicrovmMachine resource.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::condition::Condition;
use crate::api::microvm::{SshPublicKey, VmSpec, VmState};
use crate::conversion::Hub;

use super::types::MachineAddress;

/// Desired state of a single microvm-backed machine.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha1",
    kind = "MicrovmMachine",
    plural = "microvmmachines",
    status = "MicrovmMachineStatus",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Ready","type":"boolean","jsonPath":".status.ready"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmMachineSpec {
    /// The microvm to create for this machine.
    #[serde(flatten)]
    pub vm_spec: VmSpec,

    /// SSH public keys granted access to this machine, in addition to any
    /// cluster-wide keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_keys: Option<Vec<SshPublicKey>>,

    /// Canonical id of the backend instance, once one has been assigned.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "providerID")]
    pub provider_id: Option<String>,
}

/// Observed state of a microvm-backed machine.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmMachineStatus {
    /// Whether the machine infrastructure is ready.
    #[serde(default)]
    pub ready: bool,

    /// Lifecycle state reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_state: Option<VmState>,

    /// Addresses at which the machine is reachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<MachineAddress>>,

    /// Terminal failure classification, when the machine cannot recover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// Human-readable elaboration of `failure_reason`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,

    /// Conditions describing the machine state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl MicrovmMachineStatus {
    /// Record `condition`, replacing any existing condition of the same type.
    pub fn set_condition(&mut self, condition: Condition) {
        let conditions = self.conditions.get_or_insert_with(Vec::new);
        conditions.retain(|c| c.type_ != condition.type_);
        conditions.push(condition);
    }
}

impl Hub for MicrovmMachine {}

impl MicrovmMachine {
    /// Observed conditions, if any have been recorded.
    pub fn conditions(&self) -> Option<&[Condition]> {
        self.status.as_ref().and_then(|s| s.conditions.as_deref())
    }

    /// Replace the recorded conditions.
    pub fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.status
            .get_or_insert_with(MicrovmMachineStatus::default)
            .conditions = Some(conditions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::condition::ConditionStatus;

    #[test]
    fn conditions_round_trip_through_accessors() {
        let mut machine = MicrovmMachine::new("m1", MicrovmMachineSpec::default());
        assert!(machine.conditions().is_none());

        let conds = vec![Condition::new(
            "Ready",
            ConditionStatus::True,
            "MachineReady",
            "microvm running",
        )];
        machine.set_conditions(conds.clone());
        assert_eq!(machine.conditions(), Some(conds.as_slice()));
    }

    #[test]
    fn provider_id_uses_upstream_wire_name() {
        let spec = MicrovmMachineSpec {
            provider_id: Some("microvm://fd1/abc".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["providerID"], "microvm://fd1/abc");
        assert!(json.get("providerId").is_none());
    }

    #[test]
    fn vm_spec_fields_flatten_into_the_spec() {
        let spec = MicrovmMachineSpec {
            vm_spec: VmSpec {
                vcpu: 2,
                memory_mb: 2048,
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["vcpu"], 2);
        assert_eq!(json["memoryMb"], 2048);
        assert!(json.get("vmSpec").is_none());
    }
}
