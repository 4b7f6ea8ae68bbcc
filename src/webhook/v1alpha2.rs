//! Admission handlers for the v1alpha2 schema.
//!
//! Deliberately parallel to the v1alpha1 handlers rather than shared with
//! them: each version validates its own types and the two pipelines can
//! diverge as the schemas do.

use kube::ResourceExt;
use tracing::info;

use crate::api::v1alpha2::{MicrovmCluster, MicrovmMachine, MicrovmMachineTemplate};

use super::{aggregate_obj_errors, AdmissionError, GroupKind, Warnings};

/// Validating and defaulting admission for the v1alpha2 MicrovmCluster.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrovmClusterWebhook;

impl MicrovmClusterWebhook {
    /// A cluster may only be created with a placement strategy configured.
    pub fn validate_create(
        &self,
        cluster: &MicrovmCluster,
    ) -> (Warnings, Result<(), AdmissionError>) {
        let errors = cluster.spec.placement.validate();
        if errors.is_empty() {
            return (Warnings::new(), Ok(()));
        }

        let warnings = vec![format!(
            "cannot create microvm cluster {}",
            cluster.name_any()
        )];
        let decision = aggregate_obj_errors(
            GroupKind::of::<MicrovmCluster>(),
            &cluster.name_any(),
            errors,
        );

        (warnings, decision)
    }

    /// Cluster updates are currently unrestricted.
    pub fn validate_update(
        &self,
        _old: &MicrovmCluster,
        _new: &MicrovmCluster,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// Deletion has no preconditions.
    pub fn validate_delete(
        &self,
        _cluster: &MicrovmCluster,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// Clusters have no defaulting rules.
    pub fn apply_defaults(&self, _cluster: &mut MicrovmCluster) {}
}

/// Validating and defaulting admission for the v1alpha2 MicrovmMachine.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrovmMachineWebhook;

impl MicrovmMachineWebhook {
    /// Machine creation needs no validation beyond the schema.
    pub fn validate_create(
        &self,
        _machine: &MicrovmMachine,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// The machine spec is immutable: any difference between the old and new
    /// spec rejects the update, with no partial-field allowance.
    pub fn validate_update(
        &self,
        old: &MicrovmMachine,
        new: &MicrovmMachine,
    ) -> (Warnings, Result<(), AdmissionError>) {
        info!(machine = %new.name_any(), "validating microvm machine update");

        if old.spec != new.spec {
            return (
                Warnings::new(),
                Err(AdmissionError::BadRequest(
                    "microvm machine spec is immutable".to_owned(),
                )),
            );
        }

        (Warnings::new(), Ok(()))
    }

    /// Deletion has no preconditions.
    pub fn validate_delete(
        &self,
        _machine: &MicrovmMachine,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// Generate a MAC address for every network interface that does not
    /// declare one. Idempotent.
    pub fn apply_defaults(&self, machine: &mut MicrovmMachine) {
        machine.spec.vm_spec.apply_defaults();
    }
}

/// Validating admission for the v1alpha2 MicrovmMachineTemplate.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrovmMachineTemplateWebhook;

impl MicrovmMachineTemplateWebhook {
    /// Template creation needs no validation beyond the schema.
    pub fn validate_create(
        &self,
        _template: &MicrovmMachineTemplate,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// Template updates are currently unrestricted.
    pub fn validate_update(
        &self,
        _old: &MicrovmMachineTemplate,
        _new: &MicrovmMachineTemplate,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }

    /// Deletion has no preconditions.
    pub fn validate_delete(
        &self,
        _template: &MicrovmMachineTemplate,
    ) -> (Warnings, Result<(), AdmissionError>) {
        (Warnings::new(), Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::microvm::{IfaceType, NetworkInterface, VmSpec};
    use crate::api::v1alpha2::{
        MicrovmClusterSpec, MicrovmHost, MicrovmMachineSpec, MicrovmMachineTemplateSpec,
        Placement, StaticPoolPlacement,
    };

    #[test]
    fn cluster_create_accepts_static_pool_placement() {
        let webhook = MicrovmClusterWebhook;
        let cluster = MicrovmCluster::new(
            "test",
            MicrovmClusterSpec {
                placement: Placement {
                    static_pool: Some(StaticPoolPlacement {
                        hosts: vec![MicrovmHost {
                            name: Some("host1".to_string()),
                            endpoint: "127.0.0.1:9090".to_string(),
                            control_plane_allowed: true,
                        }],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            },
        );

        let (warnings, decision) = webhook.validate_create(&cluster);
        assert!(decision.is_ok());
        assert!(warnings.is_empty());
    }

    #[test]
    fn cluster_create_rejects_unset_placement_with_warning() {
        let webhook = MicrovmClusterWebhook;
        let cluster = MicrovmCluster::new("test", MicrovmClusterSpec::default());

        let (warnings, decision) = webhook.validate_create(&cluster);
        assert!(decision.is_err());
        assert!(!warnings.is_empty());
    }

    #[test]
    fn cluster_defaulting_is_a_no_op() {
        let webhook = MicrovmClusterWebhook;
        let mut cluster = MicrovmCluster::new("test", MicrovmClusterSpec::default());
        let before = cluster.clone();

        webhook.apply_defaults(&mut cluster);
        assert_eq!(cluster, before);
    }

    #[test]
    fn cluster_update_and_delete_always_allow() {
        let webhook = MicrovmClusterWebhook;
        let cluster = MicrovmCluster::new("test", MicrovmClusterSpec::default());

        assert!(webhook.validate_update(&cluster, &cluster.clone()).1.is_ok());
        assert!(webhook.validate_delete(&cluster).1.is_ok());
    }

    #[test]
    fn machine_create_and_delete_always_allow() {
        let webhook = MicrovmMachineWebhook;
        let machine = MicrovmMachine::new(
            "test",
            MicrovmMachineSpec {
                provider_id: Some("microvm://host/id".to_string()),
                ..Default::default()
            },
        );

        assert!(webhook.validate_create(&machine).1.is_ok());
        assert!(webhook.validate_delete(&machine).1.is_ok());
    }

    #[test]
    fn machine_update_allows_unchanged_spec() {
        let webhook = MicrovmMachineWebhook;
        let old = MicrovmMachine::new(
            "test",
            MicrovmMachineSpec {
                provider_id: Some("microvm://host/id".to_string()),
                ..Default::default()
            },
        );

        assert!(webhook.validate_update(&old, &old.clone()).1.is_ok());
    }

    #[test]
    fn machine_update_rejects_changed_spec() {
        let webhook = MicrovmMachineWebhook;
        let old = MicrovmMachine::new(
            "test",
            MicrovmMachineSpec {
                provider_id: Some("microvm://host/id".to_string()),
                ..Default::default()
            },
        );
        let mut new = old.clone();
        new.spec.provider_id = Some("microvm://other/id".to_string());

        let (warnings, decision) = webhook.validate_update(&old, &new);
        assert!(decision.unwrap_err().to_string().contains("immutable"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn machine_defaulting_fills_missing_macs() {
        let webhook = MicrovmMachineWebhook;
        let mut machine = MicrovmMachine::new(
            "test",
            MicrovmMachineSpec {
                vm_spec: VmSpec {
                    network_interfaces: vec![NetworkInterface {
                        guest_device_name: "eth0".to_string(),
                        type_: IfaceType::Macvtap,
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        webhook.apply_defaults(&mut machine);

        let ifaces = &machine.spec.vm_spec.network_interfaces;
        assert_eq!(ifaces.len(), 1);
        assert!(ifaces[0].guest_mac.is_some());
    }

    #[test]
    fn template_validations_always_allow() {
        let webhook = MicrovmMachineTemplateWebhook;
        let template = MicrovmMachineTemplate::new("test", MicrovmMachineTemplateSpec::default());

        assert!(webhook.validate_create(&template).1.is_ok());
        assert!(webhook.validate_update(&template, &template.clone()).1.is_ok());
        assert!(webhook.validate_delete(&template).1.is_ok());
    }
}
