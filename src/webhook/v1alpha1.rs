//! Admission handlers for the v1alpha1 (storage) schema.

use kube::ResourceExt;
use tracing::info;

use crate::api::v1alpha1::{MicrovmCluster, MicrovmMachine, MicrovmMachineTemplate};

use super::{aggregate_obj_errors, AdmissionError, GroupKind, Warnings};

/// Validating and defaulting admission for the v1alpha1 MicrovmCluster.
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

/// Validating and defaulting admission for the v1alpha1 MicrovmMachine.
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

/// Validating admission for the v1alpha1 MicrovmMachineTemplate.
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
