//! MicrovmMachineTemplate conversion.

use crate::api::v1alpha1;
use crate::api::v1alpha2::{
    MicrovmMachineSpec, MicrovmMachineTemplate, MicrovmMachineTemplateResource,
    MicrovmMachineTemplateSpec, TemplateObjectMeta,
};
use crate::conversion::Convertible;

impl Convertible for MicrovmMachineTemplate {
    type Hub = v1alpha1::MicrovmMachineTemplate;

    fn convert_to(&self) -> v1alpha1::MicrovmMachineTemplate {
        v1alpha1::MicrovmMachineTemplate {
            metadata: self.metadata.clone(),
            spec: v1alpha1::MicrovmMachineTemplateSpec {
                template: v1alpha1::MicrovmMachineTemplateResource {
                    metadata: template_meta_to_hub(&self.spec.template.metadata),
                    spec: v1alpha1::MicrovmMachineSpec {
                        vm_spec: self.spec.template.spec.vm_spec.clone(),
                        ssh_public_keys: self.spec.template.spec.ssh_public_keys.clone(),
                        provider_id: self.spec.template.spec.provider_id.clone(),
                    },
                },
            },
        }
    }

    fn convert_from(hub: &v1alpha1::MicrovmMachineTemplate) -> Self {
        Self {
            metadata: hub.metadata.clone(),
            spec: MicrovmMachineTemplateSpec {
                template: MicrovmMachineTemplateResource {
                    metadata: template_meta_from_hub(&hub.spec.template.metadata),
                    spec: MicrovmMachineSpec {
                        vm_spec: hub.spec.template.spec.vm_spec.clone(),
                        ssh_public_keys: hub.spec.template.spec.ssh_public_keys.clone(),
                        provider_id: hub.spec.template.spec.provider_id.clone(),
                    },
                },
            },
        }
    }
}

// Template metadata is a narrow projection: only labels and annotations
// survive the crossing, in both directions.
fn template_meta_to_hub(meta: &TemplateObjectMeta) -> v1alpha1::TemplateObjectMeta {
    v1alpha1::TemplateObjectMeta {
        labels: meta.labels.clone(),
        annotations: meta.annotations.clone(),
    }
}

fn template_meta_from_hub(meta: &v1alpha1::TemplateObjectMeta) -> TemplateObjectMeta {
    TemplateObjectMeta {
        labels: meta.labels.clone(),
        annotations: meta.annotations.clone(),
    }
}
