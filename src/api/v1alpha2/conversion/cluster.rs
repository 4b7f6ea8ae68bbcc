//! MicrovmCluster conversion.

use std::collections::BTreeMap;

use crate::api::v1alpha1;
use crate::api::v1alpha2::{
    FailureDomain, MicrovmCluster, MicrovmClusterSpec, MicrovmClusterStatus, Placement,
};
use crate::conversion::Convertible;

impl Convertible for MicrovmCluster {
    type Hub = v1alpha1::MicrovmCluster;

    fn convert_to(&self) -> v1alpha1::MicrovmCluster {
        v1alpha1::MicrovmCluster {
            metadata: self.metadata.clone(),
            spec: v1alpha1::MicrovmClusterSpec {
                control_plane_endpoint: v1alpha1::ApiEndpoint {
                    host: self.spec.control_plane_endpoint.host.clone(),
                    port: self.spec.control_plane_endpoint.port,
                },
                ssh_public_keys: self.spec.ssh_public_keys.clone(),
                placement: placement_to_hub(&self.spec.placement),
                microvm_proxy: self.spec.microvm_proxy.clone(),
                tls_secret_ref: self.spec.tls_secret_ref.clone(),
            },
            status: self.status.as_ref().map(status_to_hub),
        }
    }

    fn convert_from(hub: &v1alpha1::MicrovmCluster) -> Self {
        Self {
            metadata: hub.metadata.clone(),
            spec: MicrovmClusterSpec {
                control_plane_endpoint: crate::api::v1alpha2::ApiEndpoint {
                    host: hub.spec.control_plane_endpoint.host.clone(),
                    port: hub.spec.control_plane_endpoint.port,
                },
                ssh_public_keys: hub.spec.ssh_public_keys.clone(),
                placement: placement_from_hub(&hub.spec.placement),
                microvm_proxy: hub.spec.microvm_proxy.clone(),
                tls_secret_ref: hub.spec.tls_secret_ref.clone(),
            },
            status: hub.status.as_ref().map(status_from_hub),
        }
    }
}

fn status_to_hub(status: &MicrovmClusterStatus) -> v1alpha1::MicrovmClusterStatus {
    v1alpha1::MicrovmClusterStatus {
        ready: status.ready,
        conditions: status.conditions.clone(),
        failure_domains: status
            .failure_domains
            .as_deref()
            .map(failure_domains_to_hub),
    }
}

fn status_from_hub(status: &v1alpha1::MicrovmClusterStatus) -> MicrovmClusterStatus {
    MicrovmClusterStatus {
        ready: status.ready,
        conditions: status.conditions.clone(),
        failure_domains: status
            .failure_domains
            .as_ref()
            .map(failure_domains_from_hub),
    }
}

fn placement_to_hub(placement: &Placement) -> v1alpha1::Placement {
    v1alpha1::Placement {
        static_pool: placement
            .static_pool
            .as_ref()
            .map(|pool| v1alpha1::StaticPoolPlacement {
                hosts: pool
                    .hosts
                    .iter()
                    .map(|host| v1alpha1::MicrovmHost {
                        name: host.name.clone(),
                        endpoint: host.endpoint.clone(),
                        control_plane_allowed: host.control_plane_allowed,
                    })
                    .collect(),
                basic_auth_secret: pool.basic_auth_secret.clone(),
            }),
    }
}

fn placement_from_hub(placement: &v1alpha1::Placement) -> Placement {
    Placement {
        static_pool: placement.static_pool.as_ref().map(|pool| {
            crate::api::v1alpha2::StaticPoolPlacement {
                hosts: pool
                    .hosts
                    .iter()
                    .map(|host| crate::api::v1alpha2::MicrovmHost {
                        name: host.name.clone(),
                        endpoint: host.endpoint.clone(),
                        control_plane_allowed: host.control_plane_allowed,
                    })
                    .collect(),
                basic_auth_secret: pool.basic_auth_secret.clone(),
            }
        }),
    }
}

/// Collapse the named-record list into the hub's keyed form.
///
/// The keyed form cannot hold two domains with the same name, so on
/// duplicates the last record wins; an unset control-plane flag collapses to
/// `false`.
fn failure_domains_to_hub(domains: &[FailureDomain]) -> BTreeMap<String, v1alpha1::FailureDomainSpec> {
    let mut out = BTreeMap::new();
    for domain in domains {
        out.insert(
            domain.name.clone(),
            v1alpha1::FailureDomainSpec {
                control_plane: domain.control_plane.unwrap_or_default(),
                attributes: domain.attributes.clone(),
            },
        );
    }
    out
}

/// Expand the hub's keyed form into named records, in name order.
///
/// The control-plane flag is always materialized as `Some`.
fn failure_domains_from_hub(
    domains: &BTreeMap<String, v1alpha1::FailureDomainSpec>,
) -> Vec<FailureDomain> {
    domains
        .iter()
        .map(|(name, spec)| FailureDomain {
            name: name.clone(),
            control_plane: Some(spec.control_plane),
            attributes: spec.attributes.clone(),
        })
        .collect()
}
