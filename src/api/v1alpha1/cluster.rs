//! The v1alpha1 MicrovmCluster resource.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::condition::Condition;
use crate::api::microvm::{Proxy, SshPublicKey};
use crate::conversion::Hub;

use super::types::{ApiEndpoint, FailureDomainSpec, Placement};

/// Desired state of a microvm-backed cluster.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1alpha1",
    kind = "MicrovmCluster",
    plural = "microvmclusters",
    status = "MicrovmClusterStatus",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Ready","type":"boolean","jsonPath":".status.ready"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmClusterSpec {
    /// Endpoint of the cluster's API server.
    ///
    /// Set either by the user or, once a load balancer is provisioned, by
    /// the reconciler.
    #[serde(default)]
    pub control_plane_endpoint: ApiEndpoint,

    /// SSH public keys granted access to every machine in the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_keys: Option<Vec<SshPublicKey>>,

    /// Where microvms for this cluster may be placed.
    #[serde(default)]
    pub placement: Placement,

    /// Proxy to use when reaching microvm hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microvm_proxy: Option<Proxy>,

    /// Name of a secret holding the TLS material for host connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_secret_ref: Option<String>,
}

/// Observed state of a microvm-backed cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmClusterStatus {
    /// Whether the cluster infrastructure is ready.
    #[serde(default)]
    pub ready: bool,

    /// Conditions describing the cluster state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,

    /// Failure domains machines can be spread across, keyed by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_domains: Option<BTreeMap<String, FailureDomainSpec>>,
}

impl MicrovmClusterStatus {
    /// Record `condition`, replacing any existing condition of the same type.
    pub fn set_condition(&mut self, condition: Condition) {
        let conditions = self.conditions.get_or_insert_with(Vec::new);
        conditions.retain(|c| c.type_ != condition.type_);
        conditions.push(condition);
    }
}

impl Hub for MicrovmCluster {}

impl MicrovmCluster {
    /// Observed conditions, if any have been recorded.
    pub fn conditions(&self) -> Option<&[Condition]> {
        self.status.as_ref().and_then(|s| s.conditions.as_deref())
    }

    /// Replace the recorded conditions.
    pub fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.status
            .get_or_insert_with(MicrovmClusterStatus::default)
            .conditions = Some(conditions);
    }

    /// The cluster's placement configuration.
    pub fn placement(&self) -> &Placement {
        &self.spec.placement
    }
}
