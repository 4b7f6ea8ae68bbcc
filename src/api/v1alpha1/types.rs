//! Supporting types for the v1alpha1 schema.
//!
//! These are declared per version, even where the v1alpha2 equivalents look
//! identical today: the schemas evolve independently and conversion maps
//! every field explicitly rather than sharing the declarations.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// Host and port of a cluster's API server.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    /// Hostname or address of the endpoint.
    #[serde(default)]
    pub host: String,

    /// Port of the endpoint.
    #[serde(default)]
    pub port: i32,
}

/// Kind of address recorded for a machine.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum MachineAddressType {
    /// A host name.
    Hostname,
    /// An externally routable IP address.
    #[serde(rename = "ExternalIP")]
    ExternalIp,
    /// An IP address routable only within the cluster network.
    #[serde(rename = "InternalIP")]
    InternalIp,
    /// An externally resolvable DNS name.
    #[serde(rename = "ExternalDNS")]
    ExternalDns,
    /// A DNS name resolvable only within the cluster network.
    #[serde(rename = "InternalDNS")]
    InternalDns,
}

/// An address at which a machine is reachable.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineAddress {
    /// Kind of the address.
    #[serde(rename = "type")]
    pub type_: MachineAddressType,

    /// The address itself.
    pub address: String,
}

/// An independent fault boundary instances can be spread across.
///
/// In this schema failure domains are keyed by name, so the name lives in
/// the surrounding map rather than here.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainSpec {
    /// Whether control-plane instances may be placed in this domain.
    #[serde(default)]
    pub control_plane: bool,

    /// Free-form attributes of the domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

/// Where microvms for a cluster may be placed.
///
/// The wire form keys each strategy by name (`{"staticPool": {...}}`);
/// absent means no strategy is configured. Consumers match on
/// [`Placement::strategy`], which is exhaustive over the closed strategy
/// set.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Placement onto a fixed, operator-managed pool of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_pool: Option<StaticPoolPlacement>,
}

/// The closed set of placement strategies.
///
/// Borrowed views over the populated variant. Adding a strategy extends
/// this enum, and every `match` over it stops compiling until the new
/// variant is handled.
#[derive(Clone, Copy, Debug)]
pub enum PlacementStrategy<'a> {
    /// Placement constrained to a fixed pool of hosts.
    StaticPool(&'a StaticPoolPlacement),
}

impl Placement {
    /// The configured placement strategy, if any.
    pub fn strategy(&self) -> Option<PlacementStrategy<'_>> {
        self.static_pool.as_ref().map(PlacementStrategy::StaticPool)
    }

    /// Whether any placement strategy is configured.
    pub fn is_set(&self) -> bool {
        self.strategy().is_some()
    }

    /// Check that a placement strategy is configured.
    ///
    /// Returns a single forbidden error at `spec.placement` when none is;
    /// an empty list otherwise.
    pub fn validate(&self) -> Vec<FieldError> {
        match self.strategy() {
            Some(PlacementStrategy::StaticPool(_)) => Vec::new(),
            None => vec![FieldError::forbidden(
                "spec.placement",
                "a placement option must be set, one of: staticPool",
            )],
        }
    }
}

/// Placement onto a fixed pool of hosts.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaticPoolPlacement {
    /// The hosts microvms may be scheduled onto, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<MicrovmHost>,

    /// Name of a secret holding basic-auth credentials for the hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_secret: Option<String>,
}

/// A single host microvms can be placed on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrovmHost {
    /// Human-readable name of the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Network endpoint of the host's microvm service, e.g. `10.0.0.1:9090`.
    pub endpoint: String,

    /// Whether control-plane instances may run on this host.
    #[serde(default)]
    pub control_plane_allowed: bool,
}

/// Metadata a machine template stamps onto the machines it creates.
///
/// Deliberately narrow: only labels and annotations propagate from a
/// template; everything else on a machine's metadata belongs to the machine.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateObjectMeta {
    /// Labels stamped onto created machines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    /// Annotations stamped onto created machines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}
