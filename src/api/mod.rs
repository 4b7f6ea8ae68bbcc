//! Custom Resource Definitions for the microvm infrastructure provider.
//!
//! Two schema versions coexist: [`v1alpha1`] is the storage (hub) version
//! and [`v1alpha2`] is served and converts through the hub. Leaf types that
//! are byte-identical across versions - the microvm guest description and
//! status conditions - live in shared modules here; everything the versions
//! declare independently (endpoints, addresses, placement, failure domains)
//! lives in the version modules so the two schemas can evolve separately.

pub mod condition;
pub mod microvm;
pub mod v1alpha1;
pub mod v1alpha2;

/// API group every resource in this provider belongs to.
pub const GROUP: &str = "infrastructure.cluster.x-k8s.io";
