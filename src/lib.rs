//! Cluster API infrastructure provider core for microvm-backed clusters.
//!
//! This crate defines the declarative resource model for clusters and
//! machines backed by microvms, in two coexisting schema versions, together
//! with everything needed to keep those versions coherent:
//!
//! - [`api`] - Custom Resource Definitions for both schema versions
//!   (`v1alpha1` is the storage hub, `v1alpha2` converts through it)
//! - [`conversion`] - hub-and-spoke conversion between schema versions
//! - [`webhook`] - admission pipeline (validation and defaulting) applied to
//!   a resource before it is persisted
//! - [`validation`] - structured field-level validation errors
//! - [`providerid`] - canonical identifiers correlating machines with
//!   backend microvm instances
//!
//! Reconciliation, the backend gRPC client, and the HTTP plumbing that feeds
//! admission and conversion requests into this crate live in their own
//! components; everything here is synchronous and free of I/O.

#![deny(missing_docs)]

pub mod api;
pub mod conversion;
pub mod providerid;
pub mod validation;
pub mod webhook;
