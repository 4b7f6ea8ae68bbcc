//! Conversion between the v1alpha2 schema and the v1alpha1 hub.
//!
//! One file per resource kind. Each mapping copies top-level metadata
//! verbatim and walks every spec/status field explicitly; shared leaf types
//! (the microvm guest description, conditions) are cloned unchanged, while
//! per-version types are rebuilt field by field in the destination schema.

mod cluster;
mod machine;
mod machine_template;
