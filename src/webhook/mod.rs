//! Admission pipeline applied to resources before persistence.
//!
//! Every resource kind gets a validating and defaulting handler per schema
//! version; the versions share no validation state and are listed in their
//! own submodules. Handlers are statically typed: the framework glue that
//! routes a dynamic admission request to the right handler lives outside
//! this crate, so a handler can never observe an object of the wrong kind.
//!
//! Each validation entry point returns the warnings to surface to the
//! client together with the admission decision, mirroring the hosting
//! framework's warnings-plus-error pair.

pub mod v1alpha1;
pub mod v1alpha2;

use std::fmt;

use thiserror::Error;

use crate::validation::FieldError;

/// Advisory messages surfaced to the requesting client alongside a decision.
pub type Warnings = Vec<String>;

/// Identifies a resource kind within an API group, for error reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupKind {
    /// API group, e.g. `infrastructure.cluster.x-k8s.io`.
    pub group: String,
    /// Resource kind, e.g. `MicrovmCluster`.
    pub kind: String,
}

impl GroupKind {
    /// The group and kind of a statically known resource type.
    pub fn of<K>() -> Self
    where
        K: kube::Resource<DynamicType = ()>,
    {
        Self {
            group: K::group(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.group)
    }
}

/// An admission rejection.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The request is defective as submitted and retrying cannot help.
    #[error("{0}")]
    BadRequest(String),

    /// The object failed semantic validation. Every field violation is
    /// carried so the client sees the full set at once.
    #[error("{group_kind} {name:?} is invalid: {}", join_details(.errors))]
    Invalid {
        /// Group and kind of the rejected object.
        group_kind: GroupKind,
        /// Name of the rejected object.
        name: String,
        /// The individual field violations.
        errors: Vec<FieldError>,
    },
}

fn join_details(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fold a list of field errors into a single admission decision.
///
/// An empty list is an allow. Anything else becomes one
/// [`AdmissionError::Invalid`] naming the resource and embedding every
/// violation, so multiple problems are reported together rather than only
/// the first.
pub fn aggregate_obj_errors(
    group_kind: GroupKind,
    name: &str,
    errors: Vec<FieldError>,
) -> Result<(), AdmissionError> {
    if errors.is_empty() {
        return Ok(());
    }

    Err(AdmissionError::Invalid {
        group_kind,
        name: name.to_owned(),
        errors,
    })
}
