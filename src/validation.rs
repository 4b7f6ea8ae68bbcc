//! Structured field-level validation errors.
//!
//! Validation routines return lists of [`FieldError`] values rather than
//! bailing on the first problem, so the admission pipeline can report every
//! violation in a single rejection.

use std::fmt;

/// Classification of a field validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The value may be syntactically fine but is not allowed here.
    Forbidden,
    /// The value failed a semantic check.
    Invalid,
    /// A required value was not provided.
    Required,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "Forbidden"),
            Self::Invalid => write!(f, "Invalid value"),
            Self::Required => write!(f, "Required value"),
        }
    }
}

/// A validation failure anchored to a field path.
///
/// Displays as `<field>: <kind>: <detail>`, e.g.
/// `spec.placement: Forbidden: a placement option must be set`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// What class of failure this is.
    pub kind: FieldErrorKind,
    /// Dotted path of the offending field, e.g. `spec.placement`.
    pub field: String,
    /// Human-readable explanation of the failure.
    pub detail: String,
}

impl FieldError {
    /// A forbidden-field failure at `field`.
    pub fn forbidden(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Forbidden,
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// An invalid-value failure at `field`.
    pub fn invalid(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Invalid,
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// A missing-required-value failure at `field`.
    pub fn required(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Required,
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.field, self.kind, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_kind_and_detail() {
        let err = FieldError::forbidden("spec.placement", "a placement option must be set");
        assert_eq!(
            err.to_string(),
            "spec.placement: Forbidden: a placement option must be set"
        );
    }

    #[test]
    fn constructors_set_the_kind() {
        assert_eq!(
            FieldError::invalid("spec.x", "bad").kind,
            FieldErrorKind::Invalid
        );
        assert_eq!(
            FieldError::required("spec.y", "missing").kind,
            FieldErrorKind::Required
        );
    }
}
