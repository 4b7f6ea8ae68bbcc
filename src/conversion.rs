//! Hub-and-spoke conversion between API schema versions.
//!
//! One version is the storage ("hub") version; every other served version is
//! a "spoke" that converts to and from the hub only. A spoke-to-spoke
//! request therefore always routes through the hub, and adding a version
//! means writing exactly one pair of mappings.
//!
//! Conversion is total over structurally valid objects: every edge case
//! (absent collections, unset optional flags) resolves to a documented
//! default rather than an error. Semantic validation is the admission
//! pipeline's job and never happens during conversion. Each mapping builds a
//! fresh destination value field by field - no reflection-style structural
//! copy - so schema drift between versions surfaces as a compile error
//! instead of a silently mis-copied field.

/// Marker for the storage schema version that spokes convert through.
pub trait Hub {}

/// A served (spoke) schema version that converts through the [`Hub`].
pub trait Convertible {
    /// The hub type this version converts through.
    type Hub: Hub;

    /// Produce the hub representation of this object.
    fn convert_to(&self) -> Self::Hub;

    /// Produce this version's representation of a hub object.
    fn convert_from(hub: &Self::Hub) -> Self;
}
