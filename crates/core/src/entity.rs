//! Entity traits: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    ///
    /// Identifiers are assigned once at creation and never change afterwards.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Entities that are hidden instead of erased when deleted.
///
/// A deactivated entity stays addressable by id but drops out of default
/// listings and credential lookups.
pub trait SoftDeletable: Entity {
    fn is_active(&self) -> bool;

    fn deactivate(&mut self);
}
