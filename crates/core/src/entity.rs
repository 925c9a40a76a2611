//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stock entries and withdrawals are entities: two entries with identical
/// bag counts are still distinct records.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
