//! Optimistic rating mutations with single-use rollback.
//!
//! A rating is made visible to observers before the remote service confirms
//! it. [`OptimisticMutation`] owns the pre-mutation snapshot for one such
//! operation and restores it when confirmation fails, without leaking the
//! in-flight flag to observers.

use crate::reviews::models::Reaction;

/// An entity that supports a speculative reaction update with rollback.
pub trait Rateable: Clone {
    /// Reaction currently attached to the entity.
    fn reaction(&self) -> Reaction;

    /// True while a rating mutation is in flight for this entity.
    fn is_processing(&self) -> bool;

    /// Returns a copy with `reaction` applied and the in-flight flag set.
    #[must_use]
    fn with_reaction(&self, reaction: Reaction) -> Self;

    /// Returns a copy with the in-flight flag set to `processing`.
    #[must_use]
    fn with_processing(&self, processing: bool) -> Self;
}

/// Pre-mutation snapshot for a single in-flight rating operation.
///
/// Created by [`OptimisticMutation::pre_apply`], consulted only when the
/// remote confirmation fails, and discarded once the operation resolves.
/// Each record belongs to exactly one operation; it is never shared across
/// operations or entities.
#[derive(Debug, Clone)]
pub struct OptimisticMutation<T: Rateable> {
    prior: Option<T>,
}

impl<T: Rateable> OptimisticMutation<T> {
    /// Applies `reaction` speculatively and snapshots the prior value.
    ///
    /// Returns the entity with the reaction applied and the in-flight flag
    /// set, paired with the record holding a copy of the original. Performs
    /// no I/O. The caller is responsible for checking
    /// [`Rateable::is_processing`] first; pre-applying on top of an in-flight
    /// mutation would lose the earlier snapshot.
    #[must_use]
    pub fn pre_apply(reaction: Reaction, entity: &T) -> (T, Self) {
        let speculative = entity.with_reaction(reaction);
        let record = Self {
            prior: Some(entity.clone()),
        };
        (speculative, record)
    }

    /// Restores the pre-mutation value with the in-flight flag cleared.
    ///
    /// The snapshot is single-use: the first call consumes it, and any later
    /// call returns `None` without touching state.
    pub fn rollback(&mut self) -> Option<T> {
        self.prior
            .take()
            .map(|entity| entity.with_processing(false))
    }

    /// Discards the snapshot once the authoritative value has been applied.
    pub fn confirm(&mut self) {
        self.prior = None;
    }

    /// True once the snapshot has been consumed or discarded.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.prior.is_none()
    }
}
