// ABOUTME: Pure reconciler diffing persisted achievable cocktails against a fresh computation
// ABOUTME: Produces the minimal add/remove delta the store applies atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Snapshot reconciliation
//!
//! The persisted achievable set is a cache of the matcher output, so keeping
//! it current is a plain set diff: add what became makeable, remove what
//! stopped being makeable. Applying the delta is the store's job; this step
//! is pure and holds no locks.

use crate::models::CocktailId;
use serde::Serialize;
use std::collections::HashSet;

/// Minimal changeset between two availability snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievableDelta {
    /// Cocktails that became makeable since the last reconciliation
    pub to_add: HashSet<CocktailId>,
    /// Cocktails that are no longer makeable
    pub to_remove: HashSet<CocktailId>,
}

impl AchievableDelta {
    /// Whether applying this delta would change anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff the previously persisted achievable set against the current one
///
/// `to_add` and `to_remove` are disjoint by construction, and
/// `(previous \ to_remove) ∪ to_add` reconstructs `current` exactly. An empty
/// `current` (empty cabinet) is a valid degenerate input that clears all
/// prior state, not an error or a no-op.
#[must_use]
pub fn reconcile(
    previous: &HashSet<CocktailId>,
    current: &HashSet<CocktailId>,
) -> AchievableDelta {
    AchievableDelta {
        to_add: current.difference(previous).copied().collect(),
        to_remove: previous.difference(current).copied().collect(),
    }
}
