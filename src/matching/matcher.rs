// ABOUTME: Pure availability matcher computing which cocktails an owned set satisfies
// ABOUTME: Strict set-containment matching with malformed-catalog guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Availability matching
//!
//! A cocktail is available exactly when every liquor it requires is owned.
//! Extra owned liquors are irrelevant; there is no substitution and no
//! partial credit. The computation is a pure function over its inputs with
//! no dependence on iteration order.

use crate::models::{CocktailId, LiquorId};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Compute the set of cocktails fully satisfiable from `owned`
///
/// A cocktail with an empty requirement set is excluded regardless of input:
/// an empty subset test would match every user, so a malformed catalog entry
/// must not silently become makeable by everyone. Such entries are logged as
/// catalog-integrity warnings and skipped; they never fail the run.
#[must_use]
pub fn compute_available(
    owned: &HashSet<LiquorId>,
    requirements: &HashMap<CocktailId, HashSet<LiquorId>>,
) -> HashSet<CocktailId> {
    requirements
        .iter()
        .filter(|(cocktail_id, required)| {
            if required.is_empty() {
                warn!(
                    cocktail_id,
                    "catalog integrity: cocktail has no ingredient requirements, excluding"
                );
                return false;
            }
            required.is_subset(owned)
        })
        .map(|(cocktail_id, _)| *cocktail_id)
        .collect()
}
