// ABOUTME: Orchestration of one reconciliation run from reads through atomic apply
// ABOUTME: Ties the catalog, matcher, reconciler, and cabinet store together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Reconciliation orchestration
//!
//! A reconciliation run is a short-lived unit of work: read the user's owned
//! set and persisted achievable set, read the full catalog requirements,
//! compute availability, diff, and apply the delta atomically. Runs for
//! different users are fully independent; a failed run leaves the previously
//! persisted state authoritative, and retrying is always safe because an
//! unchanged input yields an empty delta.

use super::matcher::compute_available;
use super::reconciler::reconcile;
use super::store::CabinetStore;
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Result summary of one reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Cocktails that became makeable
    pub added: usize,
    /// Cocktails that stopped being makeable
    pub removed: usize,
}

/// Matching engine bound to a cabinet store
///
/// Stateless apart from the injected store handle; safe to share and to call
/// concurrently for different users.
pub struct MatchingEngine<S: CabinetStore> {
    store: Arc<S>,
}

impl<S: CabinetStore> Clone for MatchingEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CabinetStore> MatchingEngine<S> {
    /// Create an engine over the given store
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Recompute the user's achievable cocktails and sync persisted state
    ///
    /// Any failing read or the apply aborts the whole run with no partial
    /// writes; the caller sees a single `DatabaseError` and the previously
    /// persisted achievable set remains authoritative until retried.
    ///
    /// # Errors
    ///
    /// Returns `AppError::database` when any store operation fails.
    pub async fn refresh_achievable(&self, user_id: Uuid) -> AppResult<RefreshSummary> {
        let owned = self
            .store
            .owned_liquors(user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let previous = self
            .store
            .persisted_achievable(user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let requirements = self
            .store
            .all_cocktail_requirements()
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let current = compute_available(&owned, &requirements);
        let delta = reconcile(&previous, &current);

        debug!(
            %user_id,
            owned = owned.len(),
            makeable = current.len(),
            to_add = delta.to_add.len(),
            to_remove = delta.to_remove.len(),
            "computed achievable delta"
        );

        if !delta.is_empty() {
            self.store
                .apply_achievable_delta(user_id, &delta)
                .await
                .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;
        }

        let summary = RefreshSummary {
            added: delta.to_add.len(),
            removed: delta.to_remove.len(),
        };

        info!(
            %user_id,
            added = summary.added,
            removed = summary.removed,
            "reconciled achievable cocktails"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::AchievableDelta;
    use crate::models::{CocktailId, LiquorId};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// In-memory store for exercising the engine without a database
    #[derive(Default)]
    struct FakeStore {
        owned: HashSet<LiquorId>,
        requirements: HashMap<CocktailId, HashSet<LiquorId>>,
        achievable: Mutex<HashSet<CocktailId>>,
        fail_apply: bool,
    }

    #[async_trait]
    impl CabinetStore for FakeStore {
        async fn owned_liquors(&self, _user_id: Uuid) -> Result<HashSet<LiquorId>> {
            Ok(self.owned.clone())
        }

        async fn persisted_achievable(&self, _user_id: Uuid) -> Result<HashSet<CocktailId>> {
            Ok(self.achievable.lock().unwrap().clone())
        }

        async fn all_cocktail_requirements(
            &self,
        ) -> Result<HashMap<CocktailId, HashSet<LiquorId>>> {
            Ok(self.requirements.clone())
        }

        async fn apply_achievable_delta(
            &self,
            _user_id: Uuid,
            delta: &AchievableDelta,
        ) -> Result<()> {
            if self.fail_apply {
                return Err(anyhow!("store unavailable"));
            }
            let mut achievable = self.achievable.lock().unwrap();
            achievable.retain(|id| !delta.to_remove.contains(id));
            achievable.extend(delta.to_add.iter().copied());
            Ok(())
        }
    }

    fn store_with(
        owned: &[LiquorId],
        requirements: &[(CocktailId, &[LiquorId])],
        persisted: &[CocktailId],
    ) -> FakeStore {
        FakeStore {
            owned: owned.iter().copied().collect(),
            requirements: requirements
                .iter()
                .map(|(id, req)| (*id, req.iter().copied().collect()))
                .collect(),
            achievable: Mutex::new(persisted.iter().copied().collect()),
            fail_apply: false,
        }
    }

    #[tokio::test]
    async fn test_refresh_adds_newly_makeable() {
        // gin=1 tonic=2 vodka=3; A={gin,tonic} B={vodka,tonic}
        let store = store_with(&[1, 2, 3], &[(10, &[1, 2]), (11, &[3, 2])], &[10]);
        let engine = MatchingEngine::new(Arc::new(store));

        let summary = engine.refresh_achievable(Uuid::new_v4()).await.unwrap();

        assert_eq!(summary, RefreshSummary { added: 1, removed: 0 });
        assert_eq!(
            *engine.store.achievable.lock().unwrap(),
            [10, 11].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn test_empty_cabinet_clears_persisted_state() {
        let store = store_with(&[], &[(10, &[1, 2]), (11, &[3, 2])], &[10, 11]);
        let engine = MatchingEngine::new(Arc::new(store));

        let summary = engine.refresh_achievable(Uuid::new_v4()).await.unwrap();

        assert_eq!(summary, RefreshSummary { added: 0, removed: 2 });
        assert!(engine.store.achievable.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let store = store_with(&[1, 2], &[(10, &[1, 2])], &[]);
        let engine = MatchingEngine::new(Arc::new(store));
        let user_id = Uuid::new_v4();

        let first = engine.refresh_achievable(user_id).await.unwrap();
        assert_eq!(first, RefreshSummary { added: 1, removed: 0 });

        let second = engine.refresh_achievable(user_id).await.unwrap();
        assert_eq!(second, RefreshSummary { added: 0, removed: 0 });
    }

    #[tokio::test]
    async fn test_failed_apply_leaves_previous_state() {
        let mut store = store_with(&[1, 2], &[(10, &[1, 2])], &[]);
        store.fail_apply = true;
        let engine = MatchingEngine::new(Arc::new(store));

        let result = engine.refresh_achievable(Uuid::new_v4()).await;

        assert!(result.is_err());
        assert!(engine.store.achievable.lock().unwrap().is_empty());
    }
}
