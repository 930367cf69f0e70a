// ABOUTME: Cabinet-to-cocktail matching and reconciliation engine
// ABOUTME: Organizes the pure matcher/reconciler and the orchestrating engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! # Matching Engine
//!
//! The core of Barkeep: given the set of liquors a user owns, determine which
//! cocktails are fully makeable and keep the persisted per-user achievable
//! set in sync.
//!
//! The pipeline is deliberately simple: a full recompute over the catalog
//! followed by a set diff. The catalog is small, and full recompute + diff is
//! the simplest design that is always correct.
//!
//! - [`matcher`]: pure availability computation (strict set containment)
//! - [`reconciler`]: pure add/remove delta between two availability snapshots
//! - [`store`]: the storage seam the engine talks through
//! - [`engine`]: orchestration of one reconciliation run

/// Orchestration of a reconciliation run
pub mod engine;
/// Pure availability matcher
pub mod matcher;
/// Pure snapshot diffing
pub mod reconciler;
/// Storage seam consumed by the engine
pub mod store;

pub use engine::{MatchingEngine, RefreshSummary};
pub use matcher::compute_available;
pub use reconciler::{reconcile, AchievableDelta};
pub use store::CabinetStore;
