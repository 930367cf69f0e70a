// ABOUTME: Database-level tests for cabinet and achievable state persistence
// ABOUTME: Covers idempotent inserts, cascade deletes, and atomic delta application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the cabinet persistence layer.

mod common;

use barkeep::auth::hash_password;
use barkeep::matching::AchievableDelta;
use barkeep::models::User;
use common::{create_test_database, seed_basic_catalog};
use std::collections::HashSet;
use uuid::Uuid;

async fn create_user(database: &barkeep::database::Database, name: &str) -> Uuid {
    let user = User::new(
        name.to_owned(),
        format!("{name}@example.com"),
        hash_password("pw").unwrap(),
    );
    database.create_user(&user).await.unwrap()
}

#[tokio::test]
async fn test_add_liquor_is_idempotent() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "alice").await;

    let first = database
        .add_liquor_to_cabinet(user_id, catalog.gin)
        .await
        .unwrap();
    let second = database
        .add_liquor_to_cabinet(user_id, catalog.gin)
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(database.owned_liquor_ids(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_reports_whether_anything_changed() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "bob").await;

    database
        .add_liquor_to_cabinet(user_id, catalog.gin)
        .await
        .unwrap();

    assert!(database
        .remove_liquor_from_cabinet(user_id, catalog.gin)
        .await
        .unwrap());
    assert!(!database
        .remove_liquor_from_cabinet(user_id, catalog.gin)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_deleting_user_cascades_to_cabinet_and_achievable() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "carol").await;

    database
        .add_liquor_to_cabinet(user_id, catalog.gin)
        .await
        .unwrap();
    let delta = AchievableDelta {
        to_add: [catalog.martini].into_iter().collect(),
        to_remove: HashSet::new(),
    };
    database.apply_achievable_delta(user_id, &delta).await.unwrap();

    assert!(database.delete_user(user_id).await.unwrap());

    assert!(database.owned_liquor_ids(user_id).await.unwrap().is_empty());
    assert!(database
        .persisted_achievable_ids(user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_apply_delta_adds_and_removes_in_one_step() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "dave").await;

    let initial = AchievableDelta {
        to_add: [catalog.gin_and_tonic, catalog.martini].into_iter().collect(),
        to_remove: HashSet::new(),
    };
    database
        .apply_achievable_delta(user_id, &initial)
        .await
        .unwrap();

    let swap = AchievableDelta {
        to_add: [catalog.vodka_tonic].into_iter().collect(),
        to_remove: [catalog.martini].into_iter().collect(),
    };
    database.apply_achievable_delta(user_id, &swap).await.unwrap();

    let persisted = database.persisted_achievable_ids(user_id).await.unwrap();
    assert_eq!(
        persisted,
        [catalog.gin_and_tonic, catalog.vodka_tonic]
            .into_iter()
            .collect()
    );
}

#[tokio::test]
async fn test_re_adding_cocktail_to_achievable_is_ignored() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "erin").await;

    let delta = AchievableDelta {
        to_add: [catalog.martini].into_iter().collect(),
        to_remove: HashSet::new(),
    };
    database.apply_achievable_delta(user_id, &delta).await.unwrap();
    database.apply_achievable_delta(user_id, &delta).await.unwrap();

    assert_eq!(
        database.persisted_achievable_ids(user_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_requirements_include_every_cocktail() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();

    let requirements = database.all_cocktail_requirements().await.unwrap();

    assert_eq!(requirements.len(), 3);
    assert_eq!(
        requirements[&catalog.gin_and_tonic],
        [catalog.gin, catalog.tonic].into_iter().collect()
    );
    assert_eq!(
        requirements[&catalog.martini],
        [catalog.gin, catalog.vermouth].into_iter().collect()
    );
}

#[tokio::test]
async fn test_search_escapes_like_wildcards() {
    let database = create_test_database().await.unwrap();
    seed_basic_catalog(&database).await.unwrap();

    // A bare % would otherwise match everything
    let results = database.search_liquors("%").await.unwrap();
    assert!(results.is_empty());

    let results = database.search_liquors("vod").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Vodka");
}

#[tokio::test]
async fn test_file_database_persists_across_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("barkeep.db").display());

    let user_id;
    let gin;
    {
        let database = barkeep::database::Database::new(&url).await.unwrap();
        let catalog = seed_basic_catalog(&database).await.unwrap();
        gin = catalog.gin;
        user_id = create_user(&database, "grace").await;
        database.add_liquor_to_cabinet(user_id, gin).await.unwrap();
    }

    let reopened = barkeep::database::Database::new(&url).await.unwrap();
    let owned = reopened.owned_liquor_ids(user_id).await.unwrap();
    assert_eq!(owned, [gin].into_iter().collect());
}

#[tokio::test]
async fn test_list_achievable_returns_full_recipes() {
    let database = create_test_database().await.unwrap();
    let catalog = seed_basic_catalog(&database).await.unwrap();
    let user_id = create_user(&database, "frank").await;

    let delta = AchievableDelta {
        to_add: [catalog.gin_and_tonic].into_iter().collect(),
        to_remove: HashSet::new(),
    };
    database.apply_achievable_delta(user_id, &delta).await.unwrap();

    let achievable = database.list_achievable_cocktails(user_id).await.unwrap();
    assert_eq!(achievable.len(), 1);
    assert_eq!(achievable[0].cocktail.name, "Gin and Tonic");
    assert_eq!(achievable[0].cocktail.ingredients.len(), 2);
}
