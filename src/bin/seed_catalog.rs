// ABOUTME: Catalog seeding binary that loads liquors and cocktails from JSON
// ABOUTME: Populates the reference tables an empty Barkeep database needs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Catalog seeding tool
//!
//! Loads a JSON seed file into the liquor and cocktail reference tables.
//! Liquor types are created idempotently; cocktail ingredients are resolved
//! by liquor name, so liquors must be listed before the cocktails that use
//! them.
//!
//! Seed file shape:
//!
//! ```json
//! {
//!   "liquor_types": ["Gin", "Mixer"],
//!   "liquors": [{ "name": "Gin", "type": "Gin" }],
//!   "cocktails": [
//!     {
//!       "name": "Gin and Tonic",
//!       "glass_type": "Highball",
//!       "ingredients": [{ "liquor": "Gin", "amount": 2.0, "unit": "oz" }]
//!     }
//!   ]
//! }
//! ```

use anyhow::{bail, Context, Result};
use barkeep::config::environment::ServerConfig;
use barkeep::database::Database;
use barkeep::logging;
use barkeep::models::LiquorId;
use clap::Parser;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Load liquors and cocktails into a Barkeep database",
    version
)]
struct Args {
    /// Path to the JSON seed file
    seed_file: PathBuf,

    /// Database URL (defaults to DATABASE_URL or ./data/barkeep.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    liquor_types: Vec<String>,
    #[serde(default)]
    liquors: Vec<SeedLiquor>,
    #[serde(default)]
    cocktails: Vec<SeedCocktail>,
}

#[derive(Debug, Deserialize)]
struct SeedLiquor {
    name: String,
    #[serde(rename = "type")]
    type_name: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedCocktail {
    name: String,
    image_url: Option<String>,
    glass_type: Option<String>,
    instructions: Option<String>,
    ingredients: Vec<SeedIngredient>,
}

#[derive(Debug, Deserialize)]
struct SeedIngredient {
    liquor: String,
    amount: f64,
    unit: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::from_env()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());

    let contents = std::fs::read_to_string(&args.seed_file)
        .with_context(|| format!("Failed to read seed file {}", args.seed_file.display()))?;
    let seed: SeedFile = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid seed file {}", args.seed_file.display()))?;

    let database = Database::new(&database_url).await?;

    let mut type_ids: HashMap<String, i64> = HashMap::new();
    for type_name in &seed.liquor_types {
        let id = database.create_liquor_type(type_name).await?;
        type_ids.insert(type_name.clone(), id);
    }

    let mut liquor_ids: HashMap<String, LiquorId> = HashMap::new();
    for liquor in &seed.liquors {
        let type_id = match &liquor.type_name {
            Some(type_name) => Some(match type_ids.get(type_name) {
                Some(id) => *id,
                // Types referenced but not declared up front are created on demand
                None => {
                    let id = database.create_liquor_type(type_name).await?;
                    type_ids.insert(type_name.clone(), id);
                    id
                }
            }),
            None => None,
        };

        let id = database
            .create_liquor(&liquor.name, type_id, liquor.image_url.as_deref())
            .await
            .with_context(|| format!("Failed to create liquor {:?}", liquor.name))?;
        liquor_ids.insert(liquor.name.clone(), id);
    }

    for cocktail in &seed.cocktails {
        let mut ingredients: Vec<(LiquorId, f64, &str)> =
            Vec::with_capacity(cocktail.ingredients.len());
        for ingredient in &cocktail.ingredients {
            let Some(liquor_id) = liquor_ids.get(&ingredient.liquor) else {
                bail!(
                    "Cocktail {:?} references unknown liquor {:?}",
                    cocktail.name,
                    ingredient.liquor
                );
            };
            ingredients.push((*liquor_id, ingredient.amount, ingredient.unit.as_str()));
        }

        database
            .create_cocktail(
                &cocktail.name,
                cocktail.image_url.as_deref(),
                cocktail.glass_type.as_deref(),
                cocktail.instructions.as_deref(),
                &ingredients,
            )
            .await
            .with_context(|| format!("Failed to create cocktail {:?}", cocktail.name))?;
    }

    info!(
        liquor_types = seed.liquor_types.len(),
        liquors = seed.liquors.len(),
        cocktails = seed.cocktails.len(),
        "catalog seeded"
    );

    Ok(())
}
