use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use placerec_cli::embed::HashEmbedder;
use placerec_core::config::{expand_path, AppConfig};
use placerec_core::traits::Embedder;
use placerec_core::types::{Category, EntityId};
use placerec_store::{KeywordIndexer, KeywordRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SeedRow {
    entity_id: EntityId,
    keyword: String,
    category: Category,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <seed.json> [db_path]", args[0]);
        eprintln!("  seed.json: [{{\"entity_id\": 7, \"keyword\": \"grilled lamb\", \"category\": \"food_product\"}}, ...]");
        std::process::exit(1);
    }

    let config = AppConfig::load()?;
    let db_path: PathBuf = args
        .get(2)
        .map(expand_path)
        .unwrap_or_else(|| expand_path(&config.db_path));

    let rows: Vec<SeedRow> = serde_json::from_str(&std::fs::read_to_string(&args[1])?)?;
    println!("Seeding {} keyword rows into {}", rows.len(), db_path.display());

    let mut by_category: HashMap<Category, Vec<SeedRow>> = HashMap::new();
    for row in rows {
        by_category.entry(row.category).or_default().push(row);
    }

    let embedder = HashEmbedder::new(config.vector_dim);
    let indexer = KeywordIndexer::open(&db_path, config.vector_dim).await?;
    for (category, rows) in by_category {
        let texts: Vec<String> = rows.iter().map(|r| r.keyword.clone()).collect();
        let vectors = embedder.embed_batch(&texts)?;
        let records: Vec<KeywordRecord> = rows
            .into_iter()
            .zip(vectors)
            .map(|(row, vector)| KeywordRecord {
                entity_id: row.entity_id,
                keyword: row.keyword,
                vector,
            })
            .collect();
        println!("  {} -> {} rows", category, records.len());
        indexer.add_keywords(category, &records).await?;
    }
    println!("Done.");
    Ok(())
}
