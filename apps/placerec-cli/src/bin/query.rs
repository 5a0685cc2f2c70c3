use std::env;
use std::sync::Arc;

use placerec_cli::embed::HashEmbedder;
use placerec_core::config::{expand_path, AppConfig};
use placerec_core::traits::Embedder;
use placerec_core::types::Category;
use placerec_engine::RecommendationEngine;
use placerec_store::PlaceVectorStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <category:keyword> [<category:keyword> ...] [--place-category NAME]",
            args[0]
        );
        eprintln!("Example: {} 'food_product:grilled lamb' 'ambience_space:quiet' --place-category restaurant", args[0]);
        std::process::exit(1);
    }

    let mut categories = Vec::new();
    let mut keywords = Vec::new();
    let mut place_category = None;
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--place-category" {
            place_category = args.get(i + 1).cloned();
            i += 2;
            continue;
        }
        let (label, keyword) = args[i]
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("expected category:keyword, got '{}'", args[i]))?;
        let category = Category::from_collection_name(label)
            .ok_or_else(|| anyhow::anyhow!("unknown category '{}'", label))?;
        categories.push(category);
        keywords.push(keyword.to_string());
        i += 1;
    }

    let config = AppConfig::load()?;
    let embedder = HashEmbedder::new(config.vector_dim);
    let vectors = embedder.embed_batch(&keywords)?;

    // Services are built once here and handed down; no hidden globals.
    let store = PlaceVectorStore::open(&expand_path(&config.db_path), config.vector_dim).await?;
    let engine = RecommendationEngine::new(Arc::new(store), config.search_limit);

    let response = engine.recommend(&categories, &vectors, place_category).await?;

    match &response.place_category {
        Some(hint) => println!("Place category: {hint}"),
        None => println!("Place category: (none)"),
    }
    println!("{} recommendation(s)", response.recommendations.len());
    for (rank, rec) in response.recommendations.iter().enumerate() {
        println!(
            "  {}. entity={}  score={:.4}  keywords={}",
            rank + 1,
            rec.id,
            rec.similarity_score,
            rec.keywords.join(", ")
        );
    }
    Ok(())
}
