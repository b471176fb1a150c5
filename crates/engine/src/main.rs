//! Sheetsmith Engine - prints the derived sheet for a saved character.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetsmith_domain::first_invalid_step;
use sheetsmith_engine::infrastructure::{catalog::JsonCatalog, settings::EngineSettings};
use sheetsmith_engine::stores::CharacterStore;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = EngineSettings::from_env().with_args(std::env::args().skip(1));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Sheetsmith Engine");

    let mut store = CharacterStore::new();
    if let Some(path) = &settings.character_path {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading character {}", path.display()))?;
        store
            .import_json(&json)
            .with_context(|| format!("importing character {}", path.display()))?;
    }

    let catalog = match &settings.classes_path {
        Some(path) => JsonCatalog::from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => JsonCatalog::default(),
    };
    tracing::info!(classes = catalog.class_count(), races = catalog.race_count(), "Catalog loaded");

    if let Some((step, err)) = first_invalid_step(&store.get()) {
        tracing::warn!(step = %step, error = %err, "Character is incomplete");
    }

    let stats = store.derived_stats(&catalog);
    let out = if settings.pretty {
        serde_json::to_string_pretty(&stats)?
    } else {
        serde_json::to_string(&stats)?
    };
    println!("{out}");
    Ok(())
}
