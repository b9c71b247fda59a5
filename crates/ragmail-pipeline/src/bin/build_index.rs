//! Offline index initializer.
//!
//! Builds the corpus from the data directory, embeds every unit, and
//! persists the index snapshot, replacing any prior one. Must be run before
//! the first email can be generated.
//!
//! Usage:
//!   cargo run --bin ragmail-init

use std::sync::Arc;

use ragmail_core::GeneratorConfig;
use ragmail_inference::{GroqBackend, GroqConfig, OllamaBackend, OllamaConfig};
use ragmail_pipeline::EmailGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ragmail=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = GeneratorConfig::from_env()?;

    let embed = Arc::new(OllamaBackend::new(OllamaConfig {
        base_url: config.ollama_base_url.clone(),
        model: config.embed_model.clone(),
        dimension: config.embed_dimension,
        timeout_secs: config.embed_timeout_secs,
    })?);

    if !embed.health_check().await? {
        anyhow::bail!(
            "embedding backend is not reachable at {}; is Ollama running?",
            config.ollama_base_url
        );
    }

    let gen = Arc::new(GroqBackend::new(GroqConfig {
        base_url: config.groq_base_url.clone(),
        api_key: config.groq_api_key.clone(),
        model: config.gen_model.clone(),
        timeout_secs: config.gen_timeout_secs,
        temperature: config.gen_temperature,
    })?);

    let index_path = config.index_path.clone();
    let mut generator = EmailGenerator::with_backends(config, embed, gen);
    let count = generator.build_index().await?;

    println!(
        "Indexed {} corpus units into {}",
        count,
        index_path.display()
    );
    Ok(())
}
