use anyhow::{Context, Result};
use catalog_browser::app::{self, registry::HandlerRegistry};
use catalog_browser::config::{settings, BrowserConfig, Invocation};
use catalog_browser::core::MemoryCatalog;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serves a JSON catalog over stdin/stdout.
///
/// Usage: `catalog-browser [CATALOG]`, `catalog-browser --export-config FILE`
/// or `catalog-browser --import-config FILE`.
///
/// Each stdin line is a request such as
/// `{"address": "/live/browser/search", "params": ["kick", 10]}`; each reply
/// is written as one JSON line on stdout. Logs go to stderr.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = BrowserConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        BrowserConfig::default()
    });

    let catalog_arg = match Invocation::from_args(std::env::args().skip(1))? {
        Invocation::Serve { catalog } => catalog,
        Invocation::ExportConfig(path) => {
            return settings::export_config(&config, &path);
        }
        Invocation::ImportConfig(path) => {
            let imported = settings::import_config(&path)?;
            return settings::save_config(&imported, None);
        }
    };

    let catalog_path = catalog_arg
        .or_else(|| config.catalog_path.clone())
        .context("No catalog file given. Pass a path or set `catalog_path` in the config.")?;
    let catalog = MemoryCatalog::from_json_file(&catalog_path)?;

    let registry = HandlerRegistry::new(catalog, config);
    tracing::info!(
        "Serving {} addresses under {}",
        registry.addresses().len(),
        registry.config().address_prefix
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = app::handle_message(&registry, &line);
        stdout.write_all(format!("{reply}\n").as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, shutting down.");
    Ok(())
}
