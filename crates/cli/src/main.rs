//! Run a product page's view-state container against a product record.
//!
//! Prints the final state, the pixel batches that reached the sink and the
//! head metadata as one JSON document on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::json;

use product_context_catalog::{Product, ProductQuery, Query};
use product_context_events::{Channel, ChannelSink, InMemoryChannel, PixelBatch};
use product_context_observability::LogFormat;
use product_context_state::runtime::{ACCOUNT_VAR, PAGE_URL_VAR};
use product_context_state::{ProductContainer, RecordingHead, RuntimeContext};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Json,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "product-context", version, about)]
struct Cli {
    /// Product record (storefront JSON).
    #[arg(long)]
    product: PathBuf,

    /// Page query string, e.g. `skuId=2000534`.
    #[arg(long, default_value = "")]
    query: String,

    /// Route slug of the product page (`/:slug/p`).
    #[arg(long)]
    slug: Option<String>,

    /// Storefront account (overrides STOREFRONT_ACCOUNT).
    #[arg(long)]
    account: Option<String>,

    /// Page URL (overrides STOREFRONT_PAGE_URL).
    #[arg(long, conflicts_with = "server")]
    page_url: Option<String>,

    /// Render as the server would (no pixel events).
    #[arg(long)]
    server: bool,

    /// Mount while the product fetch is still in flight.
    #[arg(long)]
    loading: bool,

    /// Action to dispatch after mount, as `{"type": ..., "args": ...}`. Repeatable.
    #[arg(long = "action")]
    actions: Vec<String>,

    /// Query string to navigate to after the actions (in-page navigation).
    #[arg(long)]
    navigate: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,
}

fn runtime_context(cli: &Cli) -> anyhow::Result<RuntimeContext> {
    let lookup = |name: &str| match name {
        ACCOUNT_VAR => cli.account.clone().or_else(|| std::env::var(name).ok()),
        PAGE_URL_VAR if cli.server => None,
        PAGE_URL_VAR => cli.page_url.clone().or_else(|| std::env::var(name).ok()),
        _ => std::env::var(name).ok(),
    };
    RuntimeContext::from_lookup(lookup).context("invalid runtime configuration")
}

fn load_product(path: &Path) -> anyhow::Result<Product> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a product record", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    product_context_observability::init_with(cli.log_format.into());

    let runtime = runtime_context(&cli)?;
    let product = load_product(&cli.product)?;
    let product_query = ProductQuery {
        product: Some(product),
        loading: cli.loading,
    };

    let pixel_channel: Arc<InMemoryChannel<PixelBatch>> = Arc::new(InMemoryChannel::new());
    let emitted = pixel_channel.subscribe();

    let mut container = ProductContainer::mount(
        product_query.clone(),
        Query::parse(&cli.query),
        runtime,
        ChannelSink::new(Arc::clone(&pixel_channel)),
        RecordingHead::new(),
    );
    if let Some(slug) = &cli.slug {
        container = container.with_slug(slug.clone());
    }
    container.flush();

    let dispatch = container.dispatch();
    for raw in &cli.actions {
        let action: serde_json::Value =
            serde_json::from_str(raw).with_context(|| format!("action is not JSON: {raw}"))?;
        dispatch.dispatch_json(action)?;
    }
    let applied = container.flush();
    tracing::info!(applied, "applied dispatched actions");

    if let Some(navigate) = &cli.navigate {
        container.update_props(
            ProductQuery {
                loading: false,
                ..product_query
            },
            Query::parse(navigate),
        );
        container.flush();
    }

    let state = container.state();
    let slug = container.slug().map(str::to_owned);
    let (_, head) = container.unmount();

    let output = json!({
        "state": &*state,
        "slug": slug,
        "head": head.current(),
        "pixelBatches": emitted.drain(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_product_file_names_the_path() {
        let err = load_product(Path::new("no/such/product.json")).unwrap_err();
        assert_eq!(err.to_string(), "failed to read no/such/product.json");
    }

    #[test]
    fn flags_parse_with_slug_and_actions() {
        let cli = Cli::try_parse_from([
            "product-context",
            "--product",
            "sneaker.json",
            "--slug",
            "classic-sneaker",
            "--server",
            "--action",
            r#"{"type":"SET_QUANTITY","args":{"quantity":2}}"#,
        ])
        .unwrap();

        assert_eq!(cli.product, PathBuf::from("sneaker.json"));
        assert_eq!(cli.slug.as_deref(), Some("classic-sneaker"));
        assert!(cli.server);
        assert_eq!(cli.actions.len(), 1);
    }
}
