//! `grc-sync` -- fetch the GRC collections and the dashboard layout and
//! print a summary.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                        | Description                  |
//! |------------------------|----------|--------------------------------|------------------------------|
//! | `GRC_API_URL`          | no       | `http://localhost:3000/api/v1` | REST API root                |
//! | `GRC_API_TOKEN`        | no       | --                             | Bearer token                 |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                           | Per-request timeout          |
//! | `RUST_LOG`             | no       | `grc_client=info`              | `tracing` filter directives  |

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grc_client::config::ClientConfig;
use grc_client::layout_sync::LayoutSync;
use grc_client::resources::{Audit, Policy, Vendor, VendorRisk};
use grc_client::store::ResourceStore;
use grc_client::transport::{HttpTransport, Transport};
use grc_core::dashboard::WidgetLayout;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grc_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting grc-sync");

    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new(&config).context("Failed to build HTTP client")?);

    let mut audits = ResourceStore::<Audit>::new(Arc::clone(&transport));
    let mut policies = ResourceStore::<Policy>::new(Arc::clone(&transport));
    let mut vendors = ResourceStore::<Vendor>::new(Arc::clone(&transport));

    audits.fetch_all().await.context("Failed to fetch audits")?;
    policies.fetch_all().await.context("Failed to fetch policies")?;
    vendors.fetch_all().await.context("Failed to fetch vendors")?;

    let today = Utc::now().date_naive();
    let open_audits = audits.items().iter().filter(|a| a.status.is_open()).count();
    let overdue_reviews = policies
        .items()
        .iter()
        .filter(|p| p.is_review_overdue(today))
        .count();
    let high_risk_vendors = vendors
        .items()
        .iter()
        .filter(|v| v.risk >= VendorRisk::High)
        .count();

    println!("audits:   {} ({open_audits} open)", audits.items().len());
    println!(
        "policies: {} ({overdue_reviews} overdue for review)",
        policies.items().len()
    );
    println!(
        "vendors:  {} ({high_risk_vendors} high or critical risk)",
        vendors.items().len()
    );

    let widgets = LayoutSync::new(transport)
        .load()
        .await
        .context("Failed to load dashboard layout")?;
    let layout = WidgetLayout::new(widgets);
    let visible: Vec<&str> = layout.visible_widgets().map(|w| w.title.as_str()).collect();
    println!(
        "layout:   {} widgets, visible: {}",
        layout.len(),
        if visible.is_empty() {
            "none".to_string()
        } else {
            visible.join(", ")
        }
    );

    Ok(())
}
