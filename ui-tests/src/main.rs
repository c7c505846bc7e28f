//! Browser automation tests for the modal page, using standard Rust tests
//! with #[tokio::test]. Run with: cargo test -p ui-tests
//!
//! For human-in-the-loop debugging, main() serves the page and opens a
//! headed browser for manual inspection.

#![allow(unused)]

use anyhow::Result;
use tracing::info;

mod framework;
#[cfg(test)]
mod modal;
mod telemetry;

use crate::framework::TestEnvironment;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber);

    info!("🚀 Starting modal UI environment");
    let env = TestEnvironment::setup_headed().await?;
    env.load_page().await?;

    info!("🎯 You can now test:");
    info!("   • Open button shows the modal and locks page scroll");
    info!("   • Close button, backdrop click and Escape hide it again");
    info!("   • Clicks inside the dialog keep it open");
    info!("");
    let current_url = env.browser.current_url().await?;
    info!("🌐 Browser is now open at: {}", current_url);
    info!("👋 Press Ctrl+C to exit and close the browser");

    tokio::signal::ctrl_c().await?;
    info!("📝 Received keyboard interrupt, shutting down...");

    info!("🧹 Cleaning up and closing browser");
    Ok(())
}
