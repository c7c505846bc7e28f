//! Run with debugging output:
//!
//! ```shell
//! RUST_LOG=ui_tests=debug cargo test -p ui-tests -- --nocapture
//! ```
//!
//! Needs `trunk` and `geckodriver` on the `PATH`.

use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder, Locator};
use rand::Rng;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub const OPEN_BUTTON: &str = "open-modal";
pub const CLOSE_BUTTON: &str = "close-modal";
pub const MODAL: &str = "modal";
pub const MODAL_CONTENT: &str = "modal-content";
pub const OPEN_CLASS: &str = "modal--open";

pub struct TestEnvironment {
    pub browser: Client,
    pub frontend_process: Child,
    pub geckodriver_process: Child,
    pub frontend_url: String,
}

impl TestEnvironment {
    #[cfg(test)]
    #[allow(dead_code)]
    pub async fn setup() -> Result<Self> {
        Self::setup_with_options(false).await
    }

    pub async fn setup_headed() -> Result<Self> {
        Self::setup_with_options(true).await
    }

    async fn setup_with_options(headed: bool) -> Result<Self> {
        info!("🔧 Setting up test environment");

        info!("🦎 Starting geckodriver");
        let (geckodriver_process, gecko_port) =
            start_geckodriver_with_retry(4444).await?;
        info!("✅ Geckodriver running on port {}", gecko_port);

        info!("🎨 Starting frontend");
        let (frontend_process, frontend_port) =
            start_frontend_with_retry(8080).await?;
        let frontend_url = format!("http://localhost:{}", frontend_port);

        wait_for_frontend(&frontend_url).await?;
        info!("✅ Frontend ready at {}", frontend_url);

        info!("🌐 Connecting to browser");
        let browser = connect_to_browser(gecko_port, headed).await?;
        info!("✅ Browser connected");

        Ok(TestEnvironment {
            browser,
            frontend_process,
            geckodriver_process,
            frontend_url,
        })
    }

    /// Load the page fresh and wait for the wasm module to attach its
    /// listeners.
    pub async fn load_page(&self) -> Result<()> {
        self.browser.goto(&self.frontend_url).await?;
        self.browser
            .wait()
            .at_most(Duration::from_secs(10))
            .for_element(Locator::Id(OPEN_BUTTON))
            .await
            .context("Open button never appeared")?;
        // The module loads asynchronously after the markup is present.
        sleep(Duration::from_millis(500)).await;
        Ok(())
    }

    pub async fn click(&self, id: &str) -> Result<()> {
        debug!("Clicking #{}", id);
        self.browser
            .find(Locator::Id(id))
            .await
            .with_context(|| format!("Missing element #{id}"))?
            .click()
            .await?;
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    /// Click the modal container itself rather than whatever content sits at
    /// its center.
    pub async fn click_backdrop(&self) -> Result<()> {
        debug!("Clicking backdrop");
        self.browser
            .execute(
                &format!("document.getElementById('{MODAL}').click();"),
                vec![],
            )
            .await?;
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    pub async fn press_key(&self, key: &str) -> Result<()> {
        debug!("Pressing {}", key);
        self.browser
            .execute(
                "document.dispatchEvent(new KeyboardEvent('keydown', \
                 { key: arguments[0], bubbles: true }));",
                vec![serde_json::json!(key)],
            )
            .await?;
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    pub async fn modal_is_open(&self) -> Result<bool> {
        let class = self
            .browser
            .find(Locator::Id(MODAL))
            .await?
            .attr("class")
            .await?
            .unwrap_or_default();
        Ok(class.split_whitespace().any(|c| c == OPEN_CLASS))
    }

    pub async fn body_overflow(&self) -> Result<String> {
        let value = self
            .browser
            .execute("return document.body.style.overflow;", vec![])
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .context("body overflow was not a string")
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        info!("🧹 Cleaning up test environment");

        if let Err(e) = self.frontend_process.kill() {
            warn!("Failed to kill frontend process: {}", e);
        }

        if let Err(e) = self.geckodriver_process.kill() {
            warn!("Failed to kill geckodriver process: {}", e);
        }

        info!("✅ Cleanup complete");
    }
}

async fn start_geckodriver_with_retry(base_port: u16) -> Result<(Child, u16)> {
    for attempt in 1..=5 {
        let port = base_port + rand::thread_rng().gen_range(0..=100);
        debug!(
            "Attempting to start geckodriver on port {} (attempt {})",
            port, attempt
        );

        match Command::new("geckodriver")
            .arg("--port")
            .arg(port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(mut child) => {
                // Give geckodriver a moment to either start successfully or exit with error
                sleep(Duration::from_millis(500)).await;

                match child.try_wait() {
                    Ok(Some(status)) => {
                        // Likely a port conflict
                        debug!(
                            "Geckodriver exited with status {}, trying different port",
                            status
                        );
                    }
                    Ok(None) => {
                        return Ok((child, port));
                    }
                    Err(e) => {
                        debug!("Error checking geckodriver status: {}", e);
                        let _ = child.kill();
                    }
                }
            }
            Err(e) => {
                debug!("Failed to start geckodriver: {}", e);
            }
        }

        if attempt < 5 {
            sleep(Duration::from_millis(100)).await;
        }
    }

    Err(anyhow::anyhow!(
        "Failed to start geckodriver after 5 attempts"
    ))
}

async fn start_frontend_with_retry(base_port: u16) -> Result<(Child, u16)> {
    // Build up front so serve only has to start the file server
    debug!("Building frontend with trunk build");
    let build_result = Command::new("trunk")
        .arg("build")
        .current_dir("../ui")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match build_result {
        Ok(status) if status.success() => {
            debug!("Frontend build successful");
        }
        Ok(status) => {
            return Err(anyhow::anyhow!(
                "Frontend build failed with status: {}",
                status
            ));
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to run trunk build: {}", e));
        }
    }

    for attempt in 1..=5 {
        let port = base_port + rand::thread_rng().gen_range(0..=100);
        debug!(
            "Attempting to start frontend on port {} (attempt {})",
            port, attempt
        );

        match Command::new("trunk")
            .arg("serve")
            .arg("--port")
            .arg(port.to_string())
            .current_dir("../ui")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(mut child) => {
                sleep(Duration::from_millis(500)).await;

                match child.try_wait() {
                    Ok(Some(status)) => {
                        debug!(
                            "Frontend exited with status {}, trying different port",
                            status
                        );
                    }
                    Ok(None) => {
                        return Ok((child, port));
                    }
                    Err(e) => {
                        debug!("Error checking frontend status: {}", e);
                        let _ = child.kill();
                    }
                }
            }
            Err(e) => {
                debug!("Failed to start frontend: {}", e);
            }
        }

        if attempt < 5 {
            sleep(Duration::from_millis(100)).await;
        }
    }

    Err(anyhow::anyhow!("Failed to start frontend after 5 attempts"))
}

async fn wait_for_frontend(url: &str) -> Result<()> {
    for i in 1..=30 {
        match reqwest::get(url).await {
            Ok(response) if response.status().is_success() => {
                debug!("Frontend ready after {} attempts", i);
                return Ok(());
            }
            _ => {
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
    Err(anyhow::anyhow!(
        "Frontend failed to start after 30 attempts"
    ))
}

async fn connect_to_browser(gecko_port: u16, headed: bool) -> Result<Client> {
    let gecko_url = format!("http://localhost:{}", gecko_port);

    let mut caps = serde_json::Map::new();
    let firefox_opts = if headed {
        info!("🖥️ Starting browser in headed mode");
        serde_json::json!({
            "log": {"level": "error"}
        })
    } else {
        info!("👻 Starting browser in headless mode");
        serde_json::json!({
            "args": ["--headless"],
            "log": {"level": "error"}
        })
    };
    caps.insert("moz:firefoxOptions".to_string(), firefox_opts);

    let client = ClientBuilder::native()
        .capabilities(caps)
        .connect(&gecko_url)
        .await
        .context("Failed to connect to geckodriver")?;

    Ok(client)
}
