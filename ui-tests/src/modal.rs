use anyhow::Result;
use tracing::info;

use crate::framework::{
    CLOSE_BUTTON, MODAL_CONTENT, OPEN_BUTTON, TestEnvironment,
};
use crate::telemetry::init_test_logging;

/// Page load: the modal starts hidden, opening it locks the page scroll and
/// the close button undoes both.
#[tokio::test]
async fn test_open_and_close_buttons() -> Result<()> {
    init_test_logging();
    let env = TestEnvironment::setup().await?;
    env.load_page().await?;

    assert!(!env.modal_is_open().await?, "modal should start closed");
    assert_eq!(env.body_overflow().await?, "");

    info!("🔓 Opening modal");
    env.click(OPEN_BUTTON).await?;
    assert!(env.modal_is_open().await?);
    assert_eq!(env.body_overflow().await?, "hidden");

    info!("🔒 Closing modal with the close button");
    env.click(CLOSE_BUTTON).await?;
    assert!(!env.modal_is_open().await?);
    assert_eq!(env.body_overflow().await?, "");

    Ok(())
}

/// Clicks inside the dialog keep it open; a click on the backdrop closes it.
#[tokio::test]
async fn test_overlay_click() -> Result<()> {
    init_test_logging();
    let env = TestEnvironment::setup().await?;
    env.load_page().await?;

    env.click(OPEN_BUTTON).await?;
    assert!(env.modal_is_open().await?);

    info!("🖱️ Clicking modal content");
    env.click(MODAL_CONTENT).await?;
    assert!(env.modal_is_open().await?, "content click must not close");
    assert_eq!(env.body_overflow().await?, "hidden");

    info!("🖱️ Clicking backdrop");
    env.click_backdrop().await?;
    assert!(!env.modal_is_open().await?);
    assert_eq!(env.body_overflow().await?, "");

    Ok(())
}

/// Escape closes an open modal; Escape or any other key on a closed modal
/// changes nothing.
#[tokio::test]
async fn test_keyboard_dismiss() -> Result<()> {
    init_test_logging();
    let env = TestEnvironment::setup().await?;
    env.load_page().await?;

    info!("⌨️ Pressing keys while closed");
    env.press_key("Escape").await?;
    env.press_key("Enter").await?;
    assert!(!env.modal_is_open().await?);

    env.click(OPEN_BUTTON).await?;
    env.press_key("a").await?;
    assert!(env.modal_is_open().await?, "non-Escape key must not close");

    info!("⌨️ Pressing Escape while open");
    env.press_key("Escape").await?;
    assert!(!env.modal_is_open().await?);
    assert_eq!(env.body_overflow().await?, "");

    Ok(())
}
