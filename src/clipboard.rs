// System clipboard access

use anyhow::{Context, Result};

pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to open system clipboard")?;
    clipboard
        .set_text(text.to_owned())
        .context("Failed to copy to clipboard")?;
    Ok(())
}
