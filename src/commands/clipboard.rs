use arboard::Clipboard;

/// Destination for finished posts.
pub trait ClipboardSink {
    fn copy_text(&self, text: &str) -> Result<(), String>;
}

/// System clipboard via `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), String> {
        let mut clipboard =
            Clipboard::new().map_err(|e| format!("Failed to initialize clipboard: {}", e))?;

        // On Linux the content is owned by this process; wait until a
        // clipboard manager has taken it so it survives our exit.
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            clipboard
                .set()
                .wait()
                .text(text.to_owned())
                .map_err(|e| format!("Failed to set clipboard: {}", e))?;
        }

        #[cfg(not(target_os = "linux"))]
        {
            clipboard
                .set_text(text.to_owned())
                .map_err(|e| format!("Failed to set clipboard: {}", e))?;
        }

        log::info!("Copied {} characters to clipboard", text.chars().count());
        Ok(())
    }
}
