use std::process::Stdio;

use async_trait::async_trait;
use promptdeck_core::{Clipboard, ClipboardError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(windows)]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// System clipboard via arboard, falling back to the platform's
/// clipboard command when no clipboard handle can be opened.
pub struct SystemClipboard {
    // Kept alive so X11 selections stay owned after the write
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let handle = match arboard::Clipboard::new() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::info!("No native clipboard ({}), using clipboard commands", e);
                None
            }
        };
        Self { handle }
    }
}

#[async_trait(?Send)]
impl Clipboard for SystemClipboard {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(handle) = self.handle.as_mut() {
            match handle.set_text(text.to_string()) {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!("Native clipboard write failed: {}", e),
            }
        }
        pipe_to_command(text).await
    }
}

async fn pipe_to_command(text: &str) -> Result<(), ClipboardError> {
    let mut last_error = ClipboardError::Unavailable("no clipboard command available".to_string());

    for (program, args) in CLIPBOARD_COMMANDS {
        match run_clipboard_command(program, args, text).await {
            Ok(()) => {
                tracing::debug!("Copied via {}", program);
                return Ok(());
            }
            Err(e) => {
                tracing::debug!("{} failed: {}", program, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

async fn run_clipboard_command(program: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::Unavailable(format!("{program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| ClipboardError::Write(format!("{program}: {e}")))?;
    }

    let status = child
        .wait()
        .await
        .map_err(|e| ClipboardError::Write(format!("{program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Write(format!("{program} exited with {status}")))
    }
}
