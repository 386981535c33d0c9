use async_trait::async_trait;

use crate::error::ClipboardError;

/// Write access to the system clipboard.
#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[async_trait(?Send)]
impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text).await
    }
}
