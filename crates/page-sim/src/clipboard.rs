use async_trait::async_trait;
use dom_port::{ClipboardPort, PortError};

/// Clipboard with fixed contents, or one that refuses to be read.
#[derive(Clone, Debug)]
pub struct SimClipboard {
    contents: Result<String, String>,
}

impl SimClipboard {
    pub fn text(contents: impl Into<String>) -> Self {
        Self {
            contents: Ok(contents.into()),
        }
    }

    /// Every read fails with `reason`, like a denied permission prompt.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            contents: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ClipboardPort for SimClipboard {
    async fn read_text(&self) -> Result<String, PortError> {
        self.contents.clone().map_err(PortError::new)
    }
}
