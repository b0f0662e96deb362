//! Terminal rendering of user notices

use async_trait::async_trait;
use dom_port::{NoticePort, UserNotice};
use tracing::warn;

/// Prints notices to stderr, where an interactive user will see them.
#[derive(Clone, Debug, Default)]
pub struct ConsoleNotice;

impl ConsoleNotice {
    pub fn render(notice: UserNotice) -> String {
        format!("tabfill: {}", notice.default_text())
    }
}

#[async_trait]
impl NoticePort for ConsoleNotice {
    async fn alert(&self, notice: UserNotice) {
        warn!(key = notice.message_key(), "showing notice");
        eprintln!("{}", Self::render(notice));
    }
}
