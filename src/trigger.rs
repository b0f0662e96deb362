//! Invocation triggers and engine launch
//!
//! The engine runs when the user picks the context-menu entry or presses the
//! bound shortcut. Anything else reaching the launcher is ignored.

use std::path::Path;
use std::sync::Arc;

use action_flow::{
    AutofillError, AutofillOrchestrator, AutofillOrchestratorBuilder, AutofillPolicyView,
    RunReport,
};
use dom_port::{ClipboardPort, NoticePort};
use page_sim::{SimError, SimPage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

pub const MENU_ITEM_ID: &str = "tabfill";
pub const COMMAND_NAME: &str = "auto_paste";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum Trigger {
    ContextMenu { item_id: String },
    Command { name: String },
}

impl Trigger {
    pub fn menu() -> Self {
        Trigger::ContextMenu {
            item_id: MENU_ITEM_ID.to_string(),
        }
    }

    pub fn shortcut() -> Self {
        Trigger::Command {
            name: COMMAND_NAME.to_string(),
        }
    }

    /// Whether this trigger should start a run.
    pub fn accepts(&self) -> bool {
        match self {
            Trigger::ContextMenu { item_id } => item_id == MENU_ITEM_ID,
            Trigger::Command { name } => name == COMMAND_NAME,
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    /// The target document could not be attached. Never shown to the user.
    #[error("failed to attach to {path}: {source}")]
    Inject {
        path: String,
        #[source]
        source: SimError,
    },

    #[error(transparent)]
    Autofill(#[from] AutofillError),
}

#[derive(Debug)]
pub enum Launch {
    Ignored,
    Finished { report: RunReport, page: SimPage },
}

pub async fn launch(
    trigger: &Trigger,
    page_path: &Path,
    clipboard: Arc<dyn ClipboardPort>,
    notice: Arc<dyn NoticePort>,
    policy: AutofillPolicyView,
) -> Result<Launch, LaunchError> {
    if !trigger.accepts() {
        debug!(?trigger, "trigger ignored");
        return Ok(Launch::Ignored);
    }

    let page = SimPage::load(page_path).map_err(|source| {
        error!(path = %page_path.display(), error = %source, "failed to inject into page");
        LaunchError::Inject {
            path: page_path.display().to_string(),
            source,
        }
    })?;
    info!(?trigger, page = %page_path.display(), "launching autofill");

    let orchestrator = AutofillOrchestratorBuilder::new(policy)
        .with_document(Arc::new(page.clone()))
        .with_clipboard(clipboard)
        .with_notice(notice)
        .build()?;
    let report = orchestrator.run().await?;
    Ok(Launch::Finished { report, page })
}
