//! Autofill orchestrator implementation

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use dom_port::{ClipboardPort, DocumentPort, FramePort, NodeId, NoticePort, UserNotice};
use render_sync::{IntervalFrames, RenderSync};
use tabfill_core_types::{PortError, RunId};
use tool_select_option::{SelectTool, SelectToolBuilder};
use tool_type_text::{tab_strokes, TypeTextTool, TypeTextToolBuilder};
use tracing::{debug, error, info, instrument, warn};

use crate::discovery::{discover, FieldElement, FieldKind};
use crate::errors::AutofillError;
use crate::policy::AutofillPolicyView;
use crate::traversal::{resolve_current, resolve_next};
use crate::types::{FieldFill, FillOutcome, RunReport, RunState, StopReason};
use crate::values::ValueSequence;

/// Autofill orchestrator trait
#[async_trait]
pub trait AutofillOrchestrator: Send + Sync {
    /// Read the clipboard and fill fields starting at the focused one
    async fn run(&self) -> Result<RunReport, AutofillError>;
}

/// Notice sink that only logs; used when the host shows no dialogs
#[derive(Clone, Debug, Default)]
pub struct LogNotice;

#[async_trait]
impl NoticePort for LogNotice {
    async fn alert(&self, notice: UserNotice) {
        warn!(key = notice.message_key(), "{}", notice.default_text());
    }
}

/// Builder wiring the ports into a [`DefaultAutofillOrchestrator`]
pub struct AutofillOrchestratorBuilder {
    policy: AutofillPolicyView,
    document: Option<Arc<dyn DocumentPort>>,
    clipboard: Option<Arc<dyn ClipboardPort>>,
    notice: Option<Arc<dyn NoticePort>>,
    frames: Option<Arc<dyn FramePort>>,
    type_tool: Option<Arc<dyn TypeTextTool>>,
    select_tool: Option<Arc<dyn SelectTool>>,
}

impl AutofillOrchestratorBuilder {
    pub fn new(policy: AutofillPolicyView) -> Self {
        Self {
            policy,
            document: None,
            clipboard: None,
            notice: None,
            frames: None,
            type_tool: None,
            select_tool: None,
        }
    }

    pub fn with_document(mut self, port: Arc<dyn DocumentPort>) -> Self {
        self.document = Some(port);
        self
    }

    pub fn with_clipboard(mut self, port: Arc<dyn ClipboardPort>) -> Self {
        self.clipboard = Some(port);
        self
    }

    pub fn with_notice(mut self, port: Arc<dyn NoticePort>) -> Self {
        self.notice = Some(port);
        self
    }

    pub fn with_frames(mut self, port: Arc<dyn FramePort>) -> Self {
        self.frames = Some(port);
        self
    }

    pub fn with_type_tool(mut self, tool: Arc<dyn TypeTextTool>) -> Self {
        self.type_tool = Some(tool);
        self
    }

    pub fn with_select_tool(mut self, tool: Arc<dyn SelectTool>) -> Self {
        self.select_tool = Some(tool);
        self
    }

    pub fn build(self) -> Result<DefaultAutofillOrchestrator, AutofillError> {
        let document = self.document.ok_or(AutofillError::MissingPort("document"))?;
        let clipboard = self
            .clipboard
            .ok_or(AutofillError::MissingPort("clipboard"))?;
        let frames = self
            .frames
            .unwrap_or_else(|| Arc::new(IntervalFrames::from_millis(self.policy.frame_ms)));
        let sync = RenderSync::new(frames, self.policy.delay());

        let type_tool = match self.type_tool {
            Some(tool) => tool,
            None => TypeTextToolBuilder::new(self.policy.typing.clone())
                .with_document(Arc::clone(&document))
                .build()?,
        };
        let select_tool = match self.select_tool {
            Some(tool) => tool,
            None => SelectToolBuilder::new()
                .with_document(Arc::clone(&document))
                .with_render_sync(sync.clone())
                .build()?,
        };

        Ok(DefaultAutofillOrchestrator {
            policy: self.policy,
            document,
            clipboard,
            notice: self.notice.unwrap_or_else(|| Arc::new(LogNotice)),
            sync,
            type_tool,
            select_tool,
        })
    }
}

/// Default orchestrator: one value per visited field, in focus order
pub struct DefaultAutofillOrchestrator {
    policy: AutofillPolicyView,
    document: Arc<dyn DocumentPort>,
    clipboard: Arc<dyn ClipboardPort>,
    notice: Arc<dyn NoticePort>,
    sync: RenderSync,
    type_tool: Arc<dyn TypeTextTool>,
    select_tool: Arc<dyn SelectTool>,
}

#[async_trait]
impl AutofillOrchestrator for DefaultAutofillOrchestrator {
    #[instrument(skip_all, fields(run = tracing::field::Empty))]
    async fn run(&self) -> Result<RunReport, AutofillError> {
        let run_id = RunId::new();
        tracing::Span::current().record("run", tracing::field::display(&run_id));
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut state = RunState::Idle;

        let values = match self.preflight().await {
            Ok(values) => values,
            Err(err) => {
                transition(&mut state, RunState::Aborted);
                if let Some(notice) = err.notice() {
                    self.notice.alert(notice).await;
                }
                warn!(error = %err, "autofill aborted before start");
                return Err(err);
            }
        };

        transition(&mut state, RunState::Running);
        let mut fills = Vec::with_capacity(values.len());
        let stop = match self.fill_all(&values, &mut fills).await {
            Ok(stop) => stop,
            Err(source) => {
                transition(&mut state, RunState::Aborted);
                error!(error = %source, filled = fills.len(), "autofill interrupted");
                return Err(AutofillError::Interrupted {
                    filled: fills.len(),
                    source,
                });
            }
        };
        transition(&mut state, RunState::Completed);

        let report = RunReport {
            run_id,
            state,
            stop,
            values_total: values.len(),
            fills,
            started_at,
            latency_ms: clock.elapsed().as_millis() as u64,
        };
        info!(
            stop = ?report.stop,
            filled = report.fills.len(),
            unfilled = report.unfilled(),
            latency_ms = report.latency_ms,
            "autofill completed"
        );
        Ok(report)
    }
}

impl DefaultAutofillOrchestrator {
    /// Checked once, before anything is written
    async fn preflight(&self) -> Result<ValueSequence, AutofillError> {
        let raw = self
            .clipboard
            .read_text()
            .await
            .map_err(|err| AutofillError::ClipboardUnreadable(err.to_string()))?;
        if raw.is_empty() {
            return Err(AutofillError::ClipboardEmpty);
        }
        let values = ValueSequence::parse(&raw);

        let fields = discover(self.document.as_ref()).await?;
        if fields.is_empty() {
            return Err(AutofillError::NoFields);
        }
        let active = self.document.active_element().await?;
        if !active
            .as_ref()
            .is_some_and(|id| fields.iter().any(|field| &field.id == id))
        {
            return Err(AutofillError::NoFocus);
        }

        debug!(values = values.len(), fields = fields.len(), "preflight passed");
        Ok(values)
    }

    async fn fill_all(
        &self,
        values: &ValueSequence,
        fills: &mut Vec<FieldFill>,
    ) -> Result<StopReason, PortError> {
        let doc = self.document.as_ref();
        let last = values.len().saturating_sub(1);

        for (index, value) in values.iter().enumerate() {
            let Some(current) = resolve_current(doc).await? else {
                info!(index, "no eligible field left");
                return Ok(StopReason::NoCurrentTarget);
            };
            info!(
                index,
                node = %current.id,
                kind = current.kind.label(),
                len = value.chars().count(),
                "filling field"
            );

            let outcome = self.fill_one(&current, value).await;
            fills.push(FieldFill {
                index,
                node: current.id.clone(),
                kind: current.kind,
                outcome,
            });

            let Some(next) = resolve_next(doc).await? else {
                if index < last {
                    info!(
                        remaining = last - index,
                        "reached last field; remaining values left unfilled"
                    );
                    return Ok(StopReason::NoNextTarget);
                }
                return Ok(StopReason::ValuesExhausted);
            };

            if index < last {
                self.advance(&current.id, &next).await?;
            }
        }
        Ok(StopReason::ValuesExhausted)
    }

    /// Focus, apply, settle. Failures stay with this field.
    async fn fill_one(&self, field: &FieldElement, value: &str) -> FillOutcome {
        match self.apply(field, value).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(node = %field.id, error = %err, "field update failed; continuing");
                FillOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn apply(&self, field: &FieldElement, value: &str) -> Result<FillOutcome, PortError> {
        self.document.focus(&field.id).await?;
        self.sync.wait_for_render().await;

        let outcome = match field.kind {
            FieldKind::SingleChoice => {
                let report = self
                    .select_tool
                    .select_best_match(&field.id, value, &self.policy.select)
                    .await?;
                FillOutcome::Selected {
                    outcome: report.outcome,
                }
            }
            FieldKind::TextInput | FieldKind::PasswordInput | FieldKind::TextArea => {
                let report = self.type_tool.type_into(&field.id, value).await?;
                FillOutcome::Typed {
                    chars: report.chars_typed,
                }
            }
        };
        self.sync.wait_for_render().await;
        Ok(outcome)
    }

    /// Tab first; focus `next` directly if focus stayed put or the Tab
    /// could not be delivered. Either node may have been detached by page
    /// code in the meantime; that only costs this move, not the run.
    async fn advance(&self, current: &NodeId, next: &FieldElement) -> Result<(), PortError> {
        let mut tab_delivered = true;
        for stroke in tab_strokes() {
            if let Err(err) = self.document.dispatch_key(current, &stroke).await {
                warn!(node = %current, error = %err, "tab dispatch failed; focusing next directly");
                tab_delivered = false;
                break;
            }
        }
        self.sync.wait_for_render().await;
        self.sync.settle(self.sync.delay()).await;

        let after = self.document.active_element().await?;
        if !tab_delivered || after.as_ref() == Some(current) {
            debug!(from = %current, to = %next.id, "tab did not move focus; focusing next");
            if let Err(err) = self.document.focus(&next.id).await {
                warn!(node = %next.id, error = %err, "focusing next field failed; re-resolving");
            }
            self.sync.wait_for_render().await;
            self.sync.settle(self.sync.delay()).await;
        }
        Ok(())
    }
}

fn transition(state: &mut RunState, next: RunState) {
    if !state.can_transition(next) {
        warn!(from = ?state, to = ?next, "unexpected run state transition");
    }
    debug!(from = ?state, to = ?next, "run state");
    *state = next;
}
