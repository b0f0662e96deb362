use std::path::PathBuf;
use std::sync::Arc;

use action_flow::{AutofillPolicyView, FillOutcome, RunReport};
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use dom_port::{ControlKind, DocumentPort};
use page_sim::{SimClipboard, SimPage};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tool_select_option::{SelectConfig, SelectOutcome};
use tracing::warn;

use crate::cli::output::OutputFormat;
use crate::notice::ConsoleNotice;
use crate::trigger::{launch, Launch, LaunchError, Trigger};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TriggerOpt {
    /// Context-menu entry
    Menu,
    /// Keyboard shortcut
    Shortcut,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Page fixture (YAML, or JSON with a .json extension)
    #[arg(long, value_name = "FILE")]
    pub page: PathBuf,

    /// Clipboard contents; read from stdin when omitted
    #[arg(long)]
    pub text: Option<String>,

    /// How the run was invoked
    #[arg(long, value_enum, default_value = "shortcut")]
    pub trigger: TriggerOpt,

    /// Override the menu item id or command name carried by the trigger
    #[arg(long, value_name = "NAME")]
    pub trigger_name: Option<String>,

    /// Settling delay in milliseconds, overriding the configuration
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Prefix-only option matching without verification
    #[arg(long)]
    pub legacy_select: bool,
}

impl RunArgs {
    fn trigger(&self) -> Trigger {
        match (self.trigger, &self.trigger_name) {
            (TriggerOpt::Menu, None) => Trigger::menu(),
            (TriggerOpt::Shortcut, None) => Trigger::shortcut(),
            (TriggerOpt::Menu, Some(name)) => Trigger::ContextMenu {
                item_id: name.clone(),
            },
            (TriggerOpt::Shortcut, Some(name)) => Trigger::Command { name: name.clone() },
        }
    }

    fn policy(&self, base: &AutofillPolicyView) -> AutofillPolicyView {
        let mut policy = base.clone();
        if let Some(delay) = self.delay_ms {
            policy.delay_ms = delay;
        }
        if self.legacy_select {
            policy.select = SelectConfig::legacy();
        }
        policy
    }
}

#[derive(Serialize)]
struct FieldValue {
    id: String,
    value: String,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    report: &'a RunReport,
    fields: Vec<FieldValue>,
}

pub async fn cmd_run(args: RunArgs, base: &AutofillPolicyView, output: OutputFormat) -> Result<()> {
    let clipboard = match &args.text {
        Some(text) => SimClipboard::text(text.clone()),
        None => read_stdin().await,
    };

    let outcome = launch(
        &args.trigger(),
        &args.page,
        Arc::new(clipboard),
        Arc::new(ConsoleNotice),
        args.policy(base),
    )
    .await;

    let (report, page) = match outcome {
        Ok(Launch::Finished { report, page }) => (report, page),
        Ok(Launch::Ignored) => {
            println!("Trigger not bound to autofill; nothing to do");
            return Ok(());
        }
        Err(LaunchError::Inject { path, source }) => {
            bail!("could not attach to {}: {}", path, source)
        }
        Err(LaunchError::Autofill(err)) => bail!("autofill aborted: {}", err),
    };

    let fields = final_values(&page).await?;
    let rendered = RunOutput {
        report: &report,
        fields,
    };
    if output.emit(&rendered)? {
        return Ok(());
    }

    println!(
        "Filled {} of {} value(s) in {} ms ({:?})",
        report.fills.len(),
        report.values_total,
        report.latency_ms,
        report.stop
    );
    for fill in &report.fills {
        println!(
            "  [{}] {} ({}): {}",
            fill.index,
            fill.node,
            fill.kind.label(),
            describe(&fill.outcome)
        );
    }
    println!("Final values:");
    for field in &rendered.fields {
        println!("  {} = {:?}", field.id, field.value);
    }
    Ok(())
}

/// Clipboard stand-in backed by stdin. A read failure surfaces as an
/// unreadable clipboard rather than an empty one.
async fn read_stdin() -> SimClipboard {
    let mut raw = String::new();
    match tokio::io::stdin().read_to_string(&mut raw).await {
        Ok(_) => SimClipboard::text(raw),
        Err(err) => {
            warn!(error = %err, "failed to read clipboard text from stdin");
            SimClipboard::denied(err.to_string())
        }
    }
}

/// Current value of every control, with password contents masked.
async fn final_values(page: &SimPage) -> Result<Vec<FieldValue>> {
    let mut values = Vec::new();
    for control in page.scan_controls().await? {
        let value = page.value(&control.id).await?;
        let value = if control.kind == ControlKind::Password {
            "*".repeat(value.chars().count())
        } else {
            value
        };
        values.push(FieldValue {
            id: control.id.to_string(),
            value,
        });
    }
    Ok(values)
}

fn describe(outcome: &FillOutcome) -> String {
    match outcome {
        FillOutcome::Typed { chars } => format!("typed {chars} char(s)"),
        FillOutcome::Selected { outcome } => match outcome {
            SelectOutcome::Skipped => "skipped (empty value)".to_string(),
            SelectOutcome::NoMatch => "no matching option".to_string(),
            SelectOutcome::Applied {
                value,
                tier,
                key,
                retried,
            } => {
                let retry = if *retried { ", re-applied" } else { "" };
                format!("selected {value:?} ({tier:?} on {key:?}{retry})")
            }
        },
        FillOutcome::Failed { reason } => format!("failed: {reason}"),
    }
}
