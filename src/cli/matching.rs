use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use dom_port::{ControlKind, DocumentPort, NodeId};
use page_sim::SimPage;
use serde::Serialize;
use tool_select_option::{best_match, normalize, MatchKey, MatchTier, SelectConfig};

use crate::cli::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct MatchArgs {
    /// Page fixture holding the choice field
    #[arg(long, value_name = "FILE")]
    pub page: PathBuf,

    /// Id of the choice field
    #[arg(long, value_name = "ID")]
    pub field: String,

    /// Value as it would appear in the clipboard
    pub value: String,

    /// Prefix-only matching
    #[arg(long)]
    pub legacy_select: bool,
}

#[derive(Serialize)]
struct MatchOutput {
    input: String,
    normalized: String,
    candidates: usize,
    matched: Option<MatchedOption>,
}

#[derive(Serialize)]
struct MatchedOption {
    index: usize,
    text: String,
    value: String,
    tier: MatchTier,
    key: MatchKey,
}

/// Dry-run the option matcher against a fixture's choice field. The page is
/// not modified.
pub async fn cmd_match(args: MatchArgs, base: &SelectConfig, output: OutputFormat) -> Result<()> {
    let config = if args.legacy_select {
        SelectConfig::legacy()
    } else {
        base.clone()
    };
    let page = SimPage::load(&args.page)
        .with_context(|| format!("loading page {}", args.page.display()))?;
    let node = NodeId::from(args.field.as_str());

    let controls = page.scan_controls().await?;
    let Some(control) = controls.iter().find(|control| control.id == node) else {
        bail!("no field {} in {}", node, args.page.display());
    };
    if control.kind != ControlKind::Select {
        bail!("field {} is not a choice field", node);
    }

    let options = page.options(&node).await?;
    let matched = best_match(
        &options,
        &args.value,
        config.key_order(),
        config.allow_contains_fallback,
    )
    .and_then(|hit| {
        options.get(hit.index).map(|option| MatchedOption {
            index: hit.index,
            text: option.text.clone(),
            value: option.value.clone(),
            tier: hit.tier,
            key: hit.key,
        })
    });

    let result = MatchOutput {
        normalized: normalize(&args.value),
        input: args.value,
        candidates: options.len(),
        matched,
    };
    if output.emit(&result)? {
        return Ok(());
    }

    match &result.matched {
        Some(hit) => println!(
            "{:?} -> option #{} {:?} (value {:?}) by {:?} match on {:?}",
            result.input, hit.index, hit.text, hit.value, hit.tier, hit.key
        ),
        None => println!(
            "{:?} -> no match among {} option(s)",
            result.input, result.candidates
        ),
    }
    Ok(())
}
