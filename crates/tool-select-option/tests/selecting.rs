use std::sync::Arc;
use std::time::Duration;

use dom_port::{ChoiceOption, NodeId, Notification};
use page_sim::{ChangeRule, Effect, FieldFixture, JournalEntry, PageFixture, SimPage};
use render_sync::{IntervalFrames, RenderSync};
use tool_select_option::{
    MatchKey, MatchTier, SelectConfig, SelectOutcome, SelectTool, SelectToolBuilder,
};

fn states() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("Select…", ""),
        ChoiceOption::new("New York", "NY"),
        ChoiceOption::new("New Jersey", "NJ"),
        ChoiceOption::new("Texas", "TX"),
    ]
}

fn page(fields: Vec<FieldFixture>, rules: Vec<ChangeRule>) -> SimPage {
    SimPage::from_fixture(PageFixture {
        fields,
        rules,
        ..PageFixture::default()
    })
    .unwrap()
}

fn tool(page: &SimPage) -> Arc<dyn SelectTool> {
    SelectToolBuilder::new()
        .with_document(Arc::new(page.clone()))
        .with_render_sync(RenderSync::new(
            Arc::new(IntervalFrames::default()),
            Duration::ZERO,
        ))
        .build()
        .unwrap()
}

fn changes(page: &SimPage, id: &str) -> usize {
    page.journal_for(id)
        .iter()
        .filter(|entry| {
            matches!(
                entry,
                JournalEntry::Notify {
                    notification: Notification::Change,
                    ..
                }
            )
        })
        .count()
}

#[tokio::test(start_paused = true)]
async fn applies_value_and_emits_single_change() {
    let page = page(vec![FieldFixture::select("state", states())], Vec::new());

    let report = tool(&page)
        .select_best_match(&NodeId::from("state"), "texas", &SelectConfig::default())
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        SelectOutcome::Applied {
            value: "TX".into(),
            tier: MatchTier::Exact,
            key: MatchKey::Text,
            retried: false,
        }
    );
    assert_eq!(page.value_of("state").as_deref(), Some("TX"));
    assert_eq!(changes(&page, "state"), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_input_is_a_no_op() {
    let page = page(
        vec![FieldFixture::select("state", states()).with_value("NJ")],
        Vec::new(),
    );

    let report = tool(&page)
        .select_best_match(&NodeId::from("state"), "", &SelectConfig::default())
        .await
        .unwrap();

    assert_eq!(report.outcome, SelectOutcome::Skipped);
    assert!(page.journal_for("state").is_empty());
}

#[tokio::test(start_paused = true)]
async fn unmatched_input_keeps_existing_selection() {
    let page = page(
        vec![FieldFixture::select("state", states()).with_value("NJ")],
        Vec::new(),
    );

    let report = tool(&page)
        .select_best_match(&NodeId::from("state"), "Quebec", &SelectConfig::default())
        .await
        .unwrap();

    assert_eq!(report.outcome, SelectOutcome::NoMatch);
    assert_eq!(page.value_of("state").as_deref(), Some("NJ"));
    assert_eq!(changes(&page, "state"), 0);
}

#[tokio::test(start_paused = true)]
async fn overwritten_selection_is_reapplied_once() {
    let page = page(
        vec![FieldFixture::select("state", states())],
        vec![ChangeRule {
            source: "state".into(),
            effect: Effect::Overwrite {
                value: String::new(),
                times: 1,
            },
        }],
    );

    let report = tool(&page)
        .select_best_match(&NodeId::from("state"), "NY", &SelectConfig::default())
        .await
        .unwrap();

    assert!(matches!(
        report.outcome,
        SelectOutcome::Applied { retried: true, .. }
    ));
    assert_eq!(page.value_of("state").as_deref(), Some("NY"));
    assert_eq!(changes(&page, "state"), 2);
}

#[tokio::test(start_paused = true)]
async fn without_verification_the_overwrite_wins() {
    let page = page(
        vec![FieldFixture::select("state", states())],
        vec![ChangeRule {
            source: "state".into(),
            effect: Effect::Overwrite {
                value: String::new(),
                times: 1,
            },
        }],
    );

    tool(&page)
        .select_best_match(&NodeId::from("state"), "NY", &SelectConfig::legacy())
        .await
        .unwrap();

    assert_eq!(page.value_of("state").as_deref(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn waits_for_late_options_when_enabled() {
    let page = page(vec![FieldFixture::select("city", Vec::new())], Vec::new());
    page.schedule_options(
        "city",
        Duration::from_millis(20),
        vec![
            ChoiceOption::new("Sapporo", "01"),
            ChoiceOption::new("Sendai", "04"),
        ],
    );
    let config = SelectConfig {
        wait_options: true,
        ..SelectConfig::default()
    };

    let report = tool(&page)
        .select_best_match(&NodeId::from("city"), "Sendai", &config)
        .await
        .unwrap();

    assert!(matches!(report.outcome, SelectOutcome::Applied { .. }));
    assert_eq!(page.value_of("city").as_deref(), Some("04"));
}

#[tokio::test(start_paused = true)]
async fn without_waiting_late_options_are_missed() {
    let page = page(vec![FieldFixture::select("city", Vec::new())], Vec::new());
    page.schedule_options(
        "city",
        Duration::from_millis(20),
        vec![ChoiceOption::new("Sendai", "04")],
    );

    let report = tool(&page)
        .select_best_match(&NodeId::from("city"), "Sendai", &SelectConfig::default())
        .await
        .unwrap();

    assert_eq!(report.outcome, SelectOutcome::NoMatch);
}

#[tokio::test(start_paused = true)]
async fn legacy_preset_skips_substring_tier() {
    let page = page(vec![FieldFixture::select("state", states())], Vec::new());
    let node = NodeId::from("state");

    let legacy = tool(&page)
        .select_best_match(&node, "Jersey", &SelectConfig::legacy())
        .await
        .unwrap();
    assert_eq!(legacy.outcome, SelectOutcome::NoMatch);

    let full = tool(&page)
        .select_best_match(&node, "Jersey", &SelectConfig::default())
        .await
        .unwrap();
    assert!(matches!(
        full.outcome,
        SelectOutcome::Applied {
            tier: MatchTier::Contains,
            ..
        }
    ));
    assert_eq!(page.value_of("state").as_deref(), Some("NJ"));
}

#[tokio::test(start_paused = true)]
async fn settling_delay_is_honored() {
    let page = page(vec![FieldFixture::select("state", states())], Vec::new());
    let config = SelectConfig {
        delay_ms: Some(100),
        verify_and_retry: false,
        ..SelectConfig::default()
    };
    let started = tokio::time::Instant::now();

    tool(&page)
        .select_best_match(&NodeId::from("state"), "TX", &config)
        .await
        .unwrap();

    // One delay before matching, one after applying.
    assert!(started.elapsed() >= Duration::from_millis(200));
}
