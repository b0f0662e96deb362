use std::sync::Arc;

use dom_port::{KeyPhase, NodeId, Notification};
use page_sim::{FieldFixture, JournalEntry, PageFixture, SimPage};
use tool_type_text::{TypePolicyView, TypeTextToolBuilder};

fn tool(page: &SimPage) -> Arc<dyn tool_type_text::TypeTextTool> {
    TypeTextToolBuilder::new(TypePolicyView::default())
        .with_document(Arc::new(page.clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn replaces_existing_value() {
    let page = SimPage::from_fixture(PageFixture {
        fields: vec![FieldFixture::text("name").with_value("stale")],
        ..PageFixture::default()
    })
    .unwrap();

    let report = tool(&page)
        .type_into(&NodeId::from("name"), "Alice")
        .await
        .unwrap();

    assert_eq!(page.value_of("name").as_deref(), Some("Alice"));
    assert_eq!(report.chars_typed, 5);
    assert_eq!(report.final_len, 5);
}

#[tokio::test]
async fn empty_text_leaves_field_cleared() {
    let page = SimPage::from_fixture(PageFixture {
        fields: vec![FieldFixture::text("name").with_value("stale")],
        ..PageFixture::default()
    })
    .unwrap();

    tool(&page)
        .type_into(&NodeId::from("name"), "")
        .await
        .unwrap();

    assert_eq!(page.value_of("name").as_deref(), Some(""));
    let journal = page.journal_for("name");
    assert_eq!(
        journal.last(),
        Some(&JournalEntry::Notify {
            node: NodeId::from("name"),
            notification: Notification::Change,
        })
    );
    assert!(!journal.iter().any(|e| matches!(e, JournalEntry::Key { .. })));
}

#[tokio::test]
async fn each_char_emits_keys_input_in_order() {
    let page = SimPage::with_text_fields(&["code"]);

    tool(&page)
        .type_into(&NodeId::from("code"), "a1")
        .await
        .unwrap();

    let labels: Vec<String> = page
        .journal_for("code")
        .into_iter()
        .map(|entry| match entry {
            JournalEntry::Key { stroke, .. } => format!("{}:{}", stroke.phase.event_type(), stroke.key),
            JournalEntry::SetValue { value, .. } => format!("value:{value}"),
            JournalEntry::Notify { notification, .. } => notification.event_type().to_string(),
            JournalEntry::Focus(_) => "focus".to_string(),
        })
        .collect();

    assert_eq!(
        labels,
        vec![
            "value:",
            "keydown:a",
            "keypress:a",
            "value:a",
            "input",
            "keyup:a",
            "keydown:1",
            "keypress:1",
            "value:a1",
            "input",
            "keyup:1",
            "change",
        ]
    );
}

#[tokio::test]
async fn key_codes_are_reported() {
    let page = SimPage::with_text_fields(&["code"]);
    tool(&page)
        .type_into(&NodeId::from("code"), "Z9")
        .await
        .unwrap();

    let strokes: Vec<_> = page
        .journal_for("code")
        .into_iter()
        .filter_map(|entry| match entry {
            JournalEntry::Key { stroke, .. } if stroke.phase == KeyPhase::Down => Some(stroke),
            _ => None,
        })
        .collect();
    assert_eq!(strokes[0].code, "KeyZ");
    assert_eq!(strokes[0].key_code, 90);
    assert_eq!(strokes[1].code, "");
    assert_eq!(strokes[1].key_code, 57);
}

#[tokio::test]
async fn multibyte_text_round_trips() {
    let page = SimPage::with_text_fields(&["memo"]);
    tool(&page)
        .type_into(&NodeId::from("memo"), "東京 café")
        .await
        .unwrap();
    assert_eq!(page.value_of("memo").as_deref(), Some("東京 café"));
}

#[tokio::test]
async fn oversized_text_is_rejected_before_clearing() {
    let page = SimPage::from_fixture(PageFixture {
        fields: vec![FieldFixture::text("name").with_value("keep")],
        ..PageFixture::default()
    })
    .unwrap();
    let tool = TypeTextToolBuilder::new(TypePolicyView {
        enabled: true,
        max_text_len: Some(3),
    })
    .with_document(Arc::new(page.clone()))
    .build()
    .unwrap();

    let err = tool
        .type_into(&NodeId::from("name"), "toolong")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("max length"));
    assert_eq!(page.value_of("name").as_deref(), Some("keep"));
}

#[tokio::test]
async fn long_text_is_typed_in_full_by_default() {
    let page = SimPage::with_text_fields(&["essay"]);
    let text = "x".repeat(10_001);

    let report = tool(&page)
        .type_into(&NodeId::from("essay"), &text)
        .await
        .unwrap();

    assert_eq!(report.chars_typed, 10_001);
    assert_eq!(report.final_len, 10_001);
    assert_eq!(page.value_of("essay").as_deref(), Some(text.as_str()));
}

#[test]
fn builder_requires_document() {
    assert!(TypeTextToolBuilder::new(TypePolicyView::default())
        .build()
        .is_err());
}
