use action_flow::{resolve_current, resolve_next, FieldKind};
use dom_port::{ControlKind, NodeId};
use page_sim::{FieldFixture, PageFixture, SimPage};

fn page() -> SimPage {
    SimPage::from_fixture(PageFixture {
        fields: vec![
            FieldFixture::text("a"),
            FieldFixture::new("skip", ControlKind::Button),
            FieldFixture::new("b", ControlKind::Password),
            FieldFixture::text("c"),
        ],
        focus: Some("b".into()),
        ..PageFixture::default()
    })
    .unwrap()
}

fn id(field: Option<action_flow::FieldElement>) -> Option<String> {
    field.map(|f| f.id.as_str().to_string())
}

#[tokio::test]
async fn current_and_next_follow_live_focus() {
    let page = page();

    let current = resolve_current(&page).await.unwrap().unwrap();
    assert_eq!(current.id, NodeId::from("b"));
    assert_eq!(current.kind, FieldKind::PasswordInput);
    assert_eq!(id(resolve_next(&page).await.unwrap()).as_deref(), Some("c"));

    page.set_active(Some("c"));
    assert_eq!(resolve_next(&page).await.unwrap(), None);
}

#[tokio::test]
async fn lost_focus_falls_back_to_first_field() {
    let page = page();
    page.set_active(None);

    assert_eq!(id(resolve_current(&page).await.unwrap()).as_deref(), Some("a"));
    assert_eq!(id(resolve_next(&page).await.unwrap()).as_deref(), Some("a"));

    page.set_active(Some("skip"));
    assert_eq!(id(resolve_current(&page).await.unwrap()).as_deref(), Some("a"));
}

#[tokio::test]
async fn eligibility_is_reevaluated_on_every_call() {
    let page = page();
    page.remove_field("c");
    assert_eq!(resolve_next(&page).await.unwrap(), None);

    page.insert_field(Some("b"), FieldFixture::text("late"));
    assert_eq!(id(resolve_next(&page).await.unwrap()).as_deref(), Some("late"));
}

#[tokio::test]
async fn empty_document_has_no_targets() {
    let page = SimPage::default();
    assert_eq!(resolve_current(&page).await.unwrap(), None);
    assert_eq!(resolve_next(&page).await.unwrap(), None);
}
