use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dom_port::{
    ChoiceOption, ControlKind, ControlSnapshot, DocumentPort, KeyPhase, KeyStroke, NodeId,
    Notification, PortError,
};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::fixture::{ChangeRule, Effect, FieldFixture, PageFixture, SimError};
use crate::journal::JournalEntry;

#[derive(Clone, Debug)]
struct SimNode {
    id: NodeId,
    kind: ControlKind,
    value: String,
    rendered: bool,
    disabled: bool,
    readonly: bool,
    options: Vec<ChoiceOption>,
    options_revision: u64,
}

impl SimNode {
    fn from_fixture(field: FieldFixture) -> Self {
        let value = match (&field.value, field.kind) {
            (Some(value), ControlKind::Select) => {
                if field.options.iter().any(|opt| &opt.value == value) {
                    value.clone()
                } else {
                    first_value(&field.options)
                }
            }
            (Some(value), _) => value.clone(),
            (None, ControlKind::Select) => first_value(&field.options),
            (None, _) => String::new(),
        };
        Self {
            id: field.id,
            kind: field.kind,
            value,
            rendered: !field.hidden,
            disabled: field.disabled,
            readonly: field.readonly,
            options: field.options,
            options_revision: 0,
        }
    }

    fn focusable(&self) -> bool {
        self.rendered && !self.disabled
    }

    /// Browser assignment semantics: a select only takes values it offers.
    fn assign(&mut self, value: &str) {
        if self.kind == ControlKind::Select && !self.options.iter().any(|opt| opt.value == value)
        {
            self.value.clear();
        } else {
            self.value = value.to_string();
        }
    }

    fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            id: self.id.clone(),
            kind: self.kind,
            rendered: self.rendered,
            disabled: self.disabled,
            readonly: self.readonly,
        }
    }
}

fn first_value(options: &[ChoiceOption]) -> String {
    options
        .first()
        .map(|opt| opt.value.clone())
        .unwrap_or_default()
}

#[derive(Clone, Debug)]
struct ActiveRule {
    rule: ChangeRule,
    remaining: u32,
}

#[derive(Debug, Default)]
struct PageState {
    nodes: Vec<SimNode>,
    active: Option<NodeId>,
    tab_moves_focus: bool,
    rules: Vec<ActiveRule>,
    journal: Vec<JournalEntry>,
}

impl PageState {
    fn node(&self, id: &NodeId) -> Result<&SimNode, PortError> {
        self.nodes
            .iter()
            .find(|node| &node.id == id)
            .ok_or_else(|| PortError::stale(id))
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut SimNode, PortError> {
        self.nodes
            .iter_mut()
            .find(|node| &node.id == id)
            .ok_or_else(|| PortError::stale(id))
    }

    fn position(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| &node.id == id)
    }

    fn focus_after(&mut self, id: &NodeId) {
        let next = self.position(id).and_then(|idx| {
            self.nodes[idx + 1..]
                .iter()
                .find(|node| node.focusable())
                .map(|node| node.id.clone())
        });
        if let Some(next) = &next {
            self.journal.push(JournalEntry::Focus(next.clone()));
        }
        self.active = next;
    }

    fn detach(&mut self, id: &NodeId) {
        self.nodes.retain(|node| &node.id != id);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    fn fire_change_rules(&mut self, source: &NodeId) -> Result<(), PortError> {
        let mut effects = Vec::new();
        for active in self.rules.iter_mut() {
            if &active.rule.source != source || active.remaining == 0 {
                continue;
            }
            if let Effect::Overwrite { .. } = active.rule.effect {
                active.remaining -= 1;
            }
            effects.push(active.rule.effect.clone());
        }
        for effect in effects {
            trace!(source = %source, ?effect, "page reaction");
            match effect {
                Effect::Reveal { target } => self.node_mut(&target)?.rendered = true,
                Effect::Hide { target } => self.node_mut(&target)?.rendered = false,
                Effect::Disable { target } => self.node_mut(&target)?.disabled = true,
                Effect::Overwrite { value, .. } => self.node_mut(source)?.assign(&value),
                Effect::Remove { target } => self.detach(&target),
            }
        }
        Ok(())
    }
}

/// Shared handle to one simulated document. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct SimPage {
    state: Arc<Mutex<PageState>>,
}

impl SimPage {
    pub fn from_fixture(fixture: PageFixture) -> Result<Self, SimError> {
        fixture.validate()?;
        Ok(Self::build(fixture))
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        Self::from_fixture(PageFixture::load(path)?)
    }

    /// Text inputs named by `ids`, focus on the first.
    pub fn with_text_fields(ids: &[&str]) -> Self {
        Self::build(PageFixture {
            fields: ids.iter().map(|id| FieldFixture::text(id)).collect(),
            focus: ids.first().map(|id| NodeId::from(*id)),
            ..PageFixture::default()
        })
    }

    fn build(fixture: PageFixture) -> Self {
        let rules = fixture
            .rules
            .into_iter()
            .map(|rule| {
                let remaining = match &rule.effect {
                    Effect::Overwrite { times, .. } => *times,
                    _ => u32::MAX,
                };
                ActiveRule { rule, remaining }
            })
            .collect();
        let state = PageState {
            nodes: fixture
                .fields
                .into_iter()
                .map(SimNode::from_fixture)
                .collect(),
            active: fixture.focus,
            tab_moves_focus: fixture.tab_moves_focus,
            rules,
            journal: Vec::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn value_of(&self, id: &str) -> Option<String> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .find(|node| node.id.as_str() == id)
            .map(|node| node.value.clone())
    }

    /// Current `(id, value)` pairs in document order.
    pub fn values(&self) -> Vec<(NodeId, String)> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .map(|node| (node.id.clone(), node.value.clone()))
            .collect()
    }

    pub fn active(&self) -> Option<NodeId> {
        self.state.lock().active.clone()
    }

    /// Moves focus without journaling, as a user click would before the run.
    pub fn set_active(&self, id: Option<&str>) {
        self.state.lock().active = id.map(NodeId::from);
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        self.state.lock().journal.clone()
    }

    pub fn journal_for(&self, id: &str) -> Vec<JournalEntry> {
        self.state
            .lock()
            .journal
            .iter()
            .filter(|entry| entry.node().as_str() == id)
            .cloned()
            .collect()
    }

    /// Inserts a control right after `after` (or at the end).
    pub fn insert_field(&self, after: Option<&str>, field: FieldFixture) {
        let mut state = self.state.lock();
        let idx = after
            .and_then(|id| state.position(&NodeId::from(id)))
            .map(|idx| idx + 1)
            .unwrap_or(state.nodes.len());
        state.nodes.insert(idx, SimNode::from_fixture(field));
    }

    pub fn remove_field(&self, id: &str) {
        self.state.lock().detach(&NodeId::from(id));
    }

    /// Replaces a select's options, keeping its value when still offered.
    pub fn set_options(&self, id: &str, options: Vec<ChoiceOption>) -> Result<(), PortError> {
        let mut state = self.state.lock();
        let node = state.node_mut(&NodeId::from(id))?;
        node.options = options;
        node.options_revision += 1;
        if !node.options.iter().any(|opt| opt.value == node.value) {
            node.value = first_value(&node.options);
        }
        Ok(())
    }

    pub fn push_options(&self, id: &str, options: Vec<ChoiceOption>) -> Result<(), PortError> {
        let mut merged = {
            let state = self.state.lock();
            state.node(&NodeId::from(id))?.options.clone()
        };
        merged.extend(options);
        self.set_options(id, merged)
    }

    /// Populates options after `after`, the way a page fills a list from a fetch.
    pub fn schedule_options(
        &self,
        id: &str,
        after: Duration,
        options: Vec<ChoiceOption>,
    ) -> JoinHandle<()> {
        let page = self.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Err(err) = page.push_options(&id, options) {
                trace!(error = %err, "scheduled options dropped");
            }
        })
    }
}

#[async_trait]
impl DocumentPort for SimPage {
    async fn scan_controls(&self) -> Result<Vec<ControlSnapshot>, PortError> {
        let state = self.state.lock();
        Ok(state.nodes.iter().map(SimNode::snapshot).collect())
    }

    async fn active_element(&self) -> Result<Option<NodeId>, PortError> {
        Ok(self.state.lock().active.clone())
    }

    async fn focus(&self, node: &NodeId) -> Result<(), PortError> {
        let mut state = self.state.lock();
        // Hidden and disabled controls silently refuse focus.
        if !state.node(node)?.focusable() {
            return Ok(());
        }
        state.active = Some(node.clone());
        state.journal.push(JournalEntry::Focus(node.clone()));
        Ok(())
    }

    async fn value(&self, node: &NodeId) -> Result<String, PortError> {
        Ok(self.state.lock().node(node)?.value.clone())
    }

    async fn set_value(&self, node: &NodeId, value: &str) -> Result<(), PortError> {
        let mut state = self.state.lock();
        state.node_mut(node)?.assign(value);
        state.journal.push(JournalEntry::SetValue {
            node: node.clone(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn dispatch_key(&self, node: &NodeId, stroke: &KeyStroke) -> Result<(), PortError> {
        let mut state = self.state.lock();
        state.node(node)?;
        state.journal.push(JournalEntry::Key {
            node: node.clone(),
            stroke: stroke.clone(),
        });
        if state.tab_moves_focus
            && stroke.key == "Tab"
            && stroke.phase == KeyPhase::Down
            && state.active.as_ref() == Some(node)
        {
            state.focus_after(node);
        }
        Ok(())
    }

    async fn notify(&self, node: &NodeId, notification: Notification) -> Result<(), PortError> {
        let mut state = self.state.lock();
        state.node(node)?;
        state.journal.push(JournalEntry::Notify {
            node: node.clone(),
            notification,
        });
        if notification == Notification::Change {
            state.fire_change_rules(node)?;
        }
        Ok(())
    }

    async fn options(&self, node: &NodeId) -> Result<Vec<ChoiceOption>, PortError> {
        Ok(self.state.lock().node(node)?.options.clone())
    }

    async fn options_revision(&self, node: &NodeId) -> Result<u64, PortError> {
        Ok(self.state.lock().node(node)?.options_revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption::new("New York", "NY"),
            ChoiceOption::new("Ohio", "OH"),
        ]
    }

    #[tokio::test]
    async fn select_rejects_unknown_values() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![FieldFixture::select("state", states())],
            ..PageFixture::default()
        })
        .unwrap();
        let id = NodeId::from("state");
        assert_eq!(page.value_of("state").as_deref(), Some("NY"));
        page.set_value(&id, "OH").await.unwrap();
        assert_eq!(page.value_of("state").as_deref(), Some("OH"));
        page.set_value(&id, "TX").await.unwrap();
        assert_eq!(page.value_of("state").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn focus_ignores_hidden_and_disabled_controls() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![
                FieldFixture::text("a"),
                FieldFixture::text("b").hidden(),
                FieldFixture::text("c").disabled(),
            ],
            focus: Some("a".into()),
            ..PageFixture::default()
        })
        .unwrap();
        page.focus(&NodeId::from("b")).await.unwrap();
        page.focus(&NodeId::from("c")).await.unwrap();
        assert_eq!(page.active(), Some(NodeId::from("a")));
    }

    #[tokio::test]
    async fn change_rules_reveal_and_overwrite() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![
                FieldFixture::select("state", states()),
                FieldFixture::text("zip").hidden(),
            ],
            rules: vec![
                ChangeRule {
                    source: "state".into(),
                    effect: Effect::Reveal {
                        target: "zip".into(),
                    },
                },
                ChangeRule {
                    source: "state".into(),
                    effect: Effect::Overwrite {
                        value: "NY".into(),
                        times: 1,
                    },
                },
            ],
            ..PageFixture::default()
        })
        .unwrap();
        let state = NodeId::from("state");

        page.set_value(&state, "OH").await.unwrap();
        page.notify(&state, Notification::Change).await.unwrap();
        assert_eq!(page.value_of("state").as_deref(), Some("NY"));
        let controls = page.scan_controls().await.unwrap();
        assert!(controls[1].rendered);

        page.set_value(&state, "OH").await.unwrap();
        page.notify(&state, Notification::Change).await.unwrap();
        assert_eq!(page.value_of("state").as_deref(), Some("OH"));
    }

    #[tokio::test]
    async fn remove_rule_detaches_and_clears_focus() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![FieldFixture::text("a"), FieldFixture::text("b")],
            rules: vec![ChangeRule {
                source: "a".into(),
                effect: Effect::Remove { target: "a".into() },
            }],
            focus: Some("a".into()),
            ..PageFixture::default()
        })
        .unwrap();
        let a = NodeId::from("a");

        page.notify(&a, Notification::Change).await.unwrap();

        assert_eq!(page.active(), None);
        assert!(page.value(&a).await.is_err());
        let controls = page.scan_controls().await.unwrap();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].id, NodeId::from("b"));
    }

    #[tokio::test]
    async fn tab_moves_focus_when_enabled() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![
                FieldFixture::text("a"),
                FieldFixture::text("b").hidden(),
                FieldFixture::text("c"),
            ],
            focus: Some("a".into()),
            tab_moves_focus: true,
            ..PageFixture::default()
        })
        .unwrap();
        let tab = KeyStroke {
            phase: KeyPhase::Down,
            key: "Tab".into(),
            code: "Tab".into(),
            key_code: 9,
            which: 9,
        };
        page.dispatch_key(&NodeId::from("a"), &tab).await.unwrap();
        assert_eq!(page.active(), Some(NodeId::from("c")));
        page.dispatch_key(&NodeId::from("c"), &tab).await.unwrap();
        assert_eq!(page.active(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_options_bump_revision() {
        let page = SimPage::from_fixture(PageFixture {
            fields: vec![FieldFixture::select("city", Vec::new())],
            ..PageFixture::default()
        })
        .unwrap();
        let id = NodeId::from("city");
        let handle = page.schedule_options(
            "city",
            Duration::from_millis(40),
            vec![ChoiceOption::new("Osaka", "osa")],
        );
        assert_eq!(page.options_revision(&id).await.unwrap(), 0);
        handle.await.unwrap();
        assert_eq!(page.options_revision(&id).await.unwrap(), 1);
        assert_eq!(page.value_of("city").as_deref(), Some("osa"));
    }
}
