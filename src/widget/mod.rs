//! The tag input widget: turns key presses and close activations into tag
//! store mutations, describes what to draw as [`RenderOp`]s and keeps the
//! host field in sync.

pub mod entry;
pub mod router;
pub mod surface;

pub use entry::Entry;
pub use router::{EventKind, EventRouter, SubscriptionId};
pub use surface::{Chip, RenderOp, RenderSurface, render_chips};

use crossterm::event::KeyEvent;

use crate::host::{HostBinding, HostError};
use crate::store::{Tag, TagId, TagStore, Visibility};
use crate::utils::ParsedKeyBinding;

/// Zero-argument callback telling the host that the output changed
pub type Notify = Box<dyn FnMut()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed while the entry field has focus
    KeyPress(KeyEvent),
    /// Close control of the chip carrying this id was activated
    CloseActivated(TagId),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::KeyPress(_) => EventKind::EntryKeyPress,
            InputEvent::CloseActivated(_) => EventKind::CloseActivated,
        }
    }
}

/// Result of handling one input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Added { id: TagId, ops: Vec<RenderOp> },
    Removed { tag: Tag, ops: Vec<RenderOp> },
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored)
    }

    /// Render delta produced by the event
    pub fn ops(&self) -> &[RenderOp] {
        match self {
            Outcome::Ignored => &[],
            Outcome::Added { ops, .. } | Outcome::Removed { ops, .. } => ops,
        }
    }

    pub fn into_ops(self) -> Vec<RenderOp> {
        match self {
            Outcome::Ignored => Vec::new(),
            Outcome::Added { ops, .. } | Outcome::Removed { ops, .. } => ops,
        }
    }
}

pub struct TagWidget<H: HostBinding> {
    store: TagStore,
    entry: Entry,
    host: H,
    notify: Notify,
    commit_key: ParsedKeyBinding,
    subscriptions: Vec<SubscriptionId>,
}

impl<H: HostBinding> TagWidget<H> {
    /// Seed the widget from the host's current value
    pub fn new(host: H, notify: Notify, commit_key: ParsedKeyBinding) -> Result<Self, HostError> {
        let initial = host.initial_value()?;
        let store = TagStore::parse(initial.as_deref());
        tracing::info!(tags = store.len(), "tag widget initialized");
        Ok(Self {
            store,
            entry: Entry::new(),
            host,
            notify,
            commit_key,
            subscriptions: Vec::new(),
        })
    }

    /// Subscribe to input events and return the full initial render
    pub fn mount(&mut self, router: &mut EventRouter) -> RenderOp {
        if self.subscriptions.is_empty() {
            self.subscriptions.push(router.subscribe(EventKind::EntryKeyPress));
            self.subscriptions.push(router.subscribe(EventKind::CloseActivated));
        }
        RenderOp::Mount {
            visibility: self.store.visibility(),
            chips: render_chips(&self.store),
        }
    }

    /// Release the subscriptions taken in [`TagWidget::mount`]
    pub fn dispose(&mut self, router: &mut EventRouter) {
        for id in self.subscriptions.drain(..) {
            if !router.unsubscribe(id) {
                tracing::warn!(?id, "subscription was already released");
            }
        }
    }

    /// Handles taken at mount and not yet released
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::KeyPress(key) => self.on_key_press(key),
            InputEvent::CloseActivated(id) => self.on_close(id),
        }
    }

    fn on_key_press(&mut self, key: KeyEvent) -> Outcome {
        if !self.commit_key.matches(&key) || self.entry.is_empty() {
            return Outcome::Ignored;
        }

        let was = self.store.visibility();
        let Some(id) = self.store.add(self.entry.text()) else {
            return Outcome::Ignored;
        };
        tracing::info!(tag = %self.entry.text(), %id, "tag added");
        self.entry.clear();

        let mut ops = Vec::with_capacity(2);
        if was == Visibility::Hidden {
            ops.push(RenderOp::SetVisibility(Visibility::Visible));
        }
        if let Some(tag) = self.store.get(id) {
            ops.push(RenderOp::AppendChip(Chip {
                id,
                text: tag.text.clone(),
            }));
        }
        (self.notify)();
        Outcome::Added { id, ops }
    }

    fn on_close(&mut self, id: TagId) -> Outcome {
        let Some(tag) = self.store.remove(id) else {
            tracing::debug!(%id, "close activated for unknown tag");
            return Outcome::Ignored;
        };
        tracing::info!(tag = %tag.text, %id, "tag removed");

        let mut ops = vec![RenderOp::RemoveChip(id)];
        if self.store.visibility() == Visibility::Hidden {
            ops.push(RenderOp::SetVisibility(Visibility::Hidden));
        }
        (self.notify)();
        Outcome::Removed { tag, ops }
    }

    /// Current serialized value, for the host to pull
    pub fn get_outputs(&self) -> String {
        self.store.serialize()
    }

    /// Push the current serialized value into host storage
    pub fn update_view(&mut self) -> Result<(), HostError> {
        let value = self.get_outputs();
        self.host.write_value(&value)
    }

    pub fn store(&self) -> &TagStore {
        &self.store
    }

    pub fn visibility(&self) -> Visibility {
        self.store.visibility()
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn commit_key(&self) -> &ParsedKeyBinding {
        &self.commit_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryField;
    use crate::utils::parse_key_binding;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::Cell;
    use std::rc::Rc;

    fn widget(initial: Option<&str>) -> (TagWidget<MemoryField>, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let notify: Notify = Box::new(move || counter.set(counter.get() + 1));
        let commit = parse_key_binding("Enter").unwrap();
        let widget = TagWidget::new(MemoryField::new(initial), notify, commit).unwrap();
        (widget, count)
    }

    fn mounted(initial: Option<&str>) -> (TagWidget<MemoryField>, EventRouter, RenderSurface, Rc<Cell<usize>>) {
        let (mut widget, count) = widget(initial);
        let mut router = EventRouter::new();
        let mut surface = RenderSurface::default();
        surface.apply(widget.mount(&mut router));
        (widget, router, surface, count)
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(widget: &mut TagWidget<MemoryField>, text: &str) {
        widget.entry_mut().insert_str(text);
    }

    fn chip_texts(surface: &RenderSurface) -> Vec<&str> {
        surface.chips.iter().map(|c| c.text.as_str()).collect()
    }

    fn id_of(widget: &TagWidget<MemoryField>, index: usize) -> TagId {
        widget.store().iter().nth(index).map(|tag| tag.id).unwrap()
    }

    #[test]
    fn init_without_value_is_hidden_and_empty() {
        let (widget, _router, surface, count) = mounted(None);
        assert!(widget.store().is_empty());
        assert_eq!(widget.visibility(), Visibility::Hidden);
        assert!(surface.chips.is_empty());
        assert!(!surface.container_visible);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn init_with_value_renders_every_tag_in_order() {
        let (widget, _router, surface, _count) = mounted(Some("Alpha, Beta"));
        assert_eq!(widget.store().texts(), vec!["Alpha", "Beta"]);
        assert_eq!(widget.visibility(), Visibility::Visible);
        assert_eq!(chip_texts(&surface), vec!["Alpha", "Beta"]);
        assert!(surface.container_visible);
    }

    #[test]
    fn commit_adds_tag_clears_entry_and_notifies_once() {
        let (mut widget, router, mut surface, count) = mounted(None);
        type_text(&mut widget, "Gamma");

        let outcome = router.dispatch(key(KeyCode::Enter), &mut widget);
        let id = id_of(&widget, 0);
        assert_eq!(
            outcome.ops(),
            &[
                RenderOp::SetVisibility(Visibility::Visible),
                RenderOp::AppendChip(Chip { id, text: "Gamma".to_string() }),
            ]
        );
        surface.apply_all(outcome.into_ops());

        assert_eq!(widget.store().texts(), vec!["Gamma"]);
        assert_eq!(widget.visibility(), Visibility::Visible);
        assert_eq!(count.get(), 1);
        assert!(widget.entry().is_empty());
        assert_eq!(chip_texts(&surface), vec!["Gamma"]);
        assert!(surface.container_visible);
    }

    #[test]
    fn second_add_only_appends() {
        let (mut widget, router, _surface, count) = mounted(Some("Alpha"));
        type_text(&mut widget, "Beta");
        let outcome = router.dispatch(key(KeyCode::Enter), &mut widget);
        assert_eq!(outcome.ops().len(), 1);
        assert!(matches!(outcome.ops()[0], RenderOp::AppendChip(_)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn commit_with_empty_entry_does_nothing() {
        let (mut widget, router, _surface, count) = mounted(None);
        let outcome = router.dispatch(key(KeyCode::Enter), &mut widget);
        assert!(outcome.is_ignored());
        assert!(widget.store().is_empty());
        assert_eq!(widget.visibility(), Visibility::Hidden);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn other_keys_have_no_side_effect() {
        let (mut widget, router, _surface, count) = mounted(None);
        type_text(&mut widget, "Delta");
        for code in [KeyCode::Char('x'), KeyCode::Tab, KeyCode::Esc, KeyCode::Backspace] {
            assert!(router.dispatch(key(code), &mut widget).is_ignored());
        }
        assert_eq!(widget.entry().text(), "Delta");
        assert!(widget.store().is_empty());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn commit_key_is_configurable() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let commit = parse_key_binding("Ctrl+s").unwrap();
        let mut widget = TagWidget::new(
            MemoryField::new(None),
            Box::new(move || counter.set(counter.get() + 1)),
            commit,
        )
        .unwrap();
        type_text(&mut widget, "Echo");

        assert!(widget.handle_event(key(KeyCode::Enter)).is_ignored());
        let ctrl_s = InputEvent::KeyPress(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!widget.handle_event(ctrl_s).is_ignored());
        assert_eq!(widget.store().texts(), vec!["Echo"]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn close_removes_tag_and_keeps_visible() {
        let (mut widget, router, mut surface, count) = mounted(Some("Alpha, Beta"));
        let alpha = id_of(&widget, 0);

        let outcome = router.dispatch(InputEvent::CloseActivated(alpha), &mut widget);
        assert_eq!(outcome.ops(), &[RenderOp::RemoveChip(alpha)]);
        surface.apply_all(outcome.into_ops());

        assert_eq!(widget.store().texts(), vec!["Beta"]);
        assert_eq!(widget.visibility(), Visibility::Visible);
        assert_eq!(chip_texts(&surface), vec!["Beta"]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn closing_last_tag_hides_container() {
        let (mut widget, router, mut surface, count) = mounted(Some("Alpha"));
        let alpha = id_of(&widget, 0);

        let outcome = router.dispatch(InputEvent::CloseActivated(alpha), &mut widget);
        assert_eq!(
            outcome.ops(),
            &[RenderOp::RemoveChip(alpha), RenderOp::SetVisibility(Visibility::Hidden)]
        );
        surface.apply_all(outcome.into_ops());

        assert!(widget.store().is_empty());
        assert_eq!(widget.visibility(), Visibility::Hidden);
        assert!(!surface.container_visible);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn closing_duplicate_removes_the_activated_chip() {
        let (mut widget, router, mut surface, _count) = mounted(Some("Alpha, Beta, Alpha"));
        let first = id_of(&widget, 0);
        let second = id_of(&widget, 2);

        let outcome = router.dispatch(InputEvent::CloseActivated(second), &mut widget);
        match &outcome {
            Outcome::Removed { tag, .. } => assert_eq!(tag.id, second),
            other => panic!("unexpected outcome {:?}", other),
        }
        surface.apply_all(outcome.into_ops());

        assert_eq!(widget.store().texts(), vec!["Alpha", "Beta"]);
        assert_eq!(id_of(&widget, 0), first);
        assert_eq!(surface.position(first), Some(0));
        assert_eq!(surface.position(second), None);
        // The store and the surface agree chip by chip
        assert_eq!(render_chips(widget.store()), surface.chips);
    }

    #[test]
    fn close_for_unknown_id_is_ignored() {
        let (mut widget, router, _surface, count) = mounted(Some("Alpha"));
        let alpha = id_of(&widget, 0);
        router.dispatch(InputEvent::CloseActivated(alpha), &mut widget);

        let again = router.dispatch(InputEvent::CloseActivated(alpha), &mut widget);
        assert!(again.is_ignored());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn outputs_match_what_update_view_writes() {
        let (mut widget, router, _surface, _count) = mounted(Some("Alpha"));
        type_text(&mut widget, "Beta");
        router.dispatch(key(KeyCode::Enter), &mut widget);

        assert_eq!(widget.get_outputs(), "Alpha, Beta");
        widget.update_view().unwrap();
        assert_eq!(widget.host().value.as_deref(), Some("Alpha, Beta"));
        assert_eq!(widget.host().writes, vec![widget.get_outputs()]);
    }

    #[test]
    fn disposed_widget_receives_no_events() {
        let (mut widget, mut router, _surface, count) = mounted(Some("Alpha"));
        assert_eq!(router.len(), 2);
        widget.dispose(&mut router);
        assert!(router.is_empty());
        assert!(!widget.is_mounted());

        type_text(&mut widget, "Beta");
        let alpha = id_of(&widget, 0);
        assert!(router.dispatch(key(KeyCode::Enter), &mut widget).is_ignored());
        assert!(router.dispatch(InputEvent::CloseActivated(alpha), &mut widget).is_ignored());
        assert_eq!(widget.store().texts(), vec!["Alpha"]);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn dispose_leaves_other_subscriptions_alone() {
        let (mut widget, mut router, _surface, count) = mounted(Some("Alpha"));
        let foreign_close = router.subscribe(EventKind::CloseActivated);
        let foreign_key = router.subscribe(EventKind::EntryKeyPress);
        widget.dispose(&mut router);
        assert_eq!(router.len(), 2);

        // Someone else's live subscription must not revive the disposed widget
        let alpha = id_of(&widget, 0);
        assert!(router.dispatch(InputEvent::CloseActivated(alpha), &mut widget).is_ignored());
        type_text(&mut widget, "Beta");
        assert!(router.dispatch(key(KeyCode::Enter), &mut widget).is_ignored());
        assert_eq!(widget.store().texts(), vec!["Alpha"]);
        assert_eq!(count.get(), 0);

        assert!(router.unsubscribe(foreign_close));
        assert!(router.unsubscribe(foreign_key));
    }

    #[test]
    fn router_only_serves_its_own_subscribers() {
        let (mut mounted_widget, router, _surface, _count) = mounted(Some("Alpha"));
        let (mut stranger, stranger_count) = widget(Some("Alpha"));
        let alpha = id_of(&stranger, 0);

        assert!(router.dispatch(InputEvent::CloseActivated(alpha), &mut stranger).is_ignored());
        assert_eq!(stranger.store().len(), 1);
        assert_eq!(stranger_count.get(), 0);

        let alpha = id_of(&mounted_widget, 0);
        assert!(!router.dispatch(InputEvent::CloseActivated(alpha), &mut mounted_widget).is_ignored());
    }

    #[test]
    fn failed_write_keeps_value_for_retry() {
        let (mut widget, router, _surface, _count) = mounted(Some("Alpha"));
        type_text(&mut widget, "Beta");
        router.dispatch(key(KeyCode::Enter), &mut widget);

        widget.host_mut().fail_next_write = true;
        assert!(matches!(widget.update_view(), Err(HostError::WriteError { .. })));
        assert_eq!(widget.host().value.as_deref(), Some("Alpha"));
        assert!(widget.host().writes.is_empty());

        widget.update_view().unwrap();
        assert_eq!(widget.host().value.as_deref(), Some("Alpha, Beta"));
        assert_eq!(widget.host().writes, vec!["Alpha, Beta".to_string()]);
    }

    #[test]
    fn mount_twice_does_not_double_subscribe() {
        let (mut widget, mut router, _surface, _count) = mounted(Some("Alpha"));
        let op = widget.mount(&mut router);
        assert_eq!(router.len(), 2);
        assert!(matches!(op, RenderOp::Mount { ref chips, .. } if chips.len() == 1));
    }

    #[test]
    fn add_then_close_restores_previous_value() {
        let (mut widget, router, _surface, count) = mounted(Some("Alpha, Beta"));
        type_text(&mut widget, "Gamma");
        let added = router.dispatch(key(KeyCode::Enter), &mut widget);
        let Outcome::Added { id, .. } = added else {
            panic!("expected an add");
        };
        router.dispatch(InputEvent::CloseActivated(id), &mut widget);
        assert_eq!(widget.get_outputs(), "Alpha, Beta");
        assert_eq!(count.get(), 2);
    }
}
