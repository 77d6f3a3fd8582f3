use std::collections::BTreeMap;

use crate::host::HostBinding;
use crate::widget::{InputEvent, Outcome, TagWidget};

/// Handle returned by [`EventRouter::subscribe`], needed to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    EntryKeyPress,
    CloseActivated,
}

/// Host-side table of input subscriptions
#[derive(Debug, Default)]
pub struct EventRouter {
    next_id: u64,
    subscriptions: BTreeMap<SubscriptionId, EventKind>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, kind);
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.values().any(|k| *k == kind)
    }

    /// True when `id` is still registered for `kind`
    pub fn is_live(&self, id: SubscriptionId, kind: EventKind) -> bool {
        self.subscriptions.get(&id) == Some(&kind)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Deliver `event` to the widget if one of the widget's own handles is
    /// live for the event's kind
    pub fn dispatch<H: HostBinding>(&self, event: InputEvent, widget: &mut TagWidget<H>) -> Outcome {
        let kind = event.kind();
        if !widget.subscriptions().iter().any(|id| self.is_live(*id, kind)) {
            tracing::trace!(?event, "widget not subscribed, event dropped");
            return Outcome::Ignored;
        }
        widget.handle_event(event)
    }
}
