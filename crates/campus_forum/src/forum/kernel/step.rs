use super::types::ForumEvent;
use super::ForumKernel;
use super::super::types::{Action, ActionEnvelope, ActionId, Timestamp};

impl ForumKernel {
    pub fn submit_action(&mut self, action: Action) -> ActionId {
        let id = self.next_action_id;
        self.next_action_id = self.next_action_id.saturating_add(1);
        self.pending_actions.push_back(ActionEnvelope { id, action });
        id
    }

    pub fn pending_actions(&self) -> usize {
        self.pending_actions.len()
    }

    /// Advance the kernel clock, e.g. to model wall-clock gaps between
    /// actions. Time never moves backwards.
    pub fn advance_time(&mut self, delta_ms: Timestamp) {
        if delta_ms > 0 {
            self.time = self.time.saturating_add(delta_ms);
        }
    }

    pub fn step(&mut self) -> Option<ForumEvent> {
        let envelope = self.pending_actions.pop_front()?;
        self.time = self.time.saturating_add(1);
        let kind = self.apply_action(envelope.action);
        let event = ForumEvent {
            id: self.next_event_id,
            time: self.time,
            kind,
        };
        self.next_event_id = self.next_event_id.saturating_add(1);
        self.journal.push(event.clone());
        Some(event)
    }

    pub fn step_until_empty(&mut self) -> Vec<ForumEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step() {
            events.push(event);
        }
        events
    }
}
