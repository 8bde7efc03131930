//! ForumKernel: time, events, and action processing.

mod actions;
mod persistence;
mod replay;
mod social;
mod step;
mod types;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::model::{ForumConfig, ForumModel, Post};
use super::ranking::ranked_posts;
use super::types::{ActionEnvelope, ActionId, ForumEventId, Timestamp};

pub use types::{ForumEvent, ForumEventKind, RejectReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ForumKernel {
    time: Timestamp,
    config: ForumConfig,
    next_event_id: ForumEventId,
    next_action_id: ActionId,
    pending_actions: VecDeque<ActionEnvelope>,
    journal: Vec<ForumEvent>,
    model: ForumModel,
}

impl ForumKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ForumConfig) -> Self {
        let mut kernel = Self::default();
        kernel.config = config.sanitized();
        kernel
    }

    pub fn with_model(config: ForumConfig, model: ForumModel) -> Self {
        Self {
            time: 0,
            config: config.sanitized(),
            next_event_id: 0,
            next_action_id: 0,
            pending_actions: VecDeque::new(),
            journal: Vec::new(),
            model,
        }
    }

    pub fn time(&self) -> Timestamp {
        self.time
    }

    pub fn config(&self) -> &ForumConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ForumConfig) {
        self.config = config.sanitized();
    }

    pub fn model(&self) -> &ForumModel {
        &self.model
    }

    pub fn journal(&self) -> &[ForumEvent] {
        &self.journal
    }

    /// Visible posts in display order at the kernel's current time.
    pub fn ranked_posts(&self, category: Option<&str>) -> Vec<&Post> {
        ranked_posts(&self.model, category, self.time)
    }
}
