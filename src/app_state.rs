use crate::api::{Comparison, SharedItem, UserProfile};

pub const MISSING_IDS_MESSAGE: &str = "Please enter both Steam IDs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Error,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSlot {
    First,
    Second,
}

#[derive(Debug, Clone)]
pub enum ComparisonEvent {
    InputChanged(InputSlot, String),
    FilterChanged(bool),
    Started,
    Loaded(Comparison),
    Failed(String),
}

/// Everything the comparison screen shows. Filtered items are derived on read.
#[derive(Debug, Clone, Default)]
pub struct ComparisonState {
    pub id_input_1: String,
    pub id_input_2: String,
    pub phase: Phase,
    pub error_message: String,
    pub profiles: Vec<UserProfile>,
    pub items: Vec<SharedItem>,
    pub co_op_only_filter: bool,
}

impl ComparisonState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    // Earlier results survive Loading and Error; only a new success replaces them.
    pub fn apply_event(&mut self, event: ComparisonEvent) {
        match event {
            ComparisonEvent::InputChanged(InputSlot::First, value) => self.id_input_1 = value,
            ComparisonEvent::InputChanged(InputSlot::Second, value) => self.id_input_2 = value,
            ComparisonEvent::FilterChanged(enabled) => self.co_op_only_filter = enabled,
            ComparisonEvent::Started => {
                self.phase = Phase::Loading;
                self.error_message.clear();
            }
            ComparisonEvent::Loaded(comparison) => {
                self.profiles = comparison.profiles.into();
                self.items = comparison.items;
                self.error_message.clear();
                self.phase = Phase::Ready;
            }
            ComparisonEvent::Failed(message) => {
                self.error_message = message;
                self.phase = Phase::Error;
            }
        }
    }

    /// Items to display under the current filter, in their original order.
    pub fn visible_items(&self) -> Vec<&SharedItem> {
        filter_items(&self.items, self.co_op_only_filter)
    }
}

pub fn filter_items(items: &[SharedItem], co_op_only: bool) -> Vec<&SharedItem> {
    items
        .iter()
        .filter(|item| !co_op_only || item.is_playable_together())
        .collect()
}
