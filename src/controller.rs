use crate::api::{ApiError, Comparison, ComparisonClient, SharedItem};
use crate::app_state::{ComparisonEvent, ComparisonState, InputSlot, MISSING_IDS_MESSAGE};

/// Ids captured when a comparison starts; later input edits do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComparison {
    pub user_id_1: String,
    pub user_id_2: String,
}

/// Drives one comparison session. Failures never escape: they end up in
/// `state().phase` and `state().error_message`.
pub struct ComparisonController {
    client: ComparisonClient,
    state: ComparisonState,
}

impl ComparisonController {
    pub fn new(client: ComparisonClient) -> Self {
        Self {
            client,
            state: ComparisonState::default(),
        }
    }

    pub fn state(&self) -> &ComparisonState {
        &self.state
    }

    pub fn set_input(&mut self, slot: InputSlot, value: impl Into<String>) {
        self.state
            .apply_event(ComparisonEvent::InputChanged(slot, value.into()));
    }

    pub fn set_co_op_only_filter(&mut self, enabled: bool) {
        self.state.apply_event(ComparisonEvent::FilterChanged(enabled));
    }

    pub fn visible_items(&self) -> Vec<&SharedItem> {
        self.state.visible_items()
    }

    /// Validate inputs and enter Loading. Returns the request to issue, or
    /// `None` when nothing should be sent (missing ids, or a comparison is
    /// already in flight).
    pub fn begin_submit(&mut self) -> Option<PendingComparison> {
        if self.state.is_loading() {
            tracing::debug!("Comparison already in flight, ignoring submit");
            return None;
        }

        if self.state.id_input_1.is_empty() || self.state.id_input_2.is_empty() {
            self.state
                .apply_event(ComparisonEvent::Failed(MISSING_IDS_MESSAGE.to_string()));
            return None;
        }

        self.state.apply_event(ComparisonEvent::Started);
        Some(PendingComparison {
            user_id_1: self.state.id_input_1.clone(),
            user_id_2: self.state.id_input_2.clone(),
        })
    }

    /// Leave Loading with the outcome of the request.
    pub fn finish_submit(&mut self, outcome: Result<Comparison, ApiError>) {
        let event = match outcome {
            Ok(comparison) => {
                tracing::info!(
                    shared = comparison.items.len(),
                    "Comparison loaded"
                );
                ComparisonEvent::Loaded(comparison)
            }
            Err(err) => {
                tracing::warn!("Comparison error: {}", err);
                ComparisonEvent::Failed(err.to_string())
            }
        };
        self.state.apply_event(event);
    }

    pub async fn submit(&mut self) {
        let Some(pending) = self.begin_submit() else {
            return;
        };

        tracing::info!(
            user_id_1 = %pending.user_id_1,
            user_id_2 = %pending.user_id_2,
            "Comparing libraries"
        );
        let outcome = self
            .client
            .compare(&pending.user_id_1, &pending.user_id_2)
            .await;
        self.finish_submit(outcome);
    }
}
