use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lasso_types::events::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::coordinator::OverlaySessionCoordinator;
use crate::events::{Pipeline, event_loop};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(256), // OCR snapshot burst capacity
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for everything feeding the interaction loop: capture triggers,
    /// overlay gestures, recognition snapshots.
    pub fn event_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.events.0.clone()
    }

    pub fn spawn_tasks(
        &self,
        pipeline: Pipeline,
        coordinator: OverlaySessionCoordinator,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.events.1.clone(),
            self.cancel_token.child_token(),
            pipeline,
            coordinator,
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
