use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::WeatherError;

/// Capacity of the lifecycle event channel.
const EVENT_CAPACITY: usize = 16;

/// Lifecycle signals delivered to the embedding host.
#[derive(Debug, Clone)]
pub enum SdkEvent {
    /// The user dismissed the screen.
    Finished,

    /// Fetching failed and the screen dismissed itself.
    FinishedWithError(Arc<WeatherError>),
}

/// Publish side of the lifecycle channel, shared by the SDK and its screens.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SdkEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SdkEvent> {
        self.tx.subscribe()
    }

    /// Publish `event`. Without a subscriber the event is dropped.
    pub fn emit(&self, event: SdkEvent) {
        info!(?event, "emitting lifecycle event");
        if self.tx.send(event).is_err() {
            debug!("no lifecycle subscriber, event dropped");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
