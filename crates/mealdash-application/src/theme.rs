//! Theme appliers provided by the application layer.

use mealdash_core::theme::{ThemeApplier, ThemeMode};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Broadcasts every theme notification to any number of listeners.
///
/// Listeners that fall behind lose the oldest notifications; only the
/// latest mode matters to a renderer.
#[derive(Debug, Clone)]
pub struct ChannelThemeApplier {
    sender: broadcast::Sender<ThemeMode>,
}

impl ChannelThemeApplier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeMode> {
        self.sender.subscribe()
    }
}

impl Default for ChannelThemeApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeApplier for ChannelThemeApplier {
    fn apply(&self, mode: ThemeMode) {
        // No listeners is fine
        let _ = self.sender.send(mode);
    }
}
