//! Channel event sink
//!
//! Bridges recorder events into a tokio channel so a host UI loop can
//! consume them at its own pace.

use tokio::sync::mpsc;

use crate::application::ports::{RecorderEvents, RecorderStatus};
use crate::domain::recording::{Elapsed, RecordingId};

/// One UI event, as delivered over the channel
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    StatusChanged(RecorderStatus),
    ElapsedTick(Elapsed),
    RecordingListChanged,
    PlaybackProgress {
        id: RecordingId,
        position_secs: f64,
        duration_secs: f64,
    },
}

/// Event sink that forwards every event into an unbounded channel.
/// A closed receiver drops events silently.
pub struct ChannelEvents {
    tx: mpsc::UnboundedSender<RecorderEvent>,
}

impl ChannelEvents {
    /// Create the sink together with its receiving end
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RecorderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RecorderEvents for ChannelEvents {
    fn status_changed(&self, status: RecorderStatus) {
        let _ = self.tx.send(RecorderEvent::StatusChanged(status));
    }

    fn elapsed_tick(&self, elapsed: Elapsed) {
        let _ = self.tx.send(RecorderEvent::ElapsedTick(elapsed));
    }

    fn recording_list_changed(&self) {
        let _ = self.tx.send(RecorderEvent::RecordingListChanged);
    }

    fn playback_progress(&self, id: &RecordingId, position_secs: f64, duration_secs: f64) {
        let _ = self.tx.send(RecorderEvent::PlaybackProgress {
            id: id.clone(),
            position_secs,
            duration_secs,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recorder::RecorderState;

    #[tokio::test]
    async fn forwards_events_in_order() {
        let (sink, mut rx) = ChannelEvents::new();

        sink.status_changed(RecorderStatus::ok(RecorderState::Recording));
        sink.elapsed_tick(Elapsed::from_secs(1));
        sink.recording_list_changed();

        assert_eq!(
            rx.recv().await,
            Some(RecorderEvent::StatusChanged(RecorderStatus::ok(
                RecorderState::Recording
            )))
        );
        assert_eq!(
            rx.recv().await,
            Some(RecorderEvent::ElapsedTick(Elapsed::from_secs(1)))
        );
        assert_eq!(rx.recv().await, Some(RecorderEvent::RecordingListChanged));
    }

    #[test]
    fn closed_receiver_drops_events() {
        let (sink, rx) = ChannelEvents::new();
        drop(rx);

        // Must not panic
        sink.recording_list_changed();
    }
}
