//! Playback controller integration tests
//!
//! A fake audio output stands in for the platform decoder so the
//! exclusivity rule, lazy handle reuse, and reaping of finished handles
//! are all observable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use voicebooth::application::ports::{
    AudioOutput, PlaybackError, PlaybackHandle, RecorderEvents, RecorderStatus,
};
use voicebooth::application::{PlaybackController, PlaybackProgress};
use voicebooth::domain::recording::{AudioMimeType, AudioPayload, Elapsed, RecordingId};

#[derive(Debug, Default)]
struct HandleState {
    playing: bool,
    position_secs: f64,
    duration_secs: Option<f64>,
    finished: bool,
    play_calls: usize,
}

struct FakeHandle {
    state: Arc<StdMutex<HandleState>>,
}

impl PlaybackHandle for FakeHandle {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.state.lock().unwrap();
        state.playing = true;
        state.play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        let mut state = self.state.lock().unwrap();
        let total = state.duration_secs.unwrap_or(0.0);
        state.position_secs = fraction * total;
        Ok(())
    }

    fn position_secs(&self) -> f64 {
        self.state.lock().unwrap().position_secs
    }

    fn duration_secs(&self) -> Option<f64> {
        self.state.lock().unwrap().duration_secs
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }
}

/// Output that hands out fake handles and records every open
#[derive(Clone, Default)]
struct FakeOutput {
    opened: Arc<StdMutex<Vec<Arc<StdMutex<HandleState>>>>>,
    fail_open: Arc<AtomicBool>,
}

impl FakeOutput {
    fn open_count(&self) -> usize {
        self.opened.lock().unwrap().len()
    }

    fn handle_state(&self, n: usize) -> Arc<StdMutex<HandleState>> {
        Arc::clone(&self.opened.lock().unwrap()[n])
    }
}

impl AudioOutput for FakeOutput {
    fn open(&self, _payload: &AudioPayload) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(PlaybackError::DecodeFailed("bad container".into()));
        }
        let state = Arc::new(StdMutex::new(HandleState {
            duration_secs: Some(10.0),
            ..HandleState::default()
        }));
        self.opened.lock().unwrap().push(Arc::clone(&state));
        Ok(Box::new(FakeHandle { state }))
    }
}

#[derive(Default)]
struct ProgressEvents {
    progress: StdMutex<Vec<(RecordingId, f64, f64)>>,
}

impl RecorderEvents for ProgressEvents {
    fn status_changed(&self, _status: RecorderStatus) {}

    fn elapsed_tick(&self, _elapsed: Elapsed) {}

    fn recording_list_changed(&self) {}

    fn playback_progress(&self, id: &RecordingId, position_secs: f64, duration_secs: f64) {
        self.progress
            .lock()
            .unwrap()
            .push((id.clone(), position_secs, duration_secs));
    }
}

fn id(s: &str) -> RecordingId {
    RecordingId::new(s)
}

fn payload() -> AudioPayload {
    AudioPayload::new(vec![0; 16], AudioMimeType::Webm)
}

#[test]
fn play_opens_once_and_reuses_the_handle() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());

    controller.play(&id("a"), &payload()).unwrap();
    assert!(controller.is_playing(&id("a")));
    assert_eq!(output.open_count(), 1);

    controller.pause(&id("a"));
    assert!(controller.active().is_none());

    // Resume goes through the kept handle, not a fresh decode
    controller.play(&id("a"), &payload()).unwrap();
    assert_eq!(output.open_count(), 1);
    assert_eq!(output.handle_state(0).lock().unwrap().play_calls, 2);
}

#[test]
fn at_most_one_recording_plays() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());

    controller.play(&id("a"), &payload()).unwrap();
    controller.play(&id("b"), &payload()).unwrap();

    assert!(controller.is_playing(&id("b")));
    assert!(!controller.is_playing(&id("a")));
    assert!(!output.handle_state(0).lock().unwrap().playing);
    assert!(output.handle_state(1).lock().unwrap().playing);
}

#[test]
fn paused_recording_keeps_its_position() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());

    controller.play(&id("a"), &payload()).unwrap();
    controller.seek(&id("a"), 0.5).unwrap();
    controller.play(&id("b"), &payload()).unwrap();

    // "a" was paused by "b", not reset
    let progress = controller.progress(&id("a")).unwrap();
    assert_eq!(progress.position_secs, 5.0);
}

#[test]
fn toggle_alternates_play_and_pause() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output);

    controller.toggle(&id("a"), &payload()).unwrap();
    assert!(controller.is_playing(&id("a")));

    controller.toggle(&id("a"), &payload()).unwrap();
    assert!(!controller.is_playing(&id("a")));
    assert!(controller.active().is_none());
}

#[test]
fn seek_clamps_the_fraction() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());

    controller.play(&id("a"), &payload()).unwrap();
    controller.seek(&id("a"), 3.0).unwrap();
    assert_eq!(controller.progress(&id("a")).unwrap().position_secs, 10.0);

    controller.seek(&id("a"), -1.0).unwrap();
    assert_eq!(controller.progress(&id("a")).unwrap().position_secs, 0.0);
}

#[test]
fn seek_on_an_unopened_recording_is_a_noop() {
    let mut controller = PlaybackController::new(FakeOutput::default());

    controller.seek(&id("never-played"), 0.5).unwrap();
    assert!(controller.progress(&id("never-played")).is_none());
}

#[test]
fn decode_failure_leaves_nothing_active() {
    let output = FakeOutput::default();
    output.fail_open.store(true, Ordering::SeqCst);
    let mut controller = PlaybackController::new(output.clone());

    assert!(matches!(
        controller.play(&id("a"), &payload()),
        Err(PlaybackError::DecodeFailed(_))
    ));
    assert!(controller.active().is_none());

    // A later retry with a healthy output works
    output.fail_open.store(false, Ordering::SeqCst);
    controller.play(&id("a"), &payload()).unwrap();
    assert!(controller.is_playing(&id("a")));
}

#[test]
fn poll_reports_progress_for_the_active_recording() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());
    let events = ProgressEvents::default();

    controller.play(&id("a"), &payload()).unwrap();
    output.handle_state(0).lock().unwrap().position_secs = 4.0;
    controller.poll(&events);

    let progress = events.progress.lock().unwrap();
    assert_eq!(progress.as_slice(), &[(id("a"), 4.0, 10.0)]);
}

#[test]
fn finished_handles_are_reaped() {
    let output = FakeOutput::default();
    let mut controller = PlaybackController::new(output.clone());
    let events = ProgressEvents::default();

    controller.play(&id("a"), &payload()).unwrap();
    output.handle_state(0).lock().unwrap().finished = true;
    controller.poll(&events);

    assert!(controller.active().is_none());
    assert!(controller.progress(&id("a")).is_none());

    // Replaying after the end decodes a fresh handle from position zero
    controller.play(&id("a"), &payload()).unwrap();
    assert_eq!(output.open_count(), 2);
    assert_eq!(controller.progress(&id("a")).unwrap().position_secs, 0.0);
}

#[test]
fn progress_fraction_handles_unknown_duration() {
    let known = PlaybackProgress {
        position_secs: 2.5,
        duration_secs: Some(10.0),
    };
    assert_eq!(known.fraction(), Some(0.25));

    let unknown = PlaybackProgress {
        position_secs: 2.5,
        duration_secs: None,
    };
    assert_eq!(unknown.fraction(), None);

    let empty = PlaybackProgress {
        position_secs: 0.0,
        duration_secs: Some(0.0),
    };
    assert_eq!(empty.fraction(), None);
}
