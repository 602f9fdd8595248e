//! Cross-platform microphone capture using cpal
//!
//! Emits raw little-endian i16 PCM chunks as the device callback
//! delivers them. The cpal stream is not `Send`, so it lives on a
//! dedicated audio thread; the adapter talks to it through channels.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::application::ports::{
    ActiveCapture, CaptureControl, CaptureError, Chunk, ChunkSource,
};
use crate::domain::recording::AudioMimeType;

/// Microphone chunk source using the default cpal input device
pub struct CpalMicrophone;

impl CpalMicrophone {
    /// Create a new microphone source
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpalMicrophone {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChunkSource for CpalMicrophone {
    async fn open(&self) -> Result<ActiveCapture, CaptureError> {
        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = std::sync::mpsc::channel::<()>();
        let (ready_tx, ready_rx) = oneshot::channel();
        let paused = Arc::new(AtomicBool::new(false));
        let paused_flag = Arc::clone(&paused);

        std::thread::spawn(move || {
            audio_thread(chunk_tx, stop_rx, ready_tx, paused_flag);
        });

        ready_rx
            .await
            .map_err(|_| CaptureError::Failed("audio thread exited before opening".into()))??;

        Ok(ActiveCapture {
            mime_type: AudioMimeType::Pcm,
            chunks: chunk_rx,
            control: Box::new(CpalControl {
                stop: Some(stop_tx),
                paused,
            }),
        })
    }
}

/// Control surface handed to the capture session.
///
/// Pause gates the device callback (suspended capture emits no chunks);
/// stop signals the audio thread to drop the stream, which closes the
/// chunk channel. Release and stop coincide here: dropping the cpal
/// stream is what frees the device.
struct CpalControl {
    stop: Option<std::sync::mpsc::Sender<()>>,
    paused: Arc<AtomicBool>,
}

impl CaptureControl for CpalControl {
    fn pause(&mut self) -> Result<(), CaptureError> {
        if self.stop.is_none() {
            return Err(CaptureError::Interrupted("capture already stopped".into()));
        }
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), CaptureError> {
        if self.stop.is_none() {
            return Err(CaptureError::Interrupted("capture already stopped".into()));
        }
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        // Dropping the sender wakes the audio thread out of its recv
        self.stop = None;
    }

    fn release(&mut self) {
        self.stop = None;
    }
}

fn audio_thread(
    chunks: mpsc::UnboundedSender<Chunk>,
    stop: std::sync::mpsc::Receiver<()>,
    ready: oneshot::Sender<Result<(), CaptureError>>,
    paused: Arc<AtomicBool>,
) {
    let stream = match build_input_stream(chunks, paused) {
        Ok(stream) => stream,
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };

    if let Err(err) = stream.play() {
        let _ = ready.send(Err(CaptureError::Failed(err.to_string())));
        return;
    }

    info!("microphone capture started");
    let _ = ready.send(Ok(()));

    // Block until the control drops its sender; the stream (and with it
    // the device) is released when this frame unwinds.
    let _ = stop.recv();
    debug!("microphone capture stopped");
}

fn build_input_stream(
    chunks: mpsc::UnboundedSender<Chunk>,
    paused: Arc<AtomicBool>,
) -> Result<cpal::Stream, CaptureError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(CaptureError::DeviceUnavailable)?;

    let config = device.default_input_config().map_err(map_config_error)?;
    let sample_format = config.sample_format();
    let config: cpal::StreamConfig = config.into();

    debug!(
        rate = config.sample_rate.0,
        channels = config.channels,
        format = ?sample_format,
        "opening input stream"
    );

    let err_fn = |err| error!("audio stream error: {err}");

    let stream = match sample_format {
        SampleFormat::I16 => device
            .build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if paused.load(Ordering::SeqCst) || data.is_empty() {
                        return;
                    }
                    let bytes: Vec<u8> = data.iter().flat_map(|s| s.to_le_bytes()).collect();
                    let _ = chunks.send(Chunk(bytes));
                },
                err_fn,
                None,
            )
            .map_err(map_build_error)?,

        SampleFormat::F32 => device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if paused.load(Ordering::SeqCst) || data.is_empty() {
                        return;
                    }
                    let bytes: Vec<u8> = data
                        .iter()
                        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
                        .flat_map(|s| s.to_le_bytes())
                        .collect();
                    let _ = chunks.send(Chunk(bytes));
                },
                err_fn,
                None,
            )
            .map_err(map_build_error)?,

        other => {
            return Err(CaptureError::Failed(format!(
                "unsupported sample format: {other}"
            )))
        }
    };

    Ok(stream)
}

fn map_config_error(err: cpal::DefaultStreamConfigError) -> CaptureError {
    match err {
        cpal::DefaultStreamConfigError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        // OS-level capture denial surfaces as a backend error on the
        // hosts cpal supports
        cpal::DefaultStreamConfigError::BackendSpecific { .. } => CaptureError::PermissionDenied,
        other => CaptureError::Failed(other.to_string()),
    }
}

fn map_build_error(err: cpal::BuildStreamError) -> CaptureError {
    match err {
        cpal::BuildStreamError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        other => CaptureError::Failed(other.to_string()),
    }
}
