use std::sync::{Arc, RwLock};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use log::{debug, error, info, warn};

use crate::core::control::ControlState;
use crate::core::pitch::note_frequency;
use crate::core::synth::{render_note, NoteRequest};
use crate::core::{DEFAULT_NOTE_SECONDS, SAMPLE_RATE};
use crate::error::SynthError;
use crate::messaging::EngineMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Playing,
}

/// Owns the only handle to the audio output device and serializes access to
/// it: at most one buffer streams to the device at a time.
///
/// `play` blocks its caller until the device has consumed the whole buffer.
/// There is no reentrancy; the audio worker is the engine's single caller,
/// and a `play` arriving while another is in flight is rejected with `Busy`.
pub struct PlaybackEngine {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: SampleFormat,
    state: EngineState,
}

impl PlaybackEngine {
    /// Open the default output device, configured for the fixed sample rate.
    pub fn new() -> Result<Self, SynthError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| SynthError::device("no output device available"))?;

        let default_config = device
            .default_output_config()
            .map_err(|e| SynthError::device(format!("no default output config: {e}")))?;
        let sample_format = default_config.sample_format();
        let mut config = cpal::StreamConfig::from(default_config);
        config.sample_rate = cpal::SampleRate(SAMPLE_RATE);

        info!(
            "output device: {} ({} channels, {:?})",
            device.name().unwrap_or_else(|_| "<unknown>".into()),
            config.channels,
            sample_format
        );

        Ok(PlaybackEngine {
            device,
            config,
            sample_format,
            state: EngineState::Idle,
        })
    }

    /// Stream a mono buffer to the device and block until playback finishes.
    pub fn play(&mut self, buffer: Vec<f32>, sample_rate: u32) -> Result<(), SynthError> {
        if self.state == EngineState::Playing {
            return Err(SynthError::Busy);
        }
        self.state = EngineState::Playing;
        let result = match self.sample_format {
            SampleFormat::F32 => self.play_buffer::<f32>(buffer, sample_rate),
            SampleFormat::I16 => self.play_buffer::<i16>(buffer, sample_rate),
            SampleFormat::U16 => self.play_buffer::<u16>(buffer, sample_rate),
            format => Err(SynthError::device(format!(
                "unsupported sample format {format:?}"
            ))),
        };
        self.state = EngineState::Idle;
        result
    }

    fn play_buffer<T>(&self, samples: Vec<f32>, sample_rate: u32) -> Result<(), SynthError>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let mut config = self.config.clone();
        config.sample_rate = cpal::SampleRate(sample_rate);
        let channels = config.channels as usize;
        let nominal = Duration::from_secs_f64(samples.len() as f64 / sample_rate as f64);

        // The data callback signals once when the buffer runs out; the error
        // callback uses the same channel so a failed stream unblocks the
        // caller immediately instead of waiting for the timeout.
        let (done_tx, done_rx) = bounded::<Result<(), String>>(1);
        let err_tx = done_tx.clone();

        let mut cursor = 0usize;
        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let value = if cursor < samples.len() {
                            samples[cursor]
                        } else {
                            if cursor == samples.len() {
                                let _ = done_tx.try_send(Ok(()));
                            }
                            0.0
                        };
                        cursor += 1;

                        // Fan the mono sample out across all device channels.
                        let value = T::from_sample(value);
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                },
                move |err| {
                    let _ = err_tx.try_send(Err(err.to_string()));
                },
                None,
            )
            .map_err(|e| SynthError::device(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| SynthError::device(format!("failed to start playback: {e}")))?;

        // Margin over the nominal length covers device-side buffering.
        match done_rx.recv_timeout(nominal + Duration::from_secs(2)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(SynthError::device(message)),
            Err(RecvTimeoutError::Timeout) => Err(SynthError::device(
                "device did not report playback completion in time",
            )),
            Err(RecvTimeoutError::Disconnected) => {
                Err(SynthError::device("audio stream ended unexpectedly"))
            }
        }
    }
}

/// Audio worker loop: owns the playback engine and drains the trigger
/// queue, synthesizing and playing one note at a time in FIFO order.
///
/// The loop ends on `Shutdown` or when every sender is gone.
pub fn run_worker(
    triggers: Receiver<EngineMessage>,
    controls: Arc<RwLock<ControlState>>,
) -> Result<(), SynthError> {
    let mut engine = PlaybackEngine::new()?;
    info!("audio worker ready");

    while let Ok(message) = triggers.recv() {
        match message {
            EngineMessage::NoteOn(note_index) => {
                let snapshot = match controls.read() {
                    Ok(guard) => *guard,
                    Err(_) => {
                        error!("control state lock poisoned, stopping worker");
                        return Err(SynthError::device("control state lock poisoned"));
                    }
                };
                if let Err(err) = play_note(&mut engine, note_index, &snapshot) {
                    // A failed note stays silent; nothing is retried.
                    warn!("note {note_index} dropped: {err}");
                }
            }
            EngineMessage::Shutdown => break,
        }
    }

    info!("audio worker stopped");
    Ok(())
}

fn play_note(
    engine: &mut PlaybackEngine,
    note_index: u8,
    controls: &ControlState,
) -> Result<(), SynthError> {
    let request = NoteRequest {
        frequency: note_frequency(note_index as i32, controls.octave),
        envelope: controls.envelope(),
        duration: DEFAULT_NOTE_SECONDS,
        waveform: controls.waveform,
    };
    debug!(
        "note {} -> {:.2} Hz, {:?}",
        note_index, request.frequency, request.waveform
    );

    let buffer = render_note(&request, SAMPLE_RATE as f32)?;
    engine.play(buffer, SAMPLE_RATE)
}
