use snafu::Snafu;

/// Error taxonomy for the synthesis and playback pipeline.
///
/// All variants surface synchronously to whoever triggered the note; nothing
/// is retried automatically. A failed note simply does not sound.
#[derive(Debug, Snafu)]
pub enum SynthError {
    /// Invalid timing or frequency parameters, rejected before any audio is
    /// produced.
    #[snafu(display("invalid synthesis parameter: {message}"))]
    Config { message: String },

    /// Playback was requested while the trigger queue or the device is
    /// occupied. The note is dropped.
    #[snafu(display("synthesizer is busy, note dropped"))]
    Busy,

    /// The output device is unavailable or failed mid-playback.
    #[snafu(display("audio device error: {message}"))]
    Device { message: String },
}

impl SynthError {
    pub fn config(message: impl Into<String>) -> Self {
        SynthError::Config {
            message: message.into(),
        }
    }

    pub fn device(message: impl Into<String>) -> Self {
        SynthError::Device {
            message: message.into(),
        }
    }
}
