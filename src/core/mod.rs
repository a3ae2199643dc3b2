pub mod control;
pub mod envelope;
pub mod oscillator;
pub mod pitch;
pub mod synth;

/// Fixed audio sample rate shared by every component.
pub const SAMPLE_RATE: u32 = 44100;

/// Length of a triggered note unless overridden.
pub const DEFAULT_NOTE_SECONDS: f32 = 2.0;
