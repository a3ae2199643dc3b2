use crate::core::envelope::EnvelopeParams;
use crate::core::oscillator::Waveform;

/// Live control-surface values. The input thread mutates this behind a
/// lock; the audio worker copies a snapshot at each note trigger and never
/// holds the lock while synthesizing.
#[derive(Debug, Clone, Copy)]
pub struct ControlState {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub octave: i32,
    pub waveform: Waveform,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.2,
            sustain: 0.7,
            release: 0.3,
            octave: 4,
            waveform: Waveform::Sine,
        }
    }
}

impl ControlState {
    pub fn envelope(&self) -> EnvelopeParams {
        EnvelopeParams {
            attack: self.attack,
            decay: self.decay,
            sustain: self.sustain,
            release: self.release,
        }
    }
}
