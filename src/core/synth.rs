use crate::core::envelope::EnvelopeParams;
use crate::core::oscillator::{time_vector, Waveform};
use crate::error::SynthError;

/// One-shot description of a note to synthesize. Built from a key press and
/// the control snapshot, consumed once by [`render_note`].
#[derive(Debug, Clone, Copy)]
pub struct NoteRequest {
    pub frequency: f32,
    pub envelope: EnvelopeParams,
    pub duration: f32,
    pub waveform: Waveform,
}

/// Produce the finished sample buffer for a single note.
///
/// The raw waveform and the envelope are multiplied point-wise. The output
/// is always exactly `round(sample_rate * duration)` samples; if either
/// sequence runs short the remainder is silence, never garbage.
pub fn render_note(request: &NoteRequest, sample_rate: f32) -> Result<Vec<f32>, SynthError> {
    if !request.duration.is_finite() || request.duration <= 0.0 {
        return Err(SynthError::config(format!(
            "note duration must be positive, got {}",
            request.duration
        )));
    }

    let time = time_vector(sample_rate, request.duration);
    let wave = request.waveform.render(request.frequency, &time)?;
    let envelope = request.envelope.render(sample_rate, request.duration)?;

    let total = time.len();
    let audible = wave.len().min(envelope.len()).min(total);
    let mut buffer = vec![0.0f32; total];
    for i in 0..audible {
        buffer[i] = wave[i] * envelope[i];
    }
    Ok(buffer)
}
