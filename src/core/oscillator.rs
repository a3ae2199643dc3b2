use std::f32::consts::PI;

use crate::error::SynthError;

/// The closed set of waveforms the synthesizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Sample the waveform at time `t` seconds for the given frequency.
    fn sample(&self, frequency: f32, t: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * PI * frequency * t).sin(),
            Waveform::Sawtooth => {
                // Bipolar saw: -1 at the start of each period, rising to +1.
                let phase = (frequency * t).fract();
                2.0 * phase - 1.0
            }
            Waveform::Square => {
                let phase = (frequency * t).fract();
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }

    /// Render one raw sample per time point, amplitudes in [-1, 1].
    pub fn render(&self, frequency: f32, time: &[f32]) -> Result<Vec<f32>, SynthError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SynthError::config(format!(
                "frequency must be positive, got {frequency}"
            )));
        }
        Ok(time.iter().map(|&t| self.sample(frequency, t)).collect())
    }
}

/// Uniformly spaced time points spanning [0, duration), one per sample.
pub fn time_vector(sample_rate: f32, duration: f32) -> Vec<f32> {
    let len = (sample_rate * duration).round() as usize;
    (0..len).map(|i| i as f32 / sample_rate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: Waveform) -> Vec<f32> {
        let time = time_vector(44100.0, 1.0);
        kind.render(440.0, &time).unwrap()
    }

    #[test]
    fn time_vector_spans_duration() {
        let time = time_vector(44100.0, 2.0);
        assert_eq!(time.len(), 88200);
        assert_eq!(time[0], 0.0);
        assert!(time[88199] < 2.0);
        // Uniform spacing of one sample period.
        let dt = time[1] - time[0];
        assert!((dt - 1.0 / 44100.0).abs() < 1e-9);
    }

    #[test]
    fn sine_is_bounded_and_starts_at_zero() {
        let samples = render(Waveform::Sine);
        assert_eq!(samples[0], 0.0);
        for (i, &s) in samples.iter().enumerate() {
            assert!((-1.0..=1.0).contains(&s), "sample {i} out of range: {s}");
        }
    }

    #[test]
    fn sawtooth_is_bounded_and_starts_at_floor() {
        let samples = render(Waveform::Sawtooth);
        assert_eq!(samples[0], -1.0);
        for (i, &s) in samples.iter().enumerate() {
            assert!((-1.0..=1.0).contains(&s), "sample {i} out of range: {s}");
        }
    }

    #[test]
    fn square_is_bipolar() {
        let samples = render(Waveform::Square);
        assert_eq!(samples[0], 1.0);
        for (i, &s) in samples.iter().enumerate() {
            assert!(s == 1.0 || s == -1.0, "sample {i} not bipolar: {s}");
        }
        // Both half-periods are present.
        assert!(samples.iter().any(|&s| s == -1.0));
    }

    #[test]
    fn rejects_non_positive_frequency() {
        let time = time_vector(44100.0, 0.1);
        assert!(Waveform::Sine.render(0.0, &time).is_err());
        assert!(Waveform::Square.render(-440.0, &time).is_err());
        assert!(Waveform::Sawtooth.render(f32::NAN, &time).is_err());
    }
}
