use crate::error::SynthError;

/// ADSR parameters for one note, snapshotted from the control surface at
/// trigger time. Times are in seconds, sustain is a gain in [0, 1].
///
/// ```plaintext
/// gain
/// 1 |    /\
///   |   /  \______________
///   |  /                  \
/// 0 | /                    \
///   +-A--D----sustain-----R--> time
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.2,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

impl EnvelopeParams {
    pub fn validate(&self) -> Result<(), SynthError> {
        for (name, value) in [
            ("attack", self.attack),
            ("decay", self.decay),
            ("release", self.release),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SynthError::config(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        if !self.sustain.is_finite() || !(0.0..=1.0).contains(&self.sustain) {
            return Err(SynthError::config(format!(
                "sustain must be in [0, 1], got {}",
                self.sustain
            )));
        }
        Ok(())
    }

    /// Render the amplitude curve for a note of `note_length` seconds.
    ///
    /// The curve is the concatenation of a 0→1 attack ramp, a 1→sustain
    /// decay ramp, the sustain hold, and a sustain→0 release ramp. The hold
    /// is budgeted with whatever the three ramps leave over; when the ramps
    /// alone exceed the note, the hold is empty and the tail is cut at the
    /// note boundary. The result is always exactly
    /// `round(sample_rate * note_length)` samples, zero-filled if the
    /// segments ran short, so downstream code can never read past the end.
    pub fn render(&self, sample_rate: f32, note_length: f32) -> Result<Vec<f32>, SynthError> {
        self.validate()?;
        if !note_length.is_finite() || note_length <= 0.0 {
            return Err(SynthError::config(format!(
                "note length must be positive, got {note_length}"
            )));
        }

        let total = (sample_rate * note_length).round() as usize;
        let attack_len = (sample_rate * self.attack).round() as usize;
        let decay_len = (sample_rate * self.decay).round() as usize;
        let release_len = (sample_rate * self.release).round() as usize;
        let sustain_len = total.saturating_sub(attack_len + decay_len + release_len);

        let mut curve = Vec::with_capacity(total);
        ramp(&mut curve, 0.0, 1.0, attack_len);
        ramp(&mut curve, 1.0, self.sustain, decay_len);
        curve.extend(std::iter::repeat(self.sustain).take(sustain_len));
        ramp(&mut curve, self.sustain, 0.0, release_len);

        curve.truncate(total);
        curve.resize(total, 0.0);
        Ok(curve)
    }
}

/// Append a linear ramp with `len` points, inclusive of both endpoints.
fn ramp(buf: &mut Vec<f32>, from: f32, to: f32, len: usize) {
    match len {
        0 => {}
        1 => buf.push(from),
        _ => {
            let step = (to - from) / (len - 1) as f32;
            buf.extend((0..len).map(|i| from + step * i as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;
    const EPS: f32 = 1e-5;

    #[test]
    fn segment_landmarks() {
        let params = EnvelopeParams {
            attack: 0.1,
            decay: 0.1,
            sustain: 0.7,
            release: 0.2,
        };
        let curve = params.render(SR, 2.0).unwrap();
        assert_eq!(curve.len(), 88200);

        let attack_len = 4410;
        let decay_len = 4410;
        let release_len = 8820;
        let sustain_len = 88200 - attack_len - decay_len - release_len;

        assert_eq!(curve[0], 0.0);
        assert!((curve[attack_len - 1] - 1.0).abs() < EPS, "attack peak");
        assert!(
            (curve[attack_len + decay_len - 1] - 0.7).abs() < EPS,
            "decay landing"
        );
        for &v in &curve[attack_len + decay_len..attack_len + decay_len + sustain_len] {
            assert!((v - 0.7).abs() < EPS, "sustain hold");
        }
        assert!(curve[88200 - 1].abs() < EPS, "release end");
    }

    #[test]
    fn zero_sustain_release_is_flat() {
        let params = EnvelopeParams {
            attack: 0.01,
            decay: 0.01,
            sustain: 0.0,
            release: 0.1,
        };
        let curve = params.render(SR, 1.0).unwrap();
        assert_eq!(curve.len(), 44100);
        // Release ramps from 0 to 0.
        for &v in &curve[curve.len() - 100..] {
            assert!(v.abs() < EPS);
        }
    }

    #[test]
    fn ramps_longer_than_note_still_fit() {
        let params = EnvelopeParams {
            attack: 1.0,
            decay: 1.0,
            sustain: 0.5,
            release: 1.0,
        };
        let curve = params.render(SR, 2.0).unwrap();
        assert_eq!(curve.len(), 88200);
        for &v in &curve {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn all_gains_within_unit_range() {
        let params = EnvelopeParams::default();
        let curve = params.render(SR, 0.5).unwrap();
        assert_eq!(curve.len(), 22050);
        for &v in &curve {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut params = EnvelopeParams::default();
        params.attack = -0.1;
        assert!(params.render(SR, 1.0).is_err());

        let mut params = EnvelopeParams::default();
        params.sustain = 1.5;
        assert!(params.render(SR, 1.0).is_err());

        let params = EnvelopeParams::default();
        assert!(params.render(SR, 0.0).is_err());
        assert!(params.render(SR, -1.0).is_err());
    }
}
