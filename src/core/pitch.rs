/// Chromatic scale degree for each trigger key, one octave upward from A.
pub fn key_to_note(key: char) -> Option<u8> {
    match key {
        'a' => Some(0),
        'w' => Some(1),
        's' => Some(2),
        'e' => Some(3),
        'd' => Some(4),
        'f' => Some(5),
        't' => Some(6),
        'g' => Some(7),
        'y' => Some(8),
        'h' => Some(9),
        'u' => Some(10),
        'j' => Some(11),
        _ => None,
    }
}

/// Equal-tempered frequency for a chromatic note index, with A4
/// (index 0, octave 4) as the 440 Hz reference.
///
/// Total for any integer inputs; extreme octaves simply land outside the
/// audible range.
pub fn note_frequency(note_index: i32, octave: i32) -> f32 {
    let semitones = note_index + (octave - 4) * 12;
    440.0 * 2.0f32.powf(semitones as f32 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitch() {
        assert!((note_frequency(0, 4) - 440.0).abs() < 1e-3);
    }

    #[test]
    fn octave_doubles_frequency() {
        assert!((note_frequency(0, 5) - 880.0).abs() < 1e-3);
        assert!((note_frequency(0, 3) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn nine_semitones_above_a4() {
        assert!((note_frequency(9, 4) - 739.99).abs() < 0.5);
    }

    #[test]
    fn extreme_octaves_stay_positive() {
        assert!(note_frequency(0, 0) > 0.0);
        assert!(note_frequency(11, 8) > 0.0);
    }

    #[test]
    fn key_map_covers_one_octave() {
        assert_eq!(key_to_note('a'), Some(0));
        assert_eq!(key_to_note('w'), Some(1));
        assert_eq!(key_to_note('j'), Some(11));
        assert_eq!(key_to_note('z'), None);
        assert_eq!(key_to_note('A'), None);

        let mut notes: Vec<u8> = "awsedftgyhuj".chars().filter_map(key_to_note).collect();
        notes.sort_unstable();
        assert_eq!(notes, (0..12).collect::<Vec<u8>>());
    }
}
