//! Musical scales as fixed interval tables over the twelve-tone circle.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

use crate::note::PitchClass;

/// A named scale, i.e. an immutable subset of the twelve chromatic pitch
/// classes rooted at C. Raw byte-derived pitches are quantized to the
/// nearest member before emission.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scale {
    Chromatic,
    Major,
    Minor,
    Pentatonic,
    Blues,
    Dorian,
    Phrygian,
}

impl Scale {
    /// The semitone offsets from the root that are part of this scale.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
        }
    }

    /// Whether the given pitch class is a member of this scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use binarysymphony::note::PitchClass;
    /// use binarysymphony::scale::Scale;
    ///
    /// assert!(Scale::Major.contains(PitchClass::E));
    /// assert!(!Scale::Major.contains(PitchClass::DSharp));
    /// ```
    pub fn contains(self, pitch_class: PitchClass) -> bool {
        self.intervals().contains(&pitch_class.index())
    }

    /// Snap a raw chromatic pitch class to the nearest member of this
    /// scale, measured in semitones on the twelve-tone circle.
    ///
    /// When two members are equally close, the lower one wins: the
    /// search probes the downward candidate before the upward one at
    /// each distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use binarysymphony::note::PitchClass;
    /// use binarysymphony::scale::Scale;
    ///
    /// // C# sits between C and D in the major scale; ties go down.
    /// assert_eq!(Scale::Major.quantize(PitchClass::CSharp), PitchClass::C);
    /// // B wraps up to C in the pentatonic scale (distance 1 beats
    /// // the downward distance 2 to A).
    /// assert_eq!(Scale::Pentatonic.quantize(PitchClass::B), PitchClass::C);
    /// ```
    pub fn quantize(self, raw: PitchClass) -> PitchClass {
        let index = i32::from(raw.index());
        for distance in 0..=6 {
            let down = (index - distance).rem_euclid(12) as u8;
            if self.intervals().contains(&down) {
                return PitchClass::from_index(down);
            }
            let up = (index + distance).rem_euclid(12) as u8;
            if self.intervals().contains(&up) {
                return PitchClass::from_index(up);
            }
        }
        // every scale contains its root, so the search always terminates
        raw
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Chromatic => "chromatic",
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseScaleError {
    #[snafu(display(
        "unknown scale `{}` (expected chromatic, major, minor, pentatonic, blues, dorian or phrygian)",
        name
    ))]
    UnknownScale { name: String },
}

impl FromStr for Scale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromatic" => Ok(Scale::Chromatic),
            "major" => Ok(Scale::Major),
            "minor" => Ok(Scale::Minor),
            "pentatonic" => Ok(Scale::Pentatonic),
            "blues" => Ok(Scale::Blues),
            "dorian" => Ok(Scale::Dorian),
            "phrygian" => Ok(Scale::Phrygian),
            _ => UnknownScale { name: s }.fail(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL_SCALES: [Scale; 7] = [
        Scale::Chromatic,
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Dorian,
        Scale::Phrygian,
    ];

    #[test]
    fn every_scale_contains_its_root() {
        for scale in &ALL_SCALES {
            assert!(scale.contains(PitchClass::C), "{} misses its root", scale);
        }
    }

    #[test]
    fn members_quantize_to_themselves() {
        for scale in &ALL_SCALES {
            for &interval in scale.intervals() {
                let member = PitchClass::from_index(interval);
                assert_eq!(scale.quantize(member), member);
            }
        }
    }

    #[test]
    fn quantized_classes_are_members() {
        for scale in &ALL_SCALES {
            for index in 0..12 {
                let quantized = scale.quantize(PitchClass::from_index(index));
                assert!(scale.contains(quantized));
            }
        }
    }

    #[test]
    fn chromatic_quantization_is_identity() {
        for index in 0..12 {
            let raw = PitchClass::from_index(index);
            assert_eq!(Scale::Chromatic.quantize(raw), raw);
        }
    }

    #[test]
    fn ties_prefer_the_lower_degree() {
        // D# is one semitone from both D and E of the major scale.
        assert_eq!(Scale::Major.quantize(PitchClass::DSharp), PitchClass::D);
        // F# sits between F and G.
        assert_eq!(Scale::Major.quantize(PitchClass::FSharp), PitchClass::F);
        // A# sits between A and B.
        assert_eq!(Scale::Major.quantize(PitchClass::ASharp), PitchClass::A);
    }

    #[test]
    fn quantization_wraps_around_the_octave() {
        // The pentatonic scale ends at A; B is closer to the C above
        // than to the A below.
        assert_eq!(Scale::Pentatonic.quantize(PitchClass::B), PitchClass::C);
        // In the blues scale, B rounds down to A#.
        assert_eq!(Scale::Blues.quantize(PitchClass::B), PitchClass::ASharp);
    }

    #[test]
    fn parsing_scale_names() {
        assert_eq!("pentatonic".parse(), Ok(Scale::Pentatonic));
        assert_eq!("dorian".parse(), Ok(Scale::Dorian));
        assert!("lydian".parse::<Scale>().is_err());
    }
}
