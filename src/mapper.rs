// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mapping raw bytes onto musical note events.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

use crate::note::{NoteEvent, PitchClass};
use crate::scale::Scale;

/// Duration of every note in melody mode, in seconds.
const MELODY_DURATION: f64 = 0.5;

/// Duration of every note in spectrum mode. Short on purpose: the
/// output is meant for frequency analysis, not for listening.
const SPECTRUM_DURATION: f64 = 0.1;

/// Duration bounds for rhythm mode. Byte 0 maps to the minimum,
/// byte 255 to the maximum, linearly in between.
const RHYTHM_MIN_DURATION: f64 = 0.25;
const RHYTHM_MAX_DURATION: f64 = 1.0;

/// Lowest octave emitted by the octave banding function.
const BASE_OCTAVE: i32 = 4;

/// Number of octaves the byte-value bands cycle through.
const OCTAVE_SPAN: u8 = 4;

/// How a byte value is turned into a note duration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Every note has the same duration.
    Melody,
    /// Note duration scales with the byte value.
    Rhythm,
    /// Uniformly short notes, densely packed for spectral views.
    Spectrum,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Melody => "melody",
            Mode::Rhythm => "rhythm",
            Mode::Spectrum => "spectrum",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseModeError {
    #[snafu(display("unknown mode `{}` (expected melody, rhythm or spectrum)", name))]
    UnknownMode { name: String },
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "melody" => Ok(Mode::Melody),
            "rhythm" => Ok(Mode::Rhythm),
            "spectrum" => Ok(Mode::Spectrum),
            _ => UnknownMode { name: s }.fail(),
        }
    }
}

/// Maps a byte sequence onto an equally long sequence of note events.
///
/// The mapper is a pure value: it holds only its configuration and can
/// be shared or rebuilt freely. Mapping the same bytes with the same
/// configuration always yields the same events.
///
/// # Examples
///
/// ```
/// use binarysymphony::mapper::{Mapper, Mode};
/// use binarysymphony::note::PitchClass;
/// use binarysymphony::scale::Scale;
///
/// let mapper = Mapper::new(Mode::Melody, Scale::Chromatic);
/// let events = mapper.map_bytes(&[0, 12, 24]);
///
/// // All three bytes are multiples of 12, i.e. pitch class C, while
/// // each lands in the next higher octave band.
/// let octaves: Vec<i32> = events.iter().map(|e| e.octave).collect();
/// assert!(events.iter().all(|e| e.pitch_class == PitchClass::C));
/// assert_eq!(octaves, vec![4, 5, 6]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Mapper {
    mode: Mode,
    scale: Scale,
}

impl Mapper {
    pub fn new(mode: Mode, scale: Scale) -> Self {
        Self { mode, scale }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Map every input byte to one note event, preserving order.
    /// Empty input yields an empty sequence, not an error.
    pub fn map_bytes(&self, data: &[u8]) -> Vec<NoteEvent> {
        data.iter().map(|&byte| self.map_byte(byte)).collect()
    }

    fn map_byte(&self, byte: u8) -> NoteEvent {
        let raw = PitchClass::from_index(byte % 12);
        NoteEvent {
            pitch_class: self.scale.quantize(raw),
            octave: octave_band(byte),
            duration: self.duration(byte),
            source_byte: byte,
        }
    }

    fn duration(&self, byte: u8) -> f64 {
        match self.mode {
            Mode::Melody => MELODY_DURATION,
            Mode::Rhythm => {
                let position = f64::from(byte) / 255.0;
                RHYTHM_MIN_DURATION + position * (RHYTHM_MAX_DURATION - RHYTHM_MIN_DURATION)
            }
            Mode::Spectrum => SPECTRUM_DURATION,
        }
    }
}

/// The octave band of a byte value: bands of 12 consecutive byte values
/// cycle through the octaves 4 to 7, so bytes 0-11 sound in octave 4,
/// bytes 12-23 in octave 5, and so on, wrapping at byte 48.
fn octave_band(byte: u8) -> i32 {
    BASE_OCTAVE + i32::from((byte / 12) % OCTAVE_SPAN)
}
