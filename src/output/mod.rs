// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Exporters turning waveforms or note events into files on disk.
//!
//! Exactly one exporter runs per conversion, selected by the requested
//! [`OutputFormat`]; they are never composed with each other.

pub mod midi;
pub mod mp3;
pub mod spectrum;
pub mod wav;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use snafu::Snafu;

/// The supported output file formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Uncompressed 16-bit PCM audio.
    Wav,
    /// Compressed audio, encoded by an external `lame` process.
    Mp3,
    /// A standard MIDI file built from the note events directly.
    Midi,
    /// A spectrogram image of the synthesized waveform.
    Spectrum,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Midi => "midi",
            OutputFormat::Spectrum => "spectrum",
        }
    }

    /// The file extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Midi => "mid",
            OutputFormat::Spectrum => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParseFormatError {
    #[snafu(display("unknown format `{}` (expected wav, mp3, midi or spectrum)", name))]
    UnknownFormat { name: String },
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wav" => Ok(OutputFormat::Wav),
            "mp3" => Ok(OutputFormat::Mp3),
            "midi" => Ok(OutputFormat::Midi),
            "spectrum" => Ok(OutputFormat::Spectrum),
            _ => UnknownFormat { name: s }.fail(),
        }
    }
}

/// Errors raised while writing an output file.
#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum ExportError {
    #[snafu(display("cannot write {}: {}", path.display(), source))]
    Io { path: PathBuf, source: io::Error },

    #[snafu(display("cannot encode WAV file {}: {}", path.display(), source))]
    Wav {
        path: PathBuf,
        source: hound::Error,
    },

    #[snafu(display("cannot encode PNG file {}: {}", path.display(), source))]
    Png {
        path: PathBuf,
        source: png::EncodingError,
    },

    #[snafu(display("mp3 encoder failed for {}: {}", path.display(), message))]
    Encoder { path: PathBuf, message: String },
}
