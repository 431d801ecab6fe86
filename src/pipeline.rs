// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The single-file conversion pipeline: read bytes, map them to notes,
//! synthesize if needed and hand the result to the matching exporter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use snafu::{ensure, ResultExt, Snafu};

use crate::mapper::{Mapper, Mode};
use crate::output::{self, ExportError, OutputFormat};
use crate::scale::Scale;
use crate::synth::Synthesizer;

/// Samples per second of all synthesized audio.
pub const SAMPLE_RATE: u32 = 44100;

/// Errors surfaced by a conversion run. Mapping and synthesis are total
/// functions, so everything that can fail is either reading the input
/// or writing the output.
#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum Error {
    #[snafu(display("cannot read input file {}: {}", path.display(), source))]
    Input { path: PathBuf, source: io::Error },

    #[snafu(display("input file {} is empty", path.display()))]
    EmptyInput { path: PathBuf },

    #[snafu(display("cannot create output directory {}: {}", path.display(), source))]
    OutputDir { path: PathBuf, source: io::Error },

    #[snafu(display("{}", source))]
    Export { source: ExportError },
}

/// Counters describing a successful conversion, for reporting.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub bytes_read: usize,
    pub notes_mapped: usize,
}

/// Convert a single binary file into the requested output format.
///
/// The whole input is read into memory; an empty file is rejected here,
/// while the mapper and synthesizer themselves happily accept empty
/// sequences.
pub fn convert_file(
    input: &Path,
    output_path: &Path,
    mode: Mode,
    scale: Scale,
    format: OutputFormat,
) -> Result<Report, Error> {
    let data = fs::read(input).context(Input { path: input })?;
    ensure!(!data.is_empty(), EmptyInput { path: input });
    debug!("read {} bytes from {}", data.len(), input.display());

    let mapper = Mapper::new(mode, scale);
    let events = mapper.map_bytes(&data);
    debug!(
        "mapped {} bytes to {} note events ({} mode, {} scale)",
        data.len(),
        events.len(),
        mode,
        scale
    );

    let render = || Synthesizer::new(SAMPLE_RATE).render(&events);
    match format {
        OutputFormat::Midi => output::midi::write_midi(&events, output_path),
        OutputFormat::Wav => output::wav::write_wav(&render(), output_path),
        OutputFormat::Mp3 => output::mp3::write_mp3(&render(), output_path),
        OutputFormat::Spectrum => output::spectrum::write_spectrogram(&render(), output_path),
    }
    .context(Export)?;

    info!(
        "{} -> {} ({} notes)",
        input.display(),
        output_path.display(),
        events.len()
    );
    Ok(Report {
        bytes_read: data.len(),
        notes_mapped: events.len(),
    })
}
