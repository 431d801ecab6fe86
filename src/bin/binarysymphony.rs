// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `binarysymphony` - the command line interface for turning binary
//! files into WAV, MP3, MIDI or spectrogram output.

use std::path::PathBuf;
use std::process;

use log::{error, info};
use structopt::StructOpt;

use binarysymphony::batch;
use binarysymphony::mapper::Mode;
use binarysymphony::output::OutputFormat;
use binarysymphony::pipeline;
use binarysymphony::scale::Scale;

#[derive(Debug, StructOpt)]
#[structopt(name = "binarysymphony", about = "Convert binary files into music")]
struct Opt {
    /// Input binary file (use --batch for whole directories).
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Input directory for batch processing.
    #[structopt(long, parse(from_os_str))]
    input_dir: Option<PathBuf>,

    /// Output file, or output directory in batch mode.
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Mapping mode: melody, rhythm or spectrum.
    #[structopt(short, long, default_value = "melody")]
    mode: Mode,

    /// Musical scale used to quantize pitches: chromatic, major, minor,
    /// pentatonic, blues, dorian or phrygian.
    #[structopt(short, long, default_value = "chromatic")]
    scale: Scale,

    /// Output format: wav, mp3, midi or spectrum.
    #[structopt(short, long, default_value = "wav")]
    format: OutputFormat,

    /// Process every file in --input-dir instead of a single file.
    #[structopt(long)]
    batch: bool,

    /// Enable debug output.
    #[structopt(long)]
    debug: bool,
}

fn main() {
    let opt = Opt::from_args();

    let level = if opt.debug {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).unwrap();

    process::exit(run(&opt));
}

fn run(opt: &Opt) -> i32 {
    if opt.batch {
        let input_dir = match &opt.input_dir {
            Some(dir) => dir,
            None => {
                error!("--input-dir is required when using --batch");
                return 1;
            }
        };
        if !input_dir.is_dir() {
            error!("{} is not a directory", input_dir.display());
            return 1;
        }

        match batch::process_dir(input_dir, &opt.output, opt.mode, opt.scale, opt.format) {
            Ok(report) => {
                if report.failed() == 0 {
                    0
                } else {
                    error!("{} of {} files failed", report.failed(), report.outcomes.len());
                    1
                }
            }
            Err(err) => {
                error!("{}", err);
                1
            }
        }
    } else {
        let input = match &opt.input {
            Some(file) => file,
            None => {
                error!("--input is required when not using --batch");
                return 1;
            }
        };

        match pipeline::convert_file(input, &opt.output, opt.mode, opt.scale, opt.format) {
            Ok(report) => {
                info!(
                    "generated {} notes from {} bytes",
                    report.notes_mapped, report.bytes_read
                );
                0
            }
            Err(err) => {
                error!("{}", err);
                1
            }
        }
    }
}
