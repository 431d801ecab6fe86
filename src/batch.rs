// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Batch conversion of whole directories.
//!
//! Every file is an independent pipeline run; a failing file is
//! recorded and skipped, never aborting the rest of the batch.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use snafu::ResultExt;
use walkdir::WalkDir;

use crate::mapper::Mode;
use crate::output::OutputFormat;
use crate::pipeline::{self, Error, OutputDir};
use crate::scale::Scale;

/// Suffix appended to output file stems so batch results are easy to
/// tell apart from their sources.
const OUTPUT_SUFFIX: &str = "_binarysymphony";

/// The outcome of converting one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf, Error>,
}

/// Aggregated per-file outcomes of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Convert every regular file below `input_dir`, writing the results
/// into `output_dir` (created if missing). Hidden files are skipped.
pub fn process_dir(
    input_dir: &Path,
    output_dir: &Path,
    mode: Mode,
    scale: Scale,
    format: OutputFormat,
) -> Result<BatchReport, Error> {
    let files = collect_files(input_dir);
    if files.is_empty() {
        warn!("no files found in {}", input_dir.display());
    } else {
        info!(
            "processing {} files from {}",
            files.len(),
            input_dir.display()
        );
    }
    fs::create_dir_all(output_dir).context(OutputDir { path: output_dir })?;

    let mut outcomes = Vec::with_capacity(files.len());
    for input in files {
        let output = output_dir.join(output_name(&input, format));
        let result = pipeline::convert_file(&input, &output, mode, scale, format)
            .map(|_| output);
        if let Err(err) = &result {
            warn!("skipping {}: {}", input.display(), err);
        }
        outcomes.push(FileOutcome { input, result });
    }

    let report = BatchReport { outcomes };
    info!(
        "batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

/// All regular, non-hidden files below `dir`, in a stable order.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable directory entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.into_path())
        .collect()
}

fn output_name(input: &Path, format: OutputFormat) -> String {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, format.extension())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_file(path: &Path, contents: &[u8]) {
        fs::File::create(path).unwrap().write_all(contents).unwrap();
    }

    #[test]
    fn one_bad_file_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        let output_dir = dir.path().join("out");
        fs::create_dir(&input_dir).unwrap();

        write_file(&input_dir.join("a.bin"), &[1, 2, 3]);
        write_file(&input_dir.join("b.bin"), &[]); // empty files fail
        write_file(&input_dir.join("c.bin"), &[4, 5, 6]);

        let report = process_dir(
            &input_dir,
            &output_dir,
            Mode::Melody,
            Scale::Chromatic,
            OutputFormat::Wav,
        )
        .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(output_dir.join("a_binarysymphony.wav").is_file());
        assert!(output_dir.join("c_binarysymphony.wav").is_file());
        assert!(!output_dir.join("b_binarysymphony.wav").exists());
    }

    #[test]
    fn hidden_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        fs::create_dir(&input_dir).unwrap();
        write_file(&input_dir.join(".hidden"), &[1, 2, 3]);
        write_file(&input_dir.join("visible.bin"), &[1, 2, 3]);

        let report = process_dir(
            &input_dir,
            &dir.path().join("out"),
            Mode::Spectrum,
            Scale::Major,
            OutputFormat::Midi,
        )
        .unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.succeeded(), 1);
    }

    #[test]
    fn empty_directory_is_a_valid_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        fs::create_dir(&input_dir).unwrap();

        let report = process_dir(
            &input_dir,
            &dir.path().join("out"),
            Mode::Melody,
            Scale::Chromatic,
            OutputFormat::Wav,
        )
        .unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn nested_files_are_found() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        fs::create_dir_all(input_dir.join("sub")).unwrap();
        write_file(&input_dir.join("sub").join("deep.bin"), &[9, 9]);

        let report = process_dir(
            &input_dir,
            &dir.path().join("out"),
            Mode::Melody,
            Scale::Chromatic,
            OutputFormat::Wav,
        )
        .unwrap();

        assert_eq!(report.succeeded(), 1);
        assert!(dir
            .path()
            .join("out")
            .join("deep_binarysymphony.wav")
            .is_file());
    }
}
