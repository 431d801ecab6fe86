// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! MP3 export by piping raw PCM into a `lame` subprocess.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};
use snafu::ResultExt;

use super::{Encoder, ExportError, Io};
use crate::wave::Waveform;

/// Encode the waveform as MP3 by streaming 16-bit PCM to `lame`.
///
/// The encoder binary must be on the `PATH`; a missing binary or a
/// nonzero exit status both surface as export errors carrying the
/// encoder's diagnostic.
pub fn write_mp3(waveform: &Waveform, dest: &Path) -> Result<(), ExportError> {
    let rate_khz = format!("{}", f64::from(waveform.sample_rate()) / 1000.0);
    debug!("spawning lame at {} kHz for {}", rate_khz, dest.display());

    let mut encoder = Command::new("lame")
        .arg("-r") // raw PCM from stdin
        .arg("--signed")
        .arg("--bitwidth")
        .arg("16")
        .arg("--little-endian")
        .arg("-s")
        .arg(&rate_khz)
        .arg("-m")
        .arg("m") // mono
        .arg("--quiet")
        .arg("-")
        .arg(dest)
        .stdin(Stdio::piped())
        .spawn()
        .context(Io { path: dest })?;

    let mut audio_stream = encoder.stdin.take().expect("Used stdin(Stdio::piped())");
    let mut bytes = Vec::with_capacity(waveform.len() * 2);
    for sample in waveform.to_i16_samples() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    audio_stream.write_all(&bytes).context(Io { path: dest })?;

    // lame exits once its input stream is closed
    drop(audio_stream);
    let status = encoder.wait().context(Io { path: dest })?;
    if !status.success() {
        return Encoder {
            path: dest,
            message: format!("lame exited with {}", status),
        }
        .fail();
    }

    info!(
        "encoded {:.2} seconds of audio to {}",
        waveform.duration(),
        dest.display()
    );
    Ok(())
}
