//! Spectral visualizations rendered to PNG images.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use rustfft::{num_complex::Complex, FftPlanner};
use snafu::ResultExt;

use super::{ExportError, Io, Png};
use crate::note::NoteEvent;
use crate::synth::tuning::Tuning;
use crate::wave::Waveform;

/// STFT window length in samples.
const WINDOW: usize = 1024;

/// Hop between consecutive STFT windows.
const HOP: usize = 512;

/// Decibel floor of the rendered spectrogram; anything quieter is black.
const DB_FLOOR: f64 = -80.0;

/// Canvas size of the note-frequency plot.
const PLOT_WIDTH: usize = 1024;
const PLOT_HEIGHT: usize = 512;

/// Render a spectrogram of the waveform as an 8-bit grayscale PNG.
///
/// Each image column is one Hann-windowed FFT frame; frequency runs
/// bottom-up, time left to right. The input is zero-padded to a full
/// window so even very short waveforms yield one column.
pub fn write_spectrogram(waveform: &Waveform, dest: &Path) -> Result<(), ExportError> {
    let columns = stft_magnitudes(waveform.samples());
    let width = columns.len();
    let height = WINDOW / 2;

    let max_magnitude = columns
        .iter()
        .flat_map(|column| column.iter())
        .fold(0.0f64, |acc, &m| acc.max(m));

    let mut pixels = vec![0u8; width * height];
    if max_magnitude > 0.0 {
        for (x, column) in columns.iter().enumerate() {
            for (bin, &magnitude) in column.iter().enumerate() {
                let db = 20.0 * (magnitude / max_magnitude).log10();
                let level = ((db - DB_FLOOR) / -DB_FLOOR).max(0.0).min(1.0);
                let y = height - 1 - bin;
                pixels[y * width + x] = (level * 255.0) as u8;
            }
        }
    }

    write_grayscale_png(&pixels, width, height, dest)?;
    info!(
        "wrote a {}x{} spectrogram to {}",
        width,
        height,
        dest.display()
    );
    Ok(())
}

/// Render the note sequence as a frequency-over-time step plot.
///
/// Works directly on the events, without synthesizing audio first;
/// useful for eyeballing what a mapping did to a file.
pub fn write_note_plot(events: &[NoteEvent], dest: &Path) -> Result<(), ExportError> {
    let tuning = Tuning::default();
    let frequencies: Vec<f64> = events
        .iter()
        .map(|e| tuning.frequency(e.pitch_class, e.octave))
        .collect();
    let total_duration: f64 = events.iter().map(|e| e.duration).sum();

    let mut pixels = vec![0u8; PLOT_WIDTH * PLOT_HEIGHT];
    if !events.is_empty() && total_duration > 0.0 {
        let low = frequencies.iter().cloned().fold(f64::INFINITY, f64::min) * 0.9;
        let mut high = frequencies.iter().cloned().fold(0.0, f64::max) * 1.1;
        if high <= low {
            high = low * 2.0;
        }

        let mut time = 0.0;
        for (event, &frequency) in events.iter().zip(&frequencies) {
            let x0 = ((time / total_duration) * PLOT_WIDTH as f64) as usize;
            time += event.duration;
            let x1 = ((time / total_duration) * PLOT_WIDTH as f64) as usize;
            let relative = (frequency - low) / (high - low);
            let y = PLOT_HEIGHT - 1 - ((relative * (PLOT_HEIGHT - 1) as f64) as usize).min(PLOT_HEIGHT - 1);
            for x in x0..x1.max(x0 + 1).min(PLOT_WIDTH) {
                pixels[y * PLOT_WIDTH + x] = 255;
            }
        }
    }

    write_grayscale_png(&pixels, PLOT_WIDTH, PLOT_HEIGHT, dest)?;
    info!("wrote a note plot of {} events to {}", events.len(), dest.display());
    Ok(())
}

/// Short-time Fourier transform: one vector of `WINDOW / 2` linear
/// magnitudes per hop, Hann-windowed, input zero-padded to a full
/// window.
fn stft_magnitudes(samples: &[f64]) -> Vec<Vec<f64>> {
    let padded_len = samples.len().max(WINDOW);
    let columns = 1 + (padded_len - WINDOW) / HOP;

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(WINDOW);

    let mut result = Vec::with_capacity(columns);
    for column in 0..columns {
        let start = column * HOP;
        let mut buffer: Vec<Complex<f64>> = (0..WINDOW)
            .map(|i| {
                let sample = samples.get(start + i).copied().unwrap_or(0.0);
                Complex::new(sample * hann(i), 0.0)
            })
            .collect();
        fft.process(&mut buffer);

        let magnitudes = buffer[..WINDOW / 2].iter().map(|c| c.norm()).collect();
        result.push(magnitudes);
    }
    result
}

fn hann(i: usize) -> f64 {
    0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / WINDOW as f64).cos())
}

/// Write 8-bit grayscale pixel data with fixed encoder settings, so the
/// same input always produces byte-identical images.
fn write_grayscale_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    dest: &Path,
) -> Result<(), ExportError> {
    let file = File::create(dest).context(Io { path: dest })?;
    let mut encoder = Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut writer = encoder.write_header().context(Png { path: dest })?;
    writer.write_image_data(pixels).context(Png { path: dest })?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mapper::{Mapper, Mode};
    use crate::note::PitchClass;
    use crate::scale::Scale;
    use crate::synth::Synthesizer;

    fn png_dimensions(path: &Path) -> (u32, u32) {
        let decoder = png::Decoder::new(File::open(path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        (info.width, info.height)
    }

    #[test]
    fn spectrogram_has_one_column_per_hop() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("spec.png");

        let event = NoteEvent {
            pitch_class: PitchClass::A,
            octave: 4,
            duration: 0.5,
            source_byte: 0,
        };
        let waveform = Synthesizer::new(44100).render(&[event]);
        write_spectrogram(&waveform, &dest).unwrap();

        // 22050 samples -> 1 + (22050 - 1024) / 512 columns
        assert_eq!(png_dimensions(&dest), (42, (WINDOW / 2) as u32));
    }

    #[test]
    fn empty_waveform_yields_a_single_silent_column() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.png");

        let waveform = Waveform::from_samples(vec![], 44100);
        write_spectrogram(&waveform, &dest).unwrap();

        assert_eq!(png_dimensions(&dest), (1, (WINDOW / 2) as u32));
    }

    #[test]
    fn note_plot_draws_something() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("plot.png");

        let events = Mapper::new(Mode::Melody, Scale::Major).map_bytes(&[0, 50, 100, 200]);
        write_note_plot(&events, &dest).unwrap();

        assert_eq!(
            png_dimensions(&dest),
            (PLOT_WIDTH as u32, PLOT_HEIGHT as u32)
        );

        let decoder = png::Decoder::new(File::open(&dest).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0u8; reader.output_buffer_size()];
        reader.next_frame(&mut pixels).unwrap();
        assert!(pixels.iter().any(|&p| p != 0));
    }
}
