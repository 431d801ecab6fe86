//! WAV export through `hound`.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;
use snafu::ResultExt;

use super::{ExportError, Wav};
use crate::wave::Waveform;

/// Write the waveform as a 16-bit mono PCM WAV file.
///
/// An empty waveform produces a valid zero-sample file rather than an
/// error, so silence can be exported like any other result.
pub fn write_wav(waveform: &Waveform, dest: &Path) -> Result<(), ExportError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(dest, spec).context(Wav { path: dest })?;
    for sample in waveform.to_i16_samples() {
        writer.write_sample(sample).context(Wav { path: dest })?;
    }
    writer.finalize().context(Wav { path: dest })?;

    info!(
        "wrote {} samples ({:.2} seconds) to {}",
        waveform.len(),
        waveform.duration(),
        dest.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_waveform_writes_a_valid_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("silence.wav");

        let waveform = Waveform::from_samples(vec![], 44100);
        write_wav(&waveform, &dest).unwrap();

        let reader = hound::WavReader::open(&dest).unwrap();
        assert_eq!(reader.len(), 0);
        assert_eq!(reader.spec().sample_rate, 44100);
        assert_eq!(reader.spec().channels, 1);
    }

    #[test]
    fn samples_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ramp.wav");

        let waveform = Waveform::from_samples(vec![0.0, 0.5, -0.5, 1.0], 44100);
        write_wav(&waveform, &dest).unwrap();

        let mut reader = hound::WavReader::open(&dest).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, waveform.to_i16_samples());
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dest = Path::new("/nonexistent-dir/out.wav");
        let waveform = Waveform::from_samples(vec![0.0], 44100);
        assert!(write_wav(&waveform, dest).is_err());
    }
}
