//! This is the namespace for all parts dealing with data in sampled waves.

/// A mono buffer of `f64` amplitude samples at a fixed sample rate.
///
/// A waveform is produced by one synthesizer run, handed to exactly one
/// exporter and then dropped; nothing is shared or cached between runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: u32,
}

#[allow(clippy::len_without_is_empty)]
impl Waveform {
    pub fn from_samples(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// The largest absolute amplitude in the buffer, 0.0 when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use binarysymphony::wave::Waveform;
    ///
    /// let wave = Waveform::from_samples(vec![0.25, -0.75, 0.5], 44100);
    /// assert_eq!(wave.peak(), 0.75);
    /// ```
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    /// Rescale the buffer so the peak amplitude does not exceed 1.0.
    /// Buffers already within bounds are left untouched, so this is a
    /// guard against accumulation drift rather than a loudness change.
    ///
    /// # Examples
    ///
    /// ```
    /// use binarysymphony::wave::Waveform;
    ///
    /// let mut wave = Waveform::from_samples(vec![0.5, -2.0], 44100);
    /// wave.limit_peak();
    /// assert_eq!(wave.samples(), &[0.25, -1.0]);
    /// ```
    pub fn limit_peak(&mut self) {
        let peak = self.peak();
        if peak > 1.0 {
            for sample in &mut self.samples {
                *sample /= peak;
            }
        }
    }

    /// Convert to 16-bit PCM, clipping anything outside [-1, 1].
    pub fn to_i16_samples(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s.max(-1.0).min(1.0) * f64::from(i16::max_value())) as i16)
            .collect()
    }
}
