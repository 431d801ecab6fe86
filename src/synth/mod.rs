// binarysymphony -- turn binary files into music
// Copyright (C) 2026  binarysymphony contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This namespace contains all the parts converting from note data to wave data.

pub mod envelope;
pub mod oscillator;
pub mod tuning;

use log::debug;

use crate::note::NoteEvent;
use crate::wave::Waveform;

use envelope::EdgeFade;
use oscillator::Oscillator;
use tuning::Tuning;

/// Peak amplitude of a single note segment.
const SEGMENT_AMPLITUDE: f64 = 0.5;

/// Length of the linear fade applied to both edges of every segment.
const EDGE_FADE_SECONDS: f64 = 0.002;

/// Renders note events into a mono waveform, one sine segment per event.
///
/// Segments are generated back to back in event order; there is no
/// overlap and no mixing, so the total length of the output is simply
/// the sum of the individual segment lengths.
#[derive(Debug)]
pub struct Synthesizer {
    sample_rate: u32,
    tuning: Tuning,
    fade: EdgeFade,
    amplitude: f64,
}

impl Synthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            tuning: Tuning::default(),
            fade: EdgeFade {
                seconds: EDGE_FADE_SECONDS,
            },
            amplitude: SEGMENT_AMPLITUDE,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render the events into a freshly allocated waveform.
    /// An empty event sequence yields an empty (zero-sample) waveform.
    pub fn render(&self, events: &[NoteEvent]) -> Waveform {
        let total: usize = events.iter().map(|e| self.segment_len(e)).sum();
        let mut samples = Vec::with_capacity(total);

        for event in events {
            let frequency = self.tuning.frequency(event.pitch_class, event.octave);
            let len = self.segment_len(event);
            let mut oscillator = Oscillator::new(f64::from(self.sample_rate), frequency);
            for index in 0..len {
                let gain = self.fade.gain(index, len, f64::from(self.sample_rate));
                samples.push(oscillator.next_sample() * self.amplitude * gain);
            }
        }

        debug!(
            "rendered {} events into {} samples ({:.2} seconds)",
            events.len(),
            samples.len(),
            samples.len() as f64 / f64::from(self.sample_rate)
        );

        let mut waveform = Waveform::from_samples(samples, self.sample_rate);
        waveform.limit_peak();
        waveform
    }

    fn segment_len(&self, event: &NoteEvent) -> usize {
        (event.duration * f64::from(self.sample_rate)) as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mapper::{Mapper, Mode};
    use crate::note::PitchClass;
    use crate::scale::Scale;

    fn event(pitch_class: PitchClass, octave: i32, duration: f64) -> NoteEvent {
        NoteEvent {
            pitch_class,
            octave,
            duration,
            source_byte: 0,
        }
    }

    #[test]
    fn no_events_render_to_an_empty_waveform() {
        let waveform = Synthesizer::new(44100).render(&[]);
        assert!(waveform.is_empty());
        assert_eq!(waveform.sample_rate(), 44100);
    }

    #[test]
    fn sample_count_is_the_sum_of_segment_lengths() {
        let events = [
            event(PitchClass::A, 4, 0.5),
            event(PitchClass::C, 5, 0.25),
            event(PitchClass::E, 6, 0.1),
        ];
        let waveform = Synthesizer::new(44100).render(&events);
        let expected: usize = events
            .iter()
            .map(|e| (e.duration * 44100.0) as usize)
            .sum();
        assert_eq!(waveform.len(), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let mapper = Mapper::new(Mode::Rhythm, Scale::Dorian);
        let events = mapper.map_bytes(&[1, 2, 3, 250, 251, 252]);
        let synth = Synthesizer::new(44100);
        assert_eq!(synth.render(&events), synth.render(&events));
    }

    #[test]
    fn amplitude_stays_within_the_segment_peak() {
        let events = [event(PitchClass::G, 7, 0.3)];
        let waveform = Synthesizer::new(44100).render(&events);
        assert!(waveform.peak() <= SEGMENT_AMPLITUDE + 1e-9);
        assert!(waveform.peak() > 0.0);
    }

    #[test]
    fn a4_oscillates_at_440_hz() {
        // one second of A4 has 880 zero crossings, give or take the edges
        let waveform = Synthesizer::new(44100).render(&[event(PitchClass::A, 4, 1.0)]);
        let crossings = waveform
            .samples()
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();
        assert!(
            (878..=882).contains(&crossings),
            "{} crossings",
            crossings
        );
    }
}
