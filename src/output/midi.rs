//! Standard MIDI file export through `midly`.

use std::path::Path;

use log::info;
use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use snafu::ResultExt;

use super::{ExportError, Io};
use crate::note::NoteEvent;

/// Tick resolution of the generated file, in ticks per beat.
const TICKS_PER_BEAT: u16 = 480;

/// Fixed velocity for every note; the mapper carries no dynamics.
const VELOCITY: u8 = 64;

/// Largest delta time representable in a MIDI track event.
const MAX_DELTA: u32 = (1 << 28) - 1;

/// Serialize the note events as a single-track MIDI file.
///
/// Every event becomes a note-on/note-off pair on channel 0; the
/// note-off is delayed by `duration * 480` ticks, i.e. one beat per
/// second of duration at the file's nominal tempo.
pub fn write_midi(events: &[NoteEvent], dest: &Path) -> Result<(), ExportError> {
    let mut smf = Smf {
        header: Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(TICKS_PER_BEAT)),
        ),
        tracks: Vec::new(),
    };

    let mut track = Vec::with_capacity(events.len() * 2 + 1);
    for event in events {
        let key = u7::new(event.midi_key());
        let ticks = (event.duration * f64::from(TICKS_PER_BEAT)) as u32;
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key,
                    vel: u7::new(VELOCITY),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(ticks.min(MAX_DELTA)),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::new(VELOCITY),
                },
            },
        });
    }
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf.save(dest).context(Io { path: dest })?;
    info!("wrote {} notes to {}", events.len(), dest.display());
    Ok(())
}
