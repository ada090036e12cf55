//! Sound cue routing
//!
//! The core never touches an audio device. It emits `GameEvent`s; this
//! module translates the audible ones into named cues for whatever sink
//! the host registered. Background music looping is host-driven: the host
//! plays `BgmLoop` when its own track runs out.

use crate::sim::GameEvent;

/// Named sounds the host knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Pickup,
    GameOver,
    BgmLoop,
}

/// Host-owned audio output
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that records cues instead of playing them (tests, headless runs)
#[derive(Debug, Default)]
pub struct NullSink {
    pub played: Vec<SoundCue>,
}

impl AudioSink for NullSink {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}

/// Forward the audible subset of a frame's events to the sink
pub fn route(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        match event {
            GameEvent::Jump => sink.play(SoundCue::Jump),
            GameEvent::Pickup => sink.play(SoundCue::Pickup),
            GameEvent::GameOver => sink.play(SoundCue::GameOver),
            _ => {}
        }
    }
}
