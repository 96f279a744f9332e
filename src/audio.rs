//! Cue playback through WebAudio oscillators.
//!
//! Each cue is a short melody of plain tones. Offsets are scheduled on the
//! audio clock, so a whole melody is queued in one call.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::kitchen::state::Cue;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration_ms: u32,
    pub volume: f32,
    /// Delay after the cue fires.
    pub offset_ms: u32,
    pub square: bool,
}

const fn sine(frequency: f32, duration_ms: u32, volume: f32, offset_ms: u32) -> Tone {
    Tone { frequency, duration_ms, volume, offset_ms, square: false }
}

const SUCCESS: &[Tone] = &[
    sine(1000.0, 150, 0.08, 0),
    sine(1400.0, 150, 0.08, 150),
    sine(1800.0, 100, 0.05, 300),
];
const FAIL: &[Tone] = &[sine(300.0, 400, 0.1, 0), sine(250.0, 300, 0.08, 100)];
const CHOP: &[Tone] = &[sine(1200.0, 80, 0.06, 0)];
const WARNING: &[Tone] = &[Tone {
    frequency: 800.0,
    duration_ms: 200,
    volume: 0.07,
    offset_ms: 0,
    square: true,
}];

pub fn tones(cue: Cue) -> &'static [Tone] {
    match cue {
        Cue::Chop => CHOP,
        Cue::Success | Cue::GameOver { cleared: true } => SUCCESS,
        Cue::Fail | Cue::GameOver { cleared: false } => FAIL,
        Cue::Warning => WARNING,
    }
}

/// Plays cues. Silent when the browser refuses an `AudioContext`.
pub struct CueSound {
    ctx: Option<AudioContext>,
}

impl CueSound {
    pub fn new() -> Self {
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                tracing::warn!(error = ?err, "audio unavailable, cues will be silent");
                None
            }
        };
        Self { ctx }
    }

    pub fn play(&self, cue: Cue) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        // Contexts start suspended until the first user gesture.
        if let Err(err) = ctx.resume() {
            tracing::warn!(error = ?err, "could not resume audio context");
        }
        for tone in tones(cue) {
            if let Err(err) = schedule(ctx, tone) {
                tracing::warn!(?cue, error = ?err, "cue playback failed");
                return;
            }
        }
    }
}

fn schedule(ctx: &AudioContext, tone: &Tone) -> Result<(), JsValue> {
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    osc.set_type(if tone.square { OscillatorType::Square } else { OscillatorType::Sine });
    let start = ctx.current_time() + tone.offset_ms as f64 / 1000.0;
    let end = start + tone.duration_ms as f64 / 1000.0;

    osc.frequency().set_value_at_time(tone.frequency, start)?;
    gain.gain().set_value_at_time(tone.volume, start)?;
    gain.gain().exponential_ramp_to_value_at_time(0.001, end)?;
    osc.start_with_when(start)?;
    osc.stop_with_when(end)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_a_sound() {
        for cue in [
            Cue::Chop,
            Cue::Success,
            Cue::Fail,
            Cue::Warning,
            Cue::GameOver { cleared: true },
            Cue::GameOver { cleared: false },
        ] {
            assert!(!tones(cue).is_empty(), "{:?} is silent", cue);
        }
    }

    #[test]
    fn success_melody_rises() {
        let t = tones(Cue::Success);
        assert!(t.windows(2).all(|w| w[0].frequency < w[1].frequency));
        assert!(t.windows(2).all(|w| w[0].offset_ms < w[1].offset_ms));
    }

    #[test]
    fn game_over_reuses_success_and_fail() {
        assert_eq!(tones(Cue::GameOver { cleared: true }), tones(Cue::Success));
        assert_eq!(tones(Cue::GameOver { cleared: false }), tones(Cue::Fail));
    }

    #[test]
    fn only_warning_is_square() {
        assert!(tones(Cue::Warning).iter().all(|t| t.square));
        assert!(tones(Cue::Chop).iter().all(|t| !t.square));
    }
}
