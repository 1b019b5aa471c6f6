//! Procedural sound effects
//!
//! Every cue is a handful of short oscillator tones with an exponential
//! decay envelope; no sample files are needed. The synth itself sits behind
//! [`ToneSink`] so hosts can plug in Web Audio, a native backend or nothing.

use crate::sim::{GameEvent, SoundCue};

/// Peak gain of a single tone before volume scaling
const TONE_PEAK_GAIN: f32 = 0.3;
/// Gain the decay envelope ends on
const TONE_FLOOR_GAIN: f32 = 0.01;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// One oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds until the envelope reaches the floor
    pub duration_s: f32,
    /// Seconds after the cue fires
    pub delay_s: f32,
    pub waveform: Waveform,
    /// Starting gain, volume applied
    pub gain: f32,
}

impl Tone {
    const fn sine(frequency: f32, duration_s: f32, delay_s: f32) -> Self {
        Self {
            frequency,
            duration_s,
            delay_s,
            waveform: Waveform::Sine,
            gain: TONE_PEAK_GAIN,
        }
    }

    /// Envelope gain `t_s` seconds after the tone starts
    ///
    /// Exponential decay from `gain` to the floor over `duration_s`, silent
    /// before the start and after the end.
    pub fn gain_at(&self, t_s: f32) -> f32 {
        if t_s < 0.0 || t_s > self.duration_s || self.gain <= 0.0 {
            return 0.0;
        }
        let floor = TONE_FLOOR_GAIN.min(self.gain);
        self.gain * (floor / self.gain).powf(t_s / self.duration_s)
    }
}

/// Tone recipe for a cue (gain at full volume)
pub fn tones(cue: SoundCue) -> Vec<Tone> {
    match cue {
        SoundCue::Collect => vec![Tone::sine(800.0, 0.1, 0.0)],
        // Rising three-note run
        SoundCue::BonusCollect => vec![
            Tone::sine(600.0, 0.15, 0.0),
            Tone::sine(800.0, 0.15, 0.1),
            Tone::sine(1000.0, 0.15, 0.2),
        ],
        SoundCue::Hit => vec![Tone {
            waveform: Waveform::Sawtooth,
            ..Tone::sine(150.0, 0.3, 0.0)
        }],
        SoundCue::Powerup => vec![
            Tone::sine(400.0, 0.1, 0.0),
            Tone::sine(600.0, 0.1, 0.08),
            Tone::sine(800.0, 0.15, 0.16),
        ],
        SoundCue::Achievement => (0..3)
            .map(|i| Tone::sine(800.0 + i as f32 * 200.0, 0.15, i as f32 * 0.1))
            .collect(),
    }
}

/// Anything that can schedule oscillator tones
pub trait ToneSink {
    fn schedule(&mut self, tone: Tone);
}

/// Discards everything (headless hosts, tests)
#[derive(Debug, Default)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn schedule(&mut self, _tone: Tone) {}
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Manager configured from player settings
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Schedule a cue's tones on `sink`; returns how many were scheduled
    pub fn play<K: ToneSink + ?Sized>(&self, cue: SoundCue, sink: &mut K) -> usize {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return 0;
        }
        let recipe = tones(cue);
        let count = recipe.len();
        for tone in recipe {
            sink.schedule(Tone {
                gain: tone.gain * vol,
                ..tone
            });
        }
        count
    }

    /// Play every sound cue among `events`
    pub fn play_events<K: ToneSink + ?Sized>(&self, events: &[GameEvent], sink: &mut K) {
        for event in events {
            if let GameEvent::Sound(cue) = event {
                self.play(*cue, sink);
            }
        }
    }
}
