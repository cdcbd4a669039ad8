//! Audio system
//!
//! Sound cues are procedurally generated with Web Audio oscillators in the
//! browser. Native builds have no output device and only log the cues.

use crate::sim::GameEvent;

/// Output level applied to every cue
pub const VOLUME: f32 = 0.8;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Brick destroyed
    BrickBreak,
    /// First frame after leaving the menu
    GameStart,
    /// Ball hits a side or the ceiling
    WallBounce,
    /// Ball hits paddle
    PaddleBounce,
    /// Ball fell past the paddle
    Loss,
    /// Last brick destroyed
    Win,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::BrickBreak => SoundEffect::BrickBreak,
            GameEvent::GameStart => SoundEffect::GameStart,
            GameEvent::WallBounce => SoundEffect::WallBounce,
            GameEvent::PaddleBounce => SoundEffect::PaddleBounce,
            GameEvent::Loss => SoundEffect::Loss,
            GameEvent::Win => SoundEffect::Win,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, VOLUME};
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play every cue queued during a frame
        pub fn play_events(&self, events: impl IntoIterator<Item = GameEvent>) {
            for event in events {
                self.play(event.into());
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = VOLUME;
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::BrickBreak => self.play_brick_break(ctx, vol),
                SoundEffect::GameStart => self.play_game_start(ctx, vol),
                SoundEffect::WallBounce => self.play_wall_bounce(ctx, vol),
                SoundEffect::PaddleBounce => self.play_paddle_bounce(ctx, vol),
                SoundEffect::Loss => self.play_loss(ctx, vol),
                SoundEffect::Win => self.play_win(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Notes played one after another, each with its own decay
        fn play_arpeggio(
            &self,
            ctx: &AudioContext,
            vol: f32,
            notes: &[f32],
            spacing: f64,
            decay: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * spacing;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + decay)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + decay + 0.1).ok();
            }
        }

        /// Brick break - short crack with a low body
        fn play_brick_break(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                    .ok();
                osc.frequency().set_value_at_time(900.0, t).ok();
                osc.frequency().set_value_at_time(1400.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(600.0, t + 0.04).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        /// Game start - whoosh up
        fn play_game_start(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Wall bounce - higher ping
        fn play_wall_bounce(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Paddle bounce - solid thump
        fn play_paddle_bounce(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Loss - sad descending
        fn play_loss(&self, ctx: &AudioContext, vol: f32) {
            self.play_arpeggio(
                ctx,
                vol * 0.3,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                0.3,
                OscillatorType::Sine,
            );
        }

        /// Win - fanfare
        fn play_win(&self, ctx: &AudioContext, vol: f32) {
            self.play_arpeggio(
                ctx,
                vol * 0.25,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                0.25,
                OscillatorType::Triangle,
            );
        }
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use super::{SoundEffect, VOLUME};
    use crate::sim::GameEvent;

    /// Stand-in without an output device; cues are logged at trace level
    #[derive(Debug, Default)]
    pub struct AudioManager {
        played: usize,
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn resume(&self) {}

        pub fn play_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
            for event in events {
                self.play(event.into());
            }
        }

        pub fn play(&mut self, effect: SoundEffect) {
            self.played += 1;
            log::trace!("cue {effect:?} at volume {VOLUME:.2}");
        }

        /// Cues played so far
        pub fn played(&self) -> usize {
            self.played
        }
    }
}
