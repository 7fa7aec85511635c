//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Object toggled into the selection
    Select,
    /// Blender motor running
    Blend,
    /// New system or object revealed
    Unlock,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Select => self.play_select(ctx, vol),
            SoundEffect::Blend => self.play_blend(ctx, vol),
            SoundEffect::Unlock => self.play_unlock(ctx, vol),
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

    /// Selection - short high blip
    fn play_select(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Blender motor - three detuned oscillators grinding for 1.2 seconds
    fn play_blend(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        let Ok(master) = ctx.create_gain() else { return };
        master.gain().set_value(vol * 0.3);
        if master.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        // (waveform, start Hz, rev-up Hz, settle Hz, attack gain, sustain gain)
        let voices = [
            (OscillatorType::Sawtooth, 80.0, 120.0, 100.0, 0.1, 0.05),
            (OscillatorType::Square, 160.0, 200.0, 180.0, 0.08, 0.04),
            (OscillatorType::Triangle, 40.0, 60.0, 50.0, 0.15, 0.08),
        ];
        for (waveform, start, rev, settle, attack, sustain) in voices {
            let Ok(osc) = ctx.create_oscillator() else { continue };
            let Ok(gain) = ctx.create_gain() else { continue };
            osc.set_type(waveform);
            if osc.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&master).is_err()
            {
                continue;
            }

            osc.frequency().set_value_at_time(start, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(rev, t + 0.5)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(settle, t + 1.0)
                .ok();

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().linear_ramp_to_value_at_time(attack, t + 0.05).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(sustain, t + 1.0)
                .ok();
            gain.gain().linear_ramp_to_value_at_time(0.001, t + 1.2).ok();

            osc.start().ok();
            osc.stop_with_when(t + 1.2).ok();
        }
    }

    /// Unlock - ascending C5/E5/G5 chime
    fn play_unlock(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 523.25, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(523.25, t).ok();
        osc.frequency().set_value_at_time(659.25, t + 0.1).ok();
        osc.frequency().set_value_at_time(783.99, t + 0.2).ok();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }
}
