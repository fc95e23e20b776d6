//! Mood Engine - idle time in, mood level and effect flags out.
//!
//! The engine is a plain state reducer: every operation takes the current
//! time in milliseconds, so it never reads a clock and never schedules
//! anything itself. [`crate::session`] owns the timers that drive it.
//!
//! ## Lifecycle
//!
//! - Created calm (`mood = 0`) with the creation time as the last interaction
//! - [`MoodEngine::tick`] re-derives the mood from idle time
//! - [`MoodEngine::reset`] is the user paying attention
//! - Reaching mood 10 latches `broken`; from then on nothing changes

pub mod entropy;
pub mod mood;
pub mod particles;

use serde::{Deserialize, Serialize};

pub use entropy::{EntropySource, RngEntropy, ScriptedEntropy};
pub use mood::{derive_mood, mood_label, status_message, MoodEffects, MAX_MOOD, MOOD_THRESHOLDS_MS};
pub use particles::{ParticleColor, ParticleField, ParticleView, MAX_PARTICLES};

/// How long a lightning flash stays lit.
pub const LIGHTNING_FLASH_MS: u64 = 150;

/// Odds of a flash on entry to a lightning-eligible mood.
pub const LIGHTNING_CHANCE: f64 = 0.4;

/// User gestures that count as attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// The always-available "give attention" action
    Attention,
    /// The emergency appease button, only offered at moods 7 and 8
    Appease,
}

/// Result of a single [`MoodEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickOutcome {
    /// Mood is what it was; nothing touched
    Unchanged { mood: u8 },
    /// Mood moved and the effects for `to` were applied
    Changed { from: u8, to: u8, lightning: bool },
    /// Mood 10 reached; the engine is now broken
    Broke { from: u8 },
    /// Already broken; tick ignored
    Halted,
}

impl TickOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Changed { .. } | Self::Broke { .. })
    }
}

/// Everything a presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub mood: u8,
    pub broken: bool,
    pub shaking: bool,
    pub glitching: bool,
    pub show_appeasement_prompt: bool,
    pub zoom_level: f64,
    pub lightning_flash: bool,
    pub particles: Vec<ParticleView>,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            mood: 0,
            broken: false,
            shaking: false,
            glitching: false,
            show_appeasement_prompt: false,
            zoom_level: 1.0,
            lightning_flash: false,
            particles: Vec::new(),
        }
    }
}

/// The mood escalation state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodEngine {
    last_interaction_ms: u64,
    mood: u8,
    broken: bool,
    effects: MoodEffects,
    lightning_until_ms: Option<u64>,
    particles: ParticleField,
}

impl MoodEngine {
    /// Fresh, calm engine; `now_ms` counts as the last interaction.
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_interaction_ms: now_ms,
            mood: 0,
            broken: false,
            effects: MoodEffects::calm(),
            lightning_until_ms: None,
            particles: ParticleField::new(),
        }
    }

    pub fn mood(&self) -> u8 {
        self.mood
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn last_interaction_ms(&self) -> u64 {
        self.last_interaction_ms
    }

    pub fn effects(&self) -> &MoodEffects {
        &self.effects
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn lightning_flash(&self, now_ms: u64) -> bool {
        self.lightning_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Re-derive the mood from idle time at `now_ms`.
    ///
    /// Effects are applied once per mood change, never per tick. If sampling
    /// stalls across several thresholds the engine lands on the highest one
    /// and the skipped moods' one-time effects never fire.
    pub fn tick(&mut self, now_ms: u64, entropy: &mut dyn EntropySource) -> TickOutcome {
        if self.broken {
            return TickOutcome::Halted;
        }

        let elapsed = now_ms.saturating_sub(self.last_interaction_ms);
        let new_mood = derive_mood(elapsed);
        if new_mood == self.mood {
            tracing::trace!(mood = new_mood, elapsed, "tick: mood unchanged");
            return TickOutcome::Unchanged { mood: new_mood };
        }

        let from = self.mood;
        self.mood = new_mood;

        if new_mood >= MAX_MOOD {
            self.break_down();
            tracing::warn!(from, elapsed, "pet broke after being ignored");
            return TickOutcome::Broke { from };
        }

        self.effects = MoodEffects::for_mood(new_mood);
        if new_mood < particles::PARTICLE_MIN_MOOD {
            self.particles.clear();
        }

        let lightning = self.effects.lightning_eligible && entropy.roll() < LIGHTNING_CHANCE;
        if lightning {
            self.lightning_until_ms = Some(now_ms.saturating_add(LIGHTNING_FLASH_MS));
            tracing::debug!(mood = new_mood, "lightning flash");
        }

        tracing::info!(from, to = new_mood, label = mood_label(new_mood), "mood changed");
        TickOutcome::Changed {
            from,
            to: new_mood,
            lightning,
        }
    }

    /// The user paid attention. Ignored once broken.
    ///
    /// Returns whether the engine was reset.
    pub fn reset(&mut self, now_ms: u64) -> bool {
        if self.broken {
            tracing::debug!("reset ignored: pet is broken");
            return false;
        }

        tracing::info!(from = self.mood, "attention received, mood reset");
        self.mood = 0;
        self.last_interaction_ms = now_ms;
        self.effects = MoodEffects::calm();
        self.lightning_until_ms = None;
        self.particles.clear();
        true
    }

    /// Apply a user gesture. Appease only counts while its prompt is showing.
    pub fn interact(&mut self, gesture: Gesture, now_ms: u64) -> bool {
        match gesture {
            Gesture::Attention => self.reset(now_ms),
            Gesture::Appease if self.effects.show_appeasement_prompt => self.reset(now_ms),
            Gesture::Appease => {
                tracing::debug!(mood = self.mood, "appease ignored: no prompt showing");
                false
            }
        }
    }

    /// Interval between particle spawns, `None` while the field is idle.
    pub fn particle_spawn_interval_ms(&self) -> Option<u64> {
        if self.broken {
            return None;
        }
        particles::spawn_interval_ms(self.mood)
    }

    /// Spawn one particle if the mood calls for it and there is room.
    pub fn spawn_particle(&mut self, now_ms: u64, entropy: &mut dyn EntropySource) -> bool {
        if self.particle_spawn_interval_ms().is_none() {
            return false;
        }
        self.particles.spawn(now_ms, self.mood, entropy).is_some()
    }

    /// Clear a finished lightning flash and drop expired particles.
    ///
    /// Returns whether anything observable changed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        if self.lightning_until_ms.is_some_and(|until| now_ms >= until) {
            self.lightning_until_ms = None;
            changed = true;
        }
        let removed = self.particles.expire(now_ms);
        if removed > 0 {
            tracing::trace!(removed, "particles expired");
            changed = true;
        }
        changed
    }

    /// Earliest pending expiry (lightning or particle).
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.lightning_until_ms, self.particles.next_expiry_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Signals {
        Signals {
            mood: self.mood,
            broken: self.broken,
            shaking: self.effects.shaking,
            glitching: self.effects.glitching,
            show_appeasement_prompt: self.effects.show_appeasement_prompt,
            zoom_level: self.effects.zoom_level,
            lightning_flash: self.lightning_flash(now_ms),
            particles: self.particles.views(now_ms),
        }
    }

    fn break_down(&mut self) {
        self.mood = MAX_MOOD;
        self.broken = true;
        self.effects = MoodEffects::calm();
        self.lightning_until_ms = None;
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> ScriptedEntropy {
        // never below the lightning odds
        ScriptedEntropy::constant(0.99)
    }

    #[test]
    fn test_new_engine_is_calm() {
        let engine = MoodEngine::new(1_000);
        assert_eq!(engine.mood(), 0);
        assert!(!engine.is_broken());
        assert_eq!(engine.last_interaction_ms(), 1_000);
        assert_eq!(engine.snapshot(1_000), Signals::default());
    }

    #[test]
    fn test_tick_is_idempotent() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = quiet();
        assert!(engine.tick(6_000, &mut entropy).is_change());
        let before = engine.clone();
        assert_eq!(engine.tick(6_000, &mut entropy), TickOutcome::Unchanged { mood: 1 });
        assert_eq!(engine, before);
    }

    #[test]
    fn test_skipping_moods_lands_on_highest() {
        let mut engine = MoodEngine::new(0);
        // lightning roll would succeed, but 6 and 7 are skipped entirely
        let mut entropy = ScriptedEntropy::constant(0.0);
        let outcome = engine.tick(47_000, &mut entropy);
        assert_eq!(
            outcome,
            TickOutcome::Changed {
                from: 0,
                to: 8,
                lightning: false
            }
        );
        assert!(engine.effects().show_appeasement_prompt);
        assert!(!engine.lightning_flash(47_000));
    }

    #[test]
    fn test_lightning_on_entry_to_six() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = ScriptedEntropy::new([0.39], 0.99);
        let outcome = engine.tick(34_500, &mut entropy);
        assert_eq!(
            outcome,
            TickOutcome::Changed {
                from: 0,
                to: 6,
                lightning: true
            }
        );
        assert!(engine.lightning_flash(34_600));
        assert_eq!(engine.next_deadline_ms(), Some(34_650));
        assert!(!engine.lightning_flash(34_650));

        assert!(engine.expire(34_650));
        assert!(!engine.expire(34_700));
    }

    #[test]
    fn test_lightning_chance_is_strict() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = ScriptedEntropy::constant(LIGHTNING_CHANCE);
        let outcome = engine.tick(34_500, &mut entropy);
        assert!(matches!(outcome, TickOutcome::Changed { lightning: false, .. }));
    }

    #[test]
    fn test_no_lightning_outside_six_and_seven() {
        let mut entropy = ScriptedEntropy::constant(0.0);
        for at in [5_500, 23_000, 29_000, 46_500, 52_500] {
            let mut engine = MoodEngine::new(0);
            let outcome = engine.tick(at, &mut entropy);
            assert!(
                matches!(outcome, TickOutcome::Changed { lightning: false, .. }),
                "unexpected lightning at {at}ms"
            );
        }
    }

    #[test]
    fn test_break_latches() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = quiet();
        engine.tick(52_500, &mut entropy);
        assert!(engine.effects().glitching);

        assert_eq!(engine.tick(58_001, &mut entropy), TickOutcome::Broke { from: 9 });
        assert!(engine.is_broken());
        assert_eq!(engine.mood(), MAX_MOOD);

        let signals = engine.snapshot(58_001);
        assert!(!signals.shaking && !signals.glitching);
        assert!((signals.zoom_level - 1.0).abs() < f64::EPSILON);

        let frozen = engine.clone();
        assert!(!engine.reset(60_000));
        assert!(!engine.interact(Gesture::Appease, 60_000));
        assert_eq!(engine.tick(120_000, &mut entropy), TickOutcome::Halted);
        assert!(!engine.spawn_particle(120_000, &mut entropy));
        assert_eq!(engine, frozen);
    }

    #[test]
    fn test_reset_clears_effects() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = ScriptedEntropy::constant(0.0);
        engine.tick(40_500, &mut entropy);
        engine.spawn_particle(40_500, &mut entropy);
        assert!(engine.lightning_flash(40_500));
        assert_eq!(engine.particles().len(), 1);

        assert!(engine.reset(40_600));
        let signals = engine.snapshot(40_600);
        assert_eq!(signals, Signals::default());
        assert_eq!(engine.last_interaction_ms(), 40_600);
    }

    #[test]
    fn test_appease_needs_prompt() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = quiet();
        engine.tick(30_000, &mut entropy);
        assert!(!engine.interact(Gesture::Appease, 30_000));
        assert_eq!(engine.mood(), 5);

        engine.tick(41_000, &mut entropy);
        assert_eq!(engine.mood(), 7);
        assert!(engine.interact(Gesture::Appease, 41_000));
        assert_eq!(engine.mood(), 0);
    }

    #[test]
    fn test_particles_follow_mood() {
        let mut engine = MoodEngine::new(0);
        let mut entropy = quiet();
        assert!(!engine.spawn_particle(0, &mut entropy));

        engine.tick(16_500, &mut entropy);
        assert_eq!(engine.mood(), 3);
        assert_eq!(engine.particle_spawn_interval_ms(), Some(133));
        assert!(engine.spawn_particle(16_500, &mut entropy));
        assert!(engine.next_deadline_ms().is_some());

        engine.reset(17_000);
        assert!(engine.particles().is_empty());
        assert_eq!(engine.particle_spawn_interval_ms(), None);
    }
}
