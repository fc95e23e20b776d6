//! Mood engine behavior over idle time, driven with explicit timestamps.

use pixel_pal::engine::{
    derive_mood, EntropySource, Gesture, MoodEngine, RngEntropy, ScriptedEntropy, TickOutcome,
    MAX_MOOD, MAX_PARTICLES,
};
use rstest::rstest;

fn quiet() -> ScriptedEntropy {
    ScriptedEntropy::constant(0.99)
}

#[rstest]
#[case(0, 0)]
#[case(4_999, 0)]
#[case(5_000, 0)]
#[case(5_001, 1)]
#[case(10_001, 2)]
#[case(34_001, 6)]
#[case(57_999, 9)]
#[case(58_000, 9)]
#[case(58_001, 10)]
#[case(u64::MAX, 10)]
fn test_mood_boundaries(#[case] elapsed: u64, #[case] expected: u8) {
    assert_eq!(derive_mood(elapsed), expected);
}

#[test]
fn test_ignored_pet_escalates_and_breaks() {
    let mut engine = MoodEngine::new(0);
    let mut entropy = quiet();

    engine.tick(6_000, &mut entropy);
    assert_eq!(engine.mood(), 1);

    assert_eq!(engine.tick(59_000, &mut entropy), TickOutcome::Broke { from: 1 });
    assert_eq!(engine.mood(), MAX_MOOD);
    assert!(engine.is_broken());

    let frozen = engine.clone();
    assert_eq!(engine.tick(59_500, &mut entropy), TickOutcome::Halted);
    assert_eq!(engine, frozen);
}

#[test]
fn test_reset_mid_escalation_restarts_the_clock() {
    let mut engine = MoodEngine::new(0);
    let mut entropy = quiet();

    engine.tick(35_000, &mut entropy);
    assert_eq!(engine.mood(), 6);

    assert!(engine.reset(35_000));
    assert_eq!(engine.mood(), 0);
    assert_eq!(engine.last_interaction_ms(), 35_000);

    engine.tick(40_500, &mut entropy);
    assert_eq!(engine.mood(), 1);
}

#[test]
fn test_broken_pet_ignores_every_gesture() {
    let mut engine = MoodEngine::new(0);
    let mut entropy = quiet();
    engine.tick(60_000, &mut entropy);
    assert!(engine.is_broken());

    let frozen = engine.clone();
    for at in [60_000, 61_000, 1_000_000] {
        assert!(!engine.interact(Gesture::Attention, at));
        assert!(!engine.interact(Gesture::Appease, at));
        assert_eq!(engine.tick(at, &mut entropy), TickOutcome::Halted);
    }
    assert_eq!(engine, frozen);
    assert!(engine.snapshot(61_000).broken);
}

#[test]
fn test_reset_always_clears_flags() {
    let mut entropy = quiet();
    for at in [29_000, 35_000, 41_000, 47_000, 53_000] {
        let mut engine = MoodEngine::new(0);
        engine.tick(at, &mut entropy);
        assert!(engine.reset(at));
        let signals = engine.snapshot(at);
        assert_eq!(signals.mood, 0);
        assert!(!signals.shaking && !signals.glitching && !signals.show_appeasement_prompt);
        assert!((signals.zoom_level - 1.0).abs() < f64::EPSILON);
    }
}

#[test]
fn test_particle_population_is_capped() {
    let mut engine = MoodEngine::new(0);
    let mut entropy = RngEntropy::seeded(9);

    // sample far faster than any real scheduler would
    let mut now = 0;
    while !engine.is_broken() {
        engine.tick(now, &mut entropy);
        for _ in 0..5 {
            engine.spawn_particle(now, &mut entropy);
        }
        assert!(engine.particles().len() <= MAX_PARTICLES);
        engine.expire(now);
        now += 10;
    }
    assert!(engine.particles().is_empty());
}

#[test]
fn test_particles_cleared_when_mood_drops_below_three() {
    let mut engine = MoodEngine::new(0);
    let mut entropy = quiet();
    engine.tick(23_000, &mut entropy);
    for _ in 0..10 {
        engine.spawn_particle(23_000, &mut entropy);
    }
    assert_eq!(engine.particles().len(), 10);

    engine.interact(Gesture::Attention, 23_100);
    assert!(engine.particles().is_empty());
    assert!(!engine.spawn_particle(23_200, &mut entropy));
}

#[test]
fn test_lightning_pulses_then_clears() {
    struct AlwaysStrike;
    impl EntropySource for AlwaysStrike {
        fn roll(&mut self) -> f64 {
            0.0
        }
    }

    let mut engine = MoodEngine::new(0);
    let outcome = engine.tick(34_100, &mut AlwaysStrike);
    assert_eq!(
        outcome,
        TickOutcome::Changed {
            from: 0,
            to: 6,
            lightning: true
        }
    );
    assert!(engine.snapshot(34_100).lightning_flash);
    assert!(engine.snapshot(34_249).lightning_flash);
    assert!(!engine.snapshot(34_250).lightning_flash);
}
