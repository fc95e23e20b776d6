//! Offline replay of the mood engine over virtual time.
//!
//! Samples at a fixed step like the live session does, but with no timers
//! and no terminal, so a whole 60 second escalation runs instantly.

use serde::Serialize;

use crate::engine::{EntropySource, Gesture, MoodEngine, Signals, TickOutcome};

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: SimulationEvent,
    pub signals: Signals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    Tick { outcome: TickOutcome },
    Interaction { gesture: Gesture, accepted: bool },
}

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Last sample time (inclusive)
    pub until_ms: u64,
    /// Sampler period
    pub step_ms: u64,
    /// Attention gestures, applied before the sample at the same time
    pub interactions: Vec<u64>,
    /// Spawn one particle per sample when the mood allows it
    pub particles: bool,
}

impl Simulation {
    /// Run and return every step that changed the engine.
    pub fn run(&self, entropy: &mut dyn EntropySource) -> Vec<SimulationStep> {
        let mut engine = MoodEngine::new(0);
        let mut steps = Vec::new();
        let mut interactions = self.interactions.clone();
        interactions.sort_unstable();
        let mut pending = interactions.into_iter().peekable();

        let step = self.step_ms.max(1);
        let mut now = 0;
        while now <= self.until_ms {
            while let Some(at) = pending.next_if(|&at| at <= now) {
                let accepted = engine.interact(Gesture::Attention, at);
                steps.push(SimulationStep {
                    at_ms: at,
                    event: SimulationEvent::Interaction {
                        gesture: Gesture::Attention,
                        accepted,
                    },
                    signals: engine.snapshot(at),
                });
            }

            engine.expire(now);
            let outcome = engine.tick(now, entropy);
            if self.particles {
                engine.spawn_particle(now, entropy);
            }
            if outcome.is_change() {
                steps.push(SimulationStep {
                    at_ms: now,
                    event: SimulationEvent::Tick { outcome },
                    signals: engine.snapshot(now),
                });
            }
            if outcome == TickOutcome::Halted {
                break;
            }
            match now.checked_add(step) {
                Some(next) => now = next,
                None => break,
            }
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ScriptedEntropy, MAX_MOOD};

    fn quiet() -> ScriptedEntropy {
        ScriptedEntropy::constant(0.99)
    }

    #[test]
    fn test_full_escalation() {
        let sim = Simulation {
            until_ms: 70_000,
            step_ms: 500,
            interactions: vec![],
            particles: false,
        };
        let steps = sim.run(&mut quiet());

        let moods: Vec<u8> = steps.iter().map(|s| s.signals.mood).collect();
        assert_eq!(moods, (1..=MAX_MOOD).collect::<Vec<_>>());
        assert_eq!(steps[0].at_ms, 5_500);

        let last = steps.last().unwrap();
        assert_eq!(last.at_ms, 58_500);
        assert!(last.signals.broken);
    }

    #[test]
    fn test_interaction_resets() {
        let sim = Simulation {
            until_ms: 41_000,
            step_ms: 500,
            interactions: vec![35_000],
            particles: true,
        };
        let steps = sim.run(&mut quiet());

        let reset = steps
            .iter()
            .find(|s| matches!(s.event, SimulationEvent::Interaction { .. }))
            .unwrap();
        assert_eq!(reset.at_ms, 35_000);
        assert_eq!(reset.signals.mood, 0);
        assert!(reset.signals.particles.is_empty());

        let last = steps.last().unwrap();
        assert_eq!(last.at_ms, 40_500);
        assert_eq!(last.signals.mood, 1);
    }

    #[test]
    fn test_huge_step_stops_at_end_of_clock() {
        let sim = Simulation {
            until_ms: u64::MAX,
            step_ms: u64::MAX / 2 + 1,
            interactions: vec![],
            particles: true,
        };
        let steps = sim.run(&mut quiet());

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].at_ms, u64::MAX / 2 + 1);
        assert!(steps[0].signals.broken);
    }

    #[test]
    fn test_serializes_as_json_line() {
        let sim = Simulation {
            until_ms: 6_000,
            step_ms: 500,
            interactions: vec![],
            particles: false,
        };
        let steps = sim.run(&mut quiet());
        let json = serde_json::to_string(&steps[0]).unwrap();
        assert!(json.contains(r#""event":"tick""#));
        assert!(json.contains(r#""kind":"changed""#));
        assert!(json.contains(r#""mood":1"#));
    }
}
