//! Ornamental particles that swarm around the pet once it gets annoyed.

use serde::{Deserialize, Serialize};

use super::entropy::EntropySource;

/// Most particles alive at once.
pub const MAX_PARTICLES: usize = 40;

/// Particles only appear from this mood up.
pub const PARTICLE_MIN_MOOD: u8 = 3;

const SPAWN_BASE_MS: f64 = 600.0;
const MAX_INTENSITY: f64 = 12.0;
const LIFETIME_MIN_MS: u64 = 1_000;
const LIFETIME_SPREAD_MS: u64 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleColor {
    Red,
    Orange,
    Yellow,
    Purple,
}

impl ParticleColor {
    const PALETTE: [Self; 4] = [Self::Red, Self::Orange, Self::Yellow, Self::Purple];

    fn pick(roll: f64) -> Self {
        let index = ((roll * Self::PALETTE.len() as f64) as usize).min(Self::PALETTE.len() - 1);
        Self::PALETTE[index]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    /// Horizontal position, percent of the scene width
    pub x: f64,
    /// Vertical position, percent of the scene height
    pub y: f64,
    pub size: f64,
    pub color: ParticleColor,
    pub spawned_at_ms: u64,
    pub lifetime_ms: u64,
}

impl Particle {
    pub fn expires_at_ms(&self) -> u64 {
        self.spawned_at_ms.saturating_add(self.lifetime_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms().saturating_sub(now_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms()
    }
}

/// Consumer-facing view of a particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub id: u64,
    pub position: (f64, f64),
    pub size: f64,
    pub color: ParticleColor,
    pub remaining_lifetime_ms: u64,
}

/// Spawn intensity for a mood: `min(mood * 1.5, 12)`.
pub fn intensity(mood: u8) -> f64 {
    (f64::from(mood) * 1.5).min(MAX_INTENSITY)
}

/// Milliseconds between spawns at `mood`, or `None` when the field is idle.
pub fn spawn_interval_ms(mood: u8) -> Option<u64> {
    if mood < PARTICLE_MIN_MOOD {
        return None;
    }
    Some((SPAWN_BASE_MS / intensity(mood)).round() as u64)
}

/// Bounded set of live particles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add one particle sized for `mood`. Returns `None` when the field is full.
    pub fn spawn(
        &mut self,
        now_ms: u64,
        mood: u8,
        entropy: &mut dyn EntropySource,
    ) -> Option<&Particle> {
        if self.particles.len() >= MAX_PARTICLES {
            return None;
        }

        let x = entropy.roll() * 100.0;
        let y = entropy.roll() * 100.0;
        let color = ParticleColor::pick(entropy.roll());
        let size = entropy.roll() * (2.0 + f64::from(mood) * 0.6) + 2.0;
        // truncate the spread alone so a roll just under 1.0 stays below the max
        let spread = (entropy.roll() * LIFETIME_SPREAD_MS as f64) as u64;
        let lifetime_ms = LIFETIME_MIN_MS + spread.min(LIFETIME_SPREAD_MS - 1);

        self.next_id += 1;
        self.particles.push(Particle {
            id: self.next_id,
            x,
            y,
            size,
            color,
            spawned_at_ms: now_ms,
            lifetime_ms,
        });
        self.particles.last()
    }

    /// Drop expired particles, returning how many were removed.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now_ms));
        before - self.particles.len()
    }

    /// Earliest expiry among live particles.
    pub fn next_expiry_ms(&self) -> Option<u64> {
        self.particles.iter().map(Particle::expires_at_ms).min()
    }

    pub fn views(&self, now_ms: u64) -> Vec<ParticleView> {
        self.particles
            .iter()
            .map(|p| ParticleView {
                id: p.id,
                position: (p.x, p.y),
                size: p.size,
                color: p.color,
                remaining_lifetime_ms: p.remaining_ms(now_ms),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entropy::ScriptedEntropy;

    #[test]
    fn test_spawn_interval() {
        assert_eq!(spawn_interval_ms(0), None);
        assert_eq!(spawn_interval_ms(2), None);
        // 600 / 4.5
        assert_eq!(spawn_interval_ms(3), Some(133));
        assert_eq!(spawn_interval_ms(4), Some(100));
        // intensity caps at 12 from mood 8
        assert_eq!(spawn_interval_ms(8), Some(50));
        assert_eq!(spawn_interval_ms(10), Some(50));
    }

    #[test]
    fn test_spawn_uses_rolls() {
        let mut field = ParticleField::new();
        let mut entropy = ScriptedEntropy::new([0.5, 0.25, 0.8, 0.0, 1.0 - f64::EPSILON], 0.0);
        let particle = field.spawn(1_000, 5, &mut entropy).cloned();
        let particle = particle.expect("field has room");

        assert_eq!(particle.id, 1);
        assert!((particle.x - 50.0).abs() < 1e-9);
        assert!((particle.y - 25.0).abs() < 1e-9);
        assert_eq!(particle.color, ParticleColor::Purple);
        assert!((particle.size - 2.0).abs() < 1e-9);
        assert_eq!(particle.lifetime_ms, 2_499);
    }

    #[test]
    fn test_lifetime_stays_below_max() {
        let mut field = ParticleField::new();
        for roll in [1.0 - f64::EPSILON / 2.0, 1.0 - f64::EPSILON, 1.0] {
            let mut entropy = ScriptedEntropy::constant(roll);
            let lifetime = field.spawn(0, 3, &mut entropy).map(|p| p.lifetime_ms);
            assert_eq!(lifetime, Some(2_499));
        }

        let mut entropy = ScriptedEntropy::constant(0.0);
        assert_eq!(field.spawn(0, 3, &mut entropy).map(|p| p.lifetime_ms), Some(1_000));
    }

    #[test]
    fn test_capacity() {
        let mut field = ParticleField::new();
        let mut entropy = ScriptedEntropy::constant(0.5);
        for _ in 0..100 {
            field.spawn(0, 8, &mut entropy);
        }
        assert_eq!(field.len(), MAX_PARTICLES);
        assert!(field.spawn(0, 8, &mut entropy).is_none());
    }

    #[test]
    fn test_expire() {
        let mut field = ParticleField::new();
        // lifetimes 1000 and 1750
        let mut entropy = ScriptedEntropy::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5], 0.0);
        field.spawn(0, 3, &mut entropy);
        field.spawn(0, 3, &mut entropy);

        assert_eq!(field.next_expiry_ms(), Some(1_000));
        assert_eq!(field.expire(999), 0);
        assert_eq!(field.expire(1_000), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.views(1_500)[0].remaining_lifetime_ms, 250);
    }
}
