//! Short-lived decorative particles
//!
//! Particles never touch game logic. They are spawned on events (food eaten,
//! crash) or ambiently behind the menus, drift with their velocity, fall under
//! their own gravity and vanish when their lifetime runs out. The system is
//! capped: a burst that would overflow evicts the oldest particles first.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f32::consts::TAU;

/// Plain RGB triple; the renderer turns it into a terminal colour
pub type Rgb = (u8, u8, u8);

pub const FOOD_PRIMARY: Rgb = (255, 100, 50);
pub const FOOD_SECONDARY: Rgb = (255, 150, 100);
pub const SPARK_WHITE: Rgb = (255, 255, 255);
pub const SNAKE_HEAD: Rgb = (100, 255, 150);
pub const SNAKE_PRIMARY: Rgb = (50, 255, 50);
pub const ACCENT_BLUE: Rgb = (100, 149, 237);

/// Default upper bound on live particles
pub const DEFAULT_CAPACITY: usize = 512;

/// Coordinate space a particle lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Grid cells of the play field
    Field,
    /// Terminal cells of the whole screen
    Screen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub gravity: f32,
    pub color: Rgb,
    pub layer: Layer,
    /// Frames left to live
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Advance one frame; returns false once the particle has expired
    pub fn update(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += self.gravity;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Remaining life in `0.0..=1.0`
    pub fn life_ratio(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Particles shrink as they age
    pub fn glyph(&self) -> &'static str {
        match self.life_ratio() {
            r if r > 0.66 => "●",
            r if r > 0.33 => "•",
            _ => "·",
        }
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Radial burst when the snake crashes, centred on a field cell
    pub fn spawn_explosion(&mut self, x: f32, y: f32, color: Rgb, count: usize) {
        let mut burst = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..TAU);
            let speed = self.rng.gen_range(0.1..0.4);
            let life = self.rng.gen_range(30..=60);
            burst.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                gravity: 0.005,
                color,
                layer: Layer::Field,
                life,
                max_life: life,
            });
        }
        self.push_all(burst);
    }

    /// Sparkles where a piece of food was eaten
    pub fn spawn_food_burst(&mut self, x: f32, y: f32) {
        const COLORS: [Rgb; 3] = [FOOD_PRIMARY, FOOD_SECONDARY, SPARK_WHITE];

        let mut burst = Vec::with_capacity(15);
        for _ in 0..15 {
            let angle = self.rng.gen_range(0.0..TAU);
            let speed = self.rng.gen_range(0.05..0.2);
            let life = self.rng.gen_range(20..=40);
            let color = COLORS[self.rng.gen_range(0..COLORS.len())];
            burst.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                gravity: 0.005,
                color,
                layer: Layer::Field,
                life,
                max_life: life,
            });
        }
        self.push_all(burst);
    }

    /// Occasionally twinkle around the food while it waits to be eaten
    pub fn spawn_food_sparkle(&mut self, x: f32, y: f32) {
        if !self.rng.gen_bool(0.1) {
            return;
        }
        let particle = Particle {
            x: x + self.rng.gen_range(-0.4..=0.4),
            y: y + self.rng.gen_range(-0.4..=0.4),
            vx: self.rng.gen_range(-0.025..0.025),
            vy: self.rng.gen_range(-0.05..0.0),
            gravity: 0.005,
            color: SPARK_WHITE,
            layer: Layer::Field,
            life: 20,
            max_life: 20,
        };
        self.push_all(vec![particle]);
    }

    /// Occasionally release a mote that rises from below the screen
    pub fn spawn_ambient(&mut self, width: u16, height: u16) {
        const COLORS: [Rgb; 3] = [SNAKE_PRIMARY, FOOD_PRIMARY, ACCENT_BLUE];

        if width == 0 || !self.rng.gen_bool(0.05) {
            return;
        }
        let life = self.rng.gen_range(120..=180);
        let color = COLORS[self.rng.gen_range(0..COLORS.len())];
        let particle = Particle {
            x: self.rng.gen_range(0.0..width as f32),
            y: height as f32,
            vx: self.rng.gen_range(-0.15..0.15),
            vy: self.rng.gen_range(-0.3..-0.1),
            gravity: 0.0,
            color,
            layer: Layer::Screen,
            life,
            max_life: life,
        };
        self.push_all(vec![particle]);
    }

    /// Age every particle by one frame and drop the expired ones
    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::update);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    fn push_all(&mut self, mut incoming: Vec<Particle>) {
        if incoming.len() > self.capacity {
            let skip = incoming.len() - self.capacity;
            incoming.drain(..skip);
        }
        let overflow = (self.particles.len() + incoming.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.particles.drain(..overflow);
        }
        self.particles.extend(incoming);
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(life: u32) -> Particle {
        Particle {
            x: 1.0,
            y: 1.0,
            vx: 0.5,
            vy: -0.5,
            gravity: 0.1,
            color: SPARK_WHITE,
            layer: Layer::Field,
            life,
            max_life: life,
        }
    }

    #[test]
    fn test_particle_moves_and_falls() {
        let mut p = particle(10);
        assert!(p.update());
        assert_eq!(p.x, 1.5);
        assert_eq!(p.y, 0.5);
        assert!((p.vy - (-0.4)).abs() < 1e-6);
        assert_eq!(p.life, 9);
    }

    #[test]
    fn test_particle_expires_after_lifetime() {
        let mut p = particle(3);
        assert!(p.update());
        assert!(p.update());
        assert!(!p.update());
        assert_eq!(p.life_ratio(), 0.0);
    }

    #[test]
    fn test_glyph_shrinks_with_age() {
        let mut p = particle(9);
        assert_eq!(p.glyph(), "●");
        p.life = 4;
        assert_eq!(p.glyph(), "•");
        p.life = 1;
        assert_eq!(p.glyph(), "·");
    }

    #[test]
    fn test_system_empties_after_longest_lifetime() {
        let mut system = ParticleSystem::with_seed(256, 3);
        system.spawn_explosion(5.0, 5.0, SNAKE_HEAD, 25);
        system.spawn_food_burst(2.0, 2.0);
        assert_eq!(system.len(), 40);

        for _ in 0..60 {
            system.update();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut system = ParticleSystem::with_seed(30, 11);
        for _ in 0..10 {
            system.spawn_food_burst(0.0, 0.0);
            assert!(system.len() <= 30);
        }
        system.spawn_explosion(0.0, 0.0, SNAKE_HEAD, 100);
        assert_eq!(system.len(), 30);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut system = ParticleSystem::with_seed(20, 5);
        system.spawn_food_burst(0.0, 0.0);
        system.spawn_explosion(9.0, 9.0, SNAKE_HEAD, 10);

        // 15 + 10 = 25, so the five oldest food sparks were dropped.
        assert_eq!(system.len(), 20);
        let food_sparks = system.iter().filter(|p| p.color != SNAKE_HEAD).count();
        assert_eq!(food_sparks, 10);
    }

    #[test]
    fn test_ambient_particles_rise_on_screen_layer() {
        let mut system = ParticleSystem::with_seed(64, 21);
        for _ in 0..2000 {
            system.spawn_ambient(80, 24);
        }
        assert!(!system.is_empty());
        assert!(system
            .iter()
            .all(|p| p.layer == Layer::Screen && p.vy < 0.0 && p.y == 24.0));
    }

    #[test]
    fn test_food_sparkles_stay_near_food() {
        let mut system = ParticleSystem::with_seed(64, 9);
        for _ in 0..500 {
            system.spawn_food_sparkle(4.5, 3.5);
        }
        // Roughly one frame in ten, capped by capacity.
        assert!(system.len() > 10);
        assert!(system.iter().all(|p| {
            p.layer == Layer::Field
                && p.color == SPARK_WHITE
                && (p.x - 4.5).abs() <= 0.41
                && (p.y - 3.5).abs() <= 0.41
        }));
    }

    #[test]
    fn test_clear() {
        let mut system = ParticleSystem::with_seed(64, 1);
        system.spawn_food_burst(1.0, 1.0);
        system.clear();
        assert_eq!(system.len(), 0);
    }
}
