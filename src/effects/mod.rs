pub mod particles;

pub use particles::{Layer, Particle, ParticleSystem, Rgb};
