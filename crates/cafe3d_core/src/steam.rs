//! Steam particle field
//!
//! A fixed ensemble of points rising out of the cup. Each frame every point
//! moves by its own constant velocity; points that reach the ceiling are put
//! back at the bottom at a fresh spot inside the footprint.
//!
//! Positions and velocities live in two parallel buffers so the renderer can
//! borrow the positions slice directly.

use cafe3d_math::Vec3;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::clock::Tick;
use crate::producer::{DirtyFlags, DrawList, PointStyle, PointsDraw, Producer};

/// Steam field parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    /// Number of particles
    pub count: usize,
    /// Height at which a particle is recycled
    pub ceiling: f32,
    /// Half-width of the square footprint on x and z
    pub lateral_bound: f32,
    /// Initial heights are sampled in `[0, spread)`; 0 starts every point at the bottom
    pub initial_height_spread: f32,
    /// Horizontal drift per frame is sampled in `[-jitter, jitter)`
    pub lateral_jitter: f32,
    /// Lower bound of the upward speed per frame
    pub rise_min: f32,
    /// Upper bound (exclusive) of the upward speed per frame
    pub rise_max: f32,
    /// Where the field sits in the scene
    pub origin: Vec3,
    pub style: PointStyle,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            count: 50,
            ceiling: 2.0,
            lateral_bound: 0.2,
            initial_height_spread: 0.0,
            lateral_jitter: 0.005,
            rise_min: 0.01,
            rise_max: 0.03,
            origin: Vec3::new(0.0, 0.2, 0.0),
            style: PointStyle::default(),
        }
    }
}

impl SteamConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_initial_height_spread(mut self, spread: f32) -> Self {
        self.initial_height_spread = spread;
        self
    }
}

/// A single particle, copied out of the field's buffers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Sample in `[-bound, bound]`, or 0 for a non-positive bound
fn symmetric<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Sample in `[min, max)`, or `min` when the range is empty
fn half_open<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// The steam point cloud
pub struct SteamParticleField<R: Rng = StdRng> {
    config: SteamConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    rng: R,
    recycled: u64,
}

impl<R: Rng> SteamParticleField<R> {
    /// Create `config.count` particles from `rng`
    ///
    /// The field keeps the generator and uses it for every recycle.
    pub fn initialize(config: SteamConfig, mut rng: R) -> Self {
        let mut positions = Vec::with_capacity(config.count);
        let mut velocities = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let x = symmetric(&mut rng, config.lateral_bound);
            let z = symmetric(&mut rng, config.lateral_bound);
            let y = half_open(&mut rng, 0.0, config.initial_height_spread);
            positions.push(Vec3::new(x, y, z));

            let vx = half_open(&mut rng, -config.lateral_jitter, config.lateral_jitter);
            let vz = half_open(&mut rng, -config.lateral_jitter, config.lateral_jitter);
            let vy = half_open(&mut rng, config.rise_min, config.rise_max);
            velocities.push(Vec3::new(vx, vy, vz));
        }

        Self {
            config,
            positions,
            velocities,
            rng,
            recycled: 0,
        }
    }

    /// Create a field from explicit particles
    ///
    /// `config.count` is replaced by the number of particles given.
    pub fn from_particles(mut config: SteamConfig, particles: &[Particle], rng: R) -> Self {
        config.count = particles.len();
        Self {
            config,
            positions: particles.iter().map(|p| p.position).collect(),
            velocities: particles.iter().map(|p| p.velocity).collect(),
            rng,
            recycled: 0,
        }
    }

    /// Move every particle one step, returning how many were recycled
    ///
    /// The step is per frame, not scaled by frame time.
    pub fn advance_step(&mut self) -> usize {
        let bound = self.config.lateral_bound;
        let ceiling = self.config.ceiling;
        let mut recycled = 0;

        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position += *velocity;
            if position.y >= ceiling {
                // Velocity is kept; only the position restarts
                position.x = symmetric(&mut self.rng, bound);
                position.y = 0.0;
                position.z = symmetric(&mut self.rng, bound);
                recycled += 1;
            }
        }

        self.recycled += recycled as u64;
        recycled
    }

    pub fn config(&self) -> &SteamConfig {
        &self.config
    }

    /// Positions relative to the field's origin
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: *self.positions.get(index)?,
            velocity: *self.velocities.get(index)?,
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        self.positions
            .iter()
            .zip(&self.velocities)
            .map(|(&position, &velocity)| Particle { position, velocity })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total recycles since construction
    pub fn recycled_total(&self) -> u64 {
        self.recycled
    }
}

impl<R: Rng> Producer for SteamParticleField<R> {
    fn name(&self) -> &str {
        "steam"
    }

    fn advance(&mut self, _tick: &Tick) -> DirtyFlags {
        self.advance_step();
        DirtyFlags::POINTS
    }

    fn emit<'a>(&'a self, list: &mut DrawList<'a>) {
        list.push_points(PointsDraw {
            origin: self.config.origin,
            positions: &self.positions,
            style: self.config.style,
        });
    }
}
