//! Particle field engine.
//!
//! A fixed population drifts across the viewport, bounces off its edges and is
//! pulled towards the pointer when close. Each tick also rebuilds the
//! proximity graph used to draw connecting lines. The engine never reads the
//! pointer on its own: hosts pass the latest sample into `tick`, usually taken
//! from a [`PointerFeed`] that input handlers write to.

use crate::config::FieldConfig;
use crate::constants::{LAYER_OPACITY_DARK, LAYER_OPACITY_LIGHT};
use crate::proximity::{proximity_edges, ProximityEdge};
use glam::Vec2;
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

/// Size of the simulated area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative or non-finite extents collapse to zero.
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
}

/// Page colour scheme. Only changes how strongly the layer is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[inline]
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    #[inline]
    pub fn layer_opacity(self) -> f32 {
        match self {
            Theme::Dark => LAYER_OPACITY_DARK,
            Theme::Light => LAYER_OPACITY_LIGHT,
        }
    }
}

/// Last-write-wins pointer slot shared between input handlers and the tick.
#[derive(Clone, Debug, Default)]
pub struct PointerFeed(Rc<Cell<Option<Vec2>>>);

impl PointerFeed {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set(&self, x: f32, y: f32) {
        self.0.set(Some(Vec2::new(x, y)));
    }

    #[inline]
    pub fn clear(&self) {
        self.0.set(None);
    }

    #[inline]
    pub fn latest(&self) -> Option<Vec2> {
        self.0.get()
    }
}

/// Borrowed view of one tick's output.
#[derive(Clone, Copy, Debug)]
pub struct FieldSnapshot<'a> {
    pub particles: &'a [Particle],
    pub edges: &'a [ProximityEdge],
    pub viewport: Viewport,
    pub theme: Theme,
    pub layer_opacity: f32,
    pub tick: u64,
}

impl FieldSnapshot<'_> {
    /// Particles are kept sorted by id.
    pub fn particle(&self, id: u32) -> Option<&Particle> {
        self.particles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.particles[i])
    }
}

pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    edges: Vec<ProximityEdge>,
    theme: Theme,
    ticks: u64,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let span = config.spawn_speed_span;
        let (size_lo, size_hi) = config.size_range;
        let (alpha_lo, alpha_hi) = config.opacity_range;
        // gen::<f32>() is in [0, 1); scaling keeps a zero-size viewport valid
        let particles = (0..config.particle_count)
            .map(|i| Particle {
                id: i as u32,
                position: Vec2::new(
                    rng.gen::<f32>() * viewport.width,
                    rng.gen::<f32>() * viewport.height,
                ),
                velocity: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * span,
                    (rng.gen::<f32>() - 0.5) * span,
                ),
                size: size_lo + rng.gen::<f32>() * (size_hi - size_lo),
                opacity: alpha_lo + rng.gen::<f32>() * (alpha_hi - alpha_lo),
            })
            .collect::<Vec<_>>();
        log::debug!(
            "[field] spawned {} particles in {:.0}x{:.0}",
            particles.len(),
            viewport.width,
            viewport.height
        );
        Self::from_particles(config, viewport, particles)
    }

    /// Build a field from an explicit population. Ids must be unique.
    pub fn from_particles(
        config: FieldConfig,
        viewport: Viewport,
        mut particles: Vec<Particle>,
    ) -> Self {
        particles.sort_unstable_by_key(|p| p.id);
        debug_assert!(
            particles.windows(2).all(|w| w[0].id != w[1].id),
            "particle ids must be unique"
        );
        let mut field = Self {
            config,
            viewport,
            particles,
            edges: Vec::new(),
            theme: Theme::default(),
            ticks: 0,
        };
        field.rebuild_edges();
        field
    }

    /// Advance every particle by one step. `pointer` is the latest pointer
    /// sample in viewport space, or `None` when there is none yet.
    pub fn tick(&mut self, pointer: Option<Vec2>) {
        self.ticks += 1;
        if self.viewport.is_empty() {
            self.edges.clear();
            return;
        }
        let extent = self.viewport.extent();
        for p in &mut self.particles {
            step_particle(p, extent, pointer, &self.config);
        }
        self.rebuild_edges();
    }

    /// Takes effect on the next tick, which clamps anything left outside.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!(
                "[field] viewport {:.0}x{:.0} -> {:.0}x{:.0}",
                self.viewport.width,
                self.viewport.height,
                viewport.width,
                viewport.height
            );
            self.viewport = viewport;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn snapshot(&self) -> FieldSnapshot<'_> {
        FieldSnapshot {
            particles: &self.particles,
            edges: &self.edges,
            viewport: self.viewport,
            theme: self.theme,
            layer_opacity: self.theme.layer_opacity(),
            tick: self.ticks,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn edges(&self) -> &[ProximityEdge] {
        &self.edges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    fn rebuild_edges(&mut self) {
        if self.viewport.is_empty() {
            self.edges.clear();
            return;
        }
        proximity_edges(&self.particles, &self.config, &mut self.edges);
    }
}

/// One integration step: move, bounce, attract, clamp, damp, commit.
///
/// Attraction is measured from the position after the boundary clamp, which is
/// where the particle is actually committed.
pub fn step_particle(p: &mut Particle, extent: Vec2, pointer: Option<Vec2>, cfg: &FieldConfig) {
    let mut next = p.position + p.velocity;
    reflect_axis(&mut next.x, &mut p.velocity.x, extent.x);
    reflect_axis(&mut next.y, &mut p.velocity.y, extent.y);

    if let Some(target) = pointer {
        let delta = target - next;
        let d = delta.length();
        if d > 0.0 && d < cfg.attraction_radius {
            let force = (cfg.attraction_radius - d) / cfg.attraction_divisor;
            p.velocity += delta / d * force;
        }
    }

    let max = Vec2::splat(cfg.max_velocity);
    p.velocity = p.velocity.clamp(-max, max);
    p.velocity *= cfg.damping;
    p.position = next;
}

#[inline]
fn reflect_axis(coord: &mut f32, vel: &mut f32, extent: f32) {
    if *coord <= 0.0 || *coord >= extent {
        *vel = -*vel;
        *coord = coord.max(0.0).min(extent);
    }
}
