//! Validated tuning parameters for the particle field and the drag track.
//!
//! Defaults reproduce the reference look of the site. Hosts may override
//! individual fields (the web front-end reads a few from `data-*` attributes)
//! and must call `validate` before handing the config to an engine.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} range is empty or inverted: [{min}, {max})")]
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("damping must lie in (0, 1], got {0}")]
    Damping(f32),
    #[error("opacity must lie in (0, 1], got range [{0}, {1})")]
    Opacity(f32, f32),
    #[error("threshold {threshold} must lie strictly inside the track [{min}, {max}]")]
    Threshold { threshold: f32, min: f32, max: f32 },
    #[error("initial position {0} lies outside the track")]
    InitialPosition(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub spawn_speed_span: f32,
    pub size_range: (f32, f32),
    pub opacity_range: (f32, f32),
    pub attraction_radius: f32,
    pub attraction_divisor: f32,
    pub max_velocity: f32,
    pub damping: f32,
    pub link_distance: f32,
    pub link_max_opacity: f32,
    pub grid_scan_min_particles: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            spawn_speed_span: SPAWN_SPEED_SPAN,
            size_range: (SIZE_MIN, SIZE_MAX),
            opacity_range: (OPACITY_MIN, OPACITY_MAX),
            attraction_radius: ATTRACTION_RADIUS,
            attraction_divisor: ATTRACTION_DIVISOR,
            max_velocity: MAX_VELOCITY,
            damping: VELOCITY_DAMPING,
            link_distance: LINK_DISTANCE,
            link_max_opacity: LINK_MAX_OPACITY,
            grid_scan_min_particles: GRID_SCAN_MIN_PARTICLES,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn_speed_span", self.spawn_speed_span)?;
        positive("attraction_radius", self.attraction_radius)?;
        positive("attraction_divisor", self.attraction_divisor)?;
        positive("max_velocity", self.max_velocity)?;
        positive("link_distance", self.link_distance)?;
        positive("link_max_opacity", self.link_max_opacity)?;
        range("size", self.size_range)?;
        positive("size", self.size_range.0)?;
        range("opacity", self.opacity_range)?;
        let (lo, hi) = self.opacity_range;
        if lo <= 0.0 || hi > 1.0 {
            return Err(ConfigError::Opacity(lo, hi));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragConfig {
    pub min: f32,
    pub max: f32,
    pub threshold: f32,
    pub initial_position: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min: TRACK_MIN,
            max: TRACK_MAX,
            threshold: TRACK_THRESHOLD,
            initial_position: TRACK_INITIAL_POSITION,
        }
    }
}

impl DragConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        range("track", (self.min, self.max))?;
        if !(self.threshold > self.min && self.threshold < self.max) {
            return Err(ConfigError::Threshold {
                threshold: self.threshold,
                min: self.min,
                max: self.max,
            });
        }
        if !(self.initial_position >= self.min && self.initial_position <= self.max) {
            return Err(ConfigError::InitialPosition(self.initial_position));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn range(name: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { name, min, max })
    }
}
