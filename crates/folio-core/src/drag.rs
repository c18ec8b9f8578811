//! Drag position controller for the theme track.
//!
//! Maps a 1-D client coordinate onto a normalized position along a track and
//! reports when that position crosses the threshold. The notification is
//! level-triggered: the side is remembered after every applied update and the
//! callback fires only when it changes, however many updates land in between.

use crate::config::DragConfig;

/// Screen extent of the track, re-read by the host for every update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackGeometry {
    pub left: f32,
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

type ThresholdCallback = Box<dyn FnMut(bool)>;

pub struct DragController {
    config: DragConfig,
    active: bool,
    position: f32,
    high_side: bool,
    on_threshold: Option<ThresholdCallback>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        let position = config.initial_position.max(config.min).min(config.max);
        let high_side = position > config.threshold;
        Self {
            config,
            active: false,
            position,
            high_side,
            on_threshold: None,
        }
    }

    /// Register the host callback; it receives the new side (`true` = above
    /// the threshold). Replaces any previous callback.
    pub fn on_threshold_cross(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_threshold = Some(Box::new(callback));
    }

    pub fn begin_drag(&mut self) {
        if !self.active {
            log::debug!("[drag] begin at {:.1}", self.position);
        }
        self.active = true;
    }

    pub fn end_drag(&mut self) {
        if self.active {
            log::debug!("[drag] end at {:.1}", self.position);
        }
        self.active = false;
    }

    /// Apply a pointer sample. Returns the new position when it was applied;
    /// `None` when no gesture is active or the track has no usable width.
    pub fn update_from_pointer(&mut self, client: f32, track: TrackGeometry) -> Option<f32> {
        if !self.active {
            return None;
        }
        if !(track.width.is_finite() && track.width > 0.0) || !client.is_finite() {
            return None;
        }
        let span = self.config.max - self.config.min;
        let relative = client - track.left;
        let mapped = self.config.min + relative / track.width * span;
        self.position = mapped.max(self.config.min).min(self.config.max);
        self.notify_if_crossed();
        Some(self.position)
    }

    /// Touch variant: `first_touch` is the client coordinate of the first
    /// active touch point, `None` when the touch list is empty.
    pub fn update_from_touch(
        &mut self,
        first_touch: Option<f32>,
        track: TrackGeometry,
    ) -> Option<f32> {
        first_touch.and_then(|client| self.update_from_pointer(client, track))
    }

    fn notify_if_crossed(&mut self) {
        let high = self.position > self.config.threshold;
        if high == self.high_side {
            return;
        }
        self.high_side = high;
        log::info!(
            "[drag] crossed threshold at {:.1} -> {}",
            self.position,
            if high { "high" } else { "low" }
        );
        if let Some(cb) = self.on_threshold.as_mut() {
            cb(high);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Side recorded after the last applied update.
    #[inline]
    pub fn is_high_side(&self) -> bool {
        self.high_side
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }
}
