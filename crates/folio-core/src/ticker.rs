//! Frame scheduling lifecycle.
//!
//! A [`TickSource`] schedules one frame callback at a time (the browser host
//! wraps `requestAnimationFrame`). [`TickLoop`] owns the source and the
//! pending request, so activation and deactivation are an explicit pair:
//! after `deactivate` the pending request is cancelled and any frame callback
//! that still fires runs nothing and schedules nothing.

pub trait TickSource {
    type Token;

    /// Schedule a single future frame. `None` if the host refused.
    fn request(&mut self) -> Option<Self::Token>;

    fn cancel(&mut self, token: Self::Token);
}

pub struct TickLoop<S: TickSource> {
    source: S,
    pending: Option<S::Token>,
    active: bool,
    frames: u64,
}

impl<S: TickSource> TickLoop<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
            active: false,
            frames: 0,
        }
    }

    /// Start requesting frames. Calling it again while active is a no-op.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        if self.pending.is_none() {
            self.pending = self.source.request();
        }
        log::debug!("[frame] loop activated");
    }

    /// Stop the loop and cancel the outstanding request, if any.
    pub fn deactivate(&mut self) {
        if let Some(token) = self.pending.take() {
            self.source.cancel(token);
        }
        if self.active {
            log::debug!("[frame] loop deactivated after {} frames", self.frames);
        }
        self.active = false;
    }

    /// Entry point for the host's frame callback. Runs `body` and schedules
    /// the next frame only while active; returns whether `body` ran.
    pub fn run_frame(&mut self, body: impl FnOnce()) -> bool {
        self.pending = None;
        if !self.active {
            return false;
        }
        body();
        self.frames += 1;
        self.pending = self.source.request();
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: TickSource> Drop for TickLoop<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
