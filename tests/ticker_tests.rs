// Host-side tests for the frame loop lifecycle, driven by a manual tick source
// standing in for requestAnimationFrame.

use folio_core::{FieldConfig, Particle, ParticleField, TickLoop, TickSource, Viewport};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared view of what the loop asked the "browser" to do.
#[derive(Default)]
struct Schedule {
    next_id: u32,
    pending: Vec<u32>,
    cancelled: Vec<u32>,
}

#[derive(Clone, Default)]
struct ManualTicks(Rc<RefCell<Schedule>>);

impl TickSource for ManualTicks {
    type Token = u32;

    fn request(&mut self) -> Option<u32> {
        let mut s = self.0.borrow_mut();
        s.next_id += 1;
        let id = s.next_id;
        s.pending.push(id);
        Some(id)
    }

    fn cancel(&mut self, token: u32) {
        let mut s = self.0.borrow_mut();
        s.pending.retain(|&t| t != token);
        s.cancelled.push(token);
    }
}

impl ManualTicks {
    /// Fire every pending callback once, the way a frame would.
    fn fire(&self, lp: &mut TickLoop<ManualTicks>, body: &mut dyn FnMut()) -> usize {
        let due: Vec<u32> = std::mem::take(&mut self.0.borrow_mut().pending);
        due.iter().filter(|_| lp.run_frame(&mut *body)).count()
    }

    fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }
}

#[test]
fn activate_schedules_exactly_one_frame() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    assert_eq!(ticks.pending(), 0);
    lp.activate();
    lp.activate();
    assert_eq!(ticks.pending(), 1);
    assert!(lp.is_active());
    assert!(lp.has_pending());
}

#[test]
fn each_frame_reschedules_while_active() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    lp.activate();
    let mut runs = 0;
    for _ in 0..10 {
        assert_eq!(ticks.fire(&mut lp, &mut || runs += 1), 1);
        assert_eq!(ticks.pending(), 1);
    }
    assert_eq!(runs, 10);
    assert_eq!(lp.frames(), 10);
}

#[test]
fn deactivate_cancels_pending_frame() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    lp.activate();
    lp.deactivate();
    assert_eq!(ticks.pending(), 0);
    assert_eq!(ticks.0.borrow().cancelled, vec![1]);
    assert!(!lp.has_pending());
}

#[test]
fn stale_callback_after_deactivate_runs_nothing() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    lp.activate();
    lp.deactivate();
    // a host that fires a frame anyway, e.g. one already queued
    let mut runs = 0;
    assert!(!lp.run_frame(|| runs += 1));
    assert_eq!(runs, 0);
    assert_eq!(ticks.pending(), 0);
}

#[test]
fn no_particle_moves_after_deactivation() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    let mut field = ParticleField::from_particles(
        FieldConfig::default(),
        Viewport::new(500.0, 500.0),
        vec![Particle {
            id: 0,
            position: Vec2::new(250.0, 250.0),
            velocity: Vec2::new(1.0, 0.5),
            size: 2.0,
            opacity: 0.2,
        }],
    );

    lp.activate();
    for _ in 0..3 {
        ticks.fire(&mut lp, &mut || field.tick(None));
    }
    assert_eq!(field.tick_count(), 3);
    let frozen = field.particles().to_vec();

    lp.deactivate();
    for _ in 0..5 {
        ticks.fire(&mut lp, &mut || field.tick(None));
        assert!(!lp.run_frame(|| field.tick(None)));
    }
    assert_eq!(field.tick_count(), 3);
    assert_eq!(field.particles(), frozen.as_slice());
}

#[test]
fn reactivation_resumes_with_a_single_request() {
    let ticks = ManualTicks::default();
    let mut lp = TickLoop::new(ticks.clone());
    lp.activate();
    lp.deactivate();
    lp.activate();
    assert_eq!(ticks.pending(), 1);
    let mut runs = 0;
    ticks.fire(&mut lp, &mut || runs += 1);
    assert_eq!(runs, 1);
}

#[test]
fn dropping_the_loop_cancels_its_frame() {
    let ticks = ManualTicks::default();
    {
        let mut lp = TickLoop::new(ticks.clone());
        lp.activate();
        assert_eq!(ticks.pending(), 1);
    }
    assert_eq!(ticks.pending(), 0);
}

#[test]
fn refused_request_leaves_nothing_pending() {
    struct Refusing;
    impl TickSource for Refusing {
        type Token = ();
        fn request(&mut self) -> Option<()> {
            None
        }
        fn cancel(&mut self, _token: ()) {}
    }
    let mut lp = TickLoop::new(Refusing);
    lp.activate();
    assert!(lp.is_active());
    assert!(!lp.has_pending());
    lp.deactivate();
    assert!(!lp.is_active());
}
