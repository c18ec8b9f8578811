// Host-side tests for constants and their relationships.
// The web crate is wasm-only, so its constants module is included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use folio_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn spawn_ranges_are_well_formed() {
    assert!(SIZE_MIN > 0.0 && SIZE_MIN < SIZE_MAX);
    assert!(OPACITY_MIN > 0.0 && OPACITY_MIN < OPACITY_MAX && OPACITY_MAX <= 1.0);
    assert!(SPAWN_SPEED_SPAN > 0.0);
    // spawn speed is well under the clamp, so spawning never saturates
    assert!(SPAWN_SPEED_SPAN / 2.0 < MAX_VELOCITY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn motion_constants_are_stable() {
    assert!(VELOCITY_DAMPING > 0.0 && VELOCITY_DAMPING < 1.0);
    assert!(ATTRACTION_RADIUS > 0.0);
    // largest single impulse stays below the velocity limit
    assert!(ATTRACTION_RADIUS / ATTRACTION_DIVISOR < MAX_VELOCITY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn link_constants_are_sane() {
    assert!(LINK_DISTANCE > 0.0);
    assert!(LINK_MAX_OPACITY > 0.0 && LINK_MAX_OPACITY <= 1.0);
    assert!(GRID_SCAN_MIN_PARTICLES > PARTICLE_COUNT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn dark_layer_is_stronger_than_light() {
    assert!(LAYER_OPACITY_DARK > LAYER_OPACITY_LIGHT);
    assert!(LAYER_OPACITY_DARK <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn track_constants_are_ordered() {
    assert!(TRACK_MIN < TRACK_THRESHOLD && TRACK_THRESHOLD < TRACK_MAX);
    // page starts in light mode
    assert!(TRACK_INITIAL_POSITION <= TRACK_THRESHOLD);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn web_constants_are_consistent() {
    assert!(MAX_PARTICLE_COUNT >= PARTICLE_COUNT);
    assert!(STATS_LOG_INTERVAL_SEC > 0.0);
    assert!(LINK_LINE_WIDTH > 0.0);
    let ids = [
        FIELD_CANVAS_ID,
        TRACK_ELEMENT_ID,
        MARKER_ELEMENT_ID,
        FILL_ELEMENT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(ATTR_PARTICLE_COUNT.starts_with("data-"));
    assert!(ATTR_LINK_DISTANCE.starts_with("data-"));
    assert_ne!(PRIMARY_LIGHT, PRIMARY_DARK);
}
