// Host-side tests for the proximity graph.

use folio_core::constants::{LINK_DISTANCE, LINK_MAX_OPACITY};
use folio_core::{
    grid_edges, link_opacity, pairwise_edges, FieldConfig, Particle, ParticleField, Viewport,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn at(id: u32, x: f32, y: f32) -> Particle {
    Particle {
        id,
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        size: 1.0,
        opacity: 0.2,
    }
}

fn field_of(particles: Vec<Particle>) -> ParticleField {
    ParticleField::from_particles(FieldConfig::default(), Viewport::new(1000.0, 1000.0), particles)
}

#[test]
fn edge_just_inside_link_distance() {
    let field = field_of(vec![at(0, 100.0, 100.0), at(1, 219.0, 100.0)]);
    let edges = field.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].a, edges[0].b), (0, 1));
    let expected = (1.0 / 120.0) * 0.2;
    assert!(
        (edges[0].opacity - expected).abs() < 1e-6,
        "opacity {}",
        edges[0].opacity
    );
}

#[test]
fn no_edge_at_or_beyond_link_distance() {
    let at_limit = field_of(vec![at(0, 100.0, 100.0), at(1, 220.0, 100.0)]);
    assert!(at_limit.edges().is_empty());
    let beyond = field_of(vec![at(0, 100.0, 100.0), at(1, 400.0, 100.0)]);
    assert!(beyond.edges().is_empty());
}

#[test]
fn coincident_particles_get_full_opacity() {
    let field = field_of(vec![at(0, 50.0, 50.0), at(1, 50.0, 50.0)]);
    assert_eq!(field.edges().len(), 1);
    assert!((field.edges()[0].opacity - LINK_MAX_OPACITY).abs() < 1e-6);
}

#[test]
fn link_opacity_fades_linearly() {
    assert_eq!(link_opacity(0.0, 120.0, 0.2), Some(0.2));
    let half = link_opacity(60.0, 120.0, 0.2).unwrap_or_default();
    assert!((half - 0.1).abs() < 1e-6);
    assert_eq!(link_opacity(120.0, 120.0, 0.2), None);
    assert_eq!(link_opacity(500.0, 120.0, 0.2), None);
}

#[test]
fn edges_are_unique_and_ordered() {
    // a tight cluster where everything links to everything
    let particles: Vec<Particle> = (0..6).map(|i| at(i, 10.0 + i as f32, 10.0)).collect();
    let field = field_of(particles);
    let edges = field.edges();
    assert_eq!(edges.len(), 6 * 5 / 2);
    let mut seen = HashSet::new();
    for e in edges {
        assert!(e.a < e.b);
        assert!(seen.insert((e.a, e.b)), "duplicate edge {:?}", (e.a, e.b));
    }
    assert!(edges.windows(2).all(|w| (w[0].a, w[0].b) < (w[1].a, w[1].b)));
}

#[test]
fn ids_not_storage_order_decide_edge_orientation() {
    let mut out = Vec::new();
    pairwise_edges(&[at(9, 0.0, 0.0), at(4, 10.0, 0.0)], 120.0, 0.2, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!((out[0].a, out[0].b), (4, 9));
}

#[test]
fn grid_scan_matches_pairwise_scan() {
    let cfg = FieldConfig {
        particle_count: 400,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(
        cfg,
        Viewport::new(900.0, 700.0),
        &mut StdRng::seed_from_u64(42),
    );
    for step in 0..20 {
        field.tick(Some(Vec2::new(450.0, 350.0)));
        let mut naive = Vec::new();
        pairwise_edges(field.particles(), LINK_DISTANCE, LINK_MAX_OPACITY, &mut naive);
        let mut grid = Vec::new();
        grid_edges(field.particles(), LINK_DISTANCE, LINK_MAX_OPACITY, &mut grid);
        assert_eq!(naive, grid, "scans disagree at step {step}");
        // 400 >= threshold, so the engine itself used the grid
        assert_eq!(field.edges(), grid.as_slice());
    }
}

#[test]
fn grid_handles_particles_on_the_boundary() {
    let particles = vec![
        at(0, 0.0, 0.0),
        at(1, 119.0, 0.0),
        at(2, 240.0, 0.0),
        at(3, 240.0, 119.5),
    ];
    let mut naive = Vec::new();
    pairwise_edges(&particles, 120.0, 0.2, &mut naive);
    let mut grid = Vec::new();
    grid_edges(&particles, 120.0, 0.2, &mut grid);
    assert_eq!(naive, grid);
    let pairs: Vec<(u32, u32)> = grid.iter().map(|e| (e.a, e.b)).collect();
    assert_eq!(pairs, vec![(0, 1), (2, 3)]);
}

#[test]
fn edges_follow_particles_after_tick() {
    let particles = vec![
        Particle {
            velocity: Vec2::new(2.0, 0.0),
            ..at(0, 100.0, 100.0)
        },
        at(1, 225.0, 100.0),
    ];
    let mut field = field_of(particles);
    assert!(field.edges().is_empty());
    field.tick(None);
    // moved 2 units closer: distance 123 -> still no link
    assert!(field.edges().is_empty());
    for _ in 0..5 {
        field.tick(None);
    }
    assert_eq!(field.edges().len(), 1);
}

#[test]
fn grid_survives_vanishing_link_distance() {
    // every far-out particle lands in the clamped edge cell
    let cfg = FieldConfig {
        particle_count: 100,
        link_distance: 1e-30,
        ..FieldConfig::default()
    };
    assert!(cfg.validate().is_ok());
    let field = ParticleField::new(
        cfg,
        Viewport::new(800.0, 600.0),
        &mut StdRng::seed_from_u64(11),
    );
    assert!(field.edges().is_empty());

    let particles = vec![at(0, 799.0, 599.0), at(1, 799.0, 599.0), at(2, 10.0, 20.0)];
    let mut naive = Vec::new();
    pairwise_edges(&particles, 1e-30, 0.2, &mut naive);
    let mut grid = Vec::new();
    grid_edges(&particles, 1e-30, 0.2, &mut grid);
    assert_eq!(naive, grid);
    let pairs: Vec<(u32, u32)> = grid.iter().map(|e| (e.a, e.b)).collect();
    assert_eq!(pairs, vec![(0, 1)]);
}
