//! Proximity graph between particles.
//!
//! Two scans produce the same edge list: a pairwise scan, which is all the
//! reference population of 30 needs, and a uniform grid with cells as wide as
//! the link distance so each particle only checks its 3x3 neighbourhood.
//! Edges are always emitted once per unordered pair, as `(a, b)` with `a < b`,
//! sorted ascending.

use crate::config::FieldConfig;
use crate::field::Particle;
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityEdge {
    pub a: u32,
    pub b: u32,
    pub opacity: f32,
}

/// Linear fade from `max_opacity` at distance 0 to nothing at `link_distance`.
#[inline]
pub fn link_opacity(distance: f32, link_distance: f32, max_opacity: f32) -> Option<f32> {
    (distance < link_distance).then(|| (link_distance - distance) / link_distance * max_opacity)
}

/// Recompute `out` from scratch for the current particle positions.
pub fn proximity_edges(particles: &[Particle], cfg: &FieldConfig, out: &mut Vec<ProximityEdge>) {
    out.clear();
    if particles.len() >= cfg.grid_scan_min_particles {
        grid_edges(particles, cfg.link_distance, cfg.link_max_opacity, out);
    } else {
        pairwise_edges(particles, cfg.link_distance, cfg.link_max_opacity, out);
    }
}

pub fn pairwise_edges(
    particles: &[Particle],
    link_distance: f32,
    max_opacity: f32,
    out: &mut Vec<ProximityEdge>,
) {
    for (i, p) in particles.iter().enumerate() {
        for q in &particles[i + 1..] {
            push_if_linked(p, q, link_distance, max_opacity, out);
        }
    }
    // particles are normally stored in id order already
    out.sort_unstable_by_key(|e| (e.a, e.b));
}

type Cell = (i32, i32);

/// Kept one short of the `i32` bounds so the 3x3 neighbourhood never
/// overflows; tiny link distances pile far-out particles into the edge cell.
#[inline]
fn cell_of(p: &Particle, cell_size: f32) -> Cell {
    let axis = |v: f32| ((v / cell_size).floor() as i32).clamp(i32::MIN + 1, i32::MAX - 1);
    (axis(p.position.x), axis(p.position.y))
}

pub fn grid_edges(
    particles: &[Particle],
    link_distance: f32,
    max_opacity: f32,
    out: &mut Vec<ProximityEdge>,
) {
    if link_distance.is_nan() || link_distance <= 0.0 {
        return;
    }
    let mut grid: FnvHashMap<Cell, SmallVec<[usize; 8]>> = FnvHashMap::default();
    for (i, p) in particles.iter().enumerate() {
        grid.entry(cell_of(p, link_distance)).or_default().push(i);
    }

    for p in particles {
        let (cx, cy) = cell_of(p, link_distance);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &j in bucket {
                    let q = &particles[j];
                    // each unordered pair is seen from both ends; keep one
                    if q.id > p.id {
                        push_if_linked(p, q, link_distance, max_opacity, out);
                    }
                }
            }
        }
    }
    out.sort_unstable_by_key(|e| (e.a, e.b));
}

#[inline]
fn push_if_linked(
    p: &Particle,
    q: &Particle,
    link_distance: f32,
    max_opacity: f32,
    out: &mut Vec<ProximityEdge>,
) {
    let distance = p.position.distance(q.position);
    if let Some(opacity) = link_opacity(distance, link_distance, max_opacity) {
        let (a, b) = if p.id < q.id { (p.id, q.id) } else { (q.id, p.id) };
        out.push(ProximityEdge { a, b, opacity });
    }
}
