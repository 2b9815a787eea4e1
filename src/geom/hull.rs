//! Convex hull construction via Gift Wrapping (Jarvis March)
//!
//! The tricky part of the engine: walk the hull by repeatedly selecting the
//! most counter-clockwise candidate from the current vertex, recording every
//! finalized edge (for step replay) and every candidate comparison (for
//! fine-grained animation) along the way.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::consts::EPSILON;
use crate::cross;

/// One finalized hull edge, in construction order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub edge: (Point, Point),
    /// Hull vertices accepted so far, including the new edge's endpoint
    pub hull_so_far: Vec<Point>,
    pub step_number: usize,
    pub message: String,
}

/// One candidate comparison during the inner scan
///
/// Only needed for animation replay; correctness never depends on these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStep {
    /// Current hull vertex the scan wraps from
    pub from: Point,
    /// Candidate being examined
    pub to: Point,
    /// Best next vertex found so far
    pub candidate: Point,
    /// Snapshot of the hull at this comparison
    pub current_hull: Vec<Point>,
    /// Cumulative across the whole run, not per wrap iteration
    pub step_number: usize,
}

/// Result of a hull computation
///
/// `hull_points` are in counter-clockwise order starting from the leftmost
/// (then lowest) point, cyclic with no duplicated endpoint. One [`Step`] per
/// hull edge, so `steps.len() == hull_points.len()` whenever a hull exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullResult {
    pub hull_points: Vec<Point>,
    pub steps: Vec<Step>,
    pub all_steps: Vec<CheckStep>,
    /// Set when the wrap failed to close (all-collinear input) and the
    /// result fell back to the two extreme points
    pub degenerate: bool,
}

impl HullResult {
    fn passthrough(points: &[Point]) -> Self {
        Self {
            hull_points: points.to_vec(),
            steps: Vec::new(),
            all_steps: Vec::new(),
            degenerate: false,
        }
    }
}

/// Index of the leftmost point, ties broken by lowest y.
///
/// This point is always on the hull and fixes a deterministic start vertex.
fn leftmost_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = points[best].pos;
        if p.pos.x < b.x || (p.pos.x == b.x && p.pos.y < b.y) {
            best = i;
        }
    }
    best
}

/// Compute the convex hull of a point set.
///
/// Fewer than 3 points: the input is echoed back unchanged with empty step
/// traces, since no hull exists.
///
/// Collinear candidates (cross product within [`EPSILON`]) are resolved by
/// keeping the farthest one, so intermediate collinear points never land on
/// the hull. An input where *every* point is collinear cannot close the wrap
/// normally; the outer loop is capped at `n` iterations and falls back to a
/// degenerate two-point hull of the extreme vertices.
pub fn compute_hull(points: &[Point]) -> HullResult {
    if points.len() < 3 {
        return HullResult::passthrough(points);
    }

    let n = points.len();
    let mut hull: Vec<Point> = Vec::new();
    let mut steps: Vec<Step> = Vec::new();
    let mut all_steps: Vec<CheckStep> = Vec::new();

    let start = leftmost_index(points);
    let mut current = start;

    // A convex hull has at most n vertices; more wrap iterations than that
    // means the walk is not going to close.
    for _ in 0..n {
        hull.push(points[current]);

        let mut next = (current + 1) % n;
        for i in 0..n {
            if i == current {
                continue;
            }

            all_steps.push(CheckStep {
                from: points[current],
                to: points[i],
                candidate: points[next],
                current_hull: hull.clone(),
                step_number: all_steps.len(),
            });

            let turn = cross(points[current].pos, points[next].pos, points[i].pos);
            if turn.abs() < EPSILON {
                // Collinear: keep the farthest candidate so intermediate
                // points get skipped
                let d_i = points[current].pos.distance_squared(points[i].pos);
                let d_next = points[current].pos.distance_squared(points[next].pos);
                if d_i > d_next {
                    next = i;
                }
            } else if turn > 0.0 {
                // i is more counter-clockwise than the current candidate
                next = i;
            }
        }

        let mut hull_so_far = hull.clone();
        hull_so_far.push(points[next]);
        steps.push(Step {
            edge: (points[current], points[next]),
            hull_so_far,
            step_number: steps.len(),
            message: format!(
                "Added edge from ({}, {}) to ({}, {})",
                points[current].pos.x, points[current].pos.y, points[next].pos.x, points[next].pos.y
            ),
        });

        current = next;
        if current == start {
            return HullResult {
                hull_points: hull,
                steps,
                all_steps,
                degenerate: false,
            };
        }
    }

    // Wrap never returned to the start vertex: fully collinear (or otherwise
    // degenerate) input. Report the two extreme points instead of spinning.
    log::warn!("gift wrap failed to close after {n} iterations, returning degenerate hull");
    let lo = points[leftmost_index(points)];
    let hi = points
        .iter()
        .copied()
        .max_by(|a, b| {
            (a.pos.x, a.pos.y)
                .partial_cmp(&(b.pos.x, b.pos.y))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(lo);

    HullResult {
        hull_points: vec![lo, hi],
        steps: Vec::new(),
        all_steps: Vec::new(),
        degenerate: true,
    }
}

/// Whether a point lies inside or on the hull boundary.
///
/// Sign-consistency test: the point is inside iff it sits on the same side of
/// every directed hull edge; near-zero cross products (on the edge) are
/// skipped.
pub fn point_in_hull(p: DVec2, hull: &[Point]) -> bool {
    if hull.len() < 3 {
        return false;
    }

    let mut sign: Option<bool> = None;
    for i in 0..hull.len() {
        let j = (i + 1) % hull.len();
        let c = cross(hull[i].pos, hull[j].pos, p);

        if c.abs() < EPSILON {
            continue;
        }
        match sign {
            None => sign = Some(c > 0.0),
            Some(s) if (c > 0.0) != s => return false,
            _ => {}
        }
    }
    true
}

/// Whether a point coincides with one of the hull's vertices (within
/// [`EPSILON`])
pub fn is_hull_vertex(p: &Point, hull: &[Point]) -> bool {
    hull.iter().any(|v| p.approx_eq(v.pos))
}
