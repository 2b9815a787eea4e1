//! Sampled input points and the random point generator

use std::collections::HashSet;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;

/// A sampled input point
///
/// `id` is the insertion-order index from the sampler and exists only for
/// display labeling. Geometric identity is coordinate equality within
/// [`EPSILON`], never id equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub pos: DVec2,
    pub id: u32,
}

impl Point {
    pub fn new(x: f64, y: f64, id: u32) -> Self {
        Self {
            pos: DVec2::new(x, y),
            id,
        }
    }

    /// Coordinate equality within [`EPSILON`]
    #[inline]
    pub fn approx_eq(&self, other: DVec2) -> bool {
        (self.pos.x - other.x).abs() < EPSILON && (self.pos.y - other.y).abs() < EPSILON
    }
}

/// Generate `n` random distinct points within the padded canvas bounds.
///
/// Coordinates are integer-rounded and pairwise distinct; ids are assigned
/// `0..n` in insertion order. Sampling is bounded: if the padded range is
/// empty, or the integer grid is too sparse to yield `n` distinct points in a
/// reasonable number of draws, the result is cut short with a warning rather
/// than looping forever.
pub fn generate_points(
    n: usize,
    width: f64,
    height: f64,
    padding: f64,
    rng: &mut impl Rng,
) -> Vec<Point> {
    let x_range = (width - 2.0 * padding).floor() as i64;
    let y_range = (height - 2.0 * padding).floor() as i64;
    if n == 0 || x_range < 1 || y_range < 1 {
        if n > 0 {
            log::warn!(
                "point sampler: empty range for {width}x{height} canvas with padding {padding}"
            );
        }
        return Vec::new();
    }

    let mut points = Vec::with_capacity(n);
    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(n);

    // Generous retry budget; duplicates are rare for the supported 3..=100
    // point range on any reasonably sized canvas.
    let max_attempts = n * 100 + 1000;
    let mut attempts = 0;

    while points.len() < n && attempts < max_attempts {
        attempts += 1;
        let x = rng.random_range(0..x_range) + padding as i64;
        let y = rng.random_range(0..y_range) + padding as i64;

        if seen.insert((x, y)) {
            points.push(Point::new(x as f64, y as f64, points.len() as u32));
        }
    }

    if points.len() < n {
        log::warn!(
            "point sampler: produced {}/{n} distinct points before hitting the attempt cap",
            points.len()
        );
    }

    points
}
