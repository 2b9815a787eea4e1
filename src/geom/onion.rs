//! Onion decomposition: peel nested convex hull layers off a point set
//!
//! Each peel consumes the hull vertices and additionally drops points too
//! close to the new hull's edges, so consecutive layers keep visible
//! clearance. The surviving layers feed the maze structurer.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hull::{compute_hull, is_hull_vertex};
use super::maze::{MazeData, build_maze};
use super::point::Point;
use crate::dist_to_segment;
use crate::params::EngineParams;

/// One peeled hull layer, zero-indexed from the outermost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub hull: Vec<Point>,
    pub layer_index: usize,
}

/// Result of a full decomposition run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnionResult {
    pub layers: Vec<Layer>,
    /// Points left over once fewer than 3 remain
    pub inner_points: Vec<Point>,
    /// Center of the innermost hull (or of the leftovers); `None` only when
    /// the input had fewer than 3 points
    pub centroid: Option<DVec2>,
    pub maze: MazeData,
    /// Points dropped by the edge-proximity filter, as opposed to hull
    /// vertices (which are consumed into layers)
    pub removed_points: Vec<Point>,
    /// Every vertex of every layer, outermost first
    pub all_hull_points: Vec<Point>,
}

impl OnionResult {
    /// Number of points dropped by the proximity filter
    pub fn removed_count(&self) -> usize {
        self.removed_points.len()
    }
}

/// Arithmetic mean of a point cloud, origin if empty
pub fn centroid_of(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

/// Peel convex hull layers until fewer than 3 points remain, then derive the
/// maze structure.
///
/// After each peel, the remaining set loses the hull vertices themselves and
/// every point within `params.edge_proximity_threshold` of any hull edge
/// (recorded in `removed_points`). The remaining count strictly decreases by
/// at least 3 per iteration, so the loop is bounded.
pub fn decompose(points: &[Point], params: &EngineParams, rng: &mut impl Rng) -> OnionResult {
    if points.len() < 3 {
        return OnionResult {
            layers: Vec::new(),
            inner_points: points.to_vec(),
            centroid: None,
            maze: build_maze(&[], None, &params.maze, rng),
            removed_points: Vec::new(),
            all_hull_points: Vec::new(),
        };
    }

    let mut layers: Vec<Layer> = Vec::new();
    let mut remaining: Vec<Point> = points.to_vec();
    let mut removed_points: Vec<Point> = Vec::new();
    let mut all_hull_points: Vec<Point> = Vec::new();

    while remaining.len() >= 3 {
        let hull_result = compute_hull(&remaining);
        let hull = hull_result.hull_points;
        if hull.len() < 3 {
            // Degenerate remainder (e.g. all collinear); nothing more to peel
            break;
        }

        all_hull_points.extend(hull.iter().copied());
        layers.push(Layer {
            hull: hull.clone(),
            layer_index: layers.len(),
        });

        let mut next_remaining = Vec::with_capacity(remaining.len());
        let mut dropped_this_layer = 0;
        for p in remaining.iter().filter(|p| !is_hull_vertex(p, &hull)) {
            let too_close = (0..hull.len()).any(|i| {
                let a = hull[i].pos;
                let b = hull[(i + 1) % hull.len()].pos;
                dist_to_segment(p.pos, a, b) < params.edge_proximity_threshold
            });

            if too_close {
                removed_points.push(*p);
                dropped_this_layer += 1;
            } else {
                next_remaining.push(*p);
            }
        }

        log::debug!(
            "layer {}: {} hull vertices, {} points dropped near edges, {} remain",
            layers.len() - 1,
            hull.len(),
            dropped_this_layer,
            next_remaining.len()
        );
        remaining = next_remaining;
    }

    let centroid = if let Some(innermost) = layers.last() {
        let verts: Vec<DVec2> = innermost.hull.iter().map(|p| p.pos).collect();
        centroid_of(&verts)
    } else {
        centroid_of(&remaining.iter().map(|p| p.pos).collect::<Vec<_>>())
    };

    let maze = build_maze(&layers, Some(centroid), &params.maze, rng);

    OnionResult {
        layers,
        inner_points: remaining,
        centroid: Some(centroid),
        maze,
        removed_points,
        all_hull_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::hull::point_in_hull;
    use crate::geom::point::generate_points;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(x, y, i as u32))
            .collect()
    }

    #[test]
    fn test_square_with_center_single_layer() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        let params = EngineParams::new(1.0);
        let mut rng = Pcg32::seed_from_u64(0);

        let result = decompose(&points, &params, &mut rng);
        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.layers[0].hull.len(), 4);
        // Center survives the peel but cannot form another hull alone
        assert_eq!(result.inner_points.len(), 1);
        assert_eq!(result.inner_points[0].pos, DVec2::new(5.0, 5.0));
        assert_eq!(result.removed_count(), 0);
        assert_eq!(result.centroid, Some(DVec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_proximity_filter_drops_near_edge_points() {
        // (5, 0.5) hugs the bottom edge of the square
        let points = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (5.0, 0.5),
            (5.0, 5.0),
        ]);
        let params = EngineParams::new(2.0);
        let mut rng = Pcg32::seed_from_u64(0);

        let result = decompose(&points, &params, &mut rng);
        assert_eq!(result.removed_count(), 1);
        assert_eq!(result.removed_points[0].pos, DVec2::new(5.0, 0.5));
        assert_eq!(result.inner_points.len(), 1);
    }

    #[test]
    fn test_fewer_than_three_points() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0)]);
        let mut rng = Pcg32::seed_from_u64(0);
        let result = decompose(&points, &EngineParams::default(), &mut rng);

        assert!(result.layers.is_empty());
        assert_eq!(result.inner_points, points);
        assert_eq!(result.centroid, None);
        assert!(result.maze.edges_to_keep.is_empty());
    }

    #[test]
    fn test_layers_nest() {
        let mut rng = Pcg32::seed_from_u64(123);
        let points = generate_points(80, 900.0, 600.0, 50.0, &mut rng);
        let result = decompose(&points, &EngineParams::default(), &mut rng);

        assert!(result.layers.len() >= 2, "expected multiple layers");
        for pair in result.layers.windows(2) {
            let (outer, inner) = (&pair[0], &pair[1]);
            for v in &inner.hull {
                assert!(
                    point_in_hull(v.pos, &outer.hull),
                    "layer {} vertex {:?} outside layer {}",
                    inner.layer_index,
                    v.pos,
                    outer.layer_index
                );
            }
        }
    }

    #[test]
    fn test_point_conservation() {
        let mut rng = Pcg32::seed_from_u64(77);
        let points = generate_points(60, 900.0, 600.0, 50.0, &mut rng);
        let result = decompose(&points, &EngineParams::default(), &mut rng);

        let hull_total: usize = result.layers.iter().map(|l| l.hull.len()).sum();
        assert_eq!(hull_total, result.all_hull_points.len());
        assert_eq!(
            hull_total + result.removed_count() + result.inner_points.len(),
            points.len()
        );
    }

    #[test]
    fn test_gap_exclusivity_across_pipeline() {
        let mut rng = Pcg32::seed_from_u64(31);
        let points = generate_points(70, 900.0, 600.0, 50.0, &mut rng);
        let result = decompose(&points, &EngineParams::default(), &mut rng);

        assert_eq!(result.maze.gaps.len(), result.layers.len());
        for layer in &result.layers {
            let removed = result
                .maze
                .edges_to_remove
                .iter()
                .filter(|e| e.layer_index == layer.layer_index)
                .count();
            assert_eq!(removed, 1, "layer {} gap count", layer.layer_index);
        }
    }

    #[test]
    fn test_centroid_of() {
        assert_eq!(centroid_of(&[]), DVec2::ZERO);
        let square = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ];
        assert_eq!(centroid_of(&square), DVec2::new(5.0, 5.0));
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs: the whole pipeline must agree bit for bit
        let run = |seed: u64| {
            let mut rng = crate::engine_rng(seed);
            let points = generate_points(50, 900.0, 600.0, 50.0, &mut rng);
            decompose(&points, &EngineParams::default(), &mut rng)
        };
        assert_eq!(run(2024), run(2024));
    }

    #[test]
    fn test_maze_data_serializes() {
        let mut rng = Pcg32::seed_from_u64(9);
        let points = generate_points(40, 900.0, 600.0, 50.0, &mut rng);
        let result = decompose(&points, &EngineParams::default(), &mut rng);

        // Consumers take this over a JSON boundary; the shape must survive
        let json = serde_json::to_string(&result.maze).unwrap();
        let back: MazeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result.maze);
    }
}
