//! Quadratic Bézier corner rounding for hull boundaries

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One quadratic Bézier piece of a smoothed layer boundary
///
/// `start` and `end` are edge midpoints, `control` is the hull vertex the
/// curve bulges toward. `is_gap` marks segments that overlap a carved
/// passage; renderers skip their strokes but the index stays allocated so
/// segments align with the edge cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub start: DVec2,
    pub control: DVec2,
    pub end: DVec2,
    pub segment_index: usize,
    pub is_gap: bool,
}

/// Round a closed polygon into quadratic Bézier segments.
///
/// For each vertex, the emitted segment runs from the midpoint of the
/// incoming edge to the midpoint of the outgoing edge with the vertex as
/// control point, producing a closed loop that passes through every edge
/// midpoint. Fewer than 3 vertices yields an empty sequence.
pub fn smooth_hull(vertices: &[DVec2]) -> Vec<CurveSegment> {
    if vertices.len() < 3 {
        return Vec::new();
    }

    let n = vertices.len();
    (0..n)
        .map(|i| {
            let p0 = vertices[i];
            let p1 = vertices[(i + 1) % n];
            let p2 = vertices[(i + 2) % n];
            CurveSegment {
                start: p0.midpoint(p1),
                control: p1,
                end: p1.midpoint(p2),
                segment_index: i,
                is_gap: false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_smoothing() {
        let square = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ];
        let curves = smooth_hull(&square);
        assert_eq!(curves.len(), 4);

        // Segment 0: from midpoint of edge 0-1 around vertex 1
        assert_eq!(curves[0].start, DVec2::new(5.0, 0.0));
        assert_eq!(curves[0].control, DVec2::new(10.0, 0.0));
        assert_eq!(curves[0].end, DVec2::new(10.0, 5.0));
    }

    #[test]
    fn test_loop_is_closed() {
        let hull = [
            DVec2::new(0.0, 0.0),
            DVec2::new(30.0, 5.0),
            DVec2::new(40.0, 25.0),
            DVec2::new(15.0, 40.0),
            DVec2::new(-5.0, 20.0),
        ];
        let curves = smooth_hull(&hull);
        assert_eq!(curves.len(), hull.len());

        for i in 0..curves.len() {
            let next = &curves[(i + 1) % curves.len()];
            // Each segment ends exactly where the next one starts
            assert_eq!(curves[i].end, next.start);
            assert_eq!(curves[i].segment_index, i);
        }
    }

    #[test]
    fn test_too_few_vertices() {
        assert!(smooth_hull(&[]).is_empty());
        assert!(smooth_hull(&[DVec2::ZERO, DVec2::new(1.0, 1.0)]).is_empty());
    }
}
