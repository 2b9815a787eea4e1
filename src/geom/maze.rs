//! Maze structuring over onion layers
//!
//! Each layer gets exactly one passage: a random edge either has a small
//! margined opening carved into it, or (when too short for that) loses its
//! whole span. The gap-modified vertex cycle then drives both the wall edge
//! classification and the smoothed boundary curves, so the carved geometry
//! and the rendered curves stay aligned.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::{CurveSegment, smooth_hull};
use super::onion::Layer;
use crate::params::MazeParams;

/// How a layer's passage was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapKind {
    /// A `gap_size` opening carved inside the edge, margins intact
    Carved,
    /// The edge was too short to carve, so the whole edge is the opening
    FullEdge,
}

/// A recorded passage opening in a layer boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub layer_index: usize,
    /// Index of the chosen edge in the layer's original hull
    pub edge_index: usize,
    pub start: DVec2,
    pub end: DVec2,
    pub kind: GapKind,
}

impl Gap {
    pub fn midpoint(&self) -> DVec2 {
        self.start.midpoint(self.end)
    }
}

/// Traversable opening marker, one per layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub from: DVec2,
    pub to: DVec2,
    pub layer_index: usize,
    pub edge_index: usize,
}

impl Passage {
    pub fn midpoint(&self) -> DVec2 {
        self.from.midpoint(self.to)
    }
}

/// One edge of a layer's gap-modified vertex cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: DVec2,
    pub to: DVec2,
    pub layer_index: usize,
    /// Index within the modified cycle (not the original hull)
    pub edge_index: usize,
    pub is_gap: bool,
}

/// Smoothed boundary of one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerCurves {
    pub layer_index: usize,
    pub curves: Vec<CurveSegment>,
    /// The gap-modified vertex cycle the curves were built from
    pub modified_hull: Vec<DVec2>,
    /// Which original hull edge carries the layer's gap
    pub gap_edge_index: usize,
}

/// Complete maze structure derived from the onion layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeData {
    pub edges_to_keep: Vec<Edge>,
    pub edges_to_remove: Vec<Edge>,
    pub passages: Vec<Passage>,
    pub smooth_curves: Vec<LayerCurves>,
    /// Maze entry at the innermost layer's centroid
    pub start_position: Option<DVec2>,
    /// Maze exit, fixed in canvas coordinates outside all layers
    pub end_position: Option<DVec2>,
    pub gaps: Vec<Gap>,
}

impl MazeData {
    fn empty(start: Option<DVec2>) -> Self {
        Self {
            edges_to_keep: Vec::new(),
            edges_to_remove: Vec::new(),
            passages: Vec::new(),
            smooth_curves: Vec::new(),
            start_position: start,
            end_position: None,
            gaps: Vec::new(),
        }
    }
}

/// Build the maze structure for a set of onion layers.
///
/// Per layer, independently:
/// 1. pick a gap edge uniformly at random;
/// 2. carve a [`MazeParams::gap_size`] opening at a uniformly random offset
///    that keeps [`MazeParams::edge_margin`] clearance from both endpoints,
///    or mark the whole edge as the gap when the edge is shorter than
///    [`MazeParams::min_carvable_edge`];
/// 3. classify every edge of the modified cycle as wall or opening;
/// 4. smooth the modified cycle into Bézier segments, flagging the ones that
///    overlap the opening.
pub fn build_maze(
    layers: &[Layer],
    centroid: Option<DVec2>,
    params: &MazeParams,
    rng: &mut impl Rng,
) -> MazeData {
    if layers.is_empty() {
        return MazeData::empty(centroid);
    }

    let mut maze = MazeData::empty(centroid);
    maze.end_position = Some(params.end_position);

    for layer in layers {
        let hull = &layer.hull;
        let n = hull.len();
        let gap_edge_index = rng.random_range(0..n);

        // Vertex cycle with the gap carved in, plus the index of the
        // modified-cycle edge that is the opening
        let mut modified: Vec<DVec2> = Vec::with_capacity(n + 2);
        let mut gap_cycle_index = 0;

        for i in 0..n {
            let current = hull[i].pos;
            let next = hull[(i + 1) % n].pos;

            if i != gap_edge_index {
                modified.push(current);
                continue;
            }

            let edge_len = current.distance(next);
            if edge_len > params.min_carvable_edge() {
                modified.push(current);

                // Uniform offset keeping the opening clear of both endpoints
                let min_t = params.edge_margin / edge_len;
                let max_t = (edge_len - params.edge_margin - params.gap_size) / edge_len;
                let gap_start_t = min_t + rng.random::<f64>() * (max_t - min_t);
                let gap_end_t = gap_start_t + params.gap_size / edge_len;

                let gap_start = current.lerp(next, gap_start_t);
                let gap_end = current.lerp(next, gap_end_t);

                gap_cycle_index = modified.len();
                modified.push(gap_start);
                modified.push(gap_end);

                maze.gaps.push(Gap {
                    layer_index: layer.layer_index,
                    edge_index: i,
                    start: gap_start,
                    end: gap_end,
                    kind: GapKind::Carved,
                });
                maze.passages.push(Passage {
                    from: gap_start,
                    to: gap_end,
                    layer_index: layer.layer_index,
                    edge_index: i,
                });
            } else {
                // Too short to carve with margins; the whole edge opens up
                gap_cycle_index = modified.len();
                modified.push(current);

                maze.gaps.push(Gap {
                    layer_index: layer.layer_index,
                    edge_index: i,
                    start: current,
                    end: next,
                    kind: GapKind::FullEdge,
                });
                maze.passages.push(Passage {
                    from: current,
                    to: next,
                    layer_index: layer.layer_index,
                    edge_index: i,
                });
            }
        }

        log::debug!(
            "layer {}: gap on hull edge {} ({:?})",
            layer.layer_index,
            gap_edge_index,
            maze.gaps.last().map(|g| g.kind)
        );

        // Wall/opening classification over the modified cycle
        let m = modified.len();
        for k in 0..m {
            let edge = Edge {
                from: modified[k],
                to: modified[(k + 1) % m],
                layer_index: layer.layer_index,
                edge_index: k,
                is_gap: k == gap_cycle_index,
            };
            if edge.is_gap {
                maze.edges_to_remove.push(edge);
            } else {
                maze.edges_to_keep.push(edge);
            }
        }

        // Smooth the modified cycle; segments touching the opening keep
        // their index but are flagged out of rendering. Segment k spans the
        // second half of edge k and the first half of edge k+1, so the
        // opening at edge g touches segments g-1 and g.
        let mut curves = smooth_hull(&modified);
        if !curves.is_empty() {
            let before = (gap_cycle_index + m - 1) % m;
            for c in curves.iter_mut() {
                c.is_gap = c.segment_index == gap_cycle_index || c.segment_index == before;
            }
        }
        maze.smooth_curves.push(LayerCurves {
            layer_index: layer.layer_index,
            curves,
            modified_hull: modified,
            gap_edge_index,
        });
    }

    maze
}
