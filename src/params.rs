//! Tunable engine parameters
//!
//! Everything a consumer may want to adjust about the decomposition and maze
//! structuring, bundled so call sites stay stable as knobs are added.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Parameters for maze structuring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeParams {
    /// Width of the opening carved into each layer's gap edge
    pub gap_size: f64,
    /// Minimum distance between a carved opening and the edge endpoints.
    /// Edges shorter than `2 * edge_margin + gap_size` lose the whole edge
    /// instead.
    pub edge_margin: f64,
    /// Maze exit position, fixed in canvas coordinates outside all layers
    pub end_position: DVec2,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            gap_size: DEFAULT_GAP_SIZE,
            edge_margin: DEFAULT_EDGE_MARGIN,
            end_position: DEFAULT_END_POSITION,
        }
    }
}

impl MazeParams {
    /// Minimum edge length that still admits a carved opening
    #[inline]
    pub fn min_carvable_edge(&self) -> f64 {
        2.0 * self.edge_margin + self.gap_size
    }
}

/// Parameters for the full decomposition pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Points closer than this to any hull edge are dropped before the next
    /// peel, keeping visual clearance between layers
    pub edge_proximity_threshold: f64,
    /// Maze structuring knobs
    pub maze: MazeParams,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            edge_proximity_threshold: DEFAULT_EDGE_PROXIMITY,
            maze: MazeParams::default(),
        }
    }
}

impl EngineParams {
    pub fn new(edge_proximity_threshold: f64) -> Self {
        Self {
            edge_proximity_threshold,
            maze: MazeParams::default(),
        }
    }
}
