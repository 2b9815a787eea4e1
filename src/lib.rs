//! Onion Maze - convex hull decomposition maze engine
//!
//! Core modules:
//! - `geom`: Deterministic geometry engine (hull construction, onion
//!   peeling, maze structuring, curve smoothing)
//! - `params`: Tunable engine parameters
//!
//! The engine is pure: every function is a deterministic map from its inputs
//! (including an explicitly injected RNG) to immutable result values. All
//! rendering, UI, and export concerns live in external consumers of the
//! output data.

pub mod geom;
pub mod params;

pub use geom::{
    CheckStep, CurveSegment, Edge, Gap, GapKind, HullResult, Layer, LayerCurves, MazeData,
    OnionResult, Passage, Point, Step, build_maze, centroid_of, compute_hull, decompose,
    generate_points, is_hull_vertex, point_in_hull, smooth_hull,
};
pub use params::{EngineParams, MazeParams};

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Construct the engine's deterministic RNG from a run seed.
///
/// Both randomness sources (point sampling, gap-edge selection) take the RNG
/// explicitly, so one seed reproduces an entire pipeline run.
pub fn engine_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Engine configuration constants
pub mod consts {
    use glam::DVec2;

    /// Default canvas bounds for point sampling
    pub const CANVAS_WIDTH: f64 = 900.0;
    pub const CANVAS_HEIGHT: f64 = 600.0;
    /// Padding between sampled points and the canvas border
    pub const CANVAS_PADDING: f64 = 50.0;

    /// Supported point-count range for a full pipeline run
    pub const MIN_POINTS: usize = 3;
    pub const MAX_POINTS: usize = 100;

    /// Collinearity / coordinate-identity tolerance
    pub const EPSILON: f64 = 1e-9;
    /// Tolerance for matching derived gap endpoints against cycle edges
    pub const GAP_MATCH_EPSILON: f64 = 0.1;

    /// Minimum clearance between a layer and the points of the next one
    pub const DEFAULT_EDGE_PROXIMITY: f64 = 15.0;
    /// Width of a carved passage opening
    pub const DEFAULT_GAP_SIZE: f64 = 20.0;
    /// Minimum distance between a carved gap and the edge endpoints
    pub const DEFAULT_EDGE_MARGIN: f64 = 30.0;

    /// Maze exit, anchored near the bottom-left canvas corner
    pub const DEFAULT_END_POSITION: DVec2 = DVec2::new(70.0, 550.0);
}

/// Cross product of vectors OA and OB.
///
/// Positive when O, A, B make a counter-clockwise turn, negative when
/// clockwise, near zero (within [`consts::EPSILON`]) when collinear.
#[inline]
pub fn cross(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a - o).perp_dot(b - o)
}

/// Minimum distance from a point to a line segment.
///
/// Projects onto the segment with the parameter clamped to `[0, 1]`, so
/// endpoints are handled without special casing; a zero-length segment
/// degrades to point distance.
pub fn dist_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < consts::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
