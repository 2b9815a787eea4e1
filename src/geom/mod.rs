//! Deterministic geometry engine
//!
//! All decomposition logic lives here. This module must be pure and
//! deterministic:
//! - Seeded RNG only, injected at every randomized call site
//! - Results are built locally and frozen on return, never mutated after
//! - No rendering or platform dependencies
//!
//! Pipeline: point sampling -> gift-wrapped hull -> onion peeling -> maze
//! structuring (which smooths each layer boundary into Bézier segments).

pub mod curve;
pub mod hull;
pub mod maze;
pub mod onion;
pub mod point;

pub use curve::{CurveSegment, smooth_hull};
pub use hull::{CheckStep, HullResult, Step, compute_hull, is_hull_vertex, point_in_hull};
pub use maze::{Edge, Gap, GapKind, LayerCurves, MazeData, Passage, build_maze};
pub use onion::{Layer, OnionResult, centroid_of, decompose};
pub use point::{Point, generate_points};
