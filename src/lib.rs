//! Decomposition of polygons with holes into uni-y-monotone pieces.
//!
//! Rings go into a [`Geometry`], a [`Trapezoidation`] engine builds the
//! trapezoid graph, and the [`Decomposer`] walks that graph, inserting
//! diagonals until every monotone chain in the store is uni-y-monotone.

pub mod active;
pub mod clean;
pub mod config;
pub mod debug;
pub mod decomposer;
pub mod geometry;
pub mod point;
pub mod scanner;
pub mod segment;
pub mod trapezoid;
pub mod vertex;

pub use config::DecompConfig;
pub use decomposer::{DecompErr, Decomposer, Decomposition, Visit};
pub use geometry::Geometry;
pub use point::Point;
pub use scanner::SweepTrapezoider;
pub use trapezoid::{Entry, TrapId, Trapezoid, TrapezoidGraph, Trapezoidation};
