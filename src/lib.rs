//! `geo-correct` repairs invalid polygons into OGC-valid [`MultiPolygon`]s.
//!
//! # Types
//!
//! This crate operates on [`geo_types`] geometries directly: [`Polygon`] and
//! [`MultiPolygon`] in, [`MultiPolygon`] out. It does not introduce its own
//! point/ring/polygon types.
//!
//! # Algorithm
//!
//! A single possibly self-intersecting ring is turned into a set of simple
//! sub-rings by walking a *pseudo-vertex graph* built from the ring's
//! self-crossings ([`algorithm::pseudo_vertex`], [`algorithm::self_intersections`],
//! [`algorithm::trace`]), then the sub-rings are combined into one filled
//! region under a chosen [`FillStrategy`] ([`algorithm::fill`]). Holes are
//! repaired the same way, recursively, and subtracted from the outer
//! ([`algorithm::assemble`]).
//!
//! # Entry points
//!
//! - [`correct`]: repair under the non-zero-winding fill rule.
//! - [`correct_odd_even`]: repair under the even-odd fill rule.
//!
//! Both are total: no input, however degenerate, causes either function to
//! fail. See [`RepairConfig`] for the knobs (orientation, spike suppression,
//! hole-nesting depth bound).

pub mod algorithm;
mod config;
mod primitives;

pub use algorithm::assemble::{correct, correct_odd_even, Repairable};
pub use algorithm::fill::{EvenOdd, FillStrategy, NonZeroWinding};
pub use config::{Order, RepairConfig};
