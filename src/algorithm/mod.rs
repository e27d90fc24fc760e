//! The five-stage repair pipeline, leaves first: [`sanitize`] the ring,
//! find its [`self_intersections`], [`trace`] the pseudo-vertex graph into
//! simple sub-rings, [`fill`] them under a winding rule, and [`assemble`]
//! the result across holes and input polygons.

pub mod assemble;
pub mod fill;
pub mod pseudo_vertex;
pub mod sanitize;
pub mod self_intersections;
pub mod trace;
