//! Side-scrolling platform shooter.
//!
//! `entities` holds the pure data types, `compute` the pure simulation
//! functions.  Rendering and input live in the binary, not here.

pub mod compute;
pub mod entities;
