//! This crate contains the text formats used around the strip-packing solver.
//!
//! An instance file lists the container width (optionally followed by a cap on the container
//! height), the number of blocks, and one `width height` line per block. Instances are read with
//! [`read_instance`]. A solved instance is written with [`write_solution`] in a layout that mirrors
//! the instance file, extended with the corner coordinates of every block. The same layout is
//! parsed back with [`read_solution`].
//!
//! The declarative (MiniZinc) model consumes the instance as a `.dzn` data file, which is
//! materialised with [`write_dzn`].

mod dzn;
mod error;
mod instance;
mod lines;
mod solution;

pub use dzn::*;
pub use error::*;
pub use instance::*;
pub use solution::*;
