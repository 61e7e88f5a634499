//! Flat containers for the variables of a model.
mod grid;
mod keyed_vec;

pub use grid::Grid;
pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
