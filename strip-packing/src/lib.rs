//! # Strip packing
//! Encodings of the two-dimensional strip-packing problem: place axis-aligned rectangles without
//! overlap in a container of fixed width, minimising the height of the container.
//!
//! An [`Instance`] is translated by an [`Encoder`](encoders::Encoder) into a
//! [`SymbolicModel`](model::SymbolicModel) for a trial height. The model is handed to a
//! [`Backend`](backend::Backend), and a satisfying assignment is decoded back into a [`Packing`].
//! The [`SearchDriver`] ties these together: it probes heights from the [`HeightBounds`] of the
//! instance until it finds the minimal one or runs out of time.
//!
//! Three encodings are provided:
//! - [`OrderEncoder`](encoders::OrderEncoder), a boolean order encoding probed height by height;
//! - [`ArithmeticEncoder`](encoders::ArithmeticEncoder), integer positions with disjunctive
//!   non-overlap, which minimises the height in one probe;
//! - [`BigMEncoder`](encoders::BigMEncoder), integer positions with big-M linearised
//!   non-overlap, which also minimises the height in one probe.
//!
//! ```no_run
//! use strip_packing::backend::PumpkinBackend;
//! use strip_packing::encoders::OrderEncoder;
//! use strip_packing::Instance;
//! use strip_packing::Rectangle;
//! use strip_packing::SearchDriver;
//! use strip_packing::SearchOptions;
//! use strip_packing::SearchOutcome;
//!
//! let instance = Instance::new(
//!     3,
//!     vec![Rectangle::new(2, 2), Rectangle::new(2, 1), Rectangle::new(1, 2)],
//!     false,
//! )
//! .expect("every rectangle fits");
//!
//! let mut driver = SearchDriver::new(OrderEncoder, PumpkinBackend, SearchOptions::default());
//! let report = driver.run(&instance).expect("the instance is valid");
//!
//! if let SearchOutcome::Feasible(packing) = report.outcome {
//!     assert_eq!(3, packing.height);
//! }
//! ```

pub mod backend;
mod bounds;
pub mod containers;
pub mod encoders;
mod error;
mod instance;
pub mod model;
mod placement;
mod search;
pub mod statistics;

pub use bounds::HeightBounds;
pub use encoders::EncoderOptions;
pub use encoders::EncodingKind;
pub use error::*;
pub use instance::*;
pub use placement::*;
pub use search::*;
