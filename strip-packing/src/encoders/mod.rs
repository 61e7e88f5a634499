//! The encodings of the strip-packing problem.
//!
//! An [`Encoder`] turns an [`Instance`] and a trial height into a [`SymbolicModel`], and turns an
//! [`Assignment`] of that model back into a [`Packing`]. Decision-style encoders are probed at
//! increasing heights by the [`SearchDriver`](crate::SearchDriver); optimising encoders minimise
//! the height themselves in a single probe.

mod arithmetic;
mod big_m;
mod order;
mod positions;
pub mod rules;

pub use arithmetic::ArithmeticEncoder;
pub use big_m::BigMEncoder;
pub use big_m::BigMHandles;
pub use order::OrderEncoder;
pub use order::OrderHandles;
pub use positions::PositionHandles;

use crate::model::Assignment;
use crate::model::SymbolicModel;
use crate::DecodeMismatch;
use crate::Instance;
use crate::Orientation;
use crate::Packing;
use crate::PackingResult;

/// Options which are shared by every encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Allow rectangles to swap their width and height, if the instance permits it.
    pub rotation_enabled: bool,
    /// Apply the pair rules (infeasible pairings, interchangeable rectangles) and the anchor.
    pub symmetry_breaking: bool,
    /// Fix the rectangle of maximum area at the origin; only applies with `symmetry_breaking`.
    pub anchor_largest: bool,
    /// Never rotate squares.
    pub prune_rotation: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            rotation_enabled: true,
            symmetry_breaking: true,
            anchor_largest: true,
            prune_rotation: true,
        }
    }
}

/// The available encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum EncodingKind {
    /// Boolean order encoding, probed at increasing heights.
    #[default]
    Order,
    /// Integer positions with disjunctive non-overlap, minimising the height.
    Arithmetic,
    /// Integer positions with big-M linearised non-overlap, minimising the height.
    BigM,
    /// Data for the external constraint-programming model.
    Declarative,
}

/// The orientation of a rectangle in a model: either fixed up front, or decided by a variable
/// which is true (or one) when the rectangle is rotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationVar<Var> {
    Fixed(Orientation),
    Free(Var),
}

/// A direction in the container: `X` is horizontal, `Y` is vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Select the component along this axis of a `(horizontal, vertical)` pair.
    pub(crate) fn along<T>(self, (horizontal, vertical): (T, T)) -> T {
        match self {
            Axis::X => horizontal,
            Axis::Y => vertical,
        }
    }
}

/// How the search driver uses an encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStyle {
    /// The model fixes the height; the driver probes heights from the lower bound upwards.
    Decision,
    /// The model minimises the height below the trial height.
    Optimising,
}

/// A model together with the handles needed to decode its solutions.
#[derive(Clone, Debug)]
pub struct Encoding<Handles> {
    pub model: SymbolicModel,
    pub handles: Handles,
    pub trial_height: u32,
}

pub trait Encoder {
    /// The variables of the model which describe the placements.
    type Handles;

    /// The name used in logs and statistics.
    fn name(&self) -> &'static str;

    fn style(&self) -> SearchStyle;

    /// Build the model of packing `instance` into a container of `trial_height`.
    ///
    /// Fails with [`InvalidInstance`](crate::InvalidInstance) if a rectangle fits the container
    /// in none of the permitted orientations.
    fn build_model(
        &self,
        instance: &Instance,
        trial_height: u32,
        options: &EncoderOptions,
    ) -> PackingResult<Encoding<Self::Handles>>;

    /// Read the placements from an assignment which satisfies the model.
    fn decode(
        &self,
        encoding: &Encoding<Self::Handles>,
        assignment: &Assignment,
        instance: &Instance,
    ) -> Result<Packing, DecodeMismatch>;
}
