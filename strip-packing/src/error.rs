use thiserror::Error;

pub type PackingResult<T> = Result<T, PackingError>;

/// The errors which can abort the construction of a model or a search.
///
/// Inconclusive verdicts of a backend are not errors, they are handled by the
/// [`SearchDriver`](crate::SearchDriver).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    #[error("Invalid instance: {0}")]
    InvalidInstance(#[from] InvalidInstance),
    #[error("A solution reported by the backend could not be decoded: {0}")]
    DecodeMismatch(#[from] DecodeMismatch),
}

/// The reasons an instance cannot be packed at any height.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInstance {
    #[error("the container width should be positive")]
    EmptyContainer,
    #[error("rectangle {index} has a zero dimension ({width}x{height})")]
    DegenerateRectangle { index: usize, width: u32, height: u32 },
    #[error(
        "rectangle {index} ({width}x{height}) fits in no permitted orientation of a container of width {container_width}"
    )]
    DoesNotFit {
        index: usize,
        width: u32,
        height: u32,
        container_width: u32,
    },
}

/// A decoded packing which violates the contract between an encoder and its decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeMismatch {
    #[error("expected {expected} placements, but {found} were decoded")]
    WrongPlacementCount { expected: usize, found: usize },
    #[error("placement {position} is for rectangle {found}")]
    MisorderedPlacement { position: usize, found: usize },
    #[error("the {component} of rectangle {index} was not assigned")]
    Unassigned {
        index: usize,
        component: &'static str,
    },
    #[error("the {component} of rectangle {index} is {value}, outside of [{lower}, {upper}]")]
    OutOfWindow {
        index: usize,
        component: &'static str,
        value: i64,
        lower: i64,
        upper: i64,
    },
    #[error("the height of the packing was not assigned")]
    UnassignedHeight,
    #[error("rectangle {index} is rotated, but rotation is not allowed")]
    ForbiddenRotation { index: usize },
    #[error("rectangle {index} at ({x}, {y}) exceeds the {container_width}x{height} container")]
    OutsideContainer {
        index: usize,
        x: u32,
        y: u32,
        container_width: u32,
        height: u32,
    },
    #[error("rectangles {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}
