//! The symmetry-breaking and pruning rules which every encoder applies.

use crate::containers::Grid;
use crate::EncoderOptions;
use crate::Instance;
use crate::InvalidInstance;
use crate::Orientation;
use crate::Rectangle;

/// The orientations in which a rectangle may be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationChoice {
    Fixed(Orientation),
    /// The orientation is decided by the backend.
    Either,
}

impl OrientationChoice {
    pub fn allows(self, orientation: Orientation) -> bool {
        match self {
            OrientationChoice::Fixed(fixed) => fixed == orientation,
            OrientationChoice::Either => true,
        }
    }

    pub fn orientations(self) -> impl Iterator<Item = Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(move |&orientation| self.allows(orientation))
    }

    /// The smallest horizontal and vertical extent over the allowed orientations.
    pub(crate) fn smallest_extents(self, rectangle: Rectangle) -> (u32, u32) {
        self.orientations()
            .map(|orientation| rectangle.dimensions(orientation))
            .fold((u32::MAX, u32::MAX), |(width, height), (w, h)| {
                (width.min(w), height.min(h))
            })
    }
}

/// What is known about the relative position of two rectangles `first < second`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairRule {
    /// The rectangles can be placed next to each other horizontally.
    pub side_by_side: bool,
    /// The rectangles can be placed on top of each other.
    pub stacked: bool,
    /// The rectangles are interchangeable; `second` may not be placed before `first`.
    pub identical: bool,
}

impl PairRule {
    const UNRESTRICTED: PairRule = PairRule {
        side_by_side: true,
        stacked: true,
        identical: false,
    };
}

/// The rules for one instance at one container height.
#[derive(Clone, Debug)]
pub struct PackingRules {
    orientations: Vec<OrientationChoice>,
    anchor: Option<usize>,
    pairs: Grid<PairRule>,
}

impl PackingRules {
    /// Derive the rules for packing `instance` into a container of the given height.
    ///
    /// Fails when a rectangle fits the container width in none of the orientations the options
    /// permit.
    pub fn derive(
        instance: &Instance,
        height: u32,
        options: &EncoderOptions,
    ) -> Result<PackingRules, InvalidInstance> {
        let width = instance.container_width();
        let rotation = instance.allow_rotation() && options.rotation_enabled;

        let orientations = instance
            .rectangles()
            .iter()
            .enumerate()
            .map(|(index, rectangle)| {
                let fits = |orientation: Orientation| rectangle.dimensions(orientation).0 <= width;
                let upright = fits(Orientation::Upright);
                let rotated = rotation && fits(Orientation::Rotated);

                match (upright, rotated) {
                    (true, true) if options.prune_rotation && rectangle.is_square() => {
                        Ok(OrientationChoice::Fixed(Orientation::Upright))
                    }
                    (true, true) => Ok(OrientationChoice::Either),
                    (true, false) => Ok(OrientationChoice::Fixed(Orientation::Upright)),
                    (false, true) => Ok(OrientationChoice::Fixed(Orientation::Rotated)),
                    (false, false) => Err(InvalidInstance::DoesNotFit {
                        index,
                        width: rectangle.width,
                        height: rectangle.height,
                        container_width: width,
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let anchor = if options.symmetry_breaking && options.anchor_largest {
            instance.largest_rectangle()
        } else {
            None
        };

        let rectangles = instance.rectangles();
        let pairs = Grid::from_fn(instance.len(), instance.len(), |first, second| {
            if !options.symmetry_breaking || first >= second {
                return PairRule::UNRESTRICTED;
            }

            let combinations = || {
                orientations[first].orientations().flat_map(|first_orientation| {
                    orientations[second]
                        .orientations()
                        .map(move |second_orientation| {
                            (
                                rectangles[first].dimensions(first_orientation),
                                rectangles[second].dimensions(second_orientation),
                            )
                        })
                })
            };

            let fits_within = |first: u32, second: u32, extent: u32| {
                u64::from(first) + u64::from(second) <= u64::from(extent)
            };

            PairRule {
                side_by_side: combinations().any(|((first_width, _), (second_width, _))| {
                    fits_within(first_width, second_width, width)
                }),
                stacked: combinations().any(|((_, first_height), (_, second_height))| {
                    fits_within(first_height, second_height, height)
                }),
                identical: rectangles[first] == rectangles[second],
            }
        });

        Ok(PackingRules {
            orientations,
            anchor,
            pairs,
        })
    }

    pub fn orientation(&self, index: usize) -> OrientationChoice {
        self.orientations[index]
    }

    /// The rectangle which is fixed at the origin, if any.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn pair(&self, first: usize, second: usize) -> PairRule {
        debug_assert!(first < second);
        self.pairs[(first, second)]
    }

    /// All pairs `(first, second, rule)` with `first < second`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, PairRule)> + '_ {
        let n = self.orientations.len();
        (0..n).flat_map(move |first| {
            ((first + 1)..n).map(move |second| (first, second, self.pair(first, second)))
        })
    }
}
