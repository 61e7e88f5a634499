use packing_format::PlacedBlock;
use packing_format::SolvedLayout;

use crate::DecodeMismatch;
use crate::Instance;
use crate::Orientation;

/// The position of the bottom-left corner of a single rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub rectangle_index: usize,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl Placement {
    pub fn orientation(&self) -> Orientation {
        if self.rotated {
            Orientation::Rotated
        } else {
            Orientation::Upright
        }
    }
}

/// A feasible packing: one placement per rectangle, in the order of the rectangles of the
/// instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packing {
    pub height: u32,
    pub placements: Vec<Placement>,
}

impl Packing {
    /// Convert the packing to the layout which is written to a solution file.
    pub fn to_layout(&self, instance: &Instance) -> SolvedLayout {
        let blocks = self
            .placements
            .iter()
            .map(|placement| {
                let rectangle = instance.rectangles()[placement.rectangle_index];
                PlacedBlock {
                    width: rectangle.width,
                    height: rectangle.height,
                    x: placement.x,
                    y: placement.y,
                    rotated: placement.rotated,
                }
            })
            .collect();

        SolvedLayout {
            container_width: instance.container_width(),
            height: self.height,
            blocks,
        }
    }
}

/// Checks that the packing places every rectangle of the instance exactly once, inside the
/// container of the packing's height, and without any two rectangles overlapping.
pub fn validate_packing(instance: &Instance, packing: &Packing) -> Result<(), DecodeMismatch> {
    if packing.placements.len() != instance.len() {
        return Err(DecodeMismatch::WrongPlacementCount {
            expected: instance.len(),
            found: packing.placements.len(),
        });
    }

    // The occupied area as [x_start, x_end) x [y_start, y_end)
    let mut boxes = Vec::with_capacity(packing.placements.len());

    for (position, placement) in packing.placements.iter().enumerate() {
        if placement.rectangle_index != position {
            return Err(DecodeMismatch::MisorderedPlacement {
                position,
                found: placement.rectangle_index,
            });
        }
        if placement.rotated && !instance.allow_rotation() {
            return Err(DecodeMismatch::ForbiddenRotation { index: position });
        }

        let (width, height) = instance.rectangles()[position].dimensions(placement.orientation());
        let x_end = u64::from(placement.x) + u64::from(width);
        let y_end = u64::from(placement.y) + u64::from(height);

        if x_end > u64::from(instance.container_width()) || y_end > u64::from(packing.height) {
            return Err(DecodeMismatch::OutsideContainer {
                index: position,
                x: placement.x,
                y: placement.y,
                container_width: instance.container_width(),
                height: packing.height,
            });
        }

        boxes.push((u64::from(placement.x), x_end, u64::from(placement.y), y_end));
    }

    for (first, &(x1, x1_end, y1, y1_end)) in boxes.iter().enumerate() {
        for (offset, &(x2, x2_end, y2, y2_end)) in boxes[first + 1..].iter().enumerate() {
            let separated = x1_end <= x2 || x2_end <= x1 || y1_end <= y2 || y2_end <= y1;
            if !separated {
                return Err(DecodeMismatch::Overlap {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rectangle;

    fn placement(rectangle_index: usize, x: u32, y: u32, rotated: bool) -> Placement {
        Placement {
            rectangle_index,
            x,
            y,
            rotated,
        }
    }

    fn instance(rotation: bool) -> Instance {
        Instance::new(
            3,
            vec![
                Rectangle::new(2, 2),
                Rectangle::new(2, 1),
                Rectangle::new(1, 2),
            ],
            rotation,
        )
        .expect("valid instance")
    }

    #[test]
    fn valid_packing_is_accepted() {
        let packing = Packing {
            height: 3,
            placements: vec![
                placement(0, 0, 0, false),
                placement(1, 0, 2, false),
                placement(2, 2, 0, false),
            ],
        };

        assert_eq!(Ok(()), validate_packing(&instance(false), &packing));
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let packing = Packing {
            height: 3,
            placements: vec![
                placement(0, 0, 0, false),
                placement(1, 1, 2, false),
                placement(2, 2, 0, false),
            ],
        };

        assert_eq!(Ok(()), validate_packing(&instance(false), &packing));
    }

    #[test]
    fn overlapping_rectangles_are_reported() {
        let packing = Packing {
            height: 4,
            placements: vec![
                placement(0, 0, 0, false),
                placement(1, 1, 1, false),
                placement(2, 2, 2, false),
            ],
        };

        assert_eq!(
            Err(DecodeMismatch::Overlap {
                first: 0,
                second: 1
            }),
            validate_packing(&instance(false), &packing)
        );
    }

    #[test]
    fn rectangle_above_the_height_is_reported() {
        let packing = Packing {
            height: 2,
            placements: vec![
                placement(0, 0, 0, false),
                placement(1, 0, 2, false),
                placement(2, 2, 0, false),
            ],
        };

        assert!(matches!(
            validate_packing(&instance(false), &packing),
            Err(DecodeMismatch::OutsideContainer { index: 1, .. })
        ));
    }

    #[test]
    fn rotation_uses_swapped_dimensions() {
        // The third rectangle rotated is 2 wide and 1 high.
        let packing = Packing {
            height: 3,
            placements: vec![
                placement(0, 0, 0, false),
                placement(1, 0, 2, false),
                placement(2, 2, 0, true),
            ],
        };

        assert!(matches!(
            validate_packing(&instance(true), &packing),
            Err(DecodeMismatch::OutsideContainer { index: 2, .. })
        ));
        assert_eq!(
            Err(DecodeMismatch::ForbiddenRotation { index: 2 }),
            validate_packing(&instance(false), &packing)
        );
    }

    #[test]
    fn missing_placement_is_reported() {
        let packing = Packing {
            height: 3,
            placements: vec![placement(0, 0, 0, false)],
        };

        assert_eq!(
            Err(DecodeMismatch::WrongPlacementCount {
                expected: 3,
                found: 1
            }),
            validate_packing(&instance(false), &packing)
        );
    }
}
