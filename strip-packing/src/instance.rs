use packing_format::InstanceFile;

use crate::InvalidInstance;

/// An axis-aligned rectangle which has to be packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(width: u32, height: u32) -> Rectangle {
        Rectangle { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// The `(horizontal, vertical)` extent of the rectangle when placed in the given orientation.
    pub fn dimensions(&self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Upright => (self.width, self.height),
            Orientation::Rotated => (self.height, self.width),
        }
    }
}

/// Whether a rectangle is placed as given, or with its width and height swapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upright,
    Rotated,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Upright, Orientation::Rotated];

    pub fn is_rotated(self) -> bool {
        self == Orientation::Rotated
    }
}

/// An immutable strip-packing problem.
///
/// The position of a rectangle in [`Instance::rectangles`] is its identity for the lifetime of a
/// solve; placements refer to rectangles by this index.
///
/// Every rectangle is guaranteed to fit horizontally in at least one of the orientations the
/// instance permits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    container_width: u32,
    rectangles: Vec<Rectangle>,
    allow_rotation: bool,
    height_cap: Option<u32>,
}

impl Instance {
    pub fn new(
        container_width: u32,
        rectangles: impl Into<Vec<Rectangle>>,
        allow_rotation: bool,
    ) -> Result<Instance, InvalidInstance> {
        let rectangles = rectangles.into();

        if container_width == 0 {
            return Err(InvalidInstance::EmptyContainer);
        }

        for (index, rectangle) in rectangles.iter().enumerate() {
            if rectangle.width == 0 || rectangle.height == 0 {
                return Err(InvalidInstance::DegenerateRectangle {
                    index,
                    width: rectangle.width,
                    height: rectangle.height,
                });
            }

            let narrowest = if allow_rotation {
                rectangle.width.min(rectangle.height)
            } else {
                rectangle.width
            };
            if narrowest > container_width {
                return Err(InvalidInstance::DoesNotFit {
                    index,
                    width: rectangle.width,
                    height: rectangle.height,
                    container_width,
                });
            }
        }

        Ok(Instance {
            container_width,
            rectangles,
            allow_rotation,
            height_cap: None,
        })
    }

    /// Create an instance from a parsed instance file, keeping the height cap of the file.
    pub fn from_file(file: &InstanceFile, allow_rotation: bool) -> Result<Instance, InvalidInstance> {
        let rectangles = file
            .blocks
            .iter()
            .map(|&(width, height)| Rectangle::new(width, height))
            .collect::<Vec<_>>();

        let instance = Instance::new(file.container_width, rectangles, allow_rotation)?;
        Ok(match file.height_cap {
            Some(cap) => instance.with_height_cap(cap),
            None => instance,
        })
    }

    /// Limit the container height which the search may consider.
    pub fn with_height_cap(mut self, cap: u32) -> Instance {
        self.height_cap = Some(cap);
        self
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn allow_rotation(&self) -> bool {
        self.allow_rotation
    }

    pub fn height_cap(&self) -> Option<u32> {
        self.height_cap
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn total_area(&self) -> u64 {
        self.rectangles.iter().map(Rectangle::area).sum()
    }

    /// The rectangle of maximum area, ties broken by the lowest index.
    pub fn largest_rectangle(&self) -> Option<usize> {
        self.rectangles
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, rectangle)| rectangle.area())
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_container_is_rejected() {
        let result = Instance::new(0, vec![Rectangle::new(1, 1)], false);

        assert_eq!(Err(InvalidInstance::EmptyContainer), result);
    }

    #[test]
    fn degenerate_rectangle_is_rejected() {
        let result = Instance::new(4, vec![Rectangle::new(1, 1), Rectangle::new(2, 0)], false);

        assert_eq!(
            Err(InvalidInstance::DegenerateRectangle {
                index: 1,
                width: 2,
                height: 0
            }),
            result
        );
    }

    #[test]
    fn wide_rectangle_is_accepted_only_with_rotation() {
        let rectangles = vec![Rectangle::new(6, 2)];

        assert!(matches!(
            Instance::new(4, rectangles.clone(), false),
            Err(InvalidInstance::DoesNotFit { index: 0, .. })
        ));
        assert!(Instance::new(4, rectangles, true).is_ok());
    }

    #[test]
    fn largest_rectangle_prefers_lowest_index_on_ties() {
        let instance = Instance::new(
            10,
            vec![
                Rectangle::new(1, 1),
                Rectangle::new(2, 3),
                Rectangle::new(3, 2),
                Rectangle::new(1, 6),
            ],
            false,
        )
        .expect("valid instance");

        assert_eq!(Some(1), instance.largest_rectangle());
    }

    #[test]
    fn height_cap_is_taken_from_the_file() {
        let file = InstanceFile {
            container_width: 5,
            height_cap: Some(7),
            blocks: vec![(2, 3)],
        };

        let instance = Instance::from_file(&file, false).expect("valid instance");

        assert_eq!(Some(7), instance.height_cap());
        assert_eq!(&[Rectangle::new(2, 3)], instance.rectangles());
    }
}
