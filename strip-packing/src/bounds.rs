//! Bounds on the optimal container height of an instance.

use crate::Instance;
use crate::Orientation;

/// A lower and upper bound on the optimal container height.
///
/// The lower bound never exceeds the optimum; a packing of height `upper` always exists (unless
/// the instance caps its height below it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightBounds {
    pub lower: u32,
    pub upper: u32,
}

impl HeightBounds {
    /// Estimate the bounds of an instance, with rotation as permitted by the instance.
    pub fn estimate(instance: &Instance) -> HeightBounds {
        HeightBounds::estimate_with_rotation(instance, instance.allow_rotation())
    }

    /// Estimate the bounds of an instance when rotation is used only if `rotation` is set (and
    /// permitted by the instance).
    ///
    /// The lower bound is the larger of the area bound `ceil(area / width)` and the smallest
    /// vertical extent any single rectangle can have. The upper bound stacks all rectangles on
    /// top of each other, each in its tallest orientation that fits the width. A height cap on the
    /// instance lowers the upper bound, but never below the lower bound.
    pub fn estimate_with_rotation(instance: &Instance, rotation: bool) -> HeightBounds {
        let rotation = rotation && instance.allow_rotation();
        let width = instance.container_width();

        let mut tallest_single = 0;
        let mut stacked: u64 = 0;
        for rectangle in instance.rectangles() {
            let extents = Orientation::ALL
                .into_iter()
                .filter(|orientation| rotation || !orientation.is_rotated())
                .map(|orientation| rectangle.dimensions(orientation))
                .filter(|&(horizontal, _)| horizontal <= width)
                .map(|(_, vertical)| vertical);

            let (shortest, tallest) = extents.fold((u32::MAX, 0), |(shortest, tallest), extent| {
                (shortest.min(extent), tallest.max(extent))
            });
            if tallest == 0 {
                // No permitted orientation fits; encoders refuse such instances.
                continue;
            }

            tallest_single = tallest_single.max(shortest);
            stacked += u64::from(tallest);
        }

        let area_bound = instance.total_area().div_ceil(u64::from(width));
        let lower = saturate(area_bound.max(u64::from(tallest_single)));
        let mut upper = saturate(stacked);

        if let Some(cap) = instance.height_cap() {
            upper = upper.min(cap).max(lower);
        }

        HeightBounds { lower, upper }
    }

    /// The heights which can be probed, in increasing order.
    pub fn heights(&self) -> impl Iterator<Item = u32> {
        self.lower..=self.upper
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
