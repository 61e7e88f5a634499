use super::rules::OrientationChoice;
use super::rules::PackingRules;
use super::Axis;
use super::RotationVar;
use crate::model::Assignment;
use crate::model::IntVar;
use crate::model::LinearInequality;
use crate::model::SymbolicModel;
use crate::validate_packing;
use crate::DecodeMismatch;
use crate::HeightBounds;
use crate::Instance;
use crate::Packing;
use crate::Placement;

/// The integer position variables shared by the arithmetic and big-M encodings.
///
/// A free rotation is a 0-1 variable which is one when the rectangle is rotated.
#[derive(Clone, Debug)]
pub struct PositionHandles {
    x: Vec<IntVar>,
    y: Vec<IntVar>,
    rotation: Vec<RotationVar<IntVar>>,
    height: IntVar,
}

impl PositionHandles {
    /// Create the position variables and constrain every rectangle to lie inside a container
    /// whose height is at most `trial_height`.
    pub(crate) fn create(
        model: &mut SymbolicModel,
        instance: &Instance,
        rules: &PackingRules,
        trial_height: u32,
        rotation_enabled: bool,
    ) -> PositionHandles {
        let width = i64::from(instance.container_width());
        let trial_height = i64::from(trial_height);
        let lower = i64::from(HeightBounds::estimate_with_rotation(instance, rotation_enabled).lower);

        let mut x = Vec::with_capacity(instance.len());
        let mut y = Vec::with_capacity(instance.len());
        let mut rotation = Vec::with_capacity(instance.len());

        for (index, &rectangle) in instance.rectangles().iter().enumerate() {
            let choice = rules.orientation(index);
            let (narrowest, shortest) = choice.smallest_extents(rectangle);

            if rules.anchor() == Some(index) {
                x.push(model.new_integer(0, 0));
                y.push(model.new_integer(0, 0));
            } else {
                x.push(model.new_integer(0, width - i64::from(narrowest)));
                y.push(model.new_integer(0, trial_height - i64::from(shortest)));
            }

            rotation.push(match choice {
                OrientationChoice::Fixed(orientation) => RotationVar::Fixed(orientation),
                OrientationChoice::Either => RotationVar::Free(model.new_integer(0, 1)),
            });
        }

        let height = model.new_integer(lower.min(trial_height), trial_height);

        let handles = PositionHandles {
            x,
            y,
            rotation,
            height,
        };

        for index in 0..instance.len() {
            // x + extent <= width
            let (constant, variable) = handles.extent(instance, index, Axis::X);
            let mut inequality = LinearInequality::new([(1, handles.x[index])], width - constant);
            if let Some((coefficient, var)) = variable {
                inequality = inequality.plus_term(coefficient, var);
            }
            model.add_inequality(inequality);

            // y + extent <= height
            let (constant, variable) = handles.extent(instance, index, Axis::Y);
            let mut inequality =
                LinearInequality::new([(1, handles.y[index]), (-1, handles.height)], -constant);
            if let Some((coefficient, var)) = variable {
                inequality = inequality.plus_term(coefficient, var);
            }
            model.add_inequality(inequality);
        }

        handles
    }

    pub fn x(&self, index: usize) -> IntVar {
        self.x[index]
    }

    pub fn y(&self, index: usize) -> IntVar {
        self.y[index]
    }

    pub fn rotation(&self, index: usize) -> RotationVar<IntVar> {
        self.rotation[index]
    }

    /// The variable holding the height of the container.
    pub fn height(&self) -> IntVar {
        self.height
    }

    pub(crate) fn position(&self, index: usize, axis: Axis) -> IntVar {
        match axis {
            Axis::X => self.x[index],
            Axis::Y => self.y[index],
        }
    }

    /// The extent of a rectangle along the axis as `constant + coefficient * rotation`.
    pub(crate) fn extent(
        &self,
        instance: &Instance,
        index: usize,
        axis: Axis,
    ) -> (i64, Option<(i64, IntVar)>) {
        let rectangle = instance.rectangles()[index];
        match self.rotation[index] {
            RotationVar::Fixed(orientation) => {
                (i64::from(axis.along(rectangle.dimensions(orientation))), None)
            }
            RotationVar::Free(var) => {
                let upright = i64::from(axis.along((rectangle.width, rectangle.height)));
                let rotated = i64::from(axis.along((rectangle.height, rectangle.width)));
                (upright, Some((rotated - upright, var)))
            }
        }
    }

    /// The inequality stating that `before` ends at or before the start of `after` on the axis.
    pub(crate) fn separation(
        &self,
        instance: &Instance,
        axis: Axis,
        before: usize,
        after: usize,
    ) -> LinearInequality {
        let (constant, variable) = self.extent(instance, before, axis);
        let inequality = LinearInequality::new(
            [
                (1, self.position(before, axis)),
                (-1, self.position(after, axis)),
            ],
            -constant,
        );

        match variable {
            Some((coefficient, var)) => inequality.plus_term(coefficient, var),
            None => inequality,
        }
    }

    /// Read the packing from the assignment; its height is the value of the height variable.
    pub(crate) fn decode(
        &self,
        model: &SymbolicModel,
        assignment: &Assignment,
        instance: &Instance,
    ) -> Result<Packing, DecodeMismatch> {
        if self.x.len() != instance.len() {
            return Err(DecodeMismatch::WrongPlacementCount {
                expected: instance.len(),
                found: self.x.len(),
            });
        }

        let value = |var: IntVar,
                     index: usize,
                     component: &'static str|
         -> Result<u32, DecodeMismatch> {
            let value = assignment
                .integer(var)
                .ok_or(DecodeMismatch::Unassigned { index, component })?;
            let domain = model.domain(var);
            if !domain.contains(value) || value < 0 {
                return Err(DecodeMismatch::OutOfWindow {
                    index,
                    component,
                    value,
                    lower: domain.lower.max(0),
                    upper: domain.upper,
                });
            }
            u32::try_from(value).map_err(|_| DecodeMismatch::OutOfWindow {
                index,
                component,
                value,
                lower: 0,
                upper: i64::from(u32::MAX),
            })
        };

        let placements = (0..instance.len())
            .map(|index| {
                let rotated = match self.rotation[index] {
                    RotationVar::Fixed(orientation) => orientation.is_rotated(),
                    RotationVar::Free(var) => value(var, index, "rotation")? == 1,
                };
                Ok(Placement {
                    rectangle_index: index,
                    x: value(self.x[index], index, "x")?,
                    y: value(self.y[index], index, "y")?,
                    rotated,
                })
            })
            .collect::<Result<Vec<_>, DecodeMismatch>>()?;

        let height = assignment
            .integer(self.height)
            .and_then(|height| u32::try_from(height).ok())
            .ok_or(DecodeMismatch::UnassignedHeight)?;

        let packing = Packing { height, placements };
        validate_packing(instance, &packing)?;

        Ok(packing)
    }
}
