use super::rules::OrientationChoice;
use super::rules::PackingRules;
use super::Axis;
use super::Encoder;
use super::EncoderOptions;
use super::Encoding;
use super::PositionHandles;
use super::SearchStyle;
use crate::containers::Grid;
use crate::model::Assignment;
use crate::model::IntVar;
use crate::model::LinearInequality;
use crate::model::SymbolicModel;
use crate::DecodeMismatch;
use crate::Instance;
use crate::Packing;
use crate::PackingResult;

/// Integer positions where non-overlap is linearised with big-M constants.
///
/// For every ordered pair `(i, j)` and axis there is a 0-1 indicator; when it is zero, `i` has to
/// end before `j` starts on that axis, and when it is one the constraint is relaxed by the width
/// of the container (horizontally) or the trial height (vertically). At most three of the four
/// indicators of a pair are one. The model minimises the container height.
#[derive(Clone, Copy, Debug, Default)]
pub struct BigMEncoder;

#[derive(Clone, Debug)]
pub struct BigMHandles {
    positions: PositionHandles,
    relax_x: Grid<Option<IntVar>>,
    relax_y: Grid<Option<IntVar>>,
}

impl BigMHandles {
    pub fn positions(&self) -> &PositionHandles {
        &self.positions
    }

    /// The indicator which is zero if `first` has to end before `second` starts on the axis.
    pub fn indicator(&self, first: usize, second: usize, axis: Axis) -> Option<IntVar> {
        let grid = match axis {
            Axis::X => &self.relax_x,
            Axis::Y => &self.relax_y,
        };
        grid.get(first, second).copied().flatten()
    }
}

impl Encoder for BigMEncoder {
    type Handles = BigMHandles;

    fn name(&self) -> &'static str {
        "BigM"
    }

    fn style(&self) -> SearchStyle {
        SearchStyle::Optimising
    }

    fn build_model(
        &self,
        instance: &Instance,
        trial_height: u32,
        options: &EncoderOptions,
    ) -> PackingResult<Encoding<BigMHandles>> {
        let rules = PackingRules::derive(instance, trial_height, options)?;
        let n = instance.len();

        let mut model = SymbolicModel::default();
        let positions = PositionHandles::create(
            &mut model,
            instance,
            &rules,
            trial_height,
            options.rotation_enabled,
        );

        // An impossible separation has its indicator fixed to one.
        let indicator = |model: &mut SymbolicModel, possible: bool| {
            if possible {
                model.new_integer(0, 1)
            } else {
                model.new_integer(1, 1)
            }
        };
        let relax_x = Grid::from_fn(n, n, |first, second| {
            (first != second).then(|| {
                let rule = rules.pair(first.min(second), first.max(second));
                indicator(&mut model, rule.side_by_side)
            })
        });
        let relax_y = Grid::from_fn(n, n, |first, second| {
            (first != second).then(|| {
                let rule = rules.pair(first.min(second), first.max(second));
                indicator(&mut model, rule.stacked)
            })
        });

        let handles = BigMHandles {
            positions,
            relax_x,
            relax_y,
        };

        let big_m = |axis: Axis| match axis {
            Axis::X => i64::from(instance.container_width()),
            Axis::Y => i64::from(trial_height),
        };

        for (first, second, rule) in rules.pairs() {
            let mut indicators = Vec::with_capacity(4);

            for axis in [Axis::X, Axis::Y] {
                for (before, after) in [(first, second), (second, first)] {
                    let Some(indicator) = handles.indicator(before, after, axis) else {
                        continue;
                    };
                    indicators.push(indicator);

                    model.add_inequality(
                        handles
                            .positions
                            .separation(instance, axis, before, after)
                            .plus_term(-big_m(axis), indicator),
                    );
                }
            }

            model.add_inequality(LinearInequality::new(
                indicators.iter().map(|&indicator| (1, indicator)),
                3,
            ));

            // Interchangeable rectangles are ordered by x / width + y / height.
            if rule.identical && matches!(rules.orientation(first), OrientationChoice::Fixed(_)) {
                let (Some(left), Some(right), Some(over)) = (
                    handles.indicator(first, second, Axis::X),
                    handles.indicator(second, first, Axis::X),
                    handles.indicator(second, first, Axis::Y),
                ) else {
                    continue;
                };

                model.add_inequality(LinearInequality::new([(-1, right)], -1));
                model.add_inequality(LinearInequality::new([(1, left), (-1, over)], 0));
            }
        }

        model.minimise(handles.positions.height());
        model.log_size(self.name());

        Ok(Encoding {
            model,
            handles,
            trial_height,
        })
    }

    fn decode(
        &self,
        encoding: &Encoding<BigMHandles>,
        assignment: &Assignment,
        instance: &Instance,
    ) -> Result<Packing, DecodeMismatch> {
        encoding
            .handles
            .positions
            .decode(&encoding.model, assignment, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rectangle;

    fn instance(width: u32, rectangles: &[(u32, u32)]) -> Instance {
        let rectangles = rectangles
            .iter()
            .map(|&(width, height)| Rectangle::new(width, height))
            .collect::<Vec<_>>();
        Instance::new(width, rectangles, false).expect("valid instance")
    }

    #[test]
    fn infeasible_side_by_side_fixes_the_indicators() {
        let encoding = BigMEncoder
            .build_model(&instance(3, &[(2, 2), (2, 1)]), 5, &EncoderOptions::default())
            .expect("valid instance");
        let handles = &encoding.handles;

        for (first, second) in [(0, 1), (1, 0)] {
            let indicator = handles
                .indicator(first, second, Axis::X)
                .expect("distinct rectangles");
            let domain = encoding.model.domain(indicator);
            assert_eq!((1, 1), (domain.lower, domain.upper));
        }

        let vertical = handles.indicator(0, 1, Axis::Y).expect("distinct rectangles");
        assert_eq!(1, encoding.model.domain(vertical).upper);
        assert_eq!(None, handles.indicator(0, 0, Axis::X));
    }

    #[test]
    fn hand_made_assignment_satisfies_the_model() {
        let instance = instance(3, &[(2, 2), (2, 1), (1, 2)]);
        let encoding = BigMEncoder
            .build_model(&instance, 5, &EncoderOptions::default())
            .expect("valid instance");
        let handles = &encoding.handles;
        let positions = handles.positions();

        let mut assignment = Assignment::for_model(&encoding.model);
        for (index, (x, y)) in [(0, 0), (0, 2), (2, 0)].into_iter().enumerate() {
            assignment.set_integer(positions.x(index), x);
            assignment.set_integer(positions.y(index), y);
        }
        assignment.set_integer(positions.height(), 3);
        for first in 0..3 {
            for second in 0..3 {
                for axis in [Axis::X, Axis::Y] {
                    if let Some(indicator) = handles.indicator(first, second, axis) {
                        assignment.set_integer(indicator, 1);
                    }
                }
            }
        }
        // 0 below 1, 0 left of 2, 2 below 1
        let active = [(0, 1, Axis::Y), (0, 2, Axis::X), (2, 1, Axis::Y)];
        for (first, second, axis) in active {
            let indicator = handles
                .indicator(first, second, axis)
                .expect("distinct rectangles");
            assignment.set_integer(indicator, 0);
        }

        assert!(encoding.model.is_satisfied_by(&assignment));

        let packing = BigMEncoder
            .decode(&encoding, &assignment, &instance)
            .expect("consistent assignment");
        assert_eq!(3, packing.height);
        assert_eq!((2, 0), (packing.placements[2].x, packing.placements[2].y));
    }
}
