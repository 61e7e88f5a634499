use std::ops::Not;

use super::rules::OrientationChoice;
use super::rules::PackingRules;
use super::Axis;
use super::Encoder;
use super::EncoderOptions;
use super::Encoding;
use super::RotationVar;
use super::SearchStyle;
use crate::containers::Grid;
use crate::model::Assignment;
use crate::model::BoolVar;
use crate::model::Lit;
use crate::model::SymbolicModel;
use crate::validate_packing;
use crate::DecodeMismatch;
use crate::Instance;
use crate::Orientation;
use crate::Packing;
use crate::PackingResult;
use crate::Placement;

/// The boolean order encoding.
///
/// Every coordinate `c` of a rectangle on an axis of extent `E` gets a literal meaning
/// "the rectangle starts at or before `c`", for `0 <= c < E - 1`; starting at or before `E - 1`
/// is always true. The height is fixed by the trial height, so the model is a pure satisfaction
/// problem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderEncoder;

/// The variables of an order-encoded model.
#[derive(Clone, Debug)]
pub struct OrderHandles {
    x: Grid<BoolVar>,
    y: Grid<BoolVar>,
    width: u32,
    height: u32,
    rotation: Vec<RotationVar<BoolVar>>,
    left_of: Grid<Option<BoolVar>>,
    below: Grid<Option<BoolVar>>,
}

impl OrderHandles {
    /// The literal which is true if rectangle `first` is placed entirely to the left of `second`.
    pub fn left_of(&self, first: usize, second: usize) -> Option<BoolVar> {
        self.left_of.get(first, second).copied().flatten()
    }

    /// The literal which is true if rectangle `first` is placed entirely below `second`.
    pub fn below(&self, first: usize, second: usize) -> Option<BoolVar> {
        self.below.get(first, second).copied().flatten()
    }

    fn x_at_most(&self, rectangle: usize, coordinate: i64) -> Term {
        order_term(&self.x, self.width, rectangle, coordinate)
    }

    fn y_at_most(&self, rectangle: usize, coordinate: i64) -> Term {
        order_term(&self.y, self.height, rectangle, coordinate)
    }
}

impl Encoder for OrderEncoder {
    type Handles = OrderHandles;

    fn name(&self) -> &'static str {
        "Order"
    }

    fn style(&self) -> SearchStyle {
        SearchStyle::Decision
    }

    fn build_model(
        &self,
        instance: &Instance,
        trial_height: u32,
        options: &EncoderOptions,
    ) -> PackingResult<Encoding<OrderHandles>> {
        let rules = PackingRules::derive(instance, trial_height, options)?;
        let n = instance.len();
        let width = instance.container_width();

        let mut model = SymbolicModel::default();
        let x = Grid::from_fn(n, width.saturating_sub(1) as usize, |_, _| {
            model.new_boolean()
        });
        let y = Grid::from_fn(n, trial_height.saturating_sub(1) as usize, |_, _| {
            model.new_boolean()
        });
        let rotation = (0..n)
            .map(|index| match rules.orientation(index) {
                OrientationChoice::Fixed(orientation) => RotationVar::Fixed(orientation),
                OrientationChoice::Either => RotationVar::Free(model.new_boolean()),
            })
            .collect::<Vec<_>>();
        let left_of = Grid::from_fn(n, n, |first, second| {
            (first != second).then(|| model.new_boolean())
        });
        let below = Grid::from_fn(n, n, |first, second| {
            (first != second).then(|| model.new_boolean())
        });

        let handles = OrderHandles {
            x,
            y,
            width,
            height: trial_height,
            rotation,
            left_of,
            below,
        };

        for index in 0..n {
            add_monotonicity(&mut model, &handles.x, index);
            add_monotonicity(&mut model, &handles.y, index);

            // A rectangle of size s starts at or before E - s.
            let rectangle = instance.rectangles()[index];
            for orientation in rules.orientation(index).orientations() {
                let guard = guard(handles.rotation[index], orientation);
                let (horizontal, vertical) = rectangle.dimensions(orientation);

                add_terms(
                    &mut model,
                    [
                        guard,
                        handles.x_at_most(index, i64::from(width) - i64::from(horizontal)),
                    ],
                );
                add_terms(
                    &mut model,
                    [
                        guard,
                        handles.y_at_most(index, i64::from(trial_height) - i64::from(vertical)),
                    ],
                );
            }
        }

        for (first, second, rule) in rules.pairs() {
            let orders = [
                handles.left_of(first, second),
                handles.left_of(second, first),
                handles.below(first, second),
                handles.below(second, first),
            ];
            let [Some(left), Some(right), Some(under), Some(over)] = orders else {
                debug_assert!(false, "every pair of distinct rectangles has order literals");
                continue;
            };

            model.add_clause([
                left.positive(),
                right.positive(),
                under.positive(),
                over.positive(),
            ]);

            if !rule.side_by_side {
                model.add_clause([left.negative()]);
                model.add_clause([right.negative()]);
            }
            if !rule.stacked {
                model.add_clause([under.negative()]);
                model.add_clause([over.negative()]);
            }
            // Interchangeable rectangles are ordered by x / width + y / height, which needs both
            // to have the same fixed dimensions.
            if rule.identical && matches!(rules.orientation(first), OrientationChoice::Fixed(_)) {
                model.add_clause([right.negative()]);
                model.add_clause([left.positive(), over.negative()]);
            }

            for (before, after, order) in [(first, second, left), (second, first, right)] {
                add_separation(&mut model, &handles, instance, &rules, Axis::X, before, after, order);
            }
            for (before, after, order) in [(first, second, under), (second, first, over)] {
                add_separation(&mut model, &handles, instance, &rules, Axis::Y, before, after, order);
            }
        }

        if let Some(anchor) = rules.anchor() {
            add_terms(&mut model, [handles.x_at_most(anchor, 0)]);
            add_terms(&mut model, [handles.y_at_most(anchor, 0)]);
        }

        model.log_size(self.name());

        Ok(Encoding {
            model,
            handles,
            trial_height,
        })
    }

    fn decode(
        &self,
        encoding: &Encoding<OrderHandles>,
        assignment: &Assignment,
        instance: &Instance,
    ) -> Result<Packing, DecodeMismatch> {
        let handles = &encoding.handles;
        if handles.rotation.len() != instance.len() {
            return Err(DecodeMismatch::WrongPlacementCount {
                expected: instance.len(),
                found: handles.rotation.len(),
            });
        }

        let placements = (0..instance.len())
            .map(|index| {
                let rotated = match handles.rotation[index] {
                    RotationVar::Fixed(orientation) => orientation.is_rotated(),
                    RotationVar::Free(var) => {
                        assignment
                            .boolean(var)
                            .ok_or(DecodeMismatch::Unassigned {
                                index,
                                component: "rotation",
                            })?
                    }
                };

                Ok(Placement {
                    rectangle_index: index,
                    x: first_true(assignment, &handles.x, handles.width, index, "x")?,
                    y: first_true(assignment, &handles.y, handles.height, index, "y")?,
                    rotated,
                })
            })
            .collect::<Result<Vec<_>, DecodeMismatch>>()?;

        let packing = Packing {
            height: encoding.trial_height,
            placements,
        };
        validate_packing(instance, &packing)?;

        Ok(packing)
    }
}

/// A literal, or a literal whose value is already known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Term {
    Constant(bool),
    Literal(Lit),
}

impl Not for Term {
    type Output = Term;

    fn not(self) -> Self::Output {
        match self {
            Term::Constant(value) => Term::Constant(!value),
            Term::Literal(literal) => Term::Literal(!literal),
        }
    }
}

fn order_term(grid: &Grid<BoolVar>, extent: u32, rectangle: usize, coordinate: i64) -> Term {
    if coordinate < 0 {
        Term::Constant(false)
    } else if coordinate >= i64::from(extent) - 1 {
        Term::Constant(true)
    } else {
        Term::Literal(grid[(rectangle, coordinate as usize)].positive())
    }
}

/// The term which makes a clause hold unless the rectangle is placed in `orientation`.
fn guard(rotation: RotationVar<BoolVar>, orientation: Orientation) -> Term {
    match rotation {
        RotationVar::Fixed(fixed) => Term::Constant(fixed != orientation),
        RotationVar::Free(var) => match orientation {
            Orientation::Upright => Term::Literal(var.positive()),
            Orientation::Rotated => Term::Literal(var.negative()),
        },
    }
}

/// Add the clause over the terms; a clause containing a true constant is dropped.
fn add_terms(model: &mut SymbolicModel, terms: impl IntoIterator<Item = Term>) {
    let mut literals = Vec::new();
    for term in terms {
        match term {
            Term::Constant(true) => return,
            Term::Constant(false) => {}
            Term::Literal(literal) => literals.push(literal),
        }
    }
    model.add_clause(literals);
}

fn add_monotonicity(model: &mut SymbolicModel, grid: &Grid<BoolVar>, rectangle: usize) {
    if grid.num_columns() == 0 {
        return;
    }
    for pair in grid.row(rectangle).windows(2) {
        model.add_clause([pair[0].negative(), pair[1].positive()]);
    }
}

/// If `order` holds, `before` ends at or before the start of `after` on the axis.
///
/// With `s` the size of `before`, this is `after >= s` together with
/// `before > e -> after > e + s` for every `e`.
#[allow(clippy::too_many_arguments, reason = "the axis data is spread over the handles")]
fn add_separation(
    model: &mut SymbolicModel,
    handles: &OrderHandles,
    instance: &Instance,
    rules: &PackingRules,
    axis: Axis,
    before: usize,
    after: usize,
    order: BoolVar,
) {
    let rectangle = instance.rectangles()[before];
    let at_most = |rectangle: usize, coordinate: i64| match axis {
        Axis::X => handles.x_at_most(rectangle, coordinate),
        Axis::Y => handles.y_at_most(rectangle, coordinate),
    };
    let extent = match axis {
        Axis::X => handles.width,
        Axis::Y => handles.height,
    };
    let not_order = Term::Literal(order.negative());

    for orientation in rules.orientation(before).orientations() {
        let guard = guard(handles.rotation[before], orientation);
        let size = i64::from(axis.along(rectangle.dimensions(orientation)));

        add_terms(model, [guard, not_order, !at_most(after, size - 1)]);
        for e in 0..(i64::from(extent) - size) {
            add_terms(
                model,
                [guard, not_order, at_most(before, e), !at_most(after, e + size)],
            );
        }
    }
}

/// The smallest coordinate at which the order literal of the rectangle is true.
fn first_true(
    assignment: &Assignment,
    grid: &Grid<BoolVar>,
    extent: u32,
    rectangle: usize,
    component: &'static str,
) -> Result<u32, DecodeMismatch> {
    let last = extent.saturating_sub(1);
    for coordinate in 0..last {
        match assignment.boolean(grid[(rectangle, coordinate as usize)]) {
            Some(true) => return Ok(coordinate),
            Some(false) => {}
            None => {
                return Err(DecodeMismatch::Unassigned {
                    index: rectangle,
                    component,
                })
            }
        }
    }
    Ok(last)
}
