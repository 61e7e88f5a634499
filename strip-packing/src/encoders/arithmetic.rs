use super::rules::PackingRules;
use super::Axis;
use super::Encoder;
use super::EncoderOptions;
use super::Encoding;
use super::PositionHandles;
use super::SearchStyle;
use crate::model::Assignment;
use crate::model::LinearInequality;
use crate::model::SymbolicModel;
use crate::DecodeMismatch;
use crate::Instance;
use crate::Packing;
use crate::PackingResult;

/// Integer positions with one disjunction of the four axis separations per pair of rectangles.
///
/// The model minimises the container height below the trial height.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticEncoder;

impl Encoder for ArithmeticEncoder {
    type Handles = PositionHandles;

    fn name(&self) -> &'static str {
        "Arithmetic"
    }

    fn style(&self) -> SearchStyle {
        SearchStyle::Optimising
    }

    fn build_model(
        &self,
        instance: &Instance,
        trial_height: u32,
        options: &EncoderOptions,
    ) -> PackingResult<Encoding<PositionHandles>> {
        let rules = PackingRules::derive(instance, trial_height, options)?;

        let mut model = SymbolicModel::default();
        let handles = PositionHandles::create(
            &mut model,
            instance,
            &rules,
            trial_height,
            options.rotation_enabled,
        );

        for (first, second, rule) in rules.pairs() {
            let mut disjuncts = Vec::with_capacity(4);
            if rule.side_by_side {
                disjuncts.push(handles.separation(instance, Axis::X, first, second));
                disjuncts.push(handles.separation(instance, Axis::X, second, first));
            }
            if rule.stacked {
                disjuncts.push(handles.separation(instance, Axis::Y, first, second));
                disjuncts.push(handles.separation(instance, Axis::Y, second, first));
            }
            model.add_disjunction(disjuncts);

            if rule.identical {
                let (x1, x2) = (handles.x(first), handles.x(second));
                let (y1, y2) = (handles.y(first), handles.y(second));

                // (x1, y1) is lexicographically at most (x2, y2)
                model.add_inequality(LinearInequality::new([(1, x1), (-1, x2)], 0));
                model.add_disjunction([
                    LinearInequality::new([(1, x1), (-1, x2)], -1),
                    LinearInequality::new([(1, y1), (-1, y2)], 0),
                ]);
            }
        }

        model.minimise(handles.height());
        model.log_size(self.name());

        Ok(Encoding {
            model,
            handles,
            trial_height,
        })
    }

    fn decode(
        &self,
        encoding: &Encoding<PositionHandles>,
        assignment: &Assignment,
        instance: &Instance,
    ) -> Result<Packing, DecodeMismatch> {
        encoding
            .handles
            .decode(&encoding.model, assignment, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::RotationVar;
    use crate::Rectangle;

    fn instance(width: u32, rectangles: &[(u32, u32)], rotation: bool) -> Instance {
        let rectangles = rectangles
            .iter()
            .map(|&(width, height)| Rectangle::new(width, height))
            .collect::<Vec<_>>();
        Instance::new(width, rectangles, rotation).expect("valid instance")
    }

    #[test]
    fn every_pair_gets_a_disjunction() {
        let encoding = ArithmeticEncoder
            .build_model(
                &instance(3, &[(2, 2), (2, 1), (1, 2)], false),
                5,
                &EncoderOptions::default(),
            )
            .expect("valid instance");

        assert_eq!(3, encoding.model.disjunctions().len());
        // (2, 2) and (2, 1) cannot be side by side in a container of width 3
        assert_eq!(2, encoding.model.disjunctions()[0].len());
        assert_eq!(4, encoding.model.disjunctions()[1].len());
        assert_eq!(Some(encoding.handles.height()), encoding.model.objective());
    }

    #[test]
    fn anchor_is_fixed_at_the_origin() {
        let encoding = ArithmeticEncoder
            .build_model(
                &instance(3, &[(1, 1), (2, 2)], false),
                5,
                &EncoderOptions::default(),
            )
            .expect("valid instance");

        let x = encoding.model.domain(encoding.handles.x(1));
        let y = encoding.model.domain(encoding.handles.y(1));
        assert_eq!((0, 0), (x.lower, x.upper));
        assert_eq!((0, 0), (y.lower, y.upper));
    }

    #[test]
    fn hand_made_assignment_is_decoded() {
        let instance = instance(3, &[(2, 1), (1, 2)], true);
        let encoding = ArithmeticEncoder
            .build_model(&instance, 3, &EncoderOptions::default())
            .expect("valid instance");
        let handles = &encoding.handles;

        let RotationVar::Free(rotation) = handles.rotation(0) else {
            panic!("the first rectangle can be rotated");
        };
        let RotationVar::Free(second_rotation) = handles.rotation(1) else {
            panic!("the second rectangle can be rotated");
        };

        // rectangle 0 rotated at (0, 0), rectangle 1 at (1, 0), both 1 wide and 2 high
        let mut assignment = Assignment::for_model(&encoding.model);
        assignment.set_integer(handles.x(0), 0);
        assignment.set_integer(handles.y(0), 0);
        assignment.set_integer(rotation, 1);
        assignment.set_integer(handles.x(1), 1);
        assignment.set_integer(handles.y(1), 0);
        assignment.set_integer(second_rotation, 0);
        assignment.set_integer(handles.height(), 2);

        assert!(encoding.model.is_satisfied_by(&assignment));

        let packing = ArithmeticEncoder
            .decode(&encoding, &assignment, &instance)
            .expect("consistent assignment");
        assert_eq!(2, packing.height);
        assert!(packing.placements[0].rotated);
        assert!(!packing.placements[1].rotated);
    }

    #[test]
    fn missing_height_is_a_decode_mismatch() {
        let instance = instance(3, &[(1, 1)], false);
        let encoding = ArithmeticEncoder
            .build_model(&instance, 1, &EncoderOptions::default())
            .expect("valid instance");

        let mut assignment = Assignment::for_model(&encoding.model);
        assignment.set_integer(encoding.handles.x(0), 0);
        assignment.set_integer(encoding.handles.y(0), 0);

        assert_eq!(
            Err(DecodeMismatch::UnassignedHeight),
            ArithmeticEncoder.decode(&encoding, &assignment, &instance)
        );
    }
}
