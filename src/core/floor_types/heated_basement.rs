use super::{finite_u_value, CommonInput};
use crate::core::datasets::basement_floor_uninsulated_u_value;
use crate::core::insulation::{insulation_resistance, InsulationInput};
use crate::core::tabular::into_value_range_warnings;
use crate::core::warnings::{warning_path, WarningCollector, WithWarnings};
use std::sync::OnceLock;

/// The floor of a heated basement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatedBasementFloorInput {
    /// Depth of the floor below ground level, m
    pub depth: f64,
    pub insulation: Option<InsulationInput>,
}

#[derive(Debug)]
pub struct HeatedBasementFloorUValueModel {
    common: CommonInput,
    input: HeatedBasementFloorInput,
    uninsulated_u_value: OnceLock<WithWarnings<f64>>,
    u_value: OnceLock<WithWarnings<f64>>,
}

impl HeatedBasementFloorUValueModel {
    pub fn new(common: CommonInput, input: HeatedBasementFloorInput) -> Self {
        Self {
            common,
            input,
            uninsulated_u_value: Default::default(),
            u_value: Default::default(),
        }
    }

    pub fn common(&self) -> &CommonInput {
        &self.common
    }

    pub fn uninsulated_u_value(&self) -> &WithWarnings<f64> {
        self.uninsulated_u_value.get_or_init(|| {
            let mut collector = WarningCollector::new();
            let perimeter_area_ratio = collector.sink(self.common.perimeter_area_ratio());
            let u_value = collector.sink(into_value_range_warnings(
                basement_floor_uninsulated_u_value(self.input.depth, perimeter_area_ratio),
                &warning_path!["per-floor-type", "depth"],
                &warning_path!["perimeter-area-ratio"],
            ));

            collector.finish(u_value)
        })
    }

    pub fn u_value(&self) -> &WithWarnings<f64> {
        self.u_value.get_or_init(|| {
            let mut collector = WarningCollector::new();
            let uninsulated = collector.sink_cloned(self.uninsulated_u_value());
            let resistance = collector.sink(
                insulation_resistance(self.input.insulation.as_ref())
                    .with_path_prefix(&warning_path!["per-floor-type", "insulation"]),
            );

            finite_u_value(collector.finish(1. / (1. / uninsulated + resistance)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warnings::Warning;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn model(depth: f64, insulation: Option<InsulationInput>) -> HeatedBasementFloorUValueModel {
        HeatedBasementFloorUValueModel::new(
            CommonInput::new(100., 50.),
            HeatedBasementFloorInput { depth, insulation },
        )
    }

    #[rstest]
    fn test_uninsulated() {
        let model = model(1., None);
        assert_relative_eq!(*model.u_value().inner(), 0.55, max_relative = 1e-9);
        assert!(model.u_value().warnings().is_empty());
    }

    #[rstest]
    fn test_insulation_adds_in_series() {
        let model = model(1., Some(InsulationInput::Resistance { resistance: 2. }));
        assert_relative_eq!(
            *model.u_value().inner(),
            1. / (1. / 0.55 + 2.),
            max_relative = 1e-9
        );
        assert_relative_eq!(*model.u_value().inner(), 0.261905, max_relative = 1e-5);
    }

    #[rstest]
    fn test_deep_basement_is_clamped_to_table() {
        let model = model(4.5, None);
        assert_relative_eq!(*model.u_value().inner(), 0.40, max_relative = 1e-9);
        assert_eq!(
            model.u_value().warnings().first().map(Warning::path),
            Some(&warning_path!["per-floor-type", "depth"])
        );
    }
}
