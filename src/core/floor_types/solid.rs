use super::{finite_u_value, CommonInput};
use crate::core::datasets::{
    edge_insulation_factor_horizontal, edge_insulation_factor_vertical, solid_floor_u_value,
};
use crate::core::insulation::{insulation_resistance, InsulationInput};
use crate::core::tabular::{into_value_range_warnings, TabularFunctionRangeWarning};
use crate::core::warnings::{warning_path, WarningCollector, WarningPath, WithWarnings};
use std::sync::OnceLock;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeInsulation {
    None,
    /// A band of insulation laid flat around the floor edge, `width` metres
    /// from the wall.
    Horizontal {
        insulation: InsulationInput,
        width: f64,
    },
    /// A skirt of insulation down the foundation, `depth` metres below
    /// ground.
    Vertical {
        insulation: InsulationInput,
        depth: f64,
    },
}

/// A ground-bearing floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidFloorInput {
    pub all_over_insulation: Option<InsulationInput>,
    pub edge_insulation: EdgeInsulation,
}

#[derive(Debug)]
pub struct SolidFloorUValueModel {
    common: CommonInput,
    input: SolidFloorInput,
    u_value_without_edge_insulation: OnceLock<WithWarnings<f64>>,
    edge_insulation_adjustment_factor: OnceLock<WithWarnings<f64>>,
    u_value: OnceLock<WithWarnings<f64>>,
}

type EdgeFactorLookup = fn(f64, f64) -> WithWarnings<f64, TabularFunctionRangeWarning>;

fn edge_insulation_path() -> WarningPath {
    warning_path!["per-floor-type", "edge-insulation"]
}

impl SolidFloorUValueModel {
    pub fn new(common: CommonInput, input: SolidFloorInput) -> Self {
        Self {
            common,
            input,
            u_value_without_edge_insulation: Default::default(),
            edge_insulation_adjustment_factor: Default::default(),
            u_value: Default::default(),
        }
    }

    pub fn common(&self) -> &CommonInput {
        &self.common
    }

    pub fn u_value_without_edge_insulation(&self) -> &WithWarnings<f64> {
        self.u_value_without_edge_insulation.get_or_init(|| {
            let all_over_insulation_path = warning_path!["per-floor-type", "all-over-insulation"];
            let mut collector = WarningCollector::new();

            let resistance = collector.sink(
                insulation_resistance(self.input.all_over_insulation.as_ref())
                    .with_path_prefix(&all_over_insulation_path),
            );
            let perimeter_area_ratio = collector.sink(self.common.perimeter_area_ratio());
            let u_value = collector.sink(into_value_range_warnings(
                solid_floor_u_value(resistance, perimeter_area_ratio),
                &all_over_insulation_path.join("resistance"),
                &warning_path!["perimeter-area-ratio"],
            ));

            collector.finish(u_value)
        })
    }

    /// W/(m.K), 0 without edge insulation
    pub fn edge_insulation_adjustment_factor(&self) -> &WithWarnings<f64> {
        self.edge_insulation_adjustment_factor.get_or_init(|| {
            let (insulation, lookup, extent, extent_key) = match &self.input.edge_insulation {
                EdgeInsulation::None => return WithWarnings::new(0.),
                EdgeInsulation::Horizontal { insulation, width } => (
                    insulation,
                    edge_insulation_factor_horizontal as EdgeFactorLookup,
                    *width,
                    "width",
                ),
                EdgeInsulation::Vertical { insulation, depth } => (
                    insulation,
                    edge_insulation_factor_vertical as EdgeFactorLookup,
                    *depth,
                    "depth",
                ),
            };

            let mut collector = WarningCollector::new();
            let resistance = collector.sink(
                insulation_resistance(Some(insulation)).with_path_prefix(&edge_insulation_path()),
            );
            let factor = collector.sink(into_value_range_warnings(
                lookup(resistance, extent),
                &edge_insulation_path().join("resistance"),
                &edge_insulation_path().join(extent_key),
            ));

            collector.finish(factor)
        })
    }

    pub fn u_value(&self) -> &WithWarnings<f64> {
        self.u_value.get_or_init(|| {
            let mut collector = WarningCollector::new();
            let without_edge_insulation =
                collector.sink_cloned(self.u_value_without_edge_insulation());
            let factor = collector.sink_cloned(self.edge_insulation_adjustment_factor());
            let perimeter_area_ratio = collector.sink(self.common.perimeter_area_ratio());

            let u_value = without_edge_insulation + factor * perimeter_area_ratio;
            debug!(u_value, without_edge_insulation, factor, "solid floor u-value");

            finite_u_value(collector.finish(u_value))
        })
    }
}
