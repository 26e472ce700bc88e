use super::{combined_method_layers, finite_u_value, layers_path, CommonInput};
use crate::core::combined_method::CombinedMethodModel;
use crate::core::datasets::suspended_floor_uninsulated_u_value;
use crate::core::floor_layer::FloorLayerInput;
use crate::core::tabular::into_value_range_warnings;
use crate::core::units::{R_SE_UNHEATED_SPACE, R_SI_DOWNWARDS};
use crate::core::warnings::{warning_path, Warning, WarningCollector, WithWarnings};
use ordered_float::OrderedFloat;
use std::sync::OnceLock;
use tracing::debug;

/// m2.K/W, the timber deck assumed by the uninsulated U-value table
const DECK_RESISTANCE: f64 = 0.2;

/// A floor deck over a ventilated void.
#[derive(Clone, Debug, PartialEq)]
pub struct SuspendedFloorInput {
    /// Total area of the ventilation openings into the void, m2
    pub ventilation_combined_area: f64,
    /// m
    pub under_floor_space_perimeter: f64,
    /// Insulation fitted to the deck, top to bottom. Empty when uninsulated.
    pub insulation_layers: Vec<FloorLayerInput>,
}

#[derive(Debug)]
pub struct SuspendedFloorUValueModel {
    common: CommonInput,
    input: SuspendedFloorInput,
    uninsulated_u_value: OnceLock<WithWarnings<f64>>,
    combined_method_model: OnceLock<Option<WithWarnings<CombinedMethodModel>>>,
    u_value: OnceLock<WithWarnings<f64>>,
}

impl SuspendedFloorUValueModel {
    pub fn new(common: CommonInput, input: SuspendedFloorInput) -> Self {
        Self {
            common,
            input,
            uninsulated_u_value: Default::default(),
            combined_method_model: Default::default(),
            u_value: Default::default(),
        }
    }

    pub fn common(&self) -> &CommonInput {
        &self.common
    }

    /// Ventilation opening area per metre of underfloor perimeter, m2/m
    pub fn ventilation_ratio(&self) -> WithWarnings<f64> {
        if self.input.under_floor_space_perimeter == 0. {
            return WithWarnings::with_warnings(
                0.,
                [Warning::ZeroDivision {
                    path: warning_path!["per-floor-type", "under-floor-space-perimeter"],
                    replaced_with: OrderedFloat(0.),
                }],
            );
        }

        WithWarnings::new(
            self.input.ventilation_combined_area / self.input.under_floor_space_perimeter,
        )
    }

    pub fn uninsulated_u_value(&self) -> &WithWarnings<f64> {
        self.uninsulated_u_value.get_or_init(|| {
            let mut collector = WarningCollector::new();
            let ventilation_ratio = collector.sink(self.ventilation_ratio());
            let perimeter_area_ratio = collector.sink(self.common.perimeter_area_ratio());
            let u_value = collector.sink(into_value_range_warnings(
                suspended_floor_uninsulated_u_value(ventilation_ratio, perimeter_area_ratio),
                &warning_path!["per-floor-type", "ventilation-ratio"],
                &warning_path!["perimeter-area-ratio"],
            ));

            collector.finish(u_value)
        })
    }

    /// The insulation layers between two 0.17 m2.K/W surfaces, or `None` for
    /// an uninsulated floor.
    pub fn combined_method_model(&self) -> Option<&WithWarnings<CombinedMethodModel>> {
        self.combined_method_model
            .get_or_init(|| {
                if self.input.insulation_layers.is_empty() {
                    return None;
                }

                Some(
                    combined_method_layers(&self.input.insulation_layers).map(|layers| {
                        CombinedMethodModel::with_surfaces(
                            R_SI_DOWNWARDS,
                            layers,
                            R_SE_UNHEATED_SPACE,
                        )
                    }),
                )
            })
            .as_ref()
    }

    pub fn u_value(&self) -> &WithWarnings<f64> {
        self.u_value.get_or_init(|| {
            let mut collector = WarningCollector::new();
            let uninsulated = collector.sink_cloned(self.uninsulated_u_value());

            let Some(combined_method) = self.combined_method_model() else {
                return finite_u_value(collector.finish(uninsulated));
            };
            for warning in combined_method.warnings() {
                collector.log(warning.clone());
            }

            let u_value = match combined_method.inner().resistance() {
                // The insulated deck and its two surfaces replace the deck
                // and surfaces the uninsulated value was tabulated with.
                Ok(resistance) => {
                    1. / (1. / uninsulated - DECK_RESISTANCE + resistance
                        - R_SI_DOWNWARDS
                        - R_SE_UNHEATED_SPACE)
                }
                Err(_) => {
                    collector.log(Warning::ZeroDivision {
                        path: layers_path(),
                        replaced_with: uninsulated.into(),
                    });
                    uninsulated
                }
            };
            debug!(u_value, uninsulated, "suspended floor u-value");

            finite_u_value(collector.finish(u_value))
        })
    }
}
