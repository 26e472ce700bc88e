use super::{combined_method_layers, finite_u_value, layers_path, CommonInput};
use crate::core::combined_method::CombinedMethodModel;
use crate::core::floor_layer::FloorLayerInput;
use crate::core::units::{R_SE, R_SE_UNHEATED_SPACE, R_SI_DOWNWARDS};
use crate::core::warnings::{Warning, WarningCollector, WithWarnings};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ExposedTo {
    #[serde(rename = "outside air")]
    OutsideAir,
    #[serde(rename = "unheated space")]
    UnheatedSpace,
}

impl ExposedTo {
    /// m2.K/W
    pub fn external_surface_resistance(&self) -> f64 {
        match self {
            ExposedTo::OutsideAir => R_SE,
            ExposedTo::UnheatedSpace => R_SE_UNHEATED_SPACE,
        }
    }
}

/// A floor over outside air or an unheated space such as a garage, with no
/// ground contact.
#[derive(Clone, Debug, PartialEq)]
pub struct ExposedFloorInput {
    pub exposed_to: ExposedTo,
    /// Top to bottom
    pub layers: Vec<FloorLayerInput>,
}

#[derive(Debug)]
pub struct ExposedFloorUValueModel {
    common: CommonInput,
    input: ExposedFloorInput,
    combined_method_model: OnceLock<WithWarnings<CombinedMethodModel>>,
    u_value: OnceLock<WithWarnings<f64>>,
}

impl ExposedFloorUValueModel {
    pub fn new(common: CommonInput, input: ExposedFloorInput) -> Self {
        Self {
            common,
            input,
            combined_method_model: Default::default(),
            u_value: Default::default(),
        }
    }

    pub fn common(&self) -> &CommonInput {
        &self.common
    }

    pub fn combined_method_model(&self) -> &WithWarnings<CombinedMethodModel> {
        self.combined_method_model.get_or_init(|| {
            combined_method_layers(&self.input.layers).map(|layers| {
                CombinedMethodModel::with_surfaces(
                    R_SI_DOWNWARDS,
                    layers,
                    self.input.exposed_to.external_surface_resistance(),
                )
            })
        })
    }

    pub fn u_value(&self) -> &WithWarnings<f64> {
        self.u_value.get_or_init(|| {
            let combined_method = self.combined_method_model();
            let mut collector = WarningCollector::new();
            for warning in combined_method.warnings() {
                collector.log(warning.clone());
            }

            let u_value = combined_method.inner().u_value().unwrap_or_else(|_| {
                collector.log(Warning::ZeroDivision {
                    path: layers_path(),
                    replaced_with: OrderedFloat(0.),
                });
                0.
            });
            debug!(u_value, exposed_to = ?self.input.exposed_to, "exposed floor u-value");

            finite_u_value(collector.finish(u_value))
        })
    }
}
