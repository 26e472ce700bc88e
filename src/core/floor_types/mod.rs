//! The five floor archetypes and the dispatch from a validated input to the
//! model that calculates its U-value.
//!
//! Every model calculates lazily: nothing is evaluated until
//! [`FloorUValueModel::u_value`] is first called, and every intermediate
//! quantity is calculated at most once per model.

pub mod custom;
pub mod exposed;
pub mod heated_basement;
pub mod solid;
pub mod suspended;

use crate::core::combined_method::Layer;
use crate::core::floor_layer::FloorLayerInput;
use crate::core::warnings::{warning_path, Warning, WarningCollector, WarningPath, WithWarnings};
use custom::{CustomFloorInput, CustomFloorUValueModel};
use exposed::{ExposedFloorInput, ExposedFloorUValueModel};
use heated_basement::{HeatedBasementFloorInput, HeatedBasementFloorUValueModel};
use ordered_float::OrderedFloat;
use serde::Serialize;
use solid::{SolidFloorInput, SolidFloorUValueModel};
use strum::Display;
use suspended::{SuspendedFloorInput, SuspendedFloorUValueModel};
use tracing::debug;

/// Geometry shared by every floor type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommonInput {
    /// m2
    pub area: f64,
    /// Length of the floor edge adjoining the outside or an unheated space, m
    pub exposed_perimeter: f64,
}

impl CommonInput {
    pub fn new(area: f64, exposed_perimeter: f64) -> Self {
        Self {
            area,
            exposed_perimeter,
        }
    }

    /// Exposed perimeter divided by area, in 1/m. A zero area gives a ratio
    /// of 0 rather than a non-finite one.
    pub fn perimeter_area_ratio(&self) -> WithWarnings<f64> {
        if self.area == 0. {
            return WithWarnings::with_warnings(
                0.,
                [Warning::ZeroDivision {
                    path: warning_path!["common", "area"],
                    replaced_with: OrderedFloat(0.),
                }],
            );
        }

        WithWarnings::new(self.exposed_perimeter / self.area)
    }
}

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum FloorType {
    #[strum(serialize = "custom")]
    #[serde(rename = "custom")]
    Custom,
    #[strum(serialize = "solid")]
    #[serde(rename = "solid")]
    Solid,
    #[strum(serialize = "suspended")]
    #[serde(rename = "suspended")]
    Suspended,
    #[strum(serialize = "heated basement")]
    #[serde(rename = "heated basement")]
    HeatedBasement,
    #[strum(serialize = "exposed")]
    #[serde(rename = "exposed")]
    Exposed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PerFloorTypeInput {
    Custom(CustomFloorInput),
    Solid(SolidFloorInput),
    Suspended(SuspendedFloorInput),
    HeatedBasement(HeatedBasementFloorInput),
    Exposed(ExposedFloorInput),
}

impl PerFloorTypeInput {
    pub fn floor_type(&self) -> FloorType {
        match self {
            PerFloorTypeInput::Custom(_) => FloorType::Custom,
            PerFloorTypeInput::Solid(_) => FloorType::Solid,
            PerFloorTypeInput::Suspended(_) => FloorType::Suspended,
            PerFloorTypeInput::HeatedBasement(_) => FloorType::HeatedBasement,
            PerFloorTypeInput::Exposed(_) => FloorType::Exposed,
        }
    }
}

/// A fully validated floor, ready to have its U-value calculated.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorUValueModelInput {
    pub common: CommonInput,
    pub per_floor_type: PerFloorTypeInput,
}

#[derive(Debug)]
pub enum FloorUValueModel {
    Custom(CustomFloorUValueModel),
    Solid(SolidFloorUValueModel),
    Suspended(SuspendedFloorUValueModel),
    HeatedBasement(HeatedBasementFloorUValueModel),
    Exposed(ExposedFloorUValueModel),
}

impl FloorUValueModel {
    pub fn floor_type(&self) -> FloorType {
        match self {
            FloorUValueModel::Custom(_) => FloorType::Custom,
            FloorUValueModel::Solid(_) => FloorType::Solid,
            FloorUValueModel::Suspended(_) => FloorType::Suspended,
            FloorUValueModel::HeatedBasement(_) => FloorType::HeatedBasement,
            FloorUValueModel::Exposed(_) => FloorType::Exposed,
        }
    }

    pub fn common(&self) -> &CommonInput {
        match self {
            FloorUValueModel::Custom(model) => model.common(),
            FloorUValueModel::Solid(model) => model.common(),
            FloorUValueModel::Suspended(model) => model.common(),
            FloorUValueModel::HeatedBasement(model) => model.common(),
            FloorUValueModel::Exposed(model) => model.common(),
        }
    }

    /// U-value of the floor in W/(m2.K), always finite.
    pub fn u_value(&self) -> &WithWarnings<f64> {
        match self {
            FloorUValueModel::Custom(model) => model.u_value(),
            FloorUValueModel::Solid(model) => model.u_value(),
            FloorUValueModel::Suspended(model) => model.u_value(),
            FloorUValueModel::HeatedBasement(model) => model.u_value(),
            FloorUValueModel::Exposed(model) => model.u_value(),
        }
    }
}

pub fn construct_floor_u_value_model(input: FloorUValueModelInput) -> FloorUValueModel {
    let FloorUValueModelInput {
        common,
        per_floor_type,
    } = input;
    debug!(floor_type = %per_floor_type.floor_type(), "constructing floor u-value model");

    match per_floor_type {
        PerFloorTypeInput::Custom(input) => {
            FloorUValueModel::Custom(CustomFloorUValueModel::new(common, input))
        }
        PerFloorTypeInput::Solid(input) => {
            FloorUValueModel::Solid(SolidFloorUValueModel::new(common, input))
        }
        PerFloorTypeInput::Suspended(input) => {
            FloorUValueModel::Suspended(SuspendedFloorUValueModel::new(common, input))
        }
        PerFloorTypeInput::HeatedBasement(input) => {
            FloorUValueModel::HeatedBasement(HeatedBasementFloorUValueModel::new(common, input))
        }
        PerFloorTypeInput::Exposed(input) => {
            FloorUValueModel::Exposed(ExposedFloorUValueModel::new(common, input))
        }
    }
}

fn layers_path() -> WarningPath {
    warning_path!["per-floor-type", "layers"]
}

/// Combined method layers for a list of floor layers, with any warnings
/// tagged by the index of the layer they came from.
fn combined_method_layers(layers: &[FloorLayerInput]) -> WithWarnings<Vec<Layer>> {
    let mut collector = WarningCollector::new();
    let layers = layers
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            collector.sink(
                layer
                    .as_combined_method_layer()
                    .with_path_prefix(&layers_path().join(index)),
            )
        })
        .collect();

    collector.finish(layers)
}

/// The last step of every floor model: a U-value that is not finite is
/// replaced with 0.
fn finite_u_value(mut u_value: WithWarnings<f64>) -> WithWarnings<f64> {
    let value = *u_value.inner();
    if value.is_finite() {
        return u_value;
    }

    u_value.push(Warning::NonFiniteNumberReplaced {
        path: warning_path!["u-value"],
        value: value.into(),
        replaced_with: OrderedFloat(0.),
    });
    u_value.map(|_| 0.)
}
