//! The floor description as it arrives from the user: any value may be
//! missing, and nothing has been checked beyond its JSON shape.

use crate::core::floor_layer::{FloorLayerInput, FloorLayerSpec};
use crate::core::floor_types::custom::CustomFloorInput;
use crate::core::floor_types::exposed::{ExposedFloorInput, ExposedTo};
use crate::core::floor_types::heated_basement::HeatedBasementFloorInput;
use crate::core::floor_types::solid::{EdgeInsulation, SolidFloorInput};
use crate::core::floor_types::suspended::SuspendedFloorInput;
use crate::core::floor_types::{CommonInput, FloorUValueModelInput, PerFloorTypeInput};
use crate::core::insulation::{InsulationInput, InsulationMaterial, InsulationSpec};
use crate::core::warnings::{warning_path, WarningCollector, WarningPath, WithWarnings};
use crate::errors::RequiredValueMissingError;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::io::{BufReader, Read};

/// Parse a floor description from JSON and check its geometry ranges.
pub fn ingest_for_processing(json: impl Read) -> Result<FloorUValueModelSpec, anyhow::Error> {
    let spec: FloorUValueModelSpec = serde_json::from_reader(BufReader::new(json))?;
    Validate::validate(&spec.common)
        .map_err(|errors| anyhow!("invalid floor geometry: {errors}"))?;

    Ok(spec)
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FloorUValueModelSpec {
    #[serde(default)]
    pub common: CommonSpec,
    pub per_floor_type: PerFloorTypeSpec,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CommonSpec {
    /// m2
    #[validate(exclusive_minimum = 0.)]
    pub area: Option<f64>,
    /// m
    #[validate(minimum = 0.)]
    pub exposed_perimeter: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(
    tag = "floor-type",
    rename_all_fields = "kebab-case",
    deny_unknown_fields
)]
pub enum PerFloorTypeSpec {
    #[serde(rename = "custom")]
    Custom { u_value: Option<f64> },
    #[serde(rename = "solid")]
    Solid {
        #[serde(default)]
        all_over_insulation: InsulationSpec,
        #[serde(default)]
        edge_insulation: EdgeInsulationSpec,
    },
    #[serde(rename = "suspended")]
    Suspended {
        /// m2
        ventilation_combined_area: Option<f64>,
        /// m
        under_floor_space_perimeter: Option<f64>,
        #[serde(default, rename = "layers")]
        insulation_layers: Vec<FloorLayerSpec>,
    },
    #[serde(rename = "heated basement")]
    HeatedBasement {
        /// m
        depth: Option<f64>,
        #[serde(default)]
        insulation: InsulationSpec,
    },
    #[serde(rename = "exposed")]
    Exposed {
        exposed_to: Option<ExposedTo>,
        #[serde(default)]
        layers: Vec<FloorLayerSpec>,
    },
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "lowercase",
    rename_all_fields = "kebab-case",
    deny_unknown_fields
)]
pub enum EdgeInsulationSpec {
    #[default]
    None,
    Horizontal {
        material: Option<InsulationMaterial>,
        thickness: Option<f64>,
        /// m
        width: Option<f64>,
    },
    Vertical {
        material: Option<InsulationMaterial>,
        thickness: Option<f64>,
        /// m
        depth: Option<f64>,
    },
}

fn per_floor_type_path() -> WarningPath {
    warning_path!["per-floor-type"]
}

fn required<T>(value: Option<T>, path: WarningPath) -> Result<T, RequiredValueMissingError> {
    value.ok_or_else(|| RequiredValueMissingError::new(path))
}

/// Collect the warnings of a nested validation and hand back its result,
/// with both re-rooted at `prefix`.
fn sink_validated<T>(
    collector: &mut WarningCollector,
    validated: WithWarnings<Result<T, RequiredValueMissingError>>,
    prefix: &WarningPath,
) -> Result<T, RequiredValueMissingError> {
    collector
        .sink(validated.with_path_prefix(prefix))
        .map_err(|error| error.with_path_prefix(prefix))
}

impl FloorUValueModelSpec {
    /// Check that everything needed to calculate a U-value is present.
    ///
    /// Values that were supplied but will not be used are reported as
    /// warnings rather than errors.
    pub fn validate(
        &self,
    ) -> WithWarnings<Result<FloorUValueModelInput, RequiredValueMissingError>> {
        let mut collector = WarningCollector::new();
        let result = self.validate_into(&mut collector);
        collector.finish(result)
    }

    fn validate_into(
        &self,
        collector: &mut WarningCollector,
    ) -> Result<FloorUValueModelInput, RequiredValueMissingError> {
        let common = CommonInput::new(
            required(self.common.area, warning_path!["common", "area"])?,
            required(
                self.common.exposed_perimeter,
                warning_path!["common", "exposed-perimeter"],
            )?,
        );

        Ok(FloorUValueModelInput {
            common,
            per_floor_type: self.per_floor_type.validate_into(collector)?,
        })
    }
}

impl PerFloorTypeSpec {
    fn validate_into(
        &self,
        collector: &mut WarningCollector,
    ) -> Result<PerFloorTypeInput, RequiredValueMissingError> {
        let root = per_floor_type_path();

        Ok(match self {
            PerFloorTypeSpec::Custom { u_value } => PerFloorTypeInput::Custom(CustomFloorInput {
                u_value: required(*u_value, root.join("u-value"))?,
            }),
            PerFloorTypeSpec::Solid {
                all_over_insulation,
                edge_insulation,
            } => PerFloorTypeInput::Solid(SolidFloorInput {
                all_over_insulation: sink_validated(
                    collector,
                    all_over_insulation.validate(),
                    &root.join("all-over-insulation"),
                )?,
                edge_insulation: sink_validated(
                    collector,
                    edge_insulation.validate(),
                    &root.join("edge-insulation"),
                )?,
            }),
            PerFloorTypeSpec::Suspended {
                ventilation_combined_area,
                under_floor_space_perimeter,
                insulation_layers,
            } => PerFloorTypeInput::Suspended(SuspendedFloorInput {
                ventilation_combined_area: required(
                    *ventilation_combined_area,
                    root.join("ventilation-combined-area"),
                )?,
                under_floor_space_perimeter: required(
                    *under_floor_space_perimeter,
                    root.join("under-floor-space-perimeter"),
                )?,
                insulation_layers: validate_layers(insulation_layers, collector)?,
            }),
            PerFloorTypeSpec::HeatedBasement { depth, insulation } => {
                PerFloorTypeInput::HeatedBasement(HeatedBasementFloorInput {
                    depth: required(*depth, root.join("depth"))?,
                    insulation: sink_validated(
                        collector,
                        insulation.validate(),
                        &root.join("insulation"),
                    )?,
                })
            }
            PerFloorTypeSpec::Exposed { exposed_to, layers } => {
                PerFloorTypeInput::Exposed(ExposedFloorInput {
                    exposed_to: required(*exposed_to, root.join("exposed-to"))?,
                    layers: validate_layers(layers, collector)?,
                })
            }
        })
    }
}

fn validate_layers(
    layers: &[FloorLayerSpec],
    collector: &mut WarningCollector,
) -> Result<Vec<FloorLayerInput>, RequiredValueMissingError> {
    let layers_path = per_floor_type_path().join("layers");
    layers
        .iter()
        .enumerate()
        .map(|(index, layer)| {
            sink_validated(
                collector,
                FloorLayerInput::validate(layer),
                &layers_path.join(index),
            )
        })
        .collect()
}

impl EdgeInsulationSpec {
    /// Paths are relative to the edge insulation itself.
    pub fn validate(&self) -> WithWarnings<Result<EdgeInsulation, RequiredValueMissingError>> {
        let mut collector = WarningCollector::new();
        let result = self.validate_into(&mut collector);
        collector.finish(result)
    }

    fn validate_into(
        &self,
        collector: &mut WarningCollector,
    ) -> Result<EdgeInsulation, RequiredValueMissingError> {
        let validate_insulation = |material: &Option<InsulationMaterial>,
                                   thickness: &Option<f64>,
                                   collector: &mut WarningCollector|
         -> Result<InsulationInput, RequiredValueMissingError> {
            let material = required(material.clone(), warning_path!["material"])?;
            let spec = InsulationSpec {
                material: Some(material),
                thickness: *thickness,
            };
            collector
                .sink(spec.validate())?
                .ok_or_else(|| RequiredValueMissingError::new(warning_path!["thickness"]))
        };

        Ok(match self {
            EdgeInsulationSpec::None => EdgeInsulation::None,
            EdgeInsulationSpec::Horizontal {
                material,
                thickness,
                width,
            } => EdgeInsulation::Horizontal {
                insulation: validate_insulation(material, thickness, collector)?,
                width: required(*width, warning_path!["width"])?,
            },
            EdgeInsulationSpec::Vertical {
                material,
                thickness,
                depth,
            } => EdgeInsulation::Vertical {
                insulation: validate_insulation(material, thickness, collector)?,
                depth: required(*depth, warning_path!["depth"])?,
            },
        })
    }
}
