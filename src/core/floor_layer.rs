use crate::core::combined_method::{Layer, ResistanceElement};
use crate::core::insulation::{
    insulation_resistance, resolve_thickness, InsulationInput, InsulationMaterial,
};
use crate::core::proportion::Proportion;
use crate::core::units::millimetres_to_metres;
use crate::core::warnings::{warning_path, Warning, WarningCollector, WithWarnings};
use crate::errors::RequiredValueMissingError;
use serde::{Deserialize, Serialize};

/// A floor layer as entered by the user. Every field may still be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FloorLayerSpec {
    /// in metres
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(default)]
    pub thickness_mm: Option<f64>,
    pub main_material: Option<InsulationMaterial>,
    #[serde(default)]
    pub bridging: BridgingSpec,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BridgingSpec {
    pub material: Option<InsulationMaterial>,
    pub proportion: Option<Proportion>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bridging {
    pub material: InsulationMaterial,
    pub proportion: Proportion,
}

/// A validated floor layer.
///
/// The thickness is present exactly when one of the materials is
/// conductivity based, unless the user supplied an unneeded thickness (which
/// is kept and was flagged during validation).
#[derive(Clone, Debug, PartialEq)]
pub struct FloorLayerInput {
    thickness: Option<f64>,
    main_material: InsulationMaterial,
    bridging: Option<Bridging>,
}

impl FloorLayerSpec {
    fn thickness_in_metres(&self, collector: &mut WarningCollector) -> Option<f64> {
        match (self.thickness, self.thickness_mm) {
            (Some(thickness), Some(_)) => {
                collector.log(Warning::UnnecessaryValue {
                    path: warning_path!["thickness-mm"],
                });
                Some(thickness)
            }
            (Some(thickness), None) => Some(thickness),
            (None, Some(thickness_mm)) => Some(millimetres_to_metres(thickness_mm)),
            (None, None) => None,
        }
    }
}

impl FloorLayerInput {
    pub fn validate(
        spec: &FloorLayerSpec,
    ) -> WithWarnings<Result<FloorLayerInput, RequiredValueMissingError>> {
        let mut collector = WarningCollector::new();
        let result = Self::validate_into(spec, &mut collector);
        collector.finish(result)
    }

    fn validate_into(
        spec: &FloorLayerSpec,
        collector: &mut WarningCollector,
    ) -> Result<FloorLayerInput, RequiredValueMissingError> {
        let main_material = spec
            .main_material
            .clone()
            .ok_or_else(|| RequiredValueMissingError::new(warning_path!["main-material"]))?;

        let bridging = match (&spec.bridging.material, spec.bridging.proportion) {
            (None, proportion) => {
                if proportion.is_some() {
                    collector.log(Warning::UnnecessaryValue {
                        path: warning_path!["bridging", "proportion"],
                    });
                }
                None
            }
            (Some(_), None) => {
                return Err(RequiredValueMissingError::new(warning_path![
                    "bridging",
                    "proportion"
                ]))
            }
            (Some(material), Some(proportion)) => Some(Bridging {
                material: material.clone(),
                proportion,
            }),
        };

        let needs_thickness = main_material.needs_thickness()
            || bridging
                .as_ref()
                .is_some_and(|bridging| bridging.material.needs_thickness());
        let thickness = spec.thickness_in_metres(collector);
        let thickness =
            resolve_thickness(needs_thickness, thickness, &warning_path!["thickness"], collector)?;

        Ok(FloorLayerInput {
            thickness,
            main_material,
            bridging,
        })
    }

    pub fn thickness(&self) -> Option<f64> {
        self.thickness
    }

    pub fn main_material(&self) -> &InsulationMaterial {
        &self.main_material
    }

    pub fn bridging(&self) -> Option<&Bridging> {
        self.bridging.as_ref()
    }

    /// Convert to one layer of a combined method stack: the main material
    /// takes whatever share the bridging material leaves.
    pub fn as_combined_method_layer(&self) -> WithWarnings<Layer> {
        let mut collector = WarningCollector::new();

        let main_proportion = self
            .bridging
            .as_ref()
            .map_or(Proportion::WHOLE, |bridging| bridging.proportion.complement());
        let main = collector.sink(
            self.element_for(&self.main_material, main_proportion)
                .with_path_prefix(&warning_path!["main-material"]),
        );

        let bridging = self.bridging.as_ref().map(|bridging| {
            collector.sink(
                self.element_for(&bridging.material, bridging.proportion)
                    .with_path_prefix(&warning_path!["bridging-material"]),
            )
        });

        collector.finish(Layer::bridged(main, bridging))
    }

    fn element_for(
        &self,
        material: &InsulationMaterial,
        proportion: Proportion,
    ) -> WithWarnings<ResistanceElement> {
        let input = InsulationInput::from_material(material, self.thickness);
        insulation_resistance(input.as_ref())
            .map(|resistance| ResistanceElement::new(&material.name, resistance, proportion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warnings::WarningPath;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn mineral_wool() -> InsulationMaterial {
        InsulationMaterial::conductivity("mineral wool", 0.04)
    }

    #[fixture]
    fn timber() -> InsulationMaterial {
        InsulationMaterial::conductivity("timber", 0.12)
    }

    #[fixture]
    fn board() -> InsulationMaterial {
        InsulationMaterial::resistance("insulation board", 2.5)
    }

    fn missing_path(spec: &FloorLayerSpec) -> WarningPath {
        FloorLayerInput::validate(spec)
            .inner()
            .clone()
            .unwrap_err()
            .path
    }

    #[rstest]
    fn test_main_material_is_required() {
        let spec = FloorLayerSpec {
            thickness: Some(0.1),
            ..Default::default()
        };
        assert_eq!(missing_path(&spec), warning_path!["main-material"]);
    }

    #[rstest]
    fn test_bridging_material_requires_proportion(
        mineral_wool: InsulationMaterial,
        timber: InsulationMaterial,
    ) {
        let spec = FloorLayerSpec {
            thickness: Some(0.1),
            main_material: Some(mineral_wool),
            bridging: BridgingSpec {
                material: Some(timber),
                proportion: None,
            },
            ..Default::default()
        };
        assert_eq!(missing_path(&spec), warning_path!["bridging", "proportion"]);
    }

    #[rstest]
    fn test_conductivity_main_material_requires_thickness(mineral_wool: InsulationMaterial) {
        let spec = FloorLayerSpec {
            main_material: Some(mineral_wool),
            ..Default::default()
        };
        assert_eq!(missing_path(&spec), warning_path!["thickness"]);
    }

    #[rstest]
    fn test_conductivity_bridging_material_requires_thickness(
        board: InsulationMaterial,
        timber: InsulationMaterial,
    ) {
        let spec = FloorLayerSpec {
            main_material: Some(board),
            bridging: BridgingSpec {
                material: Some(timber),
                proportion: Some(Proportion::from_ratio(0.15).unwrap()),
            },
            ..Default::default()
        };
        assert_eq!(missing_path(&spec), warning_path!["thickness"]);
    }

    #[rstest]
    fn test_unneeded_thickness_is_kept_and_flagged(board: InsulationMaterial) {
        let spec = FloorLayerSpec {
            thickness: Some(0.05),
            main_material: Some(board),
            ..Default::default()
        };
        let result = FloorLayerInput::validate(&spec);
        let input = result.inner().clone().unwrap();
        assert_eq!(input.thickness(), Some(0.05));
        assert_eq!(
            result.warnings().iter().collect::<Vec<_>>(),
            vec![&Warning::UnnecessaryValue {
                path: warning_path!["thickness"]
            }]
        );
    }

    #[rstest]
    fn test_thickness_in_millimetres_is_converted(mineral_wool: InsulationMaterial) {
        let spec = FloorLayerSpec {
            thickness_mm: Some(100.),
            main_material: Some(mineral_wool),
            ..Default::default()
        };
        let result = FloorLayerInput::validate(&spec);
        assert_eq!(result.inner().clone().unwrap().thickness(), Some(0.1));
        assert!(result.warnings().is_empty());
    }

    #[rstest]
    fn test_bridged_layer_splits_proportions(
        mineral_wool: InsulationMaterial,
        timber: InsulationMaterial,
    ) {
        let spec = FloorLayerSpec {
            thickness: Some(0.14),
            main_material: Some(mineral_wool),
            bridging: BridgingSpec {
                material: Some(timber),
                proportion: Some(Proportion::from_ratio(0.15).unwrap()),
            },
            ..Default::default()
        };
        let input = FloorLayerInput::validate(&spec).inner().clone().unwrap();
        let layer = input.as_combined_method_layer();
        assert!(layer.warnings().is_empty());

        let elements = layer.inner().elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].name.as_str(), "mineral wool");
        assert_relative_eq!(elements[0].resistance, 3.5, max_relative = 1e-12);
        assert_relative_eq!(elements[0].proportion.as_ratio(), 0.85, max_relative = 1e-12);
        assert_eq!(elements[1].name.as_str(), "timber");
        assert_relative_eq!(elements[1].resistance, 0.14 / 0.12, max_relative = 1e-12);
        assert_relative_eq!(elements[1].proportion.as_ratio(), 0.15, max_relative = 1e-12);
    }

    #[rstest]
    fn test_unbridged_layer_is_whole(board: InsulationMaterial) {
        let spec = FloorLayerSpec {
            main_material: Some(board),
            ..Default::default()
        };
        let input = FloorLayerInput::validate(&spec).inner().clone().unwrap();
        let layer = input.as_combined_method_layer();
        let elements = layer.inner().elements();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].proportion, Proportion::WHOLE);
        assert_eq!(elements[0].resistance, 2.5);
    }

    #[rstest]
    fn test_zero_division_warnings_are_tagged_with_their_material() {
        let spec = FloorLayerSpec {
            thickness: Some(0.1),
            main_material: Some(InsulationMaterial::conductivity("bad data", 0.)),
            bridging: BridgingSpec {
                material: Some(InsulationMaterial::conductivity("also bad", 0.)),
                proportion: Some(Proportion::from_ratio(0.1).unwrap()),
            },
            ..Default::default()
        };
        let input = FloorLayerInput::validate(&spec).inner().clone().unwrap();
        let layer = input.as_combined_method_layer();
        let paths = layer
            .warnings()
            .iter()
            .map(|warning| warning.path().clone())
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                warning_path!["main-material", "resistance"],
                warning_path!["bridging-material", "resistance"],
            ]
        );
    }
}
