//! Insulation and construction materials, and the conversion of a material
//! plus a thickness into a thermal resistance.

use crate::core::warnings::{warning_path, Warning, WarningCollector, WarningPath, WithWarnings};
use crate::errors::RequiredValueMissingError;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InsulationMaterial {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub mechanism: MaterialMechanism,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "mechanism", rename_all = "kebab-case")]
pub enum MaterialMechanism {
    /// W/(m.K); a thickness is needed to get a resistance
    Conductivity { conductivity: f64 },
    /// m2.K/W, independent of thickness
    Resistance { resistance: f64 },
}

impl InsulationMaterial {
    pub fn new(name: &str, mechanism: MaterialMechanism) -> Self {
        Self {
            name: name.into(),
            tag: None,
            description: None,
            mechanism,
        }
    }

    pub fn conductivity(name: &str, conductivity: f64) -> Self {
        Self::new(name, MaterialMechanism::Conductivity { conductivity })
    }

    pub fn resistance(name: &str, resistance: f64) -> Self {
        Self::new(name, MaterialMechanism::Resistance { resistance })
    }

    pub fn needs_thickness(&self) -> bool {
        matches!(self.mechanism, MaterialMechanism::Conductivity { .. })
    }
}

/// A material reduced to the numbers needed to derive its resistance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InsulationInput {
    Conductivity { conductivity: f64, thickness: f64 },
    Resistance { resistance: f64 },
}

impl InsulationInput {
    /// Pair a material with a thickness. Returns `None` when the material
    /// needs a thickness and none was given.
    pub fn from_material(material: &InsulationMaterial, thickness: Option<f64>) -> Option<Self> {
        match material.mechanism {
            MaterialMechanism::Conductivity { conductivity } => {
                thickness.map(|thickness| Self::Conductivity {
                    conductivity,
                    thickness,
                })
            }
            MaterialMechanism::Resistance { resistance } => Some(Self::Resistance { resistance }),
        }
    }
}

/// Calculate the thermal resistance of a piece of insulation, in m2.K/W
///
/// No insulation at all adds no resistance. Division by zero never
/// produces a non-finite value: a zero conductivity yields 0 and a
/// `ZeroDivision` warning at `resistance`.
pub fn insulation_resistance(input: Option<&InsulationInput>) -> WithWarnings<f64> {
    match input {
        None => WithWarnings::new(0.),
        Some(InsulationInput::Resistance { resistance }) => WithWarnings::new(*resistance),
        Some(InsulationInput::Conductivity {
            conductivity,
            thickness,
        }) => {
            if *conductivity == 0. {
                return WithWarnings::with_warnings(
                    0.,
                    [Warning::ZeroDivision {
                        path: warning_path!["resistance"],
                        replaced_with: OrderedFloat(0.0),
                    }],
                );
            }
            let resistance = thickness / conductivity;
            if resistance.is_finite() {
                WithWarnings::new(resistance)
            } else {
                WithWarnings::with_warnings(
                    0.,
                    [Warning::MiscNonFiniteNumber {
                        path: warning_path!["resistance"],
                        value: resistance.into(),
                    }],
                )
            }
        }
    }
}

/// Apply the thickness rules shared by every material-plus-thickness input:
/// a thickness is required if and only if a conductivity material is used,
/// an unused thickness is kept but flagged, and a negative thickness is
/// clamped to zero.
pub(crate) fn resolve_thickness(
    needs_thickness: bool,
    thickness: Option<f64>,
    thickness_path: &WarningPath,
    collector: &mut WarningCollector,
) -> Result<Option<f64>, RequiredValueMissingError> {
    let thickness = thickness.map(|thickness| {
        if thickness < 0. {
            collector.log(Warning::ParameterClamped {
                path: thickness_path.clone(),
                value: thickness.into(),
                clamped_to: OrderedFloat(0.0),
            });
            0.
        } else {
            thickness
        }
    });

    match (needs_thickness, thickness) {
        (true, None) => Err(RequiredValueMissingError::new(thickness_path.clone())),
        (false, Some(_)) => {
            collector.log(Warning::UnnecessaryValue {
                path: thickness_path.clone(),
            });
            Ok(thickness)
        }
        (_, thickness) => Ok(thickness),
    }
}

/// An optional piece of insulation as it arrives from the user: a material
/// that may not have been chosen, and a thickness in metres.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InsulationSpec {
    pub material: Option<InsulationMaterial>,
    pub thickness: Option<f64>,
}

impl InsulationSpec {
    /// Validate into the calculator's input. No material means no insulation.
    pub fn validate(
        &self,
    ) -> WithWarnings<Result<Option<InsulationInput>, RequiredValueMissingError>> {
        let mut collector = WarningCollector::new();
        let thickness_path = warning_path!["thickness"];
        let result = match &self.material {
            None => {
                if self.thickness.is_some() {
                    collector.log(Warning::UnnecessaryValue {
                        path: thickness_path,
                    });
                }
                Ok(None)
            }
            Some(material) => resolve_thickness(
                material.needs_thickness(),
                self.thickness,
                &thickness_path,
                &mut collector,
            )
            .map(|thickness| InsulationInput::from_material(material, thickness)),
        };

        collector.finish(result)
    }
}
