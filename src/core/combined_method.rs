//! The Combined Method of BS EN ISO 6946 for the thermal resistance of a
//! stack of layers, some of which are bridged by a second material.
//!
//! The upper bound of the resistance is found by summing over every path
//! through the stack that takes exactly one element from each layer. For a
//! stack of `m` layers of (at most) `n` elements each that is `n^m` paths, so
//! the cost is O(n^m). Callers must keep stacks small; the building fabric
//! this is used for has a handful of layers of one or two elements each.

use crate::core::proportion::Proportion;
use itertools::Itertools;
use smartstring::alias::String;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// One parallel path through a layer
#[derive(Clone, Debug, PartialEq)]
pub struct ResistanceElement {
    pub name: String,
    /// m2.K/W
    pub resistance: f64,
    pub proportion: Proportion,
}

impl ResistanceElement {
    pub fn new(name: &str, resistance: f64, proportion: Proportion) -> Self {
        Self {
            name: name.into(),
            resistance,
            proportion,
        }
    }
}

/// A layer of the stack: one or more elements side by side whose
/// proportions are expected to add up to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    elements: Vec<ResistanceElement>,
}

impl Layer {
    pub fn new(elements: Vec<ResistanceElement>) -> Result<Self, CombinedMethodInputError> {
        if elements.is_empty() {
            return Err(CombinedMethodInputError::EmptyLayer);
        }

        Ok(Self { elements })
    }

    /// A layer made of a single material, e.g. a surface resistance.
    pub fn single(name: &str, resistance: f64) -> Self {
        Self {
            elements: vec![ResistanceElement::new(
                name,
                resistance,
                Proportion::WHOLE,
            )],
        }
    }

    /// A main material, optionally bridged at intervals by a second one.
    pub fn bridged(main: ResistanceElement, bridging: Option<ResistanceElement>) -> Self {
        Self {
            elements: std::iter::once(main).chain(bridging).collect(),
        }
    }

    pub fn elements(&self) -> &[ResistanceElement] {
        &self.elements
    }

    pub fn proportion_sum(&self) -> f64 {
        self.elements
            .iter()
            .map(|element| element.proportion.as_ratio())
            .sum()
    }

    fn proportions_sum_to_one(&self) -> bool {
        is_close!(self.proportion_sum(), 1., rel_tol = 1e-4, abs_tol = 1e-4)
    }

    /// Elements combined as parallel conductances
    fn lower_bound_resistance(&self) -> f64 {
        let conductance: f64 = self
            .elements
            .iter()
            .map(|element| element.proportion.as_ratio() / element.resistance)
            .sum();
        1. / conductance
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Division by zero while combining thermal resistances")]
pub struct ZeroDivisionError;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CombinedMethodInputError {
    #[error("A layer must contain at least one resistance element")]
    EmptyLayer,
    #[error("The combined method needs at least one layer")]
    NoLayers,
}

/// Thermal resistance of a layered construction. Every derived quantity is
/// calculated at most once per model.
#[derive(Debug)]
pub struct CombinedMethodModel {
    layers: Vec<Layer>,
    lower_bound_resistance: OnceLock<Result<f64, ZeroDivisionError>>,
    upper_bound_resistance: OnceLock<Result<f64, ZeroDivisionError>>,
    resistance: OnceLock<Result<f64, ZeroDivisionError>>,
    u_value: OnceLock<Result<f64, ZeroDivisionError>>,
}

impl CombinedMethodModel {
    /// Layers are ordered from the internal to the external surface.
    pub fn new(layers: Vec<Layer>) -> Result<Self, CombinedMethodInputError> {
        if layers.is_empty() {
            return Err(CombinedMethodInputError::NoLayers);
        }

        Ok(Self::from_layers(layers))
    }

    /// A construction bounded by an internal and an external surface resistance.
    pub fn with_surfaces(
        internal_surface_resistance: f64,
        layers: impl IntoIterator<Item = Layer>,
        external_surface_resistance: f64,
    ) -> Self {
        let layers = std::iter::once(Layer::single(
            "internal surface",
            internal_surface_resistance,
        ))
        .chain(layers)
        .chain(std::iter::once(Layer::single(
            "external surface",
            external_surface_resistance,
        )))
        .collect();

        Self::from_layers(layers)
    }

    fn from_layers(layers: Vec<Layer>) -> Self {
        for layer in &layers {
            if !layer.proportions_sum_to_one() {
                // TODO decide whether this should become a Warning or a validation error
                warn!(
                    elements = ?layer.elements.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
                    proportion_sum = layer.proportion_sum(),
                    "proportions of layer elements do not sum to 1"
                );
            }
        }

        Self {
            layers,
            lower_bound_resistance: Default::default(),
            upper_bound_resistance: Default::default(),
            resistance: Default::default(),
            u_value: Default::default(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Sum of the parallel-combined resistance of each layer, in m2.K/W
    pub fn lower_bound_resistance(&self) -> Result<f64, ZeroDivisionError> {
        *self.lower_bound_resistance.get_or_init(|| {
            let resistance: f64 = self
                .layers
                .iter()
                .map(Layer::lower_bound_resistance)
                .sum();
            finite_or_zero_division(resistance)
        })
    }

    /// Parallel combination of every path through the stack, in m2.K/W
    pub fn upper_bound_resistance(&self) -> Result<f64, ZeroDivisionError> {
        *self.upper_bound_resistance.get_or_init(|| {
            let element_sets = self
                .layers
                .iter()
                .map(|layer| layer.elements.as_slice())
                .collect::<Vec<_>>();
            let slices = cartesian_product(&element_sets);
            debug!(slices = slices.len(), "combined method upper bound");

            let conductance: f64 = slices
                .iter()
                .map(|slice| {
                    let slice_proportion: f64 = slice
                        .iter()
                        .map(|element| element.proportion.as_ratio())
                        .product();
                    let slice_resistance: f64 =
                        slice.iter().map(|element| element.resistance).sum();
                    slice_proportion / slice_resistance
                })
                .sum();
            finite_or_zero_division(1. / conductance)
        })
    }

    /// Mean of the lower and upper bounds, in m2.K/W
    pub fn resistance(&self) -> Result<f64, ZeroDivisionError> {
        *self.resistance.get_or_init(|| {
            let lower = self.lower_bound_resistance()?;
            let upper = self.upper_bound_resistance()?;
            Ok((lower + upper) / 2.)
        })
    }

    /// in W/(m2.K)
    pub fn u_value(&self) -> Result<f64, ZeroDivisionError> {
        *self.u_value.get_or_init(|| {
            let resistance = self.resistance()?;
            if resistance == 0. {
                return Err(ZeroDivisionError);
            }
            finite_or_zero_division(1. / resistance)
        })
    }
}

fn finite_or_zero_division(value: f64) -> Result<f64, ZeroDivisionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ZeroDivisionError)
    }
}

/// Every way of picking exactly one item from each set, in order.
fn cartesian_product<'a, T>(sets: &[&'a [T]]) -> Vec<Vec<&'a T>> {
    sets.iter()
        .map(|set| set.iter())
        .multi_cartesian_product()
        .collect()
}
