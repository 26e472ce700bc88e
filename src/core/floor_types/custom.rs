use super::{finite_u_value, CommonInput};
use crate::core::warnings::WithWarnings;
use std::sync::OnceLock;

/// A floor whose U-value is already known, e.g. from a manufacturer's
/// calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomFloorInput {
    /// W/(m2.K)
    pub u_value: f64,
}

#[derive(Debug)]
pub struct CustomFloorUValueModel {
    common: CommonInput,
    input: CustomFloorInput,
    u_value: OnceLock<WithWarnings<f64>>,
}

impl CustomFloorUValueModel {
    pub fn new(common: CommonInput, input: CustomFloorInput) -> Self {
        Self {
            common,
            input,
            u_value: Default::default(),
        }
    }

    pub fn common(&self) -> &CommonInput {
        &self.common
    }

    pub fn u_value(&self) -> &WithWarnings<f64> {
        self.u_value
            .get_or_init(|| finite_u_value(WithWarnings::new(self.input.u_value)))
    }
}
