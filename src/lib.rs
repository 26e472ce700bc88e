pub mod core;
pub mod errors;
pub mod input;
pub mod output;

#[macro_use]
extern crate is_close;

use crate::core::floor_types::construct_floor_u_value_model;
use crate::core::warnings::WarningCollector;
use crate::errors::FloorUValueError;
use crate::input::ingest_for_processing;
use crate::output::FloorUValueOutput;
use std::io::Read;
use tracing::debug;

/// Read a JSON floor description and calculate its U-value.
///
/// Validation warnings (e.g. an unneeded thickness) are reported together
/// with the warnings of the calculation itself.
pub fn calculate_floor_u_value(input: impl Read) -> Result<FloorUValueOutput, FloorUValueError> {
    let spec = ingest_for_processing(input)?;

    let mut collector = WarningCollector::new();
    let input = collector.sink(spec.validate())?;
    let model = construct_floor_u_value_model(input);
    let u_value = collector.sink_cloned(model.u_value());
    debug!(
        floor_type = %model.floor_type(),
        u_value,
        warnings = collector.len(),
        "calculated floor u-value"
    );

    let (u_value, warnings) = collector.finish(u_value).into_parts();
    Ok(FloorUValueOutput { u_value, warnings })
}
