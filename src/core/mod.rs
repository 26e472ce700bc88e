pub mod combined_method;
pub mod datasets;
pub mod floor_layer;
pub mod floor_types;
pub mod insulation;
pub mod proportion;
pub mod tabular;
pub mod units;
pub mod warnings;
