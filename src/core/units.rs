pub const MILLIMETRES_IN_METRE: u32 = 1_000;

// Surface resistances from BS EN ISO 6946, in m2 K / W
/// Internal surface resistance for downward heat flow (floors)
pub const R_SI_DOWNWARDS: f64 = 0.17;
/// External surface resistance for an element exposed to outside air
pub const R_SE: f64 = 0.04;
/// Surface resistance on the face of a floor exposed to an unheated space
pub const R_SE_UNHEATED_SPACE: f64 = 0.17;

pub fn millimetres_to_metres(millimetres: f64) -> f64 {
    millimetres / MILLIMETRES_IN_METRE as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_do_correct_length_conversions() {
        assert_eq!(millimetres_to_metres(102.), 0.102);
        assert_eq!(millimetres_to_metres(12.5), 0.0125);
        assert_eq!(millimetres_to_metres(0.), 0.);
    }
}
