//! Uninsulated floor U-values and edge insulation factors, tabulated from
//! the BS EN ISO 13370 equations.
//!
//! Every table assumes a ground conductivity of 1.5 W/(m.K), a wall
//! thickness of 0.3 m and surface resistances of 0.17 (internal, heat flow
//! downwards) and 0.04 (external) m2.K/W. The suspended floor table also
//! assumes a 0.3 m underfloor void bounded by walls of U-value 1.5, a wind
//! speed of 5 m/s with a shielding factor of 0.05, and a deck of resistance
//! 0.2 m2.K/W. U-values are rounded to 2 decimal places and edge factors to
//! 3, except for the suspended floor rows at ratios 0.6 and 0.65, which are
//! given to 3 or 4.
//!
//! The second dimension of the floor tables is the exposed perimeter to
//! area ratio in 1/m.

use crate::core::tabular::{TabularFunction, TabularFunctionRangeWarning};
use crate::core::warnings::WithWarnings;

/// U-value of a solid ground floor, by all-over insulation resistance
/// (m2.K/W)
static SOLID_FLOOR: TabularFunction<11, 20> = TabularFunction::new(
    [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0],
    [
        0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8,
        0.85, 0.9, 0.95, 1.0,
    ],
    [
        // 0.05
        [0.13, 0.11, 0.10, 0.09, 0.08, 0.08, 0.07, 0.07, 0.07, 0.07, 0.06],
        // 0.1
        [0.22, 0.18, 0.16, 0.14, 0.13, 0.12, 0.11, 0.11, 0.10, 0.10, 0.09],
        // 0.15
        [0.30, 0.24, 0.21, 0.18, 0.17, 0.15, 0.14, 0.13, 0.12, 0.12, 0.11],
        // 0.2
        [0.37, 0.29, 0.25, 0.22, 0.19, 0.18, 0.16, 0.15, 0.14, 0.13, 0.12],
        // 0.25
        [0.44, 0.34, 0.28, 0.24, 0.22, 0.19, 0.18, 0.16, 0.15, 0.14, 0.13],
        // 0.3
        [0.49, 0.38, 0.31, 0.27, 0.23, 0.21, 0.19, 0.17, 0.16, 0.14, 0.13],
        // 0.35
        [0.55, 0.41, 0.34, 0.29, 0.25, 0.22, 0.20, 0.18, 0.16, 0.15, 0.14],
        // 0.4
        [0.60, 0.44, 0.36, 0.30, 0.26, 0.23, 0.20, 0.18, 0.17, 0.16, 0.14],
        // 0.45
        [0.65, 0.47, 0.38, 0.32, 0.27, 0.23, 0.21, 0.19, 0.17, 0.16, 0.15],
        // 0.5
        [0.70, 0.50, 0.40, 0.33, 0.28, 0.24, 0.22, 0.19, 0.18, 0.16, 0.15],
        // 0.55
        [0.74, 0.52, 0.41, 0.34, 0.28, 0.25, 0.22, 0.20, 0.18, 0.17, 0.15],
        // 0.6
        [0.78, 0.55, 0.43, 0.35, 0.29, 0.25, 0.23, 0.20, 0.18, 0.17, 0.16],
        // 0.65
        [0.82, 0.57, 0.44, 0.35, 0.30, 0.26, 0.23, 0.21, 0.19, 0.17, 0.16],
        // 0.7
        [0.86, 0.59, 0.45, 0.36, 0.30, 0.26, 0.23, 0.21, 0.19, 0.17, 0.16],
        // 0.75
        [0.89, 0.61, 0.46, 0.37, 0.31, 0.27, 0.24, 0.21, 0.19, 0.17, 0.16],
        // 0.8
        [0.93, 0.62, 0.47, 0.37, 0.32, 0.27, 0.24, 0.21, 0.19, 0.18, 0.16],
        // 0.85
        [0.96, 0.64, 0.47, 0.38, 0.32, 0.28, 0.24, 0.22, 0.20, 0.18, 0.16],
        // 0.9
        [0.99, 0.65, 0.48, 0.39, 0.32, 0.28, 0.24, 0.22, 0.20, 0.18, 0.16],
        // 0.95
        [1.02, 0.66, 0.49, 0.39, 0.33, 0.28, 0.25, 0.22, 0.20, 0.18, 0.17],
        // 1.0
        [1.05, 0.68, 0.50, 0.40, 0.33, 0.28, 0.25, 0.22, 0.20, 0.18, 0.17],
    ],
);

/// Uninsulated suspended floor U-value, by ventilation opening area per
/// metre of underfloor perimeter (m2/m)
static SUSPENDED_FLOOR_UNINSULATED: TabularFunction<6, 20> = TabularFunction::new(
    [0.0005, 0.001, 0.0015, 0.002, 0.0025, 0.003],
    [
        0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8,
        0.85, 0.9, 0.95, 1.0,
    ],
    [
        // 0.05
        [0.14, 0.15, 0.15, 0.15, 0.16, 0.16],
        // 0.1
        [0.24, 0.24, 0.25, 0.26, 0.27, 0.27],
        // 0.15
        [0.32, 0.32, 0.33, 0.34, 0.35, 0.36],
        // 0.2
        [0.38, 0.39, 0.40, 0.41, 0.42, 0.44],
        // 0.25
        [0.44, 0.45, 0.46, 0.47, 0.49, 0.50],
        // 0.3
        [0.49, 0.50, 0.51, 0.53, 0.54, 0.56],
        // 0.35
        [0.53, 0.54, 0.56, 0.58, 0.59, 0.60],
        // 0.4
        [0.57, 0.58, 0.60, 0.62, 0.63, 0.65],
        // 0.45
        [0.60, 0.62, 0.64, 0.66, 0.67, 0.69],
        // 0.5
        [0.64, 0.65, 0.67, 0.69, 0.71, 0.73],
        // 0.55
        [0.67, 0.69, 0.70, 0.72, 0.74, 0.76],
        // 0.6
        [0.690, 0.705, 0.722, 0.739, 0.757, 0.775],
        // 0.65
        [0.712, 0.727, 0.744, 0.7614, 0.780, 0.799],
        // 0.7
        [0.74, 0.76, 0.79, 0.81, 0.83, 0.85],
        // 0.75
        [0.76, 0.79, 0.81, 0.83, 0.85, 0.87],
        // 0.8
        [0.78, 0.81, 0.83, 0.85, 0.87, 0.89],
        // 0.85
        [0.80, 0.83, 0.85, 0.87, 0.89, 0.91],
        // 0.9
        [0.82, 0.85, 0.87, 0.89, 0.91, 0.93],
        // 0.95
        [0.84, 0.86, 0.89, 0.91, 0.93, 0.95],
        // 1.0
        [0.86, 0.88, 0.91, 0.93, 0.95, 0.97],
    ],
);

/// Uninsulated basement floor U-value, by basement depth (m)
static BASEMENT_FLOOR_UNINSULATED: TabularFunction<6, 20> = TabularFunction::new(
    [0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
    [
        0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7, 0.75, 0.8,
        0.85, 0.9, 0.95, 1.0,
    ],
    [
        // 0.05
        [0.12, 0.11, 0.11, 0.10, 0.10, 0.10],
        // 0.1
        [0.20, 0.19, 0.18, 0.17, 0.16, 0.16],
        // 0.15
        [0.27, 0.25, 0.24, 0.23, 0.22, 0.21],
        // 0.2
        [0.34, 0.31, 0.29, 0.27, 0.26, 0.25],
        // 0.25
        [0.39, 0.36, 0.34, 0.31, 0.30, 0.28],
        // 0.3
        [0.44, 0.41, 0.38, 0.35, 0.33, 0.31],
        // 0.35
        [0.49, 0.45, 0.41, 0.38, 0.36, 0.34],
        // 0.4
        [0.53, 0.48, 0.44, 0.41, 0.38, 0.36],
        // 0.45
        [0.57, 0.52, 0.47, 0.44, 0.41, 0.38],
        // 0.5
        [0.61, 0.55, 0.50, 0.46, 0.43, 0.40],
        // 0.55
        [0.65, 0.58, 0.52, 0.48, 0.44, 0.41],
        // 0.6
        [0.68, 0.61, 0.55, 0.50, 0.46, 0.43],
        // 0.65
        [0.71, 0.63, 0.57, 0.52, 0.47, 0.44],
        // 0.7
        [0.74, 0.65, 0.59, 0.53, 0.49, 0.45],
        // 0.75
        [0.77, 0.68, 0.61, 0.55, 0.50, 0.46],
        // 0.8
        [0.79, 0.70, 0.62, 0.56, 0.51, 0.47],
        // 0.85
        [0.82, 0.72, 0.64, 0.57, 0.52, 0.47],
        // 0.9
        [0.84, 0.73, 0.65, 0.58, 0.53, 0.48],
        // 0.95
        [0.87, 0.75, 0.66, 0.59, 0.54, 0.49],
        // 1.0
        [0.89, 0.77, 0.68, 0.60, 0.54, 0.50],
    ],
);

/// Horizontal edge insulation factor, by insulation resistance (m2.K/W) and
/// insulation width (m)
static EDGE_INSULATION_HORIZONTAL: TabularFunction<7, 4> = TabularFunction::new(
    [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
    [0.5, 1.0, 1.5, 2.0],
    [
        // 0.5
        [0.000, -0.135, -0.183, -0.207, -0.222, -0.232, -0.240],
        // 1.0
        [0.000, -0.199, -0.276, -0.318, -0.344, -0.362, -0.376],
        // 1.5
        [0.000, -0.236, -0.334, -0.389, -0.424, -0.449, -0.467],
        // 2.0
        [0.000, -0.260, -0.373, -0.438, -0.481, -0.511, -0.534],
    ],
);

/// Vertical edge insulation factor, by insulation resistance (m2.K/W) and
/// insulation depth (m)
static EDGE_INSULATION_VERTICAL: TabularFunction<7, 6> = TabularFunction::new(
    [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
    [0.25, 0.5, 0.75, 1.0, 1.25, 1.5],
    [
        // 0.25
        [0.000, -0.135, -0.183, -0.207, -0.222, -0.232, -0.240],
        // 0.5
        [0.000, -0.199, -0.276, -0.318, -0.344, -0.362, -0.376],
        // 0.75
        [0.000, -0.236, -0.334, -0.389, -0.424, -0.449, -0.467],
        // 1.0
        [0.000, -0.260, -0.373, -0.438, -0.481, -0.511, -0.534],
        // 1.25
        [0.000, -0.278, -0.402, -0.475, -0.524, -0.558, -0.585],
        // 1.5
        [0.000, -0.291, -0.424, -0.504, -0.557, -0.596, -0.625],
    ],
);

/// U-value of a solid ground floor in W/(m2.K), before any edge insulation
/// correction.
pub fn solid_floor_u_value(
    insulation_resistance: f64,
    perimeter_area_ratio: f64,
) -> WithWarnings<f64, TabularFunctionRangeWarning> {
    SOLID_FLOOR.lookup(insulation_resistance, perimeter_area_ratio)
}

/// U-value of an uninsulated suspended floor with a 0.2 m2.K/W deck, in
/// W/(m2.K).
///
/// `ventilation_ratio` is the area of the ventilation openings per metre of
/// underfloor space perimeter, in m2/m.
pub fn suspended_floor_uninsulated_u_value(
    ventilation_ratio: f64,
    perimeter_area_ratio: f64,
) -> WithWarnings<f64, TabularFunctionRangeWarning> {
    SUSPENDED_FLOOR_UNINSULATED.lookup(ventilation_ratio, perimeter_area_ratio)
}

/// U-value of the floor of an uninsulated heated basement at `depth` metres
/// below ground, in W/(m2.K).
pub fn basement_floor_uninsulated_u_value(
    depth: f64,
    perimeter_area_ratio: f64,
) -> WithWarnings<f64, TabularFunctionRangeWarning> {
    BASEMENT_FLOOR_UNINSULATED.lookup(depth, perimeter_area_ratio)
}

/// Edge heat loss correction (W/(m.K), negative) for a horizontal band of
/// edge insulation of the given resistance and `width` in metres.
pub fn edge_insulation_factor_horizontal(
    resistance: f64,
    width: f64,
) -> WithWarnings<f64, TabularFunctionRangeWarning> {
    EDGE_INSULATION_HORIZONTAL.lookup(resistance, width)
}

/// Edge heat loss correction (W/(m.K), negative) for vertical edge
/// insulation of the given resistance reaching `depth` metres below ground.
pub fn edge_insulation_factor_vertical(
    resistance: f64,
    depth: f64,
) -> WithWarnings<f64, TabularFunctionRangeWarning> {
    EDGE_INSULATION_VERTICAL.lookup(resistance, depth)
}
