use crate::core::warnings::{Warning, WarningPath, WithWarnings};
use interp::{interp, InterpMode};
use ordered_float::OrderedFloat;
use serde::Serialize;
use strum::Display;

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Dimension {
    X,
    Y,
}

/// An input fell outside the range covered by a table and was moved to the
/// nearest edge of it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TabularFunctionRangeWarning {
    pub dimension: Dimension,
    pub value: OrderedFloat<f64>,
    pub clamped_to: OrderedFloat<f64>,
}

/// A function of two variables tabulated on a grid, bilinearly interpolated
/// between grid points and clamped at the edges of the grid.
///
/// Lookups interpolate every row at `x`, then the resulting column at `y`.
///
/// `values[j][i]` holds the value at `(x_axis[i], y_axis[j])`. Both axes
/// must be strictly increasing and have at least two points.
#[derive(Debug)]
pub struct TabularFunction<const X: usize, const Y: usize> {
    x_axis: [f64; X],
    y_axis: [f64; Y],
    values: [[f64; X]; Y],
}

impl<const X: usize, const Y: usize> TabularFunction<X, Y> {
    pub const fn new(x_axis: [f64; X], y_axis: [f64; Y], values: [[f64; X]; Y]) -> Self {
        assert!(X >= 2 && Y >= 2, "a table needs at least two points on each axis");
        Self {
            x_axis,
            y_axis,
            values,
        }
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.x_axis[0], self.x_axis[X - 1])
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.y_axis[0], self.y_axis[Y - 1])
    }

    pub fn lookup(&self, x: f64, y: f64) -> WithWarnings<f64, TabularFunctionRangeWarning> {
        let mut warnings = vec![];
        let x = clamp_to_axis(x, &self.x_axis, Dimension::X, &mut warnings);
        let y = clamp_to_axis(y, &self.y_axis, Dimension::Y, &mut warnings);

        let column = self
            .values
            .iter()
            .map(|row| interp(self.x_axis.as_slice(), row.as_slice(), x, &InterpMode::Extrapolate))
            .collect::<Vec<_>>();

        WithWarnings::with_warnings(interp(self.y_axis.as_slice(), &column, y, &InterpMode::Extrapolate), warnings)
    }
}

fn clamp_to_axis(
    value: f64,
    axis: &[f64],
    dimension: Dimension,
    warnings: &mut Vec<TabularFunctionRangeWarning>,
) -> f64 {
    let (min, max) = (axis[0], axis[axis.len() - 1]);
    let clamped_to = if value.is_nan() || value < min {
        min
    } else if value > max {
        max
    } else {
        return value;
    };

    warnings.push(TabularFunctionRangeWarning {
        dimension,
        value: value.into(),
        clamped_to: clamped_to.into(),
    });
    clamped_to
}

/// Report the range warnings of a table lookup against the inputs that fed
/// each dimension.
pub fn into_value_range_warnings(
    lookup: WithWarnings<f64, TabularFunctionRangeWarning>,
    x_path: &WarningPath,
    y_path: &WarningPath,
) -> WithWarnings<f64> {
    lookup.map_warnings(|warning| Warning::ValueRange {
        path: match warning.dimension {
            Dimension::X => x_path.clone(),
            Dimension::Y => y_path.clone(),
        },
        value: warning.value,
        clamped_to: warning.clamped_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::warnings::warning_path;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    static TABLE: TabularFunction<3, 2> = TabularFunction::new(
        [0., 1., 2.],
        [10., 20.],
        [
            // 10
            [1., 2., 4.],
            // 20
            [3., 4., 8.],
        ],
    );

    #[rstest]
    #[case(0., 10., 1.)]
    #[case(2., 20., 8.)]
    #[case(1., 10., 2.)]
    #[case(0.5, 10., 1.5)]
    #[case(1.5, 20., 6.)]
    #[case(0., 15., 2.)]
    #[case(0.5, 15., 2.5)]
    fn test_lookup_interpolates_within_grid(#[case] x: f64, #[case] y: f64, #[case] expected: f64) {
        let result = TABLE.lookup(x, y);
        assert_relative_eq!(*result.inner(), expected, max_relative = 1e-12);
        assert!(result.warnings().is_empty());
    }

    #[rstest]
    fn test_lookup_clamps_and_warns_outside_grid() {
        let result = TABLE.lookup(-1., 25.);
        assert_eq!(*result.inner(), 3.);
        assert_eq!(
            result.warnings().iter().copied().collect::<Vec<_>>(),
            vec![
                TabularFunctionRangeWarning {
                    dimension: Dimension::X,
                    value: OrderedFloat(-1.),
                    clamped_to: OrderedFloat(0.0),
                },
                TabularFunctionRangeWarning {
                    dimension: Dimension::Y,
                    value: OrderedFloat(25.0),
                    clamped_to: OrderedFloat(20.0),
                },
            ]
        );
    }

    #[rstest]
    fn test_lookup_clamps_nan_to_lower_edge() {
        let result = TABLE.lookup(f64::NAN, 10.);
        assert_eq!(*result.inner(), 1.);
        assert_eq!(result.warnings().len(), 1);
    }

    #[rstest]
    fn test_ranges() {
        assert_eq!(TABLE.x_range(), (0., 2.));
        assert_eq!(TABLE.y_range(), (10., 20.));
    }

    #[rstest]
    fn test_range_warnings_are_mapped_to_input_paths() {
        let result = into_value_range_warnings(
            TABLE.lookup(3., 5.),
            &warning_path!["resistance"],
            &warning_path!["perimeter-area-ratio"],
        );
        assert_eq!(*result.inner(), 4.);
        assert_eq!(
            result
                .warnings()
                .iter()
                .map(|warning| warning.path().to_string())
                .collect::<Vec<_>>(),
            vec!["resistance", "perimeter-area-ratio"]
        );
        assert_eq!(Dimension::X.to_string(), "x");
    }
}
