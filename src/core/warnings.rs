//! Non-fatal diagnostics that travel alongside a computed value.
//!
//! A calculation that can carry on past degraded input (a zero conductivity,
//! a parameter outside the range of a table, a value that was supplied but
//! is never used) returns its result wrapped in a [`WithWarnings`]. Nested
//! computations hand their warnings up to the caller through a
//! [`WarningCollector`], so nothing is lost and nothing is reported twice.

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::Serialize;
use smartstring::alias::String;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of the input field a warning concerns, e.g.
/// `per-floor-type.layers.0.main-material.resistance`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WarningPath(Vec<PathSegment>);

impl WarningPath {
    pub fn root() -> Self {
        Self(vec![])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a copy of this path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    fn prefixed_with(self, prefix: &WarningPath) -> Self {
        Self(prefix.0.iter().cloned().chain(self.0).collect())
    }
}

impl FromIterator<PathSegment> for WarningPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for WarningPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{joined}")
    }
}

/// Build a [`WarningPath`] from string keys and numeric indices.
macro_rules! warning_path {
    ($($segment:expr),* $(,)?) => {
        $crate::core::warnings::WarningPath::from_iter(
            [$($crate::core::warnings::PathSegment::from($segment)),*]
        )
    };
}
pub(crate) use warning_path;

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "kebab-case")]
pub enum Warning {
    #[serde(rename = "parameter clamped")]
    ParameterClamped {
        path: WarningPath,
        value: OrderedFloat<f64>,
        clamped_to: OrderedFloat<f64>,
    },
    #[serde(rename = "unnecessary value")]
    UnnecessaryValue { path: WarningPath },
    #[serde(rename = "non-finite number replaced")]
    NonFiniteNumberReplaced {
        path: WarningPath,
        value: OrderedFloat<f64>,
        replaced_with: OrderedFloat<f64>,
    },
    #[serde(rename = "zero division warning")]
    ZeroDivision {
        path: WarningPath,
        replaced_with: OrderedFloat<f64>,
    },
    #[serde(rename = "value range warning")]
    ValueRange {
        path: WarningPath,
        value: OrderedFloat<f64>,
        clamped_to: OrderedFloat<f64>,
    },
    #[serde(rename = "miscellaneous non-finite number")]
    MiscNonFiniteNumber {
        path: WarningPath,
        value: OrderedFloat<f64>,
    },
}

impl Warning {
    pub fn path(&self) -> &WarningPath {
        match self {
            Warning::ParameterClamped { path, .. }
            | Warning::UnnecessaryValue { path }
            | Warning::NonFiniteNumberReplaced { path, .. }
            | Warning::ZeroDivision { path, .. }
            | Warning::ValueRange { path, .. }
            | Warning::MiscNonFiniteNumber { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut WarningPath {
        match self {
            Warning::ParameterClamped { path, .. }
            | Warning::UnnecessaryValue { path }
            | Warning::NonFiniteNumberReplaced { path, .. }
            | Warning::ZeroDivision { path, .. }
            | Warning::ValueRange { path, .. }
            | Warning::MiscNonFiniteNumber { path, .. } => path,
        }
    }

    pub fn with_path_prefix(mut self, prefix: &WarningPath) -> Self {
        let path = std::mem::take(self.path_mut());
        *self.path_mut() = path.prefixed_with(prefix);
        self
    }
}

/// A value paired with the set of warnings raised while computing it.
///
/// Warnings are held in insertion order and structurally equal warnings are
/// only ever held once.
#[derive(Clone, Debug)]
pub struct WithWarnings<T, W = Warning> {
    value: T,
    warnings: IndexSet<W>,
}

impl<T, W: Hash + Eq> WithWarnings<T, W> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: IndexSet::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: impl IntoIterator<Item = W>) -> Self {
        Self {
            value,
            warnings: warnings.into_iter().collect(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.value
    }

    pub fn warnings(&self) -> &IndexSet<W> {
        &self.warnings
    }

    pub fn into_parts(self) -> (T, IndexSet<W>) {
        (self.value, self.warnings)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithWarnings<U, W> {
        WithWarnings {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    pub fn map_warnings<W2: Hash + Eq>(self, f: impl FnMut(W) -> W2) -> WithWarnings<T, W2> {
        WithWarnings {
            value: self.value,
            warnings: self.warnings.into_iter().map(f).collect(),
        }
    }

    pub fn push(&mut self, warning: W) {
        self.warnings.insert(warning);
    }

    /// Move the warnings into `collector`, returning the bare value.
    pub fn sink_into(self, collector: &mut WarningCollector<W>) -> T {
        collector.warnings.extend(self.warnings);
        self.value
    }
}

impl<T> WithWarnings<T, Warning> {
    pub fn with_path_prefix(self, prefix: &WarningPath) -> Self {
        self.map_warnings(|warning| warning.with_path_prefix(prefix))
    }
}

/// Accumulates warnings from a series of nested computations.
#[derive(Debug)]
pub struct WarningCollector<W = Warning> {
    warnings: IndexSet<W>,
}

impl<W: Hash + Eq> Default for WarningCollector<W> {
    fn default() -> Self {
        Self {
            warnings: IndexSet::new(),
        }
    }
}

impl<W: Hash + Eq> WarningCollector<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, warning: W) {
        self.warnings.insert(warning);
    }

    pub fn sink<T>(&mut self, with_warnings: WithWarnings<T, W>) -> T {
        with_warnings.sink_into(self)
    }

    /// As [`WarningCollector::sink`] for results held behind a memoised reference.
    pub fn sink_cloned<T: Clone>(&mut self, with_warnings: &WithWarnings<T, W>) -> T
    where
        W: Clone,
    {
        self.warnings.extend(with_warnings.warnings.iter().cloned());
        with_warnings.value.clone()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn finish<T>(self, value: T) -> WithWarnings<T, W> {
        WithWarnings {
            value,
            warnings: self.warnings,
        }
    }
}
