use serde::Deserialize;
use serde::Serialize;

/// Named, typed, bounded configuration value of a transformer.
///
/// Bounds are carried at double precision in memory but persisted as
/// `REAL`, so a value read back from the store equals [`narrow`] of the
/// value that was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameter {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: String,
    min: f64,
    max: f64,
}

impl Hyperparameter {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            min,
            max,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Type tag, e.g. numeric or categorical.
    pub fn kind(&self) -> &str {
        &self.kind
    }
    /// String-encoded value.
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Rounds a bound to the single precision it is stored at.
pub fn narrow(x: f64) -> f32 {
    x as f32
}
