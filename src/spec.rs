use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Preprocessing step of an experiment run.
///
/// On the way in, `id` is the caller's external identifier and is used only
/// to deduplicate stores. On the way out of [`SpecRepository::read_spec`],
/// `id` is the store-assigned key the spec was read by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerSpec {
    id: i32,
    transformer_type: String,
    tag: String,
    #[serde(default)]
    hyperparameters: Vec<Hyperparameter>,
}

impl TransformerSpec {
    pub fn new(
        id: i32,
        transformer_type: impl Into<String>,
        tag: impl Into<String>,
        hyperparameters: Vec<Hyperparameter>,
    ) -> Self {
        Self {
            id,
            transformer_type: transformer_type.into(),
            tag: tag.into(),
            hyperparameters,
        }
    }
    pub fn id(&self) -> i32 {
        self.id
    }
    /// Tag identifying the preprocessing algorithm.
    pub fn transformer_type(&self) -> &str {
        &self.transformer_type
    }
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn hyperparameters(&self) -> &[Hyperparameter] {
        &self.hyperparameters
    }
}
