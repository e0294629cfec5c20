//! Label encoder: a sorted vocabulary where a category's code is its index.

use serde::{Deserialize, Serialize};

use super::{CategoryEncoder, ModelError, UnknownCategory};

/// Categorical encoder over a fixed, sorted vocabulary.
///
/// Codes follow the sorted order of `classes`, so `["high", "low", "medium"]`
/// encodes `"high" -> 0`, `"low" -> 1`, `"medium" -> 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncoderArtifact", into = "EncoderArtifact")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

impl TryFrom<EncoderArtifact> for LabelEncoder {
    type Error = ModelError;

    fn try_from(artifact: EncoderArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.classes)
    }
}

impl From<LabelEncoder> for EncoderArtifact {
    fn from(encoder: LabelEncoder) -> Self {
        Self {
            classes: encoder.classes,
        }
    }
}

impl LabelEncoder {
    /// Build from a vocabulary. Order is irrelevant; duplicates are rejected.
    pub fn new<I, S>(classes: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if classes.is_empty() {
            return Err(ModelError::Invalid("label encoder has no classes".to_string()));
        }
        classes.sort();
        if let Some(dup) = classes.windows(2).find(|w| w[0] == w[1]) {
            return Err(ModelError::Invalid(format!(
                "label encoder lists '{}' more than once",
                dup[0]
            )));
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inverse of `encode`.
    pub fn decode(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, category: &str) -> Result<i64, UnknownCategory> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(category))
            .ok()
            .and_then(|i| i64::try_from(i).ok())
            .ok_or_else(|| UnknownCategory {
                value: category.to_string(),
            })
    }
}
