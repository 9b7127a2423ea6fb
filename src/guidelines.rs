//! Clinical-guideline payload: diagnosis → recommended services.
//!
//! Arrives as JSON from the guideline workflow and is rendered as-is. It is a
//! different shape from the parsed system/service tree and is kept separate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuidelinePayload {
    #[serde(default)]
    pub diagnoses: Vec<Diagnosis>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Diagnosis {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recommendation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// лабораторное | инструментальное | функциональное | консультация
    #[serde(default)]
    pub study_type: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl GuidelinePayload {
    /// Decode the workflow's `result` string.
    ///
    /// Blank text, `null`, `{}` and `[]` mean the workflow returned nothing and
    /// give `None`; any other payload, even `{"diagnoses": []}`, is `Some`.
    pub fn from_json(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(raw)?;
        match &value {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Array(items) if items.is_empty() => Ok(None),
            _ => serde_json::from_value(value).map(Some),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }
}
