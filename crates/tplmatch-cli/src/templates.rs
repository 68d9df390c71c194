//! Template records as stored in a JSON templates file.
//!
//! ```json
//! [
//!   { "id": 1, "name": "Tempo run", "matchPattern": "tempo #{5-15} km;^tempo" },
//!   { "id": "swim", "matchPattern": "swim # laps" }
//! ]
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tplmatch::Template;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TemplateId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: TemplateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "match_pattern")]
    pub match_pattern: Option<String>,
}

impl TemplateRecord {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{}: {}", self.id, name),
            None => self.id.to_string(),
        }
    }
}

impl Template for TemplateRecord {
    fn match_pattern(&self) -> Option<&str> {
        self.match_pattern.as_deref()
    }
}

pub fn load_templates(path: &Path) -> Result<Vec<TemplateRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ReadTemplates {
        path: path.to_path_buf(),
        source,
    })?;

    parse_templates(&content).map_err(|source| Error::ParseTemplates {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_templates(content: &str) -> serde_json::Result<Vec<TemplateRecord>> {
    serde_json::from_str(content)
}
