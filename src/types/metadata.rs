use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The subset of provider metadata the statistics engine reads.
///
/// Unknown fields are ignored so a raw provider payload can be deserialized directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TitleMetadata {
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A provider genre tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}

impl Genre {
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

/// Metadata keyed by title id.
pub type MetadataIndex = HashMap<u64, TitleMetadata>;
