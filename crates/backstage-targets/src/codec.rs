use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Result, TargetError};

/// Persisted shape of the targets file: the default label plus every
/// label → endpoint binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetsState {
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

pub fn encode(state: &TargetsState) -> Result<String> {
    Ok(toml::to_string(state)?)
}

/// Empty (or whitespace-only) input is an empty registry, not an error.
pub fn decode(bytes: &[u8]) -> Result<TargetsState> {
    let content = std::str::from_utf8(bytes)
        .map_err(|err| TargetError::BadFormat(format!("content is not valid UTF-8: {err}")))?;
    if content.trim().is_empty() {
        return Ok(TargetsState::default());
    }

    toml::from_str::<TargetsState>(content)
        .map_err(|err| TargetError::BadFormat(err.message().to_string()))
}
