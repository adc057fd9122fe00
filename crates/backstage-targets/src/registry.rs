use std::path::{Path, PathBuf};

use crate::{decode, encode, OsFs, Result, TargetError, TargetFs, TargetsState};

/// A label bound to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub label: String,
    pub endpoint: String,
}

/// One line of a target listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub is_default: bool,
    pub label: String,
    pub endpoint: String,
}

/// The targets of one command invocation, backed by a single file.
///
/// Every mutation is applied in memory and then written back in full, so a
/// registry never holds changes that are not on disk unless the save itself
/// failed.
#[derive(Debug)]
pub struct TargetRegistry<F: TargetFs = OsFs> {
    fs: F,
    path: PathBuf,
    state: TargetsState,
}

impl<F: TargetFs> TargetRegistry<F> {
    pub fn load(fs: F, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = {
            let mut file = fs.open_read_write(&path)?;
            file.read_all()?
        };

        let mut state = decode(&content)?;
        if !state.current.is_empty() && !state.options.contains_key(&state.current) {
            tracing::warn!(
                path = %path.display(),
                current = %state.current,
                "default target is not registered; clearing it"
            );
            state.current.clear();
        }
        tracing::debug!(
            path = %path.display(),
            bytes = content.len(),
            targets = state.options.len(),
            "loaded targets"
        );

        Ok(Self { fs, path, state })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn state(&self) -> &TargetsState {
        &self.state
    }

    pub(crate) fn into_state(self) -> TargetsState {
        self.state
    }

    pub fn endpoint(&self, label: &str) -> Option<&str> {
        self.state.options.get(label).map(String::as_str)
    }

    pub fn current(&self) -> Option<Target> {
        if self.state.current.is_empty() {
            return None;
        }
        let endpoint = self.endpoint(&self.state.current)?;
        Some(Target {
            label: self.state.current.clone(),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn add(&mut self, label: &str, endpoint: &str) -> Result<()> {
        if label.is_empty() {
            return Err(TargetError::EmptyLabel);
        }
        if self.state.options.contains_key(label) {
            return Err(TargetError::LabelExists(label.to_string()));
        }

        self.state
            .options
            .insert(label.to_string(), endpoint.to_string());
        self.save()
    }

    pub fn remove(&mut self, label: &str) -> Result<()> {
        if self.state.options.remove(label).is_none() {
            return Err(TargetError::LabelNotFound(label.to_string()));
        }
        if self.state.current == label {
            self.state.current.clear();
        }

        self.save()
    }

    pub fn set_default(&mut self, label: &str) -> Result<()> {
        if !self.state.options.contains_key(label) {
            return Err(TargetError::LabelNotFound(label.to_string()));
        }

        self.state.current = label.to_string();
        self.save()
    }

    pub fn list(&self) -> Vec<TargetRow> {
        let mut rows: Vec<TargetRow> = self
            .state
            .options
            .iter()
            .map(|(label, endpoint)| TargetRow {
                is_default: !self.state.current.is_empty() && *label == self.state.current,
                label: label.clone(),
                endpoint: endpoint.clone(),
            })
            .collect();
        rows.sort_by(|left, right| left.label.cmp(&right.label));
        rows
    }

    pub fn save(&self) -> Result<()> {
        let content = encode(&self.state)?;
        let mut file = self.fs.open_read_write_truncate(&self.path)?;
        let written = file.write_all_counted(content.as_bytes())?;
        if written != content.len() {
            return Err(TargetError::IncompleteWrite {
                written,
                expected: content.len(),
            });
        }

        tracing::debug!(path = %self.path.display(), bytes = written, "saved targets");
        Ok(())
    }
}
