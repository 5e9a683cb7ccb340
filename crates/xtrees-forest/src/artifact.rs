//! Named, versioned model artifact encoded with bincode.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::ForestError;

/// Entry name under which the fitted model is stored.
pub const MODEL_KEY: &str = "model";

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// On-disk layout: version first so it can be checked before the payload.
#[derive(serde::Serialize, serde::Deserialize)]
struct ArtifactEnvelope<E> {
    format_version: u32,
    entries: E,
}

/// A mapping from entry names to persisted models.
///
/// Artifacts built with [`ModelArtifact::new`] hold exactly one entry,
/// [`MODEL_KEY`].
#[derive(Debug, Clone)]
pub struct ModelArtifact<M> {
    entries: BTreeMap<String, M>,
}

impl<M> ModelArtifact<M> {
    /// Wrap a fitted model as `{"model": model}`.
    pub fn new(model: M) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(MODEL_KEY.to_string(), model);
        Self { entries }
    }

    /// Entry names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Borrow the model stored under [`MODEL_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::MissingArtifactEntry`] if the entry is absent.
    pub fn model(&self) -> Result<&M, ForestError> {
        self.entries
            .get(MODEL_KEY)
            .ok_or_else(|| ForestError::MissingArtifactEntry {
                key: MODEL_KEY.to_string(),
            })
    }

    /// Take the model stored under [`MODEL_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::MissingArtifactEntry`] if the entry is absent.
    pub fn into_model(mut self) -> Result<M, ForestError> {
        self.entries
            .remove(MODEL_KEY)
            .ok_or_else(|| ForestError::MissingArtifactEntry {
                key: MODEL_KEY.to_string(),
            })
    }
}

impl<M: Serialize> ModelArtifact<M> {
    /// Encode the artifact fully in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::SerializeArtifact`] if bincode encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ForestError> {
        let envelope = ArtifactEnvelope {
            format_version: FORMAT_VERSION,
            entries: &self.entries,
        };
        bincode::serialize(&envelope).map_err(|source| ForestError::SerializeArtifact { source })
    }
}

impl<M: DeserializeOwned> ModelArtifact<M> {
    /// Read an artifact written by [`ModelArtifact::to_bytes`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ForestError::ReadArtifact`] | file read failed |
    /// | [`ForestError::DeserializeArtifact`] | bincode decoding failed |
    /// | [`ForestError::IncompatibleArtifactVersion`] | format version mismatch |
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ForestError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ForestError::ReadArtifact {
            path: path.to_path_buf(),
            source,
        })?;

        let decode_error = |source| ForestError::DeserializeArtifact {
            path: path.to_path_buf(),
            source,
        };
        let found: u32 = bincode::deserialize(&bytes).map_err(decode_error)?;
        if found != FORMAT_VERSION {
            return Err(ForestError::IncompatibleArtifactVersion {
                expected: FORMAT_VERSION,
                found,
                path: path.to_path_buf(),
            });
        }
        let envelope: ArtifactEnvelope<BTreeMap<String, M>> =
            bincode::deserialize(&bytes).map_err(decode_error)?;

        debug!(
            size_bytes = bytes.len(),
            n_entries = envelope.entries.len(),
            "model artifact loaded"
        );
        Ok(Self {
            entries: envelope.entries,
        })
    }
}
