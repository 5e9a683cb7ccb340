//! Atomic writer for serialized model artifacts.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};
use xtrees_forest::ModelArtifact;

use crate::IoError;

/// Name of the artifact file inside a working directory.
pub const OUTPUT_FILE: &str = "possible_model";

/// Writes a [`ModelArtifact`] to [`OUTPUT_FILE`] in a directory.
///
/// The artifact is encoded in memory, written to a temporary file in the
/// same directory, synced, and then renamed over the target. On any failure
/// the temporary file is removed and an existing artifact is left as it was.
pub struct ModelWriter {
    output_dir: PathBuf,
}

impl ModelWriter {
    /// Create a writer targeting an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDir`] if `output_dir` does not exist or is
    /// not a directory.
    #[instrument(skip_all, fields(dir = %output_dir.display()))]
    pub fn new(output_dir: &Path) -> Result<Self, IoError> {
        let metadata = fs::metadata(output_dir).map_err(|e| IoError::OutputDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(IoError::OutputDir {
                path: output_dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            });
        }
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Full path of the artifact this writer produces.
    #[must_use]
    pub fn target(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE)
    }

    /// Encode and persist `artifact`, replacing any existing file.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::EncodeArtifact`] | the model cannot be serialized |
    /// | [`IoError::WriteFile`] | the temporary file cannot be created, written, synced or renamed |
    #[instrument(skip_all, fields(path = %self.target().display()))]
    pub fn write<M: Serialize>(&self, artifact: &ModelArtifact<M>) -> Result<PathBuf, IoError> {
        let path = self.target();
        let bytes = artifact.to_bytes().map_err(IoError::EncodeArtifact)?;

        let write_err = |source| IoError::WriteFile {
            path: path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        info!(bytes = bytes.len(), "model artifact written");
        Ok(path)
    }
}
