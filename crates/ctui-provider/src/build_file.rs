//! Locate a build file in a directory

use crate::{BuildFileType, BuildSource, ProviderError, Result};
use std::path::Path;

/// Find a Containerfile, then a Dockerfile, directly inside `dir`
pub fn detect_build_file(dir: &Path) -> Result<BuildSource> {
    for file_type in [BuildFileType::Containerfile, BuildFileType::Dockerfile] {
        let candidate = dir.join(file_type.file_name());
        if candidate.is_file() {
            tracing::debug!("Detected build file {:?}", candidate);
            return Ok(BuildSource::new(candidate, file_type).with_computed_exists());
        }
    }
    Err(ProviderError::NoBuildFile(dir.to_path_buf()))
}
