use std::fs;
use std::path::{Path, PathBuf};

use waypost_codegen::emit::{self, GENERATED_FILE_NAME};
use waypost_codegen::{scan_directory, ScanError};

/// Everything one discovery run needs.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Name of the build target, recorded in the generated header.
    pub target_name: String,
    pub input_dir: PathBuf,
    /// Created when absent.
    pub output_dir: PathBuf,
    pub output_file_name: String,
    /// Crate the generated registry calls into.
    pub runtime_crate: String,
}

impl DiscoveryConfig {
    pub fn new(
        target_name: impl Into<String>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        DiscoveryConfig {
            target_name: target_name.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            output_file_name: GENERATED_FILE_NAME.to_string(),
            runtime_crate: "waypost".to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }
}

/// Scan `input_dir` and write the registry file. Returns the path written.
///
/// A missing input directory or an empty scan writes the fallback registry
/// and still succeeds; only filesystem failures are errors.
pub fn run(config: &DiscoveryConfig) -> Result<PathBuf, ScanError> {
    let identifiers = match scan_directory(&config.input_dir) {
        Ok(identifiers) => identifiers,
        Err(ScanError::MissingInputDirectory(dir)) => {
            tracing::warn!(
                dir = %dir.display(),
                build_target = %config.target_name,
                "input directory not found, emitting an empty controller registry"
            );
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    if identifiers.is_empty() {
        tracing::warn!(build_target = %config.target_name, "no controllers found");
    }

    let content = emit::render(&config.target_name, identifiers, &config.runtime_crate);
    let path = config.output_path();
    write_output(&config.output_dir, &path, &content)?;

    tracing::info!(path = %path.display(), "wrote controller registry");
    Ok(path)
}

fn write_output(dir: &Path, path: &Path, content: &str) -> Result<(), ScanError> {
    fs::create_dir_all(dir).map_err(|source| ScanError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| ScanError::FileCreation {
        path: path.to_path_buf(),
        source,
    })
}
