//! Workflow persistence: the step order saved as a pretty-printed JSON array.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::{validate_order, ConfigError, Step};

/// Conventional location of the saved workflow, relative to the working directory.
pub const DEFAULT_WORKFLOW_PATH: &str = "presets/my_workflow.json";

/// Errors reading or writing a workflow file.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to access workflow file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid workflow file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Write the step order to `path`, creating parent directories as needed.
pub fn save_workflow(path: &Path, steps: &[Step]) -> Result<(), WorkflowError> {
    validate_order(steps)?;

    let io_err = |source| WorkflowError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(steps).map_err(|source| WorkflowError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    tracing::info!("Saved workflow to {}", path.display());
    Ok(())
}

/// Read a step order from `path`.
pub fn load_workflow(path: &Path) -> Result<Vec<Step>, WorkflowError> {
    let content = std::fs::read_to_string(path).map_err(|source| WorkflowError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let steps: Vec<Step> = serde_json::from_str(&content).map_err(|source| WorkflowError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_order(&steps)?;

    tracing::debug!("Loaded workflow from {}: {:?}", path.display(), steps);
    Ok(steps)
}

/// Load the workflow at `path`, falling back to the default order.
///
/// A missing file is silent; an unreadable or invalid one is logged as a warning.
pub fn load_workflow_or_default(path: &Path) -> Vec<Step> {
    if !path.exists() {
        return Step::DEFAULT_ORDER.to_vec();
    }

    match load_workflow(path) {
        Ok(steps) => steps,
        Err(e) => {
            tracing::warn!("Failed to load workflow, using default order: {}", e);
            Step::DEFAULT_ORDER.to_vec()
        }
    }
}
