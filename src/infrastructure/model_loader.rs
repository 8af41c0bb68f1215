// Model artifact loader - Trained model with fallback selection
use crate::application::prediction_strategy::{FallbackModel, PredictionStrategy, TrainedModel};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("no model path configured")]
    NotConfigured,

    #[error("model file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("model file {} is empty", .0.display())]
    Empty(PathBuf),

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model holds non-finite parameters")]
    NonFinite,
}

/// Never fails: any problem with the artifact selects the fallback formula.
pub fn load_prediction_strategy(path: Option<&Path>) -> Arc<dyn PredictionStrategy> {
    match load_trained_model(path) {
        Ok(model) => {
            tracing::info!("Loaded trained AQI model from {:?}", path);
            Arc::new(model)
        }
        Err(e) => {
            tracing::warn!("Using fallback AQI model: {}", e);
            Arc::new(FallbackModel)
        }
    }
}

fn load_trained_model(path: Option<&Path>) -> Result<TrainedModel, ModelLoadError> {
    let path = path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ModelLoadError::NotConfigured)?;

    if !path.exists() {
        return Err(ModelLoadError::Missing(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(ModelLoadError::Empty(path.to_path_buf()));
    }

    let model: TrainedModel = serde_json::from_slice(&bytes)?;
    ensure_finite(model)
}

fn ensure_finite(model: TrainedModel) -> Result<TrainedModel, ModelLoadError> {
    let finite = model.intercept.is_finite() && model.coefficients.iter().all(|c| c.is_finite());
    if finite {
        Ok(model)
    } else {
        Err(ModelLoadError::NonFinite)
    }
}
