//! Risk classifier - persisted scoring model
//!
//! Loads the trained flood-risk network (dense 4-channel input, ReLU hidden
//! layer, sigmoid output) from a JSON weight dump at startup. Scoring is a
//! pure forward pass: no side effects, no state between calls. The gateway
//! must not start serving without a usable model.

use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{Reading, RiskLevel, CHANNEL_COUNT};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(String),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("incompatible model artifact: {0}")]
    Shape(String),
}

/// Weight dump of the trained scoring network, as exported by the training
/// pipeline.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    /// Hidden layer weights, one row of `CHANNEL_COUNT` inputs per unit
    hidden_weights: Vec<Vec<f64>>,
    hidden_bias: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), ModelError> {
        let hidden = self.hidden_weights.len();
        if hidden == 0 {
            return Err(ModelError::Shape("hidden layer is empty".to_string()));
        }
        for (i, row) in self.hidden_weights.iter().enumerate() {
            if row.len() != CHANNEL_COUNT {
                return Err(ModelError::Shape(format!(
                    "hidden unit {} expects {} inputs, artifact has {}",
                    i,
                    CHANNEL_COUNT,
                    row.len()
                )));
            }
        }
        if self.hidden_bias.len() != hidden {
            return Err(ModelError::Shape(format!(
                "{} hidden units but {} hidden biases",
                hidden,
                self.hidden_bias.len()
            )));
        }
        if self.output_weights.len() != hidden {
            return Err(ModelError::Shape(format!(
                "{} hidden units but {} output weights",
                hidden,
                self.output_weights.len()
            )));
        }
        Ok(())
    }
}

/// Loaded risk-scoring model. Constructed once at startup and shared with the
/// query path as an injected dependency.
#[derive(Debug)]
pub struct RiskModel {
    artifact: ModelArtifact,
    fingerprint: String,
}

impl RiskModel {
    /// Load and validate the model artifact. Missing or shape-incompatible
    /// artifacts are fatal to startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let fingerprint = hex::encode(Sha256::digest(&bytes));

        let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;
        artifact.validate()?;

        tracing::info!(
            "Risk model loaded: {} ({} hidden units, sha256 {})",
            path.display(),
            artifact.hidden_weights.len(),
            &fingerprint[..16]
        );

        Ok(Self {
            artifact,
            fingerprint,
        })
    }

    /// SHA-256 of the artifact file, hex-encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Risk score for one reading. Deterministic pure forward pass; sigmoid
    /// output keeps it bounded.
    pub fn score(&self, reading: &Reading) -> f64 {
        let inputs = reading.channels();

        let mut output = self.artifact.output_bias;
        for (unit, (&bias, &weight)) in self
            .artifact
            .hidden_weights
            .iter()
            .zip(self.artifact.hidden_bias.iter().zip(&self.artifact.output_weights))
        {
            let mut activation = bias;
            for (w, x) in unit.iter().zip(&inputs) {
                activation += w * x;
            }
            output += weight * activation.max(0.0);
        }

        sigmoid(output)
    }

    /// Classify one reading by scoring it and mapping onto the fixed bands.
    pub fn classify(&self, reading: &Reading) -> RiskLevel {
        RiskLevel::from_score(self.score(reading))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_artifact(dir: &std::path::Path, artifact: serde_json::Value) -> std::path::PathBuf {
        let path = dir.join("flood_model.json");
        std::fs::write(&path, artifact.to_string()).unwrap();
        path
    }

    fn two_unit_artifact() -> serde_json::Value {
        json!({
            "hidden_weights": [[0.5, 0.25, 1.0, 0.0], [0.1, 0.1, 0.1, 0.1]],
            "hidden_bias": [0.0, -0.5],
            "output_weights": [1.0, -1.0],
            "output_bias": 0.25
        })
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let err = RiskModel::load("no/such/model.json").unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flood_model.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = RiskModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn wrong_input_width_is_shape_error() {
        let dir = tempdir().unwrap();
        let path = write_artifact(
            dir.path(),
            json!({
                "hidden_weights": [[0.5, 0.25]],
                "hidden_bias": [0.0],
                "output_weights": [1.0],
                "output_bias": 0.0
            }),
        );

        let err = RiskModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn mismatched_bias_count_is_shape_error() {
        let dir = tempdir().unwrap();
        let path = write_artifact(
            dir.path(),
            json!({
                "hidden_weights": [[0.5, 0.25, 1.0, 0.0]],
                "hidden_bias": [0.0, 1.0],
                "output_weights": [1.0],
                "output_bias": 0.0
            }),
        );

        let err = RiskModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn score_is_deterministic_and_bounded() {
        let dir = tempdir().unwrap();
        let path = write_artifact(dir.path(), two_unit_artifact());
        let model = RiskModel::load(&path).unwrap();

        let reading = Reading::new(1.0, 2.0, 3.0, 4.0);
        let first = model.score(&reading);
        let second = model.score(&reading);
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn classify_is_total() {
        let dir = tempdir().unwrap();
        let path = write_artifact(dir.path(), two_unit_artifact());
        let model = RiskModel::load(&path).unwrap();

        for reading in [
            Reading::new(0.0, 0.0, 0.0, 0.0),
            Reading::new(-100.0, 50.0, 0.25, 9000.0),
            Reading::new(1e12, 1e12, 1e12, 1e12),
        ] {
            // Always exactly one of the three bands
            let level = model.classify(&reading);
            assert!(matches!(
                level,
                RiskLevel::Safe | RiskLevel::Warning | RiskLevel::Danger
            ));
        }
    }

    #[test]
    fn fingerprint_is_stable_hex_sha256() {
        let dir = tempdir().unwrap();
        let path = write_artifact(dir.path(), two_unit_artifact());

        let first = RiskModel::load(&path).unwrap();
        let second = RiskModel::load(&path).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first.fingerprint().len(), 64);
    }
}
