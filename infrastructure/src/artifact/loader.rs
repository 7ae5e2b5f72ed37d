//! Model-checking artifact and reference response loading

use confirm_domain::{ModelArtifact, ProposalResponse};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading artifact files
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loader for the JSON files produced around a confirmation run
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Load the model-checking artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<ModelArtifact, ArtifactError> {
        let path = path.as_ref();
        let content = Self::read(path)?;
        let artifact = Self::parse(&content).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded artifact with {} model-check results over {} organizations",
            artifact.model_check_result_list.len(),
            artifact.organizations.len()
        );
        Ok(artifact)
    }

    /// Load a previously obtained correct response from a JSON file
    pub fn load_reference(path: impl AsRef<Path>) -> Result<ProposalResponse, ArtifactError> {
        Self::read_json(path.as_ref())
    }

    /// Parse an artifact held in memory
    pub fn parse(json: &str) -> Result<ModelArtifact, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn read(path: &Path) -> Result<String, ArtifactError> {
        std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
        let content = Self::read(path)?;

        serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "organizations": ["Org1MSP", "Org2MSP"],
        "specification": [[1, 1]],
        "modelCheckResultList": [
            { "id": 4, "backwardTransitions": [[0, -1]], "probability": 0.5 }
        ]
    }"#;

    #[test]
    fn test_load_artifact_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        std::fs::write(&path, ARTIFACT).unwrap();

        let artifact = ArtifactLoader::load(&path).unwrap();
        assert_eq!(artifact.model_ids(), vec![4]);

        let model = artifact.select_model(4).unwrap();
        assert_eq!(model.organization_count(), 2);
        assert_eq!(model.probability, 0.5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ArtifactLoader::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let error = ArtifactLoader::load(&path).unwrap_err();
        assert!(matches!(error, ArtifactError::Parse { .. }));
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.json");
        std::fs::write(
            &path,
            r#"{ "peer": "peer0.org1", "status": 200, "payload": "asset1:blue" }"#,
        )
        .unwrap();

        let reference = ArtifactLoader::load_reference(&path).unwrap();
        assert!(reference.is_success());
        assert_eq!(reference.payload, "asset1:blue");
    }

    #[test]
    fn test_parse_in_memory() {
        assert!(ArtifactLoader::parse(ARTIFACT).is_ok());
        assert!(ArtifactLoader::parse(r#"{ "specification": [[5]] }"#).is_err());
    }
}
