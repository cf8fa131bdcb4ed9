//! Question catalog loader for YAML (or JSON) assets

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::models::{Catalog, CatalogAsset};

/// Loads and validates catalog assets
pub struct CatalogLoader;

impl CatalogLoader {
    /// The configured asset, or the built-in catalog when none is set.
    pub async fn resolve(path: Option<&Path>) -> Result<Catalog> {
        match path {
            Some(path) => Self::load_from_file(path).await,
            None => {
                debug!(version = Catalog::VERSION, "using built-in catalog");
                Ok(Catalog::builtin())
            }
        }
    }

    /// Load a catalog asset from disk
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        debug!("Loading catalog asset from: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .context(format!("Failed to read catalog file: {}", path.display()))?;

        Self::load_from_yaml(&content)
            .context(format!("Invalid catalog asset: {}", path.display()))
    }

    /// Parse a catalog from YAML. JSON is valid YAML and parses too.
    pub fn load_from_yaml(yaml: &str) -> Result<Catalog> {
        let asset: CatalogAsset =
            serde_yaml::from_str(yaml).context("Failed to parse catalog YAML")?;
        let catalog = Catalog::from_asset(asset).context("Catalog validation failed")?;

        info!(
            version = %catalog.version(),
            questions = catalog.total(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Serialize a catalog as a YAML asset
    pub fn to_yaml(catalog: &Catalog) -> Result<String> {
        serde_yaml::to_string(&catalog.to_asset()).context("Failed to serialize catalog")
    }

    /// Write a catalog as a YAML asset, creating parent directories
    pub async fn write_to_file(catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::write(path, Self::to_yaml(catalog)?)
            .await
            .context(format!("Failed to write catalog file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogError;

    #[tokio::test]
    async fn test_builtin_catalog_survives_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets/catalog.yaml");

        CatalogLoader::write_to_file(&Catalog::builtin(), &path).await.unwrap();
        let loaded = CatalogLoader::load_from_file(&path).await.unwrap();

        assert_eq!(loaded.version(), Catalog::VERSION);
        let ids: Vec<_> = loaded.iter().map(|q| q.id.clone()).collect();
        let builtin_ids: Vec<_> = Catalog::builtin().iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids, builtin_ids);
    }

    #[tokio::test]
    async fn test_resolve_defaults_to_builtin() {
        let catalog = CatalogLoader::resolve(None).await.unwrap();
        assert_eq!(catalog.total(), Catalog::builtin().total());
    }

    #[tokio::test]
    async fn test_missing_file_has_context() {
        let err = CatalogLoader::load_from_file("/nonexistent/catalog.yaml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }

    #[test]
    fn test_contract_violation_is_reported() {
        let mut asset = Catalog::builtin().to_asset();
        asset.questions.retain(|q| q.id != "mbti_know");
        let yaml = serde_yaml::to_string(&asset).unwrap();

        let err = CatalogLoader::load_from_yaml(&yaml).unwrap_err();
        let catalog_error = err
            .chain()
            .find_map(|e| e.downcast_ref::<CatalogError>())
            .cloned();
        assert_eq!(
            catalog_error,
            Some(CatalogError::MissingContractQuestion("mbti_know".into()))
        );
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(CatalogLoader::load_from_yaml("questions: 12").is_err());
    }
}
