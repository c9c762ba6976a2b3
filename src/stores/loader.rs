//! Store loader for seeding the in-memory stores from configuration

use super::memory::{MemoryImageStore, MemoryVectorStore};
use crate::config::Settings;
use crate::search::{ImageCollection, ImageVector, LabelSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One seeded tattoo: its photos and its labels
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTattoo {
    pub id: String,
    pub urls: Vec<String>,
    #[serde(default)]
    pub style: LabelSet,
    #[serde(default)]
    pub subject: LabelSet,
    #[serde(default)]
    pub area: LabelSet,
}

/// Contents of a seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub tattoos: Vec<SeedTattoo>,
}

impl SeedData {
    /// Load seed data from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parsing seed file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Loader for building the stores from settings
pub struct StoreLoader;

impl StoreLoader {
    /// Build both stores from the configured seed file, or empty stores when none is set
    pub fn load(settings: &Settings) -> Result<(MemoryVectorStore, MemoryImageStore)> {
        match settings.stores.seed_path {
            Some(ref path) => {
                info!("Loading seed data from: {}", path.display());
                Ok(Self::build(SeedData::from_file(path)?))
            }
            None => {
                warn!("No seed data configured, every search will report an empty store");
                Ok((MemoryVectorStore::new(), MemoryImageStore::new()))
            }
        }
    }

    /// Split seed data into the vector and image stores
    pub fn build(seed: SeedData) -> (MemoryVectorStore, MemoryImageStore) {
        let mut vectors = MemoryVectorStore::new();
        let mut images = MemoryImageStore::new();

        for tattoo in seed.tattoos {
            vectors.add_vector(ImageVector {
                id: tattoo.id.clone(),
                style: tattoo.style,
                subject: tattoo.subject,
                area: tattoo.area,
            });
            images.add_collection(ImageCollection {
                id: tattoo.id,
                urls: tattoo.urls,
            });
        }

        info!(
            "Loaded {} vectors and {} image collections",
            vectors.len(),
            images.len()
        );
        (vectors, images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
tattoos:
  - id: X
    urls: [lion_realistic_bw_chest.jpg]
    style: {realistic: 100, bw: 100}
    subject: {lion: 100}
    area: {chest: 100}
  - id: Y
    urls: [lion_neotrad_color_arm.jpg]
    subject: {lion: 100}
"#;

    #[test]
    fn test_build_from_yaml() {
        let seed = SeedData::from_yaml(SEED).unwrap();
        assert_eq!(seed.tattoos.len(), 2);

        let (vectors, images) = StoreLoader::build(seed);
        assert_eq!(vectors.len(), 2);
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let seed = "tattoos:\n  - id: X\n    urls: []\n    area: {chest: -5}\n";
        assert!(SeedData::from_yaml(seed).is_err());
    }

    #[test]
    fn test_missing_seed_file() {
        let err = SeedData::from_file("/nonexistent/tattoos.yml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tattoos.yml"));
    }

    #[test]
    fn test_load_without_seed_path() {
        let (vectors, images) = StoreLoader::load(&Settings::default()).unwrap();
        assert!(vectors.is_empty());
        assert!(images.is_empty());
    }
}
