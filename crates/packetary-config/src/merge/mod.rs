//! Configuration layering

use tracing::debug;

use crate::mirror::{validate_config, MirrorConfig};
use crate::ConfigResult;

/// Ordered stack of configuration documents, lowest priority first
#[derive(Debug, Clone, Default)]
pub struct ConfigLayering {
    layers: Vec<MirrorConfig>,
}

impl ConfigLayering {
    /// Create an empty layering
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer on top of the existing ones
    pub fn push(&mut self, layer: MirrorConfig) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Builder form of [`ConfigLayering::push`]
    pub fn with_layer(mut self, layer: MirrorConfig) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Merge all layers into a single validated configuration.
    ///
    /// A repository equal to one from a lower layer replaces it in place;
    /// packages and requirements are appended in layer order.
    pub fn merge(&self) -> ConfigResult<MirrorConfig> {
        let mut merged = MirrorConfig::default();

        for (level, layer) in self.layers.iter().enumerate() {
            for repo in &layer.repositories {
                match merged.repositories.iter().position(|existing| existing == repo) {
                    Some(index) => {
                        debug!(layer = level, repository = %repo, "repository overridden by later layer");
                        merged.repositories[index] = repo.clone();
                    },
                    None => merged.repositories.push(repo.clone()),
                }
            }

            merged.packages.extend(layer.packages.iter().cloned());
            merged.requirements.extend(layer.requirements.iter().cloned());
        }

        validate_config(&merged)?;
        Ok(merged)
    }
}
