use crate::codec::{RelationCodec, RelationReader};
use crate::config::DecoderConfig;
use crate::schema::{IdInspector, IdManager, SchemaCatalog, SystemTypeInspector, SystemTypes, TypeInspector};
use std::sync::Arc;
use tracing::debug;

/// Collaborators and policy shared by every row a decoder handles
#[derive(Clone)]
pub struct DecoderSetup {
    pub(crate) ids: Arc<dyn IdInspector>,
    pub(crate) system_types: Arc<dyn SystemTypeInspector>,
    pub(crate) types: Arc<dyn TypeInspector>,
    pub(crate) reader: Arc<dyn RelationReader>,
    pub(crate) config: DecoderConfig,
}

impl DecoderSetup {
    pub fn new(
        ids: Arc<dyn IdInspector>,
        system_types: Arc<dyn SystemTypeInspector>,
        types: Arc<dyn TypeInspector>,
        reader: Arc<dyn RelationReader>,
        config: DecoderConfig,
    ) -> Self {
        Self {
            ids,
            system_types,
            types,
            reader,
            config,
        }
    }

    /// Setup using the built-in ID layout, system types and column codec
    pub fn with_catalog(catalog: SchemaCatalog, config: DecoderConfig) -> Self {
        Self::new(
            Arc::new(IdManager::default()),
            Arc::new(SystemTypes),
            Arc::new(catalog),
            Arc::new(RelationCodec::new()),
            config,
        )
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn filter_partitioned_vertices(&self) -> bool {
        self.config.filter_partitioned_vertices
    }

    /// Release collaborator resources
    pub fn close(self) {
        debug!("Closing decoder setup");
        self.types.close();
    }
}

impl std::fmt::Debug for DecoderSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderSetup")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
