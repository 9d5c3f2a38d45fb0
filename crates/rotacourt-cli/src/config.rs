use std::path::Path;

use rotacourt_engine::Game;
use rotacourt_selector::{SelectorConfig, SelectorKind, SelectorSeed};
use rotacourt_session::{GameManager, ManagerConfig};
use serde::{Deserialize, Serialize};

use crate::util;

/// Contents of the `--config` JSON file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotacourtConfig {
    pub selector: SelectorConfig,
    pub manager: ManagerConfig,
}

impl RotacourtConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => util::read_json_file("config", path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command line overrides on top of the file settings.
    #[must_use]
    pub fn with_overrides(mut self, kind: Option<SelectorKind>, seed: Option<SelectorSeed>) -> Self {
        if let Some(kind) = kind {
            self.selector.kind = kind;
        }
        if seed.is_some() {
            self.selector.seed = seed;
        }
        self
    }

    pub fn build_manager(&self, game: Game) -> anyhow::Result<GameManager> {
        let selector = self.selector.build();
        log::debug!("using {} selector", selector.name());
        let manager = GameManager::new(game, selector, self.manager.clone())?;
        Ok(manager)
    }
}
