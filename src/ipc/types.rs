use crate::config::Config;
use crate::plan::PlanStore;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Session state owned by the request loop and handed to every handler.
pub struct AppState {
    pub config: Config,
    pub store: PlanStore,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = config.build_catalog()?;
        let store = PlanStore::new(config.period_scheme, catalog);
        Ok(Self { config, store })
    }
}
