use std::sync::Arc;

use shared::protocol::Statistics;
use tokio::sync::watch;

use crate::{
    state::{RequestState, RequestStateCell},
    PanelApi,
};

pub const STATISTICS_FALLBACK: &str = "Erro ao carregar estatísticas.";

pub struct StatisticsAccessor {
    api: Arc<dyn PanelApi>,
    state: RequestStateCell,
}

impl StatisticsAccessor {
    pub fn new(api: Arc<dyn PanelApi>) -> Self {
        Self {
            api,
            state: RequestStateCell::new(),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub async fn load_statistics(&self) -> Option<Statistics> {
        self.state
            .track("load_statistics", STATISTICS_FALLBACK, self.api.statistics())
            .await
    }
}
