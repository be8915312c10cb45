use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::SourcePipeline;
use crate::telegram::ChatTransport;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SourcePipeline>,

    /// `None` when no bot token is configured; the webhook then refuses work.
    pub transport: Option<Arc<dyn ChatTransport>>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<SourcePipeline>,
        transport: Option<Arc<dyn ChatTransport>>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            pipeline,
            transport,
            config,
        }
    }
}
