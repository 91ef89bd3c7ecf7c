// Application state for HTTP handlers
use crate::application::runtime_config::ConfigProvider;
use crate::application::transport::Transport;
use crate::infrastructure::config::BoardSettings;
use crate::infrastructure::notice_log::NoticeLog;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: BoardSettings,
    pub transport: Arc<dyn Transport>,
    pub config: Arc<dyn ConfigProvider>,
    pub notices: Arc<NoticeLog>,
}
