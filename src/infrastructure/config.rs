use crate::application::loading::DEFAULT_MIN_DISPLAY;
use crate::application::runtime_config::ConfigProvider;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Static service settings, read once at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct BoardSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Resolve every chart from its fallback data without network calls.
    #[serde(default)]
    pub use_mock: bool,
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
    #[serde(default = "default_app_config_path")]
    pub app_config_path: String,
    #[serde(default = "default_path_config_path")]
    pub path_config_path: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_min_display_ms() -> u64 {
    DEFAULT_MIN_DISPLAY.as_millis() as u64
}

fn default_app_base_url() -> String {
    "/board/".to_string()
}

fn default_app_config_path() -> String {
    "config/app".to_string()
}

fn default_path_config_path() -> String {
    "config/server".to_string()
}

/// `config/board.*` if present, then `BOARD__*` environment variables.
pub fn load_board_settings() -> anyhow::Result<BoardSettings> {
    load_board_settings_from("config/board")
}

pub fn load_board_settings_from(path: &str) -> anyhow::Result<BoardSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("BOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[derive(Debug, Default, Deserialize)]
struct PathConfigFile {
    #[serde(default)]
    path_config: PathConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PathConfig {
    gateway: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfigFile {
    #[serde(default)]
    app_config: AppConfig,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    api_base: Option<String>,
    api_timeout: Option<u64>,
}

/// Runtime config files that operators edit in place. Read on every call.
#[derive(Debug, Clone)]
pub struct RuntimeFileConfig {
    app_config_path: String,
    path_config_path: String,
}

impl RuntimeFileConfig {
    pub fn new(app_config_path: impl Into<String>, path_config_path: impl Into<String>) -> Self {
        Self {
            app_config_path: app_config_path.into(),
            path_config_path: path_config_path.into(),
        }
    }

    pub fn from_settings(settings: &BoardSettings) -> Self {
        Self::new(&settings.app_config_path, &settings.path_config_path)
    }

    /// Missing or broken files read as "nothing configured".
    fn read<T: DeserializeOwned + Default>(path: &str) -> T {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()
            .and_then(|c| c.try_deserialize::<T>());

        match loaded {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring runtime config {}: {}", path, e);
                T::default()
            }
        }
    }
}

impl ConfigProvider for RuntimeFileConfig {
    fn gateway_url(&self) -> Option<String> {
        Self::read::<PathConfigFile>(&self.path_config_path).path_config.gateway
    }

    fn api_base(&self) -> Option<String> {
        Self::read::<AppConfigFile>(&self.app_config_path).app_config.api_base
    }

    fn api_timeout(&self) -> Option<u64> {
        Self::read::<AppConfigFile>(&self.app_config_path).app_config.api_timeout
    }
}
