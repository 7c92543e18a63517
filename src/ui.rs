use crate::error::BenbotError;
use crate::iced_ui::{self, IcedUiLaunchConfig};
use crate::Result;

#[derive(Clone)]
pub struct UiLaunchConfig {
    pub backend_url: String,
    pub title: String,
}

impl Default for UiLaunchConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            title: "BenBot".to_string(),
        }
    }
}

pub fn launch_ui() -> Result<()> {
    launch_ui_with_config(UiLaunchConfig::default())
}

pub fn launch_ui_with_config(config: UiLaunchConfig) -> Result<()> {
    if config.backend_url.trim().is_empty() {
        return Err(BenbotError::Config("backend URL is empty".to_string()));
    }

    iced_ui::launch_ui(IcedUiLaunchConfig {
        backend_url: config.backend_url,
        title: config.title,
    })
    .map_err(|err| {
        tracing::error!(error = %err, "failed to launch iced UI");
        BenbotError::Runtime(err.to_string())
    })
}
