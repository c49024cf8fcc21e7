use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Layout settings for the path editor window.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelOptions {
    #[serde(default = "PanelOptions::default_window_x")]
    pub window_x: f32,
    #[serde(default = "PanelOptions::default_window_y")]
    pub window_y: f32,
    #[serde(default = "PanelOptions::default_window_width")]
    pub window_width: f32,
    #[serde(default = "PanelOptions::default_window_height")]
    pub window_height: f32,
    #[serde(default = "PanelOptions::default_rotation_step")]
    pub rotation_step: f32,
}

impl PanelOptions {
    const fn default_window_x() -> f32 {
        440.0
    }

    const fn default_window_y() -> f32 {
        400.0
    }

    const fn default_window_width() -> f32 {
        350.0
    }

    const fn default_window_height() -> f32 {
        400.0
    }

    const fn default_rotation_step() -> f32 {
        0.1
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read options file {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse options file {}", path.display()))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(options) => options,
            Err(err) => {
                eprintln!("Panel options load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            window_x: Self::default_window_x(),
            window_y: Self::default_window_y(),
            window_width: Self::default_window_width(),
            window_height: Self::default_window_height(),
            rotation_step: Self::default_rotation_step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_layout() {
        let options = PanelOptions::default();
        assert_eq!(options.window_width, 350.0);
        assert_eq!(options.window_height, 400.0);
        assert_eq!(options.rotation_step, 0.1);
    }

    #[test]
    fn partial_options_fill_missing_fields() {
        let options: PanelOptions = serde_json::from_str(r#"{ "window_width": 500.0 }"#).unwrap();
        assert_eq!(options.window_width, 500.0);
        assert_eq!(options.window_x, 440.0);
    }
}
