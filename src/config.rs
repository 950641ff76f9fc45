//! Runtime-tunable settings.
//!
//! `settings.json` is an optional asset: when it is missing or malformed the
//! defaults below apply and a warning says so. The game never refuses to
//! start over settings.

use log::warn;

use crate::asset::AssetResolver;

/// Window and HUD settings, read from `settings.json`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    pub hud_scale: f32,
    pub hud_margin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            fullscreen: false,
            vsync: true,
            hud_scale: 2.0,
            hud_margin: 8.0,
        }
    }
}

impl Settings {
    /// The asset request the settings are loaded from.
    pub const REQUEST: &str = "settings.json";

    /// Loads the settings through the resolver, falling back to the
    /// defaults when the asset is missing or does not parse.
    pub fn load(resolver: &AssetResolver) -> Self {
        match resolver.load_string(Self::REQUEST) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("ignoring malformed {}: {err}", Self::REQUEST);
                    Self::default()
                }
            },
            Err(err) => {
                warn!("using default settings: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::exe_dir::NoExeLocator;
    use tempfile::TempDir;

    #[test]
    fn test_partial_settings_keep_defaults_elsewhere() {
        let settings: Settings = serde_json::from_str(r#"{ "fullscreen": true }"#).unwrap();
        assert!(settings.fullscreen);
        assert_eq!(settings.window_width, Settings::default().window_width);
        assert_eq!(settings.vsync, Settings::default().vsync);
    }

    #[test]
    fn test_settings_load_through_the_resolver() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join("settings.json"),
            r#"{ "window_width": 640, "window_height": 480 }"#,
        )
        .unwrap();
        let resolver = AssetResolver::with_sources(
            Some(root.path().to_path_buf()),
            Box::new(NoExeLocator),
        );
        let settings = Settings::load(&resolver);
        assert_eq!(settings.window_width, 640);
        assert_eq!(settings.window_height, 480);
        assert!(!settings.fullscreen);
    }

    #[test]
    fn test_missing_settings_fall_back_to_defaults() {
        let resolver = AssetResolver::with_sources(None, Box::new(NoExeLocator));
        assert_eq!(Settings::load(&resolver), Settings::default());
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("settings.json"), "{ not json").unwrap();
        let resolver = AssetResolver::with_sources(
            Some(root.path().to_path_buf()),
            Box::new(NoExeLocator),
        );
        assert_eq!(Settings::load(&resolver), Settings::default());
    }
}
