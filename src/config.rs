use std::path::{Path, PathBuf};

use serde::Deserialize;

const APP_DIR: &str = "overmark";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_HIT_PADDING: f64 = 10.0;
const DEFAULT_HANDLE_RADIUS: f64 = 8.0;
const DEFAULT_ERASER_RADIUS: f64 = 10.0;

/// Engine tuning knobs from `config.json`. Every field has a default; a
/// missing or malformed file never fails engine construction.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Pixel tolerance for annotation body hit-testing.
    #[serde(default = "default_hit_padding")]
    pub hit_padding: f64,
    /// Per-axis half-size of the handle hit square.
    #[serde(default = "default_handle_radius")]
    pub handle_radius: f64,
    /// Stroke-mode eraser radius.
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: f64,
    /// Font files probed in order for the glyph pass.
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hit_padding: DEFAULT_HIT_PADDING,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            font_paths: default_font_paths(),
        }
    }
}

fn default_hit_padding() -> f64 {
    DEFAULT_HIT_PADDING
}

fn default_handle_radius() -> f64 {
    DEFAULT_HANDLE_RADIUS
}

fn default_eraser_radius() -> f64 {
    DEFAULT_ERASER_RADIUS
}

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

pub fn load_engine_config() -> EngineConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_engine_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_engine_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> EngineConfig {
    let Some(path) = engine_config_path(xdg_config_home, home) else {
        return EngineConfig::default();
    };
    if !path.exists() {
        return EngineConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EngineConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EngineConfig::default()
        }
    }
}

fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn engine_config_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let mut path = match xdg_config_home.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home?.join(".config"),
    };
    path.push(APP_DIR);
    path.push(APP_CONFIG_FILE);
    Some(path)
}
