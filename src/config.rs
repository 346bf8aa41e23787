// config.rs - widget parameters, texture path resolution and params file lookup
//
// Params are a JSON object, every key optional:
//   panoramaCode, imgPathMask (alias imagePathMask), sideNames, sideTextures,
//   startFov, minFov, maxFov, fovMouseStep (alias fovStep)
//
// Params file selection:
// - CLI: --config <path>
// - Env: PANORAMA_CONFIG
// - <exe_dir>/assets/panorama.json, then ./assets/panorama.json

use crate::error::PanoramaError;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Placeholder replaced by `panoramaCode` in `imgPathMask`.
pub const PANORAMA_CODE_PLACEHOLDER: &str = "#PANORAMA_CODE#";
/// Placeholder replaced by the side name in `imgPathMask`.
pub const SIDE_PLACEHOLDER: &str = "#SIDE#";

pub const DEFAULT_CONTAINER_SELECTOR: &str = "#panorama";

/// One face of the panorama cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Right,
    Left,
    Top,
    Bottom,
    Back,
    Front,
}

impl Side {
    /// Fixed face order; also the order in which `sideTextures` is checked.
    pub const ALL: [Side; 6] = [
        Side::Right,
        Side::Left,
        Side::Top,
        Side::Bottom,
        Side::Back,
        Side::Front,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Side::Right => "right",
            Side::Left => "left",
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Back => "back",
            Side::Front => "front",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_side_names() -> Vec<String> {
    Side::ALL.iter().map(|s| s.name().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Specific name of the panorama, substituted into `img_path_mask`.
    pub panorama_code: Option<String>,
    /// Path template with `#PANORAMA_CODE#` and `#SIDE#` placeholders.
    #[serde(alias = "imagePathMask")]
    pub img_path_mask: Option<String>,
    /// Names substituted for `#SIDE#`, in face order.
    pub side_names: Vec<String>,
    /// Explicit path per side name. Takes precedence over the mask.
    pub side_textures: Option<HashMap<String, String>>,
    pub start_fov: f64,
    pub min_fov: f64,
    pub max_fov: f64,
    /// Fov change per wheel notch.
    #[serde(alias = "fovStep")]
    pub fov_mouse_step: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            panorama_code: None,
            img_path_mask: None,
            side_names: default_side_names(),
            side_textures: None,
            start_fov: 75.0,
            min_fov: 10.0,
            max_fov: 75.0,
            fov_mouse_step: 2.0,
        }
    }
}

impl WidgetConfig {
    /// Parse constructor params. Anything but a JSON object is rejected.
    pub fn from_params(params: &serde_json::Value) -> Result<Self, PanoramaError> {
        if !params.is_object() {
            return Err(PanoramaError::IncorrectArgument);
        }
        serde_json::from_value(params.clone()).map_err(|e| {
            log::debug!("rejected panorama params: {e}");
            PanoramaError::IncorrectArgument
        })
    }

    /// Resolve the six face texture paths, validating the sourcing mode on the way.
    pub fn texture_paths(&self) -> Result<Vec<String>, PanoramaError> {
        let paths = match &self.side_textures {
            None => {
                let (Some(code), Some(mask)) = (&self.panorama_code, &self.img_path_mask) else {
                    return Err(PanoramaError::RequiredParameter);
                };
                self.side_names
                    .iter()
                    .map(|side| {
                        mask.replace(PANORAMA_CODE_PLACEHOLDER, code)
                            .replace(SIDE_PLACEHOLDER, side)
                    })
                    .collect::<Vec<_>>()
            }
            Some(textures) => {
                let mut paths = Vec::with_capacity(Side::ALL.len());
                for side in Side::ALL {
                    match textures.get(side.name()) {
                        Some(path) => paths.push(path.clone()),
                        None => return Err(PanoramaError::RequiredSideTexture(side)),
                    }
                }
                paths
            }
        };

        self.check_ranges()?;
        Ok(paths)
    }

    fn check_ranges(&self) -> Result<(), PanoramaError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if self.side_names.len() != Side::ALL.len()
            || !positive(self.start_fov)
            || !positive(self.min_fov)
            || !positive(self.max_fov)
            || !positive(self.fov_mouse_step)
            || self.min_fov > self.max_fov
        {
            return Err(PanoramaError::IncorrectArgument);
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read params file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("params file {path:?} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a params document. Shape validation happens at construction.
pub fn load_params(path: &Path) -> Result<serde_json::Value, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn arg_value(flag: &str) -> Option<String> {
    let mut it = std::env::args();
    while let Some(a) = it.next() {
        if a == flag {
            return it.next();
        }
    }
    None
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Find the params file:
/// 1) --config <path>
/// 2) PANORAMA_CONFIG
/// 3) <exe_dir>/assets/panorama.json
/// 4) ./assets/panorama.json
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = arg_value("--config").or_else(|| env_value("PANORAMA_CONFIG")) {
        return Some(PathBuf::from(p));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join("panorama.json");
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join("panorama.json");
    if p.exists() {
        return Some(p);
    }

    None
}

/// Selector the window registers itself under: --container, PANORAMA_CONTAINER, or `#panorama`.
pub fn resolve_container_selector() -> String {
    arg_value("--container")
        .or_else(|| env_value("PANORAMA_CONTAINER"))
        .unwrap_or_else(|| DEFAULT_CONTAINER_SELECTOR.to_string())
}
