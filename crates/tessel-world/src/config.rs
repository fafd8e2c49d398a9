use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::error::WorldError;
use crate::grid::WorldDesc;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub scene: SceneSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_depth")]
    pub depth: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u8,
}
fn default_width() -> i32 {
    128
}
fn default_height() -> i32 {
    64
}
fn default_depth() -> i32 {
    128
}
fn default_sea_level() -> i32 {
    6
}
fn default_chunk_size() -> u8 {
    16
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            depth: default_depth(),
            sea_level: default_sea_level(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl WorldSection {
    pub fn desc(&self) -> Result<WorldDesc, WorldError> {
        WorldDesc::new(self.width, self.height, self.depth, self.sea_level)
    }
}

/// Inputs for the demo scene producer; the core itself ignores these.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_terrain_frequency")]
    pub terrain_frequency: f32,
    #[serde(default = "default_lamp_spacing")]
    pub lamp_spacing: i32,
    #[serde(default = "default_agent_height")]
    pub agent_height: i32,
    #[serde(default)]
    pub palette: Option<String>,
}
fn default_seed() -> i32 {
    1337
}
fn default_terrain_frequency() -> f32 {
    0.02
}
fn default_lamp_spacing() -> i32 {
    24
}
fn default_agent_height() -> i32 {
    2
}
impl Default for SceneSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            terrain_frequency: default_terrain_frequency(),
            lamp_spacing: default_lamp_spacing(),
            agent_height: default_agent_height(),
            palette: None,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldConfig = toml::from_str(&s)?;
    // Surface bad dimensions at load time rather than at first use
    cfg.world.desc()?;
    Ok(cfg)
}
