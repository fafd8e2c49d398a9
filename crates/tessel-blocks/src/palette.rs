use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::types::{Rgb, VoxelType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb,
    /// Per-channel jitter amplitude applied when the block is placed.
    pub noise: u8,
}

/// Base color and jitter per voxel type, used by scene producers.
#[derive(Clone, Debug)]
pub struct BlockPalette {
    entries: HashMap<VoxelType, PaletteEntry>,
}

#[derive(Deserialize)]
struct PaletteConfig {
    #[serde(default)]
    blocks: HashMap<String, PaletteEntryConfig>,
}

#[derive(Deserialize)]
struct PaletteEntryConfig {
    color: u32,
    #[serde(default)]
    noise: u8,
}

impl Default for BlockPalette {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            VoxelType::Dirt,
            PaletteEntry { color: Rgb::from_hex(0x55_88_33), noise: 0x22 },
        );
        entries.insert(
            VoxelType::Light,
            PaletteEntry { color: Rgb::from_hex(0xFF_EE_AA), noise: 0x11 },
        );
        entries.insert(
            VoxelType::Stone,
            PaletteEntry { color: Rgb::from_hex(0x88_88_88), noise: 0x11 },
        );
        entries.insert(
            VoxelType::Tree,
            PaletteEntry { color: Rgb::from_hex(0x66_44_22), noise: 0x11 },
        );
        Self { entries }
    }
}

impl BlockPalette {
    /// Entry for `ty`; Air and unlisted types fall back to black with no jitter.
    pub fn get(&self, ty: VoxelType) -> PaletteEntry {
        self.entries.get(&ty).copied().unwrap_or(PaletteEntry {
            color: Rgb::BLACK,
            noise: 0,
        })
    }

    /// Parses `[blocks.<type>]` tables; listed types override the defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        let mut palette = BlockPalette::default();
        for (name, entry) in cfg.blocks {
            let ty = VoxelType::from_name(&name)
                .ok_or_else(|| format!("unknown block type '{}' in palette", name))?;
            if ty.is_air() {
                continue;
            }
            palette.entries.insert(
                ty,
                PaletteEntry {
                    color: Rgb::from_hex(entry.color),
                    noise: entry.noise,
                },
            );
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
