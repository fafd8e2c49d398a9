use serde::Deserialize;

/// Upper bound for both light channels.
pub const MAX_LIGHT: u8 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum VoxelType {
    #[default]
    Air = 0,
    Dirt = 1,
    Light = 2,
    Stone = 3,
    Tree = 4,
}

impl VoxelType {
    pub const ALL: [VoxelType; 5] = [
        VoxelType::Air,
        VoxelType::Dirt,
        VoxelType::Light,
        VoxelType::Stone,
        VoxelType::Tree,
    ];

    /// Decodes a raw type byte. Unknown values are rejected.
    #[inline]
    pub fn from_u8(v: u8) -> Option<VoxelType> {
        match v {
            0 => Some(VoxelType::Air),
            1 => Some(VoxelType::Dirt),
            2 => Some(VoxelType::Light),
            3 => Some(VoxelType::Stone),
            4 => Some(VoxelType::Tree),
            _ => None,
        }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, VoxelType::Air)
    }

    /// Anything but Air occupies its cell.
    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    #[inline]
    pub fn is_emitter(self) -> bool {
        matches!(self, VoxelType::Light)
    }

    /// Inverse of [`VoxelType::name`].
    pub fn from_name(name: &str) -> Option<VoxelType> {
        VoxelType::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            VoxelType::Air => "air",
            VoxelType::Dirt => "dirt",
            VoxelType::Light => "light",
            VoxelType::Stone => "stone",
            VoxelType::Tree => "tree",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`; bits above 24 are ignored.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    #[inline]
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Scales every channel by `factor` in `[0,1]`, truncating.
    #[inline]
    pub fn scaled(self, factor: f32) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }
}

/// One grid cell: type, color, and the two light channels.
///
/// Light only lives in Air cells. The single exception is a `Light` voxel,
/// which holds `block_light = MAX_LIGHT` as its emission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    pub ty: VoxelType,
    pub color: Rgb,
    pub block_light: u8,
    pub sunlight: u8,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        ty: VoxelType::Air,
        color: Rgb::BLACK,
        block_light: 0,
        sunlight: 0,
    };

    #[inline]
    pub const fn new(ty: VoxelType, color: Rgb) -> Self {
        Self {
            ty,
            color,
            block_light: 0,
            sunlight: 0,
        }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.ty.is_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn type_bytes_round_trip() {
        for ty in VoxelType::ALL {
            assert_eq!(VoxelType::from_u8(ty as u8), Some(ty));
        }
        assert_eq!(VoxelType::from_u8(5), None);
        assert_eq!(VoxelType::from_u8(255), None);
        assert_eq!(VoxelType::from_name("stone"), Some(VoxelType::Stone));
        assert_eq!(VoxelType::from_name("Stone"), None);
    }

    #[test]
    fn only_air_is_non_solid_and_only_light_emits() {
        for ty in VoxelType::ALL {
            assert_eq!(ty.is_solid(), ty != VoxelType::Air);
            assert_eq!(ty.is_emitter(), ty == VoxelType::Light);
        }
    }

    #[test]
    fn default_voxel_is_dark_air() {
        let v = Voxel::default();
        assert_eq!(v, Voxel::AIR);
        assert!(v.is_air());
    }

    proptest! {
        #[test]
        fn hex_matches_channels(hex in 0u32..=0xFF_FFFF) {
            let c = Rgb::from_hex(hex);
            prop_assert_eq!(c.to_hex(), hex);
        }

        #[test]
        fn scaling_never_brightens(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), f in 0.0f32..=1.0) {
            let c = Rgb::new(r, g, b);
            let s = c.scaled(f);
            prop_assert!(s.r <= c.r && s.g <= c.g && s.b <= c.b);
        }
    }
}
