use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::Rng;
use tessel_blocks::{BlockPalette, VoxelType};
use tessel_world::{SceneSection, World, WorldDesc};

/// Where the generator put things worth looking at afterwards.
#[derive(Clone, Debug, Default)]
pub struct SceneSummary {
    pub lamps: Vec<(i32, i32, i32)>,
    pub trees: usize,
    /// Inside corner of the closed room, if one fit.
    pub room: Option<(i32, i32, i32)>,
}

const ROOM: i32 = 7;

fn place<R: Rng + ?Sized>(
    world: &mut World,
    palette: &BlockPalette,
    rng: &mut R,
    (x, y, z): (i32, i32, i32),
    ty: VoxelType,
) {
    let e = palette.get(ty);
    world.place_voxel(x, y, z, ty, e.color, e.noise, rng);
}

/// Rolling noise terrain: stone core, dirt cap, sparse trees, a lamp every
/// `lamp_spacing` columns and one closed stone room lit from inside.
/// Light is not computed here.
pub fn build_scene<R: Rng + ?Sized>(
    desc: WorldDesc,
    scene: &SceneSection,
    palette: &BlockPalette,
    rng: &mut R,
) -> (World, SceneSummary) {
    let mut world = World::new(desc);
    let mut summary = SceneSummary::default();

    let mut noise = FastNoiseLite::with_seed(scene.seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(scene.terrain_frequency));

    // Columns stay off the outer margin and leave headroom under the top row.
    let ceiling = desc.height - 3;
    if ceiling < 1 {
        return (world, summary);
    }
    let min_h = (desc.sea_level + 1).max(1);
    let max_h = ((desc.height as f32 * 0.6) as i32).max(min_h + 1);
    for z in 1..desc.depth - 1 {
        for x in 1..desc.width - 1 {
            let n = noise.get_noise_2d(x as f32, z as f32);
            let top = (((n + 1.0) * 0.5 * (max_h - min_h) as f32) as i32 + min_h)
                .clamp(1, ceiling);
            for y in 1..=top {
                let ty = if y + 2 >= top {
                    VoxelType::Dirt
                } else {
                    VoxelType::Stone
                };
                place(&mut world, palette, rng, (x, y, z), ty);
            }
        }
    }

    let spacing = scene.lamp_spacing.max(2);
    for z in (spacing / 2..desc.depth - 1).step_by(spacing as usize) {
        for x in (spacing / 2..desc.width - 1).step_by(spacing as usize) {
            let y = world.height_at(x, z) + 1;
            if y < desc.height - 1 {
                place(&mut world, palette, rng, (x, y, z), VoxelType::Light);
                summary.lamps.push((x, y, z));
            }
        }
    }

    for z in 2..desc.depth - 2 {
        for x in 2..desc.width - 2 {
            if rng.gen_range(0..200) != 0 {
                continue;
            }
            let base = world.height_at(x, z);
            if world.voxel_type(x, base, z) != Some(VoxelType::Dirt) {
                continue;
            }
            let trunk = rng.gen_range(2..5);
            for y in base + 1..=(base + trunk).min(ceiling) {
                place(&mut world, palette, rng, (x, y, z), VoxelType::Tree);
            }
            summary.trees += 1;
        }
    }

    summary.room = build_room(&mut world, palette, rng);
    (world, summary)
}

// Hollow stone cube near the far corner with a lamp on its floor.
fn build_room<R: Rng + ?Sized>(
    world: &mut World,
    palette: &BlockPalette,
    rng: &mut R,
) -> Option<(i32, i32, i32)> {
    let desc = world.desc;
    let (x0, z0) = (desc.width - ROOM - 2, desc.depth - ROOM - 2);
    if x0 < 1 || z0 < 1 {
        return None;
    }
    let mut floor = 0;
    for z in z0..z0 + ROOM {
        for x in x0..x0 + ROOM {
            floor = floor.max(world.height_at(x, z));
        }
    }
    let y0 = floor + 1;
    if y0 + ROOM >= desc.height - 1 {
        return None;
    }
    for z in z0..z0 + ROOM {
        for y in y0..y0 + ROOM {
            for x in x0..x0 + ROOM {
                let edge = |v: i32, v0: i32| v == v0 || v == v0 + ROOM - 1;
                if edge(x, x0) || edge(y, y0) || edge(z, z0) {
                    place(world, palette, rng, (x, y, z), VoxelType::Stone);
                }
            }
        }
    }
    place(
        world,
        palette,
        rng,
        (x0 + ROOM / 2, y0 + 1, z0 + ROOM / 2),
        VoxelType::Light,
    );
    Some((x0 + 1, y0 + 1, z0 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene() -> (World, SceneSummary) {
        let desc = WorldDesc::new(48, 40, 48, 4).unwrap();
        let cfg = SceneSection {
            lamp_spacing: 16,
            ..SceneSection::default()
        };
        build_scene(desc, &cfg, &BlockPalette::default(), &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn margin_stays_air() {
        let (w, _) = scene();
        let d = w.desc;
        for z in 0..d.depth {
            for x in 0..d.width {
                assert!(w.is_air(x, 0, z));
                assert!(w.is_air(x, d.height - 1, z));
            }
        }
        for y in 0..d.height {
            assert!(w.is_air(0, y, 5) && w.is_air(d.width - 1, y, 5));
        }
    }

    #[test]
    fn heightmap_matches_scan() {
        let (w, _) = scene();
        for z in 0..w.desc.depth {
            for x in 0..w.desc.width {
                assert_eq!(w.height_at(x, z), w.scan_column_height(x, z));
            }
        }
    }

    #[test]
    fn tiny_grids_build_without_panicking() {
        let cfg = SceneSection::default();
        let mut rng = StdRng::seed_from_u64(5);
        for (w, h, d) in [(1, 1, 1), (2, 8, 2), (3, 3, 3), (8, 2, 8), (6, 4, 6), (3, 5, 40)] {
            let desc = WorldDesc::new(w, h, d, 0).unwrap();
            let (world, summary) = build_scene(desc, &cfg, &BlockPalette::default(), &mut rng);
            assert!(summary.room.is_none());
            for z in 0..d {
                for x in 0..w {
                    assert!(world.is_air(x, h - 1, z));
                    assert_eq!(world.height_at(x, z), world.scan_column_height(x, z));
                }
            }
        }
    }

    #[test]
    fn lamps_and_room_are_placed() {
        let (w, s) = scene();
        assert!(!s.lamps.is_empty());
        for &(x, y, z) in &s.lamps {
            assert_eq!(w.voxel_type(x, y, z), Some(VoxelType::Light));
        }
        let (x, y, z) = s.room.unwrap();
        assert!(w.is_solid(x - 1, y, z));
        assert!(w.is_air(x, y, z));
    }
}
