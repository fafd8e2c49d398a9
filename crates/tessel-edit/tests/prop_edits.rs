use proptest::prelude::*;
use tessel_blocks::{Rgb, VoxelType};
use tessel_edit::set_voxel;
use tessel_lighting::{LightScratch, audit_light, propagate};
use tessel_world::{World, WorldDesc};

const N: i32 = 10;

fn arb_type() -> impl Strategy<Value = VoxelType> {
    prop_oneof![
        3 => Just(VoxelType::Air),
        3 => Just(VoxelType::Stone),
        1 => Just(VoxelType::Dirt),
        1 => Just(VoxelType::Tree),
        2 => Just(VoxelType::Light),
    ]
}

fn arb_edit() -> impl Strategy<Value = ((i32, i32, i32), VoxelType)> {
    ((1..N - 1, 1..N - 1, 1..N - 1), arb_type())
}

/// Flat ground at y=1..=3 with a lit, propagated sky above.
fn ground() -> (World, LightScratch) {
    let mut world = World::new(WorldDesc::new(N, N, N, 2).unwrap());
    for z in 0..N {
        for y in 0..4 {
            for x in 0..N {
                let i = world.address(x, y, z).unwrap();
                world.voxels[i].ty = if y == 3 { VoxelType::Dirt } else { VoxelType::Stone };
            }
        }
    }
    world.recompute_heightmap();
    let mut scratch = LightScratch::new();
    propagate(&mut world, &mut scratch);
    (world, scratch)
}

fn fresh_block_light(world: &World) -> Vec<u8> {
    let mut fresh = world.clone();
    for v in fresh.voxels.iter_mut() {
        v.block_light = 0;
        v.sunlight = 0;
    }
    propagate(&mut fresh, &mut LightScratch::new());
    fresh.voxels.iter().map(|v| v.block_light).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    #[test]
    fn invariants_hold_after_every_edit(edits in prop::collection::vec(arb_edit(), 1..40)) {
        let (mut world, mut scratch) = ground();
        for ((x, y, z), ty) in edits {
            set_voxel(&mut world, &mut scratch, x, y, z, ty, Rgb::WHITE);
            prop_assert!(audit_light(&world).is_empty(), "{:?}", audit_light(&world));
            for cz in 0..N {
                for cx in 0..N {
                    prop_assert_eq!(world.height_at(cx, cz), world.scan_column_height(cx, cz));
                }
            }
        }
    }

    #[test]
    fn incremental_block_light_matches_a_full_pass(edits in prop::collection::vec(arb_edit(), 1..40)) {
        let (mut world, mut scratch) = ground();
        for ((x, y, z), ty) in edits {
            set_voxel(&mut world, &mut scratch, x, y, z, ty, Rgb::WHITE);
        }
        let got: Vec<u8> = world.voxels.iter().map(|v| v.block_light).collect();
        prop_assert_eq!(got, fresh_block_light(&world));
    }

    #[test]
    fn every_change_lies_in_the_reported_box(
        setup in prop::collection::vec(arb_edit(), 0..20),
        (pos, ty) in arb_edit(),
    ) {
        let (mut world, mut scratch) = ground();
        for ((x, y, z), t) in setup {
            set_voxel(&mut world, &mut scratch, x, y, z, t, Rgb::WHITE);
        }
        let before = world.voxels.clone();
        let report = set_voxel(&mut world, &mut scratch, pos.0, pos.1, pos.2, ty, Rgb::WHITE);
        match report {
            None => prop_assert_eq!(&world.voxels, &before),
            Some(r) => {
                for (i, (a, b)) in world.voxels.iter().zip(before.iter()).enumerate() {
                    if a != b {
                        let (x, y, z) = world.desc.coords(i);
                        prop_assert!(r.touched.contains(x, y, z), "({}, {}, {}) outside {:?}", x, y, z, r.touched);
                    }
                }
            }
        }
    }

    #[test]
    fn repeated_edit_changes_nothing((pos, ty) in arb_edit()) {
        let (mut world, mut scratch) = ground();
        set_voxel(&mut world, &mut scratch, pos.0, pos.1, pos.2, ty, Rgb::WHITE);
        let snapshot = world.clone();
        prop_assert!(set_voxel(&mut world, &mut scratch, pos.0, pos.1, pos.2, ty, Rgb::WHITE).is_none());
        prop_assert_eq!(world.voxels, snapshot.voxels);
        prop_assert_eq!(world.heightmap, snapshot.heightmap);
    }
}
