use rand::SeedableRng;
use rand::rngs::StdRng;
use tessel_blocks::{Rgb, Voxel, VoxelType};
use tessel_world::{RegionError, World, WorldDesc};

use super::*;

fn set(w: &mut World, x: i32, y: i32, z: i32, ty: VoxelType) {
    let i = w.address(x, y, z).unwrap();
    w.voxels[i] = Voxel::new(ty, Rgb::WHITE);
}

/// Stone floor at y=1 across the whole grid, sea level 1.
fn floor(w: i32, h: i32, d: i32) -> World {
    let mut world = World::new(WorldDesc::new(w, h, d, 1).unwrap());
    for z in 0..d {
        for x in 0..w {
            set(&mut world, x, 1, z, VoxelType::Stone);
        }
    }
    world.recompute_heightmap();
    world
}

fn cells(path: &[Waypoint]) -> Vec<(i32, i32, i32)> {
    path.iter().map(|p| (p.x, p.y, p.z)).collect()
}

#[test]
fn straight_line_on_flat_floor() {
    let w = floor(12, 8, 12);
    let mask = ObstacleMask::new(w.desc);
    let path = find_path(&w, &mask, 2, (2, 2, 2), (7, 2, 2)).unwrap();
    assert_eq!(cells(&path), (2..=7).map(|x| (x, 2, 2)).collect::<Vec<_>>());
}

#[test]
fn start_equal_to_goal_is_a_single_waypoint() {
    let w = floor(8, 6, 8);
    let mask = ObstacleMask::new(w.desc);
    let path = find_path(&w, &mask, 2, (3, 2, 3), (3, 2, 3)).unwrap();
    assert_eq!(cells(&path), vec![(3, 2, 3)]);
}

#[test]
fn climbs_and_drops_over_a_ridge() {
    let mut w = floor(12, 8, 12);
    for z in 0..12 {
        set(&mut w, 5, 2, z, VoxelType::Stone);
    }
    w.recompute_heightmap();
    let mask = ObstacleMask::new(w.desc);
    let path = find_path(&w, &mask, 2, (2, 2, 2), (7, 2, 2)).unwrap();
    assert_eq!(
        cells(&path),
        vec![(2, 2, 2), (3, 2, 2), (4, 2, 2), (5, 3, 2), (6, 2, 2), (7, 2, 2)]
    );
}

#[test]
fn blocked_level_move_falls_back_to_step_up() {
    let mut w = floor(8, 8, 8);
    set(&mut w, 4, 2, 3, VoxelType::Dirt);
    w.recompute_heightmap();
    let mask = ObstacleMask::new(w.desc);
    let q = PathQuery::new(&w, &mask, 2);
    let steps = q.neighbors((3, 2, 3));
    assert!(steps.contains(&Step { to: (4, 3, 3), cost: 2 }));
    assert!(steps.contains(&Step { to: (2, 2, 3), cost: 1 }));
    assert!(steps.contains(&Step { to: (3, 2, 4), cost: 1 }));
    assert_eq!(steps.len(), 4);
}

#[test]
fn obstacles_force_a_detour() {
    let w = floor(12, 8, 12);
    let mask = ObstacleMask::from_points(w.desc, [(5, 2, 2)]);
    let path = find_path(&w, &mask, 2, (2, 2, 2), (7, 2, 2)).unwrap();
    assert!(!cells(&path).contains(&(5, 2, 2)));
    assert_eq!(path.len(), 8);
}

#[test]
fn enclosed_goal_is_unreachable() {
    let mut w = floor(12, 8, 12);
    for (x, z) in [(6, 7), (8, 7), (7, 6), (7, 8)] {
        for y in 2..=4 {
            set(&mut w, x, y, z, VoxelType::Stone);
        }
    }
    w.recompute_heightmap();
    let mask = ObstacleMask::new(w.desc);
    assert_eq!(
        find_path(&w, &mask, 2, (2, 2, 2), (7, 2, 7)),
        Err(PathError::Unreachable)
    );
}

#[test]
fn large_open_search_hits_the_limit() {
    let mut w = floor(80, 6, 80);
    for (x, z) in [(69, 70), (71, 70), (70, 69), (70, 71)] {
        for y in 2..=4 {
            set(&mut w, x, y, z, VoxelType::Stone);
        }
    }
    w.recompute_heightmap();
    let mask = ObstacleMask::new(w.desc);
    match find_path(&w, &mask, 2, (5, 2, 5), (70, 2, 70)) {
        Err(PathError::SearchLimit { visited }) => assert!(visited > MAX_VISITED),
        other => panic!("expected search limit, got {:?}", other),
    }
}

#[test]
fn endpoints_outside_the_grid_are_rejected() {
    let w = floor(8, 6, 8);
    let mask = ObstacleMask::new(w.desc);
    assert_eq!(
        find_path(&w, &mask, 2, (-1, 2, 2), (3, 2, 3)),
        Err(PathError::OutOfBounds(RegionError::PointOutOfBounds { x: -1, y: 2, z: 2 }))
    );
    let err = find_path(&w, &mask, 2, (1, 2, 2), (3, 2, 30)).unwrap_err();
    assert!(err.to_string().contains("rejected"));
}

#[test]
fn waypoints_carry_head_light() {
    let mut w = floor(8, 6, 8);
    let i = w.address(3, 3, 2).unwrap();
    w.voxels[i].block_light = 16;
    w.voxels[i].sunlight = 8;
    let mask = ObstacleMask::new(w.desc);
    let path = find_path(&w, &mask, 2, (2, 2, 2), (4, 2, 2)).unwrap();
    assert_eq!(path[1].light, 0xff7f);
    assert_eq!(path[0].light, 0);
}

#[test]
fn obstacle_mask_ignores_points_outside() {
    let desc = WorldDesc::new(4, 4, 4, 0).unwrap();
    let mut mask = ObstacleMask::from_points(desc, [(1, 1, 1), (9, 0, 0), (0, -1, 0)]);
    assert_eq!(mask.count(), 1);
    assert!(mask.is_blocked(1, 1, 1));
    assert!(!mask.is_blocked(9, 0, 0));
    mask.clear();
    assert_eq!(mask.count(), 0);
}

#[test]
fn targets_are_standable_and_near() {
    let w = floor(16, 12, 16);
    let mask = ObstacleMask::new(w.desc);
    let q = PathQuery::new(&w, &mask, 2);
    let mut rng = StdRng::seed_from_u64(7);
    let mut found = 0;
    for _ in 0..200 {
        if let Some((x, y, z)) = find_target(&w, &mask, &mut rng, (8, 2, 8), 4, 2) {
            found += 1;
            assert!(q.can_walk(x, y - 1, z));
            assert!((4..12).contains(&x) && (4..12).contains(&z));
            assert_eq!(y, 2);
        }
    }
    assert!(found > 0);
}

#[test]
fn tree_surfaces_are_never_targets() {
    let mut w = World::new(WorldDesc::new(16, 12, 16, 1).unwrap());
    for z in 0..16 {
        for x in 0..16 {
            set(&mut w, x, 1, z, VoxelType::Tree);
        }
    }
    w.recompute_heightmap();
    let mask = ObstacleMask::new(w.desc);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        assert_eq!(find_target(&w, &mask, &mut rng, (8, 2, 8), 4, 2), None);
    }
}

#[test]
fn zero_radius_has_no_target() {
    let w = floor(8, 8, 8);
    let mask = ObstacleMask::new(w.desc);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(find_target(&w, &mask, &mut rng, (4, 2, 4), 0, 2), None);
}
