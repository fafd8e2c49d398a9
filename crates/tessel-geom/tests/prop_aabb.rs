use proptest::prelude::*;
use tessel_geom::{Aabb, Vec3};

fn small_f32() -> impl Strategy<Value = f32> {
    -1_000.0f32..1_000.0
}

fn small_vec3() -> impl Strategy<Value = Vec3> {
    (small_f32(), small_f32(), small_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Every grown point lies inside the box and inside its bounding sphere
    #[test]
    fn grown_points_are_bounded(points in prop::collection::vec(small_vec3(), 1..32)) {
        let mut b = Aabb::EMPTY;
        for p in &points {
            b.grow(*p);
        }
        prop_assert!(!b.is_empty());
        let s = b.bounding_sphere();
        for p in &points {
            prop_assert!(p.x >= b.min.x && p.x <= b.max.x);
            prop_assert!(p.y >= b.min.y && p.y <= b.max.y);
            prop_assert!(p.z >= b.min.z && p.z <= b.max.z);
            let d = (*p - s.center).length();
            prop_assert!(d <= s.radius * (1.0 + 1e-5) + 1e-3);
        }
    }

    // Growing is order independent
    #[test]
    fn grow_order_independent(mut points in prop::collection::vec(small_vec3(), 1..16)) {
        let mut a = Aabb::EMPTY;
        for p in &points {
            a.grow(*p);
        }
        points.reverse();
        let mut b = Aabb::EMPTY;
        for p in &points {
            b.grow(*p);
        }
        prop_assert_eq!(a, b);
    }

    // Center translates with the box
    #[test]
    fn center_translation(min in small_vec3(), ext in small_vec3(), t in small_vec3()) {
        let a = Aabb::new(min, min + Vec3::new(ext.x.abs(), ext.y.abs(), ext.z.abs()));
        let b = Aabb::new(a.min + t, a.max + t);
        let d = b.center() - (a.center() + t);
        prop_assert!(d.length() <= 1e-2);
    }
}
