use cairn_geom::{Aabb, Vec3};
use proptest::prelude::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..=1.0e4
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn dot_is_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(approx(a.dot(b), b.dot(a), 1e-2));
    }

    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        // Orthogonality degrades with magnitude; scale tolerance accordingly.
        let scale = (a.length() * b.length()).max(1.0);
        prop_assert!(c.dot(a).abs() <= 1e-2 * scale * scale.sqrt());
        prop_assert!(c.dot(b).abs() <= 1e-2 * scale * scale.sqrt());
    }

    #[test]
    fn normalized_has_unit_length(v in arb_vec3()) {
        prop_assume!(v.length() > 1e-3);
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }

    #[test]
    fn add_sub_round_trip(a in arb_vec3(), b in arb_vec3()) {
        let back = (a + b) - b;
        prop_assert!(approx(back.x, a.x, 1e-2));
        prop_assert!(approx(back.y, a.y, 1e-2));
        prop_assert!(approx(back.z, a.z, 1e-2));
    }

    #[test]
    fn center_half_reconstructs_box(c in arb_vec3(), h in arb_vec3()) {
        let half = Vec3::new(h.x.abs(), h.y.abs(), h.z.abs());
        let bb = Aabb::from_center_half(c, half);
        let rc = bb.center();
        let rh = bb.half_extent();
        prop_assert!(approx(rc.x, c.x, 1e-1) && approx(rc.y, c.y, 1e-1) && approx(rc.z, c.z, 1e-1));
        prop_assert!(approx(rh.x, half.x, 1e-1) && approx(rh.y, half.y, 1e-1) && approx(rh.z, half.z, 1e-1));
    }
}
