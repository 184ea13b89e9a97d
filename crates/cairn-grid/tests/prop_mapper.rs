use cairn_grid::{GridConfig, Mapper};
use proptest::prelude::*;

fn even_dim() -> impl Strategy<Value = usize> {
    (1usize..=4).prop_map(|v| v * 2)
}

fn arb_config() -> impl Strategy<Value = GridConfig> {
    (even_dim(), even_dim(), even_dim(), even_dim(), even_dim())
        .prop_map(|(sx, sy, sz, nx, nz)| GridConfig::new((sx, sy, sz), (nx, nz)))
}

fn in_range_coord(cfg: GridConfig) -> impl Strategy<Value = (i32, i32, i32)> {
    let (wsx, wsy, wsz) = cfg.world_size();
    let (hx, hy, hz) = (wsx as i32 / 2, wsy as i32 / 2, wsz as i32 / 2);
    (-hx..hx, -hy..hy, -hz..hz)
}

proptest! {
    // resolve followed by the inverse reconstruction is the identity
    #[test]
    fn round_trip((cfg, w) in arb_config().prop_flat_map(|cfg| {
        in_range_coord(cfg).prop_map(move |w| (cfg, w))
    })) {
        let m = Mapper::new(cfg);
        let (wx, wy, wz) = w;
        let r = m.resolve(wx, wy, wz).expect("in-range coordinate must resolve");
        prop_assert!(r.chunk_index < cfg.chunk_count());
        prop_assert!(r.local_index < cfg.chunk_volume());
        prop_assert_eq!(m.world_from_parts(r.cx, r.cz, r.lx, r.ly, r.lz), (wx, wy, wz));
    }

    // render position floors back to the source coordinate
    #[test]
    fn block_world_pos_floors_to_world((cfg, w) in arb_config().prop_flat_map(|cfg| {
        in_range_coord(cfg).prop_map(move |w| (cfg, w))
    })) {
        let m = Mapper::new(cfg);
        let (wx, wy, wz) = w;
        let r = m.resolve(wx, wy, wz).expect("in-range");
        let pos = m.block_world_pos(r.cx, r.cz, r.lx, r.ly, r.lz);
        prop_assert_eq!(pos.x.floor() as i32, wx);
        prop_assert_eq!(pos.y as i32, wy);
        prop_assert_eq!(pos.z.floor() as i32, wz);
    }

    // every in-range coordinate maps to a distinct (chunk, local) pair
    #[test]
    fn mapping_is_injective(cfg in arb_config()) {
        let m = Mapper::new(cfg);
        let (wsx, wsy, wsz) = cfg.world_size();
        let (hx, hy, hz) = (wsx as i32 / 2, wsy as i32 / 2, wsz as i32 / 2);
        let mut seen = vec![false; cfg.capacity()];
        for wz in -hz..hz {
            for wy in -hy..hy {
                for wx in -hx..hx {
                    let r = m.resolve(wx, wy, wz).expect("in-range");
                    let slot = r.chunk_index * cfg.chunk_volume() + r.local_index;
                    prop_assert!(!seen[slot]);
                    seen[slot] = true;
                }
            }
        }
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // one step outside any axis fails to resolve
    #[test]
    fn out_of_range_does_not_resolve(cfg in arb_config()) {
        let m = Mapper::new(cfg);
        let (wsx, wsy, wsz) = cfg.world_size();
        let (hx, hy, hz) = (wsx as i32 / 2, wsy as i32 / 2, wsz as i32 / 2);
        prop_assert!(m.resolve(hx, 0, 0).is_none());
        prop_assert!(m.resolve(-hx - 1, 0, 0).is_none());
        prop_assert!(m.resolve(0, hy, 0).is_none());
        prop_assert!(m.resolve(0, -hy - 1, 0).is_none());
        prop_assert!(m.resolve(0, 0, hz).is_none());
        prop_assert!(m.resolve(0, 0, -hz - 1).is_none());
    }
}

#[test]
fn anchors_are_symmetric_about_origin() {
    let cfg = GridConfig::new((4, 4, 4), (2, 2));
    let m = Mapper::new(cfg);
    let a = m.chunk_anchor(0, 0);
    let b = m.chunk_anchor(1, 1);
    assert_eq!(a.x, -b.x);
    assert_eq!(a.z, -b.z);
    assert_eq!(a.y, 0.0);
    assert_eq!(b.y, 0.0);
}

#[test]
fn chunk_index_is_row_major() {
    let cfg = GridConfig::new((4, 4, 4), (4, 2));
    let m = Mapper::new(cfg);
    assert_eq!(m.chunk_index(0, 0), 0);
    assert_eq!(m.chunk_index(3, 0), 3);
    assert_eq!(m.chunk_index(0, 1), 4);
    assert_eq!(m.chunk_index(3, 1), 7);
}
