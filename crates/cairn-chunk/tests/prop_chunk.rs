use cairn_blocks::Voxel;
use cairn_chunk::Chunk;
use cairn_geom::Vec3;
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -1_000i32..=1_000
}

proptest! {
    // local_index maps each (x,y,z) within bounds to a unique in-range slot
    #[test]
    fn local_index_is_unique_and_in_range(cx in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let ch = Chunk::new(cx, cz, sx, sy, sz, Vec3::ZERO);
        let expect = sx * sy * sz;
        let mut seen = vec![false; expect];
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            let i = ch.local_index(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // x is the minor stride, y the middle, z the major
    #[test]
    fn local_index_strides(sx in 2usize..=8, sy in 2usize..=8, sz in 2usize..=8) {
        let ch = Chunk::new(0, 0, sx, sy, sz, Vec3::ZERO);
        prop_assert_eq!(ch.local_index(1, 0, 0), 1);
        prop_assert_eq!(ch.local_index(0, 1, 0), sx);
        prop_assert_eq!(ch.local_index(0, 0, 1), sx * sy);
    }

    // set then get reads the written voxel back
    #[test]
    fn set_get_round_trip(sx in dim(), sy in dim(), sz in dim(), id in 1u16..=500) {
        let ch = Chunk::new(0, 0, sx, sy, sz, Vec3::ZERO);
        let idx = ch.local_index(sx - 1, sy - 1, sz - 1);
        prop_assert_eq!(ch.get(idx), Voxel::AIR);
        ch.set(idx, Voxel::new(id));
        prop_assert_eq!(ch.get(idx), Voxel::new(id));
        prop_assert!(ch.has_non_air());
    }

    // block_pos recenters locals so corner chunks stay symmetric about the anchor
    #[test]
    fn block_pos_spans_anchor(sx in 2usize..=8, sy in 2usize..=8, sz in 2usize..=8) {
        let anchor = Vec3::new(10.0, 0.0, -6.0);
        let ch = Chunk::new(0, 0, sx, sy, sz, anchor);
        let lo = ch.block_pos(0, 0, 0);
        let hi = ch.block_pos(sx - 1, sy - 1, sz - 1);
        prop_assert!((lo.x + hi.x - 2.0 * anchor.x).abs() < 1e-4);
        prop_assert!((lo.z + hi.z - 2.0 * anchor.z).abs() < 1e-4);
        // y is offset by half the chunk height, no half-voxel recentering
        prop_assert!((lo.y + sy as f32 * 0.5).abs() < 1e-4);
    }
}

#[test]
fn dirty_claim_is_exclusive() {
    let ch = Chunk::new(0, 0, 2, 2, 2, Vec3::ZERO);
    assert!(!ch.is_dirty());
    assert!(!ch.claim_dirty());
    ch.mark_dirty();
    assert!(ch.is_dirty());
    assert!(ch.claim_dirty());
    assert!(!ch.is_dirty());
    assert!(!ch.claim_dirty());
}
