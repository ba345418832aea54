//! Operating tile by tile gives the same result as the whole field.

use fieldmath_field::{Field, FieldStore};
use fieldmath_ops::{BinaryOp, Engine, Operation, ParamOp, UnaryOp};
use fieldmath_test_utils::{masked, ramp, reassemble, split_rows, values, SENTINEL_F64};

fn sample(name: &str, offset: f64) -> Field {
    let mut v = values::<f64>(&ramp::<f64>(name, &[7, 3], offset, 0.5));
    v[4] = SENTINEL_F64;
    v[17] = SENTINEL_F64;
    masked(name, &[7, 3], v, SENTINEL_F64)
}

fn whole(op: Operation, a: Field, b: Field) -> Vec<f64> {
    let mut store = FieldStore::new();
    let a = store.insert(a);
    let b = store.insert(b);
    let sources: Vec<_> = match op.arity().source_count() {
        1 => vec![b],
        _ => vec![a, b],
    };
    Engine::default().apply(&mut store, op, a, &sources).unwrap();
    values::<f64>(store.get(a).unwrap())
}

fn tiled(op: Operation, a: &Field, b: &Field, tiles: u32) -> Vec<f64> {
    let engine = Engine::default();
    let mut out = Vec::new();
    for (ta, tb) in split_rows(a, tiles).into_iter().zip(split_rows(b, tiles)) {
        let mut store = FieldStore::new();
        let ta = store.insert(ta);
        let tb = store.insert(tb);
        let sources: Vec<_> = match op.arity().source_count() {
            1 => vec![tb],
            _ => vec![ta, tb],
        };
        engine.apply(&mut store, op, ta, &sources).unwrap();
        out.push(store.remove(ta).unwrap());
    }
    values::<f64>(&reassemble("a", &out))
}

#[test]
fn binary_tiles_match_whole() {
    let op = Operation::Binary(BinaryOp::Multiply);
    let a = sample("a", -2.0);
    let b = sample("b", 1.0);
    for tiles in [1, 2, 3, 7] {
        assert_eq!(
            tiled(op, &a, &b, tiles),
            whole(op, a.clone(), b.clone()),
            "{tiles} tiles"
        );
    }
}

#[test]
fn unary_and_param_tiles_match_whole() {
    let a = sample("a", 0.0);
    let b = sample("b", 0.25);
    for op in [
        Operation::Unary(UnaryOp::Cos),
        Operation::Unary(UnaryOp::Sqrt),
        Operation::Param(ParamOp::Pow, 3.0),
    ] {
        assert_eq!(
            tiled(op, &a, &b, 4),
            whole(op, a.clone(), b.clone()),
            "{}",
            op.name()
        );
    }
}

#[test]
fn tiles_keep_their_decomposition() {
    let a = sample("a", 0.0);
    let tiles = split_rows(&a, 3);
    let mut store = FieldStore::new();
    let id = store.insert(tiles[1].clone());
    Engine::default().negate(&mut store, id, id).unwrap();
    let tile = store.get(id).unwrap();
    assert_eq!(tile.decomposition(), tiles[1].decomposition());
    assert_eq!(tile.decomposition().offset(), &[3, 0]);
    assert_eq!(tile.decomposition().global_shape(), &[7, 3]);
}
