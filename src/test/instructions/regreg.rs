use crate::test::*;
use crate::*;

#[test]
fn itof_converts_i() {
    let iset = full_set(16);
    let mut core = core(&[]);

    run(&iset, &mut core, &["9", "itof"]);

    assert_eq!(core.f(), 9.0);
    assert_eq!(instruction(&iset, "itof").invalid_ops(), 0);
}

#[test]
fn ftoi_rounds_half_to_even() {
    let iset = full_set(8);
    let mut core = core(&[]);

    // F = 5 / 2 = 2.5 rounds down to the even neighbour.
    run(&iset, &mut core, &["2", "itof", "0", "save", "5", "itof", "0", "div", "ftoi"]);
    assert_eq!(core.i, 2);

    // F = 7 / 2 = 3.5 rounds up to the even neighbour.
    run(&iset, &mut core, &["2", "itof", "0", "save", "7", "itof", "0", "div", "ftoi"]);
    assert_eq!(core.i, 4);
}

#[test]
fn ftoi_saturates_negative_to_zero() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["dec", "dec", "ftoi"]);

    assert_eq!(core.i, 0);
}

#[test]
fn inc_dec() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["inc", "inc", "inc", "dec"]);

    assert_eq!(core.f(), 2.0);
    assert_eq!(instruction(&iset, "inc").ops(), 3);
    assert_eq!(instruction(&iset, "dec").ops(), 1);
}
