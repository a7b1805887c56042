use crate::test::*;
use crate::*;

#[test]
fn save_then_load() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["3", "itof", "0", "save", "1", "itof", "0", "load"]);

    assert_eq!(core.data()[0], 3.0);
    assert!(core.data_saved()[0]);
    assert_eq!(core.f(), 3.0);
    assert_eq!(iset.total_invalid_ops(), 0);
}

#[test]
fn save_out_of_range_is_invalid() {
    let iset = full_set(16);
    let mut core = core(&[]);

    run(&iset, &mut core, &["15", "save"]);

    assert_eq!(instruction(&iset, "save").ops(), 1);
    assert_eq!(instruction(&iset, "save").invalid_ops(), 1);
    assert!(core.data_saved().iter().all(|&saved| !saved));
}

#[test]
fn load_unsaved_is_invalid() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["inc", "0", "load"]);

    assert_eq!(core.f(), 1.0);
    assert_eq!(instruction(&iset, "load").invalid_ops(), 1);
}

#[test]
fn swap_exchanges_f_and_cell() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["2", "itof", "0", "save", "5", "itof", "0", "swap"]);

    assert_eq!(core.data()[0], 5.0);
    assert_eq!(core.f(), 2.0);
}

#[test]
fn swap_unsaved_is_invalid() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["inc", "0", "swap"]);

    assert_eq!(core.f(), 1.0);
    assert_eq!(instruction(&iset, "swap").invalid_ops(), 1);
}

#[test]
fn cmp_equal_yields_zero() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["4", "itof", "0", "save", "cmp"]);

    assert_eq!(core.f(), 0.0);
    assert_eq!(instruction(&iset, "cmp").invalid_ops(), 0);
}

#[test]
fn cmp_unequal_yields_minus_one() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["4", "itof", "0", "save", "dec", "cmp"]);

    assert_eq!(core.f(), -1.0);
}

#[test]
fn cmp_unsaved_is_invalid() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["0", "cmp"]);

    assert_eq!(instruction(&iset, "cmp").invalid_ops(), 1);
    assert_eq!(core.f(), 0.0);
}

#[test]
fn store_data_seeds_the_tape() {
    let mut core = core(&[]);

    assert!(core.store_data(1, 4.25));
    assert!(!core.store_data(10, 1.0));

    assert_eq!(core.data()[1], 4.25);
    assert!(core.data_saved()[1]);
}
