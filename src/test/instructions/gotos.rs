use crate::test::*;
use crate::*;

#[test]
fn label_saves_its_own_position() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["nop", "3", "label"]);

    assert_eq!(core.labels()[3], 2);
    assert!(core.labels_saved()[3]);
    assert_eq!(core.pc(), 3);
}

#[test]
fn label_out_of_range_is_invalid() {
    let iset = full_set(16);
    let mut core = core(&[]);

    run(&iset, &mut core, &["12", "label", "15", "label"]);

    // Label tape has 10 cells; 12 and 15 both miss.
    assert_eq!(instruction(&iset, "label").ops(), 2);
    assert_eq!(instruction(&iset, "label").invalid_ops(), 2);
}

#[test]
fn gotoifp_loops_while_f_nonnegative() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(
        &iset,
        &mut core,
        &["5", "itof", "0", "label", "dec", "dec", "dec", "0", "gotoifp"],
    );

    // First pass leaves F = 2 and jumps back; second leaves F = -1.
    assert_eq!(core.f(), -1.0);
    assert_eq!(instruction(&iset, "gotoifp").ops(), 2);
    assert_eq!(instruction(&iset, "label").ops(), 1);
    assert_eq!(iset.total_invalid_ops(), 0);
}

#[test]
fn gotoifp_unsaved_is_invalid() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["0", "gotoifp", "inc"]);

    assert_eq!(instruction(&iset, "gotoifp").invalid_ops(), 1);
    assert_eq!(core.f(), 1.0);
}

#[test]
fn gotoifp_out_of_range_is_invalid() {
    let iset = full_set(16);
    let mut core = core(&[]);

    run(&iset, &mut core, &["15", "gotoifp"]);

    assert_eq!(instruction(&iset, "gotoifp").invalid_ops(), 1);
}
