use crate::test::*;
use crate::*;

#[test]
fn abs_folds_sign() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["dec", "abs"]);

    assert_eq!(core.f(), 1.0);
}

#[test]
fn sign_negates() {
    let iset = full_set(8);
    let mut core = core(&[]);

    run(&iset, &mut core, &["5", "itof", "sign"]);
    assert_eq!(core.f(), -5.0);

    run(&iset, &mut core, &["5", "itof", "sign", "sign"]);
    assert_eq!(core.f(), 5.0);
}

#[test]
fn exp_then_log_returns() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["1", "itof", "exp"]);
    assert!((core.f() - std::f64::consts::E).abs() < 1e-12);

    run(&iset, &mut core, &["1", "itof", "exp", "log"]);
    assert!((core.f() - 1.0).abs() < 1e-12);
}

#[test]
fn log_of_zero_is_invalid_and_preserves_f() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["0", "itof", "log"]);

    assert_eq!(core.f(), 0.0);
    assert_eq!(instruction(&iset, "log").invalid_ops(), 1);
}

#[test]
fn log_of_negative_is_invalid_and_preserves_f() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["dec", "log"]);

    assert_eq!(core.f(), -1.0);
    assert_eq!(instruction(&iset, "log").invalid_ops(), 1);
}

#[test]
fn exp_overflow_preserves_f_without_invalid() {
    let iset = full_set(1024);
    let mut core = core(&[]);

    // e^800 is infinite; exp discards the rejected result silently.
    run(&iset, &mut core, &["800", "itof", "exp"]);

    assert_eq!(core.f(), 800.0);
    assert_eq!(instruction(&iset, "exp").invalid_ops(), 0);
}

#[test]
fn sin_of_zero() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["0", "itof", "sin"]);

    assert_eq!(core.f(), 0.0);
    assert_eq!(instruction(&iset, "sin").ops(), 1);
}

#[test]
fn ran_yields_unit_interval_value() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["ran"]);

    assert!(core.f() > 0.0 && core.f() < 1.0);
    assert_eq!(instruction(&iset, "ran").invalid_ops(), 0);
}
