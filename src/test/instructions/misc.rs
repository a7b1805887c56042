use crate::test::*;
use crate::*;

use num::ToPrimitive;
use util::Mnemonic;

#[test]
fn nop_only_counts() {
    let iset = full_set(4);
    let mut core = core(&[]);

    run(&iset, &mut core, &["nop", "nop"]);

    assert_eq!(instruction(&iset, "nop").ops(), 2);
    assert_eq!(core.f(), 0.0);
    assert_eq!(core.i, 0);
}

#[test]
fn full_set_layout_follows_opcode_order() {
    let numeric = 16;
    let iset = full_set(numeric);

    for &(name, op) in &[
        ("input", Opcode::Input),
        ("itof", Opcode::Itof),
        ("jumpifn", Opcode::Jumpifn),
        ("endloop", Opcode::Endloop),
        ("nop", Opcode::Nop),
    ] {
        assert_eq!(iset.find(name), Some(numeric + op.to_u32().unwrap()));
    }

    assert_eq!(iset.size(), numeric + 28);
    assert_eq!(iset.numeric_instructions(), numeric);
}

#[test]
fn grouped_inserters_cover_the_full_set() {
    let mut grouped = InstructionSet::new(4);
    grouped.insert_dis_io();
    grouped.insert_dis_memreg();
    grouped.insert_dis_regreg();
    grouped.insert_dis_gotos();
    grouped.insert_dis_jumps();
    grouped.insert_dis_loops();
    grouped.insert_dis_basicmath();
    grouped.insert_dis_advmath();
    grouped.insert_dis_misc();

    let full = full_set(4);

    assert_eq!(grouped.list_all(), full.list_all());
}

#[test]
fn full_minus_gotos_drops_only_gotos() {
    let mut iset = InstructionSet::new(4);
    iset.insert_dis_full_minus_gotos();

    assert_eq!(iset.find("label"), None);
    assert_eq!(iset.find("gotoifp"), None);
    assert!(iset.find("loop").is_some());
    assert!(iset.find("jumpifn").is_some());
    assert_eq!(iset.size(), 4 + 26);
}

#[test]
fn mnemonics_round_trip() {
    use num::FromPrimitive;

    let mut value = 0;
    while let Some(op) = Opcode::from_u32(value) {
        let parsed: Opcode = op.mnemonic().parse().unwrap();
        assert_eq!(parsed, op);
        value += 1;
    }
    assert_eq!(value, 28);
}

#[test]
fn list_all_renders_source_form() {
    let mut iset = InstructionSet::new(2);
    iset.insert_dis_misc();

    assert_eq!(iset.list_all(), "0/1/nop/.");
}

#[test]
fn clear_resets_all_counters() {
    let iset = full_set(4);
    let mut core = core(&[1.0]);

    run(&iset, &mut core, &["input", "output", "nop"]);
    assert!(iset.total_ops() > 0);
    assert_eq!(iset.total_outputs(), 1);

    iset.clear();

    assert_eq!(iset.total_ops(), 0);
    assert_eq!(iset.total_invalid_ops(), 0);
    assert_eq!(iset.total_inputs(), 0);
    assert_eq!(iset.total_outputs(), 0);
    assert_eq!(iset.total_inputs_before_output(), 0);
    assert!(iset.iter().all(|inst| inst.ops() == 0));
}
