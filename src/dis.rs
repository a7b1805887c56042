//! Executors for the default instruction set, plus the lazy construction
//! of the jump and loop tables they rely on.
//!
//! Every executor follows the same contract: tick the descriptor's op
//! counter on entry, perform the effect, tick the invalid-op counter when a
//! guarded precondition fails. Guard failures are silent no-ops; nothing an
//! executor does can abort the run, with the single exception of the
//! loop-depth fault raised while building the loop table.

use std::io::{self, Write as IoWrite};

use log::debug;

use crate::memcore::{LoopTable, MemCore};
use crate::opcode::Opcode;
use crate::set::{Counters, Fault, InstructionSet};
use crate::Word;

pub(crate) fn execute(
    op: Opcode,
    n: &Counters,
    core: &mut MemCore,
    iset: &InstructionSet,
) -> Result<(), Fault> {
    n.tick_op();

    match op {
        Opcode::Input => exec_input(n, core),
        Opcode::Output => exec_output(n, core),

        Opcode::Load => with_saved_data(n, core, |core, d| core.set_f(d)),
        Opcode::Save => {
            let index = core.i as usize;
            if index < core.d.len() {
                core.d[index] = core.f();
                core.d_saved[index] = true;
            } else {
                n.tick_invalid();
            }
        }
        Opcode::Swap => {
            let index = core.i as usize;
            if index < core.d.len() && core.d_saved[index] {
                let aux = core.d[index];
                core.d[index] = core.f();
                core.set_f(aux);
            } else {
                n.tick_invalid();
            }
        }
        Opcode::Cmp => with_saved_data(n, core, |core, d| {
            core.set_f(if core.f() == d { 0.0 } else { -1.0 })
        }),

        Opcode::Inc => {
            if !core.set_f(core.f() + 1.0) {
                n.tick_invalid();
            }
        }
        Opcode::Dec => {
            if !core.set_f(core.f() - 1.0) {
                n.tick_invalid();
            }
        }
        Opcode::Itof => {
            if !core.set_f(core.i as f64) {
                n.tick_invalid();
            }
        }
        Opcode::Ftoi => {
            core.i = core.f().round_ties_even() as Word;
        }

        Opcode::Label => {
            let index = core.i as usize;
            if index < core.l.len() {
                core.l[index] = core.pc;
                core.l_saved[index] = true;
            } else {
                n.tick_invalid();
            }
        }
        Opcode::Gotoifp => {
            let index = core.i as usize;
            if index < core.l.len() {
                if core.l_saved[index] {
                    if core.f() >= 0.0 {
                        core.pc = core.l[index];
                    }
                } else {
                    n.tick_invalid();
                }
            } else {
                n.tick_invalid();
            }
        }

        Opcode::Jumpifn => exec_jumpifn(n, core, iset),
        Opcode::Jumphere => {}

        Opcode::Loop => exec_loop(n, core, iset)?,
        Opcode::Endloop => exec_endloop(n, core),

        Opcode::Add => with_saved_data(n, core, |core, d| core.set_f(core.f() + d)),
        Opcode::Sub => with_saved_data(n, core, |core, d| core.set_f(core.f() - d)),
        Opcode::Mul => with_saved_data(n, core, |core, d| core.set_f(core.f() * d)),
        Opcode::Div => with_saved_data(n, core, |core, d| core.set_f(core.f() / d)),
        Opcode::Pow => with_saved_data(n, core, |core, d| core.set_f(core.f().powf(d))),

        Opcode::Abs => {
            let value = core.f().abs();
            core.set_f(value);
        }
        Opcode::Sign => {
            let value = -core.f();
            core.set_f(value);
        }
        Opcode::Exp => {
            let value = core.f().exp();
            core.set_f(value);
        }
        Opcode::Log => {
            if !core.set_f(core.f().ln()) {
                n.tick_invalid();
            }
        }
        Opcode::Sin => {
            if !core.set_f(core.f().sin()) {
                n.tick_invalid();
            }
        }
        Opcode::Ran => {
            let value = core.rng.next();
            if !core.set_f(value) {
                n.tick_invalid();
            }
        }

        Opcode::Nop => {}
    }

    Ok(())
}

/// Runs `apply` with the saved data-tape cell addressed by `I`. Any failure
/// along the way (index out of range, cell not saved, `apply` rejecting the
/// result) counts one invalid operation and leaves the core unchanged.
fn with_saved_data<A>(n: &Counters, core: &mut MemCore, apply: A)
where
    A: FnOnce(&mut MemCore, f64) -> bool,
{
    let index = core.i as usize;
    if index < core.d.len() && core.d_saved[index] {
        let value = core.d[index];
        if !apply(core, value) {
            n.tick_invalid();
        }
    } else {
        n.tick_invalid();
    }
}

fn exec_input(n: &Counters, core: &mut MemCore) {
    if core.input.is_empty() {
        print!("Enter input #{}: ", n.inputs() + 1);
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_ok() {
            if let Ok(value) = line.trim().parse::<f64>() {
                core.set_f(value);
            }
        }
    } else {
        // The descriptor's own input counter doubles as the read cursor;
        // past the end of the buffer F keeps its previous value.
        let cursor = n.inputs() as usize;
        if cursor < core.input.len() {
            let value = core.input[cursor];
            core.set_f(value);
        }
    }

    n.tick_input();
    if !core.output_executed {
        n.tick_input_before_output();
    }
}

fn exec_output(n: &Counters, core: &mut MemCore) {
    if core.input.is_empty() {
        println!("Output #{}: {}", n.outputs() + 1, core.f());
    } else {
        let value = core.f();
        core.output.push(value);
    }

    n.tick_output();
    core.output_executed = true;
}

fn exec_jumpifn(n: &Counters, core: &mut MemCore, iset: &InstructionSet) {
    if core.f() >= 0.0 {
        return;
    }

    if core.jump_table.is_none() {
        build_jump_table(core, iset);
    }

    let target = match &core.jump_table {
        Some(table) => table[core.pc as usize],
        None => 0,
    };

    if target != 0 {
        core.pc = target;
    } else {
        n.tick_invalid();
    }
}

fn exec_loop(n: &Counters, core: &mut MemCore, iset: &InstructionSet) -> Result<(), Fault> {
    if core.loop_table.is_none() {
        build_loop_table(core, iset)?;
    }

    let position = core.pc as usize;
    let partner = match &core.loop_table {
        Some(table) => table.addr[position],
        None => 0,
    };

    if partner == 0 {
        n.tick_invalid();
    } else if core.i == 0 {
        // Asked to run the body zero times: skip to the matching endloop;
        // the fetch loop's increment lands just past it.
        core.pc = partner;
    } else if let Some(table) = core.loop_table.as_mut() {
        table.count[position] = core.i;
    }

    Ok(())
}

fn exec_endloop(n: &Counters, core: &mut MemCore) {
    let position = core.pc as usize;

    let pending = match &core.loop_table {
        Some(table) => {
            let partner = table.addr[position];
            if partner == 0 {
                None
            } else {
                Some((partner, table.count[partner as usize]))
            }
        }
        None => None,
    };

    match pending {
        Some((partner, remaining)) => {
            if remaining > 1 {
                core.pc = partner;
                if let Some(table) = core.loop_table.as_mut() {
                    table.count[partner as usize] = remaining - 1;
                }
            }
        }
        None => n.tick_invalid(),
    }
}

/// Resolves every `jumpifn` to its matching `jumphere` in one pass over the
/// program tape. Matching is by balanced nesting; 0 marks an unmatched
/// `jumpifn` (a `jumphere` can never sit at position 0 and also match one).
pub(crate) fn build_jump_table(core: &mut MemCore, iset: &InstructionSet) {
    let size = core.code.len();
    let mut table = vec![0 as Word; size];

    for current in 0..size {
        if !iset.is_dis_at(core.code[current], Opcode::Jumpifn) {
            continue;
        }

        let mut open = 1u32;
        let mut search = current + 1;
        while open > 0 && search < size {
            if iset.is_dis_at(core.code[search], Opcode::Jumpifn) {
                open += 1;
            }
            if iset.is_dis_at(core.code[search], Opcode::Jumphere) {
                open -= 1;
            }
            search += 1;
        }

        if open == 0 {
            // Points at the jumphere itself; the interpreter resumes just
            // past it.
            table[current] = (search - 1) as Word;
        }
    }

    debug!("jump table built over {} instructions", size);
    core.jump_table = Some(table);
}

/// Pairs every `loop` with its `endloop` and measures the maximum nesting
/// depth of the matched pairs. Unmatched instructions keep partner 0 and
/// fail at runtime as invalid operations; a depth beyond the core's limit
/// fails the whole run instead.
pub(crate) fn build_loop_table(core: &mut MemCore, iset: &InstructionSet) -> Result<(), Fault> {
    let size = core.code.len();
    let mut addr = vec![0 as Word; size];
    let count = vec![0 as Word; size];
    let mut matched = vec![false; size];

    let mut open: Vec<usize> = Vec::new();
    for current in 0..size {
        if iset.is_dis_at(core.code[current], Opcode::Loop) {
            open.push(current);
        } else if iset.is_dis_at(core.code[current], Opcode::Endloop) {
            if let Some(start) = open.pop() {
                addr[start] = current as Word;
                addr[current] = start as Word;
                matched[start] = true;
                matched[current] = true;
            }
        }
    }

    let mut depth = 0i32;
    let mut max_depth = 0i32;
    for current in 0..size {
        if !matched[current] {
            continue;
        }
        if iset.is_dis_at(core.code[current], Opcode::Loop) {
            depth += 1;
            max_depth = max_depth.max(depth);
        } else {
            depth -= 1;
        }
    }

    debug!(
        "loop table built over {} instructions, max nesting depth {}",
        size, max_depth
    );

    if core.max_loop_depth >= 0 && max_depth > core.max_loop_depth {
        return Err(Fault::LoopDepthExceeded);
    }

    core.loop_table = Some(LoopTable { addr, count });
    Ok(())
}
