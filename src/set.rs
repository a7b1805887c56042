use std::cell::Cell;

use num::FromPrimitive;
use util::Mnemonic;

use crate::dis;
use crate::memcore::MemCore;
use crate::opcode::Opcode;
use crate::Word;

/// Fatal condition raised while dispatching an instruction. Unlike an
/// invalid operation this aborts the run; the interpreter reports it
/// through its exit code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fault {
    /// Loop-table construction measured a nesting depth beyond the
    /// configured limit.
    LoopDepthExceeded,
}

/// Usage statistics of one descriptor. Interior-mutable so that dispatch
/// and statistics queries both work through a shared `&InstructionSet`.
#[derive(Default)]
pub struct Counters {
    ops: Cell<u32>,
    invalid_ops: Cell<u32>,
    inputs: Cell<u32>,
    outputs: Cell<u32>,
    inputs_before_output: Cell<u32>,
}

impl Counters {
    fn bump(cell: &Cell<u32>) {
        cell.set(cell.get().saturating_add(1));
    }

    pub(crate) fn tick_op(&self) {
        Counters::bump(&self.ops);
    }

    pub(crate) fn tick_invalid(&self) {
        Counters::bump(&self.invalid_ops);
    }

    pub(crate) fn tick_input(&self) {
        Counters::bump(&self.inputs);
    }

    pub(crate) fn tick_output(&self) {
        Counters::bump(&self.outputs);
    }

    pub(crate) fn tick_input_before_output(&self) {
        Counters::bump(&self.inputs_before_output);
    }

    pub(crate) fn ops(&self) -> u32 {
        self.ops.get()
    }

    pub(crate) fn invalid_ops(&self) -> u32 {
        self.invalid_ops.get()
    }

    pub(crate) fn inputs(&self) -> u32 {
        self.inputs.get()
    }

    pub(crate) fn outputs(&self) -> u32 {
        self.outputs.get()
    }

    pub(crate) fn inputs_before_output(&self) -> u32 {
        self.inputs_before_output.get()
    }

    fn clear(&self) {
        self.ops.set(0);
        self.invalid_ops.set(0);
        self.inputs.set(0);
        self.outputs.set(0);
        self.inputs_before_output.set(0);
    }
}

/// A host-defined instruction: a name for the assembler plus an executor.
///
/// The executor receives the memory core and the set it was dispatched
/// from. Returning `false` records one invalid operation, mirroring the
/// guarded built-ins; `n_ops` is ticked by the set before the call.
pub trait Extension {
    fn name(&self) -> &str;
    fn execute(&self, core: &mut MemCore, set: &InstructionSet) -> bool;
}

pub(crate) enum Kind {
    Numeric(Word),
    Dis(Opcode),
    Extension(Box<dyn Extension>),
}

/// One slot of an instruction set: name, semantics and usage counters.
pub struct Instruction {
    name: String,
    pub(crate) kind: Kind,
    counters: Counters,
}

impl Instruction {
    /// Numeric literal: loads `value` into `I`. Its source-form name is the
    /// decimal rendering of `value`.
    pub fn numeric(value: Word) -> Instruction {
        Instruction {
            name: value.to_string(),
            kind: Kind::Numeric(value),
            counters: Counters::default(),
        }
    }

    pub fn dis(op: Opcode) -> Instruction {
        Instruction {
            name: op.mnemonic().to_string(),
            kind: Kind::Dis(op),
            counters: Counters::default(),
        }
    }

    pub fn extension(ext: Box<dyn Extension>) -> Instruction {
        Instruction {
            name: ext.name().to_string(),
            kind: Kind::Extension(ext),
            counters: Counters::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a built-in (numeric literal or named DIS opcode)
    /// rather than a host extension.
    pub fn is_dis(&self) -> bool {
        !matches!(self.kind, Kind::Extension(_))
    }

    pub fn ops(&self) -> u32 {
        self.counters.ops()
    }

    pub fn invalid_ops(&self) -> u32 {
        self.counters.invalid_ops()
    }

    pub fn inputs(&self) -> u32 {
        self.counters.inputs()
    }

    pub fn outputs(&self) -> u32 {
        self.counters.outputs()
    }

    pub fn inputs_before_output(&self) -> u32 {
        self.counters.inputs_before_output()
    }

    pub(crate) fn counters(&self) -> &Counters {
        &self.counters
    }
}

/// An ordered, append-only instruction registry. The index of a descriptor
/// is its bytecode value, so the set defines both the assembly namespace
/// and the dispatch table of a run.
///
/// Built once, frozen for the duration of a run. Descriptors are looked up
/// by name with a linear scan; duplicate names are allowed but only the
/// first is findable, which callers rely on when shadowing is intended.
pub struct InstructionSet {
    set: Vec<Instruction>,
    n_numeric: Word,
}

impl InstructionSet {
    /// Creates a set whose first `numeric_instructions` slots are the
    /// literal instructions `0..numeric_instructions`, each at the index
    /// equal to its value.
    pub fn new(numeric_instructions: Word) -> InstructionSet {
        let mut iset = InstructionSet {
            set: Vec::with_capacity(numeric_instructions as usize),
            n_numeric: numeric_instructions,
        };
        for value in 0..numeric_instructions {
            iset.insert(Instruction::numeric(value));
        }
        iset
    }

    /// Appends a descriptor and returns its assigned bytecode value.
    pub fn insert(&mut self, instruction: Instruction) -> Word {
        self.set.push(instruction);
        (self.set.len() - 1) as Word
    }

    pub fn insert_extension(&mut self, ext: Box<dyn Extension>) -> Word {
        self.insert(Instruction::extension(ext))
    }

    pub fn insert_dis_io(&mut self) {
        self.insert(Instruction::dis(Opcode::Input));
        self.insert(Instruction::dis(Opcode::Output));
    }

    pub fn insert_dis_memreg(&mut self) {
        self.insert(Instruction::dis(Opcode::Load));
        self.insert(Instruction::dis(Opcode::Save));
        self.insert(Instruction::dis(Opcode::Swap));
        self.insert(Instruction::dis(Opcode::Cmp));
    }

    pub fn insert_dis_regreg(&mut self) {
        self.insert(Instruction::dis(Opcode::Inc));
        self.insert(Instruction::dis(Opcode::Dec));
        self.insert(Instruction::dis(Opcode::Itof));
        self.insert(Instruction::dis(Opcode::Ftoi));
    }

    pub fn insert_dis_gotos(&mut self) {
        self.insert(Instruction::dis(Opcode::Label));
        self.insert(Instruction::dis(Opcode::Gotoifp));
    }

    pub fn insert_dis_jumps(&mut self) {
        self.insert(Instruction::dis(Opcode::Jumpifn));
        self.insert(Instruction::dis(Opcode::Jumphere));
    }

    pub fn insert_dis_loops(&mut self) {
        self.insert(Instruction::dis(Opcode::Loop));
        self.insert(Instruction::dis(Opcode::Endloop));
    }

    pub fn insert_dis_basicmath(&mut self) {
        self.insert(Instruction::dis(Opcode::Add));
        self.insert(Instruction::dis(Opcode::Sub));
        self.insert(Instruction::dis(Opcode::Mul));
        self.insert(Instruction::dis(Opcode::Div));
    }

    pub fn insert_dis_advmath(&mut self) {
        self.insert(Instruction::dis(Opcode::Abs));
        self.insert(Instruction::dis(Opcode::Sign));
        self.insert(Instruction::dis(Opcode::Exp));
        self.insert(Instruction::dis(Opcode::Log));
        self.insert(Instruction::dis(Opcode::Sin));
        self.insert(Instruction::dis(Opcode::Pow));
        self.insert(Instruction::dis(Opcode::Ran));
    }

    pub fn insert_dis_misc(&mut self) {
        self.insert(Instruction::dis(Opcode::Nop));
    }

    /// Inserts every named DIS instruction, in declaration order of
    /// [`Opcode`](enum.Opcode.html).
    pub fn insert_dis_full(&mut self) {
        let mut value = 0;
        while let Some(op) = Opcode::from_u32(value) {
            self.insert(Instruction::dis(op));
            value += 1;
        }
    }

    /// Everything except `label`/`gotoifp`, for hosts that must rule out
    /// unbounded backward jumps.
    pub fn insert_dis_full_minus_gotos(&mut self) {
        self.insert_dis_io();
        self.insert_dis_memreg();
        self.insert_dis_regreg();
        self.insert_dis_jumps();
        self.insert_dis_loops();
        self.insert_dis_basicmath();
        self.insert_dis_advmath();
        self.insert_dis_misc();
    }

    /// First descriptor with the given source-form name, if any.
    pub fn find(&self, name: &str) -> Option<Word> {
        self.set
            .iter()
            .position(|inst| inst.name() == name)
            .map(|index| index as Word)
    }

    pub fn get(&self, value: Word) -> Option<&Instruction> {
        self.set.get(value as usize)
    }

    pub fn name(&self, value: Word) -> Option<&str> {
        self.get(value).map(Instruction::name)
    }

    pub fn size(&self) -> Word {
        self.set.len() as Word
    }

    pub fn numeric_instructions(&self) -> Word {
        self.n_numeric
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.set.iter()
    }

    /// Dispatches one bytecode value against the core. A value outside the
    /// set is ignored; assembled code cannot contain one.
    pub fn exec(&self, value: Word, core: &mut MemCore) -> Result<(), Fault> {
        let inst = match self.set.get(value as usize) {
            Some(inst) => inst,
            None => return Ok(()),
        };

        match &inst.kind {
            Kind::Numeric(n) => {
                inst.counters.tick_op();
                core.i = *n;
                Ok(())
            }
            Kind::Dis(op) => dis::execute(*op, inst.counters(), core, self),
            Kind::Extension(ext) => {
                inst.counters.tick_op();
                if !ext.execute(core, self) {
                    inst.counters.tick_invalid();
                }
                Ok(())
            }
        }
    }

    pub(crate) fn is_dis_at(&self, value: Word, op: Opcode) -> bool {
        match self.set.get(value as usize) {
            Some(inst) => matches!(inst.kind, Kind::Dis(o) if o == op),
            None => false,
        }
    }

    pub fn total_ops(&self) -> u32 {
        self.set.iter().fold(0, |n, i| n.saturating_add(i.ops()))
    }

    pub fn total_invalid_ops(&self) -> u32 {
        self.set
            .iter()
            .fold(0, |n, i| n.saturating_add(i.invalid_ops()))
    }

    pub fn total_inputs(&self) -> u32 {
        self.set.iter().fold(0, |n, i| n.saturating_add(i.inputs()))
    }

    pub fn total_outputs(&self) -> u32 {
        self.set
            .iter()
            .fold(0, |n, i| n.saturating_add(i.outputs()))
    }

    pub fn total_inputs_before_output(&self) -> u32 {
        self.set
            .iter()
            .fold(0, |n, i| n.saturating_add(i.inputs_before_output()))
    }

    /// Resets every per-instruction counter. Done by the interpreter at the
    /// start of each run.
    pub fn clear(&self) {
        for inst in &self.set {
            inst.counters.clear();
        }
    }

    /// Renders the whole set in source form, `name1/name2/.../.`.
    pub fn list_all(&self) -> String {
        let mut listing = String::new();
        for inst in &self.set {
            listing.push_str(inst.name());
            listing.push('/');
        }
        listing.push('.');
        listing
    }
}
