use crate::constants;
use crate::rng::{Ran2, RngSource};
use crate::{ByteCode, Word};

pub(crate) struct LoopTable {
    /// Partner address per opcode position: the matching `endloop` for a
    /// `loop`, the matching `loop` for an `endloop`. 0 means no counterpart;
    /// a `loop` at position 0 is never its own partner, so 0 is free to
    /// carry that meaning.
    pub(crate) addr: Vec<Word>,
    /// Remaining iterations, indexed by `loop` position.
    pub(crate) count: Vec<Word>,
}

/// The mutable state of one VM run: registers, tapes, program tape,
/// pre-resolved control-flow tables and I/O buffers.
///
/// A core is built per run. The interpreter installs the program tape and
/// the run parameters at the start of a run; the jump and loop tables are
/// then rebuilt on the first executed `jumpifn`/`loop` of that run and
/// reused for its remainder. Keeping the tables here rather than in the
/// instruction descriptors lets concurrent runs share one instruction set.
pub struct MemCore {
    f: f64,
    /// The I-register: an unsigned index register written by the numeric
    /// literal instructions and `ftoi`.
    pub i: Word,
    pub(crate) d: Vec<f64>,
    pub(crate) d_saved: Vec<bool>,
    pub(crate) l: Vec<Word>,
    pub(crate) l_saved: Vec<bool>,
    pub(crate) code: ByteCode,
    pub(crate) pc: Word,
    pub(crate) jump_table: Option<Vec<Word>>,
    pub(crate) loop_table: Option<LoopTable>,
    pub(crate) max_loop_depth: i32,
    pub(crate) input: Vec<f64>,
    pub(crate) output: Vec<f64>,
    pub(crate) output_executed: bool,
    pub(crate) rng: Box<dyn RngSource>,
}

impl MemCore {
    /// Builds a core with zeroed, unsaved tapes and the stock random
    /// source. An empty `input` makes the `input`/`output` instructions
    /// interactive; a non-empty one routes them through the buffers.
    pub fn new(d_size: Word, l_size: Word, input: Vec<f64>) -> MemCore {
        MemCore::with_rng(
            d_size,
            l_size,
            input,
            Box::new(Ran2::new(constants::DEFAULT_SEED)),
        )
    }

    pub fn with_rng(
        d_size: Word,
        l_size: Word,
        input: Vec<f64>,
        rng: Box<dyn RngSource>,
    ) -> MemCore {
        MemCore {
            f: 0.0,
            i: 0,
            d: vec![0.0; d_size as usize],
            d_saved: vec![false; d_size as usize],
            l: vec![0; l_size as usize],
            l_saved: vec![false; l_size as usize],
            code: ByteCode::new(),
            pc: 0,
            jump_table: None,
            loop_table: None,
            max_loop_depth: -1,
            input,
            output: Vec::new(),
            output_executed: false,
            rng,
        }
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    /// The sole mutator of the F-register. A non-finite value is rejected:
    /// `F` keeps its previous value and the call returns `false`, which
    /// instruction implementations record as an invalid operation.
    pub fn set_f(&mut self, value: f64) -> bool {
        if value.is_finite() {
            self.f = value;
            true
        } else {
            false
        }
    }

    /// Position of the instruction currently being executed; advanced by
    /// the fetch loop after each dispatch.
    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn data(&self) -> &[f64] {
        &self.d
    }

    pub fn data_saved(&self) -> &[bool] {
        &self.d_saved
    }

    pub fn labels(&self) -> &[Word] {
        &self.l
    }

    pub fn labels_saved(&self) -> &[bool] {
        &self.l_saved
    }

    /// Writes a data-tape cell and marks it saved, as the `save`
    /// instruction would. Returns `false` when the index is out of range.
    /// Meant for hosts seeding the tape before a run.
    pub fn store_data(&mut self, index: Word, value: f64) -> bool {
        match self.d.get_mut(index as usize) {
            Some(cell) => {
                *cell = value;
                self.d_saved[index as usize] = true;
                true
            }
            None => false,
        }
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.output)
    }

    pub fn output_executed(&self) -> bool {
        self.output_executed
    }

    pub(crate) fn begin_run(&mut self, code: &[Word], seed: i64, max_loop_depth: i32) {
        self.code = code.to_vec();
        self.pc = 0;
        self.jump_table = None;
        self.loop_table = None;
        self.max_loop_depth = max_loop_depth;
        self.rng.reseed(seed);
    }
}
