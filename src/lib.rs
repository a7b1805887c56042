//! Virtual machine for the Slash/A language.
//!
//! Slash/A programs are sequences of single-word instructions separated by
//! slashes, designed to be generated and mutated by evolutionary search:
//! every token is a legal instruction, and no instruction can abort a run.
//! Numerical or memory failures are silent no-ops recorded in
//! per-instruction "invalid operation" counters, which hosts read back as
//! fitness signals.
//!
//! This crate holds the execution half of the system: the
//! [`InstructionSet`](struct.InstructionSet.html) (numeric literals, the
//! default instruction set and host [`Extension`](trait.Extension.html)s),
//! the per-run [`MemCore`](struct.MemCore.html), and the
//! [`run_bytecode`](fn.run_bytecode.html) fetch loop with its wall-clock
//! watchdog. Translating source text to bytecode lives in the `slasm` crate.

pub mod constants;

mod dis;
mod interp;
mod memcore;
mod opcode;
mod rng;
mod set;

pub use crate::interp::{run_bytecode, run_with_token, CancelToken, ExitCode, Watchdog};
pub use crate::memcore::MemCore;
pub use crate::opcode::Opcode;
pub use crate::rng::{Ran2, RngSource};
pub use crate::set::{Extension, Fault, Instruction, InstructionSet};

pub type Word = u32;
pub type ByteCode = Vec<Word>;

/// Version banner used by drivers.
pub fn header() -> String {
    format!("Slash/A core revision {}", env!("CARGO_PKG_VERSION"))
}
