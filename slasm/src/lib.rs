//! Assembler for the [slasha](../slasha/index.html) virtual machine.
//!
//! Slash/A source is a flat sequence of instruction words separated by
//! slashes: `7/itof/0/save/.`. There is no other syntax — a word is looked
//! up by name in the instruction set it is assembled against, and its index
//! in that set is the bytecode value. [`assemble`](fn.assemble.html) scans
//! the source one character at a time:
//!
//! - `/` closes the current word and emits one instruction;
//! - `.` ends the program, whatever follows is ignored;
//! - `#` skips the rest of the line (a comment may interrupt a word
//!   without closing it);
//! - space, tab and newline are ignored;
//! - anything else accumulates into the current word, up to 32 bytes.
//!
//! A trailing word without its closing slash emits nothing; source is
//! conventionally written `.../last/.`.
//!
//! [`disassemble`](fn.disassemble.html) is the inverse, rendering bytecode
//! back to source against the same set. Disassembling and re-assembling
//! reproduces the bytecode exactly.

use std::{error, fmt};

use slasha::{constants, ByteCode, InstructionSet, Word};


#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A word that the instruction set does not contain.
    UnknownInstruction(String),
    /// A word longer than the 32-byte limit.
    WordTooLong(String),
    /// A bytecode value outside the instruction set, during disassembly.
    UnknownOpcode(Word),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownInstruction(word) => {
                write!(f, "Instruction not recognized: {}", word)
            }
            Error::WordTooLong(word) => {
                write!(f, "Instruction word is too large: {}", word)
            }
            Error::UnknownOpcode(value) => {
                write!(f, "Bytecode value {} is outside the instruction set", value)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Translates source text into bytecode against `iset`.
pub fn assemble(src: &str, iset: &InstructionSet) -> Result<ByteCode> {
    let mut code = ByteCode::new();
    let mut word = String::new();
    let mut in_comment = false;

    for ch in src.chars() {
        if in_comment {
            if ch == '\n' {
                in_comment = false;
            }
            continue;
        }

        match ch {
            '.' => break,
            '/' => {
                match iset.find(&word) {
                    Some(value) => code.push(value),
                    None => return Err(Error::UnknownInstruction(word)),
                }
                word.clear();
            }
            ' ' | '\t' | '\n' => {}
            '#' => in_comment = true,
            _ => {
                word.push(ch);
                if word.len() > constants::MAX_WORD_LEN {
                    return Err(Error::WordTooLong(word));
                }
            }
        }
    }

    Ok(code)
}

/// Renders bytecode back into source form against `iset`.
pub fn disassemble(code: &[Word], iset: &InstructionSet) -> Result<String> {
    let mut src = String::new();
    for &value in code {
        match iset.name(value) {
            Some(name) => {
                src.push_str(name);
                src.push('/');
            }
            None => return Err(Error::UnknownOpcode(value)),
        }
    }
    src.push('.');
    Ok(src)
}
