//! Driver plumbing shared by the `slash` binary: builds a full-DIS
//! instruction set, assembles or loads a program, runs it and collects the
//! statistics the command line reports.

use std::path::Path;
use std::{error, fmt, fs};

use slasha::{constants, run_bytecode, ExitCode, InstructionSet, MemCore, Word};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Asm(slasm::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<slasm::Error> for Error {
    fn from(err: slasm::Error) -> Error {
        Error::Asm(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Asm(err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Asm(err) => Some(err),
        }
    }
}

/// Run parameters of one invocation. The defaults are the stock driver
/// configuration: 10-cell tapes, 32768 numeric literals, seed -2237, no
/// time limit, no loop-depth limit.
pub struct Options {
    pub data_size: Word,
    pub label_size: Word,
    pub numeric_instructions: Word,
    pub seed: i64,
    pub max_rtime: u64,
    pub max_loop_depth: i32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            data_size: constants::DEFAULT_TAPE_SIZE,
            label_size: constants::DEFAULT_TAPE_SIZE,
            numeric_instructions: constants::DEFAULT_NUMERIC_INSTRUCTIONS,
            seed: constants::DEFAULT_SEED,
            max_rtime: 0,
            max_loop_depth: -1,
        }
    }
}

/// What one run produced. Interactive programs print their `output` values
/// themselves, so `output` is only populated by embedders that pre-supply
/// an input buffer.
#[derive(Debug)]
pub struct Report {
    pub exit: ExitCode,
    pub output: Vec<f64>,
    pub total_ops: u32,
    pub total_invalid_ops: u32,
    pub total_inputs_before_output: u32,
}

fn full_set(numeric_instructions: Word) -> InstructionSet {
    let mut iset = InstructionSet::new(numeric_instructions);
    iset.insert_dis_full();
    iset
}

fn run_code(iset: &InstructionSet, code: &[Word], options: &Options) -> Report {
    let mut core = MemCore::new(options.data_size, options.label_size, Vec::new());

    let exit = run_bytecode(
        iset,
        &mut core,
        code,
        options.seed,
        options.max_rtime,
        options.max_loop_depth,
    );

    Report {
        exit,
        output: core.take_output(),
        total_ops: iset.total_ops(),
        total_invalid_ops: iset.total_invalid_ops(),
        total_inputs_before_output: iset.total_inputs_before_output(),
    }
}

/// Assembles source into a bytecode container without running it.
pub fn assemble_source(source: &str, options: &Options) -> Result<slxfile::Program, Error> {
    let iset = full_set(options.numeric_instructions);
    let code = slasm::assemble(source, &iset)?;
    Ok(slxfile::Program::from(options.numeric_instructions, code))
}

pub fn run_source(source: &str, options: &Options) -> Result<Report, Error> {
    let iset = full_set(options.numeric_instructions);
    let code = slasm::assemble(source, &iset)?;
    Ok(run_code(&iset, &code, options))
}

pub fn run_source_file<P: AsRef<Path>>(path: P, options: &Options) -> Result<Report, Error> {
    run_source(&fs::read_to_string(path)?, options)
}

/// Runs an already-assembled container against a set rebuilt from its
/// recorded numeric-literal count.
pub fn run_program(program: &slxfile::Program, options: &Options) -> Report {
    let iset = full_set(program.numeric_instructions());
    run_code(&iset, program.code(), options)
}

pub fn run_program_file<P: AsRef<Path>>(path: P, options: &Options) -> Result<Report, Error> {
    let program = slxfile::read_file(path)?;
    Ok(run_program(&program, options))
}
