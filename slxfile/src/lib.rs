//! Binary container for assembled Slash/A bytecode (`.slx` files).
//!
//! A container records the numeric-literal count of the instruction set
//! the code was assembled against, so a driver can rebuild an equivalent
//! full-DIS set before executing. Layout is little-endian: the literal
//! count, the word count, then the bytecode words.

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::mem;
use std::path::Path;
use util::Endian;

use slasha::{ByteCode, Word};

#[derive(Debug, PartialEq)]
pub struct Program {
    numeric_instructions: Word,
    code: ByteCode,
}

impl Program {
    pub fn from(numeric_instructions: Word, code: ByteCode) -> Program {
        Program {
            numeric_instructions,
            code,
        }
    }

    pub fn numeric_instructions(&self) -> Word {
        self.numeric_instructions
    }

    pub fn code(&self) -> &[Word] {
        &self.code[..]
    }

    pub fn into_code(self) -> ByteCode {
        self.code
    }

    pub fn required_size(&self) -> usize {
        mem::size_of::<u32>() * 2 + self.code.len() * mem::size_of::<Word>()
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Program> {
    let numeric_instructions = reader.read_u32::<Endian>()?;
    let code_len = reader.read_u32::<Endian>()?;

    let mut code = ByteCode::with_capacity(code_len as usize);
    for _ in 0..code_len {
        code.push(reader.read_u32::<Endian>()?);
    }

    Ok(Program::from(numeric_instructions, code))
}

pub fn write<W: Write>(writer: &mut W, program: &Program) -> std::io::Result<()> {
    writer.write_u32::<Endian>(program.numeric_instructions)?;
    writer.write_u32::<Endian>(program.code.len() as u32)?;
    for &word in &program.code {
        writer.write_u32::<Endian>(word)?;
    }
    Ok(())
}

pub trait ReadSlxExt: Read + Sized {
    fn read_slx(&mut self) -> std::io::Result<Program> {
        read(self)
    }
}

impl<R: Read + Sized> ReadSlxExt for R {}

pub trait WriteSlxExt: Write + Sized {
    fn write_slx(&mut self, program: &Program) -> std::io::Result<()> {
        write(self, program)
    }
}

impl<W: Write + Sized> WriteSlxExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Program> {
    BufReader::new(File::open(path)?).read_slx()
}

pub fn write_file<P: AsRef<Path>>(path: P, program: &Program) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_slx(program)
}
