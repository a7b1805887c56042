use std::{error::Error, fmt};

pub type Endian = byteorder::LittleEndian;

/// Static lowercase source-form name of a field-less enum variant.
///
/// Derived with `util_derive::Mnemonic`, which also emits a `FromStr` impl
/// resolving a name back to its variant through the same name table.
pub trait Mnemonic {
    fn mnemonic(&self) -> &'static str;
}

/// A name that matches no variant of the enum it was parsed against.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnknownMnemonic(pub String);

impl fmt::Display for UnknownMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "no instruction is named \"{}\"", self.0)
    }
}

impl Error for UnknownMnemonic {}
