use num_derive::{FromPrimitive, ToPrimitive};
use util::Mnemonic;
use util_derive::Mnemonic;

/// The named half of the default instruction set.
///
/// Variant order is the insertion order of `InstructionSet::insert_dis_full`,
/// grouped the way the grouped inserters hand them out: I/O,
/// memory-register, register-register, gotos, jumps, loops, basic math,
/// advanced math, misc. The source-form mnemonic of every variant is its
/// lowercased name (see [`Mnemonic`](../util/trait.Mnemonic.html)).
///
/// Numeric literal instructions are not part of this enum; they are
/// per-set descriptors created from the set's configured literal count.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive, Mnemonic)]
pub enum Opcode {
    /// Reads one value into `F`: from the pre-supplied input buffer if the
    /// host gave one, interactively from stdin otherwise.
    Input,
    /// Emits `F`: appended to the output buffer when input was
    /// pre-supplied, printed to stdout otherwise.
    Output,
    /// `F = D[I]`. Requires `D[I]` to have been saved.
    Load,
    /// `D[I] = F`, marking the cell saved.
    Save,
    /// Exchanges `F` and `D[I]`. Requires `D[I]` to have been saved.
    Swap,
    /// `F = 0` if `F == D[I]`, else `F = -1`. Requires `D[I]` saved.
    Cmp,
    /// `F = F + 1`.
    Inc,
    /// `F = F - 1`.
    Dec,
    /// `F = I`.
    Itof,
    /// `I = F` rounded to the nearest integer.
    Ftoi,
    /// `L[I] = pc`, marking the label saved. Jumping to the label resumes
    /// at the instruction following it.
    Label,
    /// `pc = L[I]` if `F >= 0`. Requires `L[I]` saved.
    Gotoifp,
    /// Skips forward past the matching `jumphere` if `F < 0`.
    Jumpifn,
    /// Structural marker closing the innermost open `jumpifn`.
    Jumphere,
    /// Runs the body up to the matching `endloop` `I` times; `I == 0`
    /// skips the body entirely.
    Loop,
    /// Closes the innermost open `loop`.
    Endloop,
    /// `F = F + D[I]`. Requires `D[I]` saved.
    Add,
    /// `F = F - D[I]`. Requires `D[I]` saved.
    Sub,
    /// `F = F * D[I]`. Requires `D[I]` saved.
    Mul,
    /// `F = F / D[I]`. Requires `D[I]` saved; division by zero is an
    /// invalid operation and leaves `F` unchanged.
    Div,
    /// `F = |F|`.
    Abs,
    /// `F = -F`. The name is historical; the semantics is negation, and
    /// programs in the wild depend on it.
    Sign,
    /// `F = exp(F)`.
    Exp,
    /// `F = ln(F)`. Non-positive `F` is an invalid operation.
    Log,
    /// `F = sin(F)`.
    Sin,
    /// `F = F ^ D[I]`. Requires `D[I]` saved.
    Pow,
    /// `F =` next value of the run's random source, in `[0, 1]`.
    Ran,
    /// Does nothing.
    Nop,
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.mnemonic())
            }
        }
    };
}

impl_enum_display!(Opcode);
