//! The closed enumeration of host-library operations a [`Cmd::Builtin`]
//! can invoke.

/// A built-in host-library operation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    IoWrite,
    MathAbs,
    MathCeil,
    MathFloor,
    MathFmod,
    MathExp,
    MathLn,
    MathLog,
    MathModf,
    MathPow,
    MathSqrt,
    StringChar,
    StringSub,
    Type,
    Tostring,
}

impl Builtin {
    /// Dotted host-library name, e.g. `"math.sqrt"`, as it would appear in
    /// the emitted host source.
    pub const fn qualified_name(self) -> &'static str {
        match self {
            Builtin::IoWrite => "io.write",
            Builtin::MathAbs => "math.abs",
            Builtin::MathCeil => "math.ceil",
            Builtin::MathFloor => "math.floor",
            Builtin::MathFmod => "math.fmod",
            Builtin::MathExp => "math.exp",
            Builtin::MathLn => "math.log",
            Builtin::MathLog => "math.log(_, base)",
            Builtin::MathModf => "math.modf",
            Builtin::MathPow => "math.pow",
            Builtin::MathSqrt => "math.sqrt",
            Builtin::StringChar => "string.char",
            Builtin::StringSub => "string.sub",
            Builtin::Type => "type",
            Builtin::Tostring => "tostring",
        }
    }
}
