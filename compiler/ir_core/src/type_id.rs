//! Opaque type handle.
//!
//! The IR never inspects a type beyond equality and, for a handful of
//! pre-interned primitives, tag dispatch (to choose the right narrow/widen
//! conversion or scalar temporary kind during `For` expansion). Full type
//! information — structure, field layout, method tables — lives with the
//! types collaborator upstream of this crate; this module only reserves
//! the handle shape it hands us.

use std::fmt;

/// An opaque handle identifying a source-language type.
///
/// `TypeId` is `Copy` and compares by value; two handles are equal iff the
/// upstream type interner assigned them the same index. The IR never
/// constructs a `TypeId` on its own recognizance except for the pre-interned
/// primitives below, which `generate_basic_blocks` needs to type its `For`
/// temporaries (`step_zero`, `max_var`, `min_var`, `step_sign`).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const INT: TypeId = TypeId(0);
    pub const FLOAT: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const NIL: TypeId = TypeId(4);
    /// Placeholder for a type that failed to resolve upstream; carried
    /// through so a later pass can still walk the tree without panicking.
    pub const ERROR: TypeId = TypeId(5);

    /// First index available to the upstream type interner for
    /// non-pre-interned (record, function, …) types.
    pub const FIRST_DYNAMIC: u32 = 6;

    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::INT => write!(f, "TypeId(int)"),
            TypeId::FLOAT => write!(f, "TypeId(float)"),
            TypeId::BOOL => write!(f, "TypeId(bool)"),
            TypeId::STRING => write!(f, "TypeId(string)"),
            TypeId::NIL => write!(f, "TypeId(nil)"),
            TypeId::ERROR => write!(f, "TypeId(error)"),
            TypeId(raw) => write!(f, "TypeId({raw})"),
        }
    }
}
