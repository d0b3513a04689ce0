//! `Module`, `Function`, `VarDecl`, `BasicBlock`, and the mutation
//! operations (§4.5) that are the only way a caller may grow them.
//!
//! Ids are strictly monotonic 1-based indices into their owning sequence
//! (function id, local id, upvalue id, …): the first `add_*` call on a
//! fresh container returns `1`, the second `2`, and so on — once allocated
//! an id is never reused or renumbered.

use rustc_hash::FxHashMap;

use crate::cmd::Cmd;
use crate::span::Span;
use crate::type_id::TypeId;
use crate::value::Value;

/// A local variable or global declaration: a name (absent for
/// compiler-synthesized temporaries) paired with its type.
#[derive(Clone, Debug)]
pub struct VarDecl {
    pub name: Option<String>,
    pub typ: TypeId,
}

impl VarDecl {
    pub fn named(name: impl Into<String>, typ: TypeId) -> Self {
        VarDecl {
            name: Some(name.into()),
            typ,
        }
    }

    pub fn anonymous(typ: TypeId) -> Self {
        VarDecl { name: None, typ }
    }
}

/// One conditional edge out of a [`BasicBlock`]: "if `src_condition` is
/// falsy, transfer to `target`; otherwise fall through to `next`."
#[derive(Clone, Debug)]
pub struct JmpFalse {
    pub target: usize,
    pub src_condition: Value,
}

/// A maximal straight-line run of commands ending in at most one
/// conditional jump and at most one fall-through edge.
#[derive(Clone, Debug, Default)]
pub struct BasicBlock {
    pub cmds: Vec<Cmd>,
    pub next: Option<usize>,
    pub jmp_false: Option<JmpFalse>,
}

/// A function's local name space: parameters, locals, upvalues, and
/// (once `generate_basic_blocks` has run) its lowered block list.
#[derive(Clone, Debug)]
pub struct Function {
    pub loc: Span,
    pub name: String,
    /// Function type handle: argument and return types.
    pub typ: TypeId,
    /// Parameters (the first `arity` entries, in declaration order)
    /// followed by every other local this function declares.
    pub vars: Vec<VarDecl>,
    pub arity: usize,
    pub captured_vars: Vec<VarDecl>,
    pub f_id_of_upvalue: FxHashMap<u32, u32>,
    pub f_id_of_local: FxHashMap<u32, u32>,
    pub body: Option<Cmd>,
    pub blocks: Option<Vec<BasicBlock>>,
}

impl Function {
    fn new(loc: Span, name: String, typ: TypeId, params: Vec<VarDecl>) -> Self {
        let arity = params.len();
        Function {
            loc,
            name,
            typ,
            vars: params,
            arity,
            captured_vars: Vec::new(),
            f_id_of_upvalue: FxHashMap::default(),
            f_id_of_local: FxHashMap::default(),
            body: None,
            blocks: None,
        }
    }

    /// Append a local and return its `v_id`.
    pub fn add_local(&mut self, name: Option<String>, typ: TypeId) -> u32 {
        self.vars.push(VarDecl { name, typ });
        to_id(self.vars.len())
    }

    /// Append an upvalue and return its `u_id`.
    pub fn add_upvalue(&mut self, name: Option<String>, typ: TypeId) -> u32 {
        self.captured_vars.push(VarDecl { name, typ });
        to_id(self.captured_vars.len())
    }

    /// The declared type of local `v_id`.
    pub fn var_type(&self, v_id: u32) -> TypeId {
        self.vars[from_id(v_id)].typ
    }

    /// The local id of the `i`-th parameter, 1-based. Parameters occupy
    /// the first `arity` local ids in declaration order, so this is the
    /// identity on `i`; the assertion is the operation's real contract.
    pub fn arg_var(&self, i: usize) -> u32 {
        assert!(
            i >= 1 && i <= self.arity,
            "arg_var: parameter index {i} out of range [1, {}]",
            self.arity
        );
        to_id(i)
    }
}

/// A compilation unit: every function, global, and record type the
/// frontend produced for one module.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub record_types: Vec<TypeId>,
    pub functions: Vec<Function>,
    pub globals: Vec<VarDecl>,
    pub exported_functions: Vec<u32>,
    pub exported_globals: Vec<u32>,
    pub loc_id_of_exports: Option<i64>,
}

impl Module {
    pub fn new() -> Self {
        // `globals` is allocated here, not left for an external
        // initializer to create — see DESIGN.md's "globals list" note.
        Module::default()
    }

    pub fn add_record_type(&mut self, typ: TypeId) -> u32 {
        self.record_types.push(typ);
        to_id(self.record_types.len())
    }

    pub fn add_function(&mut self, loc: Span, name: impl Into<String>, typ: TypeId, params: Vec<VarDecl>) -> u32 {
        self.functions.push(Function::new(loc, name.into(), typ, params));
        to_id(self.functions.len())
    }

    pub fn add_global(&mut self, name: Option<String>, typ: TypeId) -> u32 {
        self.globals.push(VarDecl { name, typ });
        to_id(self.globals.len())
    }

    pub fn add_exported_function(&mut self, f_id: u32) {
        if !self.exported_functions.contains(&f_id) {
            self.exported_functions.push(f_id);
        }
    }

    pub fn add_exported_global(&mut self, id: u32) {
        if !self.exported_globals.contains(&id) {
            self.exported_globals.push(id);
        }
    }

    pub fn function(&self, f_id: u32) -> &Function {
        &self.functions[from_id(f_id)]
    }

    pub fn function_mut(&mut self, f_id: u32) -> &mut Function {
        &mut self.functions[from_id(f_id)]
    }
}

/// Translate a 1-based id back into a 0-based `Vec` index.
fn from_id(id: u32) -> usize {
    (id - 1) as usize
}

fn to_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or_else(|_| panic_id_exceeded(index))
}

#[cold]
#[inline(never)]
fn panic_id_exceeded(index: usize) -> ! {
    panic!("id {index} exceeds u32::MAX — this module has outgrown its index space")
}
