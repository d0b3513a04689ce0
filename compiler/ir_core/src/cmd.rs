//! The command algebra: every effectful or control-flow node in the IR.
//!
//! This module is three-address by construction: no field of operand shape
//! may hold another `Cmd`. Every command names its destination(s)
//! explicitly as a local id (`u32`); nesting happens only through the
//! handful of structured-control-flow variants (`Seq`, `If`, `Loop`, `For`),
//! whose children are themselves `Cmd` trees, never expressions.
//!
//! Field naming is load-bearing (see the crate-level docs): `src`/`srcs` are
//! operand inputs, `dst`/`dsts` are output local ids, a `_typ` suffix is a
//! type handle rather than an operand. [`Cmd::get_srcs`] and
//! [`Cmd::get_dsts`] are derived from that convention by hand — a
//! reflection-free dispatch, not a derive macro, matching the rest of this
//! workspace's accessor style (see `DerivedTrait::method_name` in the
//! teacher crate this repo is built from).

use crate::builtin::Builtin;
use crate::operators::{BinOp, UnOp};
use crate::span::Span;
use crate::type_id::TypeId;
use crate::value::Value;

/// A single output slot: `Some(v_id)` or the absent marker for a discarded
/// return value.
pub type Dst = Option<u32>;

/// An effectful or control-flow node.
#[derive(Clone, Debug, PartialEq)]
pub enum Cmd {
    // Variables
    Move {
        loc: Span,
        dst: u32,
        src: Value,
    },

    // Primitive arithmetic
    Unop {
        loc: Span,
        dst: u32,
        op: UnOp,
        src: Value,
    },
    Binop {
        loc: Span,
        dst: u32,
        op: BinOp,
        src1: Value,
        src2: Value,
    },
    Concat {
        loc: Span,
        dst: u32,
        srcs: Vec<Value>,
    },
    ToFloat {
        loc: Span,
        dst: u32,
        src: Value,
    },

    // Dynamic boxing
    ToDyn {
        loc: Span,
        src_typ: TypeId,
        dst: u32,
        src: Value,
    },
    FromDyn {
        loc: Span,
        dst_typ: TypeId,
        dst: u32,
        src: Value,
    },
    IsTruthy {
        loc: Span,
        dst: u32,
        src: Value,
    },
    IsNil {
        loc: Span,
        dst: u32,
        src: Value,
    },

    // Arrays
    NewArr {
        loc: Span,
        dst: u32,
        src_size: Value,
    },
    GetArr {
        loc: Span,
        dst_typ: TypeId,
        dst: u32,
        src_arr: Value,
        src_i: Value,
    },
    SetArr {
        loc: Span,
        src_typ: TypeId,
        src_arr: Value,
        src_i: Value,
        src_v: Value,
    },

    // Tables
    NewTable {
        loc: Span,
        dst: u32,
        src_size: Value,
    },
    GetTable {
        loc: Span,
        dst_typ: TypeId,
        dst: u32,
        src_tab: Value,
        src_k: Value,
    },
    SetTable {
        loc: Span,
        src_typ: TypeId,
        src_tab: Value,
        src_k: Value,
        src_v: Value,
    },

    // Records
    NewRecord {
        loc: Span,
        rec_typ: TypeId,
        dst: u32,
    },
    GetField {
        loc: Span,
        rec_typ: TypeId,
        dst: u32,
        src_rec: Value,
        field_name: String,
    },
    SetField {
        loc: Span,
        rec_typ: TypeId,
        src_rec: Value,
        field_name: String,
        src_v: Value,
    },

    // Functions
    NewClosure {
        loc: Span,
        dst: u32,
        f_id: u32,
    },
    InitUpvalues {
        loc: Span,
        src_f: Value,
        srcs: Vec<Value>,
        f_id: u32,
    },
    CallStatic {
        loc: Span,
        f_typ: TypeId,
        dsts: Vec<Dst>,
        src_f: Value,
        srcs: Vec<Value>,
    },
    CallDyn {
        loc: Span,
        dsts: Vec<Dst>,
        src_f: Value,
        srcs: Vec<Value>,
    },

    // Diagnostics
    RuntimeError {
        loc: Span,
        msg: String,
    },

    // Builtins
    Builtin {
        loc: Span,
        op: Builtin,
        dsts: Vec<Dst>,
        srcs: Vec<Value>,
    },

    // Structured control flow
    Nop,
    Seq(Vec<Cmd>),
    Return {
        loc: Span,
        srcs: Vec<Value>,
    },
    Break,
    Loop(Box<Cmd>),
    If {
        loc: Span,
        src_condition: Value,
        then_: Box<Cmd>,
        else_: Box<Cmd>,
    },
    For {
        loc: Span,
        dst: u32,
        src_start: Value,
        src_limit: Value,
        src_step: Value,
        body: Box<Cmd>,
    },

    // GC hook
    CheckGC,
}

impl Cmd {
    /// The tag string a backend would switch on: `"ir.Cmd.<Variant>"`.
    pub const fn tag(&self) -> &'static str {
        match self {
            Cmd::Move { .. } => "ir.Cmd.Move",
            Cmd::Unop { .. } => "ir.Cmd.Unop",
            Cmd::Binop { .. } => "ir.Cmd.Binop",
            Cmd::Concat { .. } => "ir.Cmd.Concat",
            Cmd::ToFloat { .. } => "ir.Cmd.ToFloat",
            Cmd::ToDyn { .. } => "ir.Cmd.ToDyn",
            Cmd::FromDyn { .. } => "ir.Cmd.FromDyn",
            Cmd::IsTruthy { .. } => "ir.Cmd.IsTruthy",
            Cmd::IsNil { .. } => "ir.Cmd.IsNil",
            Cmd::NewArr { .. } => "ir.Cmd.NewArr",
            Cmd::GetArr { .. } => "ir.Cmd.GetArr",
            Cmd::SetArr { .. } => "ir.Cmd.SetArr",
            Cmd::NewTable { .. } => "ir.Cmd.NewTable",
            Cmd::GetTable { .. } => "ir.Cmd.GetTable",
            Cmd::SetTable { .. } => "ir.Cmd.SetTable",
            Cmd::NewRecord { .. } => "ir.Cmd.NewRecord",
            Cmd::GetField { .. } => "ir.Cmd.GetField",
            Cmd::SetField { .. } => "ir.Cmd.SetField",
            Cmd::NewClosure { .. } => "ir.Cmd.NewClosure",
            Cmd::InitUpvalues { .. } => "ir.Cmd.InitUpvalues",
            Cmd::CallStatic { .. } => "ir.Cmd.CallStatic",
            Cmd::CallDyn { .. } => "ir.Cmd.CallDyn",
            Cmd::RuntimeError { .. } => "ir.Cmd.RuntimeError",
            Cmd::Builtin { .. } => "ir.Cmd.Builtin",
            Cmd::Nop => "ir.Cmd.Nop",
            Cmd::Seq(_) => "ir.Cmd.Seq",
            Cmd::Return { .. } => "ir.Cmd.Return",
            Cmd::Break => "ir.Cmd.Break",
            Cmd::Loop(_) => "ir.Cmd.Loop",
            Cmd::If { .. } => "ir.Cmd.If",
            Cmd::For { .. } => "ir.Cmd.For",
            Cmd::CheckGC => "ir.Cmd.CheckGC",
        }
    }

    /// All operand inputs of this node, in constructor order (scalars then
    /// vector fields, flattened). Does not descend into child `Cmd`s —
    /// `Seq`/`If`/`Loop`/`For`'s nested bodies are structure, not operands.
    pub fn get_srcs(&self) -> Vec<&Value> {
        match self {
            Cmd::Move { src, .. }
            | Cmd::Unop { src, .. }
            | Cmd::ToFloat { src, .. }
            | Cmd::ToDyn { src, .. }
            | Cmd::FromDyn { src, .. }
            | Cmd::IsTruthy { src, .. }
            | Cmd::IsNil { src, .. } => vec![src],

            Cmd::Binop { src1, src2, .. } => vec![src1, src2],
            Cmd::Concat { srcs, .. } => srcs.iter().collect(),

            Cmd::NewArr { src_size, .. } | Cmd::NewTable { src_size, .. } => vec![src_size],
            Cmd::GetArr {
                src_arr, src_i, ..
            } => vec![src_arr, src_i],
            Cmd::SetArr {
                src_arr,
                src_i,
                src_v,
                ..
            } => vec![src_arr, src_i, src_v],
            Cmd::GetTable {
                src_tab, src_k, ..
            } => vec![src_tab, src_k],
            Cmd::SetTable {
                src_tab,
                src_k,
                src_v,
                ..
            } => vec![src_tab, src_k, src_v],

            Cmd::NewRecord { .. } => vec![],
            Cmd::GetField { src_rec, .. } => vec![src_rec],
            Cmd::SetField { src_rec, src_v, .. } => vec![src_rec, src_v],

            Cmd::NewClosure { .. } => vec![],
            Cmd::InitUpvalues { src_f, srcs, .. } => {
                let mut out = vec![src_f];
                out.extend(srcs.iter());
                out
            }
            Cmd::CallStatic { src_f, srcs, .. } | Cmd::CallDyn { src_f, srcs, .. } => {
                let mut out = vec![src_f];
                out.extend(srcs.iter());
                out
            }

            Cmd::RuntimeError { .. } => vec![],
            Cmd::Builtin { srcs, .. } => srcs.iter().collect(),

            Cmd::Nop | Cmd::Seq(_) | Cmd::Break | Cmd::Loop(_) | Cmd::CheckGC => vec![],
            Cmd::Return { srcs, .. } => srcs.iter().collect(),
            Cmd::If { src_condition, .. } => vec![src_condition],
            Cmd::For {
                src_start,
                src_limit,
                src_step,
                ..
            } => vec![src_start, src_limit, src_step],
        }
    }

    /// All output local ids of this node, skipping absent markers.
    pub fn get_dsts(&self) -> Vec<u32> {
        match self {
            Cmd::Move { dst, .. }
            | Cmd::Unop { dst, .. }
            | Cmd::Binop { dst, .. }
            | Cmd::Concat { dst, .. }
            | Cmd::ToFloat { dst, .. }
            | Cmd::ToDyn { dst, .. }
            | Cmd::FromDyn { dst, .. }
            | Cmd::IsTruthy { dst, .. }
            | Cmd::IsNil { dst, .. }
            | Cmd::NewArr { dst, .. }
            | Cmd::GetArr { dst, .. }
            | Cmd::NewTable { dst, .. }
            | Cmd::GetTable { dst, .. }
            | Cmd::NewRecord { dst, .. }
            | Cmd::GetField { dst, .. }
            | Cmd::NewClosure { dst, .. }
            | Cmd::For { dst, .. } => vec![*dst],

            Cmd::SetArr { .. }
            | Cmd::SetTable { .. }
            | Cmd::SetField { .. }
            | Cmd::InitUpvalues { .. }
            | Cmd::RuntimeError { .. }
            | Cmd::Nop
            | Cmd::Seq(_)
            | Cmd::Return { .. }
            | Cmd::Break
            | Cmd::Loop(_)
            | Cmd::If { .. }
            | Cmd::CheckGC => vec![],

            Cmd::CallStatic { dsts, .. } | Cmd::CallDyn { dsts, .. } | Cmd::Builtin { dsts, .. } => {
                dsts.iter().filter_map(|d| *d).collect()
            }
        }
    }
}
