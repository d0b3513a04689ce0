//! Basic-block lowering (§4.4): turns a function's `body` tree into a flat
//! `Vec<BasicBlock>` with explicit fallthrough (`next`) and conditional
//! (`jmp_false`) edges.
//!
//! `For` is desugared into a `Move`/`Binop`/`If`/`Loop` tree first (the
//! canonical step-zero-check, sign-dependent min/max, break-on-exhausted
//! expansion) and that tree is then lowered exactly like hand-written
//! control flow — there is no separate "for lowering" code path.

use crate::cmd::Cmd;
use crate::module::{BasicBlock, Function, JmpFalse};
use crate::operators::BinOp;
use crate::span::Span;
use crate::type_id::TypeId;
use crate::value::Value;

/// Populate `func.blocks` from `func.body`. Call once, after every tree
/// rewrite (`clean` and friends) has already run.
#[tracing::instrument(level = "trace", skip_all, fields(function = %func.name))]
pub fn generate_basic_blocks(func: &mut Function) {
    let body = func.body.clone().unwrap_or(Cmd::Nop);
    let blocks = {
        let mut lowerer = Lowerer::new(func);
        let entry = lowerer.alloc_block();
        let start = lowerer.alloc_block();
        lowerer.blocks[entry].next = Some(start);
        let mut current = start;
        lowerer.lower(&body, &mut current);
        // Reserved exit block. Deliberately left unlinked: nothing in the
        // algorithm above ever seals the function's last open block, so a
        // body ending in `Return` keeps `next` absent, per §8 scenario 1.
        lowerer.alloc_block();
        lowerer.blocks
    };
    func.blocks = Some(blocks);
}

struct Lowerer<'f> {
    func: &'f mut Function,
    blocks: Vec<BasicBlock>,
    break_stack: Vec<Vec<usize>>,
}

impl<'f> Lowerer<'f> {
    fn new(func: &'f mut Function) -> Self {
        Lowerer {
            func,
            blocks: Vec::new(),
            break_stack: Vec::new(),
        }
    }

    fn alloc_block(&mut self) -> usize {
        self.blocks.push(BasicBlock::default());
        self.blocks.len() - 1
    }

    fn is_untouched(&self, idx: usize) -> bool {
        let b = &self.blocks[idx];
        b.cmds.is_empty() && b.next.is_none() && b.jmp_false.is_none()
    }

    /// Seal `idx` (defaulting its `next` to a fresh successor if still
    /// absent) and return that successor, now the open block.
    fn finish_block(&mut self, idx: usize) -> usize {
        let successor = self.alloc_block();
        if self.blocks[idx].next.is_none() {
            self.blocks[idx].next = Some(successor);
        }
        successor
    }

    fn lower(&mut self, cmd: &Cmd, current: &mut usize) {
        match cmd {
            Cmd::Seq(children) => {
                for child in children {
                    self.lower(child, current);
                }
            }

            Cmd::If {
                src_condition,
                then_,
                else_,
                ..
            } => {
                let branch = *current;
                let then_start = self.finish_block(branch);
                *current = then_start;
                self.lower(then_, current);
                let then_tail = *current;

                let else_start = self.finish_block(then_tail);
                *current = else_start;
                self.lower(else_, current);
                let else_tail = *current;

                // Cascade collapse: if the else branch is itself a nested
                // `If` (the `elseif` pattern), it already left behind a
                // fresh, empty merge block of its own — reuse it instead
                // of stacking another empty block on top.
                let merge = if self.is_untouched(else_tail) {
                    else_tail
                } else {
                    self.finish_block(else_tail)
                };

                self.blocks[branch].jmp_false = Some(JmpFalse {
                    target: else_start,
                    src_condition: src_condition.clone(),
                });
                self.blocks[then_tail].next = Some(merge);
                *current = merge;
            }

            Cmd::Break => {
                let sealed = *current;
                let resume = self.finish_block(sealed);
                self.break_stack
                    .last_mut()
                    .expect("Break outside of any Loop/For")
                    .push(sealed);
                *current = resume;
            }

            Cmd::Loop(body) => {
                self.break_stack.push(Vec::new());
                let pre = *current;
                let header = self.finish_block(pre);
                *current = header;
                self.lower(body, current);
                let body_tail = *current;

                let after = self.finish_block(body_tail);
                self.blocks[body_tail].next = Some(header);

                let breaks = self.break_stack.pop().expect("pushed above");
                for b in breaks {
                    self.blocks[b].next = Some(after);
                }
                *current = after;
            }

            Cmd::For {
                loc,
                dst,
                src_start,
                src_limit,
                src_step,
                body,
            } => {
                let expanded = self.desugar_for(*loc, *dst, src_start, src_limit, src_step, body);
                self.lower(&expanded, current);
            }

            // Every other command — including `Nop`, `Return`, and
            // `RuntimeError` — is a plain append; it neither opens a block
            // nor closes one.
            other => {
                self.blocks[*current].cmds.push(other.clone());
            }
        }
    }

    /// Canonical `for i = start, limit, step do body end` expansion (§4.4).
    fn desugar_for(&mut self, loc: Span, dst: u32, start: &Value, limit: &Value, step: &Value, body: &Cmd) -> Cmd {
        let scalar_typ = self.func.var_type(dst);
        let is_float = scalar_typ == TypeId::FLOAT;
        let zero = if is_float { Value::float(0.0) } else { Value::Integer(0) };
        let eq_op = if is_float { BinOp::FloatEq } else { BinOp::IntEq };
        let geq_op = if is_float { BinOp::FloatGeq } else { BinOp::IntGeq };
        let gt_op = if is_float { BinOp::FloatGt } else { BinOp::IntGt };
        let add_op = if is_float { BinOp::FloatAdd } else { BinOp::IntAdd };

        let step_zero = self.func.add_local(Some("step_zero".to_string()), TypeId::BOOL);
        let max_var = self.func.add_local(Some("max_var".to_string()), scalar_typ);
        let min_var = self.func.add_local(Some("min_var".to_string()), scalar_typ);
        let step_sign = self.func.add_local(Some("step_sign".to_string()), TypeId::BOOL);
        let loop_test_var = self.func.add_local(Some("loop_test_var".to_string()), TypeId::BOOL);

        let dst_v = Value::LocalVar(dst);

        Cmd::Seq(vec![
            Cmd::Move {
                loc,
                dst,
                src: start.clone(),
            },
            Cmd::Binop {
                loc,
                dst: step_zero,
                op: eq_op,
                src1: step.clone(),
                src2: zero.clone(),
            },
            Cmd::If {
                loc,
                src_condition: Value::LocalVar(step_zero),
                then_: Box::new(Cmd::RuntimeError {
                    loc,
                    msg: "'for' step is zero".to_string(),
                }),
                else_: Box::new(Cmd::Nop),
            },
            Cmd::Binop {
                loc,
                dst: step_sign,
                op: geq_op,
                src1: step.clone(),
                src2: zero,
            },
            Cmd::Loop(Box::new(Cmd::Seq(vec![
                Cmd::If {
                    loc,
                    src_condition: Value::LocalVar(step_sign),
                    then_: Box::new(Cmd::Seq(vec![
                        Cmd::Move {
                            loc,
                            dst: max_var,
                            src: limit.clone(),
                        },
                        Cmd::Move {
                            loc,
                            dst: min_var,
                            src: dst_v.clone(),
                        },
                    ])),
                    else_: Box::new(Cmd::Seq(vec![
                        Cmd::Move {
                            loc,
                            dst: max_var,
                            src: dst_v.clone(),
                        },
                        Cmd::Move {
                            loc,
                            dst: min_var,
                            src: limit.clone(),
                        },
                    ])),
                },
                Cmd::Binop {
                    loc,
                    dst: loop_test_var,
                    op: gt_op,
                    src1: Value::LocalVar(min_var),
                    src2: Value::LocalVar(max_var),
                },
                Cmd::If {
                    loc,
                    src_condition: Value::LocalVar(loop_test_var),
                    then_: Box::new(Cmd::Break),
                    else_: Box::new(Cmd::Nop),
                },
                body.clone(),
                Cmd::Binop {
                    loc,
                    dst,
                    op: add_op,
                    src1: dst_v,
                    src2: step.clone(),
                },
            ]))),
        ])
    }
}

#[cfg(test)]
mod tests;
