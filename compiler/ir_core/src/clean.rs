//! Algebraic simplification of a command tree.
//!
//! A single bottom-up normalization pass. See spec §4.3 for the five
//! rewrites; this module applies them in one recursive descent rather than
//! building on top of [`crate::iter::map`], since the `Seq`-splicing rewrite
//! needs to inspect and rebuild a whole sibling list at once, not rewrite
//! one node in isolation.

use crate::cmd::Cmd;

/// Normalize a command tree. Idempotent: `clean(clean(c)) == clean(c)`
/// up to structural equality.
#[tracing::instrument(level = "trace", skip_all)]
pub fn clean(cmd: Cmd) -> Cmd {
    match cmd {
        Cmd::Seq(children) => clean_seq(children),

        Cmd::If {
            loc,
            src_condition,
            then_,
            else_,
        } => {
            let then_ = clean(*then_);
            let else_ = clean(*else_);
            if src_condition.is_literal_true() {
                return then_;
            }
            if src_condition.is_literal_false() {
                return else_;
            }
            if matches!(then_, Cmd::Nop) && matches!(else_, Cmd::Nop) {
                return Cmd::Nop;
            }
            Cmd::If {
                loc,
                src_condition,
                then_: Box::new(then_),
                else_: Box::new(else_),
            }
        }

        Cmd::Loop(body) => Cmd::Loop(Box::new(clean(*body))),

        Cmd::For {
            loc,
            dst,
            src_start,
            src_limit,
            src_step,
            body,
        } => Cmd::For {
            loc,
            dst,
            src_start,
            src_limit,
            src_step,
            body: Box::new(clean(*body)),
        },

        // Leaves: nothing to normalize.
        other => other,
    }
}

/// Clean every child, drop `Nop`s, splice nested `Seq`s into the parent
/// list, then collapse the (possibly now-empty or singleton) result.
fn clean_seq(children: Vec<Cmd>) -> Cmd {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match clean(child) {
            Cmd::Nop => {}
            Cmd::Seq(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }
    match flat.len() {
        0 => Cmd::Nop,
        1 => flat.into_iter().next().expect("len checked above"),
        _ => Cmd::Seq(flat),
    }
}
