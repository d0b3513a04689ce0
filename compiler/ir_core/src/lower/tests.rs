use super::*;
use crate::module::Module;
use pretty_assertions::assert_eq;

fn ret(n: i64) -> Cmd {
    Cmd::Return {
        loc: Span::DUMMY,
        srcs: vec![Value::Integer(n)],
    }
}

#[test]
fn minimal_function_has_three_blocks_with_a_terminal_body() {
    let mut module = Module::new();
    let f_id = module.add_function(Span::DUMMY, "f", TypeId::INT, vec![]);
    let f = module.function_mut(f_id);
    f.body = Some(ret(42));

    generate_basic_blocks(f);

    let blocks = f.blocks.as_ref().expect("lowering must populate blocks");
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].next, Some(1));
    assert!(blocks[1].next.is_none(), "a Return-terminated block keeps no fallthrough edge");
    assert_eq!(blocks[1].cmds.len(), 1);
}

#[test]
fn if_cascade_collapses_the_shared_merge_block() {
    // If(c1, Return(1), If(c2, Return(2), Return(3)))
    let mut module = Module::new();
    let params = vec![
        crate::module::VarDecl::named("c1", TypeId::BOOL),
        crate::module::VarDecl::named("c2", TypeId::BOOL),
    ];
    let f_id = module.add_function(Span::DUMMY, "f", TypeId::INT, params);
    let f = module.function_mut(f_id);
    let c1 = f.arg_var(1);
    let c2 = f.arg_var(2);

    f.body = Some(Cmd::If {
        loc: Span::DUMMY,
        src_condition: Value::LocalVar(c1),
        then_: Box::new(ret(1)),
        else_: Box::new(Cmd::If {
            loc: Span::DUMMY,
            src_condition: Value::LocalVar(c2),
            then_: Box::new(ret(2)),
            else_: Box::new(ret(3)),
        }),
    });

    generate_basic_blocks(f);
    let blocks = f.blocks.as_ref().unwrap();

    let non_empty = blocks
        .iter()
        .filter(|b| !b.cmds.is_empty() || b.jmp_false.is_some())
        .count();
    assert!(non_empty <= 5, "expected at most five non-empty blocks, got {non_empty}");

    // The then-branch of the outer If and the else-branch of the inner If
    // both fall through to the *same* merge block: no extra empty block was
    // inserted between the two nested Ifs.
    let then_block = blocks
        .iter()
        .position(|b| b.cmds == vec![ret(1)])
        .expect("Return(1) block");
    let innermost_else_block = blocks
        .iter()
        .position(|b| b.cmds == vec![ret(3)])
        .expect("Return(3) block");
    assert_eq!(blocks[then_block].next, blocks[innermost_else_block].next);
    assert!(blocks[then_block].next.is_some());
}

#[test]
fn break_in_loop_targets_the_after_loop_block_and_the_body_loops_back() {
    // Loop(Seq[If(c, Break, Nop), CheckGC])
    let mut module = Module::new();
    let params = vec![crate::module::VarDecl::named("c", TypeId::BOOL)];
    let f_id = module.add_function(Span::DUMMY, "f", TypeId::INT, params);
    let f = module.function_mut(f_id);
    let c = f.arg_var(1);

    f.body = Some(Cmd::Loop(Box::new(Cmd::Seq(vec![
        Cmd::If {
            loc: Span::DUMMY,
            src_condition: Value::LocalVar(c),
            then_: Box::new(Cmd::Break),
            else_: Box::new(Cmd::Nop),
        },
        Cmd::CheckGC,
    ]))));

    generate_basic_blocks(f);
    let blocks = f.blocks.as_ref().unwrap();

    let header = blocks
        .iter()
        .position(|b| b.jmp_false.is_some())
        .expect("the If's branching block");
    let body_tail = blocks.iter().position(|b| b.cmds.contains(&Cmd::CheckGC)).unwrap();
    assert_eq!(blocks[body_tail].next, Some(header), "body tail must jump back to the loop header");

    // The sealed Break block is empty (Break itself appends no command) and
    // its `next` was resolved by the loop epilogue to the after-loop block —
    // a block distinct from the header, reachable from nowhere else here.
    // Blocks 0 (entry) and 1 (the pre-loop block) are allocated before the
    // loop even starts, so skip them to avoid matching the entry edge.
    let break_block = blocks
        .iter()
        .enumerate()
        .skip(2)
        .position(|(_, b)| b.cmds.is_empty() && b.jmp_false.is_none() && b.next.is_some() && b.next != Some(header))
        .map(|i| i + 2)
        .expect("expected a sealed Break block targeting the after-loop block");
    let after = blocks[break_block].next.unwrap();
    assert_ne!(after, header);
    assert_ne!(break_block, body_tail);
}

#[test]
fn for_expansion_lowers_to_a_zero_step_runtime_error() {
    let mut module = Module::new();
    let params = vec![crate::module::VarDecl::named("i", TypeId::INT)];
    let f_id = module.add_function(Span::DUMMY, "f", TypeId::INT, params);
    let f = module.function_mut(f_id);
    let i = f.arg_var(1);

    f.body = Some(Cmd::For {
        loc: Span::DUMMY,
        dst: i,
        src_start: Value::Integer(1),
        src_limit: Value::Integer(10),
        src_step: Value::Integer(2),
        body: Box::new(Cmd::Nop),
    });

    generate_basic_blocks(f);
    let blocks = f.blocks.as_ref().unwrap();

    let has_zero_step_error = blocks.iter().any(|b| {
        b.cmds
            .iter()
            .any(|c| matches!(c, Cmd::RuntimeError { msg, .. } if msg == "'for' step is zero"))
    });
    assert!(has_zero_step_error);
}
