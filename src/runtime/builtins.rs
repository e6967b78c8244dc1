//! Built-in words.
//!
//! Stack effects are written as `( before -- after )` with the top of the
//! stack on the right. Every word checks its arity before popping anything.

use std::io::Write;

use crate::error::{Error, Result};
use crate::runtime::stack::Stack;

/// A built-in that only touches the stack.
pub type Primitive = fn(&mut Stack) -> Result<()>;

/// A built-in that also writes to the machine's output.
pub type Printer = fn(&mut Stack, &mut dyn Write) -> Result<()>;

pub const PRIMITIVES: &[(&str, Primitive)] = &[
    ("+", add),
    ("-", subtract),
    ("*", multiply),
    ("/", divide),
    ("dup", dup),
    ("drop", drop),
    ("swap", swap),
    ("over", over),
];

pub const PRINTERS: &[(&str, Printer)] = &[(".", print_top), (".s", print_stack), ("emit", emit)];

/// `( b a -- b+a )`
fn add(stack: &mut Stack) -> Result<()> {
    let (b, a) = stack.pop_pair("add")?;
    stack.push(b.wrapping_add(a))
}

/// `( b a -- b-a )`
fn subtract(stack: &mut Stack) -> Result<()> {
    let (b, a) = stack.pop_pair("subtract")?;
    stack.push(b.wrapping_sub(a))
}

/// `( b a -- b*a )`
fn multiply(stack: &mut Stack) -> Result<()> {
    let (b, a) = stack.pop_pair("multiply")?;
    stack.push(b.wrapping_mul(a))
}

/// `( b a -- b/a )`, truncating toward zero.
fn divide(stack: &mut Stack) -> Result<()> {
    let (_, a) = stack.peek_pair("divide")?;
    if a == 0 {
        return Err(Error::DivideByZero);
    }
    let (b, a) = stack.pop_pair("divide")?;
    stack.push(b.wrapping_div(a))
}

/// `( a -- a a )`
fn dup(stack: &mut Stack) -> Result<()> {
    let a = stack.peek_checked("dup")?;
    stack.push(a)
}

/// `( a -- )`
fn drop(stack: &mut Stack) -> Result<()> {
    stack.pop_checked("drop")?;
    Ok(())
}

/// `( b a -- a b )`
fn swap(stack: &mut Stack) -> Result<()> {
    let (b, a) = stack.pop_pair("swap")?;
    stack.push(a)?;
    stack.push(b)
}

/// `( b a -- b a b )`
fn over(stack: &mut Stack) -> Result<()> {
    let (b, _) = stack.peek_pair("copy over")?;
    stack.push(b)
}

/// `( a -- )`, writes `a` followed by a space.
fn print_top(stack: &mut Stack, out: &mut dyn Write) -> Result<()> {
    let a = stack.pop_checked("print")?;
    write!(out, "{} ", a).map_err(Error::Output)
}

/// `( -- )`, writes the whole stack bottom first.
fn print_stack(stack: &mut Stack, out: &mut dyn Write) -> Result<()> {
    for value in stack.as_slice() {
        write!(out, "{} ", value).map_err(Error::Output)?;
    }
    Ok(())
}

/// `( a -- )`, writes `a` as a single character.
fn emit(stack: &mut Stack, out: &mut dyn Write) -> Result<()> {
    let a = stack.pop_checked("emit")?;
    let ch = u32::try_from(a)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    write!(out, "{}", ch).map_err(Error::Output)
}
