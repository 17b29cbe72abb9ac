use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{digit1, satisfy, space1},
    combinator::{all_consuming, map, map_res, recognize, value, verify},
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::ast::{Command::*, Segment::*, *};
use crate::error::TranslateError;
use crate::segments::{self, Base, MAX_ADDRESS};
use crate::translator::is_generated_label;

fn integer(input: &str) -> IResult<&str, u16> {
    map_res(digit1, |c: &str| c.parse())(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((
        value(Constant, tag("constant")),
        value(Local, tag("local")),
        value(Static, tag("static")),
        value(Argument, tag("argument")),
        value(This, tag("this")),
        value(That, tag("that")),
        value(Temp, tag("temp")),
    ))(input)
}

fn pointer_slot(input: &str) -> IResult<&str, PointerSlot> {
    preceded(
        pair(tag("pointer"), space1),
        alt((
            value(PointerSlot::This, tag("0")),
            value(PointerSlot::That, tag("1")),
        )),
    )(input)
}

/// Every address the generated code loads must fit an A-instruction.
fn addressable(segment: Segment, index: u16) -> bool {
    match segments::base(segment) {
        Base::Direct(base) => segments::direct_address(base, index).is_some(),
        Base::Indirect(_) | Base::None => index <= MAX_ADDRESS,
    }
}

fn segment_index(input: &str) -> IResult<&str, (Segment, u16)> {
    verify(
        map(tuple((segment, space1, integer)), |(segment, _, index)| (segment, index)),
        |(segment, index): &(Segment, u16)| addressable(*segment, *index),
    )(input)
}

fn push(input: &str) -> IResult<&str, Command> {
    preceded(
        pair(tag("push"), space1),
        alt((
            map(pointer_slot, PushPointer),
            map(segment_index, |(segment, index)| Push(segment, index)),
        )),
    )(input)
}

#[test]
fn test_push() {
    assert_eq!(push("push  local \t 32"), Ok(("", Push(Local, 32))));
    assert_eq!(push("push pointer 1"), Ok(("", PushPointer(PointerSlot::That))));
    assert!(push("push constant 32768").is_err());
}

fn pop(input: &str) -> IResult<&str, Command> {
    preceded(
        pair(tag("pop"), space1),
        alt((
            map(pointer_slot, PopPointer),
            map(
                verify(segment_index, |(segment, _): &(Segment, u16)| *segment != Constant),
                |(segment, index)| Pop(segment, index),
            ),
        )),
    )(input)
}

#[test]
fn test_pop() {
    assert_eq!(pop("pop temp 7"), Ok(("", Pop(Temp, 7))));
    assert_eq!(pop("pop pointer 0"), Ok(("", PopPointer(PointerSlot::This))));
    assert!(pop("pop constant 1").is_err());
}

fn arithmetic(input: &str) -> IResult<&str, Command> {
    map(
        alt((
            value(ArithmeticOp::Add, tag("add")),
            value(ArithmeticOp::Sub, tag("sub")),
            value(ArithmeticOp::Neg, tag("neg")),
            value(ArithmeticOp::Eq, tag("eq")),
            value(ArithmeticOp::Gt, tag("gt")),
            value(ArithmeticOp::Lt, tag("lt")),
            value(ArithmeticOp::And, tag("and")),
            value(ArithmeticOp::Or, tag("or")),
            value(ArithmeticOp::Not, tag("not")),
        )),
        Arithmetic,
    )(input)
}

#[test]
fn test_arithmetic() {
    assert_eq!(arithmetic("neg"), Ok(("", Arithmetic(ArithmeticOp::Neg))));
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$')
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$')
}

fn symbol(input: &str) -> IResult<&str, String> {
    map(
        verify(
            recognize(pair(satisfy(is_symbol_start), take_while(is_symbol_char))),
            |sym: &str| !is_generated_label(sym),
        ),
        |sym: &str| sym.to_string(),
    )(input)
}

#[test]
fn test_symbol() {
    assert_eq!(symbol("$loop.end_2"), Ok(("", "$loop.end_2".to_string())));
    assert!(symbol("2LOOP").is_err());
    assert!(symbol("NEQ_4").is_err());
}

fn goto(input: &str) -> IResult<&str, Command> {
    alt((
        map(preceded(pair(tag("goto"), space1), symbol), Goto),
        map(preceded(pair(tag("if-goto"), space1), symbol), IfGoto),
    ))(input)
}

fn label(input: &str) -> IResult<&str, Command> {
    map(preceded(pair(tag("label"), space1), symbol), Label)(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        all_consuming(arithmetic),
        all_consuming(push),
        all_consuming(pop),
        all_consuming(goto),
        all_consuming(label),
    ))(input)
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map(|(s, _)| s).unwrap_or(line)
}

/// Classifies one source line. `line` is the 1-based line number used in diagnostics.
///
/// A line holding only a comment (or nothing) yields `Command::Comment`.
pub fn parse_line(text: &str, line: usize) -> Result<Command, TranslateError> {
    let code = strip_comment(text).trim();
    if code.is_empty() {
        return Ok(Comment);
    }

    match command(code) {
        Ok((_, command)) => Ok(command),
        Err(_) => Err(TranslateError::Syntax {
            line,
            text: text.trim().to_string(),
        }),
    }
}
