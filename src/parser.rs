use nom::{
    bytes::complete::{is_a, is_not},
    character::{complete::{digit1, space1}, is_digit},
    combinator::{all_consuming, map, map_res, verify},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

use crate::{
    ast::{Command, CommandKind},
    error::{Result, TranslateError},
    translator::MAX_IMMEDIATE,
};

fn integer(input: &str) -> IResult<&str, u16> {
    verify(map_res(digit1, |c: &str| c.parse()), |n: &u16| *n <= MAX_IMMEDIATE)(input)
}

fn symbol(input: &str) -> IResult<&str, String> {
    map(
        verify(
            is_a("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_.$:0123456789"),
            |c: &str| !is_digit(c.as_bytes()[0]),
        ),
        |sym: &str| sym.to_string(),
    )(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    is_not(" \t")(input)
}

/// Keyword followed by its whitespace-separated operands.
fn tokens(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    all_consuming(pair(word, many0(preceded(space1, word))))(input)
}

fn syntax(text: &str, reason: impl Into<String>) -> TranslateError {
    TranslateError::Syntax {
        text: text.to_string(),
        reason: reason.into(),
    }
}

fn index_operand(text: &str, token: &str) -> Result<u16> {
    all_consuming(integer)(token)
        .map(|(_, n)| n)
        .map_err(|_| syntax(text, format!("`{}` is not a valid index", token)))
}

fn symbol_operand(text: &str, token: &str) -> Result<String> {
    all_consuming(symbol)(token)
        .map(|(_, sym)| sym)
        .map_err(|_| syntax(text, format!("`{}` is not a valid symbol", token)))
}

/// Parse one stripped, non-empty line of VM source.
pub fn parse_command(text: &str) -> Result<Command> {
    let (_, (keyword, operands)) = tokens(text).map_err(|_| syntax(text, "malformed command"))?;

    let kind = CommandKind::classify(keyword);
    if operands.len() != kind.operand_count() {
        return Err(syntax(
            text,
            format!(
                "`{}` takes {} operand(s), found {}",
                keyword,
                kind.operand_count(),
                operands.len()
            ),
        ));
    }

    let command = match kind {
        CommandKind::Arithmetic => Command::Arithmetic(keyword.parse()?),
        CommandKind::Push => Command::Push(operands[0].parse()?, index_operand(text, operands[1])?),
        CommandKind::Pop => Command::Pop(operands[0].parse()?, index_operand(text, operands[1])?),
        CommandKind::Label => Command::Label(symbol_operand(text, operands[0])?),
        CommandKind::Goto => Command::Goto(symbol_operand(text, operands[0])?),
        CommandKind::IfGoto => Command::IfGoto(symbol_operand(text, operands[0])?),
        CommandKind::Function => Command::Function(
            symbol_operand(text, operands[0])?,
            index_operand(text, operands[1])?,
        ),
        CommandKind::Call => Command::Call(
            symbol_operand(text, operands[0])?,
            index_operand(text, operands[1])?,
        ),
        CommandKind::Return => Command::Return,
    };

    Ok(command)
}

/// Yields `(line number, text)` for every line carrying a command, with
/// trailing comments and surrounding whitespace removed.
pub fn scan_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input.lines().enumerate().filter_map(|(i, line)| {
        let line = line.split_once("//").map(|(s, _)| s).unwrap_or(line).trim();
        if line.is_empty() {
            None
        } else {
            Some((i + 1, line))
        }
    })
}

pub fn parse(input: &str) -> Result<Vec<Command>> {
    scan_lines(input)
        .map(|(line_no, line)| parse_command(line).map_err(|err| err.at_line(line_no)))
        .collect()
}
