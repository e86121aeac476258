use std::{fmt, str::FromStr};

use crate::error::{Result, TranslateError};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Segment {
    Constant,
    Local,
    Static,
    Argument,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub fn name(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

impl FromStr for Segment {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "constant" => Segment::Constant,
            "local" => Segment::Local,
            "static" => Segment::Static,
            "argument" => Segment::Argument,
            "this" => Segment::This,
            "that" => Segment::That,
            "pointer" => Segment::Pointer,
            "temp" => Segment::Temp,
            _ => return Err(TranslateError::UnknownSegment(s.to_string())),
        })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack arithmetic and logic primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Neg => "neg",
            ArithOp::Eq => "eq",
            ArithOp::Gt => "gt",
            ArithOp::Lt => "lt",
            ArithOp::And => "and",
            ArithOp::Or => "or",
            ArithOp::Not => "not",
        }
    }
}

impl FromStr for ArithOp {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "add" => ArithOp::Add,
            "sub" => ArithOp::Sub,
            "neg" => ArithOp::Neg,
            "eq" => ArithOp::Eq,
            "gt" => ArithOp::Gt,
            "lt" => ArithOp::Lt,
            "and" => ArithOp::And,
            "or" => ArithOp::Or,
            "not" => ArithOp::Not,
            _ => return Err(TranslateError::UnrecognizedCommand(s.to_string())),
        })
    }
}

/// Classification of a command, derived from its first token alone.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandKind {
    Arithmetic,
    Push,
    Pop,
    Label,
    Goto,
    IfGoto,
    Function,
    Call,
    Return,
}

impl CommandKind {
    /// Anything that is not one of the eight keywords is arithmetic.
    pub fn classify(keyword: &str) -> Self {
        match keyword {
            "push" => CommandKind::Push,
            "pop" => CommandKind::Pop,
            "label" => CommandKind::Label,
            "goto" => CommandKind::Goto,
            "if-goto" => CommandKind::IfGoto,
            "function" => CommandKind::Function,
            "call" => CommandKind::Call,
            "return" => CommandKind::Return,
            _ => CommandKind::Arithmetic,
        }
    }

    /// Number of operands following the keyword in source text.
    pub fn operand_count(self) -> usize {
        match self {
            CommandKind::Arithmetic | CommandKind::Return => 0,
            CommandKind::Label | CommandKind::Goto | CommandKind::IfGoto => 1,
            CommandKind::Push | CommandKind::Pop | CommandKind::Function | CommandKind::Call => 2,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandKind::Arithmetic => "arithmetic",
            CommandKind::Push => "push",
            CommandKind::Pop => "pop",
            CommandKind::Label => "label",
            CommandKind::Goto => "goto",
            CommandKind::IfGoto => "if-goto",
            CommandKind::Function => "function",
            CommandKind::Call => "call",
            CommandKind::Return => "return",
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    // Stack Basics
    Arithmetic(ArithOp),
    Push(Segment, u16),
    Pop(Segment, u16),

    // Control
    Label(String),
    Goto(String),
    IfGoto(String),

    // Functions
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Arithmetic(_) => CommandKind::Arithmetic,
            Command::Push(..) => CommandKind::Push,
            Command::Pop(..) => CommandKind::Pop,
            Command::Label(_) => CommandKind::Label,
            Command::Goto(_) => CommandKind::Goto,
            Command::IfGoto(_) => CommandKind::IfGoto,
            Command::Function(..) => CommandKind::Function,
            Command::Call(..) => CommandKind::Call,
            Command::Return => CommandKind::Return,
        }
    }

    /// First operand: the mnemonic for arithmetic, otherwise the segment,
    /// label or function name.
    pub fn arg1(&self) -> Result<&str> {
        match self {
            Command::Arithmetic(op) => Ok(op.mnemonic()),
            Command::Push(seg, _) | Command::Pop(seg, _) => Ok(seg.name()),
            Command::Label(sym) | Command::Goto(sym) | Command::IfGoto(sym) => Ok(sym),
            Command::Function(name, _) | Command::Call(name, _) => Ok(name),
            Command::Return => Err(self.invalid_operand(1)),
        }
    }

    /// Second operand: segment index, local count or argument count.
    pub fn arg2(&self) -> Result<u16> {
        match self {
            Command::Push(_, n) | Command::Pop(_, n) | Command::Function(_, n) | Command::Call(_, n) => {
                Ok(*n)
            }
            _ => Err(self.invalid_operand(2)),
        }
    }

    fn invalid_operand(&self, position: u8) -> TranslateError {
        TranslateError::InvalidOperand {
            kind: self.kind(),
            position,
        }
    }
}

/// Canonical source text, used for the comment heading every translation.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Arithmetic(op) => f.write_str(op.mnemonic()),
            Command::Push(seg, n) => write!(f, "push {} {}", seg, n),
            Command::Pop(seg, n) => write!(f, "pop {} {}", seg, n),
            Command::Label(sym) => write!(f, "label {}", sym),
            Command::Goto(sym) => write!(f, "goto {}", sym),
            Command::IfGoto(sym) => write!(f, "if-goto {}", sym),
            Command::Function(name, n) => write!(f, "function {} {}", name, n),
            Command::Call(name, n) => write!(f, "call {} {}", name, n),
            Command::Return => f.write_str("return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_first_token() {
        assert_eq!(CommandKind::classify("push"), CommandKind::Push);
        assert_eq!(CommandKind::classify("if-goto"), CommandKind::IfGoto);
        assert_eq!(CommandKind::classify("return"), CommandKind::Return);
        assert_eq!(CommandKind::classify("add"), CommandKind::Arithmetic);
        assert_eq!(CommandKind::classify("frobnicate"), CommandKind::Arithmetic);
    }

    #[test]
    fn arg1_of_arithmetic_is_the_mnemonic() {
        assert_eq!(Command::Arithmetic(ArithOp::Add).arg1(), Ok("add"));
        assert_eq!(Command::Push(Segment::Constant, 17).arg1(), Ok("constant"));
        assert_eq!(Command::Label("TEST_LABEL".into()).arg1(), Ok("TEST_LABEL"));
    }

    #[test]
    fn arg2_of_memory_and_function_commands() {
        assert_eq!(Command::Push(Segment::Constant, 17).arg2(), Ok(17));
        assert_eq!(Command::Call("Foo.bar".into(), 2).arg2(), Ok(2));
    }

    #[test]
    fn missing_operands_are_rejected() {
        assert_eq!(
            Command::Return.arg1(),
            Err(TranslateError::InvalidOperand {
                kind: CommandKind::Return,
                position: 1
            })
        );
        assert_eq!(
            Command::Return.arg2(),
            Err(TranslateError::InvalidOperand {
                kind: CommandKind::Return,
                position: 2
            })
        );
        for cmd in [
            Command::Label("L".into()),
            Command::Goto("L".into()),
            Command::IfGoto("L".into()),
            Command::Arithmetic(ArithOp::Not),
        ] {
            assert!(matches!(
                cmd.arg2(),
                Err(TranslateError::InvalidOperand { position: 2, .. })
            ));
        }
    }

    #[test]
    fn displays_canonical_source() {
        assert_eq!(Command::Push(Segment::Constant, 17).to_string(), "push constant 17");
        assert_eq!(Command::IfGoto("END".into()).to_string(), "if-goto END");
        assert_eq!(Command::Function("Foo.bar".into(), 2).to_string(), "function Foo.bar 2");
        assert_eq!(Command::Return.to_string(), "return");
    }

    #[test]
    fn unknown_segment_name() {
        assert_eq!(
            "heap".parse::<Segment>(),
            Err(TranslateError::UnknownSegment("heap".into()))
        );
    }
}
