//! Hack assembly generation for VM commands.
//!
//! A [`Translator`] carries the state that has to survive from one command to
//! the next: the unit (file) being translated, the enclosing function, and the
//! counter that keeps generated labels unique across the whole program.

use log::trace;

use crate::{
    ast::Command,
    error::{Result, TranslateError},
};

mod arithmetic;
mod branching;
mod calls;
mod memory;

macro_rules! svec {
    ($($x:expr),* $(,)?) => (vec![$($x.to_string()),*]);
}
pub(crate) use svec;

/// Largest constant an A-instruction can load.
pub const MAX_IMMEDIATE: u16 = 0x7fff;

fn at_c(arg: u16) -> String {
    format!("@{arg}", arg = arg)
}

fn at_s(arg: &str) -> String {
    format!("@{arg}", arg = arg)
}

/// Push D onto the stack.
fn push_d() -> Vec<String> {
    svec!["@SP", "A=M", "M=D", "@SP", "M=M+1"]
}

/// Pop the stack top into D.
fn pop_d() -> Vec<String> {
    svec!["@SP", "AM=M-1", "D=M"]
}

/// Generated labels use the `IF_`, `END_IF_` and `RETURN_ADDRESS` prefixes;
/// top-level user labels must avoid them.
pub struct Translator {
    unit: String,
    function: String,
    gen_sym: usize,
}

impl Translator {
    /// `unit` names static variables (`unit.index`); usually the source
    /// file's stem.
    pub fn new(unit: &str) -> Self {
        Translator {
            unit: unit.to_string(),
            function: String::new(),
            gen_sym: 0,
        }
    }

    /// Start a new translation unit. The label counter carries over, the
    /// enclosing function does not.
    pub fn begin_unit(&mut self, unit: &str) {
        self.unit = unit.to_string();
        self.function.clear();
    }

    /// Name of the function whose body is being translated; empty at top level.
    pub fn current_function(&self) -> &str {
        &self.function
    }

    fn next_gen_sym(&mut self) -> usize {
        let tmp = self.gen_sym;
        self.gen_sym += 1;
        tmp
    }

    pub fn translate_command(&mut self, command: &Command) -> Result<Vec<String>> {
        if let Ok(value) = command.arg2() {
            if value > MAX_IMMEDIATE {
                return Err(TranslateError::ImmediateOutOfRange {
                    command: command.to_string(),
                    value: value.into(),
                });
            }
        }

        let mut lines = vec![format!("// {}", command)];
        let body = match command {
            Command::Arithmetic(op) => self.arithmetic(*op),
            Command::Push(seg, arg) => self.push(*seg, *arg)?,
            Command::Pop(seg, arg) => self.pop(*seg, *arg)?,
            Command::Label(sym) => self.label(sym),
            Command::Goto(sym) => self.goto(sym),
            Command::IfGoto(sym) => self.if_goto(sym),
            Command::Function(name, n_vars) => self.function(name, *n_vars),
            Command::Call(name, n_args) => self.call(name, *n_args)?,
            Command::Return => self.ret(),
        };
        trace!("{} -> {} instructions", command, body.len());
        lines.extend(body);
        Ok(lines)
    }

    pub fn translate(&mut self, commands: &[Command]) -> Result<Vec<String>> {
        let mut instructions: Vec<String> = vec![];

        for command in commands {
            instructions.extend(self.translate_command(command)?);
        }

        Ok(instructions)
    }
}
