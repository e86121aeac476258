//! Joins translated units into one assembly program.

use log::debug;

use crate::{
    ast::Command,
    error::{Error, Result},
    parser,
    translator::Translator,
};

/// Initial stack pointer set by the bootstrap.
pub const STACK_BASE: u16 = 256;

/// Function the bootstrap hands control to.
pub const ENTRY_POINT: &str = "Sys.init";

/// One source file: its stem and its parsed commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub commands: Vec<Command>,
}

impl Unit {
    pub fn new(name: &str, commands: Vec<Command>) -> Self {
        Unit {
            name: name.to_string(),
            commands,
        }
    }

    pub fn parse(name: &str, source: &str) -> Result<Self, Error> {
        let commands = parser::parse(source).map_err(|source| Error::Translate {
            unit: name.to_string(),
            source,
        })?;
        Ok(Unit::new(name, commands))
    }
}

/// Set SP and call the entry point.
pub fn bootstrap(translator: &mut Translator) -> Result<Vec<String>> {
    let mut lines = vec![
        "// bootstrap".to_string(),
        format!("@{}", STACK_BASE),
        "D=A".to_string(),
        "@SP".to_string(),
        "M=D".to_string(),
    ];
    lines.extend(translator.translate_command(&Command::Call(ENTRY_POINT.to_string(), 0))?);
    Ok(lines)
}

/// Translate `units` in order through one shared [`Translator`], optionally
/// preceded by the bootstrap.
pub fn assemble(units: &[Unit], with_bootstrap: bool) -> Result<Vec<String>, Error> {
    let mut translator = Translator::new(units.first().map_or("", |u| u.name.as_str()));
    let mut instructions = vec![];

    if with_bootstrap {
        instructions.extend(bootstrap(&mut translator).map_err(|source| Error::Translate {
            unit: "bootstrap".to_string(),
            source,
        })?);
    }

    for unit in units {
        translator.begin_unit(&unit.name);
        let translated = translator
            .translate(&unit.commands)
            .map_err(|source| Error::Translate {
                unit: unit.name.clone(),
                source,
            })?;
        debug!(
            "translated {}: {} commands, {} instructions",
            unit.name,
            unit.commands.len(),
            translated.len()
        );
        instructions.extend(translated);
    }

    Ok(instructions)
}

/// One instruction per line, newline-terminated.
pub fn serialize(instructions: &[String]) -> String {
    let mut out = String::with_capacity(instructions.iter().map(|i| i.len() + 1).sum());
    for instruction in instructions {
        out.push_str(instruction);
        out.push('\n');
    }
    out
}
