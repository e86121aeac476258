//! A small Hack assembler and CPU used to execute translated programs.

#![allow(dead_code)]

use std::collections::HashMap;

use vmil::{parser, program, Unit};

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

#[derive(Debug, Clone)]
enum Instr {
    A(i16),
    C {
        dest: String,
        comp: String,
        jump: String,
    },
}

pub struct Cpu {
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
    rom: Vec<Instr>,
    symbols: HashMap<String, i16>,
}

fn predefined() -> HashMap<String, i16> {
    let mut symbols: HashMap<String, i16> = [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16384),
        ("KBD", 24576),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    for r in 0..16 {
        symbols.insert(format!("R{}", r), r);
    }
    symbols
}

impl Cpu {
    pub fn load(lines: &[String]) -> Self {
        let mut symbols = predefined();
        let code: Vec<&str> = lines
            .iter()
            .map(|l| l.split("//").next().unwrap_or("").trim())
            .filter(|l| !l.is_empty())
            .collect();

        let mut address = 0i16;
        for line in &code {
            if let Some(label) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
                assert!(
                    symbols.insert(label.to_string(), address).is_none(),
                    "duplicate label {}",
                    label
                );
            } else {
                address += 1;
            }
        }

        let mut next_var = 16i16;
        let mut rom = vec![];
        for line in code {
            if line.starts_with('(') {
                continue;
            }
            if let Some(value) = line.strip_prefix('@') {
                let value = match value.parse::<i16>() {
                    Ok(n) => n,
                    Err(_) if value.starts_with(|c: char| c.is_ascii_digit()) => {
                        panic!("constant {} does not fit in an A-instruction", value)
                    }
                    Err(_) => *symbols.entry(value.to_string()).or_insert_with(|| {
                        next_var += 1;
                        next_var - 1
                    }),
                };
                rom.push(Instr::A(value));
            } else {
                let (dest, rest) = line.split_once('=').unwrap_or(("", line));
                let (comp, jump) = rest.split_once(';').unwrap_or((rest, ""));
                rom.push(Instr::C {
                    dest: dest.to_string(),
                    comp: comp.to_string(),
                    jump: jump.to_string(),
                });
            }
        }

        Cpu {
            ram: vec![0; 1 << 16],
            a: 0,
            d: 0,
            pc: 0,
            rom,
            symbols,
        }
    }

    pub fn symbol(&self, name: &str) -> usize {
        self.symbols[name] as u16 as usize
    }

    pub fn get(&self, address: usize) -> i16 {
        self.ram[address]
    }

    pub fn set(&mut self, address: usize, value: i16) {
        self.ram[address] = value;
    }

    /// Top of the stack.
    pub fn peek(&self) -> i16 {
        self.ram[self.ram[SP] as usize - 1]
    }

    fn operand(&self, name: &str) -> i16 {
        match name {
            "A" => self.a,
            "D" => self.d,
            "M" => self.ram[self.a as u16 as usize],
            "0" => 0,
            "1" => 1,
            _ => panic!("bad operand {}", name),
        }
    }

    fn compute(&self, comp: &str) -> i16 {
        if let Some(rest) = comp.strip_prefix('!') {
            return !self.operand(rest);
        }
        if let Some(rest) = comp.strip_prefix('-') {
            return self.operand(rest).wrapping_neg();
        }
        if comp.len() == 3 {
            let (x, op, y) = (&comp[0..1], &comp[1..2], &comp[2..3]);
            let (x, y) = (self.operand(x), self.operand(y));
            return match op {
                "+" => x.wrapping_add(y),
                "-" => x.wrapping_sub(y),
                "&" => x & y,
                "|" => x | y,
                _ => panic!("bad comp {}", comp),
            };
        }
        self.operand(comp)
    }

    pub fn step(&mut self) {
        match self.rom[self.pc].clone() {
            Instr::A(value) => {
                self.a = value;
                self.pc += 1;
            }
            Instr::C { dest, comp, jump } => {
                let value = self.compute(&comp);
                if dest.contains('M') {
                    self.ram[self.a as u16 as usize] = value;
                }
                if dest.contains('A') {
                    self.a = value;
                }
                if dest.contains('D') {
                    self.d = value;
                }
                let taken = match jump.as_str() {
                    "" => false,
                    "JGT" => value > 0,
                    "JEQ" => value == 0,
                    "JGE" => value >= 0,
                    "JLT" => value < 0,
                    "JNE" => value != 0,
                    "JLE" => value <= 0,
                    "JMP" => true,
                    _ => panic!("bad jump {}", jump),
                };
                self.pc = if taken { self.a as u16 as usize } else { self.pc + 1 };
            }
        }
    }

    /// Run until execution falls off the end of the program.
    pub fn run(&mut self) {
        let mut steps = 0;
        while self.pc < self.rom.len() {
            self.step();
            steps += 1;
            assert!(steps < 1_000_000, "program did not terminate");
        }
    }

    /// Run until control reaches `label`.
    pub fn run_until(&mut self, label: &str) {
        let target = self.symbol(label);
        let mut steps = 0;
        while self.pc != target {
            assert!(self.pc < self.rom.len(), "ran off the end before {}", label);
            self.step();
            steps += 1;
            assert!(steps < 1_000_000, "never reached {}", label);
        }
    }
}

/// Translate a single unit without bootstrap.
pub fn translate(name: &str, source: &str) -> Vec<String> {
    let unit = Unit::new(name, parser::parse(source).unwrap());
    program::assemble(&[unit], false).unwrap()
}

/// Translate several units behind the bootstrap.
pub fn translate_program(units: &[(&str, &str)]) -> Vec<String> {
    let units: Vec<Unit> = units
        .iter()
        .map(|(name, source)| Unit::parse(name, source).unwrap())
        .collect();
    program::assemble(&units, true).unwrap()
}

/// A CPU with the segment pointers set up as if inside some caller.
pub fn cpu_with_frame(lines: &[String]) -> Cpu {
    let mut cpu = Cpu::load(lines);
    cpu.set(SP, 256);
    cpu.set(LCL, 300);
    cpu.set(ARG, 400);
    cpu.set(THIS, 3000);
    cpu.set(THAT, 3010);
    cpu
}
