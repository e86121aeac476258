//! The calling convention.
//!
//! `call` leaves this frame on the stack, with LCL pointing just past it:
//!
//! ```text
//! ARG ->  argument 0 .. argument n-1
//!         return address
//!         saved LCL
//!         saved ARG
//!         saved THIS
//!         saved THAT
//! LCL ->  local 0 .. local k-1
//! ```

use crate::error::{Result, TranslateError};

use super::{at_c, at_s, memory::push_constant, push_d, svec, Translator, MAX_IMMEDIATE};

/// Words `call` pushes between the arguments and the callee's locals.
const FRAME_SIZE: u16 = 5;

/// Saved pointers, in push order.
const SAVED: [&str; 4] = ["LCL", "ARG", "THIS", "THAT"];

fn push_register(reg: &str) -> Vec<String> {
    let mut lines = svec![at_s(reg), "D=M"];
    lines.extend(push_d());
    lines
}

impl Translator {
    pub(super) fn function(&mut self, name: &str, n_vars: u16) -> Vec<String> {
        self.function = name.to_string();
        let mut lines = svec![format!("({})", name)];
        for _ in 0..n_vars {
            lines.extend(push_constant(0));
        }
        lines
    }

    pub(super) fn call(&mut self, name: &str, n_args: u16) -> Result<Vec<String>> {
        let arg_offset = n_args
            .checked_add(FRAME_SIZE)
            .filter(|offset| *offset <= MAX_IMMEDIATE)
            .ok_or_else(|| TranslateError::ImmediateOutOfRange {
                command: format!("call {} {}", name, n_args),
                value: u32::from(n_args) + u32::from(FRAME_SIZE),
            })?;
        let return_sym = format!("RETURN_ADDRESS{}", self.next_gen_sym());

        let mut lines = svec![at_s(&return_sym), "D=A"];
        lines.extend(push_d());
        for reg in SAVED {
            lines.extend(push_register(reg));
        }
        lines.extend(svec![
            // ARG = SP - n - 5
            "@SP",
            "D=M",
            at_c(arg_offset),
            "D=D-A",
            "@ARG",
            "M=D",
            // LCL = SP
            "@SP",
            "D=M",
            "@LCL",
            "M=D",
            at_s(name),
            "0;JMP",
            format!("({})", return_sym)
        ]);
        Ok(lines)
    }

    pub(super) fn ret(&self) -> Vec<String> {
        let mut lines = svec![
            "@LCL",
            "D=M",
            "@R13",
            "M=D", // R13 = endFrame
            at_c(FRAME_SIZE),
            "A=D-A",
            "D=M",
            "@R14",
            "M=D", // R14 = *(endFrame - 5)
            "@SP",
            "AM=M-1",
            "D=M",
            "@ARG",
            "A=M",
            "M=D", // *ARG = pop()
            "@ARG",
            "D=M+1",
            "@SP",
            "M=D" // SP = ARG + 1
        ];
        // THAT, THIS, ARG, LCL sit at endFrame-1 .. endFrame-4
        for reg in SAVED.iter().rev() {
            lines.extend(svec!["@R13", "AM=M-1", "D=M", at_s(reg), "M=D"]);
        }
        lines.extend(svec!["@R14", "A=M", "0;JMP"]);
        lines
    }
}
