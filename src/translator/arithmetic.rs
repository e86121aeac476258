use crate::ast::ArithOp;

use super::{svec, Translator};

fn simple_un_op(op: char) -> Vec<String> {
    svec!["@SP", "A=M-1", format!("M={}M", op)]
}

// i.e. no conditions or jumps, just pop and run
fn simple_bin_op(op: &str) -> Vec<String> {
    svec![
        "@SP",
        "AM=M-1", // SP--, looking at top of stack now
        "D=M",    // Right arg in D
        "A=A-1",  // Looking at second arg of stack, will overwrite
        format!("M={}", op)
    ]
}

impl Translator {
    pub(super) fn arithmetic(&mut self, op: ArithOp) -> Vec<String> {
        match op {
            ArithOp::Add => simple_bin_op("D+M"),
            ArithOp::Sub => simple_bin_op("M-D"),
            ArithOp::And => simple_bin_op("D&M"),
            ArithOp::Or => simple_bin_op("D|M"),
            ArithOp::Neg => simple_un_op('-'),
            ArithOp::Not => simple_un_op('!'),
            ArithOp::Eq => self.compare("EQ"),
            ArithOp::Gt => self.compare("GT"),
            ArithOp::Lt => self.compare("LT"),
        }
    }

    /// Replace the top two values with -1 if `x - y` satisfies `jump`, else 0.
    fn compare(&mut self, jump: &str) -> Vec<String> {
        let sym = self.next_gen_sym();
        let true_sym = format!("IF_{}{}", jump, sym);
        let end_sym = format!("END_IF_{}{}", jump, sym);
        svec![
            "@SP",
            "AM=M-1",
            "D=M",
            "A=A-1",
            "D=M-D", // x - y
            format!("@{}", true_sym),
            format!("D;J{}", jump),
            "@SP",
            "A=M-1",
            "M=0",
            format!("@{}", end_sym),
            "0;JMP",
            format!("({})", true_sym),
            "@SP",
            "A=M-1",
            "M=-1",
            format!("({})", end_sym)
        ]
    }
}
