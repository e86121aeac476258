use crate::{
    ast::Segment,
    error::{Result, TranslateError},
};

use super::{at_c, at_s, pop_d, push_d, svec, Translator};

const TEMP_BASE: u16 = 5;
const TEMP_SIZE: u16 = 8;

/// Where a segment's cells live.
enum Base {
    /// Pointer register holding the segment's base address.
    Indirect(&'static str),
    /// First RAM address of a fixed window.
    Fixed(u16),
    /// A named cell, addressed directly.
    Direct(String),
}

fn pointer_arg(arg: u16) -> Result<&'static str> {
    match arg {
        0 => Ok("THIS"),
        1 => Ok("THAT"),
        _ => Err(TranslateError::IndexOutOfRange {
            segment: Segment::Pointer.name(),
            index: arg,
        }),
    }
}

/// Push microcode for a cell at `base + arg`
fn seg_push(base: Base, arg: u16) -> Vec<String> {
    let mut lines = match base {
        Base::Indirect(seg) => svec![at_c(arg), "D=A", at_s(seg), "A=D+M", "D=M"],
        Base::Fixed(addr) => svec![at_c(addr), "D=A", at_c(arg), "A=D+A", "D=M"],
        Base::Direct(label) => svec![at_s(&label), "D=M"],
    };
    lines.extend(push_d());
    lines
}

fn seg_pop(base: Base, arg: u16) -> Vec<String> {
    match base {
        Base::Indirect(seg) if arg == 0 => {
            let mut lines = pop_d();
            lines.extend(svec![at_s(seg), "A=M", "M=D"]);
            lines
        }
        Base::Indirect(seg) => addr_pop(svec![at_c(arg), "D=A", at_s(seg), "D=D+M"]),
        Base::Fixed(addr) => addr_pop(svec![at_c(arg), "D=A", at_c(addr), "D=D+A"]),
        Base::Direct(label) => {
            let mut lines = pop_d();
            lines.extend(svec![at_s(&label), "M=D"]);
            lines
        }
    }
}

/// Store the popped value at the address left in D by `addr`, without a
/// scratch register.
fn addr_pop(addr: Vec<String>) -> Vec<String> {
    let mut lines = addr;
    lines.extend(svec![
        "@SP",
        "AM=M-1", // SP--, A <- new SP (val to be popped)
        "D=D+M",  // D = addr + val
        "A=D-M",  // A = addr
        "M=D-A"   // *addr = val
    ]);
    lines
}

impl Translator {
    fn base(&self, segment: Segment, arg: u16) -> Result<Base> {
        Ok(match segment {
            Segment::Constant => {
                return Err(TranslateError::UnsupportedOperation(format!("pop constant {}", arg)))
            }
            Segment::Local => Base::Indirect("LCL"),
            Segment::Argument => Base::Indirect("ARG"),
            Segment::This => Base::Indirect("THIS"),
            Segment::That => Base::Indirect("THAT"),
            Segment::Temp if arg >= TEMP_SIZE => {
                return Err(TranslateError::IndexOutOfRange {
                    segment: Segment::Temp.name(),
                    index: arg,
                })
            }
            Segment::Temp => Base::Fixed(TEMP_BASE),
            Segment::Pointer => Base::Direct(pointer_arg(arg)?.to_string()),
            Segment::Static => Base::Direct(format!("{}.{}", self.unit, arg)),
        })
    }

    pub(super) fn push(&self, segment: Segment, arg: u16) -> Result<Vec<String>> {
        match segment {
            Segment::Constant => Ok(push_constant(arg)),
            _ => Ok(seg_push(self.base(segment, arg)?, arg)),
        }
    }

    pub(super) fn pop(&self, segment: Segment, arg: u16) -> Result<Vec<String>> {
        Ok(seg_pop(self.base(segment, arg)?, arg))
    }
}

pub(super) fn push_constant(arg: u16) -> Vec<String> {
    let mut lines = svec![at_c(arg), "D=A"];
    lines.extend(push_d());
    lines
}
