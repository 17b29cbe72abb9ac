//! Hack assembly instruction records and their textual form.
//!
//! Code generation builds these records and nothing else; turning them into
//! text happens only through the `Display` impls below.

use std::fmt;
use std::io;

use crate::ast::Command;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Address {
    Constant(u16),
    Symbol(String),
}

/// The computations the ALU can encode, in canonical spelling.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Comp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

impl Comp {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Comp::Zero => "0",
            Comp::One => "1",
            Comp::MinusOne => "-1",
            Comp::D => "D",
            Comp::A => "A",
            Comp::M => "M",
            Comp::NotD => "!D",
            Comp::NotA => "!A",
            Comp::NotM => "!M",
            Comp::NegD => "-D",
            Comp::NegA => "-A",
            Comp::NegM => "-M",
            Comp::DPlusOne => "D+1",
            Comp::APlusOne => "A+1",
            Comp::MPlusOne => "M+1",
            Comp::DMinusOne => "D-1",
            Comp::AMinusOne => "A-1",
            Comp::MMinusOne => "M-1",
            Comp::DPlusA => "D+A",
            Comp::DPlusM => "D+M",
            Comp::DMinusA => "D-A",
            Comp::DMinusM => "D-M",
            Comp::AMinusD => "A-D",
            Comp::MMinusD => "M-D",
            Comp::DAndA => "D&A",
            Comp::DAndM => "D&M",
            Comp::DOrA => "D|A",
            Comp::DOrM => "D|M",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Dest {
    pub a: bool,
    pub d: bool,
    pub m: bool,
}

impl Dest {
    pub const NONE: Dest = Dest { a: false, d: false, m: false };
    pub const A: Dest = Dest { a: true, d: false, m: false };
    pub const D: Dest = Dest { a: false, d: true, m: false };
    pub const M: Dest = Dest { a: false, d: false, m: true };
    pub const AM: Dest = Dest { a: true, d: false, m: true };

    pub fn is_empty(&self) -> bool {
        !(self.a || self.d || self.m)
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a {
            f.write_str("A")?;
        }
        if self.m {
            f.write_str("M")?;
        }
        if self.d {
            f.write_str("D")?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Jump {
    Greater,
    Equal,
    GreaterEqual,
    Less,
    NotEqual,
    LessEqual,
    Unconditional,
}

impl Jump {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Jump::Greater => "JGT",
            Jump::Equal => "JEQ",
            Jump::GreaterEqual => "JGE",
            Jump::Less => "JLT",
            Jump::NotEqual => "JNE",
            Jump::LessEqual => "JLE",
            Jump::Unconditional => "JMP",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Instruction {
    A(Address),
    C {
        dest: Dest,
        comp: Comp,
        jump: Option<Jump>,
    },
    Label(String),
}

impl Instruction {
    pub fn at(symbol: &str) -> Self {
        Instruction::A(Address::Symbol(symbol.to_string()))
    }

    pub fn at_const(value: u16) -> Self {
        Instruction::A(Address::Constant(value))
    }

    /// `dest=comp`
    pub fn set(dest: Dest, comp: Comp) -> Self {
        Instruction::C { dest, comp, jump: None }
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        Instruction::C {
            dest: Dest::NONE,
            comp,
            jump: Some(jump),
        }
    }

    pub fn label(name: &str) -> Self {
        Instruction::Label(name.to_string())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::A(Address::Constant(value)) => write!(f, "@{}", value),
            Instruction::A(Address::Symbol(sym)) => write!(f, "@{}", sym),
            Instruction::C { dest, comp, jump } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                f.write_str(comp.mnemonic())?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump.mnemonic())?;
                }
                Ok(())
            }
            Instruction::Label(name) => write!(f, "({})", name),
        }
    }
}

/// Instructions generated for a single source line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Fragment {
    pub line: usize,
    pub command: Command,
    pub instructions: Vec<Instruction>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Writes one instruction per line and a blank separator line.
    /// With `annotate`, the source command is echoed as a comment first.
    pub fn render(&self, out: &mut impl io::Write, annotate: bool) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        if annotate {
            writeln!(out, "// {}", self.command)?;
        }
        for instruction in &self.instructions {
            writeln!(out, "{}", instruction)?;
        }
        writeln!(out)
    }
}
