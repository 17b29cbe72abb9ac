use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Segment {
    Constant,
    Local,
    Static,
    Argument,
    This,
    That,
    Temp,
}

impl Segment {
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
        }
    }
}

/// `pointer 0` and `pointer 1` alias the THIS and THAT registers (R3/R4).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PointerSlot {
    This,
    That,
}

impl PointerSlot {
    pub fn index(&self) -> u16 {
        match self {
            PointerSlot::This => 0,
            PointerSlot::That => 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArithmeticOp {
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

/// How an operator touches the stack; fixed per operator, never inferred from operands.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpClass {
    Unary,
    Binary,
    Comparison,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 9] = [
        ArithmeticOp::Add,
        ArithmeticOp::Sub,
        ArithmeticOp::Neg,
        ArithmeticOp::Eq,
        ArithmeticOp::Gt,
        ArithmeticOp::Lt,
        ArithmeticOp::And,
        ArithmeticOp::Or,
        ArithmeticOp::Not,
    ];

    pub fn class(&self) -> OpClass {
        match self {
            ArithmeticOp::Neg | ArithmeticOp::Not => OpClass::Unary,
            ArithmeticOp::Add | ArithmeticOp::Sub | ArithmeticOp::And | ArithmeticOp::Or => {
                OpClass::Binary
            }
            ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt => OpClass::Comparison,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    // Stack Basics
    Push(Segment, u16),
    PushPointer(PointerSlot),
    Pop(Segment, u16),
    PopPointer(PointerSlot),
    Arithmetic(ArithmeticOp),

    // Control
    Label(String),
    Goto(String),
    IfGoto(String),

    // Full-line comment, produces no code
    Comment,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(seg, idx) => write!(f, "push {} {}", seg.name(), idx),
            Command::PushPointer(slot) => write!(f, "push pointer {}", slot.index()),
            Command::Pop(seg, idx) => write!(f, "pop {} {}", seg.name(), idx),
            Command::PopPointer(slot) => write!(f, "pop pointer {}", slot.index()),
            Command::Arithmetic(op) => f.write_str(op.keyword()),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Comment => f.write_str("//"),
        }
    }
}
