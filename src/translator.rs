use crate::asm::{Comp, Dest, Fragment, Instruction, Jump};
use crate::ast::{Command::*, *};
use crate::error::TranslateError;
use crate::segments::{self, Base, SCRATCH};

/// What the code generator may know about where a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationContext {
    line: usize,
}

impl TranslationContext {
    pub fn new(line: usize) -> Self {
        TranslationContext { line }
    }

    /// 1-based source line of the command being translated.
    pub fn line(&self) -> usize {
        self.line
    }
}

const COMPARISON_STEMS: [&str; 7] = ["EQ", "GT", "LT", "NEQ", "NGT", "NLT", "CONT"];

/// True for names of the form the comparison templates declare, e.g. `NGT_12`.
/// User labels are kept out of this namespace.
pub fn is_generated_label(name: &str) -> bool {
    match name.split_once('_') {
        Some((stem, digits)) => {
            COMPARISON_STEMS.contains(&stem)
                && !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn at(symbol: &str) -> Instruction {
    Instruction::at(symbol)
}

fn set(dest: Dest, comp: Comp) -> Instruction {
    Instruction::set(dest, comp)
}

/// *SP = D; SP++
fn push_d() -> Vec<Instruction> {
    vec![
        at("SP"),
        set(Dest::M, Comp::MPlusOne),
        set(Dest::A, Comp::MMinusOne), // Don't need to refetch SP; this is safe
        set(Dest::M, Comp::D),
    ]
}

/// SP--; D = *SP
fn pop_d() -> Vec<Instruction> {
    vec![
        at("SP"),
        set(Dest::AM, Comp::MMinusOne),
        set(Dest::D, Comp::M),
    ]
}

fn internal(command: &Command, ctx: TranslationContext) -> TranslateError {
    TranslateError::Internal {
        line: ctx.line(),
        command: command.clone(),
    }
}

fn push(segment: Segment, index: u16) -> Option<Vec<Instruction>> {
    let mut code = match segments::base(segment) {
        Base::None => vec![Instruction::at_const(index), set(Dest::D, Comp::A)],
        Base::Indirect(reg) => vec![
            at(reg),
            set(Dest::D, Comp::M),
            Instruction::at_const(index),
            set(Dest::A, Comp::DPlusA), // A = SEG+index
            set(Dest::D, Comp::M),
        ],
        Base::Direct(base) => vec![
            Instruction::at_const(segments::direct_address(base, index)?),
            set(Dest::D, Comp::M),
        ],
    };
    code.extend(push_d());
    Some(code)
}

fn pop(segment: Segment, index: u16) -> Option<Vec<Instruction>> {
    match segments::base(segment) {
        Base::None => None,
        Base::Indirect(reg) => {
            let mut code = vec![
                at(reg),
                set(Dest::D, Comp::M),
                Instruction::at_const(index),
                set(Dest::D, Comp::DPlusA),
                at(SCRATCH),
                set(Dest::M, Comp::D), // Target address parked in R13
            ];
            code.extend(pop_d());
            code.extend([at(SCRATCH), set(Dest::A, Comp::M), set(Dest::M, Comp::D)]);
            Some(code)
        }
        Base::Direct(base) => {
            let mut code = pop_d();
            code.extend([
                Instruction::at_const(segments::direct_address(base, index)?),
                set(Dest::M, Comp::D),
            ]);
            Some(code)
        }
    }
}

fn push_pointer(slot: PointerSlot) -> Vec<Instruction> {
    let mut code = vec![at(segments::pointer_register(slot)), set(Dest::D, Comp::M)];
    code.extend(push_d());
    code
}

fn pop_pointer(slot: PointerSlot) -> Vec<Instruction> {
    let mut code = pop_d();
    code.extend([at(segments::pointer_register(slot)), set(Dest::M, Comp::D)]);
    code
}

fn unary(comp: Comp) -> Vec<Instruction> {
    vec![at("SP"), set(Dest::A, Comp::MMinusOne), set(Dest::M, comp)]
}

// i.e. no conditions or jumps, just pop and run
fn binary(comp: Comp) -> Vec<Instruction> {
    vec![
        at("SP"),
        set(Dest::AM, Comp::MMinusOne), // SP--, looking at top of stack now
        set(Dest::D, Comp::M),          // Right arg in D
        set(Dest::A, Comp::AMinusOne),  // Second arg, will overwrite
        set(Dest::M, comp),
    ]
}

fn compare(stem: &str, jump: Jump, line: usize) -> Vec<Instruction> {
    let taken = format!("{}_{}", stem, line);
    let not_taken = format!("N{}_{}", stem, line);
    let cont = format!("CONT_{}", line);
    vec![
        at("SP"),
        set(Dest::AM, Comp::MMinusOne),
        set(Dest::D, Comp::M),
        set(Dest::A, Comp::AMinusOne),
        set(Dest::D, Comp::MMinusD), // x - y
        at(&taken),
        Instruction::jump(Comp::D, jump),
        at(&not_taken),
        Instruction::jump(Comp::Zero, Jump::Unconditional),
        Instruction::label(&taken),
        at("SP"),
        set(Dest::A, Comp::MMinusOne),
        set(Dest::M, Comp::MinusOne),
        at(&cont),
        Instruction::jump(Comp::Zero, Jump::Unconditional),
        Instruction::label(&not_taken),
        at("SP"),
        set(Dest::A, Comp::MMinusOne),
        set(Dest::M, Comp::Zero),
        Instruction::label(&cont),
    ]
}

fn arithmetic(op: ArithmeticOp, line: usize) -> Vec<Instruction> {
    match op {
        ArithmeticOp::Neg => unary(Comp::NegM),
        ArithmeticOp::Not => unary(Comp::NotM),
        ArithmeticOp::Add => binary(Comp::DPlusM),
        ArithmeticOp::Sub => binary(Comp::MMinusD),
        ArithmeticOp::And => binary(Comp::DAndM),
        ArithmeticOp::Or => binary(Comp::DOrM),
        ArithmeticOp::Eq => compare("EQ", Jump::Equal, line),
        ArithmeticOp::Gt => compare("GT", Jump::Greater, line),
        ArithmeticOp::Lt => compare("LT", Jump::Less, line),
    }
}

/// Generates the instructions for one command.
///
/// Output depends only on `command` and `ctx`, so the same pair always yields
/// the same fragment.
pub fn generate(command: &Command, ctx: TranslationContext) -> Result<Fragment, TranslateError> {
    let instructions = match command {
        Push(segment, index) => push(*segment, *index).ok_or_else(|| internal(command, ctx))?,
        Pop(segment, index) => pop(*segment, *index).ok_or_else(|| internal(command, ctx))?,
        PushPointer(slot) => push_pointer(*slot),
        PopPointer(slot) => pop_pointer(*slot),
        Arithmetic(op) => arithmetic(*op, ctx.line()),
        Label(name) => vec![Instruction::label(name)],
        Goto(name) => vec![at(name), Instruction::jump(Comp::Zero, Jump::Unconditional)],
        IfGoto(name) => {
            let mut code = pop_d();
            code.extend([at(name), Instruction::jump(Comp::D, Jump::NotEqual)]); // False is 0
            code
        }
        Comment => vec![],
    };

    Ok(Fragment {
        line: ctx.line(),
        command: command.clone(),
        instructions,
    })
}
