//! A minimal Hack CPU that runs translator output directly from the
//! instruction records, so tests can check what the code does rather than
//! how it is spelled.

#![allow(dead_code)]

use std::collections::HashMap;

use vm_translator::asm::{Address, Comp, Instruction, Jump};
use vm_translator::fragments;

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

pub const STACK_BASE: i16 = 256;

const MAX_STEPS: usize = 100_000;

pub struct Machine {
    pub ram: Vec<i16>,
    program: Vec<Instruction>,
    symbols: HashMap<String, i16>,
    a: i16,
    d: i16,
    pc: usize,
}

impl Machine {
    pub fn load(instructions: Vec<Instruction>) -> Self {
        let mut symbols: HashMap<String, i16> = [
            ("SP", 0),
            ("LCL", 1),
            ("ARG", 2),
            ("THIS", 3),
            ("THAT", 4),
        ]
        .iter()
        .map(|(name, addr)| (name.to_string(), *addr))
        .collect();
        for r in 0..16 {
            symbols.insert(format!("R{}", r), r);
        }

        let mut program = Vec::new();
        for instruction in instructions {
            match instruction {
                Instruction::Label(name) => {
                    let previous = symbols.insert(name.clone(), program.len() as i16);
                    assert!(previous.is_none(), "duplicate label ({})", name);
                }
                other => program.push(other),
            }
        }

        let mut ram = vec![0; 0x10000];
        ram[SP] = STACK_BASE;
        ram[LCL] = 300;
        ram[ARG] = 400;
        ram[THIS] = 3000;
        ram[THAT] = 3010;

        Machine {
            ram,
            program,
            symbols,
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    fn m(&self) -> i16 {
        self.ram[self.a as u16 as usize]
    }

    fn compute(&self, comp: Comp) -> i16 {
        let (a, d, m) = (self.a, self.d, self.m());
        match comp {
            Comp::Zero => 0,
            Comp::One => 1,
            Comp::MinusOne => -1,
            Comp::D => d,
            Comp::A => a,
            Comp::M => m,
            Comp::NotD => !d,
            Comp::NotA => !a,
            Comp::NotM => !m,
            Comp::NegD => d.wrapping_neg(),
            Comp::NegA => a.wrapping_neg(),
            Comp::NegM => m.wrapping_neg(),
            Comp::DPlusOne => d.wrapping_add(1),
            Comp::APlusOne => a.wrapping_add(1),
            Comp::MPlusOne => m.wrapping_add(1),
            Comp::DMinusOne => d.wrapping_sub(1),
            Comp::AMinusOne => a.wrapping_sub(1),
            Comp::MMinusOne => m.wrapping_sub(1),
            Comp::DPlusA => d.wrapping_add(a),
            Comp::DPlusM => d.wrapping_add(m),
            Comp::DMinusA => d.wrapping_sub(a),
            Comp::DMinusM => d.wrapping_sub(m),
            Comp::AMinusD => a.wrapping_sub(d),
            Comp::MMinusD => m.wrapping_sub(d),
            Comp::DAndA => d & a,
            Comp::DAndM => d & m,
            Comp::DOrA => d | a,
            Comp::DOrM => d | m,
        }
    }

    fn jumps(jump: Jump, value: i16) -> bool {
        match jump {
            Jump::Greater => value > 0,
            Jump::Equal => value == 0,
            Jump::GreaterEqual => value >= 0,
            Jump::Less => value < 0,
            Jump::NotEqual => value != 0,
            Jump::LessEqual => value <= 0,
            Jump::Unconditional => true,
        }
    }

    fn step(&mut self) {
        match &self.program[self.pc] {
            Instruction::A(Address::Constant(value)) => {
                self.a = *value as i16;
                self.pc += 1;
            }
            Instruction::A(Address::Symbol(name)) => {
                self.a = *self
                    .symbols
                    .get(name)
                    .unwrap_or_else(|| panic!("undefined symbol {}", name));
                self.pc += 1;
            }
            Instruction::C { dest, comp, jump } => {
                let value = self.compute(*comp);
                let address = self.a as u16 as usize;
                if dest.m {
                    self.ram[address] = value;
                }
                if dest.a {
                    self.a = value;
                }
                if dest.d {
                    self.d = value;
                }
                match jump {
                    Some(jump) if Self::jumps(*jump, value) => self.pc = self.a as u16 as usize,
                    _ => self.pc += 1,
                }
            }
            Instruction::Label(_) => unreachable!("labels are resolved at load time"),
        }
    }

    /// Runs until control falls off the end of the program.
    pub fn run(&mut self) -> &mut Self {
        let mut steps = 0;
        while self.pc < self.program.len() {
            self.step();
            steps += 1;
            assert!(steps < MAX_STEPS, "program did not terminate");
        }
        self
    }

    pub fn sp(&self) -> i16 {
        self.ram[SP]
    }

    pub fn stack(&self) -> &[i16] {
        &self.ram[STACK_BASE as usize..self.sp() as usize]
    }

    pub fn top(&self) -> i16 {
        self.ram[self.sp() as usize - 1]
    }
}

pub fn compile(source: &str) -> Vec<Instruction> {
    fragments(source)
        .map(|fragment| fragment.expect("translation failed"))
        .flat_map(|fragment| fragment.instructions)
        .collect()
}

pub fn machine(source: &str) -> Machine {
    Machine::load(compile(source))
}

pub fn run(source: &str) -> Machine {
    let mut machine = machine(source);
    machine.run();
    machine
}
