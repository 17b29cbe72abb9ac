use crate::ast::{PointerSlot, Segment};

/// Largest value an A-instruction can load.
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// Scratch register holding the target address of an indirect pop.
pub const SCRATCH: &str = "R13";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Base {
    /// Base address is stored in the named register; access is `*(*reg + i)`.
    Indirect(&'static str),
    /// Base address is fixed; access is `*(base + i)`.
    Direct(u16),
    /// `constant` has no storage.
    None,
}

pub fn base(segment: Segment) -> Base {
    match segment {
        Segment::Constant => Base::None,
        Segment::Local => Base::Indirect("LCL"),
        Segment::Argument => Base::Indirect("ARG"),
        Segment::This => Base::Indirect("THIS"),
        Segment::That => Base::Indirect("THAT"),
        Segment::Temp => Base::Direct(5),
        Segment::Static => Base::Direct(16),
    }
}

pub fn pointer_register(slot: PointerSlot) -> &'static str {
    match slot {
        PointerSlot::This => "R3",
        PointerSlot::That => "R4",
    }
}

/// Absolute address of a direct-segment cell, if it is loadable by an A-instruction.
pub fn direct_address(base: u16, index: u16) -> Option<u16> {
    base.checked_add(index).filter(|addr| *addr <= MAX_ADDRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_and_static_are_direct() {
        assert_eq!(base(Segment::Temp), Base::Direct(5));
        assert_eq!(base(Segment::Static), Base::Direct(16));
        assert_eq!(base(Segment::Local), Base::Indirect("LCL"));
    }

    #[test]
    fn direct_address_stays_in_a_instruction_range() {
        assert_eq!(direct_address(5, 2), Some(7));
        assert_eq!(direct_address(16, MAX_ADDRESS - 16), Some(MAX_ADDRESS));
        assert_eq!(direct_address(16, MAX_ADDRESS), None);
        assert_eq!(direct_address(5, u16::MAX), None);
    }
}
