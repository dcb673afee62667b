use num_traits::ToPrimitive;

/// ARM-A32 general-purpose register identifiers.
///
/// Numbering matches the architecture: `R13`/`R14`/`R15` are given their
/// conventional AAPCS names (`SP`, `LR`, `PC`) since the emitter never
/// refers to them by number.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    SP,
    LR,
    PC,
}

impl Register {
    /// Argument registers, in order, for the AAPCS calling convention.
    pub const ARGS: [Register; 4] = [Register::R0, Register::R1, Register::R2, Register::R3];

    /// Scratch registers used to stage arguments/operands across a child
    /// evaluation, in order.
    pub const SCRATCH: [Register; 4] = [Register::R4, Register::R5, Register::R6, Register::R7];
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[inline]
pub fn register_number(reg: Register) -> u32 {
    reg.to_u32().unwrap()
}
