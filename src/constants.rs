//! ARM-A32 instruction-encoding bit layout.
//!
//! Only the fields the emitter actually uses are named here; consult the
//! ARMv7-A/R reference manual for anything this module doesn't cover.

use crate::Word;

/// Condition code "AL" (always) in the top nibble — every instruction this
/// crate emits is unconditional.
pub const COND_AL: Word = 0xE << 28;

// --- Data-processing (mov/orr/add/sub) ---------------------------------

pub const DP_IMMEDIATE_BIT: Word = 1 << 25;
pub const DP_OPCODE_OFFSET: u32 = 21;
pub const DP_RN_OFFSET: u32 = 16;
pub const DP_RD_OFFSET: u32 = 12;

pub const DP_OPCODE_SUB: Word = 0b0010;
pub const DP_OPCODE_ADD: Word = 0b0100;
pub const DP_OPCODE_ORR: Word = 0b1100;
pub const DP_OPCODE_MOV: Word = 0b1101;

pub const DP_ROTATE_OFFSET: u32 = 8;

// --- Block data transfer (push/pop) -------------------------------------

pub const BLOCK_XFER_BASE: Word = 1 << 27;
pub const BLOCK_XFER_PRE_BIT: Word = 1 << 24;
pub const BLOCK_XFER_UP_BIT: Word = 1 << 23;
pub const BLOCK_XFER_WRITEBACK_BIT: Word = 1 << 21;
pub const BLOCK_XFER_LOAD_BIT: Word = 1 << 20;
pub const BLOCK_XFER_RN_OFFSET: u32 = 16;

// --- Single data transfer (ldr) ------------------------------------------

pub const SDT_BASE: Word = 1 << 26;
pub const SDT_PRE_BIT: Word = 1 << 24;
pub const SDT_UP_BIT: Word = 1 << 23;
pub const SDT_LOAD_BIT: Word = 1 << 20;
pub const SDT_RN_OFFSET: u32 = 16;
pub const SDT_RD_OFFSET: u32 = 12;

// --- Multiply (mul) -------------------------------------------------------

pub const MUL_RD_OFFSET: u32 = 16;
pub const MUL_RS_OFFSET: u32 = 8;
pub const MUL_FIXED_BITS: Word = (1 << 7) | (1 << 4);

// --- Branch and exchange (bx/blx) -----------------------------------------

pub const BX_BASE: Word = 0x012FFF10;
pub const BLX_LINK_BIT: Word = 1 << 5;
