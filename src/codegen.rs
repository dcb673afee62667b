//! Walks the expression tree and appends the ARM-A32 instruction stream.

use crate::ast::Expr;
use crate::encode;
use crate::error::EmitError;
use crate::registers::Register;
use crate::Word;

/// A mutable append cursor over the caller's output buffer.
///
/// This is the redesign spec.md §9 calls for in place of a raw out-pointer:
/// a builder exposing `push`, returning a typed error instead of writing
/// past the end of the caller's slice.
pub struct Buffer<'b> {
    words: &'b mut [Word],
    len: usize,
}

impl<'b> Buffer<'b> {
    pub fn new(words: &'b mut [Word]) -> Buffer<'b> {
        Buffer { words, len: 0 }
    }

    pub fn push(&mut self, word: Word) -> Result<(), EmitError> {
        let slot = self.words.get_mut(self.len).ok_or(EmitError::BufferOverrun)?;
        *slot = word;
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// Every compiled node is wrapped in a `push {r4,r5,r6,r7,lr}` /
/// `pop {r4,r5,r6,r7,lr}` pair, making each subtree a self-contained
/// callable-like region: no child computation can clobber an ancestor's
/// scratch registers. Deliberately wasteful in exchange for never needing
/// anything smarter than a fixed register scheme.
pub fn emit_expr(buf: &mut Buffer, expr: &Expr) -> Result<(), EmitError> {
    buf.push(encode::push(encode::default_mask()))?;
    emit_body(buf, expr)?;
    buf.push(encode::pop(encode::default_mask()))?;
    Ok(())
}

fn emit_body(buf: &mut Buffer, expr: &Expr) -> Result<(), EmitError> {
    match expr {
        Expr::Literal(n) => emit_immediate(buf, Register::R0, *n as u32),

        Expr::Parenthesised(inner) => emit_expr(buf, inner),

        Expr::ExternValue(address) => {
            emit_immediate(buf, Register::R0, *address)?;
            buf.push(encode::ldr(Register::R0, Register::R0))
        }

        Expr::Add(lhs, rhs) => emit_binary(buf, lhs, rhs, encode::add_reg),
        Expr::Sub(lhs, rhs) => emit_binary(buf, lhs, rhs, encode::sub_reg),
        Expr::Mul(lhs, rhs) => emit_binary(buf, lhs, rhs, encode::mul_reg),

        Expr::ExternFunction(address, args) => emit_call(buf, *address, args),
    }
}

/// Right-then-left evaluation order: the right operand's result is saved in
/// R4 while the left operand is computed, which is safe because every
/// node's prologue/epilogue treats R4 as callee-saved.
fn emit_binary(
    buf: &mut Buffer,
    lhs: &Expr,
    rhs: &Expr,
    op: fn(Register, Register) -> Word,
) -> Result<(), EmitError> {
    emit_expr(buf, rhs)?;
    buf.push(encode::mov_reg(Register::R4, Register::R0))?;
    emit_expr(buf, lhs)?;
    buf.push(encode::mov_reg(Register::R1, Register::R4))?;
    buf.push(op(Register::R0, Register::R1))
}

/// Arguments are evaluated left to right into R4-R7 first (so that
/// evaluating one argument, which may itself clobber R0-R3, cannot
/// destroy an earlier argument's value), then moved into the R0-R3
/// argument registers immediately before the call.
fn emit_call(buf: &mut Buffer, address: u32, args: &[Expr]) -> Result<(), EmitError> {
    for (arg, scratch) in args.iter().zip(Register::SCRATCH.iter()) {
        emit_expr(buf, arg)?;
        buf.push(encode::mov_reg(*scratch, Register::R0))?;
    }
    for (arg_reg, scratch) in Register::ARGS.iter().zip(Register::SCRATCH.iter()).take(args.len()) {
        buf.push(encode::mov_reg(*arg_reg, *scratch))?;
    }

    emit_immediate(buf, Register::R4, address)?;
    buf.push(encode::push(1 << crate::registers::register_number(Register::LR)))?;
    buf.push(encode::branch_exchange(true, Register::R4))?;
    buf.push(encode::pop(1 << crate::registers::register_number(Register::LR)))
}

fn emit_immediate(buf: &mut Buffer, rd: Register, value: u32) -> Result<(), EmitError> {
    for word in encode::materialise_immediate(rd, value) {
        buf.push(word)?;
    }
    Ok(())
}
