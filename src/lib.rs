//! A just-in-time compiler from arithmetic expressions to ARM-A32 machine
//! code: parses a textual expression, resolves extern names against a
//! caller-supplied symbol table, and emits a self-contained instruction
//! stream that returns the expression's value in `R0` and ends in `bx lr`.

extern crate num_traits;
#[macro_use]
extern crate num_derive;

pub mod ast;
pub mod codegen;
pub mod constants;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod registers;
pub mod symtab;


pub use ast::Expr;
pub use error::{EmitError, Error, ParseError};
pub use registers::Register;
pub use symtab::SymbolTable;

/// A 32-bit instruction word.
pub type Word = u32;

/// An address in the host process's address space, as seen by compiled
/// code. Represented as `u32` rather than a raw pointer so the crate
/// itself stays host-architecture-independent and its output is
/// byte-for-byte testable without ever running on real ARM hardware; the
/// caller is responsible for any pointer-to-`u32` narrowing this implies.
pub type HostAddress = u32;

/// Compiles `expression` against `externs` and writes the resulting
/// instruction stream into `out`, returning the number of words written.
///
/// `externs` is searched by linear scan (see [`symtab::SymbolTable`]) each
/// time an identifier is encountered, so callers with many names should
/// keep the list small or pre-sort it for their own lookup needs — this
/// crate makes no ordering assumption beyond "first match wins".
///
/// On success, executing `out[..len]` as ARM-A32 code with the AAPCS
/// calling convention leaves the expression's value in `R0`.
pub fn compile(
    expression: &str,
    externs: &[(&str, HostAddress)],
    out: &mut [Word],
) -> Result<usize, Error> {
    let dense = normalize::normalise(expression);
    let symbols = SymbolTable::new(externs);
    let tree = parser::parse(&dense, &symbols)?;

    let mut buf = codegen::Buffer::new(out);
    codegen::emit_expr(&mut buf, &tree)?;
    buf.push(encode::branch_exchange(false, Register::LR))?;

    Ok(buf.len())
}

#[cfg(test)]
mod compile_test {
    use super::*;

    #[test]
    fn rejects_empty_expression() {
        let mut out = [0u32; 32];
        assert_eq!(compile("", &[], &mut out), Err(Error::Parse(ParseError::EmptyInput)));
    }

    #[test]
    fn reports_buffer_overrun_instead_of_panicking() {
        let mut out = [0u32; 2];
        assert_eq!(compile("1+2", &[], &mut out), Err(Error::Emit(EmitError::BufferOverrun)));
    }

    #[test]
    fn compiles_a_plain_literal() {
        let mut out = [0u32; 32];
        let n = compile("42", &[], &mut out).unwrap();
        assert!(n > 0);
        // last word is always the final `bx lr`.
        assert_eq!(out[n - 1], encode::branch_exchange(false, Register::LR));
    }
}
