//! alanpp-gen - the VM byte-image code generator.
//!
//! Lowers a checked [`alanpp_sem::AstNode`] into a flat byte image for the
//! toy accumulator VM: a fixed fourteen-opcode instruction set, two-pass
//! backpatched addressing (heap and string addresses aren't known until the
//! whole program has been walked once), and a disassembler for inspecting
//! the result.

pub mod disasm;
pub mod emit;
pub mod opcode;

pub use disasm::Disassembler;
pub use emit::{Emitter, Image};
pub use opcode::{Opcode, OperandWidth};

use alanpp_sem::AstNode;
use alanpp_util::Handler;

/// Compiles a checked program's AST into a byte [`Image`]. Returns `None`
/// if a fatal codegen diagnostic (`E_CODEGEN_*`) was raised; callers should
/// not call this at all on an AST whose analysis already reported an error,
/// since codegen assumes a well-typed tree.
pub fn generate(program: &AstNode, handler: &Handler) -> Option<Image> {
    Emitter::new(handler).emit_program(program)
}
