//! The byte-image disassembler.
//!
//! An `output: String` buffer built up line by line, but running in the
//! opposite direction from code generation: instead of walking a tree and
//! emitting mnemonics, it walks a flat byte buffer and decodes mnemonics
//! back out of it.
use crate::opcode::{Opcode, OperandWidth};

/// Disassembles a compiled [`crate::emit::Image`]'s bytes into one
/// mnemonic per line, `offset: MNEMONIC operand`. Decoding stops at the
/// first `BRK` unless `full` is set, in which case the bytes above it
/// (padding, then the string region) are rendered too, the string region as
/// a hex-plus-ASCII dump.
pub struct Disassembler {
    pub output: String,
    indent: usize,
}

impl Disassembler {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    /// `bytes` is the file-layout image: code (ending in `BRK`, padded)
    /// followed by the string region. `full` additionally renders
    /// everything from the first `BRK` onward instead of stopping there.
    pub fn disassemble(mut self, bytes: &[u8], full: bool) -> String {
        let mut offset = 0usize;
        let mut halted_at = None;

        while offset < bytes.len() {
            let byte = bytes[offset];
            let Some(op) = Opcode::from_byte(byte) else {
                self.line(format!("{offset:04X}: ??  (0x{byte:02X})"));
                offset += 1;
                continue;
            };

            if op == Opcode::Brk && halted_at.is_none() {
                halted_at = Some(offset);
            }
            if halted_at.is_some() && !full {
                break;
            }

            let width = op.operand_width();
            let operand_len = match width {
                OperandWidth::None => 0,
                OperandWidth::Imm8 | OperandWidth::Rel8 => 1,
                OperandWidth::Addr16 => 2,
            };
            if offset + 1 + operand_len > bytes.len() {
                self.line(format!("{offset:04X}: {}  (truncated operand)", op.mnemonic()));
                break;
            }

            let rendered = match width {
                OperandWidth::None => String::new(),
                OperandWidth::Imm8 => format!(" #0x{:02X}", bytes[offset + 1]),
                OperandWidth::Rel8 => {
                    let rel = bytes[offset + 1] as i8;
                    format!(" {rel:+}")
                }
                OperandWidth::Addr16 => {
                    let addr = u16::from_le_bytes([bytes[offset + 1], bytes[offset + 2]]);
                    format!(" 0x{addr:04X}")
                }
            };
            self.line(format!("{offset:04X}: {}{rendered}", op.mnemonic()));
            offset += 1 + operand_len;
        }

        if full {
            if let Some(brk_at) = halted_at {
                self.render_string_region(bytes, brk_at, offset);
            }
        }

        self.output
    }

    /// A hex-plus-ASCII dump of whatever follows the code region (padding
    /// and the string literal bytes), sixteen bytes per line.
    fn render_string_region(&mut self, bytes: &[u8], brk_at: usize, decoded_up_to: usize) {
        let start = decoded_up_to.max(brk_at + 1);
        if start >= bytes.len() {
            return;
        }
        self.indent += 1;
        for (row, chunk) in bytes[start..].chunks(16).enumerate() {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
            let ascii: String = chunk
                .iter()
                .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
                .collect();
            self.line(format!("{:04X}: {:<47} {ascii}", start + row * 16, hex.join(" ")));
        }
        self.indent -= 1;
    }
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_the_first_brk_by_default() {
        let bytes = [Opcode::LdaConst.byte(), 0x05, Opcode::Brk.byte(), 0xAA, 0xBB];
        let out = Disassembler::new().disassemble(&bytes, false);
        assert!(out.contains("LDA# #0x05"));
        assert!(out.contains("BRK"));
        assert!(!out.contains("AA"));
    }

    #[test]
    fn full_mode_dumps_bytes_past_the_brk() {
        let bytes = [Opcode::Brk.byte(), 0x00, 0x68, 0x69, 0x00];
        let out = Disassembler::new().disassemble(&bytes, true);
        assert!(out.contains("68 69 00"));
    }

    #[test]
    fn unassigned_bytes_are_rendered_without_panicking() {
        let bytes = [0x01, 0x02, Opcode::Brk.byte()];
        let out = Disassembler::new().disassemble(&bytes, false);
        assert!(out.contains("??"));
    }
}
