//! The VM's fixed, closed opcode set.
//!
//! Every mnemonic below is a contract with whatever interprets or
//! disassembles the emitted image (spec'd in full in the external interface
//! table): the byte value, the operand width, and the effect are all fixed
//! points that neither the emitter nor the disassembler is free to deviate
//! from.

/// One VM instruction. Each variant's associated byte value is its encoding
/// in the output image; [`Opcode::operand_width`] says how many operand
/// bytes follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    LdaConst,
    LdaMem,
    Sta,
    Adc,
    LdxConst,
    LdxMem,
    LdyConst,
    LdyMem,
    Cpx,
    Bne,
    Inc,
    Sys,
    Brk,
    Nop,
}

/// How many bytes follow an opcode's byte in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandWidth {
    None,
    Imm8,
    Addr16,
    Rel8,
}

impl Opcode {
    pub const fn byte(self) -> u8 {
        match self {
            Opcode::LdaConst => 0xA9,
            Opcode::LdaMem => 0xAD,
            Opcode::Sta => 0x8D,
            Opcode::Adc => 0x6D,
            Opcode::LdxConst => 0xA2,
            Opcode::LdxMem => 0xAE,
            Opcode::LdyConst => 0xA0,
            Opcode::LdyMem => 0xAC,
            Opcode::Cpx => 0xEC,
            Opcode::Bne => 0xD0,
            Opcode::Inc => 0xEE,
            Opcode::Sys => 0xFF,
            Opcode::Brk => 0x00,
            Opcode::Nop => 0xEA,
        }
    }

    pub const fn operand_width(self) -> OperandWidth {
        match self {
            Opcode::LdaConst | Opcode::LdxConst | Opcode::LdyConst => OperandWidth::Imm8,
            Opcode::LdaMem
            | Opcode::Sta
            | Opcode::Adc
            | Opcode::LdxMem
            | Opcode::LdyMem
            | Opcode::Cpx
            | Opcode::Inc => OperandWidth::Addr16,
            Opcode::Bne => OperandWidth::Rel8,
            Opcode::Sys | Opcode::Brk | Opcode::Nop => OperandWidth::None,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::LdaConst => "LDA#",
            Opcode::LdaMem => "LDA",
            Opcode::Sta => "STA",
            Opcode::Adc => "ADC",
            Opcode::LdxConst => "LDX#",
            Opcode::LdxMem => "LDX",
            Opcode::LdyConst => "LDY#",
            Opcode::LdyMem => "LDY",
            Opcode::Cpx => "CPX",
            Opcode::Bne => "BNE",
            Opcode::Inc => "INC",
            Opcode::Sys => "SYS",
            Opcode::Brk => "BRK",
            Opcode::Nop => "NOP",
        }
    }

    /// The opcode a given byte decodes to, if it names one of the fourteen
    /// reserved values. `Brk` and a stray `0x00` are indistinguishable by
    /// byte value alone, which is intentional: padding zeros after the
    /// image's real `BRK` decode as more `Brk`s rather than as garbage.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0xA9 => Opcode::LdaConst,
            0xAD => Opcode::LdaMem,
            0x8D => Opcode::Sta,
            0x6D => Opcode::Adc,
            0xA2 => Opcode::LdxConst,
            0xAE => Opcode::LdxMem,
            0xA0 => Opcode::LdyConst,
            0xAC => Opcode::LdyMem,
            0xEC => Opcode::Cpx,
            0xD0 => Opcode::Bne,
            0xEE => Opcode::Inc,
            0xFF => Opcode::Sys,
            0x00 => Opcode::Brk,
            0xEA => Opcode::Nop,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_values_match_the_fixed_contract() {
        assert_eq!(Opcode::LdaConst.byte(), 0xA9);
        assert_eq!(Opcode::Sta.byte(), 0x8D);
        assert_eq!(Opcode::Sys.byte(), 0xFF);
        assert_eq!(Opcode::Brk.byte(), 0x00);
    }

    #[test]
    fn from_byte_round_trips_through_byte() {
        for op in [
            Opcode::LdaConst,
            Opcode::LdaMem,
            Opcode::Sta,
            Opcode::Adc,
            Opcode::LdxConst,
            Opcode::LdxMem,
            Opcode::LdyConst,
            Opcode::LdyMem,
            Opcode::Cpx,
            Opcode::Bne,
            Opcode::Inc,
            Opcode::Sys,
            Opcode::Brk,
            Opcode::Nop,
        ] {
            assert_eq!(Opcode::from_byte(op.byte()), Some(op));
        }
    }

    #[test]
    fn unassigned_byte_values_decode_to_none() {
        assert!(Opcode::from_byte(0x01).is_none());
        assert!(Opcode::from_byte(0xFE).is_none());
    }
}
