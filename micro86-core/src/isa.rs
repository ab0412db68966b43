use std::fmt;

/// How an instruction interprets its 16-bit operand field. The reference
/// architecture encodes the mode in the low byte of the opcode (0x00 none,
/// 0x01 immediate, 0x02 memory).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    None,
    Immediate,
    Memory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Halt,  // 0x0100
    Load,  // 0x0202
    Loadi, // 0x0201
    Store, // 0x0302
    Add,   // 0x0402
    Addi,  // 0x0401
    Sub,   // 0x0502
    Subi,  // 0x0501
    Mul,   // 0x0602
    Muli,  // 0x0601
    Div,   // 0x0702
    Divi,  // 0x0701
    Mod,   // 0x0802
    Modi,  // 0x0801
    Cmp,   // 0x0902
    Cmpi,  // 0x0901
    Jmpi,  // 0x0A01
    Jei,   // 0x0B01
    Jnei,  // 0x0C01
    Jli,   // 0x0D01
    Jlei,  // 0x0E01
    Jgi,   // 0x0F01
    Jgei,  // 0x1001
    In,    // 0x1100
    Out,   // 0x1200
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 25] = [
        Mnemonic::Halt,
        Mnemonic::Load,
        Mnemonic::Loadi,
        Mnemonic::Store,
        Mnemonic::Add,
        Mnemonic::Addi,
        Mnemonic::Sub,
        Mnemonic::Subi,
        Mnemonic::Mul,
        Mnemonic::Muli,
        Mnemonic::Div,
        Mnemonic::Divi,
        Mnemonic::Mod,
        Mnemonic::Modi,
        Mnemonic::Cmp,
        Mnemonic::Cmpi,
        Mnemonic::Jmpi,
        Mnemonic::Jei,
        Mnemonic::Jnei,
        Mnemonic::Jli,
        Mnemonic::Jlei,
        Mnemonic::Jgi,
        Mnemonic::Jgei,
        Mnemonic::In,
        Mnemonic::Out,
    ];

    pub const fn opcode(self) -> u16 {
        match self {
            Mnemonic::Halt => 0x0100,
            Mnemonic::Load => 0x0202,
            Mnemonic::Loadi => 0x0201,
            Mnemonic::Store => 0x0302,
            Mnemonic::Add => 0x0402,
            Mnemonic::Addi => 0x0401,
            Mnemonic::Sub => 0x0502,
            Mnemonic::Subi => 0x0501,
            Mnemonic::Mul => 0x0602,
            Mnemonic::Muli => 0x0601,
            Mnemonic::Div => 0x0702,
            Mnemonic::Divi => 0x0701,
            Mnemonic::Mod => 0x0802,
            Mnemonic::Modi => 0x0801,
            Mnemonic::Cmp => 0x0902,
            Mnemonic::Cmpi => 0x0901,
            Mnemonic::Jmpi => 0x0A01,
            Mnemonic::Jei => 0x0B01,
            Mnemonic::Jnei => 0x0C01,
            Mnemonic::Jli => 0x0D01,
            Mnemonic::Jlei => 0x0E01,
            Mnemonic::Jgi => 0x0F01,
            Mnemonic::Jgei => 0x1001,
            Mnemonic::In => 0x1100,
            Mnemonic::Out => 0x1200,
        }
    }

    pub const fn addressing_mode(self) -> AddressingMode {
        match self.opcode() & 0x00FF {
            0x01 => AddressingMode::Immediate,
            0x02 => AddressingMode::Memory,
            _ => AddressingMode::None,
        }
    }

    pub fn from_opcode(opcode: u16) -> Option<Mnemonic> {
        let mnemonic = match opcode {
            0x0100 => Mnemonic::Halt,
            0x0202 => Mnemonic::Load,
            0x0201 => Mnemonic::Loadi,
            0x0302 => Mnemonic::Store,
            0x0402 => Mnemonic::Add,
            0x0401 => Mnemonic::Addi,
            0x0502 => Mnemonic::Sub,
            0x0501 => Mnemonic::Subi,
            0x0602 => Mnemonic::Mul,
            0x0601 => Mnemonic::Muli,
            0x0702 => Mnemonic::Div,
            0x0701 => Mnemonic::Divi,
            0x0802 => Mnemonic::Mod,
            0x0801 => Mnemonic::Modi,
            0x0902 => Mnemonic::Cmp,
            0x0901 => Mnemonic::Cmpi,
            0x0A01 => Mnemonic::Jmpi,
            0x0B01 => Mnemonic::Jei,
            0x0C01 => Mnemonic::Jnei,
            0x0D01 => Mnemonic::Jli,
            0x0E01 => Mnemonic::Jlei,
            0x0F01 => Mnemonic::Jgi,
            0x1001 => Mnemonic::Jgei,
            0x1100 => Mnemonic::In,
            0x1200 => Mnemonic::Out,
            _ => return None,
        };
        Some(mnemonic)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mnemonic::Halt => "HALT",
            Mnemonic::Load => "LOAD",
            Mnemonic::Loadi => "LOADI",
            Mnemonic::Store => "STORE",
            Mnemonic::Add => "ADD",
            Mnemonic::Addi => "ADDI",
            Mnemonic::Sub => "SUB",
            Mnemonic::Subi => "SUBI",
            Mnemonic::Mul => "MUL",
            Mnemonic::Muli => "MULI",
            Mnemonic::Div => "DIV",
            Mnemonic::Divi => "DIVI",
            Mnemonic::Mod => "MOD",
            Mnemonic::Modi => "MODI",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cmpi => "CMPI",
            Mnemonic::Jmpi => "JMPI",
            Mnemonic::Jei => "JEI",
            Mnemonic::Jnei => "JNEI",
            Mnemonic::Jli => "JLI",
            Mnemonic::Jlei => "JLEI",
            Mnemonic::Jgi => "JGI",
            Mnemonic::Jgei => "JGEI",
            Mnemonic::In => "IN",
            Mnemonic::Out => "OUT",
        };
        f.write_str(name)
    }
}

/// Packs a mnemonic and operand into a 32-bit instruction word: opcode in
/// the upper 16 bits, operand in the lower 16.
pub fn encode(mnemonic: Mnemonic, operand: u16) -> i32 {
    (((mnemonic.opcode() as u32) << 16) | operand as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_lookup_round_trips() {
        for mnemonic in Mnemonic::ALL {
            assert_eq!(Mnemonic::from_opcode(mnemonic.opcode()), Some(mnemonic));
        }
    }

    #[test]
    fn test_unknown_opcodes() {
        assert_eq!(Mnemonic::from_opcode(0x0000), None);
        assert_eq!(Mnemonic::from_opcode(0x0101), None);
        assert_eq!(Mnemonic::from_opcode(0x0203), None);
        assert_eq!(Mnemonic::from_opcode(0xFFFF), None);
    }

    #[test]
    fn test_addressing_modes() {
        assert_eq!(Mnemonic::Halt.addressing_mode(), AddressingMode::None);
        assert_eq!(Mnemonic::In.addressing_mode(), AddressingMode::None);
        assert_eq!(Mnemonic::Out.addressing_mode(), AddressingMode::None);
        assert_eq!(Mnemonic::Loadi.addressing_mode(), AddressingMode::Immediate);
        assert_eq!(Mnemonic::Jmpi.addressing_mode(), AddressingMode::Immediate);
        assert_eq!(Mnemonic::Load.addressing_mode(), AddressingMode::Memory);
        assert_eq!(Mnemonic::Cmp.addressing_mode(), AddressingMode::Memory);
    }

    #[test]
    fn test_encode_packs_fields() {
        assert_eq!(encode(Mnemonic::Loadi, 0x0005), 0x0201_0005);
        assert_eq!(encode(Mnemonic::Halt, 0x0000), 0x0100_0000);
        assert_eq!(encode(Mnemonic::Store, 0xFFFF), 0x0302_FFFF);
    }
}
