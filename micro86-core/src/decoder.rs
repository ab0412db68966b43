use thiserror::Error;

use crate::isa::Mnemonic;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown opcode 0x{0:04X}")]
    UnknownOpcode(u16),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Upper 16 bits of an instruction word. Unsigned shift, no sign extension.
pub fn extract_opcode(word: i32) -> u16 {
    ((word as u32) >> 16) as u16
}

/// Lower 16 bits of an instruction word.
pub fn extract_operand(word: i32) -> u16 {
    (word as u32 & 0xFFFF) as u16
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operand: u16,
}

pub fn decode(word: i32) -> Result<Instruction> {
    let opcode = extract_opcode(word);
    let mnemonic = Mnemonic::from_opcode(opcode).ok_or(DecodeError::UnknownOpcode(opcode))?;
    Ok(Instruction {
        mnemonic,
        operand: extract_operand(word),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode;

    #[test]
    fn test_extract_fields() {
        let word = 0x0201_0005;
        assert_eq!(extract_opcode(word), 0x0201);
        assert_eq!(extract_operand(word), 0x0005);
    }

    #[test]
    fn test_no_sign_extension_on_negative_words() {
        let word = 0xFFFF_8001u32 as i32;
        assert_eq!(extract_opcode(word), 0xFFFF);
        assert_eq!(extract_operand(word), 0x8001);
    }

    #[test]
    fn test_fields_partition_the_word() {
        for word in [0, 1, -1, 0x0201_0005, 0x1001_FFFF, i32::MIN, i32::MAX] {
            let packed = ((extract_opcode(word) as u32) << 16) | extract_operand(word) as u32;
            assert_eq!(packed as i32, word);
        }
    }

    #[test]
    fn test_decode_round_trips_every_mnemonic() {
        for mnemonic in Mnemonic::ALL {
            let word = encode(mnemonic, 0x0042);
            let instruction = decode(word).unwrap();
            assert_eq!(instruction.mnemonic, mnemonic);
            assert_eq!(instruction.operand, 0x0042);
        }
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert_eq!(decode(0x0000_0000), Err(DecodeError::UnknownOpcode(0x0000)));
        assert_eq!(decode(0x0203_0010), Err(DecodeError::UnknownOpcode(0x0203)));
    }
}
