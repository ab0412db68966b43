use std::fmt::Write;

use micro86_core::{decode, extract_operand, Machine, Mnemonic};

/// One-line register report, all values as 8-digit hex.
pub fn registers_line(machine: &Machine) -> String {
    format!(
        "Registers acc: {:08X} ip: {:08X} zFlag: {:08X} nFlag: {:08X} ir: {:08X}",
        machine.accumulator(),
        machine.instruction_pointer(),
        machine.zero_flag() as i32,
        machine.neg_flag() as i32,
        machine.instruction_register(),
    )
}

/// Disassembly of memory from address 0, stopping after the first HALT.
/// Words that decode to no known instruction are shown raw.
pub fn listing(machine: &Machine) -> String {
    let mut out = String::from("===== Disassembled Code =====\n");
    for (address, &word) in machine.memory().words().iter().enumerate() {
        write!(out, "{:08X}: ", address).unwrap();
        match decode(word) {
            Ok(instruction) if instruction.mnemonic == Mnemonic::Halt => {
                out.push_str("HALT\n...\n");
                break;
            }
            Ok(instruction) => {
                writeln!(
                    out,
                    "{} {:08X}",
                    instruction.mnemonic,
                    extract_operand(word)
                )
                .unwrap();
            }
            Err(_) => writeln!(out, "??? {:08X}", word).unwrap(),
        }
    }
    out
}

pub fn memory_dump(machine: &Machine) -> String {
    let mut out = String::from("---Memory---\n");
    for (address, &word) in machine.memory().words().iter().enumerate() {
        writeln!(out, "{:08X}: {:08X}", address, word).unwrap();
    }
    out.push_str("----------");
    out
}

pub fn post_mortem(machine: &Machine) -> String {
    format!(
        "===== Post-Mortem Dump (normal termination) =====\n\
         --------------------\n{}\n{}",
        registers_line(machine),
        memory_dump(machine),
    )
}
