use thiserror::Error;

use crate::decoder::{decode, extract_operand, DecodeError, Instruction};
use crate::io::{InputPort, IoError, OutputPort};
use crate::isa::{AddressingMode, Mnemonic};
use crate::machine::Machine;
use crate::memory::MemoryError;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("unknown opcode 0x{opcode:04X} at address {address}")]
    UnknownOpcode { opcode: u16, address: usize },
    #[error("division by zero at address {address}")]
    DivisionByZero { address: usize },
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Io(#[from] IoError),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

/// Outcome of one fetch-decode-execute step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Sequential instruction; the pointer advanced by one.
    Continue,
    /// A taken jump replaced the instruction pointer.
    Jumped,
    /// HALT executed; the pointer still addresses the halt word.
    Halted,
}

/// Result of a budgeted run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Halted(u64),
    BudgetExhausted(u64),
}

/// The fetch-execute engine. Owns one machine plus the injected input and
/// output ports the IN/OUT instructions talk to.
pub struct Cpu<I, O> {
    machine: Machine,
    input: I,
    output: O,
}

impl<I: InputPort, O: OutputPort> Cpu<I, O> {
    pub fn new(machine: Machine, input: I, output: O) -> Self {
        Self {
            machine,
            input,
            output,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn into_machine(self) -> Machine {
        self.machine
    }

    /// Executes one instruction: fetch the word at the instruction pointer,
    /// latch it into the instruction register, decode, dispatch. The
    /// pointer advances by one unless the instruction halted or took a
    /// jump.
    pub fn step(&mut self) -> Result<Step> {
        let address = self.machine.instruction_pointer();
        let word = self.machine.memory().load(address)?;
        self.machine.set_instruction_register(word);

        let instruction = match decode(word) {
            Ok(instruction) => instruction,
            Err(DecodeError::UnknownOpcode(opcode)) => {
                return Err(ExecutionError::UnknownOpcode { opcode, address })
            }
        };
        tracing::trace!(
            address,
            mnemonic = %instruction.mnemonic,
            operand = instruction.operand,
            "executing"
        );

        let operand = instruction.operand;
        let outcome = match instruction.mnemonic {
            Mnemonic::Halt => Step::Halted,
            Mnemonic::Load | Mnemonic::Loadi => {
                let value = self.source_value(&instruction)?;
                self.machine.set_accumulator(value);
                Step::Continue
            }
            Mnemonic::Store => {
                let accumulator = self.machine.accumulator();
                self.machine
                    .memory_mut()
                    .store(operand as usize, accumulator)?;
                Step::Continue
            }
            Mnemonic::Add | Mnemonic::Addi => self.arithmetic(&instruction, i32::wrapping_add)?,
            Mnemonic::Sub | Mnemonic::Subi => self.arithmetic(&instruction, i32::wrapping_sub)?,
            Mnemonic::Mul | Mnemonic::Muli => self.arithmetic(&instruction, i32::wrapping_mul)?,
            Mnemonic::Div | Mnemonic::Divi => {
                let value = self.source_value(&instruction)?;
                let quotient = self
                    .machine
                    .accumulator()
                    .checked_div(value)
                    .ok_or(ExecutionError::DivisionByZero { address })?;
                self.machine.set_accumulator(quotient);
                Step::Continue
            }
            Mnemonic::Mod | Mnemonic::Modi => {
                // A zero divisor forces the accumulator to zero; DIV does
                // not share this recovery.
                let value = self.source_value(&instruction)?;
                let remainder = self.machine.accumulator().checked_rem(value).unwrap_or(0);
                self.machine.set_accumulator(remainder);
                Step::Continue
            }
            Mnemonic::Cmp | Mnemonic::Cmpi => {
                let value = self.source_value(&instruction)?;
                let delta = self.machine.accumulator().wrapping_sub(value);
                self.machine.set_flags(delta == 0, delta < 0);
                Step::Continue
            }
            Mnemonic::Jmpi => self.jump(operand)?,
            Mnemonic::Jei => self.jump_if(self.machine.zero_flag(), operand)?,
            Mnemonic::Jnei => self.jump_if(!self.machine.zero_flag(), operand)?,
            Mnemonic::Jli => self.jump_if(self.machine.neg_flag(), operand)?,
            Mnemonic::Jlei => {
                self.jump_if(self.machine.zero_flag() || self.machine.neg_flag(), operand)?
            }
            Mnemonic::Jgi => {
                self.jump_if(!self.machine.zero_flag() && !self.machine.neg_flag(), operand)?
            }
            Mnemonic::Jgei => self.jump_if(!self.machine.neg_flag(), operand)?,
            Mnemonic::In => {
                let value = self.input.read_word()?;
                self.machine.set_accumulator(value);
                Step::Continue
            }
            Mnemonic::Out => {
                let byte = self.machine.accumulator() as u8;
                self.output.write_byte(byte)?;
                Step::Continue
            }
        };

        if let Step::Continue = outcome {
            self.machine.set_instruction_pointer(address + 1)?;
        }
        Ok(outcome)
    }

    /// Runs until HALT, returning the number of steps executed. Unbounded:
    /// a program with no reachable HALT runs forever.
    pub fn run(&mut self) -> Result<u64> {
        let mut steps = 0;
        loop {
            steps += 1;
            if let Step::Halted = self.step()? {
                tracing::debug!(steps, "halted");
                return Ok(steps);
            }
        }
    }

    /// Runs until HALT or until `budget` steps have executed, whichever
    /// comes first.
    pub fn run_for_steps(&mut self, budget: u64) -> Result<RunOutcome> {
        let mut steps = 0;
        while steps < budget {
            steps += 1;
            if let Step::Halted = self.step()? {
                return Ok(RunOutcome::Halted(steps));
            }
        }
        Ok(RunOutcome::BudgetExhausted(steps))
    }

    /// The value an instruction operates on. A memory-addressed source is
    /// the stored word masked through its 16-bit operand field, the
    /// architecture's packed-word quirk.
    fn source_value(&self, instruction: &Instruction) -> Result<i32> {
        match instruction.mnemonic.addressing_mode() {
            AddressingMode::Memory => {
                let word = self.machine.memory().load(instruction.operand as usize)?;
                Ok(extract_operand(word) as i32)
            }
            _ => Ok(instruction.operand as i32),
        }
    }

    fn arithmetic(&mut self, instruction: &Instruction, op: fn(i32, i32) -> i32) -> Result<Step> {
        let value = self.source_value(instruction)?;
        let result = op(self.machine.accumulator(), value);
        self.machine.set_accumulator(result);
        Ok(Step::Continue)
    }

    /// Taken jump: the instruction register is refreshed from the target
    /// word and the trailing pointer increment is skipped.
    fn jump(&mut self, target: u16) -> Result<Step> {
        let target = target as usize;
        let word = self.machine.memory().load(target)?;
        self.machine.set_instruction_pointer(target)?;
        self.machine.set_instruction_register(word);
        Ok(Step::Jumped)
    }

    fn jump_if(&mut self, condition: bool, target: u16) -> Result<Step> {
        if condition {
            self.jump(target)
        } else {
            Ok(Step::Continue)
        }
    }
}
