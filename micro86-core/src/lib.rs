mod cpu;
mod decoder;
mod io;
mod isa;
mod machine;
mod memory;

pub use crate::cpu::{Cpu, ExecutionError, RunOutcome, Step};
pub use crate::decoder::{decode, extract_opcode, extract_operand, DecodeError, Instruction};
pub use crate::io::{BufferInput, BufferOutput, InputPort, IoError, OutputPort, StdInput, StdOutput};
pub use crate::isa::{encode, AddressingMode, Mnemonic};
pub use crate::machine::Machine;
pub use crate::memory::{Memory, MemoryError, MEMORY_WORDS};
