use crate::memory::{self, Memory, MEMORY_WORDS};

/// The complete register file and memory of one emulator instance. One
/// owned value per run; nothing is process-wide.
#[derive(Clone, Debug, Default)]
pub struct Machine {
    accumulator: i32,
    instruction_pointer: usize,
    instruction_register: i32,
    zero_flag: bool,
    neg_flag: bool,
    memory: Memory<MEMORY_WORDS>,
}

impl Machine {
    /// A machine in the post-boot state: registers and flags zeroed, memory
    /// zero-filled, no program loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every register and flag and zero-fills memory. Does not load
    /// a program and performs no I/O.
    pub fn boot(&mut self) {
        self.accumulator = 0;
        self.instruction_pointer = 0;
        self.instruction_register = 0;
        self.zero_flag = false;
        self.neg_flag = false;
        self.memory.clear();
    }

    pub fn load_image(&mut self, image: &[i32]) -> memory::Result<()> {
        self.memory.load_image(image)
    }

    pub fn accumulator(&self) -> i32 {
        self.accumulator
    }

    pub fn set_accumulator(&mut self, value: i32) {
        self.accumulator = value;
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn set_instruction_pointer(&mut self, address: usize) -> memory::Result<()> {
        if address >= self.memory.size() {
            return Err(crate::memory::MemoryError::OutOfBounds {
                address,
                size: self.memory.size(),
            });
        }
        self.instruction_pointer = address;
        Ok(())
    }

    pub fn instruction_register(&self) -> i32 {
        self.instruction_register
    }

    pub fn set_instruction_register(&mut self, word: i32) {
        self.instruction_register = word;
    }

    pub fn zero_flag(&self) -> bool {
        self.zero_flag
    }

    pub fn neg_flag(&self) -> bool {
        self.neg_flag
    }

    pub fn set_flags(&mut self, zero: bool, neg: bool) {
        self.zero_flag = zero;
        self.neg_flag = neg;
    }

    pub fn memory(&self) -> &Memory<MEMORY_WORDS> {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory<MEMORY_WORDS> {
        &mut self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_machine_is_zeroed() {
        let machine = Machine::new();
        assert_eq!(machine.accumulator(), 0);
        assert_eq!(machine.instruction_pointer(), 0);
        assert_eq!(machine.instruction_register(), 0);
        assert!(!machine.zero_flag());
        assert!(!machine.neg_flag());
        assert!(machine.memory().words().iter().all(|&word| word == 0));
    }

    #[test]
    fn test_boot_resets_everything() {
        let mut machine = Machine::new();
        machine.set_accumulator(42);
        machine.set_instruction_pointer(7).unwrap();
        machine.set_instruction_register(0x0100_0000);
        machine.set_flags(true, false);
        machine.memory_mut().store(3, 99).unwrap();

        machine.boot();

        assert_eq!(machine.accumulator(), 0);
        assert_eq!(machine.instruction_pointer(), 0);
        assert_eq!(machine.instruction_register(), 0);
        assert!(!machine.zero_flag());
        assert!(!machine.neg_flag());
        assert_eq!(machine.memory().load(3), Ok(0));
    }

    #[test]
    fn test_instruction_pointer_is_bounds_checked() {
        let mut machine = Machine::new();
        assert!(machine.set_instruction_pointer(59).is_ok());
        assert!(machine.set_instruction_pointer(60).is_err());
    }
}
