use mvm_asm::Register;
use serde::{Deserialize, Serialize};

use super::window::ExecutionWindow;
use crate::constants::{MEMORY_SIZE, REGISTER_COUNT};
use crate::error::VmError;

/// Register file and data memory for one execution run.
///
/// The register file has [`REGISTER_COUNT`] slots, but instructions can only
/// name R0-R7, so slots 8 and above always read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    registers: [i64; REGISTER_COUNT],
    memory: Vec<i64>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            memory: vec![0; MEMORY_SIZE],
        }
    }

    pub fn read_register(&self, reg: Register) -> i64 {
        self.registers[reg.index()]
    }

    pub fn write_register(&mut self, reg: Register, value: i64) {
        self.registers[reg.index()] = value;
    }

    pub fn read_memory(&self, address: i64, window: &ExecutionWindow) -> Result<i64, VmError> {
        let cell = self.check_address(address, window)?;
        Ok(self.memory[cell])
    }

    pub fn write_memory(
        &mut self,
        address: i64,
        window: &ExecutionWindow,
        value: i64,
    ) -> Result<(), VmError> {
        let cell = self.check_address(address, window)?;
        self.memory[cell] = value;
        Ok(())
    }

    /// Checks `address` against the window and against physical memory.
    fn check_address(&self, address: i64, window: &ExecutionWindow) -> Result<usize, VmError> {
        let out_of_bounds = || VmError::OutOfBounds {
            address,
            low: window.low(),
            high: window.high(),
        };

        if !window.contains(address) {
            return Err(out_of_bounds());
        }
        usize::try_from(address)
            .ok()
            .filter(|&cell| cell < self.memory.len())
            .ok_or_else(out_of_bounds)
    }

    pub fn registers(&self) -> &[i64] {
        &self.registers
    }

    pub fn memory(&self) -> &[i64] {
        &self.memory
    }
}
