use log::warn;
use mvm_asm::{Instruction, Opcode};

use super::VM;
use crate::error::VmError;
use crate::trace::TraceEntry;

impl VM {
    pub(super) fn execute_instruction(&mut self, instr: &Instruction) -> Result<TraceEntry, VmError> {
        let reg = instr.reg;
        let operand = instr.operand as i64;

        let entry = match instr.opcode {
            Opcode::LoadConst => {
                self.machine.write_register(reg, operand);
                TraceEntry::LoadConst { reg, value: operand }
            }
            Opcode::LoadMem => {
                let value = self.machine.read_memory(operand, &self.window)?;
                self.machine.write_register(reg, value);
                TraceEntry::LoadMem { reg, address: operand, value }
            }
            Opcode::StoreMem => {
                let value = self.machine.read_register(reg);
                self.machine.write_memory(operand, &self.window, value)?;
                TraceEntry::StoreMem { reg, address: operand, value }
            }
            Opcode::Mod => {
                let lhs = self.machine.read_register(reg);
                let rhs = self.machine.read_memory(operand, &self.window)?;
                if rhs == 0 {
                    warn!("Division by zero in MOD ({} % M{}) at pc {}", reg, operand, self.pc);
                    TraceEntry::DivisionByZero { reg, address: operand }
                } else {
                    let result = lhs.wrapping_rem(rhs);
                    self.machine.write_register(reg, result);
                    TraceEntry::Mod { reg, address: operand, lhs, rhs, result }
                }
            }
        };

        Ok(entry)
    }
}
