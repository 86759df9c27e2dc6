/// VM module - fetch-decode-execute loop over mvm-asm bytecode

mod execution;
mod machine;
mod state;
mod window;

pub use machine::Machine;
pub use state::VMState;
pub use window::ExecutionWindow;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::VmError;
use crate::trace::{Trace, TraceStep};

/// Final state of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub trace: Trace,
    pub machine: Machine,
    pub final_pc: usize,
}

/// The Mini Virtual Machine
pub struct VM {
    // Bytecode stream, addressed by the program counter
    program: Vec<u8>,

    // Registers and data memory, owned for the lifetime of this run
    machine: Machine,

    window: ExecutionWindow,

    // Index of the next instruction's first byte in `program`
    pc: usize,

    state: VMState,

    trace: Trace,
}

impl VM {
    pub fn new(program: Vec<u8>, window: ExecutionWindow) -> Self {
        Self::with_machine(program, window, Machine::new())
    }

    /// Creates a VM over a pre-populated machine state.
    pub fn with_machine(program: Vec<u8>, window: ExecutionWindow, machine: Machine) -> Self {
        let mut vm = VM {
            program,
            machine,
            window,
            pc: window.low(),
            state: VMState::Running,
            trace: Trace::new(),
        };
        if vm.is_finished() {
            vm.state = VMState::Halted;
        }
        vm
    }

    /// Executes one instruction and appends its trace entry.
    pub fn step(&mut self) -> Result<(), VmError> {
        match self.state {
            VMState::Running => {}
            VMState::Halted => return Ok(()),
            VMState::Error(ref e) => return Err(e.clone()),
        }

        let pc = self.pc;
        let (instr, length) = match mvm_asm::decode(&self.program, pc) {
            Ok(decoded) => decoded,
            Err(e) => return Err(self.fail(e.into())),
        };

        if pc + length > self.program.len() {
            warn!(
                "Instruction at pc {} needs {} bytes but only {} remain",
                pc,
                length,
                self.program.len() - pc
            );
        }

        let entry = match self.execute_instruction(&instr) {
            Ok(entry) => entry,
            Err(e) => return Err(self.fail(e)),
        };

        debug!("[{pc:04}] {instr} => {entry}");
        self.trace.push(TraceStep {
            pc,
            instruction: instr,
            entry,
        });

        self.pc += length;
        if self.is_finished() {
            self.state = VMState::Halted;
        }

        Ok(())
    }

    pub fn run(&mut self) -> Result<(), VmError> {
        while matches!(self.state, VMState::Running) {
            self.step()?;
        }
        debug!("Halted at pc {} after {} step(s)", self.pc, self.trace.len());
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.pc >= self.program.len() || self.pc > self.window.high()
    }

    fn fail(&mut self, error: VmError) -> VmError {
        self.state = VMState::Error(error.clone());
        error
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn window(&self) -> ExecutionWindow {
        self.window
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_report(self) -> ExecutionReport {
        ExecutionReport {
            trace: self.trace,
            machine: self.machine,
            final_pc: self.pc,
        }
    }
}

/// Runs `program` to completion inside `window` on a fresh machine.
pub fn execute(program: Vec<u8>, window: ExecutionWindow) -> Result<ExecutionReport, VmError> {
    let mut vm = VM::new(program, window);
    vm.run()?;
    Ok(vm.into_report())
}
