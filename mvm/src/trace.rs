//! Structured execution trace and its human-readable rendering.

use mvm_asm::{Instruction, Register};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effect of one executed instruction, or the fault it raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEntry {
    LoadConst {
        reg: Register,
        value: i64,
    },
    LoadMem {
        reg: Register,
        address: i64,
        value: i64,
    },
    StoreMem {
        reg: Register,
        address: i64,
        value: i64,
    },
    Mod {
        reg: Register,
        address: i64,
        lhs: i64,
        rhs: i64,
        result: i64,
    },
    /// `MOD` with a zero divisor; the register is left unchanged.
    DivisionByZero {
        reg: Register,
        address: i64,
    },
}

impl TraceEntry {
    pub fn is_fault(&self) -> bool {
        matches!(self, TraceEntry::DivisionByZero { .. })
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::LoadConst { reg, value } => write!(f, "LOAD_CONST: {reg} <- {value}"),
            TraceEntry::LoadMem { reg, address, value } => {
                write!(f, "LOAD_MEM: {reg} <- M{address} ({value})")
            }
            TraceEntry::StoreMem { reg, address, value } => {
                write!(f, "STORE_MEM: M{address} <- {reg} ({value})")
            }
            TraceEntry::Mod { reg, lhs, rhs, result, .. } => {
                write!(f, "MOD: {reg} <- {lhs} % {rhs} = {result}")
            }
            TraceEntry::DivisionByZero { reg, address } => {
                write!(f, "Error: division by zero in MOD ({reg} % M{address})")
            }
        }
    }
}

/// One executed instruction: where it was fetched, what it was, what it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub pc: usize,
    pub instruction: Instruction,
    pub entry: TraceEntry,
}

/// Trace entries in execution order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn faults(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(|step| step.entry.is_fault())
    }

    /// One group of rendered lines per executed step.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        self.steps
            .iter()
            .map(|step| vec![step.entry.to_string()])
            .collect()
    }
}
