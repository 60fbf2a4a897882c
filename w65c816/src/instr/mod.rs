//! Instruction decoding and execution
//!
//! Each opcode family decodes from a single opcode byte and exposes
//! the same protocol: byte size, total cycle cost, execution and
//! disassembly. A family that does not recognize the byte yields
//! `None`, and [`Instruction::from_opcode`] tries them in turn; a byte
//! no family claims is left to the caller (the pipeline may treat it
//! as a one-byte no-op or report it).

pub mod bit;
pub mod logical;
pub mod shift;
pub mod status;
pub mod step;

pub use bit::BitTest;
pub use logical::Logical;
pub use shift::Shift;
pub use status::StatusControl;
pub use step::Step;

use crate::addressing::AddressMode;
use crate::cpu::{Cpu, IndexReg};
use crate::timing::{calc_cycles, CycleMod, Cycles};

/// Uniform operations every decoded opcode exposes
pub trait Opcode {
    /// Total instruction length in bytes, the opcode byte included
    fn byte_size(&self, cpu: &Cpu) -> u16;

    /// Cycle cost under the current CPU state
    fn total_cycles(&self, cpu: &Cpu) -> Cycles;

    /// Run the instruction. The program counter is left untouched;
    /// sequencing belongs to the caller, which advances it by
    /// [`Opcode::byte_size`].
    fn execute(&self, cpu: &mut Cpu);

    /// Mnemonic plus operand text
    fn disasm(&self, cpu: &Cpu) -> String;
}

/// Sum the modifier list, prepending the page-crossing penalty of a
/// pre-indexed base mode where the family carries one.
fn cycles_with_boundary(
    cpu: &Cpu,
    mods: &[CycleMod],
    pre_index: Option<&(AddressMode, IndexReg)>,
) -> Cycles {
    match pre_index {
        Some((mode, reg)) => {
            let mut all = Vec::with_capacity(mods.len() + 1);
            all.push(CycleMod::CheckPageBoundary {
                cycles: 1,
                initial: mode.address(cpu),
                index: *reg,
            });
            all.extend_from_slice(mods);
            calc_cycles(cpu, &all)
        }
        None => calc_cycles(cpu, mods),
    }
}

/// A decoded instruction of any implemented family
#[derive(Debug, Clone)]
pub enum Instruction {
    Logical(Logical),
    BitTest(BitTest),
    Shift(Shift),
    Step(Step),
    StatusControl(StatusControl),
}

impl Instruction {
    /// Decode an opcode byte under the current CPU context
    pub fn from_opcode(op: u8, cpu: &Cpu) -> Option<Self> {
        Logical::from_opcode(op, cpu)
            .map(Self::Logical)
            .or_else(|| BitTest::from_opcode(op, cpu).map(Self::BitTest))
            .or_else(|| Shift::from_opcode(op, cpu).map(Self::Shift))
            .or_else(|| Step::from_opcode(op, cpu).map(Self::Step))
            .or_else(|| StatusControl::from_opcode(op, cpu).map(Self::StatusControl))
    }

    /// Decode the byte at the effective program counter
    pub fn decode(cpu: &Cpu) -> Option<Self> {
        Self::from_opcode(cpu.memory.read_byte(cpu.effective_pc()), cpu)
    }
}

impl Opcode for Instruction {
    fn byte_size(&self, cpu: &Cpu) -> u16 {
        match self {
            Self::Logical(i) => i.byte_size(cpu),
            Self::BitTest(i) => i.byte_size(cpu),
            Self::Shift(i) => i.byte_size(cpu),
            Self::Step(i) => i.byte_size(cpu),
            Self::StatusControl(i) => i.byte_size(cpu),
        }
    }

    fn total_cycles(&self, cpu: &Cpu) -> Cycles {
        match self {
            Self::Logical(i) => i.total_cycles(cpu),
            Self::BitTest(i) => i.total_cycles(cpu),
            Self::Shift(i) => i.total_cycles(cpu),
            Self::Step(i) => i.total_cycles(cpu),
            Self::StatusControl(i) => i.total_cycles(cpu),
        }
    }

    fn execute(&self, cpu: &mut Cpu) {
        match self {
            Self::Logical(i) => i.execute(cpu),
            Self::BitTest(i) => i.execute(cpu),
            Self::Shift(i) => i.execute(cpu),
            Self::Step(i) => i.execute(cpu),
            Self::StatusControl(i) => i.execute(cpu),
        }
    }

    fn disasm(&self, cpu: &Cpu) -> String {
        match self {
            Self::Logical(i) => i.disasm(cpu),
            Self::BitTest(i) => i.disasm(cpu),
            Self::Shift(i) => i.disasm(cpu),
            Self::Step(i) => i.disasm(cpu),
            Self::StatusControl(i) => i.disasm(cpu),
        }
    }
}
