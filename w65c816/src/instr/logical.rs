//! ORA and AND, the accumulator logical operations
//!
//! The two mnemonics cover the same fifteen addressing modes; an AND
//! opcode is its ORA counterpart with bit 5 set, so decoding works on
//! the byte with that bit cleared.

use super::{cycles_with_boundary, Opcode};
use crate::addressing::{AddressBank, AddressMode};
use crate::cpu::{Cpu, IndexReg};
use crate::timing::CycleMod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    Ora,
    And,
}

impl LogicalOp {
    const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ora => "ORA",
            Self::And => "AND",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Logical {
    op: LogicalOp,
    mode: AddressMode,
    mods: Vec<CycleMod>,
    pre_index: Option<(AddressMode, IndexReg)>,
}

impl Logical {
    pub fn from_opcode(op: u8, _cpu: &Cpu) -> Option<Self> {
        use AddressBank::{Data, Long};
        use AddressMode::{Absolute, DirectPage, Immediate, StackRelative};
        use IndexReg::{X, Y};

        if op >= 0x40 {
            return None;
        }
        let operation = if op & 0x20 == 0 {
            LogicalOp::Ora
        } else {
            LogicalOp::And
        };
        let (mode, base, dp_penalty, pre_index) = match op & !0x20 {
            0x09 => (Immediate, 2, false, None),
            0x0d => (Absolute(Data), 4, false, None),
            0x0f => (Absolute(Long), 5, false, None),
            0x05 => (DirectPage, 3, true, None),
            0x12 => (AddressMode::indirect(DirectPage, Data), 5, true, None),
            0x07 => (AddressMode::indirect(DirectPage, Long), 6, true, None),
            0x1d => (
                AddressMode::indexed(Absolute(Data), X),
                4,
                false,
                Some((Absolute(Data), X)),
            ),
            0x1f => (AddressMode::indexed(Absolute(Long), X), 5, false, None),
            0x19 => (
                AddressMode::indexed(Absolute(Data), Y),
                4,
                false,
                Some((Absolute(Data), Y)),
            ),
            0x15 => (AddressMode::indexed(DirectPage, X), 4, true, None),
            0x01 => (
                AddressMode::indirect(AddressMode::indexed(DirectPage, X), Data),
                6,
                true,
                None,
            ),
            0x11 => (
                AddressMode::indexed(AddressMode::indirect(DirectPage, Data), Y),
                5,
                true,
                None,
            ),
            0x17 => (
                AddressMode::indexed(AddressMode::indirect(DirectPage, Long), Y),
                6,
                true,
                None,
            ),
            0x03 => (StackRelative, 4, false, None),
            0x13 => (
                AddressMode::indexed(AddressMode::indirect(StackRelative, Data), Y),
                7,
                false,
                None,
            ),
            _ => return None,
        };
        let mut mods = vec![CycleMod::Constant(base), CycleMod::AccIs16Bit(1)];
        if dp_penalty {
            mods.push(CycleMod::LowDirectPageIsNotZero(1));
        }
        Some(Self {
            op: operation,
            mode,
            mods,
            pre_index,
        })
    }
}

impl Opcode for Logical {
    fn byte_size(&self, cpu: &Cpu) -> u16 {
        self.mode.byte_size(cpu) + 1
    }

    fn total_cycles(&self, cpu: &Cpu) -> crate::timing::Cycles {
        cycles_with_boundary(cpu, &self.mods, self.pre_index.as_ref())
    }

    fn execute(&self, cpu: &mut Cpu) {
        let data = self.mode.fetch(cpu);
        let result = match self.op {
            LogicalOp::Ora => cpu.acc() | data,
            LogicalOp::And => cpu.acc() & data,
        };
        let width = cpu.acc_width();
        cpu.set_acc(result);
        cpu.update_nz(result, width);
    }

    fn disasm(&self, cpu: &Cpu) -> String {
        format!("{} {}", self.op.mnemonic(), self.mode.disasm(cpu))
    }
}
