//! BIT, TRB and TSB bit tests
//!
//! All three share the zero check against `acc & data`. BIT copies the
//! top two bits of the fetched value into N and V; TRB and TSB rewrite
//! the operand with the accumulator bits cleared or set.

use super::{cycles_with_boundary, Opcode};
use crate::addressing::{AddressBank, AddressMode};
use crate::cpu::{Cpu, IndexReg, Status};
use crate::flags::check_flags_for_value;
use crate::timing::CycleMod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    Bit,
    Trb,
    Tsb,
}

impl BitOp {
    const fn mnemonic(self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::Trb => "TRB",
            Self::Tsb => "TSB",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BitTest {
    op: BitOp,
    mode: AddressMode,
    mods: Vec<CycleMod>,
    pre_index: Option<(AddressMode, IndexReg)>,
}

impl BitTest {
    pub fn from_opcode(op: u8, _cpu: &Cpu) -> Option<Self> {
        use AddressBank::Data;
        use AddressMode::{Absolute, DirectPage, Immediate};
        use BitOp::{Bit, Trb, Tsb};
        use IndexReg::X;

        let (operation, mode, base, wide, dp_penalty, pre_index) = match op {
            0x89 => (Bit, Immediate, 2, 1, false, None),
            0x2c => (Bit, Absolute(Data), 4, 1, false, None),
            0x24 => (Bit, DirectPage, 3, 1, true, None),
            0x3c => (
                Bit,
                AddressMode::indexed(Absolute(Data), X),
                4,
                1,
                false,
                Some((Absolute(Data), X)),
            ),
            0x34 => (Bit, AddressMode::indexed(DirectPage, X), 4, 1, true, None),
            0x1c => (Trb, Absolute(Data), 6, 2, false, None),
            0x14 => (Trb, DirectPage, 5, 2, true, None),
            0x0c => (Tsb, Absolute(Data), 6, 2, false, None),
            0x04 => (Tsb, DirectPage, 5, 2, true, None),
            _ => return None,
        };
        let mut mods = vec![CycleMod::Constant(base), CycleMod::AccIs16Bit(wide)];
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

impl Opcode for BitTest {
    fn byte_size(&self, cpu: &Cpu) -> u16 {
        self.mode.byte_size(cpu) + 1
    }

    fn total_cycles(&self, cpu: &Cpu) -> crate::timing::Cycles {
        cycles_with_boundary(cpu, &self.mods, self.pre_index.as_ref())
    }

    fn execute(&self, cpu: &mut Cpu) {
        let width = cpu.acc_width();
        let data = self.mode.fetch(cpu);
        let acc = cpu.acc();
        match self.op {
            BitOp::Bit => {
                let check = check_flags_for_value(data, width);
                cpu.regs.status.set_if(Status::NEGATIVE, check.negative);
                cpu.regs.status.set_if(Status::OVERFLOW, check.overflow);
            }
            BitOp::Trb => self.mode.store(cpu, acc & (!data & width.mask())),
            BitOp::Tsb => self.mode.store(cpu, acc | data),
        }
        cpu.regs.status.set_if(Status::ZERO, acc & data == 0);
    }

    fn disasm(&self, cpu: &Cpu) -> String {
        format!("{} {}", self.op.mnemonic(), self.mode.disasm(cpu))
    }
}
