//! ASL, LSR, ROL and ROR
//!
//! The family decodes by bit pattern: bits 1..5 select the addressing
//! mode group, the high nibble the operation. All member opcodes are
//! even and below `0x80`.

use super::Opcode;
use crate::addressing::{AddressBank, AddressMode, RegisterRef};
use crate::cpu::{Cpu, IndexReg, Status, WidthMode};
use crate::flags::{rotate, RotateDirection};
use crate::timing::{calc_cycles, CycleMod};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Asl,
    Lsr,
    Rol,
    Ror,
}

impl ShiftOp {
    const fn mnemonic(self) -> &'static str {
        match self {
            Self::Asl => "ASL",
            Self::Lsr => "LSR",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
        }
    }

    const fn direction(self) -> RotateDirection {
        match self {
            Self::Asl | Self::Rol => RotateDirection::Left,
            Self::Lsr | Self::Ror => RotateDirection::Right,
        }
    }

    /// ROL and ROR feed the carry flag back into the vacated bit
    const fn rotates_carry(self) -> bool {
        matches!(self, Self::Rol | Self::Ror)
    }
}

#[derive(Debug, Clone)]
pub struct Shift {
    op: ShiftOp,
    mode: AddressMode,
    mods: Vec<CycleMod>,
}

impl Shift {
    pub fn from_opcode(op: u8, _cpu: &Cpu) -> Option<Self> {
        use AddressBank::Data;
        use AddressMode::{Absolute, DirectPage, Register};
        use IndexReg::X;

        if op & 0x01 != 0 || op >= 0x80 {
            return None;
        }
        let operation = match op >> 5 {
            0 => ShiftOp::Asl,
            1 => ShiftOp::Rol,
            2 => ShiftOp::Lsr,
            3 => ShiftOp::Ror,
            _ => unreachable!(),
        };
        let (mode, base, wide, dp_penalty) = match op & 0x1e {
            0x1e => (AddressMode::indexed(Absolute(Data), X), 7, 2, false),
            0x0e => (Absolute(Data), 6, 2, false),
            0x0a => (Register(RegisterRef::A), 2, 0, false),
            0x16 => (AddressMode::indexed(DirectPage, X), 6, 1, true),
            0x06 => (DirectPage, 5, 1, true),
            _ => return None,
        };
        let mut mods = vec![CycleMod::Constant(base)];
        if wide > 0 {
            mods.push(CycleMod::AccIs16Bit(wide));
        }
        if dp_penalty {
            mods.push(CycleMod::LowDirectPageIsNotZero(1));
        }
        Some(Self {
            op: operation,
            mode,
            mods,
        })
    }
}

impl Opcode for Shift {
    fn byte_size(&self, cpu: &Cpu) -> u16 {
        self.mode.byte_size(cpu) + 1
    }

    fn total_cycles(&self, cpu: &Cpu) -> crate::timing::Cycles {
        calc_cycles(cpu, &self.mods)
    }

    fn execute(&self, cpu: &mut Cpu) {
        let width = cpu.acc_width();
        let value = self.mode.fetch(cpu);
        let direction = self.op.direction();
        let (shifted, bit_out) = rotate(value, width, direction);
        let carry_in = self.op.rotates_carry() && cpu.regs.status.has(Status::CARRY);
        let filler = match (carry_in, direction, width) {
            (false, ..) => 0,
            (true, RotateDirection::Left, _) => 0x0001,
            (true, RotateDirection::Right, WidthMode::Bit8) => 0x0080,
            (true, RotateDirection::Right, WidthMode::Bit16) => 0x8000,
        };
        let result = shifted | filler;
        self.mode.store(cpu, result);
        cpu.update_nz(result, width);
        cpu.regs.status.set_if(Status::CARRY, bit_out);
    }

    fn disasm(&self, cpu: &Cpu) -> String {
        format!("{} {}", self.op.mnemonic(), self.mode.disasm(cpu))
    }
}
