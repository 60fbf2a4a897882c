//! Increment and decrement
//!
//! Memory and accumulator forms step at the accumulator width; the
//! INX/INY/DEX/DEY register forms step at the index width and
//! disassemble as their own bare mnemonics.

use super::Opcode;
use crate::addressing::{AddressBank, AddressMode, RegisterRef};
use crate::cpu::{Cpu, IndexReg};
use crate::timing::{calc_cycles, CycleMod};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOp {
    Inc,
    Dec,
}

impl StepOp {
    const fn mnemonic(self) -> &'static str {
        match self {
            Self::Inc => "INC",
            Self::Dec => "DEC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Step {
    op: StepOp,
    mode: AddressMode,
    mods: Vec<CycleMod>,
    disasm_override: Option<&'static str>,
}

impl Step {
    pub fn from_opcode(op: u8, _cpu: &Cpu) -> Option<Self> {
        use AddressBank::Data;
        use AddressMode::{Absolute, DirectPage, Register};
        use IndexReg::X;
        use RegisterRef::{A, X as RegX, Y as RegY};
        use StepOp::{Dec, Inc};

        let (operation, mode, base, wide, dp_penalty, name) = match op {
            0x1a => (Inc, Register(A), 2, 0, false, None),
            0xee => (Inc, Absolute(Data), 6, 2, false, None),
            0xe6 => (Inc, DirectPage, 5, 2, true, None),
            0xfe => (Inc, AddressMode::indexed(Absolute(Data), X), 7, 2, false, None),
            0xf6 => (Inc, AddressMode::indexed(DirectPage, X), 6, 2, true, None),
            0xe8 => (Inc, Register(RegX), 2, 0, false, Some("INX")),
            0xc8 => (Inc, Register(RegY), 2, 0, false, Some("INY")),
            0x3a => (Dec, Register(A), 2, 0, false, None),
            0xce => (Dec, Absolute(Data), 6, 2, false, None),
            0xc6 => (Dec, DirectPage, 5, 2, true, None),
            0xde => (Dec, AddressMode::indexed(Absolute(Data), X), 7, 2, false, None),
            0xd6 => (Dec, AddressMode::indexed(DirectPage, X), 6, 2, true, None),
            0xca => (Dec, Register(RegX), 2, 0, false, Some("DEX")),
            0x88 => (Dec, Register(RegY), 2, 0, false, Some("DEY")),
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
            disasm_override: name,
        })
    }
}

impl Opcode for Step {
    fn byte_size(&self, cpu: &Cpu) -> u16 {
        self.mode.byte_size(cpu) + 1
    }

    fn total_cycles(&self, cpu: &Cpu) -> crate::timing::Cycles {
        calc_cycles(cpu, &self.mods)
    }

    fn execute(&self, cpu: &mut Cpu) {
        let width = self.mode.value_width(cpu);
        let value = self.mode.fetch(cpu);
        let result = match self.op {
            StepOp::Inc => value.wrapping_add(1) & width.mask(),
            StepOp::Dec => {
                if value == 0 {
                    width.mask()
                } else {
                    (value - 1) & width.mask()
                }
            }
        };
        self.mode.store(cpu, result);
        cpu.update_nz(result, width);
    }

    fn disasm(&self, cpu: &Cpu) -> String {
        match self.disasm_override {
            Some(name) => name.to_string(),
            None => format!("{} {}", self.op.mnemonic(), self.mode.disasm(cpu)),
        }
    }
}
