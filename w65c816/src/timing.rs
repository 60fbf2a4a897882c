//! Cycle cost calculation
//!
//! Each decoded instruction carries a list of cycle modifiers; the
//! total cost is the sum of the deltas whose predicate holds against
//! the current CPU. Page-boundary modifiers carry the pre-indexed
//! address by value, so they can be built once at decode time.

use crate::cpu::{Cpu, IndexReg, WidthMode};

pub type Cycles = u32;

/// A conditional cycle delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMod {
    /// Unconditional base cost
    Constant(i32),
    /// Applies while the accumulator is 16 bits wide
    AccIs16Bit(i32),
    /// Applies while the index registers are 16 bits wide
    IndexIs16Bit(i32),
    /// Applies outside 6502 emulation mode
    NativeMode(i32),
    /// Applies when the direct page register is not page-aligned
    LowDirectPageIsNotZero(i32),
    /// Applies when displacing `initial` by the index register leaves
    /// its 256-byte page
    CheckPageBoundary {
        cycles: i32,
        initial: u32,
        index: IndexReg,
    },
    /// Applies in emulation mode when the two addresses sit in
    /// different pages
    CheckPageBoundaryAndEmulationMode {
        cycles: i32,
        initial: u32,
        new: u32,
    },
}

impl CycleMod {
    pub const fn cycles(&self) -> i32 {
        match *self {
            Self::Constant(n)
            | Self::AccIs16Bit(n)
            | Self::IndexIs16Bit(n)
            | Self::NativeMode(n)
            | Self::LowDirectPageIsNotZero(n)
            | Self::CheckPageBoundary { cycles: n, .. }
            | Self::CheckPageBoundaryAndEmulationMode { cycles: n, .. } => n,
        }
    }

    pub fn applies(&self, cpu: &Cpu) -> bool {
        match *self {
            Self::Constant(_) => true,
            Self::AccIs16Bit(_) => cpu.acc_width() == WidthMode::Bit16,
            Self::IndexIs16Bit(_) => cpu.index_width() == WidthMode::Bit16,
            Self::NativeMode(_) => !cpu.regs.is_emulation,
            Self::LowDirectPageIsNotZero(_) => cpu.regs.dp & 0xff != 0,
            Self::CheckPageBoundary { initial, index, .. } => {
                let displaced = initial.wrapping_add(cpu.index(index).into()) & 0xff_ffff;
                initial & 0xff_ff00 != displaced & 0xff_ff00
            }
            Self::CheckPageBoundaryAndEmulationMode { initial, new, .. } => {
                cpu.regs.is_emulation && initial & 0xff_ff00 != new & 0xff_ff00
            }
        }
    }
}

/// Sum the applicable modifiers
pub fn calc_cycles(cpu: &Cpu, mods: &[CycleMod]) -> Cycles {
    let total: i32 = mods
        .iter()
        .filter(|m| m.applies(cpu))
        .map(CycleMod::cycles)
        .sum();
    total.max(0) as Cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Status;
    use crate::memory::Memory;

    fn cpu() -> Cpu {
        let mut cpu = Cpu::new(Memory::new(vec![0; 0x100]));
        cpu.regs.is_emulation = false;
        cpu.regs.status = Status(0);
        cpu
    }

    #[test]
    fn constant_always_applies() {
        let cpu = cpu();
        assert_eq!(calc_cycles(&cpu, &[CycleMod::Constant(4)]), 4);
    }

    #[test]
    fn width_mods_follow_the_status_bits() {
        let mut cpu = cpu();
        let mods = [
            CycleMod::Constant(2),
            CycleMod::AccIs16Bit(1),
            CycleMod::IndexIs16Bit(1),
        ];
        assert_eq!(calc_cycles(&cpu, &mods), 4);
        cpu.regs.status |= Status::ACC_SIZE;
        assert_eq!(calc_cycles(&cpu, &mods), 3);
        cpu.regs.is_emulation = true;
        assert_eq!(calc_cycles(&cpu, &mods), 2);
    }

    #[test]
    fn native_mode_mod() {
        let mut cpu = cpu();
        assert_eq!(calc_cycles(&cpu, &[CycleMod::NativeMode(1)]), 1);
        cpu.regs.is_emulation = true;
        assert_eq!(calc_cycles(&cpu, &[CycleMod::NativeMode(1)]), 0);
    }

    #[test]
    fn low_direct_page_mod() {
        let mut cpu = cpu();
        cpu.regs.dp = 0x0100;
        assert_eq!(calc_cycles(&cpu, &[CycleMod::LowDirectPageIsNotZero(1)]), 0);
        cpu.regs.dp = 0x0101;
        assert_eq!(calc_cycles(&cpu, &[CycleMod::LowDirectPageIsNotZero(1)]), 1);
    }

    #[test]
    fn page_boundary_mod_uses_the_masked_index() {
        let mut cpu = cpu();
        cpu.regs.x = 0x0010;
        let m = CycleMod::CheckPageBoundary {
            cycles: 1,
            initial: 0x00_10f8,
            index: IndexReg::X,
        };
        assert_eq!(calc_cycles(&cpu, &[m]), 1);
        cpu.regs.x = 0x0004;
        assert_eq!(calc_cycles(&cpu, &[m]), 0);
    }

    #[test]
    fn page_boundary_carries_past_the_bank() {
        let mut cpu = cpu();
        cpu.regs.x = 0x0001;
        let m = CycleMod::CheckPageBoundary {
            cycles: 1,
            initial: 0xff_ffff,
            index: IndexReg::X,
        };
        assert_eq!(calc_cycles(&cpu, &[m]), 1);
    }

    #[test]
    fn emulation_page_boundary_mod() {
        let mut cpu = cpu();
        let m = CycleMod::CheckPageBoundaryAndEmulationMode {
            cycles: 1,
            initial: 0x1234,
            new: 0x1301,
        };
        assert_eq!(calc_cycles(&cpu, &[m]), 0);
        cpu.regs.is_emulation = true;
        assert_eq!(calc_cycles(&cpu, &[m]), 1);
        let same_page = CycleMod::CheckPageBoundaryAndEmulationMode {
            cycles: 1,
            initial: 0x1234,
            new: 0x12ff,
        };
        assert_eq!(calc_cycles(&cpu, &[same_page]), 0);
    }
}
