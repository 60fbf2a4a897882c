//! Cycle-counting CPU core for the WDC 65C816
//!
//! The crate models the programmer-visible state machine of the
//! 65816: the hybrid 8/16-bit register file with its runtime width
//! switching, the 24-bit addressing-mode algebra, a set of decoded
//! instruction families with conditional cycle costs, and the ROM
//! loader interface that feeds the core its memory image and
//! interrupt vectors.
//!
//! The fetch-decode-execute pipeline itself lives outside this crate;
//! it decodes via [`instr::Instruction::from_opcode`], schedules with
//! [`instr::Opcode::byte_size`] and [`instr::Opcode::total_cycles`],
//! and advances the program counter around [`instr::Opcode::execute`].
//!
//! # Literature
//!
//! - the [super famicom wiki page](https://wiki.superfamicom.org/65816-reference)
//! - <https://www.westerndesigncenter.com/wdc/documentation/w65c816s.pdf>

pub mod addressing;
pub mod cartridge;
pub mod cpu;
pub mod flags;
pub mod hexdump;
pub mod instr;
pub mod memory;
pub mod timing;
