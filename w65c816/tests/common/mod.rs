use w65c816::cpu::{Cpu, Status};
use w65c816::instr::Instruction;
use w65c816::memory::Memory;

/// 128 KiB of RAM with the program at address zero, all flags clear,
/// D = DBR = PBR = PC = 0, running in 6502 emulation mode.
pub fn emulation_cpu(program: &[u8]) -> Cpu {
    let mut bytes = vec![0u8; 0x2_0000];
    bytes[..program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new(Memory::new(bytes));
    cpu.regs.status = Status(0);
    cpu.regs.is_emulation = true;
    cpu.regs.sp = 0;
    cpu
}

/// Same, but native mode with 16-bit accumulator and index registers.
pub fn native_cpu(program: &[u8]) -> Cpu {
    let mut cpu = emulation_cpu(program);
    cpu.regs.is_emulation = false;
    cpu
}

/// Decode the instruction at the program counter, failing the test on
/// an unclaimed opcode byte.
pub fn decode(cpu: &Cpu) -> Instruction {
    Instruction::decode(cpu).expect("opcode byte not claimed by any family")
}

pub fn flag(cpu: &Cpu, flag: Status) -> bool {
    cpu.regs.status.has(flag)
}
