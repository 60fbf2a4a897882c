use clap::{ErrorKind, Parser};
use std::path::PathBuf;
use w65c816::cartridge::Cartridge;
use w65c816::cpu::Cpu;
use w65c816::hexdump;
use w65c816::instr::{Instruction, Opcode};
use w65c816::memory::Addr24;

mod config;
use config::Config;

#[derive(Parser, Clone)]
#[clap(
    version = clap::crate_version!(),
)]
struct Options {
    /// ROM image to inspect
    #[clap(parse(from_os_str))]
    input: PathBuf,
    /// Print a hex dump window; START and LEN are hex
    #[clap(long, number_of_values = 2, value_names = &["START", "LEN"])]
    dump: Option<Vec<String>>,
    /// Run and disassemble this many instructions
    #[clap(short, long)]
    trace: Option<u32>,
    /// Trace entry point (hex, 24-bit); defaults to the reset vector
    #[clap(short, long)]
    start: Option<String>,
    /// Begin the trace in native mode instead of emulation mode
    #[clap(long)]
    native: bool,
    /// Trace defaults file
    #[clap(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
}

fn error<E: std::fmt::Display>(kind: ErrorKind, val: E) -> ! {
    clap::app_from_crate!().error(kind, val).exit()
}

fn parse_hex(text: &str) -> u32 {
    let trimmed = text.trim_start_matches("0x").trim_start_matches('$');
    u32::from_str_radix(trimmed, 16).unwrap_or_else(|err| {
        error(
            ErrorKind::InvalidValue,
            format_args!("invalid hex value \"{}\" ({})\n", text, err),
        )
    })
}

fn cartridge_from_file(path: &std::path::Path) -> Cartridge {
    let content = std::fs::read(path).unwrap_or_else(|err| {
        error(
            ErrorKind::Io,
            format_args!("Could not read file \"{}\" ({})\n", path.display(), err),
        )
    });
    Cartridge::from_bytes(&content).unwrap_or_else(|err| {
        error(
            ErrorKind::InvalidValue,
            format_args!(
                "Failure while reading ROM file \"{}\" ({})\n",
                path.display(),
                err
            ),
        )
    })
}

fn print_header(cartridge: &Cartridge) {
    let header = cartridge.header();
    println!("title:    {}", header.title);
    println!("makeup:   {}", header.makeup);
    println!("rom:      {} KiB", header.rom_size / 1024);
    println!("sram:     {} KiB", header.sram_size / 1024);
    println!("country:  {:02x}", header.country);
    println!("license:  {:02x}", header.license);
    println!("version:  {}", header.version);
    println!(
        "checksum: {:04x}/{:04x}{}",
        header.checksum,
        header.checksum_complement,
        if header.checksum_pair_valid() {
            ""
        } else {
            " (inconsistent)"
        }
    );
    let native = header.vectors.native;
    let emulation = header.vectors.emulation;
    println!(
        "native vectors:    COP={:04x} BRK={:04x} ABORT={:04x} NMI={:04x} RESET={:04x} IRQ={:04x}",
        native.cop, native.brk, native.abort, native.nmi, native.reset, native.irq
    );
    println!(
        "emulation vectors: COP={:04x} ABORT={:04x} NMI={:04x} RESET={:04x} BRK/IRQ={:04x}",
        emulation.cop, emulation.abort, emulation.nmi, emulation.reset, emulation.irq
    );
}

/// The minimal fetch-decode-execute loop around the core. Unclaimed
/// opcode bytes are stepped over as one-byte no-ops.
fn trace(cartridge: Cartridge, count: u32, start: Option<u32>, native: bool) {
    let start = start.unwrap_or_else(|| {
        let vectors = cartridge.vectors();
        if native {
            vectors.native.reset.into()
        } else {
            vectors.emulation.reset.into()
        }
    });
    let mut cpu = Cpu::new(cartridge.into_memory());
    cpu.regs.is_emulation = !native;
    cpu.regs.pb = (start >> 16) as u8;
    cpu.regs.pc = (start & 0xffff) as u16;

    let mut total = 0u64;
    for _ in 0..count {
        let pc = Addr24::from_u32(cpu.effective_pc());
        match Instruction::decode(&cpu) {
            Some(instr) => {
                let size = instr.byte_size(&cpu);
                let cycles = instr.total_cycles(&cpu);
                println!("{}  {:<14} ; {} cycles", pc, instr.disasm(&cpu), cycles);
                instr.execute(&mut cpu);
                cpu.regs.pc = cpu.regs.pc.wrapping_add(size);
                total += u64::from(cycles);
            }
            None => {
                let op = cpu.memory.read_byte(pc.to_u32());
                println!("{}  .db ${:02x}", pc, op);
                cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
                total += 2;
            }
        }
    }
    println!("total: {} cycles", total);
}

fn main() {
    let options = Options::parse();
    let config = match &options.config {
        Some(path) => Config::load(path)
            .unwrap_or_else(|err| error(ErrorKind::InvalidValue, format_args!("{}\n", err))),
        None => Config::default(),
    };

    let cartridge = cartridge_from_file(&options.input);
    print_header(&cartridge);

    if let Some(range) = &options.dump {
        let start = parse_hex(&range[0]);
        let len = parse_hex(&range[1]);
        println!();
        print!(
            "{}",
            hexdump::dump_range(&cartridge.clone().into_memory(), start, len)
        );
    }

    let count = options.trace.or(config.trace.count);
    if let Some(count) = count {
        let start = options.start.as_deref().map(parse_hex).or(config.trace.start);
        let native = options.native || config.trace.native;
        println!();
        trace(cartridge, count, start, native);
    }
}
