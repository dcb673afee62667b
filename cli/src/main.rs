use byteorder::{LittleEndian, WriteBytesExt};
use clap::Parser;
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::PathBuf;

/// Compiles an arithmetic expression to a flat ARM-A32 instruction stream.
#[derive(Parser, Debug)]
#[command(name = "armjit-cli", version, about)]
struct Cli {
    /// The expression to compile, e.g. "2 + 3 * x".
    expression: String,

    /// Binds a symbol name to a host address, decimal or 0x-prefixed hex.
    /// May be given more than once.
    #[arg(short, long = "extern", value_name = "NAME=VALUE")]
    externs: Vec<String>,

    /// Where to write the emitted word stream. Defaults to a name derived
    /// from the expression's hash, with a `.armb` extension.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also print a hex/mnemonic-ish listing of the emitted words.
    #[arg(short, long)]
    dump: bool,
}

#[derive(Debug)]
enum Error {
    BadExternSpec(String),
    BadExternValue(String),
    Compile(armjit::Error),
    Io(std::io::Error, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadExternSpec(spec) => {
                write!(f, "extern binding \"{}\" is not of the form NAME=VALUE", spec)
            }
            Error::BadExternValue(value) => {
                write!(f, "extern value \"{}\" is not a valid address", value)
            }
            Error::Compile(err) => write!(f, "compiling expression failed: {}", err),
            Error::Io(err, path) => write!(f, "writing \"{}\" failed: {}", path.display(), err),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let bindings = parse_externs(&cli.externs)?;
    let externs: Vec<(&str, u32)> = bindings.iter().map(|(name, addr)| (name.as_str(), *addr)).collect();

    let mut out = [0u32; 4096];
    let len = armjit::compile(&cli.expression, &externs, &mut out).map_err(Error::Compile)?;
    let words = &out[..len];

    if cli.dump {
        dump(words);
    }

    let output_path = cli.output.unwrap_or_else(|| default_output_path(&cli.expression));
    write_armb(&output_path, words).map_err(|err| Error::Io(err, output_path.clone()))?;

    Ok(())
}

fn parse_externs(specs: &[String]) -> Result<Vec<(String, u32)>, Error> {
    specs
        .iter()
        .map(|spec| {
            let (name, value) = spec
                .split_once('=')
                .ok_or_else(|| Error::BadExternSpec(spec.clone()))?;
            let address = parse_address(value).ok_or_else(|| Error::BadExternValue(value.to_owned()))?;
            Ok((name.to_owned(), address))
        })
        .collect()
}

fn parse_address(value: &str) -> Option<u32> {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}

/// `.armb`: a length-prefixed little-endian word stream, the same shape
/// `vexfile`'s format takes for its own artifact (data length then raw
/// bytes), here holding only the instruction words since armjit programs
/// have no separate data segment.
fn write_armb(path: &PathBuf, words: &[u32]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_u32::<LittleEndian>(words.len() as u32)?;
    for word in words {
        writer.write_u32::<LittleEndian>(*word)?;
    }
    Ok(())
}

fn default_output_path(expression: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    expression.hash(&mut hasher);
    PathBuf::from(format!("{:016x}.armb", hasher.finish()))
}

fn dump(words: &[u32]) {
    for (i, word) in words.iter().enumerate() {
        println!("{:04}: {:#010x}  {}", i, word, mnemonic(*word));
    }
}

/// A best-effort mnemonic for display purposes only; not used for anything
/// the compiler itself depends on.
fn mnemonic(word: u32) -> &'static str {
    use armjit::constants::*;

    if word & !0xF & !BLX_LINK_BIT == (COND_AL | BX_BASE) {
        return if word & BLX_LINK_BIT != 0 { "blx" } else { "bx" };
    }
    if word & (COND_AL | BLOCK_XFER_BASE) == (COND_AL | BLOCK_XFER_BASE) {
        return if word & BLOCK_XFER_LOAD_BIT != 0 { "pop" } else { "push" };
    }
    if word & (COND_AL | SDT_BASE) == (COND_AL | SDT_BASE) && word & BLOCK_XFER_BASE == 0 {
        return "ldr";
    }
    if word & MUL_FIXED_BITS == MUL_FIXED_BITS && word & (0b1111_1100 << 21) == 0 {
        return "mul";
    }
    match (word >> DP_OPCODE_OFFSET) & 0xF {
        DP_OPCODE_SUB => "sub",
        DP_OPCODE_ADD => "add",
        DP_OPCODE_ORR => "orr",
        DP_OPCODE_MOV => "mov",
        _ => "???",
    }
}
