use std::{
    ffi::OsStr,
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vm_translator::{translate_reader, TranslateOptions};

#[derive(Parser, Debug)]
#[command(name = "vm-translator", version, about = "Translate VM commands into Hack assembly")]
struct Cli {
    /// VM source file (`.vm`)
    input: PathBuf,

    /// Output file, defaults to the input with an `.asm` extension
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Echo each VM command as a comment above its code
    #[arg(long)]
    annotate: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

fn output_path(input: &Path) -> PathBuf {
    input.with_extension("asm")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.input.extension().and_then(OsStr::to_str) != Some("vm") {
        bail!("Usage: vm-translator <codefile.vm>");
    }
    let outfile = cli.output.clone().unwrap_or_else(|| output_path(&cli.input));

    let file = File::open(&cli.input)
        .with_context(|| format!("File not found: {}", cli.input.display()))?;
    let options = TranslateOptions {
        annotate: cli.annotate,
    };

    // Output is only written once the whole file has translated.
    let mut assembly = Vec::new();
    let summary = translate_reader(BufReader::new(file), &mut assembly, &options)
        .with_context(|| format!("Error while translating {}", cli.input.display()))?;

    fs::write(&outfile, &assembly)
        .with_context(|| format!("Error while writing {}", outfile.display()))?;

    info!(
        input = %cli.input.display(),
        output = %outfile.display(),
        lines = summary.lines,
        commands = summary.commands,
        instructions = summary.instructions,
        "translation complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_replaces_vm_extension() {
        assert_eq!(output_path(Path::new("dir/Prog.vm")), PathBuf::from("dir/Prog.asm"));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["vm-translator", "-vv", "--annotate", "Foo.vm", "-o", "out.asm"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.annotate);
        assert_eq!(cli.output, Some(PathBuf::from("out.asm")));
        assert_eq!(cli.input, PathBuf::from("Foo.vm"));
    }
}
