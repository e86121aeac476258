use std::{fs, path::PathBuf, process};

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use log::{info, LevelFilter};

use vmil::{assemble, serialize, source};

#[derive(Parser, Debug)]
#[command(
    name = "vmtranslator",
    version,
    about = "Translate .vm file(s) into Hack assembly code"
)]
struct Cli {
    #[arg(
        value_name = "file.vm or dirname",
        help = "A single .vm file, or a directory whose .vm files form one program"
    )]
    path: PathBuf,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write assembly to FILE instead of the derived .asm path"
    )]
    output: Option<PathBuf>,
    #[arg(
        long = "bootstrap",
        action = ArgAction::SetTrue,
        conflicts_with = "no_bootstrap",
        help = "Prepend the bootstrap even when translating a single file"
    )]
    bootstrap: bool,
    #[arg(
        long = "no-bootstrap",
        action = ArgAction::SetTrue,
        help = "Omit the bootstrap when translating a directory"
    )]
    no_bootstrap: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Raise log verbosity (repeatable); RUST_LOG overrides"
    )]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.path.is_dir() && !source::is_vm_file(&cli.path) {
        eprintln!("{}", Cli::command().render_usage());
        process::exit(2);
    }

    let source = source::load(&cli.path)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;

    let with_bootstrap = if cli.bootstrap {
        true
    } else if cli.no_bootstrap {
        false
    } else {
        source.is_directory
    };
    let instructions = assemble(&source.units, with_bootstrap)?;

    let outfile = cli.output.unwrap_or(source.output);
    fs::write(&outfile, serialize(&instructions))
        .with_context(|| format!("failed to write {}", outfile.display()))?;
    info!("wrote {} instructions to {}", instructions.len(), outfile.display());

    Ok(())
}
