use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockid_cli::build::{BuildOptions, run_build, run_convert};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a complete annotated resource pack from a directory of .lang files.
    Build {
        /// Directory containing the input .lang files
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory (removed and recreated on every run)
        #[arg(short, long)]
        output: PathBuf,
        /// Pack name; defaults to "BlockID v<version>"
        #[arg(long)]
        name: Option<String>,
        /// JSON metadata table overriding the built-in one
        #[arg(long)]
        tiles: Option<PathBuf>,
        /// JSON glyph table overriding the built-in one
        #[arg(long)]
        glyphs: Option<PathBuf>,
        /// Directory of static assets (font, pack_icon.png) copied into the pack
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Skip bundling the pack into an .mcpack archive
        #[arg(long)]
        no_archive: bool,
    },

    /// Annotate a single .lang file into compact and detailed variants.
    Convert {
        /// The input .lang file to process
        #[arg(short, long)]
        input: PathBuf,
        /// The directory to write the .p.lang and .s.lang files to
        #[arg(short, long)]
        output: PathBuf,
        /// JSON metadata table overriding the built-in one
        #[arg(long)]
        tiles: Option<PathBuf>,
        /// JSON glyph table overriding the built-in one
        #[arg(long)]
        glyphs: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Build {
            input,
            output,
            name,
            tiles,
            glyphs,
            assets,
            no_archive,
        } => run_build(&BuildOptions {
            input,
            output,
            name,
            tiles,
            glyphs,
            assets,
            archive: !no_archive,
        })
        .map(|_| ()),
        Commands::Convert {
            input,
            output,
            tiles,
            glyphs,
        } => run_convert(&input, &output, tiles.as_deref(), glyphs.as_deref()).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
