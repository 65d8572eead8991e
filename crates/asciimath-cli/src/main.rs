use std::{
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;

use asciimath_core::{AsciiMathToMathML, Config, MathDisplay, PrettyPrint};

mod settings;

use settings::{SettingsError, load_settings};

/// Compiles an ASCIIMath formula to MathML
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The formula to compile. Read from stdin if omitted
    formula: Option<String>,

    /// Render the formula on its own line (display="block")
    #[arg(short, long)]
    block: bool,

    /// Indent the MathML output
    #[arg(short, long)]
    pretty: bool,

    /// Load converter settings from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// The converter settings, with the command-line flags taking precedence over the file.
    fn settings(&self) -> Result<Config, SettingsError> {
        let mut config = match &self.config {
            Some(path) => load_settings(path)?,
            None => Config::default(),
        };
        if self.block {
            config.display = MathDisplay::Block;
        }
        if self.pretty {
            config.pretty_print = PrettyPrint::Always;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match args.settings() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("asciimath: {e}");
            return ExitCode::FAILURE;
        }
    };
    let formula = match args.formula {
        Some(formula) => formula,
        None => {
            let mut input = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut input) {
                eprintln!("asciimath: cannot read stdin: {e}");
                return ExitCode::FAILURE;
            }
            input
        }
    };
    println!("{}", AsciiMathToMathML::new(config).convert(&formula));
    ExitCode::SUCCESS
}
