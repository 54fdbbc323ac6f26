use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use csvpick::PickError;
use csvpick::pick::{PickOptions, Selection, parse_delimiter, pick_files};

const NAME: &str = "csvpick";

/// Print selected parts of CSV from each FILE to standard output.
#[derive(Parser, Debug)]
#[command(name = "csvpick", version, about)]
struct Cli {
    /// Select only these 1-based indexes (e.g. "3,1,4-6,8-")
    #[arg(short = 'i', long = "indexes", value_name = "LIST")]
    indexes: Option<String>,

    /// Select only these headers (e.g. "name,price"; \, escapes a comma)
    #[arg(short = 'H', long = "headers", value_name = "LIST")]
    headers: Option<String>,

    /// Equivalent to -d '\t'
    #[arg(short = 't', long = "tsv")]
    tsv: bool,

    /// Field delimiter; '\t'-style escapes are recognized
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIM",
        default_value = ","
    )]
    delimiter: String,

    /// String joining the selected fields of each output line
    #[arg(
        short = 'D',
        long = "output-delimiter",
        value_name = "STRING",
        default_value = "\t"
    )]
    output_delimiter: String,

    /// Input files; standard input when none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() {
    process::exit(run(Cli::parse()));
}

fn run(cli: Cli) -> i32 {
    let (selection, options) = match configure(&cli) {
        Ok(configured) => configured,
        Err(err) => {
            eprintln!("{NAME}: {err}");
            eprintln!("Try '{NAME} --help' for more information.");
            return 2;
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = pick_files(&cli.files, &selection, &options, &mut out)
        .and_then(|stats| out.flush().map(|()| stats).map_err(PickError::from));
    match result {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{NAME}: {err}");
            1
        }
    }
}

fn configure(cli: &Cli) -> Result<(Selection, PickOptions), PickError> {
    let selection = Selection::from_lists(cli.indexes.clone(), cli.headers.clone())?;
    let delimiter = if cli.tsv {
        b'\t'
    } else {
        parse_delimiter(&cli.delimiter)?
    };
    let options = PickOptions {
        delimiter,
        output_delimiter: cli.output_delimiter.clone(),
        ..Default::default()
    };
    Ok((selection, options))
}
