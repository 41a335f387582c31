use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JavaScript driver-defines module
    #[default]
    Js,
    /// Rust tables for the `asante` crate
    Rust,
}

#[derive(Parser, Debug)]
#[command(name = "asante-gen", bin_name = "asante-gen")]
#[command(about = "Generates driver definitions from Asante data dictionary (datadesc) XML files")]
pub struct Cli {
    /// One or more XML files to process
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Directory the generated files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Js)]
    pub format: Format,

    /// Fail a file if any of its fields have a type that cannot be resolved
    #[arg(long)]
    pub strict: bool,
}
