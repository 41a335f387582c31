mod cli;

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use asante_codegen::{js, Dictionary, Options};
use clap::Parser;
use log::error;

use crate::cli::{Cli, Format};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = Options { strict: cli.strict };

    let mut generated = 0;
    for filename in &cli.files {
        match process(filename, &cli.out_dir, cli.format, options) {
            Ok(Some(path)) => {
                println!("Generated {}", path.display());
                generated += 1;
            }
            Ok(None) => {}
            Err(e) => error!("{}: {}", filename.display(), e),
        }
    }

    if generated == 0 {
        eprintln!("Failed. Use --help for full instructions.");
        process::exit(1);
    }
}

/// Compiles a single data dictionary, returning the path of the generated file
fn process(
    filename: &Path,
    out_dir: &Path,
    format: Format,
    options: Options,
) -> asante_codegen::Result<Option<PathBuf>> {
    let dictionary = match asante_codegen::load_file(filename, options)? {
        Some(dictionary) => dictionary,
        None => return Ok(None),
    };

    let (name, contents) = render(&dictionary, format);

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(name);
    fs::write(&path, contents)?;

    Ok(Some(path))
}

fn render(dictionary: &Dictionary, format: Format) -> (String, String) {
    match format {
        Format::Js => (js::file_name(dictionary), js::generate(dictionary)),
        Format::Rust => (
            format!("asante_pump_version_{}.rs", dictionary.version),
            asante_codegen::generate_code(dictionary).to_string(),
        ),
    }
}
