use anyhow::{Context, Result};
use markspan_config::Config;
use markspan_engine::Generator;
use std::io::Read;
use std::{env, fs, path::PathBuf, process};

mod render;

struct Options {
    keep: bool,
    json: bool,
    discord: bool,
    path: Option<PathBuf>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--keep] [--json] [--discord] [file]");
    eprintln!("Reads markup from the file (or stdin) and prints styled text.");
    eprintln!("  --keep     keep delimiter characters, restyled, in the output");
    eprintln!("  --json     print the text and spans as JSON instead of ANSI");
    eprintln!("  --discord  use the Discord rule preset, ignoring the config file");
    process::exit(1);
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let mut options = Options {
        keep: false,
        json: false,
        discord: false,
        path: None,
    };
    for arg in &args[1..] {
        match arg.as_str() {
            "--keep" => options.keep = true,
            "--json" => options.json = true,
            "--discord" => options.discord = true,
            "-h" | "--help" => usage(&args[0]),
            flag if flag.starts_with('-') => {
                eprintln!("Error: unknown flag {flag}");
                usage(&args[0]);
            }
            path => {
                if options.path.is_some() {
                    eprintln!("Error: more than one input file given");
                    usage(&args[0]);
                }
                options.path = Some(PathBuf::from(path));
            }
        }
    }
    options
}

fn build_generator(options: &Options) -> Result<Generator> {
    let mut generator = if options.discord {
        Generator::discord()
    } else {
        match Config::load() {
            Ok(Some(config)) => config
                .to_generator()
                .with_context(|| format!("config file {}", Config::config_path().display()))?,
            Ok(None) => Generator::standard(),
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                process::exit(1);
            }
        }
    };
    if options.keep {
        generator = generator.keeping_specifiers();
    }
    Ok(generator)
}

fn read_input(options: &Options) -> Result<String> {
    match &options.path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let options = parse_args();
    let generator = build_generator(&options)?;
    let text = read_input(&options)?;

    // No reveal tracking in a one-shot renderer: spoilers print revealed.
    let styled = generator.generate(&text, None);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&styled)?);
    } else {
        render::print_ansi(&styled);
    }
    Ok(())
}
