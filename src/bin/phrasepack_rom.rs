// phrasepack-rom - Phrase Pack ROM Compiler
// Compiles a word bank and a phrase pack directory into a playback ROM image

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use phrasepack::config::CompilerConfig;
use phrasepack::phrase_compiler::PhraseCompiler;

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut inputs: Vec<&str> = Vec::new();
    let mut output_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -o requires a filename");
                    process::exit(1);
                }
                output_file = Some(args[i + 1].clone());
                i += 2;
            }
            "-c" | "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -c requires a filename");
                    process::exit(1);
                }
                config_file = Some(args[i + 1].clone());
                i += 2;
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", arg);
                print_usage(&args[0]);
                process::exit(1);
            }
            _ => {
                inputs.push(&args[i]);
                i += 1;
            }
        }
    }

    if inputs.len() != 2 {
        eprintln!("Error: Expected a word bank directory and a phrase pack directory");
        print_usage(&args[0]);
        process::exit(1);
    }
    let word_dir = Path::new(inputs[0]);
    let pack_dir = Path::new(inputs[1]);

    let config = match &config_file {
        Some(path) => CompilerConfig::load(Path::new(path)),
        None => CompilerConfig::discover(pack_dir),
    };
    let config = config.unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });

    let mut encoder = config.command_encoder().unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });

    if verbose {
        println!(
            "Compiling {} + {} (primary bank \"{}\")",
            word_dir.display(),
            pack_dir.display(),
            config.primary_bank
        );
    }

    let bytes_per_line = config.bytes_per_line;
    let compiler = PhraseCompiler::new(config);
    let (pack, rom) = match compiler.compile(word_dir, pack_dir, &mut encoder) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Compilation error: {}", err);
            process::exit(1);
        }
    };

    match output_file {
        Some(path) => {
            if let Err(err) = fs::write(&path, &rom.bytes) {
                eprintln!("Error writing '{}': {}", path, err);
                process::exit(1);
            }
            if verbose {
                println!("Successfully compiled {} bytes to {}", rom.len(), path);
            }
        }
        None => {
            println!("============= START ROM DATA =============");
            println!("{}", rom.hex_dump(&pack, bytes_per_line));
        }
    }
}

fn print_usage(program_name: &str) {
    println!(
        "Usage: {} [options] <word_bank_directory> <phrase_pack_directory>",
        program_name
    );
    println!();
    println!("Options:");
    println!("  -o, --output <file>    Write the raw ROM image instead of a hex dump");
    println!("  -c, --config <file>    Config file (default: <phrase_pack_directory>/phrasepack.toml)");
    println!("  -v, --verbose          Verbose output");
    println!("  -h, --help             Show this help message");
    println!();
    println!("Word recordings are <word>.wav files, phrase banks are <bank>.txt files.");
    println!("The [encoder] section of the config names the program that encodes each .wav.");
}
