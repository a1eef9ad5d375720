// say-phrase - prints generated phrases from a phrase pack, a quick way to proof-read banks

use std::env;
use std::path::Path;
use std::process;

use phrasepack::config::CompilerConfig;
use phrasepack::phrase_compiler::generator::PhraseGenerator;
use phrasepack::phrase_compiler::PhraseCompiler;
use phrasepack::phrase_rand::PhraseRand;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut pack_dir: Option<&str> = None;
    let mut count: Option<usize> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--count" => {
                count = Some(parse_value(&args, i, "-n"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_value(&args, i, "--seed"));
                i += 2;
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", arg);
                process::exit(1);
            }
            _ => {
                if pack_dir.is_some() {
                    eprintln!("Error: Multiple phrase pack directories specified");
                    process::exit(1);
                }
                pack_dir = Some(args[i].as_str());
                i += 1;
            }
        }
    }

    let pack_dir = match pack_dir {
        Some(dir) => Path::new(dir),
        None => {
            eprintln!("Error: No phrase pack directory specified");
            process::exit(1);
        }
    };

    let config = CompilerConfig::discover(pack_dir).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });
    let count = count.unwrap_or(config.preview_count);
    let primary = config.primary_bank.clone();

    let pack = PhraseCompiler::new(config)
        .parse_pack(pack_dir)
        .unwrap_or_else(|err| {
            eprintln!("Error: {}", err);
            process::exit(1);
        });

    let mut rand = match seed {
        Some(seed) => PhraseRand::new_predictable(seed),
        None => PhraseRand::new_uniform(),
    };
    let generator = PhraseGenerator::new(&pack);
    for _ in 0..count {
        match generator.realize(&primary, &mut rand) {
            Ok(phrase) => println!("{}", phrase),
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let value = match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    };
    value.parse().unwrap_or_else(|_| {
        eprintln!("Error: Invalid value '{}' for {}", value, flag);
        process::exit(1);
    })
}

fn print_usage(program_name: &str) {
    println!("Usage: {} [options] <phrase_pack_directory>", program_name);
    println!();
    println!("Options:");
    println!("  -n, --count <n>    Number of phrases (default: preview_count from config, 10)");
    println!("  --seed <n>         Seed the generator for repeatable output");
    println!("  -h, --help         Show this help message");
}
