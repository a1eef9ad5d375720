// list-words - lists the words a phrase pack uses, handy for knowing what to record

use std::env;
use std::path::Path;
use std::process;

use phrasepack::phrase_compiler::paths::identifier_files;
use phrasepack::phrase_compiler::parser::PhrasePackParser;
use phrasepack::phrase_compiler::word_bank::WORD_AUDIO_EXTENSION;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (pack_dir, word_dir) = match args.len() {
        2 => (&args[1], None),
        4 if args[2] == "--missing" => (&args[1], Some(&args[3])),
        _ => {
            println!("Usage: {} <phrase_pack_directory> [--missing <word_directory>]", args[0]);
            process::exit(1);
        }
    };

    let pack = PhrasePackParser::new()
        .parse_directory(Path::new(pack_dir))
        .unwrap_or_else(|err| {
            eprintln!("Error: {}", err);
            process::exit(1);
        });

    let recorded: Vec<String> = match word_dir {
        Some(dir) => match identifier_files(Path::new(dir), WORD_AUDIO_EXTENSION) {
            Ok(files) => files.into_iter().map(|(word, _)| word).collect(),
            Err(err) => {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
        },
        None => Vec::new(),
    };

    for word in pack.words.keys() {
        if !recorded.contains(word) {
            println!("{}", word);
        }
    }
}
