// End-to-end tests for the phrase pack compiler
// Compiles the packs under tests/packs against word banks built in a temp directory

use std::fs;
use std::path::{Path, PathBuf};

use phrasepack::config::CompilerConfig;
use phrasepack::phrase_compiler::generator::PhraseGenerator;
use phrasepack::phrase_compiler::rom_reader::{PointerKind, RomReader};
use phrasepack::phrase_compiler::word_bank::CommandEncoder;
use phrasepack::phrase_compiler::{CompilerError, PhraseCompiler, SpeechEncoder, WordBank};
use phrasepack::phrase_rand::PhraseRand;
use tempfile::TempDir;
use test_log::test;

const INSULTS_PACK: &str = "tests/packs/insults";
const BROKEN_PACK: &str = "tests/packs/broken_reference";

fn fixture(relative: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(relative);
    path
}

/// Encodes a "recording" as its file contents followed by a stop marker
struct StubEncoder;

impl SpeechEncoder for StubEncoder {
    fn encode(&mut self, audio: &Path) -> Result<Vec<u8>, CompilerError> {
        let mut data = fs::read(audio).map_err(|e| CompilerError::IOError(e.to_string()))?;
        data.push(0x0F);
        Ok(data)
    }
}

/// A word directory holding one fake recording per word
fn record_words(words: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for word in words {
        fs::write(dir.path().join(format!("{}.wav", word)), word.as_bytes()).unwrap();
    }
    dir
}

const INSULT_WORDS: &[&str] = &[
    "smelly", "big", "wet", "very", "really", "toad", "slug", "badger", "goose", "you", "are",
    "a", "go", "away", "face",
];

fn compiler_for(pack_dir: &Path) -> PhraseCompiler {
    PhraseCompiler::new(CompilerConfig::discover(pack_dir).unwrap())
}

#[test]
fn compiles_fixture_pack() {
    let pack_dir = fixture(INSULTS_PACK);
    let words = record_words(INSULT_WORDS);
    let compiler = compiler_for(&pack_dir);
    assert_eq!(compiler.config().bytes_per_line, 16);

    let (pack, rom) = compiler
        .compile(words.path(), &pack_dir, &mut StubEncoder)
        .unwrap();

    let banks: Vec<&str> = pack.banks.keys().map(|k| k.as_str()).collect();
    assert_eq!(banks, vec!["adjective", "adverb", "noun", "primary"]);
    let discovered: Vec<&str> = pack.words.keys().map(|k| k.as_str()).collect();
    assert_eq!(discovered, INSULT_WORDS);

    let reader = RomReader::new(&rom.bytes).unwrap();
    let decoded = reader.banks().unwrap();
    let phrase_counts: Vec<usize> = decoded.iter().map(|(b, _)| b.phrases.len()).collect();
    assert_eq!(phrase_counts, vec![4, 2, 4, 4]);

    // primary is the last bank; the header must point at it
    let (primary_bank, primary_phrases) = &decoded[3];
    assert_eq!(reader.primary(), primary_bank.offset);
    let token_counts: Vec<usize> = primary_phrases.iter().map(|p| p.tokens.len()).collect();
    assert_eq!(token_counts, vec![3, 4, 5, 2]);

    // word bank is every word blob in discovery order
    let mut expected_words = Vec::new();
    for word in INSULT_WORDS {
        expected_words.extend_from_slice(word.as_bytes());
        expected_words.push(0x0F);
    }
    assert_eq!(&rom.bytes[reader.word_bank_start() as usize..], &expected_words[..]);
}

#[test]
fn rom_playback_speaks_generator_phrases() {
    let pack_dir = fixture(INSULTS_PACK);
    let words = record_words(INSULT_WORDS);
    let (pack, rom) = compiler_for(&pack_dir)
        .compile(words.path(), &pack_dir, &mut StubEncoder)
        .unwrap();
    let reader = RomReader::new(&rom.bytes).unwrap();
    let generator = PhraseGenerator::new(&pack);

    for seed in 0..25 {
        let expected = generator
            .realize("primary", &mut PhraseRand::new_predictable(seed))
            .unwrap();

        // each word blob is its text followed by the stop marker
        let spoken: Vec<String> = reader
            .realize(&mut PhraseRand::new_predictable(seed))
            .unwrap()
            .into_iter()
            .map(|pointer| {
                assert!(matches!(reader.classify(pointer), PointerKind::Word(_)));
                let start = pointer as usize;
                let len = rom.bytes[start..].iter().position(|b| *b == 0x0F).unwrap();
                String::from_utf8(rom.bytes[start..start + len].to_vec()).unwrap()
            })
            .collect();
        assert_eq!(spoken.join(" "), expected);
    }
}

#[test]
fn missing_recording_fails_the_build() {
    let pack_dir = fixture(INSULTS_PACK);
    let words: Vec<&str> = INSULT_WORDS.iter().copied().filter(|w| *w != "goose").collect();
    let dir = record_words(&words);
    let result = compiler_for(&pack_dir).compile(dir.path(), &pack_dir, &mut StubEncoder);
    assert_eq!(
        result.map(|_| ()),
        Err(CompilerError::MissingWord("goose".to_string()))
    );
}

#[test]
fn unresolved_reference_fails_the_build() {
    let pack_dir = fixture(BROKEN_PACK);
    let words = record_words(&["hello"]);
    let result = compiler_for(&pack_dir).compile(words.path(), &pack_dir, &mut StubEncoder);
    match result {
        Err(CompilerError::UnresolvedBank { reference, .. }) => assert_eq!(reference, "nobody"),
        other => panic!("expected UnresolvedBank, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn pack_without_primary_bank() {
    let pack_dir = tempfile::tempdir().unwrap();
    fs::write(pack_dir.path().join("greet.txt"), "hello\n").unwrap();
    let result = PhraseCompiler::default().parse_pack(pack_dir.path());
    assert_eq!(
        result.map(|_| ()),
        Err(CompilerError::MissingPrimaryBank("primary".to_string()))
    );
}

#[test]
fn empty_bank_file_fails_the_build() {
    let pack_dir = tempfile::tempdir().unwrap();
    fs::write(pack_dir.path().join("primary.txt"), "hello {quiet}\n").unwrap();
    fs::write(pack_dir.path().join("quiet.txt"), "\n\n").unwrap();
    let result = PhraseCompiler::default().parse_pack(pack_dir.path());
    assert_eq!(
        result.map(|_| ()),
        Err(CompilerError::EmptyBank("quiet".to_string()))
    );
}

#[test]
fn seeded_previews_repeat() {
    let pack_dir = fixture(INSULTS_PACK);
    let pack = compiler_for(&pack_dir).parse_pack(&pack_dir).unwrap();
    let generator = PhraseGenerator::new(&pack);

    let preview = |seed| -> Vec<String> {
        let mut rand = PhraseRand::new_predictable(seed);
        (0..5)
            .map(|_| generator.realize("primary", &mut rand).unwrap())
            .collect()
    };
    assert_eq!(preview(11), preview(11));

    for phrase in preview(3) {
        for word in phrase.split(' ') {
            assert!(pack.words.contains_key(word), "unknown word {}", word);
        }
    }
}

#[cfg(unix)]
#[test]
fn command_encoder_end_to_end() {
    let pack_dir = tempfile::tempdir().unwrap();
    fs::write(pack_dir.path().join("primary.txt"), "hello {greet}\n").unwrap();
    fs::write(pack_dir.path().join("greet.txt"), "world\n").unwrap();
    let words = record_words(&["hello", "world"]);

    let mut encoder = CommandEncoder::new("cat", vec![]);
    let (_, rom) = PhraseCompiler::default()
        .compile(words.path(), pack_dir.path(), &mut encoder)
        .unwrap();

    // greet.txt sorts first: [greet] 0x04..0x0a, [primary] 0x0a..0x12, words from 0x12
    assert_eq!(&rom.bytes[..4], &[0x12, 0x00, 0x0A, 0x00]);
    assert_eq!(&rom.bytes[0x12..], b"worldhello");
}

#[test]
fn staged_build_matches_one_shot_build() {
    let pack_dir = fixture(INSULTS_PACK);
    let words = record_words(INSULT_WORDS);
    let compiler = compiler_for(&pack_dir);

    let (_, one_shot) = compiler
        .compile(words.path(), &pack_dir, &mut StubEncoder)
        .unwrap();

    let pack = compiler.parse_pack(&pack_dir).unwrap();
    let word_bank = WordBank::build(words.path(), &mut StubEncoder).unwrap();
    let staged = compiler.link(&pack, &word_bank).unwrap();
    assert_eq!(staged.bytes, one_shot.bytes);

    let dump = staged.hex_dump(&pack, compiler.config().bytes_per_line);
    assert!(dump.contains("PhraseBank [primary]"));
    assert!(dump.contains("Word [goose]"));
}
