// Phrase Compiler Module
// Compiles a directory of phrase banks plus a word bank into a playback ROM

pub mod error;
pub mod generator;
pub mod hexdump;
pub mod layout;
pub mod parser;
pub mod paths;
pub mod pointer_table;
pub mod rom_image;
pub mod rom_reader;
pub mod semantic;
pub mod talkie;
pub mod token;
pub mod word_bank;

use std::path::Path;

pub use error::CompilerError;
pub use rom_image::LinkedRom;
pub use token::PhrasePack;
pub use word_bank::{SpeechEncoder, WordBank};

use crate::config::CompilerConfig;

/// Main compiler structure
pub struct PhraseCompiler {
    config: CompilerConfig,
}

impl Default for PhraseCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl PhraseCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        PhraseCompiler { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parse and validate a phrase pack directory
    pub fn parse_pack(&self, pack_dir: &Path) -> Result<PhrasePack, CompilerError> {
        let pack = parser::PhrasePackParser::new().parse_directory(pack_dir)?;
        semantic::SemanticAnalyzer::new(&pack).analyze(&self.config.primary_bank)?;
        log::debug!("{}", pack);
        Ok(pack)
    }

    /// Link an already parsed pack against a word bank
    pub fn link(&self, pack: &PhrasePack, word_bank: &WordBank) -> Result<LinkedRom, CompilerError> {
        semantic::SemanticAnalyzer::new(pack).analyze(&self.config.primary_bank)?;
        rom_image::RomLinker::new(pack, word_bank).link(&self.config.primary_bank)
    }

    /// Full build: parse the pack, encode the words, link the ROM
    pub fn compile(
        &self,
        word_dir: &Path,
        pack_dir: &Path,
        encoder: &mut dyn SpeechEncoder,
    ) -> Result<(PhrasePack, LinkedRom), CompilerError> {
        // Phase 1: Parsing and validation
        let pack = self.parse_pack(pack_dir)?;

        // Phase 2: Word bank assembly
        let word_bank = WordBank::build(word_dir, encoder)?;

        // Phase 3: Linking
        let rom = rom_image::RomLinker::new(&pack, &word_bank).link(&self.config.primary_bank)?;

        log::info!(
            "Compiled {} banks, {} phrases and {} words into {} bytes",
            pack.banks.len(),
            pack.phrase_count(),
            pack.words.len(),
            rom.len()
        );
        Ok((pack, rom))
    }
}
