// Phrase Grammar Parser
// Turns phrase bank source text into a populated token graph
//
// One bank per file, one phrase per line, tokens separated by whitespace:
//
//   you {adjective} {noun}
//   go away
//
// A bare identifier is a word, an identifier in braces references another bank.

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::paths::{identifier_files, is_identifier};
use crate::phrase_compiler::token::{BankId, Phrase, PhraseId, PhrasePack, PhraseToken};
use std::fs;
use std::path::Path;

pub const PHRASE_BANK_EXTENSION: &str = "txt";

pub struct PhrasePackParser {
    pack: PhrasePack,
    next_phrase_id: usize,
}

impl Default for PhrasePackParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PhrasePackParser {
    pub fn new() -> Self {
        PhrasePackParser {
            pack: PhrasePack::new(),
            next_phrase_id: 0,
        }
    }

    /// Parse every `<bank>.txt` file in a directory, in file name order
    pub fn parse_directory(self, dir: &Path) -> Result<PhrasePack, CompilerError> {
        let files = identifier_files(dir, PHRASE_BANK_EXTENSION)?;
        log::info!(
            "Parsing phrase pack {}: {} bank files",
            dir.display(),
            files.len()
        );

        let mut sources = Vec::with_capacity(files.len());
        for (bank, path) in files {
            let text = fs::read_to_string(&path).map_err(|e| CompilerError::io(&path, e))?;
            sources.push((bank, text));
        }

        let borrowed: Vec<(&str, &str)> = sources
            .iter()
            .map(|(bank, text)| (bank.as_str(), text.as_str()))
            .collect();
        self.parse_sources(&borrowed)
    }

    /// Parse in-memory bank sources given as `(bank id, text)` pairs
    pub fn parse_sources(mut self, sources: &[(&str, &str)]) -> Result<PhrasePack, CompilerError> {
        // Banks exist before any line is parsed so references may point forward
        for (bank, _) in sources {
            if !is_identifier(bank) {
                return Err(CompilerError::MalformedToken {
                    bank: bank.to_string(),
                    line: 0,
                    token: bank.to_string(),
                });
            }
            self.pack.declare_bank(bank);
        }

        for (bank, text) in sources {
            let bank_id = self.pack.declare_bank(bank);
            for (index, line) in text.lines().enumerate() {
                self.parse_line(bank_id, index + 1, line)?;
            }

            let parsed = self.pack.bank(bank_id);
            if parsed.is_empty() {
                return Err(CompilerError::EmptyBank(bank.to_string()));
            }
            log::debug!("Bank \"{}\": {} phrases", bank, parsed.len());
        }

        log::info!(
            "Parsed {} banks, {} phrases, {} distinct words",
            self.pack.banks.len(),
            self.pack.phrase_count(),
            self.pack.words.len()
        );
        Ok(self.pack)
    }

    fn parse_line(&mut self, bank: BankId, line: usize, text: &str) -> Result<(), CompilerError> {
        let mut tokens = Vec::new();
        for token in text.split_ascii_whitespace() {
            tokens.push(self.parse_token(bank, line, token)?);
        }
        if tokens.is_empty() {
            return Ok(());
        }

        let phrase = Phrase {
            id: PhraseId(self.next_phrase_id),
            tokens,
        };
        self.next_phrase_id += 1;
        self.pack.banks[bank.0].phrases.push(phrase);
        Ok(())
    }

    fn parse_token(
        &mut self,
        bank: BankId,
        line: usize,
        token: &str,
    ) -> Result<PhraseToken, CompilerError> {
        if is_identifier(token) {
            return Ok(PhraseToken::Word(self.pack.intern_word(token)));
        }

        if let Some(reference) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            if is_identifier(reference) {
                return match self.pack.bank_named(reference) {
                    Some(target) => Ok(PhraseToken::Bank(target.id)),
                    None => Err(CompilerError::UnresolvedBank {
                        bank: self.pack.bank(bank).name.clone(),
                        line,
                        reference: reference.to_string(),
                    }),
                };
            }
        }

        Err(CompilerError::MalformedToken {
            bank: self.pack.bank(bank).name.clone(),
            line,
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
