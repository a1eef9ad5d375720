// Semantic Analysis for Phrase Packs
// Checks that the parsed token graph can be linked and played back

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::token::{BankId, PhrasePack, PhraseToken};

pub const DEFAULT_PRIMARY_BANK: &str = "primary";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

pub struct SemanticAnalyzer<'a> {
    pack: &'a PhrasePack,
    marks: Vec<Mark>,
    chain: Vec<BankId>,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(pack: &'a PhrasePack) -> Self {
        SemanticAnalyzer {
            pack,
            marks: vec![Mark::Unvisited; pack.banks.len()],
            chain: Vec::new(),
        }
    }

    /// Validate the pack and return the handle of the entry bank
    pub fn analyze(mut self, primary_bank: &str) -> Result<BankId, CompilerError> {
        let primary = self
            .pack
            .bank_named(primary_bank)
            .ok_or_else(|| CompilerError::MissingPrimaryBank(primary_bank.to_string()))?
            .id;

        for bank in self.pack.banks.values() {
            if bank.is_empty() {
                return Err(CompilerError::EmptyBank(bank.name.clone()));
            }
        }

        for index in 0..self.pack.banks.len() {
            if self.marks[index] == Mark::Unvisited {
                self.visit(BankId(index))?;
            }
        }

        log::debug!(
            "Semantic analysis passed: primary bank \"{}\" at index {}",
            primary_bank,
            primary.0
        );
        Ok(primary)
    }

    fn visit(&mut self, bank: BankId) -> Result<(), CompilerError> {
        self.marks[bank.0] = Mark::Visiting;
        self.chain.push(bank);

        let pack = self.pack;
        for phrase in &pack.bank(bank).phrases {
            for token in &phrase.tokens {
                let target = match *token {
                    PhraseToken::Word(_) => continue,
                    PhraseToken::Bank(target) => target,
                };
                match self.marks[target.0] {
                    Mark::Visited => {}
                    Mark::Unvisited => self.visit(target)?,
                    Mark::Visiting => return Err(self.cycle_error(target)),
                }
            }
        }

        self.chain.pop();
        self.marks[bank.0] = Mark::Visited;
        Ok(())
    }

    fn cycle_error(&self, target: BankId) -> CompilerError {
        let start = self
            .chain
            .iter()
            .position(|b| *b == target)
            .unwrap_or(0);
        let mut names: Vec<String> = self.chain[start..]
            .iter()
            .map(|b| self.pack.bank(*b).name.clone())
            .collect();
        names.push(self.pack.bank(target).name.clone());
        CompilerError::CycleDetected(names)
    }
}

#[cfg(test)]
#[path = "semantic_tests.rs"]
mod tests;
