// Phrase Generator
// Random descent through the token graph, the same walk the firmware makes over the ROM

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::token::{BankId, PhrasePack, PhraseToken};
use crate::phrase_rand::PhraseRand;

pub struct PhraseGenerator<'a> {
    pack: &'a PhrasePack,
}

impl<'a> PhraseGenerator<'a> {
    pub fn new(pack: &'a PhrasePack) -> Self {
        PhraseGenerator { pack }
    }

    /// Realize one phrase from the named bank as a space separated string
    pub fn realize(&self, bank: &str, rand: &mut PhraseRand) -> Result<String, CompilerError> {
        let bank = self
            .pack
            .bank_named(bank)
            .ok_or_else(|| CompilerError::UnknownBank(bank.to_string()))?;
        let words = self.realize_words(bank.id, rand)?;
        Ok(words.join(" "))
    }

    /// Realize one phrase as the sequence of words spoken
    pub fn realize_words(
        &self,
        bank: BankId,
        rand: &mut PhraseRand,
    ) -> Result<Vec<&'a str>, CompilerError> {
        let mut words = Vec::new();
        let mut active = Vec::new();
        self.render_bank(bank, rand, &mut active, &mut words)?;
        Ok(words)
    }

    fn render_bank(
        &self,
        bank: BankId,
        rand: &mut PhraseRand,
        active: &mut Vec<BankId>,
        out: &mut Vec<&'a str>,
    ) -> Result<(), CompilerError> {
        let pack = self.pack;
        if active.contains(&bank) {
            let mut chain: Vec<String> = active.iter().map(|b| pack.bank(*b).name.clone()).collect();
            chain.push(pack.bank(bank).name.clone());
            return Err(CompilerError::CycleDetected(chain));
        }

        let phrase_bank = pack.bank(bank);
        if phrase_bank.is_empty() {
            return Err(CompilerError::EmptyBank(phrase_bank.name.clone()));
        }

        active.push(bank);
        let phrase = &phrase_bank.phrases[rand.pick(phrase_bank.len())];
        for token in &phrase.tokens {
            match *token {
                PhraseToken::Word(word) => out.push(pack.word(word).text.as_str()),
                PhraseToken::Bank(nested) => self.render_bank(nested, rand, active, out)?,
            }
        }
        active.pop();
        Ok(())
    }
}
