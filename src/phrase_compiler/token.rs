// Phrase Pack Token Graph
// Words, phrases and phrase banks produced by the parser

use indexmap::IndexMap;
use std::fmt;

/// Index of a word in `PhrasePack::words`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(pub usize);

/// Index of a bank in `PhrasePack::banks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BankId(pub usize);

/// Pack-wide sequence number of a phrase, assigned in parse order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhraseId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: WordId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseToken {
    Word(WordId),
    Bank(BankId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub id: PhraseId,
    pub tokens: Vec<PhraseToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhraseBank {
    pub id: BankId,
    pub name: String,
    pub phrases: Vec<Phrase>,
}

impl PhraseBank {
    pub fn new(id: BankId, name: &str) -> Self {
        PhraseBank {
            id,
            name: name.to_string(),
            phrases: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// A parsed phrase pack: every word and every bank, in first-discovery order.
///
/// Handles index straight into the two maps, so a `WordId(3)` is the fourth
/// word ever discovered and a `BankId(0)` is the first bank file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhrasePack {
    pub words: IndexMap<String, Word>,
    pub banks: IndexMap<String, PhraseBank>,
}

impl PhrasePack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    pub fn bank(&self, id: BankId) -> &PhraseBank {
        &self.banks[id.0]
    }

    pub fn bank_named(&self, name: &str) -> Option<&PhraseBank> {
        self.banks.get(name)
    }

    /// Intern a word, returning the existing handle when already known
    pub fn intern_word(&mut self, text: &str) -> WordId {
        if let Some(word) = self.words.get(text) {
            return word.id;
        }
        let id = WordId(self.words.len());
        self.words.insert(
            text.to_string(),
            Word {
                id,
                text: text.to_string(),
            },
        );
        id
    }

    /// Create an empty bank, or return the handle of an existing one
    pub fn declare_bank(&mut self, name: &str) -> BankId {
        if let Some(bank) = self.banks.get(name) {
            return bank.id;
        }
        let id = BankId(self.banks.len());
        self.banks.insert(name.to_string(), PhraseBank::new(id, name));
        id
    }

    pub fn phrase_count(&self) -> usize {
        self.banks.values().map(|b| b.phrases.len()).sum()
    }

    pub fn phrases(&self) -> impl Iterator<Item = (&PhraseBank, &Phrase)> {
        self.banks
            .values()
            .flat_map(|bank| bank.phrases.iter().map(move |phrase| (bank, phrase)))
    }

    pub fn token_name(&self, token: PhraseToken) -> String {
        match token {
            PhraseToken::Word(id) => self.word(id).text.clone(),
            PhraseToken::Bank(id) => format!("{{{}}}", self.bank(id).name),
        }
    }
}

impl fmt::Display for PhrasePack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Phrase pack: {} words, {} banks, {} phrases",
            self.words.len(),
            self.banks.len(),
            self.phrase_count()
        )?;
        for bank in self.banks.values() {
            writeln!(f, "  [{}]", bank.name)?;
            for phrase in &bank.phrases {
                let tokens: Vec<String> =
                    phrase.tokens.iter().map(|t| self.token_name(*t)).collect();
                writeln!(f, "    {}", tokens.join(" "))?;
            }
        }
        Ok(())
    }
}
