/// Pointer table for ROM linking
///
/// Every entity that can be the target of a 16-bit ROM pointer (phrase banks,
/// phrases, words) gets exactly one entry, keyed by the integer handle the
/// parser assigned to it. Offsets are filled in by the layout pass and read
/// back by the serializer; the finished table also labels the hex dump.
use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::layout::MAX_ROM_SIZE;
use crate::phrase_compiler::token::{BankId, PhraseId, PhrasePack, PhraseToken, WordId};
use indexmap::IndexMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomEntity {
    Header,
    Bank(BankId),
    Phrase(PhraseId),
    WordBankStart,
    Word(WordId),
}

#[derive(Debug, Clone, Default)]
pub struct PointerTable {
    offsets: IndexMap<RomEntity, usize>,
}

impl PointerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entity's offset; it must be addressable by a 16-bit pointer
    pub fn assign(&mut self, entity: RomEntity, offset: usize) -> Result<(), CompilerError> {
        if offset >= MAX_ROM_SIZE {
            return Err(CompilerError::RomTooLarge(offset + 1));
        }
        log::debug!("Pointer {:?} -> 0x{:04x}", entity, offset);
        self.offsets.insert(entity, offset);
        Ok(())
    }

    pub fn get(&self, entity: RomEntity) -> Option<usize> {
        self.offsets.get(&entity).copied()
    }

    pub fn pointer(&self, entity: RomEntity) -> Result<u16, CompilerError> {
        self.get(entity)
            .map(|offset| offset as u16)
            .ok_or_else(|| CompilerError::UnresolvedPointer(format!("{:?}", entity)))
    }

    pub fn token_pointer(&self, token: PhraseToken) -> Result<u16, CompilerError> {
        match token {
            PhraseToken::Word(id) => self.pointer(RomEntity::Word(id)),
            PhraseToken::Bank(id) => self.pointer(RomEntity::Bank(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RomEntity, usize)> + '_ {
        self.offsets.iter().map(|(e, o)| (*e, *o))
    }

    /// Reverse lookup: entity labels keyed by ROM offset, for the hex dump
    pub fn annotations(&self, pack: &PhrasePack) -> BTreeMap<usize, String> {
        let mut phrase_labels = IndexMap::new();
        for bank in pack.banks.values() {
            for (index, phrase) in bank.phrases.iter().enumerate() {
                let tokens: Vec<String> =
                    phrase.tokens.iter().map(|t| pack.token_name(*t)).collect();
                phrase_labels.insert(
                    phrase.id,
                    format!("Phrase {} of [{}]: {}", index, bank.name, tokens.join(" ")),
                );
            }
        }

        let mut labels: BTreeMap<usize, String> = BTreeMap::new();
        for (entity, offset) in self.iter() {
            let label = match entity {
                RomEntity::Header => {
                    "ROM Header, word bank start pointer and the primary bank pointer.".to_string()
                }
                RomEntity::Bank(id) => format!("PhraseBank [{}]", pack.bank(id).name),
                RomEntity::Phrase(id) => match phrase_labels.get(&id) {
                    Some(label) => label.clone(),
                    None => format!("Phrase #{}", id.0),
                },
                RomEntity::WordBankStart => "Word bank".to_string(),
                RomEntity::Word(id) => format!("Word [{}]", pack.word(id).text),
            };
            match labels.get_mut(&offset) {
                Some(existing) => {
                    existing.push_str(" / ");
                    existing.push_str(&label);
                }
                None => {
                    labels.insert(offset, label);
                }
            }
        }
        labels
    }
}
