/// ROM Layout Constants and Offset Assignment (Pass 1)
///
/// ```text
/// [--------------------------- ROM HEADER --------------------------][------- ROM DATA ------]
/// [word bank start pointer (2 bytes)][primary bank pointer (2 bytes)][phrase banks][word bank]
/// ```
///
/// Phrases point at banks defined before or after them, so every bank and
/// phrase needs an offset before any phrase data can be written. This pass
/// walks the pack in order, sizes each structure and records where it will
/// land. Word blobs follow the phrase banks and are collected here too.
use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::pointer_table::{PointerTable, RomEntity};
use crate::phrase_compiler::token::PhrasePack;
use crate::phrase_compiler::word_bank::WordBank;

/// Pointers stay 16-bit, little-endian
pub const POINTER_SIZE: usize = 2;

/// Word bank start pointer and primary bank pointer
pub const HEADER_SIZE: usize = 2 * POINTER_SIZE;

/// Phrase and token counts are stored in one byte
pub const MAX_COUNT: usize = 255;

pub const MAX_ROM_SIZE: usize = 0x1_0000;

/// Bytes taken by a bank header: count byte plus the phrase directory
pub const fn bank_header_size(phrase_count: usize) -> usize {
    1 + phrase_count * POINTER_SIZE
}

/// Bytes taken by a phrase: count byte plus one pointer per token
pub const fn phrase_size(token_count: usize) -> usize {
    1 + token_count * POINTER_SIZE
}

#[derive(Debug, Clone)]
pub struct RomLayout {
    pub pointers: PointerTable,
    /// First byte after the phrase banks, also where the word bank starts
    pub word_bank_start: usize,
    pub word_data: Vec<u8>,
    /// Total image size
    pub end: usize,
}

impl RomLayout {
    /// Size of the phrase bank region between header and word bank
    pub fn phrase_region_len(&self) -> usize {
        self.word_bank_start - HEADER_SIZE
    }
}

pub fn calculate_layout(pack: &PhrasePack, word_bank: &WordBank) -> Result<RomLayout, CompilerError> {
    let mut pointers = PointerTable::new();
    pointers.assign(RomEntity::Header, 0)?;

    let word_bank_start = calculate_phrase_bank_offsets(pack, &mut pointers, HEADER_SIZE)?;
    pointers.assign(RomEntity::WordBankStart, word_bank_start)?;

    let word_data = extract_word_data(pack, word_bank, &mut pointers, word_bank_start)?;
    let end = word_bank_start + word_data.len();
    if end > MAX_ROM_SIZE {
        return Err(CompilerError::RomTooLarge(end));
    }

    log::info!(
        "Layout: phrase banks 0x{:04x}-0x{:04x}, word bank 0x{:04x}-0x{:04x} ({} bytes total)",
        HEADER_SIZE,
        word_bank_start,
        word_bank_start,
        end,
        end
    );

    Ok(RomLayout {
        pointers,
        word_bank_start,
        word_data,
        end,
    })
}

/// Assign offsets to every bank and phrase, returning the offset after the last one
pub fn calculate_phrase_bank_offsets(
    pack: &PhrasePack,
    pointers: &mut PointerTable,
    mut offset: usize,
) -> Result<usize, CompilerError> {
    for bank in pack.banks.values() {
        if bank.phrases.len() > MAX_COUNT {
            return Err(CompilerError::TooManyPhrases {
                bank: bank.name.clone(),
                count: bank.phrases.len(),
            });
        }
        pointers.assign(RomEntity::Bank(bank.id), offset)?;
        offset += bank_header_size(bank.phrases.len());

        for (index, phrase) in bank.phrases.iter().enumerate() {
            if phrase.tokens.len() > MAX_COUNT {
                return Err(CompilerError::TooManyTokens {
                    bank: bank.name.clone(),
                    phrase: index,
                    count: phrase.tokens.len(),
                });
            }
            pointers.assign(RomEntity::Phrase(phrase.id), offset)?;
            offset += phrase_size(phrase.tokens.len());
        }
    }
    Ok(offset)
}

/// Collect the blob of every word the pack uses, in discovery order
pub fn extract_word_data(
    pack: &PhrasePack,
    word_bank: &WordBank,
    pointers: &mut PointerTable,
    start_offset: usize,
) -> Result<Vec<u8>, CompilerError> {
    let mut word_data = Vec::new();
    for word in pack.words.values() {
        let blob = word_bank
            .get(&word.text)
            .ok_or_else(|| CompilerError::MissingWord(word.text.clone()))?;
        pointers.assign(RomEntity::Word(word.id), start_offset + word_data.len())?;
        word_data.extend_from_slice(blob);
    }

    let unused = word_bank.len().saturating_sub(pack.words.len());
    if unused > 0 {
        log::debug!("{} words in the word bank are not used by the pack", unused);
    }
    Ok(word_data)
}
