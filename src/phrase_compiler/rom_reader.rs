// ROM Reader
// Walks a compiled image the way the playback firmware does

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::layout::{HEADER_SIZE, POINTER_SIZE};
use crate::phrase_rand::PhraseRand;

/// What a token pointer refers to, decided by the word bank start pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    PhraseBank(u16),
    Word(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RomBank {
    pub offset: u16,
    pub phrases: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RomPhrase {
    pub offset: u16,
    pub tokens: Vec<u16>,
}

#[derive(Debug)]
pub struct RomReader<'a> {
    rom: &'a [u8],
    word_bank_start: u16,
    primary: u16,
}

impl<'a> RomReader<'a> {
    pub fn new(rom: &'a [u8]) -> Result<Self, CompilerError> {
        if rom.len() < HEADER_SIZE {
            return Err(CompilerError::InvalidRom(format!(
                "image is {} bytes, the header alone needs {}",
                rom.len(),
                HEADER_SIZE
            )));
        }
        let reader = RomReader {
            rom,
            word_bank_start: read_pointer(rom, 0),
            primary: read_pointer(rom, POINTER_SIZE),
        };

        if (reader.word_bank_start as usize) < HEADER_SIZE
            || reader.word_bank_start as usize > rom.len()
        {
            return Err(CompilerError::InvalidRom(format!(
                "word bank start 0x{:04x} outside image",
                reader.word_bank_start
            )));
        }
        if (reader.primary as usize) < HEADER_SIZE || reader.primary >= reader.word_bank_start {
            return Err(CompilerError::InvalidRom(format!(
                "primary bank pointer 0x{:04x} outside the phrase bank region",
                reader.primary
            )));
        }
        Ok(reader)
    }

    pub fn word_bank_start(&self) -> u16 {
        self.word_bank_start
    }

    pub fn primary(&self) -> u16 {
        self.primary
    }

    /// Pointers below the word bank start are phrase banks, the rest are words
    pub fn classify(&self, pointer: u16) -> PointerKind {
        if pointer < self.word_bank_start {
            PointerKind::PhraseBank(pointer)
        } else {
            PointerKind::Word(pointer)
        }
    }

    pub fn bank_at(&self, offset: u16) -> Result<RomBank, CompilerError> {
        let (count, pointers) = self.counted_pointers(offset, "phrase bank")?;
        if count == 0 {
            return Err(CompilerError::InvalidRom(format!(
                "phrase bank at 0x{:04x} has no phrases",
                offset
            )));
        }
        Ok(RomBank {
            offset,
            phrases: pointers,
        })
    }

    pub fn phrase_at(&self, offset: u16) -> Result<RomPhrase, CompilerError> {
        let (_, tokens) = self.counted_pointers(offset, "phrase")?;
        Ok(RomPhrase { offset, tokens })
    }

    /// Decode every bank by walking the phrase bank region from the header
    pub fn banks(&self) -> Result<Vec<(RomBank, Vec<RomPhrase>)>, CompilerError> {
        let mut banks = Vec::new();
        let mut offset = HEADER_SIZE;
        while offset < self.word_bank_start as usize {
            let bank = self.bank_at(offset as u16)?;
            offset += 1 + bank.phrases.len() * POINTER_SIZE;

            let mut phrases = Vec::with_capacity(bank.phrases.len());
            for pointer in &bank.phrases {
                if *pointer as usize != offset {
                    return Err(CompilerError::InvalidRom(format!(
                        "phrase pointer 0x{:04x} does not follow its bank (expected 0x{:04x})",
                        pointer, offset
                    )));
                }
                let phrase = self.phrase_at(*pointer)?;
                for token in &phrase.tokens {
                    self.token_target(*token)?;
                }
                offset += 1 + phrase.tokens.len() * POINTER_SIZE;
                phrases.push(phrase);
            }
            banks.push((bank, phrases));
        }

        if offset != self.word_bank_start as usize {
            return Err(CompilerError::InvalidRom(format!(
                "phrase bank region ends at 0x{:04x}, word bank starts at 0x{:04x}",
                offset, self.word_bank_start
            )));
        }

        let starts: Vec<u16> = banks.iter().map(|(bank, _)| bank.offset).collect();
        if !starts.contains(&self.primary) {
            return Err(CompilerError::InvalidRom(format!(
                "primary bank pointer 0x{:04x} is not the start of a phrase bank",
                self.primary
            )));
        }
        for (_, phrases) in &banks {
            for phrase in phrases {
                for token in &phrase.tokens {
                    if *token < self.word_bank_start && !starts.contains(token) {
                        return Err(CompilerError::InvalidRom(format!(
                            "phrase at 0x{:04x} references 0x{:04x}, which is not a phrase bank",
                            phrase.offset, token
                        )));
                    }
                }
            }
        }
        Ok(banks)
    }

    /// Play one phrase from the primary bank, returning the word pointers in speaking order
    pub fn realize(&self, rand: &mut PhraseRand) -> Result<Vec<u16>, CompilerError> {
        let mut words = Vec::new();
        let mut active = Vec::new();
        self.render_bank(self.primary, rand, &mut active, &mut words)?;
        Ok(words)
    }

    fn render_bank(
        &self,
        offset: u16,
        rand: &mut PhraseRand,
        active: &mut Vec<u16>,
        out: &mut Vec<u16>,
    ) -> Result<(), CompilerError> {
        if active.contains(&offset) {
            return Err(CompilerError::InvalidRom(format!(
                "phrase bank at 0x{:04x} references itself",
                offset
            )));
        }
        active.push(offset);

        let bank = self.bank_at(offset)?;
        let phrase = self.phrase_at(bank.phrases[rand.pick(bank.phrases.len())])?;
        for token in phrase.tokens {
            match self.token_target(token)? {
                PointerKind::Word(word) => out.push(word),
                PointerKind::PhraseBank(nested) => self.render_bank(nested, rand, active, out)?,
            }
        }

        active.pop();
        Ok(())
    }

    /// Classify a token pointer, rejecting ones the firmware could not follow
    pub fn token_target(&self, pointer: u16) -> Result<PointerKind, CompilerError> {
        if (pointer as usize) < HEADER_SIZE {
            return Err(CompilerError::InvalidRom(format!(
                "token pointer 0x{:04x} points into the header",
                pointer
            )));
        }
        if pointer as usize >= self.rom.len() {
            return Err(CompilerError::InvalidRom(format!(
                "token pointer 0x{:04x} is outside the image",
                pointer
            )));
        }
        Ok(self.classify(pointer))
    }

    fn counted_pointers(&self, offset: u16, what: &str) -> Result<(usize, Vec<u16>), CompilerError> {
        let start = offset as usize;
        let count = *self.rom.get(start).ok_or_else(|| {
            CompilerError::InvalidRom(format!("{} at 0x{:04x} is outside the image", what, offset))
        })? as usize;

        let end = start + 1 + count * POINTER_SIZE;
        if end > self.rom.len() {
            return Err(CompilerError::InvalidRom(format!(
                "{} at 0x{:04x} runs past the end of the image",
                what, offset
            )));
        }

        let pointers = (0..count)
            .map(|i| read_pointer(self.rom, start + 1 + i * POINTER_SIZE))
            .collect();
        Ok((count, pointers))
    }
}

fn read_pointer(rom: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([rom[at], rom[at + 1]])
}

#[cfg(test)]
#[path = "rom_reader_tests.rs"]
mod tests;
