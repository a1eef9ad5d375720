/// rom_image.rs
/// ROM serialization (Pass 2) and final image assembly
///
use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::hexdump::hex_dump;
use crate::phrase_compiler::layout::{calculate_layout, RomLayout, HEADER_SIZE};
use crate::phrase_compiler::pointer_table::{PointerTable, RomEntity};
use crate::phrase_compiler::token::{BankId, PhrasePack};
use crate::phrase_compiler::word_bank::WordBank;
use std::collections::BTreeMap;

/// A linked ROM image together with the pointer table used to build it
#[derive(Debug, Clone)]
pub struct LinkedRom {
    pub bytes: Vec<u8>,
    pub pointers: PointerTable,
    pub word_bank_start: usize,
    pub primary: BankId,
}

impl LinkedRom {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn annotations(&self, pack: &PhrasePack) -> BTreeMap<usize, String> {
        self.pointers.annotations(pack)
    }

    /// Hex listing with an address comment in front of every bank, phrase and word
    pub fn hex_dump(&self, pack: &PhrasePack, bytes_per_line: usize) -> String {
        hex_dump(&self.bytes, bytes_per_line, &self.annotations(pack))
    }
}

pub struct RomLinker<'a> {
    pack: &'a PhrasePack,
    word_bank: &'a WordBank,
}

impl<'a> RomLinker<'a> {
    pub fn new(pack: &'a PhrasePack, word_bank: &'a WordBank) -> Self {
        RomLinker { pack, word_bank }
    }

    pub fn link(&self, primary_bank: &str) -> Result<LinkedRom, CompilerError> {
        let primary = self
            .pack
            .bank_named(primary_bank)
            .ok_or_else(|| CompilerError::MissingPrimaryBank(primary_bank.to_string()))?
            .id;

        // Pass 1: every bank, phrase and word gets its offset
        log::info!("Pass 1: assigning offsets");
        let layout = calculate_layout(self.pack, self.word_bank)?;

        // Pass 2: serialize phrase banks against the finished pointer table
        log::info!("Pass 2: serializing phrase banks");
        let phrase_data = self.output_phrase_data(&layout.pointers)?;
        if phrase_data.len() != layout.phrase_region_len() {
            return Err(CompilerError::LayoutMismatch {
                expected: layout.phrase_region_len(),
                actual: phrase_data.len(),
            });
        }

        let primary_offset = layout.pointers.pointer(RomEntity::Bank(primary))?;
        let bytes = assemble_rom(&layout, primary_offset, &phrase_data)?;

        log::info!("Expected ROM size: {} bytes", layout.end);
        log::info!("Actual ROM size was: {} bytes", bytes.len());

        Ok(LinkedRom {
            bytes,
            pointers: layout.pointers,
            word_bank_start: layout.word_bank_start,
            primary,
        })
    }

    /// Bank count, phrase directory, then each phrase's token pointers
    fn output_phrase_data(&self, pointers: &PointerTable) -> Result<Vec<u8>, CompilerError> {
        let mut out = Vec::new();

        for bank in self.pack.banks.values() {
            self.check_position(pointers, RomEntity::Bank(bank.id), HEADER_SIZE + out.len())?;
            out.push(bank.phrases.len() as u8);
            for phrase in &bank.phrases {
                output_pointer(pointers.pointer(RomEntity::Phrase(phrase.id))?, &mut out);
            }

            for phrase in &bank.phrases {
                self.check_position(pointers, RomEntity::Phrase(phrase.id), HEADER_SIZE + out.len())?;
                out.push(phrase.tokens.len() as u8);
                for token in &phrase.tokens {
                    output_pointer(pointers.token_pointer(*token)?, &mut out);
                }
            }
        }

        Ok(out)
    }

    fn check_position(
        &self,
        pointers: &PointerTable,
        entity: RomEntity,
        actual: usize,
    ) -> Result<(), CompilerError> {
        let expected = pointers
            .get(entity)
            .ok_or_else(|| CompilerError::UnresolvedPointer(format!("{:?}", entity)))?;
        if expected != actual {
            return Err(CompilerError::LayoutMismatch { expected, actual });
        }
        Ok(())
    }
}

fn assemble_rom(
    layout: &RomLayout,
    primary_offset: u16,
    phrase_data: &[u8],
) -> Result<Vec<u8>, CompilerError> {
    let mut rom = Vec::with_capacity(layout.end);
    output_pointer(layout.word_bank_start as u16, &mut rom);
    output_pointer(primary_offset, &mut rom);
    rom.extend_from_slice(phrase_data);
    rom.extend_from_slice(&layout.word_data);

    if rom.len() != layout.end {
        return Err(CompilerError::LayoutMismatch {
            expected: layout.end,
            actual: rom.len(),
        });
    }
    Ok(rom)
}

/// Note endianness! The firmware reads `bytes[n] | bytes[n + 1] << 8`
pub fn output_pointer(pointer: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&pointer.to_le_bytes());
}

#[cfg(test)]
#[path = "linker_tests.rs"]
mod tests;
