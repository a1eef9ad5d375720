// Word Bank Assembly
// Collects one encoded speech blob per word from a directory of recordings

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::paths::identifier_files;
use crate::phrase_compiler::talkie::{pack_frames, LpcFrame};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const WORD_AUDIO_EXTENSION: &str = "wav";

/// Turns one recorded word into a self-terminating speech blob
pub trait SpeechEncoder {
    fn encode(&mut self, audio: &Path) -> Result<Vec<u8>, CompilerError>;
}

/// Produces quantized LPC frames for a recording
pub trait FrameAnalyzer {
    fn analyze(&mut self, audio: &Path) -> Result<Vec<LpcFrame>, String>;
}

/// Runs an external encoder program; its stdout is the encoded word
#[derive(Debug, Clone)]
pub struct CommandEncoder {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEncoder {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        CommandEncoder {
            program: program.into(),
            args,
        }
    }
}

impl SpeechEncoder for CommandEncoder {
    fn encode(&mut self, audio: &Path) -> Result<Vec<u8>, CompilerError> {
        let file = audio.display().to_string();
        log::debug!("Running {} on {}", self.program.display(), file);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(audio)
            .output()
            .map_err(|e| CompilerError::EncodingError {
                file: file.clone(),
                message: format!("could not run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(CompilerError::EncodingError {
                file,
                message: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(output.stdout)
    }
}

/// Encodes via an analyzer and the Talkie frame packer
pub struct FramePackingEncoder<A: FrameAnalyzer> {
    analyzer: A,
}

impl<A: FrameAnalyzer> FramePackingEncoder<A> {
    pub fn new(analyzer: A) -> Self {
        FramePackingEncoder { analyzer }
    }
}

impl<A: FrameAnalyzer> SpeechEncoder for FramePackingEncoder<A> {
    fn encode(&mut self, audio: &Path) -> Result<Vec<u8>, CompilerError> {
        let to_error = |message: String| CompilerError::EncodingError {
            file: audio.display().to_string(),
            message,
        };
        let frames = self.analyzer.analyze(audio).map_err(to_error)?;
        pack_frames(&frames).map_err(to_error)
    }
}

/// Encoded words keyed by word id, in the order they were added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordBank {
    words: IndexMap<String, Vec<u8>>,
}

impl WordBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every `<word>.wav` in a directory, in file name order
    pub fn build(dir: &Path, encoder: &mut dyn SpeechEncoder) -> Result<WordBank, CompilerError> {
        let files = identifier_files(dir, WORD_AUDIO_EXTENSION)?;
        log::info!("Building word bank from {}: {} recordings", dir.display(), files.len());

        let mut bank = WordBank::new();
        for (word, path) in files {
            let data = encoder.encode(&path)?;
            if data.is_empty() {
                return Err(CompilerError::EncodingError {
                    file: path.display().to_string(),
                    message: "encoder produced no data".to_string(),
                });
            }
            log::debug!("Encoded \"{}\": {} bytes", word, data.len());
            bank.insert(&word, data);
        }
        Ok(bank)
    }

    pub fn insert(&mut self, word: &str, data: Vec<u8>) -> Option<Vec<u8>> {
        self.words.insert(word.to_string(), data)
    }

    pub fn get(&self, word: &str) -> Option<&[u8]> {
        self.words.get(word).map(|d| d.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl FromIterator<(String, Vec<u8>)> for WordBank {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        WordBank {
            words: iter.into_iter().collect(),
        }
    }
}
