// Compiler Error Handling

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CompilerError {
    // Parse errors
    MalformedToken {
        bank: String,
        line: usize,
        token: String,
    },
    UnresolvedBank {
        bank: String,
        line: usize,
        reference: String,
    },

    // Validation errors
    EmptyBank(String),
    MissingPrimaryBank(String),
    UnknownBank(String),
    MissingWord(String),
    CycleDetected(Vec<String>), // bank chain, first == last

    // Limit errors
    TooManyPhrases {
        bank: String,
        count: usize,
    },
    TooManyTokens {
        bank: String,
        phrase: usize, // index within the bank
        count: usize,
    },
    RomTooLarge(usize),

    // Link errors
    LayoutMismatch {
        expected: usize,
        actual: usize,
    },
    UnresolvedPointer(String),

    // Word bank errors
    EncodingError {
        file: String,
        message: String,
    },

    // ROM reader errors
    InvalidRom(String),

    // Configuration errors
    ConfigError(String),

    // IO errors
    IOError(String),
}

impl CompilerError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        CompilerError::IOError(format!("{}: {}", path.display(), err))
    }
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompilerError::MalformedToken { bank, line, token } => {
                write!(
                    f,
                    "Parse error in bank \"{}\" line {}: token \"{}\" did not parse",
                    bank, line, token
                )
            }
            CompilerError::UnresolvedBank {
                bank,
                line,
                reference,
            } => {
                write!(
                    f,
                    "Parse error in bank \"{}\" line {}: phrase bank \"{}\" did not exist",
                    bank, line, reference
                )
            }
            CompilerError::EmptyBank(bank) => {
                write!(
                    f,
                    "All phrase banks must be populated. Phrase bank \"{}\" was empty",
                    bank
                )
            }
            CompilerError::MissingPrimaryBank(bank) => {
                write!(f, "No \"{}\" phrase bank found", bank)
            }
            CompilerError::UnknownBank(bank) => {
                write!(f, "Unknown phrase bank \"{}\"", bank)
            }
            CompilerError::MissingWord(word) => {
                write!(f, "Word \"{}\" was not found in word bank", word)
            }
            CompilerError::CycleDetected(chain) => {
                write!(f, "Phrase bank cycle detected: {}", chain.join(" -> "))
            }
            CompilerError::TooManyPhrases { bank, count } => {
                write!(
                    f,
                    "Limit exceeded: phrase bank \"{}\" has {} phrases, at most 255 are supported",
                    bank, count
                )
            }
            CompilerError::TooManyTokens {
                bank,
                phrase,
                count,
            } => {
                write!(
                    f,
                    "Limit exceeded: phrase {} of bank \"{}\" has {} tokens, at most 255 are supported",
                    phrase, bank, count
                )
            }
            CompilerError::RomTooLarge(size) => {
                write!(
                    f,
                    "Limit exceeded: ROM needs {} bytes, 16-bit pointers address at most 65536",
                    size
                )
            }
            CompilerError::LayoutMismatch { expected, actual } => {
                write!(
                    f,
                    "Layout mismatch: expected {} bytes but emitted {}",
                    expected, actual
                )
            }
            CompilerError::UnresolvedPointer(what) => {
                write!(f, "Could not find pointer for {}", what)
            }
            CompilerError::EncodingError { file, message } => {
                write!(f, "Encoding error for \"{}\": {}", file, message)
            }
            CompilerError::InvalidRom(msg) => {
                write!(f, "Invalid ROM: {}", msg)
            }
            CompilerError::ConfigError(msg) => {
                write!(f, "Config error: {}", msg)
            }
            CompilerError::IOError(msg) => {
                write!(f, "IO error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CompilerError {}
