// Directory scanning shared by the phrase pack parser and the word bank builder

use crate::phrase_compiler::error::CompilerError;
use std::fs;
use std::path::{Path, PathBuf};

/// True for the lowercase snake-case ids used by words, banks and file stems
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

pub fn check_readable_directory(path: &Path) -> Result<(), CompilerError> {
    if !path.exists() {
        return Err(CompilerError::IOError(format!(
            "Path \"{}\" did not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(CompilerError::IOError(format!(
            "Path \"{}\" was not a directory",
            path.display()
        )));
    }
    fs::read_dir(path).map_err(|e| CompilerError::io(path, e))?;
    Ok(())
}

/// Regular files in `dir` named `<identifier>.<extension>`, sorted by file
/// name and paired with their stem.
pub fn identifier_files(
    dir: &Path,
    extension: &str,
) -> Result<Vec<(String, PathBuf)>, CompilerError> {
    check_readable_directory(dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CompilerError::io(dir, e))? {
        let entry = entry.map_err(|e| CompilerError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let stem = match identifier_stem(&path, extension) {
            Some(stem) => stem,
            None => {
                log::debug!("Skipping {}: not a .{} identifier file", path.display(), extension);
                continue;
            }
        };
        files.push((stem, path));
    }

    files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));
    Ok(files)
}

fn identifier_stem(path: &Path, extension: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    if is_identifier(stem) {
        Some(stem.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_lowercase_snake_case() {
        assert!(is_identifier("hello"));
        assert!(is_identifier("big_nose"));
        assert!(is_identifier("_"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("Hello"));
        assert!(!is_identifier("r2d2"));
        assert!(!is_identifier("{greet}"));
    }

    #[test]
    fn identifier_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zebra.txt", "apple.txt", "Bad.txt", "notes.md", "two_words.txt", "x1.txt"] {
            fs::write(dir.path().join(name), "word\n").unwrap();
        }
        fs::create_dir(dir.path().join("folder.txt")).unwrap();

        let stems: Vec<String> = identifier_files(dir.path(), "txt")
            .unwrap()
            .into_iter()
            .map(|(stem, _)| stem)
            .collect();
        assert_eq!(stems, vec!["apple", "two_words", "zebra"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match check_readable_directory(&missing) {
            Err(CompilerError::IOError(msg)) => assert!(msg.contains("did not exist")),
            other => panic!("expected IOError, got {:?}", other),
        }
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("primary.txt");
        fs::write(&file, "hello\n").unwrap();
        match check_readable_directory(&file) {
            Err(CompilerError::IOError(msg)) => assert!(msg.contains("was not a directory")),
            other => panic!("expected IOError, got {:?}", other),
        }
    }
}
