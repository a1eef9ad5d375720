// Compiler configuration, read from phrasepack.toml

use crate::phrase_compiler::error::CompilerError;
use crate::phrase_compiler::semantic::DEFAULT_PRIMARY_BANK;
use crate::phrase_compiler::word_bank::CommandEncoder;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "phrasepack.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Bank the ROM header's primary pointer refers to
    pub primary_bank: String,
    /// Hex dump wrapping, 0 for a single line
    pub bytes_per_line: usize,
    /// Number of phrases say-phrase prints
    pub preview_count: usize,
    pub encoder: EncoderConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// External encoder; receives the .wav path as its last argument
    pub program: Option<String>,
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            primary_bank: DEFAULT_PRIMARY_BANK.to_string(),
            bytes_per_line: 20,
            preview_count: 10,
            encoder: EncoderConfig::default(),
        }
    }
}

impl CompilerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, CompilerError> {
        toml::from_str(source).map_err(|e| CompilerError::ConfigError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = fs::read_to_string(path).map_err(|e| CompilerError::io(path, e))?;
        let config = Self::from_toml_str(&source)
            .map_err(|e| CompilerError::ConfigError(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load `phrasepack.toml` from the pack directory, or fall back to defaults
    pub fn discover(pack_dir: &Path) -> Result<Self, CompilerError> {
        let path = pack_dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn command_encoder(&self) -> Result<CommandEncoder, CompilerError> {
        match &self.encoder.program {
            Some(program) => Ok(CommandEncoder::new(program, self.encoder.args.clone())),
            None => Err(CompilerError::ConfigError(format!(
                "no [encoder] program configured; add one to {}",
                CONFIG_FILE_NAME
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CompilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.primary_bank, "primary");
        assert_eq!(config.bytes_per_line, 20);
        assert_eq!(config.preview_count, 10);
        assert!(config.command_encoder().is_err());
    }

    #[test]
    fn full_config() {
        let config = CompilerConfig::from_toml_str(
            r#"
primary_bank = "insult"
bytes_per_line = 16
preview_count = 3

[encoder]
program = "talkie-encode"
args = ["--rate", "8000"]
"#,
        )
        .unwrap();
        assert_eq!(config.primary_bank, "insult");
        assert_eq!(config.bytes_per_line, 16);
        assert_eq!(config.preview_count, 3);
        assert_eq!(config.encoder.program.as_deref(), Some("talkie-encode"));
        assert_eq!(config.encoder.args, vec!["--rate", "8000"]);
        assert!(config.command_encoder().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = CompilerConfig::from_toml_str("primary = \"oops\"\n");
        assert!(matches!(result, Err(CompilerError::ConfigError(_))));
    }

    #[test]
    fn discover_in_pack_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            CompilerConfig::discover(dir.path()).unwrap(),
            CompilerConfig::default()
        );

        fs::write(dir.path().join(CONFIG_FILE_NAME), "preview_count = 2\n").unwrap();
        assert_eq!(CompilerConfig::discover(dir.path()).unwrap().preview_count, 2);
    }
}
