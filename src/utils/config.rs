use std::path::PathBuf;
use crate::error::ConfigError;

/// Options as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct RawOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub noindex: bool,
    pub progress: bool,
}

/// Fully resolved settings for one import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub build_index: bool,
    pub show_progress: bool,
}

impl ImportConfig {
    /// Both paths are required and the input must be an existing regular file.
    pub fn resolve(raw: RawOptions) -> Result<Self, ConfigError> {
        let (input, output) = match (raw.input, raw.output) {
            (None, None) => return Err(ConfigError::MissingInputAndOutput),
            (Some(_), None) => return Err(ConfigError::MissingOutput),
            (None, Some(_)) => return Err(ConfigError::MissingInput),
            (Some(input), Some(output)) => (input, output),
        };

        if !input.is_file() {
            return Err(ConfigError::InputNotFound { path: input });
        }

        Ok(Self {
            input,
            output,
            build_index: !raw.noindex,
            show_progress: raw.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn raw(input: Option<&Path>, output: Option<&Path>) -> RawOptions {
        RawOptions {
            input: input.map(Path::to_path_buf),
            output: output.map(Path::to_path_buf),
            ..RawOptions::default()
        }
    }

    #[test]
    fn test_missing_arguments() {
        let out = Path::new("out.db");
        let input = Path::new("hashes.txt");

        let err = ImportConfig::resolve(raw(None, None)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInputAndOutput));

        let err = ImportConfig::resolve(raw(Some(input), None)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutput));

        let err = ImportConfig::resolve(raw(None, Some(out))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInput));
    }

    #[test]
    fn test_input_must_exist() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.txt");

        let err = ImportConfig::resolve(raw(Some(&missing), Some(Path::new("out.db")))).unwrap_err();
        assert!(matches!(err, ConfigError::InputNotFound { .. }));

        // A directory is not a hash file either.
        let err = ImportConfig::resolve(raw(Some(dir.path()), Some(Path::new("out.db")))).unwrap_err();
        assert!(matches!(err, ConfigError::InputNotFound { .. }));
        Ok(())
    }

    #[test]
    fn test_index_built_unless_noindex() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("hashes.txt");
        fs::write(&input, "")?;

        let config = ImportConfig::resolve(raw(Some(&input), Some(Path::new("out.db"))))?;
        assert!(config.build_index);
        assert_eq!(config.output, PathBuf::from("out.db"));

        let config = ImportConfig::resolve(RawOptions {
            noindex: true,
            ..raw(Some(&input), Some(Path::new("out.db")))
        })?;
        assert!(!config.build_index);
        Ok(())
    }

    #[test]
    fn test_output_only_comes_from_the_command_line() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("hashes.txt");
        fs::write(&input, "")?;
        fs::write(dir.path().join(".env"), "HASH_IMPORT_OUTPUT=elsewhere.db\n")?;

        let err = ImportConfig::resolve(raw(Some(&input), None)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutput));
        Ok(())
    }
}
