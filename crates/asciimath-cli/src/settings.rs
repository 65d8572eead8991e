use std::{fmt, fs, io, path::Path};

use asciimath_core::Config;

/// Why the settings file could not be used.
#[derive(Debug)]
pub enum SettingsError {
    Read(io::Error),
    Invalid(toml::de::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Read(err) => write!(f, "cannot read settings: {err}"),
            SettingsError::Invalid(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Read(err) => Some(err),
            SettingsError::Invalid(err) => Some(err),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Read(err)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(err: toml::de::Error) -> Self {
        SettingsError::Invalid(err)
    }
}

/// Read converter settings from a TOML file. Keys use the kebab-case field names of [`Config`],
/// and missing keys keep their defaults.
pub fn load_settings(path: &Path) -> Result<Config, SettingsError> {
    parse_settings(&fs::read_to_string(path)?)
}

fn parse_settings(text: &str) -> Result<Config, SettingsError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use asciimath_core::{MathDisplay, PrettyPrint};

    use super::*;

    #[test]
    fn style_settings() {
        let config = parse_settings(
            r##"
            display = "block"
            math-color = "#333"
            "##,
        )
        .unwrap();
        assert_eq!(config.display, MathDisplay::Block);
        assert_eq!(config.math_color.as_deref(), Some("#333"));
        assert_eq!(config.pretty_print, PrettyPrint::Never);
    }

    #[test]
    fn malformed_settings() {
        let err = parse_settings("display = ").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().starts_with("invalid settings: "));
    }

    #[test]
    fn missing_settings_file() {
        let err = load_settings(Path::new("no/such/settings.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read(_)));
    }
}
