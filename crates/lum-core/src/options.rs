//! Game options and configuration
//!
//! Options come from an rc file of `OPTIONS=` lines or from JSON, then get
//! overridden by command-line flags in the front end.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_HEIGHT, DEFAULT_LIGHT_RADIUS, DEFAULT_WIDTH, ITEM_ATTEMPT_FACTOR, ITEM_DIVISOR,
};
use crate::maze::{GeneratorSettings, validate_dimensions};

/// User-configurable game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub width: usize,
    pub height: usize,
    pub light_radius: f32,
    /// Fixed seed for the first maze; `None` draws one from entropy
    pub seed: Option<u64>,
    pub item_divisor: usize,
    pub item_attempt_factor: usize,
    pub strict_items: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            light_radius: DEFAULT_LIGHT_RADIUS,
            seed: None,
            item_divisor: ITEM_DIVISOR,
            item_attempt_factor: ITEM_ATTEMPT_FACTOR,
            strict_items: false,
        }
    }
}

impl GameOptions {
    /// Load options from a file. `.json` files are parsed as JSON, anything
    /// else as an rc file.
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::parse_config(&contents)
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(contents).map_err(|e| OptionsError::ParseError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        serde_json::to_string_pretty(self).map_err(|e| OptionsError::ParseError(e.to_string()))
    }

    /// Parse options from rc text
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(opts) = line.strip_prefix("OPTIONS=") else {
                return Err(OptionsError::ParseError(format!(
                    "line {}: expected OPTIONS=, got '{}'",
                    lineno + 1,
                    line
                )));
            };
            for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                options.parse_option(opt)?;
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "strict_items" => self.strict_items = value,
            "width" | "height" | "radius" | "light_radius" | "seed" | "item_divisor"
            | "item_attempts" | "item_attempt_factor" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "width" => self.width = value.parse().map_err(|_| invalid())?,
            "height" => self.height = value.parse().map_err(|_| invalid())?,
            "radius" | "light_radius" => {
                self.light_radius = value.parse().map_err(|_| invalid())?;
            }
            "seed" => {
                self.seed = match value {
                    "random" | "none" => None,
                    v => Some(v.parse().map_err(|_| invalid())?),
                };
            }
            "item_divisor" => self.item_divisor = value.parse().map_err(|_| invalid())?,
            "item_attempts" | "item_attempt_factor" => {
                self.item_attempt_factor = value.parse().map_err(|_| invalid())?;
            }
            "strict_items" => {
                self.strict_items = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options in rc format
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OptionsError::IoError(e.to_string()))?;
        }
        std::fs::write(path, self.to_config_string())
            .map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to rc format
    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# luminescence configuration".to_string(), String::new()];

        lines.push(format!(
            "OPTIONS=width:{},height:{},radius:{}",
            self.width, self.height, self.light_radius
        ));
        if let Some(seed) = self.seed {
            lines.push(format!("OPTIONS=seed:{seed}"));
        }
        lines.push(format!(
            "OPTIONS=item_divisor:{},item_attempts:{}",
            self.item_divisor, self.item_attempt_factor
        ));
        lines.push(format!(
            "OPTIONS={}strict_items",
            if self.strict_items { "" } else { "!" }
        ));

        lines.join("\n") + "\n"
    }

    /// Reject combinations the generator or lighting engine would refuse
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_dimensions(self.width, self.height)
            .map_err(|e| OptionsError::Invalid(e.to_string()))?;

        if !self.light_radius.is_finite() || self.light_radius <= 0.0 {
            return Err(OptionsError::Invalid(format!(
                "light radius must be positive, got {}",
                self.light_radius
            )));
        }
        if self.item_divisor > 0 && self.item_attempt_factor == 0 {
            return Err(OptionsError::Invalid(
                "item_attempts must be at least 1 when items are enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            item_divisor: self.item_divisor,
            item_attempt_factor: self.item_attempt_factor,
            strict_items: self.strict_items,
        }
    }
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),
    #[error("Missing value for option '{0}'")]
    MissingValue(String),
    #[error("Invalid options: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GameOptions::default();
        assert_eq!((opts.width, opts.height), (21, 21));
        assert_eq!(opts.light_radius, 5.0);
        assert_eq!(opts.item_divisor, 20);
        assert!(!opts.strict_items);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_parse_value_options() {
        let config = "# comment\n\nOPTIONS=width:31,height:15,radius:6.5\nOPTIONS=seed:42";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.width, 31);
        assert_eq!(opts.height, 15);
        assert_eq!(opts.light_radius, 6.5);
        assert_eq!(opts.seed, Some(42));
    }

    #[test]
    fn test_parse_bool_option() {
        let opts = GameOptions::parse_config("OPTIONS=strict_items").unwrap();
        assert!(opts.strict_items);
        let opts = GameOptions::parse_config("OPTIONS=strict_items,nostrict_items").unwrap();
        assert!(!opts.strict_items);
        let opts = GameOptions::parse_config("OPTIONS=strict_items:off").unwrap();
        assert!(!opts.strict_items);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            GameOptions::parse_config("OPTIONS=colour"),
            Err(OptionsError::UnknownOption("colour".to_string()))
        );
        assert_eq!(
            GameOptions::parse_config("OPTIONS=width:wide"),
            Err(OptionsError::InvalidValue("width".into(), "wide".into()))
        );
        assert_eq!(
            GameOptions::parse_config("OPTIONS=seed"),
            Err(OptionsError::MissingValue("seed".to_string()))
        );
        assert!(matches!(
            GameOptions::parse_config("width=3"),
            Err(OptionsError::ParseError(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let opts = GameOptions {
            width: 41,
            seed: Some(7),
            strict_items: true,
            light_radius: 3.25,
            ..GameOptions::default()
        };
        let parsed = GameOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let opts = GameOptions::from_json(r#"{"width": 11, "seed": 3}"#).unwrap();
        assert_eq!(opts.width, 11);
        assert_eq!(opts.height, DEFAULT_HEIGHT);
        assert_eq!(opts.seed, Some(3));

        let back = GameOptions::from_json(&opts.to_json().unwrap()).unwrap();
        assert_eq!(back, opts);
        assert!(GameOptions::from_json("{not json").is_err());
    }

    #[test]
    fn test_validate() {
        let bad = [
            GameOptions {
                width: 20,
                ..GameOptions::default()
            },
            GameOptions {
                light_radius: 0.0,
                ..GameOptions::default()
            },
            GameOptions {
                item_attempt_factor: 0,
                ..GameOptions::default()
            },
        ];
        for opts in bad {
            assert!(matches!(opts.validate(), Err(OptionsError::Invalid(_))));
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("lum-opts-{}", std::process::id()));
        let rc = dir.join("luminescence.rc");
        let opts = GameOptions {
            height: 9,
            ..GameOptions::default()
        };
        opts.save_to_file(&rc).unwrap();
        assert_eq!(GameOptions::load_from_file(&rc).unwrap(), opts);

        let json = dir.join("options.json");
        std::fs::write(&json, opts.to_json().unwrap()).unwrap();
        assert_eq!(GameOptions::load_from_file(&json).unwrap(), opts);

        let _ = std::fs::remove_dir_all(&dir);
        assert!(matches!(
            GameOptions::load_from_file(&rc),
            Err(OptionsError::IoError(_))
        ));
    }
}
