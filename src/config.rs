// vim: set ai et ts=4 sw=4 sts=4:
use std::fs;
use std::path::Path;
use std::convert::TryFrom;
use log::{LevelFilter, warn};
use yaml_rust::{Yaml, YamlLoader};

use crate::error::Error;

/// Largest grid side the candidate index can be built for.
pub const ABSOLUTE_MAX_SIZE: usize = 24;
pub const DEFAULT_MAX_SIZE: usize = 20;
pub const DEFAULT_SUBDIVISION: usize = 5;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
impl TryFrom<&str> for ColorMode {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "auto"   => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never"  => Ok(ColorMode::Never),
            _        => Err("expected one of auto, always, never"),
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Config {
    pub max_size: usize,
    pub subdivision: Option<usize>,
    pub color: ColorMode,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_size: DEFAULT_MAX_SIZE,
            subdivision: Some(DEFAULT_SUBDIVISION),
            color: ColorMode::Auto,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(s: &str) -> Result<Config, Error> {
        let docs = YamlLoader::load_from_str(s)?;
        match docs.first() {
            None      => Ok(Config::default()),
            Some(doc) => Self::from_yaml(doc),
        }
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Config, Error> {
        let mut config = Config::default();
        let hash = match doc {
            Yaml::Hash(h) => h,
            Yaml::Null    => return Ok(config),
            _             => return Err(Error::Config("expected a mapping at the top level".to_string())),
        };

        for (key, value) in hash {
            let key = key.as_str().ok_or_else(|| Error::Config(format!("non-string key {:?}", key)))?;
            match key {
                "max_size"    => config.set_max_size(Self::_parse_size(key, value)?)?,
                "subdivision" => config.subdivision = match value {
                                     Yaml::Null => None,
                                     _          => Some(Self::_parse_size(key, value)?),
                                 },
                "color"       => config.color = Self::_parse_str(key, value)
                                     .and_then(|s| ColorMode::try_from(s)
                                                       .map_err(|e| Error::Config(format!("color: {}", e))))?,
                "log_level"   => config.log_level = Self::_parse_str(key, value)
                                     .and_then(|s| s.parse::<LevelFilter>()
                                                    .map_err(|_| Error::Config(format!("log_level: unknown level {:?}", s))))?,
                _             => warn!("ignoring unknown configuration key {:?}", key),
            }
        }
        Ok(config)
    }

    pub fn set_max_size(&mut self, max_size: usize) -> Result<(), Error> {
        if max_size == 0 || max_size > ABSOLUTE_MAX_SIZE {
            return Err(Error::Config(format!(
                "max_size must be between 1 and {}, got {}", ABSOLUTE_MAX_SIZE, max_size)));
        }
        self.max_size = max_size;
        Ok(())
    }

    fn _parse_size(key: &str, value: &Yaml) -> Result<usize, Error> {
        value.as_i64()
             .filter(|&v| v > 0)
             .map(|v| v as usize)
             .ok_or_else(|| Error::Config(format!("{}: expected a positive integer, got {:?}", key, value)))
    }
    fn _parse_str<'a>(key: &str, value: &'a Yaml) -> Result<&'a str, Error> {
        value.as_str()
             .ok_or_else(|| Error::Config(format!("{}: expected a string, got {:?}", key, value)))
    }
}
