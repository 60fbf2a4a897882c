//! Optional toml configuration for trace defaults
//!
//! Command-line switches always win over the file; the file only fills
//! in what was not given.

use std::path::Path;
use toml::value::{Table, Value};

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    De(toml::de::Error),
    WrongType {
        expected: &'static str,
        got: &'static str,
    },
    UnknownField(String),
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(fmt, "unable to read config file ({err})"),
            Self::De(err) => write!(fmt, "config file parsing error: {err}"),
            Self::WrongType { expected, got } => {
                write!(fmt, "expected type `{expected}`, got `{got}`")
            }
            Self::UnknownField(field) => {
                write!(fmt, "unknown field `{field}`")
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {}

macro_rules! getval {
    ($val:expr, $ty:ident) => {
        match $val {
            Value::$ty(val) => Ok(val),
            val => Err(ConfigLoadError::WrongType {
                expected: stringify!($ty),
                got: val.type_str(),
            }),
        }
    };
}

#[derive(Debug, Default, Clone)]
pub struct TraceConfig {
    pub count: Option<u32>,
    pub start: Option<u32>,
    pub native: bool,
}

impl TraceConfig {
    fn load(map: &Table) -> Result<Self, ConfigLoadError> {
        let mut config = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "count" => config.count = Some(*getval!(value, Integer)? as u32),
                "start" => config.start = Some((*getval!(value, Integer)? as u32) & 0xff_ffff),
                "native" => config.native = *getval!(value, Boolean)?,
                _ => return Err(ConfigLoadError::UnknownField(format!("trace.{key}"))),
            }
        }
        Ok(config)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub trace: TraceConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path)?;
        let value = content.parse::<Value>().map_err(ConfigLoadError::De)?;
        let map = getval!(&value, Table)?;
        let mut config = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "trace" => config.trace = TraceConfig::load(getval!(value, Table)?)?,
                _ => return Err(ConfigLoadError::UnknownField(key.clone())),
            }
        }
        Ok(config)
    }
}
