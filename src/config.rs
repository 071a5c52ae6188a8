use crate::model::Strictness;
use crate::transpiler::codegen::StandardHeaders;
use tracing::warn;

/// Strictness level, `1` (low) to `3` (high).
pub const LEVEL_VAR: &str = "CP3MM_LEVEL";
/// Comma separated header names to treat as standard library headers.
pub const STD_HEADERS_VAR: &str = "CP3MM_STD_HEADERS";

/// Settings for one run of the translator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub strictness: Strictness,
    pub force: bool,
    pub verbose: bool,
    pub extra_standard_headers: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source, `from_env` being the process one.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let strictness = lookup(LEVEL_VAR)
            .map(|value| parse_level(&value))
            .unwrap_or_default();

        let extra_standard_headers = lookup(STD_HEADERS_VAR)
            .map(|value| split_headers(&value))
            .unwrap_or_default();

        Self {
            strictness,
            extra_standard_headers,
            ..Self::default()
        }
    }

    /// A level given on the command line wins over the environment.
    pub fn with_level(mut self, level: Option<i64>) -> Self {
        if let Some(level) = level {
            self.strictness = Strictness::from_level(level);
        }
        self
    }

    pub fn with_extra_headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.extra_standard_headers.extend(headers);
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn standard_headers(&self) -> StandardHeaders {
        StandardHeaders::with_extra(self.extra_standard_headers.iter().cloned())
    }
}

fn parse_level(value: &str) -> Strictness {
    match value.trim().parse::<i64>() {
        Ok(level) => Strictness::from_level(level),
        Err(_) => {
            warn!(value, "strictness level is not a number, using medium");
            Strictness::default()
        }
    }
}

fn split_headers(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|header| !header.is_empty())
        .map(str::to_string)
        .collect()
}
