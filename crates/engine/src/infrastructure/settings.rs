//! Environment-driven engine settings.

use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "sheetsmith_engine=info";

const LOG_VAR: &str = "SHEETSMITH_LOG";
const CHARACTER_VAR: &str = "SHEETSMITH_CHARACTER";
const CLASSES_VAR: &str = "SHEETSMITH_CLASSES";
const PRETTY_VAR: &str = "SHEETSMITH_PRETTY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub log_filter: String,
    /// Character snapshot to load; defaults are used when absent.
    pub character_path: Option<PathBuf>,
    /// JSON catalog of class (and optionally race) definitions.
    pub classes_path: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            character_path: None,
            classes_path: None,
            pretty: true,
        }
    }
}

impl EngineSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_filter: non_empty(LOG_VAR).unwrap_or(defaults.log_filter),
            character_path: non_empty(CHARACTER_VAR).map(PathBuf::from),
            classes_path: non_empty(CLASSES_VAR).map(PathBuf::from),
            pretty: non_empty(PRETTY_VAR)
                .map(|v| parse_flag(&v).unwrap_or(defaults.pretty))
                .unwrap_or(defaults.pretty),
        }
    }

    /// Positional `[character.json] [classes.json]` override the env paths.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        if let Some(character) = args.next() {
            self.character_path = Some(PathBuf::from(character));
        }
        if let Some(classes) = args.next() {
            self.classes_path = Some(PathBuf::from(classes));
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = EngineSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
        assert!(settings.pretty);
    }

    #[test]
    fn reads_every_variable() {
        let settings = EngineSettings::from_lookup(lookup(&[
            ("SHEETSMITH_LOG", "sheetsmith_engine=debug"),
            ("SHEETSMITH_CHARACTER", "hero.json"),
            ("SHEETSMITH_CLASSES", "classes.json"),
            ("SHEETSMITH_PRETTY", "off"),
        ]));
        assert_eq!(settings.log_filter, "sheetsmith_engine=debug");
        assert_eq!(settings.character_path, Some(PathBuf::from("hero.json")));
        assert_eq!(settings.classes_path, Some(PathBuf::from("classes.json")));
        assert!(!settings.pretty);
    }

    #[test]
    fn unparseable_flag_keeps_default() {
        let settings = EngineSettings::from_lookup(lookup(&[("SHEETSMITH_PRETTY", "maybe")]));
        assert!(settings.pretty);
    }

    #[test]
    fn positional_args_override_paths() {
        let settings = EngineSettings::from_lookup(lookup(&[("SHEETSMITH_CLASSES", "env.json")]))
            .with_args(["cli-hero.json"]);
        assert_eq!(settings.character_path, Some(PathBuf::from("cli-hero.json")));
        assert_eq!(settings.classes_path, Some(PathBuf::from("env.json")));

        let both = EngineSettings::default().with_args(["a.json", "b.json"]);
        assert_eq!(both.classes_path, Some(PathBuf::from("b.json")));
    }
}
