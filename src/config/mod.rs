use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

use crate::language::Language;

pub const DEFAULT_PISTON_API_URL: &str = "https://emkc.org/api/v2/piston";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::from_sources(default_config_path(), env::vars())
    }

    /// Defaults, then `KEY=VALUE` lines from `config_path`, then `vars` on top.
    pub fn from_sources<I>(config_path: PathBuf, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        for (k, v) in vars {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from)
    }

    pub fn api_url(&self) -> String {
        self.get("PISTON_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PISTON_API_URL.to_string())
    }

    /// `None` leaves the HTTP client on its own defaults.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.get_u64("REQUEST_TIMEOUT")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Falls back to JavaScript when the configured key is unknown.
    pub fn default_language(&self) -> Language {
        self.get("DEFAULT_LANGUAGE")
            .and_then(|v| v.parse::<Language>().ok())
            .unwrap_or_default()
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.get_u64("TOAST_DURATION").unwrap_or(5))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.get_path("LOG_DIR").unwrap_or_else(default_log_dir)
    }

    pub fn log_level(&self) -> String {
        self.get("LOG_LEVEL").unwrap_or_else(|| "info".to_string())
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "PISTON_API_URL",
        "REQUEST_TIMEOUT",
        "DEFAULT_LANGUAGE",
        "TOAST_DURATION",
        "LOG_DIR",
        "LOG_LEVEL",
    ];

    KEYS.contains(&k) || k.starts_with("RUNPAD_")
}

fn base_config_dir() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"))
}

fn default_config_path() -> PathBuf {
    base_config_dir().join("runpad").join(".runpadrc")
}

fn default_log_dir() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.data_local_dir().join("runpad").join("logs"))
        .unwrap_or_else(|| env::temp_dir().join("runpad").join("logs"))
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("PISTON_API_URL".into(), DEFAULT_PISTON_API_URL.into());
    m.insert("DEFAULT_LANGUAGE".into(), "javascript".into());
    m.insert("TOAST_DURATION".into(), "5".into());
    m.insert("LOG_LEVEL".into(), "info".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn empty_env() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::from_sources(dir.path().join("missing"), empty_env());
        assert_eq!(cfg.api_url(), DEFAULT_PISTON_API_URL);
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.default_language(), Language::JavaScript);
        assert_eq!(cfg.toast_duration(), Duration::from_secs(5));
        assert_eq!(cfg.log_level(), "info");
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".runpadrc");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "# comment").unwrap();
        writeln!(f, "PISTON_API_URL = http://localhost:2000/api/v2").unwrap();
        writeln!(f, "DEFAULT_LANGUAGE=python").unwrap();
        writeln!(f, "REQUEST_TIMEOUT=15").unwrap();
        writeln!(f).unwrap();

        let env = vec![
            ("DEFAULT_LANGUAGE".to_string(), "java".to_string()),
            ("HOME".to_string(), "/ignored".to_string()),
        ];
        let cfg = Config::from_sources(path, env);
        assert_eq!(cfg.api_url(), "http://localhost:2000/api/v2");
        assert_eq!(cfg.default_language(), Language::Java);
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.get("HOME"), None);
    }

    #[test]
    fn zero_timeout_and_bad_language_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let env = vec![
            ("REQUEST_TIMEOUT".to_string(), "0".to_string()),
            ("DEFAULT_LANGUAGE".to_string(), "brainfuck".to_string()),
            ("RUNPAD_THEME".to_string(), "dark".to_string()),
        ];
        let cfg = Config::from_sources(dir.path().join("none"), env);
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.default_language(), Language::JavaScript);
        assert_eq!(cfg.get("RUNPAD_THEME").as_deref(), Some("dark"));
    }
}
