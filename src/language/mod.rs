//! Supported languages and their execution-service descriptors.

use std::{fmt, path::Path, str::FromStr};

use thiserror::Error;

/// Static record naming a supported language and the runtime the service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    /// Identifier sent to the execution service.
    pub id: &'static str,
}

const PYTHON: LanguageDescriptor = LanguageDescriptor {
    key: "python",
    name: "Python",
    version: "3.10.0",
    id: "python",
};

const JAVASCRIPT: LanguageDescriptor = LanguageDescriptor {
    key: "javascript",
    name: "JavaScript",
    version: "18.15.0",
    id: "javascript",
};

const JAVA: LanguageDescriptor = LanguageDescriptor {
    key: "java",
    name: "Java",
    version: "15.0.2",
    id: "java",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Python,
    #[default]
    JavaScript,
    Java,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language: {0} (expected one of: python, javascript, java)")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Selector order.
    pub const ALL: [Language; 3] = [Language::Python, Language::JavaScript, Language::Java];

    pub fn descriptor(self) -> &'static LanguageDescriptor {
        match self {
            Language::Python => &PYTHON,
            Language::JavaScript => &JAVASCRIPT,
            Language::Java => &JAVA,
        }
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Canned snippet loaded into the editor when this language is selected.
    pub fn placeholder(self) -> &'static str {
        match self {
            Language::JavaScript => {
                "// Write your JavaScript code here\nconsole.log(\"Hello World!\");"
            }
            Language::Python => "# Write your Python code here\nprint(\"Hello World!\")",
            Language::Java => {
                "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello World!\");\n    }\n}"
            }
        }
    }

    /// Next entry in the selector, wrapping around.
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous entry in the selector, wrapping around.
    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }

    /// Guess the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "py" => Some(Language::Python),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "java" => Some(Language::Java),
            _ => None,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" | "node" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
