//! Source encoding detection for pyedit.
//!
//! Looks for a PEP 263 declaration (`# -*- coding: latin-1 -*-`) in the
//! lines of a file and reports the declared encoding name. Decoding the
//! file is left to the caller.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Encoding reported when no declaration is found.
///
/// Rust paths and strings are UTF-8 on every supported platform.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Declaration pattern, matched from the start of each line.
const DECLARATION_PATTERN: &str = r"^#.*coding[:=]\s*([-\w.]+)";

static DECLARATION: OnceLock<Option<Regex>> = OnceLock::new();

fn declaration_regex() -> Option<&'static Regex> {
    DECLARATION
        .get_or_init(|| Regex::new(DECLARATION_PATTERN).ok())
        .as_ref()
}

/// Platform default encoding.
pub fn default_encoding() -> &'static str {
    DEFAULT_ENCODING
}

/// Which lines are searched for a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Every line is scanned and the last declaration wins.
    #[default]
    WholeFile,
    /// Only the first two lines are scanned and the first declaration wins.
    Pep263,
}

impl ScanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::WholeFile => "whole-file",
            ScanMode::Pep263 => "pep263",
        }
    }
}

impl std::str::FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whole-file" | "whole_file" | "all" => Ok(ScanMode::WholeFile),
            "pep263" | "pep-263" | "strict" => Ok(ScanMode::Pep263),
            _ => Err(format!("Unknown scan mode: {}", s)),
        }
    }
}

/// Encoding detector with a configurable fallback and scan mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingDetector {
    fallback: String,
    scan: ScanMode,
}

impl Default for EncodingDetector {
    fn default() -> Self {
        Self::new(default_encoding(), ScanMode::default())
    }
}

impl EncodingDetector {
    pub fn new(fallback: impl Into<String>, scan: ScanMode) -> Self {
        Self {
            fallback: fallback.into(),
            scan,
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan
    }

    /// Detect the declared encoding of raw file content.
    ///
    /// Never fails: content without a declaration yields the fallback.
    /// Bytes are read as UTF-8, invalid sequences are replaced.
    pub fn detect(&self, data: &[u8]) -> String {
        self.detect_str(&String::from_utf8_lossy(data))
    }

    /// Detect the declared encoding of already decoded text.
    pub fn detect_str(&self, text: &str) -> String {
        let Some(regex) = declaration_regex() else {
            return self.fallback.clone();
        };

        let lines = split_lines(text).into_iter();
        let found = match self.scan {
            ScanMode::WholeFile => lines.filter_map(|line| declared_encoding(regex, line)).last(),
            ScanMode::Pep263 => lines.take(2).find_map(|line| declared_encoding(regex, line)),
        };

        found
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Read a file and detect its declared encoding.
    pub fn detect_file(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let encoding = self.detect(&data);
        log::debug!("Encoding of {}: {}", path.display(), encoding);
        Ok(encoding)
    }
}

/// Detect the declared encoding with the default detector.
pub fn detect_encoding(data: &[u8]) -> String {
    EncodingDetector::default().detect(data)
}

/// Read a file and detect its declared encoding with the default detector.
pub fn detect_file_encoding(path: &Path) -> Result<String> {
    EncodingDetector::default().detect_file(path)
}

fn declared_encoding<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into lines.
///
/// `\r\n` counts as one break. Besides `\n` and `\r`, vertical tab, form
/// feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators also end a line. A trailing break does not produce
/// an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
