//! Single-byte codepages an atlas can be built for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SettingsError;

/// A supported single-byte Windows codepage.
///
/// Serialized as its WHATWG label (e.g. `"windows-1250"`). Any other label is
/// rejected at parse time instead of falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Codepage {
    /// Central European.
    #[default]
    #[serde(rename = "windows-1250")]
    Windows1250,
    /// Cyrillic.
    #[serde(rename = "windows-1251")]
    Windows1251,
    /// Western European.
    #[serde(rename = "windows-1252")]
    Windows1252,
    /// Turkish.
    #[serde(rename = "windows-1254")]
    Windows1254,
}

impl Codepage {
    /// All supported codepages, in label order.
    pub const ALL: [Codepage; 4] = [
        Codepage::Windows1250,
        Codepage::Windows1251,
        Codepage::Windows1252,
        Codepage::Windows1254,
    ];

    /// Returns the WHATWG label.
    pub fn label(&self) -> &'static str {
        match self {
            Codepage::Windows1250 => "windows-1250",
            Codepage::Windows1251 => "windows-1251",
            Codepage::Windows1252 => "windows-1252",
            Codepage::Windows1254 => "windows-1254",
        }
    }
}

impl std::fmt::Display for Codepage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Codepage {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        Codepage::ALL
            .into_iter()
            .find(|cp| cp.label() == label)
            .ok_or_else(|| SettingsError::UnsupportedCodepage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepage_labels_roundtrip() {
        for cp in Codepage::ALL {
            assert_eq!(cp.label().parse::<Codepage>().unwrap(), cp);
        }
        assert_eq!(
            " Windows-1251 ".parse::<Codepage>().unwrap(),
            Codepage::Windows1251
        );
    }

    #[test]
    fn test_unsupported_codepage_fails() {
        let err = "iso-8859-2".parse::<Codepage>().unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedCodepage(ref s) if s == "iso-8859-2"));

        let parsed: Result<Codepage, _> = serde_json::from_str("\"windows-1253\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_codepage_serde() {
        let json = serde_json::to_string(&Codepage::Windows1254).unwrap();
        assert_eq!(json, "\"windows-1254\"");
    }
}
