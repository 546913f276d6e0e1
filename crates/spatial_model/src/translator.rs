//! Braille translation boundary
//!
//! Layout engines never translate print to braille themselves. They hand the
//! text and a [`TranslationMode`] to an injected [`Translator`].

use serde::{Deserialize, Serialize};

/// How a piece of print text is turned into braille
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationMode {
    /// Text is already braille and is used as-is
    #[default]
    Direct,
    Literary,
    Uncontracted,
    AsciiMath,
}

/// Print-to-braille translation
pub trait Translator {
    fn translate(&self, mode: TranslationMode, text: &str) -> String;
}

/// Returns the text unchanged for every mode
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Translator for PassThrough {
    fn translate(&self, _mode: TranslationMode, text: &str) -> String {
        text.to_string()
    }
}

impl<F> Translator for F
where
    F: Fn(TranslationMode, &str) -> String,
{
    fn translate(&self, mode: TranslationMode, text: &str) -> String {
        self(mode, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        assert_eq!(PassThrough.translate(TranslationMode::Literary, "abc"), "abc");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |mode: TranslationMode, text: &str| match mode {
            TranslationMode::Direct => text.to_string(),
            _ => text.to_uppercase(),
        };
        assert_eq!(upper.translate(TranslationMode::Uncontracted, "ab"), "AB");
        assert_eq!(upper.translate(TranslationMode::Direct, "ab"), "ab");
    }
}
