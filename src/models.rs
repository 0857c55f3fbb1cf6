//! Domain models for the bundled corpus. These types stay plain data holders
//! so the search engine and the screens can borrow them freely; the corpus is
//! loaded once and never mutated afterwards.

use std::fmt;

use serde::Deserialize;

/// Stable identifier of a chapter. Ordering follows the dataset.
pub type ChapterId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A single verse. Missing text fields deserialize to empty strings so the
/// viewer can render them without special cases.
pub struct Verse {
    /// 1-based position inside the chapter.
    pub id: u32,
    /// Original text.
    #[serde(default)]
    pub text: String,
    /// Translated text. Also feeds the composite searchable text.
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A chapter ("surah") with its descriptive metadata and ordered verses.
pub struct Chapter {
    pub id: ChapterId,
    /// Canonical name in the original script.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub transliteration: String,
    /// Translated title, also used as the header of the chapter viewer.
    #[serde(default)]
    pub translation: String,
    /// Category tag such as `meccan` or `medinan`.
    #[serde(default, rename = "type")]
    pub category: String,
    #[serde(default)]
    pub total_verses: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// `"{id}. {translation}"`, the label used in the drawer and search list.
    pub fn display_title(&self) -> String {
        format!("{}. {}", self.id, self.translation)
    }

    /// Whether the verse list agrees with the declared count.
    pub fn verse_count_matches(&self) -> bool {
        self.verses.len() == self.total_verses as usize
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let chapter: Chapter = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(chapter.name, "");
        assert_eq!(chapter.translation, "");
        assert_eq!(chapter.category, "");
        assert_eq!(chapter.total_verses, 0);
        assert!(chapter.verses.is_empty());
    }

    #[test]
    fn category_reads_from_type_field() {
        let chapter: Chapter =
            serde_json::from_str(r#"{"id": 1, "type": "meccan", "translation": "The Opener"}"#)
                .unwrap();
        assert_eq!(chapter.category, "meccan");
        assert_eq!(chapter.to_string(), "1. The Opener");
    }

    #[test]
    fn verse_without_translation_is_blank() {
        let verse: Verse = serde_json::from_str(r#"{"id": 3, "text": "abc"}"#).unwrap();
        assert_eq!(verse.translation, "");
        assert_eq!(verse.text, "abc");
    }
}
