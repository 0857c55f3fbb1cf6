use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::CorpusError;
use crate::models::{Chapter, ChapterId};

/// Dataset compiled into the binary.
const BUNDLED_CORPUS: &str = include_str!("../../data/quran.json");

/// Read-only chapter collection shared by every screen. Chapters keep the
/// order they had in the source file, which is also ascending by id.
#[derive(Debug, Clone)]
pub struct Corpus {
    chapters: Vec<Chapter>,
}

impl Corpus {
    /// Validate id uniqueness and ordering and wrap the chapters.
    ///
    /// Verse-count mismatches are tolerated: the viewer renders whatever verses
    /// exist, so they are only logged.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, CorpusError> {
        let mut previous: Option<ChapterId> = None;
        for chapter in &chapters {
            if let Some(prev) = previous {
                if chapter.id == prev {
                    return Err(CorpusError::DuplicateChapter(chapter.id));
                }
                if chapter.id < prev {
                    return Err(CorpusError::UnorderedChapter {
                        previous: prev,
                        found: chapter.id,
                    });
                }
            }
            previous = Some(chapter.id);

            if !chapter.verse_count_matches() {
                warn!(
                    chapter = chapter.id,
                    declared = chapter.total_verses,
                    actual = chapter.verses.len(),
                    "verse count does not match declared total"
                );
            }
        }

        Ok(Self { chapters })
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Position of a chapter in dataset order.
    pub fn position(&self, id: ChapterId) -> Option<usize> {
        self.chapters
            .binary_search_by_key(&id, |chapter| chapter.id)
            .ok()
    }

    pub fn get(&self, id: ChapterId) -> Option<&Chapter> {
        self.position(id).map(|index| &self.chapters[index])
    }
}

/// Parse a JSON array of chapter records.
pub fn load_from_str(json: &str) -> Result<Corpus, CorpusError> {
    let chapters: Vec<Chapter> = serde_json::from_str(json)?;
    Corpus::new(chapters)
}

/// Parse the dataset embedded at build time.
pub fn load_bundled() -> Result<Corpus, CorpusError> {
    let corpus = load_from_str(BUNDLED_CORPUS)?;
    info!(chapters = corpus.len(), "loaded bundled corpus");
    Ok(corpus)
}

/// Parse a dataset file with the same record shape as the bundled one.
pub fn load_from_path(path: &Path) -> Result<Corpus, CorpusError> {
    let json = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = load_from_str(&json)?;
    info!(chapters = corpus.len(), path = %path.display(), "loaded corpus file");
    Ok(corpus)
}

/// Prefer a dataset file dropped at `override_path` (for example the complete
/// text), falling back to the bundled chapters when none exists.
pub fn load(override_path: &Path) -> Result<Corpus, CorpusError> {
    if override_path.is_file() {
        load_from_path(override_path)
    } else {
        load_bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_corpus_is_well_formed() {
        let corpus = load_bundled().unwrap();
        assert!(!corpus.is_empty());
        for pair in corpus.chapters().windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
        for chapter in corpus.chapters() {
            assert!(chapter.verse_count_matches(), "chapter {}", chapter.id);
            for (index, verse) in chapter.verses.iter().enumerate() {
                assert_eq!(verse.id as usize, index + 1);
            }
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = load_from_str(r#"[{"id": 1}, {"id": 1}]"#).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateChapter(1)));
    }

    #[test]
    fn rejects_descending_ids() {
        let err = load_from_str(r#"[{"id": 2}, {"id": 1}]"#).unwrap_err();
        assert!(matches!(
            err,
            CorpusError::UnorderedChapter {
                previous: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = load_from_str("{not json").unwrap_err();
        assert!(matches!(err, CorpusError::Parse(_)));
    }

    #[test]
    fn tolerates_missing_verses() {
        let corpus = load_from_str(r#"[{"id": 9, "total_verses": 4}]"#).unwrap();
        let chapter = corpus.get(9).unwrap();
        assert!(chapter.verses.is_empty());
    }

    #[test]
    fn dataset_file_replaces_bundled_chapters() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 2, "translation": "The Cow", "total_verses": 1,
                 "verses": [{{"id": 1, "translation": "Alif Lam Mim"}}]}}]"#
        )
        .unwrap();
        let corpus = load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(2).map(|c| c.translation.as_str()), Some("The Cow"));
    }

    #[test]
    fn missing_dataset_file_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = load(&dir.path().join("quran.json")).unwrap();
        assert_eq!(corpus.len(), load_bundled().unwrap().len());
    }

    #[test]
    fn unreadable_dataset_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }

    #[test]
    fn lookup_by_id() {
        let corpus = load_from_str(r#"[{"id": 1}, {"id": 5}, {"id": 7}]"#).unwrap();
        assert_eq!(corpus.position(5), Some(1));
        assert_eq!(corpus.get(7).map(|c| c.id), Some(7));
        assert!(corpus.get(6).is_none());
    }
}
