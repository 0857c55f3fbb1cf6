use tracing::debug;

use crate::models::Chapter;

/// Concatenate name, translation, transliteration, category and every verse
/// translation with no separators. A query may therefore match across a field
/// boundary.
pub fn searchable_text(chapter: &Chapter) -> String {
    let mut text = String::with_capacity(
        chapter.name.len()
            + chapter.translation.len()
            + chapter.transliteration.len()
            + chapter.category.len(),
    );
    text.push_str(&chapter.name);
    text.push_str(&chapter.translation);
    text.push_str(&chapter.transliteration);
    text.push_str(&chapter.category);
    for verse in &chapter.verses {
        text.push_str(&verse.translation);
    }
    text
}

/// Return the chapters whose searchable text contains `query`, compared in
/// uppercase, keeping dataset order. An empty query returns every chapter.
pub fn filter_chapters<'a>(query: &str, chapters: &'a [Chapter]) -> Vec<&'a Chapter> {
    if query.is_empty() {
        return chapters.iter().collect();
    }

    let upper_query = query.to_uppercase();
    let matches: Vec<&Chapter> = chapters
        .iter()
        .filter(|chapter| searchable_text(chapter).to_uppercase().contains(&upper_query))
        .collect();

    debug!(query, hits = matches.len(), "filtered chapters");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verse;

    fn chapter(id: u32, translation: &str, verses: &[&str]) -> Chapter {
        Chapter {
            id,
            name: String::new(),
            transliteration: String::new(),
            translation: translation.to_string(),
            category: String::new(),
            total_verses: verses.len() as u32,
            verses: verses
                .iter()
                .enumerate()
                .map(|(index, text)| Verse {
                    id: index as u32 + 1,
                    text: String::new(),
                    translation: text.to_string(),
                })
                .collect(),
        }
    }

    fn sample() -> Vec<Chapter> {
        vec![
            chapter(1, "The Opening", &["In the name of..."]),
            chapter(2, "The Cow", &["Alif Lam Mim"]),
        ]
    }

    fn ids(chapters: &[&Chapter]) -> Vec<u32> {
        chapters.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let data = sample();
        let result = filter_chapters("", &data);
        assert_eq!(result.len(), data.len());
        assert!(result.iter().zip(data.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn opening_and_cow_scenario() {
        let data = sample();
        assert_eq!(ids(&filter_chapters("cow", &data)), vec![2]);
        assert_eq!(ids(&filter_chapters("the", &data)), vec![1, 2]);
        assert!(filter_chapters("zzz", &data).is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let data = vec![
            chapter(1, "Dawn", &["Light upon light"]),
            chapter(2, "Night", &["darkness"]),
            chapter(3, "The Lamp", &["a LIGHT in the niche"]),
        ];
        let lower = ids(&filter_chapters("light", &data));
        assert_eq!(lower, vec![1, 3]);
        assert_eq!(ids(&filter_chapters("LIGHT", &data)), lower);
        assert_eq!(ids(&filter_chapters("LiGhT", &data)), lower);
    }

    #[test]
    fn results_match_and_non_results_do_not() {
        let data = vec![
            chapter(1, "Alpha", &["one", "two"]),
            chapter(2, "Beta", &["three"]),
            chapter(3, "Gamma", &["two and three"]),
            chapter(4, "Delta", &[]),
        ];
        let query = "tWo";
        let result = filter_chapters(query, &data);
        let upper = query.to_uppercase();
        for chapter in &data {
            let contains = searchable_text(chapter).to_uppercase().contains(&upper);
            let included = result.iter().any(|c| c.id == chapter.id);
            assert_eq!(contains, included, "chapter {}", chapter.id);
        }
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn repeated_queries_are_stable() {
        let data = sample();
        let first = ids(&filter_chapters("a", &data));
        let second = ids(&filter_chapters("a", &data));
        assert_eq!(first, second);
    }

    #[test]
    fn matches_may_span_field_boundaries() {
        let mut data = vec![chapter(1, "Cow", &["Lam"])];
        data[0].name = "Al".to_string();
        // name "Al" followed by translation "Cow"
        assert_eq!(ids(&filter_chapters("lcow", &data)), vec![1]);
        // translation, transliteration and category are empty, so "Cow" meets "Lam"
        assert_eq!(ids(&filter_chapters("cowlam", &data)), vec![1]);
    }

    #[test]
    fn query_is_not_trimmed() {
        let data = vec![chapter(1, "Cow", &[]), chapter(2, "The Cow", &[])];
        assert_eq!(ids(&filter_chapters(" cow", &data)), vec![2]);
    }

    #[test]
    fn searchable_text_includes_every_field_in_order() {
        let mut data = chapter(5, "The Table", &["first", "second"]);
        data.name = "N".to_string();
        data.transliteration = "Al-Ma'idah".to_string();
        data.category = "medinan".to_string();
        assert_eq!(
            searchable_text(&data),
            "NThe TableAl-Ma'idahmedinanfirstsecond"
        );
    }
}
