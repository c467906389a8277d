use crate::document::Document;

/// Per-occurrence weight and saturation cap for one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub per_occurrence: f64,
    pub cap: f64,
}

impl FieldWeight {
    pub const fn new(per_occurrence: f64, cap: f64) -> Self {
        Self { per_occurrence, cap }
    }

    /// Capped contribution of `count` occurrences
    pub fn contribution(&self, count: usize) -> f64 {
        (count as f64 * self.per_occurrence).min(self.cap)
    }
}

pub const TITLE_WEIGHT: FieldWeight = FieldWeight::new(8.0, 25.0);
pub const ABSTRACT_WEIGHT: FieldWeight = FieldWeight::new(4.0, 15.0);
pub const FULL_TEXT_WEIGHT: FieldWeight = FieldWeight::new(2.0, 12.0);

/// Lower-cased copies of the three matched fields of a document
#[derive(Debug, Clone)]
pub struct LoweredFields {
    pub title: String,
    pub abstract_text: String,
    pub full_text: String,
}

impl LoweredFields {
    pub fn new(title: &str, abstract_text: &str, full_text: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            abstract_text: abstract_text.to_lowercase(),
            full_text: full_text.to_lowercase(),
        }
    }

    pub fn from_document(doc: &Document) -> Self {
        Self::new(&doc.title, &doc.abstract_text, &doc.full_text)
    }
}

/// Outcome of matching one token against one document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldMatch {
    pub score: f64,
    pub matched: bool,
    pub title_hits: usize,
    pub abstract_hits: usize,
    pub text_hits: usize,
}

/// Count non-overlapping occurrences of `needle`, scanning left to right
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Weighted, capped score of `token` across title, abstract and full text
pub fn field_score(token: &str, fields: &LoweredFields) -> FieldMatch {
    let title_hits = count_occurrences(&fields.title, token);
    let abstract_hits = count_occurrences(&fields.abstract_text, token);
    let text_hits = count_occurrences(&fields.full_text, token);

    let mut result = FieldMatch {
        title_hits,
        abstract_hits,
        text_hits,
        ..FieldMatch::default()
    };

    for (hits, weight) in [
        (title_hits, TITLE_WEIGHT),
        (abstract_hits, ABSTRACT_WEIGHT),
        (text_hits, FULL_TEXT_WEIGHT),
    ] {
        if hits > 0 {
            result.score += weight.contribution(hits);
            result.matched = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_non_overlapping() {
        assert_eq!(count_occurrences("aaa", "aa"), 1);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("전기자동차 전기자동차", "전기"), 2);
        assert_eq!(count_occurrences("", "battery"), 0);
    }

    #[test]
    fn test_field_caps() {
        let fields = LoweredFields::new(
            "motor motor motor motor",
            "motor motor motor motor",
            &"motor ".repeat(10),
        );
        let m = field_score("motor", &fields);
        assert_eq!(m.title_hits, 4);
        // 25 (title cap) + 15 (abstract cap) + 12 (full text cap)
        assert_eq!(m.score, 52.0);
        assert!(m.matched);
    }

    #[test]
    fn test_case_insensitive_fields() {
        let fields = LoweredFields::new("Solid-State BATTERY", "", "");
        let m = field_score("battery", &fields);
        assert_eq!(m.score, 8.0);
        assert_eq!((m.abstract_hits, m.text_hits), (0, 0));
    }

    #[test]
    fn test_no_match() {
        let fields = LoweredFields::new("Gearbox", "Transmission housing", "");
        let m = field_score("battery", &fields);
        assert!(!m.matched);
        assert_eq!(m.score, 0.0);
    }
}
