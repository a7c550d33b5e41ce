use unicode_normalization::UnicodeNormalization;

use super::client::TitleConverter;

/// Post-processing the converter applies server-side when available.
const ENGLISH_POST_OPTIONS: &[&str] = &["remove_diacritics", "title_case"];

/// Common Indic-transliteration diacritics mapped to plain ASCII. Upper and
/// lower case forms are mapped independently; anything not listed falls
/// through to combining-mark stripping below.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('ś', "sh"),
    ('Ś', "Sh"),
    ('ṣ', "sh"),
    ('Ṣ', "Sh"),
    ('ç', "ch"),
    ('Ç', "Ch"),
    ('ñ', "ny"),
    ('Ñ', "Ny"),
    ('ṅ', "ng"),
    ('Ṅ', "Ng"),
    ('ṇ', "n"),
    ('Ṇ', "N"),
    ('ṭ', "t"),
    ('Ṭ', "T"),
    ('ḍ', "d"),
    ('Ḍ', "D"),
    ('ḥ', "h"),
    ('Ḥ', "H"),
    ('ṃ', "m"),
    ('ṁ', "m"),
    ('Ṃ', "M"),
    ('ṛ', "ri"),
    ('ṝ', "ri"),
    ('Ṛ', "Ri"),
    ('Ṝ', "Ri"),
    ('ā', "a"),
    ('Ā', "A"),
    ('ī', "i"),
    ('Ī', "I"),
    ('ū', "u"),
    ('Ū', "U"),
    ('ē', "e"),
    ('Ē', "E"),
    ('ō', "o"),
    ('Ō', "O"),
    ('\u{2019}', "'"),
    ('\u{2018}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
];

/// Deterministic local cleanup for a romanized string: substitution table,
/// then NFD decomposition dropping combining marks, then whitespace collapse
/// and per-word capitalization.
pub fn to_plain_english(romanized: &str) -> String {
    if romanized.is_empty() {
        return String::new();
    }

    let mut substituted = String::with_capacity(romanized.len());
    for c in romanized.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => substituted.push_str(to),
            None => substituted.push(c),
        }
    }

    let stripped: String = substituted
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_words(&collapsed)
}

fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

struct Attempt {
    target: &'static str,
    post_options: &'static [&'static str],
    normalize_locally: bool,
}

/// Ordered first-success-wins chain: Roman with server-side post-processing,
/// then Latin with the same, then raw Latin cleaned up locally.
const ATTEMPTS: &[Attempt] = &[
    Attempt {
        target: "Roman",
        post_options: ENGLISH_POST_OPTIONS,
        normalize_locally: false,
    },
    Attempt {
        target: "Latin",
        post_options: ENGLISH_POST_OPTIONS,
        normalize_locally: false,
    },
    Attempt {
        target: "Latin",
        post_options: &[],
        normalize_locally: true,
    },
];

/// Convert a source-script title into plain English. Remote failures are
/// swallowed per attempt; an empty return means the whole chain was
/// exhausted and the caller should skip the record.
pub async fn transliterate_to_english(
    converter: &dyn TitleConverter,
    source: &str,
    text: &str,
) -> String {
    for attempt in ATTEMPTS {
        match converter
            .convert_one(source, attempt.target, text, attempt.post_options)
            .await
        {
            Ok(raw) => {
                let trimmed = raw.trim();
                let candidate = if attempt.normalize_locally {
                    to_plain_english(trimmed)
                } else if trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
                    trimmed.to_string()
                } else {
                    String::new()
                };
                if !candidate.is_empty() {
                    return candidate;
                }
            }
            Err(e) => {
                tracing::debug!("convert to {} failed for '{}': {}", attempt.target, text, e);
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, Result};

    #[test]
    fn strips_diacritics_and_title_cases() {
        assert_eq!(to_plain_english("Śrī Rāma"), "Shri Rama");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(to_plain_english("  śiva   tāṇḍava  "), "Shiva Tandava");
    }

    #[test]
    fn replaces_typographic_quotes() {
        assert_eq!(to_plain_english("rāma\u{2019}s"), "Rama's");
    }

    #[test]
    fn drops_combining_marks_left_by_decomposed_input() {
        // s + combining acute, then a macron i: nothing in the table matches,
        // the NFD pass removes the marks.
        assert_eq!(to_plain_english("s\u{0301}rī"), "Sri");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_plain_english(""), "");
        assert_eq!(to_plain_english("   "), "");
    }

    /// Hands out canned responses in order and records the targets requested.
    struct ScriptedConverter {
        responses: Mutex<VecDeque<Result<String>>>,
        targets_called: Mutex<Vec<String>>,
    }

    impl ScriptedConverter {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                targets_called: Mutex::new(Vec::new()),
            }
        }

        fn targets_called(&self) -> Vec<String> {
            self.targets_called.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TitleConverter for ScriptedConverter {
        async fn convert_one(
            &self,
            _source: &str,
            target: &str,
            _text: &str,
            _post_options: &[&str],
        ) -> Result<String> {
            self.targets_called.lock().unwrap().push(target.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::ConvertApi("no more responses".to_string())))
        }

        async fn convert_multi(
            &self,
            _source: &str,
            _targets: &[&str],
            _text: &str,
        ) -> Result<HashMap<String, String>> {
            unreachable!("not used by the fallback chain")
        }
    }

    #[tokio::test]
    async fn first_successful_attempt_short_circuits() {
        let converter = ScriptedConverter::new(vec![Ok("Shiva Tandava".to_string())]);
        let result = transliterate_to_english(&converter, "Devanagari", "शिव ताण्डव").await;
        assert_eq!(result, "Shiva Tandava");
        assert_eq!(converter.targets_called(), vec!["Roman"]);
    }

    #[tokio::test]
    async fn non_ascii_result_falls_through_to_next_attempt() {
        let converter = ScriptedConverter::new(vec![
            Ok("शिव".to_string()),
            Ok("Shiva".to_string()),
        ]);
        let result = transliterate_to_english(&converter, "Devanagari", "शिव").await;
        assert_eq!(result, "Shiva");
        assert_eq!(converter.targets_called(), vec!["Roman", "Latin"]);
    }

    #[tokio::test]
    async fn last_attempt_normalizes_locally() {
        let converter = ScriptedConverter::new(vec![
            Err(AppError::ConvertApi("HTTP 500".to_string())),
            Err(AppError::ConvertApi("HTTP 500".to_string())),
            Ok("śiva tāṇḍava".to_string()),
        ]);
        let result = transliterate_to_english(&converter, "Devanagari", "शिव ताण्डव").await;
        assert_eq!(result, "Shiva Tandava");
        assert_eq!(converter.targets_called(), vec!["Roman", "Latin", "Latin"]);
    }

    #[tokio::test]
    async fn exhausted_chain_returns_empty() {
        let converter = ScriptedConverter::new(vec![
            Err(AppError::ConvertApi("HTTP 502".to_string())),
            Ok("   ".to_string()),
            Ok(String::new()),
        ]);
        let result = transliterate_to_english(&converter, "Telugu", "శివ").await;
        assert_eq!(result, "");
        assert_eq!(converter.targets_called(), vec!["Roman", "Latin", "Latin"]);
    }
}
