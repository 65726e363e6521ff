//! SEO scoring and AI suggestion parsing for category copy.

use core_ai::extract_json_block;
use serde::Deserialize;

use crate::models::{LengthStatus, SeoScores, SeoSuggestions, SuggestionRequest};

const META_TITLE_CHARS: (usize, usize) = (30, 60);
const META_DESCRIPTION_CHARS: (usize, usize) = (80, 160);
const DESCRIPTION_WORDS: (usize, usize) = (100, 500);

/// First entry of a comma separated keyword list.
pub fn primary_keyword(keywords: &str) -> Option<&str> {
    keywords
        .split(',')
        .map(str::trim)
        .find(|k| !k.is_empty())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Case-insensitive occurrences of `needle` bounded by non-alphanumerics.
fn count_phrase(haystack: &str, needle: &str) -> usize {
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return 0;
    }

    let is_boundary = |c: Option<char>| c.is_none_or(|c| !c.is_alphanumeric());
    haystack
        .match_indices(&needle)
        .filter(|(start, _)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + needle.len()..].chars().next();
            is_boundary(before) && is_boundary(after)
        })
        .count()
}

pub fn score(request: &SuggestionRequest) -> SeoScores {
    let keyword = primary_keyword(&request.meta_keywords);
    let contains = |text: &str| {
        keyword.is_some_and(|k| text.to_lowercase().contains(&k.to_lowercase()))
    };

    let words = word_count(&request.description);
    let occurrences = keyword.map_or(0, |k| count_phrase(&request.description, k));
    let density = if words > 0 {
        (occurrences as f64 / words as f64 * 100.0 * 100.0).round() / 100.0
    } else {
        0.0
    };

    SeoScores {
        meta_title_length_status: LengthStatus::classify(
            request.meta_title.chars().count(),
            META_TITLE_CHARS.0,
            META_TITLE_CHARS.1,
        ),
        meta_title_keyword_present: contains(&request.meta_title),
        meta_description_length_status: LengthStatus::classify(
            request.meta_description.chars().count(),
            META_DESCRIPTION_CHARS.0,
            META_DESCRIPTION_CHARS.1,
        ),
        meta_description_keyword_present: contains(&request.meta_description),
        description_word_count_status: LengthStatus::classify(
            words,
            DESCRIPTION_WORDS.0,
            DESCRIPTION_WORDS.1,
        ),
        description_keyword_density: density,
        description_keyword_presence: occurrences > 0,
    }
}

pub fn prompt(request: &SuggestionRequest) -> String {
    format!(
        r#"You are a concise, direct SEO expert. Give the single best SEO suggestion for each element of the input below. No alternatives, explanations or other details.

Input:
Category name (H1): "{name}"
Category description (main content): "{description}"
Current meta title: "{meta_title}"
Current meta description: "{meta_description}"
Primary target keyword: "{meta_keywords}"

Output (JSON):
{{
  "categoryNameSuggestions": ["..."],
  "descriptionSuggestions": ["..."],
  "metaTitleSuggestions": ["..."],
  "metaDescriptionSuggestions": ["..."]
}}
Make sure the output is valid JSON containing only the requested properties."#,
        name = request.name,
        description = request.description,
        meta_title = request.meta_title,
        meta_description = request.meta_description,
        meta_keywords = request.meta_keywords,
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestions {
    #[serde(default)]
    category_name_suggestions: Vec<String>,
    #[serde(default)]
    description_suggestions: Vec<String>,
    #[serde(default)]
    meta_title_suggestions: Vec<String>,
    #[serde(default)]
    meta_description_suggestions: Vec<String>,
}

/// Structured suggestions from model output; unparseable output becomes a
/// single description suggestion.
pub fn parse_suggestions(text: &str) -> SeoSuggestions {
    let parsed = extract_json_block(text)
        .and_then(|block| serde_json::from_str::<RawSuggestions>(block).ok());

    match parsed {
        Some(raw) => SeoSuggestions {
            category_name: raw.category_name_suggestions,
            category_description: raw.description_suggestions,
            meta_title: raw.meta_title_suggestions,
            meta_description: raw.meta_description_suggestions,
        },
        None => {
            tracing::warn!("AI suggestions were not valid JSON, returning raw text");
            SeoSuggestions {
                category_description: vec![text.replace('`', "").trim().to_string()],
                ..Default::default()
            }
        }
    }
}
