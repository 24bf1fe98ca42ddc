use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Caption tracks on the web are keyed by BCP 47-style tags ("pt-BR",
/// "en-US", "zh-Hans"), while users tend to type bare ISO 639 codes. These
/// functions reduce both to comparable ISO 639 forms.
///
/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their ISO 639-2/T equivalent
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"), // French
    ("ger", "deu"), // German
    ("dut", "nld"), // Dutch
    ("gre", "ell"), // Greek
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("ice", "isl"), // Icelandic
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("per", "fas"), // Persian
    ("geo", "kat"), // Georgian
    ("may", "msa"), // Malay
    ("mac", "mkd"), // Macedonian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("wel", "cym"), // Welsh
];

/// Look up the ISO 639-2/T equivalent of an ISO 639-2/B code
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(part2b, _)| *part2b == code)
        .map(|(_, part2t)| *part2t)
}

/// Strip region and script subtags from a language tag ("pt-BR" -> "pt")
///
/// Also lowercases and trims, so the result is directly comparable.
pub fn base_subtag(code: &str) -> String {
    let normalized = code.trim().to_lowercase();
    normalized
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Validate that a language tag carries a known ISO 639-1 or ISO 639-2 base
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let base = base_subtag(code);

    // Check for ISO 639-1 (2-letter) code
    if base.len() == 2 {
        if Language::from_639_1(&base).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-2 (3-letter) code
    else if base.len() == 3 {
        if Language::from_639_3(&base).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if part2b_to_part2t(&base).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language tag's base to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let base = base_subtag(code);

    // If it's a 2-letter code, convert to 3-letter
    if base.len() == 2 {
        if let Some(lang) = Language::from_639_1(&base) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, ensure it's ISO 639-2/T
    else if base.len() == 3 {
        if Language::from_639_3(&base).is_some() {
            return Ok(base);
        }
        if let Some(part2t) = part2b_to_part2t(&base) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language tags refer to the same language
///
/// Region and script subtags are ignored, so "pt-BR", "pt" and "por" all
/// match each other. Unknown codes never match anything.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name for a tag
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
