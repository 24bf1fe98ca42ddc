use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::Regex;

// @module: Caption text normalization

// @const: Markup tag regex (HTML styling tags and TTML inline elements)
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

// @const: Character reference regex (&amp; &#39; &#x27; ...)
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&[#a-zA-Z0-9]+;").unwrap()
});

// @const: Whitespace run regex (spaces, tabs, newlines)
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Remove markup tags from caption text
///
/// Drops anything between `<` and `>`, which covers HTML-style styling tags
/// (`<i>`, `<b>`, `<c.colorE5E5E5>`) as well as TTML inline elements
/// (`<br/>`, `<span>`).
pub fn strip_markup(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Decode XML and HTML character references in caption text
///
/// Each reference is decoded on its own, so one malformed reference never
/// prevents the rest from being decoded. A token that does not resolve to a
/// known entity is kept verbatim, and a bare `&` is left untouched.
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| match unescape(&caps[0]) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Collapse whitespace runs into single spaces and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Normalize a fragment of caption text into clean display text
///
/// Applies the cleanup steps in a fixed order: markup removal, then character
/// reference decoding, then whitespace collapsing with a final trim. Decoding
/// runs after tag removal, so an escaped tag like `&lt;i&gt;` comes out as
/// literal text instead of being stripped.
pub fn normalize(text: &str) -> String {
    let stripped = strip_markup(text);
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}
