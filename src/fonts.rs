//! Font name mapping from PDF base fonts to PowerPoint font families.
//!
//! PDF font identifiers ("Helvetica-BoldOblique", "ABCDEF+Times-Roman") do
//! not exist as installed families on most systems; each is mapped to a
//! widely available substitute.

/// Family used when a font identifier cannot be matched.
pub const DEFAULT_FONT: &str = "Arial";

/// Known base-font identifiers and their substitutes.
///
/// The standard 14 PDF fonts plus common aliases. Order matters for the
/// substring pass: more specific keys first.
const FONT_MAP: &[(&str, &str)] = &[
    ("Helvetica-BoldOblique", "Arial"),
    ("Helvetica-Oblique", "Arial"),
    ("Helvetica-Bold", "Arial"),
    ("Helvetica", "Arial"),
    ("Times-BoldItalic", "Times New Roman"),
    ("Times-Italic", "Times New Roman"),
    ("Times-Bold", "Times New Roman"),
    ("Times-Roman", "Times New Roman"),
    ("TimesNewRoman", "Times New Roman"),
    ("Courier-BoldOblique", "Courier New"),
    ("Courier-Oblique", "Courier New"),
    ("Courier-Bold", "Courier New"),
    ("Courier", "Courier New"),
    ("Symbol", "Symbol"),
    ("ZapfDingbats", "Wingdings"),
    ("ArialMT", "Arial"),
    ("Arial", "Arial"),
    ("Calibri", "Calibri"),
    ("Verdana", "Verdana"),
    ("Georgia", "Georgia"),
];

/// Map a PDF base-font identifier to a PowerPoint font family.
///
/// Exact table matches take precedence; otherwise substring containment is
/// tried in both directions (subset-tagged names like "ABCDEF+Helvetica"
/// contain a table key). Unrecognized or empty identifiers fall back to
/// [`DEFAULT_FONT`]. Never returns an empty string.
pub fn map_font_name(source: &str) -> &'static str {
    if source.is_empty() {
        return DEFAULT_FONT;
    }

    for (key, family) in FONT_MAP {
        if *key == source {
            return family;
        }
    }

    for (key, family) in FONT_MAP {
        if source.contains(key) || key.contains(source) {
            return family;
        }
    }

    DEFAULT_FONT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(map_font_name("Helvetica-Bold"), "Arial");
        assert_eq!(map_font_name("Times-Roman"), "Times New Roman");
        assert_eq!(map_font_name("Courier"), "Courier New");
    }

    #[test]
    fn test_subset_tagged_name() {
        // Embedded subsets carry a random six-letter prefix
        assert_eq!(map_font_name("ABCDEF+Helvetica"), "Arial");
        assert_eq!(map_font_name("XYZABC+Times-Bold"), "Times New Roman");
    }

    #[test]
    fn test_partial_key() {
        // Source shorter than the table key matches in reverse
        assert_eq!(map_font_name("Times"), "Times New Roman");
    }

    #[test]
    fn test_unrecognized_falls_back() {
        assert_eq!(map_font_name("XYZ123"), DEFAULT_FONT);
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(map_font_name(""), DEFAULT_FONT);
    }

    #[test]
    fn test_never_empty() {
        for name in ["", "??", "Helvetica", "NotoSansCJK", "Wingdings-Regular"] {
            assert!(!map_font_name(name).is_empty());
        }
    }
}
