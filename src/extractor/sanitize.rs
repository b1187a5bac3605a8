//! Description sanitizer.
//!
//! Strips the markup that must never be stored (`<script>`, `<style>`,
//! `<iframe>`, content included), normalizes the non-breaking-space
//! entity and blank-line runs, and trims. Everything else passes through
//! verbatim. Running it twice yields the same text as running it once,
//! so stored descriptions can be re-sanitized before display.

use std::sync::OnceLock;

use regex::Regex;

struct SanitizeRegex {
    script: Regex,
    style: Regex,
    iframe: Regex,
    blank_lines: Regex,
}

impl SanitizeRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<SanitizeRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    script: Regex::new(r"(?is)<script[^>]*>.*?</script>").ok()?,
                    style: Regex::new(r"(?is)<style[^>]*>.*?</style>").ok()?,
                    iframe: Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").ok()?,
                    blank_lines: Regex::new(r"\n\s*\n").ok()?,
                })
            })
            .as_ref()
    }
}

#[must_use]
pub fn sanitize_description(raw: &str) -> String {
    let Some(re) = SanitizeRegex::get() else {
        return raw.trim().to_string();
    };

    let text = re.script.replace_all(raw, "");
    let text = re.style.replace_all(&text, "");
    let text = re.iframe.replace_all(&text, "");
    let text = text.replace("&nbsp;", " ");
    let text = re.blank_lines.replace_all(&text, "\n\n");

    text.trim().to_string()
}
