//! Usage-recommendation and settings extraction from description text.
//!
//! Two probe families run over the raw description: inline setting
//! mentions (sampler, CFG, steps, ...) captured through the end of the
//! line or the next comma, and labeled section headings captured through
//! the next blank line or capitalized line start. Probe order is fixed so
//! tie-breaks stay auditable.

use std::sync::OnceLock;

use regex::Regex;

use super::SAMPLER_SECTION_MARKER;

struct UsageProbes {
    inline: Vec<Regex>,
    sections: Vec<Regex>,
}

impl UsageProbes {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<UsageProbes>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let inline = [
                    r"(?i)sampler\s*=\s*[^,\n]+",
                    r"(?i)cfg\s*scale\s*[=:]\s*[^,\n]+",
                    r"(?i)steps\s*[=:]\s*[^,\n]+",
                    r"(?i)denoising\s*strength\s*[=:]\s*[^,\n]+",
                    r"(?i)clip\s*skip\s*[=:]\s*[^,\n]+",
                    r"(?i)hires\s*fix[^,\n]*",
                    r"(?i)upscale[^,\n]*",
                ];
                let sections = [
                    r"(?i)recommendations?",
                    r"(?i)how\s*to\s*use",
                    r"(?i)usage",
                    r"(?i)settings",
                ];

                let inline = inline
                    .iter()
                    .map(|p| Regex::new(p).ok())
                    .collect::<Option<Vec<_>>>()?;
                let sections = sections
                    .iter()
                    .map(|p| Regex::new(p).ok())
                    .collect::<Option<Vec<_>>>()?;
                Some(Self { inline, sections })
            })
            .as_ref()
    }
}

/// Collects every probe hit, one per line, in probe-declaration order.
/// No hits yields an empty string, never a placeholder message.
#[must_use]
pub fn extract_recommendations(description: &str) -> String {
    let Some(probes) = UsageProbes::get() else {
        return String::new();
    };

    let mut lines: Vec<String> = Vec::new();

    for probe in &probes.inline {
        for m in probe.find_iter(description) {
            lines.push(m.as_str().to_string());
        }
    }

    for probe in &probes.sections {
        lines.extend(capture_sections(description, probe));
    }

    lines.join("\n")
}

/// Captures each heading occurrence through to the next blank line, the
/// next line starting with a capital letter, or end of text. Headings
/// inside an already captured section are skipped.
fn capture_sections(text: &str, heading: &Regex) -> Vec<String> {
    let mut sections = Vec::new();
    let mut cursor = 0usize;

    for m in heading.find_iter(text) {
        if m.start() < cursor {
            continue;
        }
        let end = section_end(text, m.end());
        sections.push(text[m.start()..end].to_string());
        cursor = end;
    }

    sections
}

fn section_end(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    let mut end = text.len();

    if let Some(i) = rest.find("\n\n") {
        end = end.min(from + i);
    }

    for (i, _) in rest.match_indices('\n') {
        if rest[i + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            end = end.min(from + i);
            break;
        }
    }

    end
}

/// Numeric settings pulled out of the description. Each field is
/// independent; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendedSettings {
    pub cfg_scale: Option<String>,
    pub steps: Option<String>,
    pub sampler: Option<String>,
}

struct SettingProbes {
    cfg_scale: Regex,
    steps: Regex,
    sampler: Regex,
}

impl SettingProbes {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<SettingProbes>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    cfg_scale: Regex::new(r"(?i)cfg\s*scale\s*[=:]\s*([0-9.,\-\s]+)").ok()?,
                    steps: Regex::new(r"(?i)steps\s*[=:]\s*([0-9.,\-\s]+)").ok()?,
                    sampler: Regex::new(r"(?i)sampler\s*=\s*([^,\n]+)").ok()?,
                })
            })
            .as_ref()
    }
}

#[must_use]
pub fn extract_settings(description: &str) -> RecommendedSettings {
    let Some(probes) = SettingProbes::get() else {
        return RecommendedSettings::default();
    };

    // The value class admits commas and spaces so ranges like "20, 25"
    // survive, but a trailing separator belongs to the sentence, not the
    // value.
    let first_capture = |re: &Regex| -> Option<String> {
        re.captures(description)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().trim_end_matches([',', ' ']).to_string())
            .filter(|s| !s.is_empty())
    };

    RecommendedSettings {
        cfg_scale: first_capture(&probes.cfg_scale),
        steps: first_capture(&probes.steps),
        sampler: first_capture(&probes.sampler),
    }
}

/// Inserts a sampler recommendation line directly under the usage section
/// marker. A no-op when the marker is absent from the notes.
#[must_use]
pub fn append_sampler_note(notes: &str, sampler: &str) -> String {
    if !notes.contains(SAMPLER_SECTION_MARKER) {
        return notes.to_string();
    }

    notes.replacen(
        SAMPLER_SECTION_MARKER,
        &format!("{SAMPLER_SECTION_MARKER}\nRecommended sampler: {sampler}"),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_probes_capture_whole_mentions() {
        let description = "Use cfg scale: 7, steps = 25 and enable hires fix for detail";
        let result = extract_recommendations(description);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(
            lines,
            vec!["cfg scale: 7", "steps = 25 and enable hires fix for detail", "hires fix for detail"]
        );
    }

    #[test]
    fn test_probe_declaration_order_wins_over_text_order() {
        // "steps" appears first in the text, but the sampler probe is
        // declared first, so its hit comes first in the output.
        let description = "steps: 30\nsampler = Euler a";
        let result = extract_recommendations(description);
        assert_eq!(result, "sampler = Euler a\nsteps: 30");
    }

    #[test]
    fn test_section_probe_captures_to_blank_line() {
        let description = "Settings for best results\nweight around 0.8\n\nunrelated text";
        let result = extract_recommendations(description);
        assert_eq!(result, "Settings for best results\nweight around 0.8");
    }

    #[test]
    fn test_section_probe_stops_at_capitalized_line() {
        let description = "usage: keep weight low\nworks best at night\nCredits go elsewhere";
        let result = extract_recommendations(description);
        assert_eq!(result, "usage: keep weight low\nworks best at night");
    }

    #[test]
    fn test_no_matches_yield_empty_string() {
        assert_eq!(extract_recommendations("just a character description"), "");
        assert_eq!(extract_recommendations(""), "");
    }

    #[test]
    fn test_settings_scenario() {
        let settings = extract_settings("cfg scale = 7.5, steps: 25, sampler=DPM++ 2M Karras");
        assert_eq!(settings.cfg_scale.as_deref(), Some("7.5"));
        assert_eq!(settings.steps.as_deref(), Some("25"));
        assert_eq!(settings.sampler.as_deref(), Some("DPM++ 2M Karras"));
    }

    #[test]
    fn test_settings_fields_are_independent() {
        let settings = extract_settings("steps: 20-30");
        assert_eq!(settings.steps.as_deref(), Some("20-30"));
        assert_eq!(settings.cfg_scale, None);
        assert_eq!(settings.sampler, None);

        // "sampler: X" uses a colon; the sampler probe only accepts '='.
        let settings = extract_settings("sampler: Euler a");
        assert_eq!(settings.sampler, None);
    }

    #[test]
    fn test_sampler_note_requires_marker() {
        let notes = "Model ID: 1\n\n=== PERSONAL NOTES ===\nmine";
        assert_eq!(append_sampler_note(notes, "Euler a"), notes);

        let notes = format!("Model ID: 1\n\n{SAMPLER_SECTION_MARKER}\nolder line");
        let updated = append_sampler_note(&notes, "Euler a");
        assert_eq!(
            updated,
            format!("Model ID: 1\n\n{SAMPLER_SECTION_MARKER}\nRecommended sampler: Euler a\nolder line")
        );
    }
}
