//! Markdown conversion and the literal text substitutions applied to each
//! report section.

use std::sync::LazyLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

/// Emoji used by the authored reports; each occurrence is wrapped in a
/// styled span so the print rendering sizes them consistently.
const EMOJI: &[&str] = &[
    "✅", "❌", "⚠️", "🔴", "🟡", "🟢", "📊", "🎯", "💡", "🚨", "🔥", "📈", "🛠️", "📝",
    "🚀", "📱", "⚡", "📦", "🔍", "📋", "✔️", "📞", "💰", "🆘",
];

// Matches the first paragraph opening with the critical marker, so the
// whole paragraph can be wrapped without splicing unbalanced tags.
static CRITICAL_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<p>🔴 CRITICAL.*?</p>").unwrap_or_else(|e| {
        // A non-compiling literal pattern is a programming error; fall back
        // to a pattern that matches nothing so assembly still completes.
        log::error!("Failed to compile critical-paragraph pattern: {e}");
        Regex::new(r"\z.").expect("fallback pattern should always compile")
    })
});

/// Converts one markdown section to HTML.
///
/// Tables, fenced code, heading attributes, strikethrough, task lists, and
/// footnotes are enabled to cover everything the authored reports use.
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut html_output, parser);
    html_output
}

/// Wraps the first `🔴 CRITICAL …` paragraph in the alert container.
///
/// Must run before [`wrap_emoji`], which rewrites the 🔴 marker the pattern
/// anchors on.
pub(crate) fn wrap_critical_alert(html: &str) -> String {
    CRITICAL_PARAGRAPH
        .replace(html, r#"<div class="alert alert-critical">$0</div>"#)
        .into_owned()
}

/// Wraps every known emoji in a styled span.
pub(crate) fn wrap_emoji(html: &str) -> String {
    let mut output = html.to_string();
    for emoji in EMOJI {
        output = output.replace(
            emoji,
            &format!(r#"<span class="emoji">{emoji}</span>"#),
        );
    }
    output
}

/// Full per-section conversion: markdown → HTML, alert wrap, emoji wrap.
pub(crate) fn convert_section(markdown: &str) -> String {
    let html = markdown_to_html(markdown);
    let html = wrap_critical_alert(&html);
    wrap_emoji(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_tables_enabled() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_task_lists_enabled() {
        let html = markdown_to_html("- [x] done\n- [ ] open\n");
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_markdown_strikethrough_enabled() {
        let html = markdown_to_html("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_wrap_emoji_spans() {
        let html = wrap_emoji("<p>✅ done and 🔴 broken</p>");
        assert!(html.contains(r#"<span class="emoji">✅</span>"#));
        assert!(html.contains(r#"<span class="emoji">🔴</span>"#));
    }

    #[test]
    fn test_wrap_critical_alert_wraps_whole_paragraph() {
        let html = "<p>intro</p>\n<p>🔴 CRITICAL: search console reports a CRITICAL FAILURE</p>\n<p>after</p>";
        let wrapped = wrap_critical_alert(html);
        assert!(wrapped.contains(
            r#"<div class="alert alert-critical"><p>🔴 CRITICAL: search console reports a CRITICAL FAILURE</p></div>"#
        ));
        assert!(wrapped.contains("<p>after</p>"));
    }

    #[test]
    fn test_wrap_critical_alert_first_occurrence_only() {
        let html = "<p>🔴 CRITICAL one</p><p>🔴 CRITICAL two</p>";
        let wrapped = wrap_critical_alert(html);
        assert_eq!(wrapped.matches("alert-critical").count(), 1);
        assert!(wrapped.contains("<p>🔴 CRITICAL two</p>"));
    }

    #[test]
    fn test_wrap_critical_alert_untouched_without_marker() {
        let html = "<p>all good</p>";
        assert_eq!(wrap_critical_alert(html), html);
    }

    #[test]
    fn test_convert_section_alert_survives_emoji_wrapping() {
        let converted = convert_section("🔴 CRITICAL: broken sitemap\n\nNext paragraph.\n");
        assert!(converted.contains("alert-critical"));
        assert!(converted.contains(r#"<span class="emoji">🔴</span>"#));
    }
}
