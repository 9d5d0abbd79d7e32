use once_cell::sync::Lazy;
use regex::Regex;

const WORDS_PER_MINUTE: usize = 200;

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{1,3}|_{1,3}|~~").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*_]{3,}\s*$").unwrap());

/// Estimated reading time in whole minutes for raw markdown, at 200 words
/// per minute. Code blocks, image embeds, and markup delimiters do not
/// count as prose; link text does. Always at least one minute, including
/// for `None` and empty input.
pub fn estimate(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else { return 1 };
    if raw.is_empty() {
        return 1;
    }

    // Fences go first: nothing inside them may reach the later strips.
    let text = FENCED_CODE.replace_all(raw, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "");
    let text = HORIZONTAL_RULE.replace_all(&text, "");

    let words = text.split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as u32
}
