//! Boilerplate, contact-detail, and link removal.
//!
//! Passes run in a fixed order: boilerplate phrases first, then URLs,
//! e-mail addresses, phone numbers, and a final whitespace collapse. Later
//! passes only ever see text the boilerplate pass has already stripped.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::collapse_whitespace;

/// Case-insensitive boilerplate patterns (navigation, legal, sign-up).
const BOILERPLATE_PATTERNS: &[&str] = &[
    r"\b(?:menu|navigation|nav|header|footer|sidebar|advertisement|ad|banner)\b",
    r"(?:\bcopyright\s+|©\s*)\d{4}\b",
    r"\bprivacy\s+policy\b",
    r"\bterms\s+of\s+service\b",
    r"\bcontact\s+us\b",
    r"\babout\s+us\b",
    r"\bsign\s+in\b",
    r"\blog\s+in\b",
    r"\bsign\s+up\b",
    r"\bregister\b",
    r"\bnewsletter\b",
    r"\bsubscribe\b",
];

/// Run every noise pass over already-normalized text.
pub fn remove_noise(text: &str) -> String {
    let mut result = strip_boilerplate(text);

    result = strip_urls(&result);
    result = strip_emails(&result);
    result = strip_phone_numbers(&result);

    collapse_whitespace(&result)
}

fn strip_boilerplate(text: &str) -> String {
    static BOILERPLATE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
        BOILERPLATE_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("valid regex"))
            .collect()
    });

    BOILERPLATE_RES
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Remove `http(s)://` and `www.` links. A trailing sentence mark is left
/// in place.
fn strip_urls(text: &str) -> String {
    static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]]"#)
            .expect("valid regex")
    });

    URL_RE.replace_all(text, "").into_owned()
}

fn strip_emails(text: &str) -> String {
    static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
    });

    EMAIL_RE.replace_all(text, "").into_owned()
}

/// `NNN-NNN-NNNN`, with `-` or `.` as optional separators. Space-separated
/// digit groups are left alone since they are as likely to be figures.
fn strip_phone_numbers(text: &str) -> String {
    static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("valid regex")
    });

    PHONE_RE.replace_all(text, "").into_owned()
}
