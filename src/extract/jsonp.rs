// src/extract/jsonp.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReportError, Result};

/// A comment, or a JavaScript identifier (dotted paths allowed) followed by `(`.
/// Comments are matched so that parentheses inside them are skipped.
static CALLBACK_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)/\*.*?\*/|//[^\n]*|([A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*)\s*\(",
    )
    .expect("callback regex should compile")
});

static CALLBACK_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("callback regex should compile")
});

/// A JSONP response split into its callback name and the JSON text it wraps.
#[derive(Debug, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub callback: &'a str,
    pub body: &'a str,
}

/// Split `<prefix><callback>(<json>)<suffix>` into callback and JSON body.
///
/// The callback is the first identifier outside a comment that is directly
/// followed by `(`; the body runs from that `(` to the last `)`. Prefixes
/// before the callback and `;`/whitespace after the `)` are ignored.
pub fn parse_envelope(text: &str) -> Result<Envelope<'_>> {
    let (callback, open) = CALLBACK_CALL
        .captures_iter(text)
        .find_map(|c| {
            let name = c.get(1)?;
            // the match ends right after the `(`
            Some((name.as_str(), c.get(0)?.end() - 1))
        })
        .ok_or_else(|| {
            ReportError::parse("no JSONP callback wrapper: missing 'callback('", text)
        })?;

    let close = text
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| ReportError::parse("unterminated JSONP callback: missing ')'", text))?;

    let body = text[open + 1..close].trim();
    if body.is_empty() {
        return Err(ReportError::parse("empty JSONP payload", text));
    }

    Ok(Envelope { callback, body })
}

/// Whether `name` is usable as a JSONP callback.
pub fn is_callback_name(name: &str) -> bool {
    CALLBACK_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_envelope() {
        let env = parse_envelope(r#"jsonp701({"tryReportList":[]})"#).unwrap();
        assert_eq!(env.callback, "jsonp701");
        assert_eq!(env.body, r#"{"tryReportList":[]}"#);
    }

    #[test]
    fn ignores_prefix_and_suffix() {
        let raw = "\r\n\r\n  /**/ jsonp701( {\"a\":\"(x)\"} );\n";
        let env = parse_envelope(raw).unwrap();
        assert_eq!(env.callback, "jsonp701");
        assert_eq!(env.body, "{\"a\":\"(x)\"}");
    }

    #[test]
    fn skips_parentheses_in_comment_prefix() {
        let env = parse_envelope("/* (c) */ jsonp701({\"tryReportList\":[]})").unwrap();
        assert_eq!(env.callback, "jsonp701");
        assert_eq!(env.body, "{\"tryReportList\":[]}");

        let env = parse_envelope("// see cb(x)\n/* foo(1) */jsonp9 ([2])").unwrap();
        assert_eq!(env.callback, "jsonp9");
        assert_eq!(env.body, "[2]");
    }

    #[test]
    fn accepts_dotted_callbacks() {
        let env = parse_envelope("window.cb_1([1])").unwrap();
        assert_eq!(env.callback, "window.cb_1");
        assert_eq!(env.body, "[1]");
    }

    #[test]
    fn rejects_bare_json() {
        let err = parse_envelope(r#"{"tryReportList":[]}"#).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn rejects_unterminated_and_empty_wrappers() {
        assert!(parse_envelope("jsonp701({\"a\":1}").is_err());
        assert!(parse_envelope("jsonp701(  )").is_err());
        assert!(parse_envelope(")jsonp701(").is_err());
        assert!(parse_envelope("({\"a\":1})").is_err());
    }

    #[test]
    fn validates_callback_names() {
        assert!(is_callback_name("jsonp701"));
        assert!(is_callback_name("$.cb"));
        assert!(!is_callback_name("7up"));
        assert!(!is_callback_name("a b"));
        assert!(!is_callback_name(""));
    }
}
