//! Content that is never auto-corrected, whatever its apparent mismatch ratio.
//!
//! The English side of the Arabic layout produces `;`, `[`, `]`, `,`, `.`, `'`, `/`
//! and a backtick as ordinary letters, so none of those count as code on their own.

use std::sync::LazyLock;

use regex::Regex;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b[a-z][a-z0-9+.-]*://\S+|\bwww\.[a-z0-9-]+\.\S+)").expect("valid url regex")
});
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
        .expect("valid email regex")
});
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:=>|==|!=|&&|\|\||::|->|\+\+|\{\s*\}|\(\s*\))",
        r"|</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>",
        r"|\b(?:function|const|let|var|return|import|class|def|fn|pub|struct)\s+[A-Za-z_][A-Za-z0-9_]*\s*[=(:{<]",
        r"|\b[A-Za-z_][A-Za-z0-9_]*\([^()]*\)\s*[;{]",
    ))
    .expect("valid code regex")
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProtectedKind {
    Url,
    Email,
    Code,
}

impl ProtectedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtectedKind::Url => "url",
            ProtectedKind::Email => "email",
            ProtectedKind::Code => "code",
        }
    }
}

pub fn protected_kind(text: &str) -> Option<ProtectedKind> {
    if URL_REGEX.is_match(text) {
        return Some(ProtectedKind::Url);
    }
    if EMAIL_REGEX.is_match(text) {
        return Some(ProtectedKind::Email);
    }
    if CODE_REGEX.is_match(text) {
        return Some(ProtectedKind::Code);
    }
    None
}
