//! Identifier casing shared by every backend.
//!
//! Words are split on any run of non-alphanumeric characters (`-`, `_`,
//! whitespace, dots, ...). snake_case additionally splits on case boundaries
//! (`userId` → `user`, `Id`; `HTTPServer` → `HTTP`, `Server`). All transforms
//! are idempotent on input already in the target case.
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

fn words(s: &str) -> impl Iterator<Item = &str> {
    SEPARATOR.split(s).filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split one separator-free word on case boundaries.
fn split_case(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let (idx, c) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|(_, n)| *n);
        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
        if boundary {
            parts.push(&word[start..idx]);
            start = idx;
        }
    }
    parts.push(&word[start..]);
    parts
}

/// `user_id` / `user-id` / `user id` → `UserId`. Inner capitals are kept.
pub fn to_pascal_case(s: &str) -> String {
    words(s).map(capitalize).collect()
}

/// PascalCase with the first character lower-cased.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `userId` / `UserID` / `user-id` → `user_id`.
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .flat_map(split_case)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Make a cased name usable as an identifier: empty names take `fallback`,
/// names starting with a digit get a `_` prefix.
pub fn guard_identifier(name: String, fallback: &str) -> String {
    match name.chars().next() {
        None => fallback.to_string(),
        Some(c) if c.is_numeric() => format!("_{name}"),
        Some(_) => name,
    }
}

/// ASCII identifier check (`[A-Za-z_$][A-Za-z0-9_$]*` without `$` unless allowed).
pub fn is_plain_identifier(s: &str, allow_dollar: bool) -> bool {
    let ok = |c: char| c.is_ascii_alphanumeric() || c == '_' || (allow_dollar && c == '$');
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if !c.is_ascii_digit() && ok(c) => chars.all(ok),
        _ => false,
    }
}
