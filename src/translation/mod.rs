use std::borrow::Cow;

mod scan;

use scan::{
    State, block_comment_ends, block_comment_starts, digits_at, dollar_quote_closes,
    dollar_quote_opens, line_comment_starts,
};

/// Positional placeholder syntax of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    /// Render the 1-based placeholder `n` in this style.
    #[must_use]
    pub fn placeholder(self, n: usize) -> String {
        match self {
            PlaceholderStyle::Postgres => format!("${n}"),
            PlaceholderStyle::Sqlite => format!("?{n}"),
        }
    }
}

/// How to resolve translation for a call relative to the pool default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Follow the pool's default setting.
    #[default]
    PoolDefault,
    /// Force translation on, regardless of pool default.
    ForceOn,
    /// Force translation off, regardless of pool default.
    ForceOff,
}

impl TranslationMode {
    #[must_use]
    pub fn resolve(self, pool_default: bool) -> bool {
        match self {
            TranslationMode::PoolDefault => pool_default,
            TranslationMode::ForceOn => true,
            TranslationMode::ForceOff => false,
        }
    }
}

/// Translate placeholders between Postgres-style `$N` and SQLite-style `?N`.
///
/// Quoted strings, comments and dollar-quoted blocks are left untouched, so a raw
/// predicate like `title = '$1 deal'` survives translation. Returns a borrowed `Cow`
/// when no changes are needed.
///
/// ```rust
/// use catalog_db::prelude::*;
///
/// let sql = translate_placeholders(
///     "SELECT * FROM steam WHERE app_id = $1",
///     PlaceholderStyle::Sqlite,
///     true,
/// );
/// assert_eq!(sql, "SELECT * FROM steam WHERE app_id = ?1");
/// ```
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(sql);
    }

    let (from, to) = match target {
        PlaceholderStyle::Sqlite => (b'$', '?'),
        PlaceholderStyle::Postgres => (b'?', '$'),
    };

    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut state = State::Normal;
    let mut idx = 0;
    let bytes = sql.as_bytes();

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                _ if line_comment_starts(bytes, idx) => state = State::LineComment,
                _ if block_comment_starts(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                _ if b == from => {
                    if let Some((digits_end, digits)) = digits_at(bytes, idx + 1) {
                        let buf = out.get_or_insert_with(|| String::with_capacity(sql.len()));
                        buf.push_str(&sql[copied..idx]);
                        buf.push(to);
                        buf.push_str(digits);
                        copied = digits_end;
                        idx = digits_end;
                        continue;
                    } else if b == b'$'
                        && let Some((tag, close)) = dollar_quote_opens(bytes, idx)
                    {
                        state = State::DollarQuoted(tag);
                        idx = close;
                    }
                }
                b'$' => {
                    if let Some((tag, close)) = dollar_quote_opens(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = close;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if block_comment_starts(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if block_comment_ends(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && dollar_quote_closes(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }
        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}
