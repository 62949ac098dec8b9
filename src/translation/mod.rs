use std::borrow::Cow;

mod scanner;

use scanner::{
    State, is_block_comment_end, is_block_comment_start, is_line_comment_start, matches_tag,
    scan_digits, try_start_dollar_quote,
};

/// Target placeholder style for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?` or `?1`.
    Sqlite,
}

/// How to resolve translation for a call relative to the adapter default
/// ([`ConnectionConfig::translate_placeholders`](crate::ConnectionConfig)).
///
/// # Examples
/// ```rust
/// use sql_adapter::prelude::*;
///
/// assert!(TranslationMode::ForceOn.resolve(false));
/// assert!(TranslationMode::AdapterDefault.resolve(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Follow the adapter's configured default.
    #[default]
    AdapterDefault,
    /// Force translation on, regardless of the default.
    ForceOn,
    /// Force translation off, regardless of the default.
    ForceOff,
}

impl TranslationMode {
    #[must_use]
    pub fn resolve(self, adapter_default: bool) -> bool {
        match self {
            TranslationMode::AdapterDefault => adapter_default,
            TranslationMode::ForceOn => true,
            TranslationMode::ForceOff => false,
        }
    }
}

/// Rewrite placeholders into the target driver's style.
///
/// * `Postgres`: a bare `?` becomes `$1`, `$2`, ... in order of appearance; `?N` becomes `$N`.
/// * `Sqlite`: `$N` becomes `?N`; bare `?` is already native.
///
/// Quoted strings, comments and dollar-quoted blocks are skipped by a small state machine. It
/// may still miss edge cases in complex SQL such as PL/pgSQL bodies, so statements written for
/// one dialect should prefer that dialect's native placeholders.
///
/// Returns a borrowed `Cow` when no changes are needed.
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(sql);
    }

    let mut out: Option<String> = None;
    let mut copied_to = 0;
    let mut next_positional = 1usize;
    let mut state = State::Normal;
    let mut idx = 0;
    let bytes = sql.as_bytes();

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => state = State::BlockComment(1),
                b'$' => {
                    if let Some((tag, closing)) = try_start_dollar_quote(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = closing;
                    } else if matches!(target, PlaceholderStyle::Sqlite)
                        && let Some((digits_end, digits)) = scan_digits(bytes, idx + 1)
                    {
                        let buf = out.get_or_insert_with(String::new);
                        buf.push_str(&sql[copied_to..idx]);
                        buf.push('?');
                        buf.push_str(digits);
                        copied_to = digits_end;
                        idx = digits_end - 1;
                    }
                }
                b'?' if matches!(target, PlaceholderStyle::Postgres) => {
                    let buf = out.get_or_insert_with(String::new);
                    buf.push_str(&sql[copied_to..idx]);
                    buf.push('$');
                    if let Some((digits_end, digits)) = scan_digits(bytes, idx + 1) {
                        buf.push_str(digits);
                        copied_to = digits_end;
                        idx = digits_end - 1;
                    } else {
                        buf.push_str(&next_positional.to_string());
                        next_positional += 1;
                        copied_to = idx + 1;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
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
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && matches_tag(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }

        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied_to..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_bare_question_marks_for_postgres() {
        let sql = "INSERT INTO t (a,b) VALUES (?,?)";
        let res = translate_placeholders(sql, PlaceholderStyle::Postgres, true);
        assert_eq!(res, "INSERT INTO t (a,b) VALUES ($1,$2)");
    }

    #[test]
    fn translates_numbered_sqlite_to_postgres() {
        let sql = "select * from t where a = ?1 and b = ?2";
        let res = translate_placeholders(sql, PlaceholderStyle::Postgres, true);
        assert_eq!(res, "select * from t where a = $1 and b = $2");
    }

    #[test]
    fn translates_postgres_to_sqlite() {
        let sql = "insert into t values($1, $2)";
        let res = translate_placeholders(sql, PlaceholderStyle::Sqlite, true);
        assert_eq!(res, "insert into t values(?1, ?2)");
    }

    #[test]
    fn skips_inside_literals_and_comments() {
        let sql = "select '?', ? -- ?\n/* ? */ from t where a = ?";
        let res = translate_placeholders(sql, PlaceholderStyle::Postgres, true);
        assert_eq!(res, "select '?', $1 -- ?\n/* ? */ from t where a = $2");
    }

    #[test]
    fn skips_dollar_quoted_blocks() {
        let sql = "$foo$ select $1 from t $foo$ where a = $1";
        let res = translate_placeholders(sql, PlaceholderStyle::Sqlite, true);
        assert_eq!(res, "$foo$ select $1 from t $foo$ where a = ?1");
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        let sql = "select 'é?' as x, ? from café";
        let res = translate_placeholders(sql, PlaceholderStyle::Postgres, true);
        assert_eq!(res, "select 'é?' as x, $1 from café");
    }

    #[test]
    fn respects_disabled_flag() {
        let sql = "select * from t where a = ?";
        let res = translate_placeholders(sql, PlaceholderStyle::Postgres, false);
        assert!(matches!(res, Cow::Borrowed(_)));
        assert_eq!(res, sql);
    }

    #[test]
    fn sqlite_target_leaves_question_marks_borrowed() {
        let sql = "select * from t where a = ?";
        let res = translate_placeholders(sql, PlaceholderStyle::Sqlite, true);
        assert!(matches!(res, Cow::Borrowed(_)));
    }

    #[test]
    fn translation_mode_resolution() {
        assert!(TranslationMode::ForceOn.resolve(false));
        assert!(!TranslationMode::ForceOff.resolve(true));
        assert!(TranslationMode::AdapterDefault.resolve(true));
        assert!(!TranslationMode::AdapterDefault.resolve(false));
    }
}
