use std::ffi::OsString;

use crate::{arg::looks_like_flag, Input, ParseError, Result};

/// Cursor over the tokens of a single parse.
pub(crate) struct Tokens {
    args: Vec<String>,
    pos: usize,
    after_double_dash: bool,
}

impl Tokens {
    pub(crate) fn new(args: Vec<OsString>) -> Result<Self, ParseError> {
        let args = args
            .into_iter()
            .map(|it| {
                it.into_string().map_err(|it| {
                    // `to_string_lossy()` would replace invalid sequences with `FFFD`, the debug
                    // representation escapes them instead
                    let dbg = format!("{it:?}");
                    ParseError::InvalidUtf8 { token: dbg.trim_matches('"').to_string() }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { args, pos: 0, after_double_dash: false })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.args.len()
    }

    pub(crate) fn peek(&self) -> Option<&str> {
        self.args.get(self.pos).map(String::as_str)
    }

    /// Eats a `--` separator, after which every token is literal.
    pub(crate) fn eat_double_dash(&mut self) -> bool {
        if !self.after_double_dash && self.peek() == Some("--") {
            self.after_double_dash = true;
            self.pos += 1;
            return true;
        }
        false
    }

    pub(crate) fn input(&self, delimiter: char) -> Input<'_> {
        Input::new(&self.args[self.pos.min(self.args.len())..], delimiter, self.after_double_dash)
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Splits `-abc` into `['a', 'b', 'c']`.
    pub(crate) fn bundle(&self) -> Option<Vec<char>> {
        if self.after_double_dash {
            return None;
        }
        let token = self.peek()?;
        if !looks_like_flag(token) || token.starts_with("--") || token.chars().count() < 3 {
            return None;
        }
        Some(token[1..].chars().collect())
    }
}
