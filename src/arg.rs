use std::{any::Any, fmt, marker::PhantomData, ops::Index};

use crate::{ParseError, SpecificationError};

/// Declaration shared by every argument kind: names, arity, required-ness,
/// exclusive group membership and the per-parse match count.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    long: Option<String>,
    short: Option<char>,
    value_name: Option<String>,
    help: Option<String>,
    takes_value: bool,
    required: bool,
    multiple: bool,
    xor_group: Option<usize>,
    matched: u32,
}

impl ArgSpec {
    /// A labeled argument without a value, `--long`.
    pub fn switch(long: impl Into<String>) -> ArgSpec {
        ArgSpec::new(Some(long.into()), None, false)
    }

    /// A labeled argument followed by a value, `--long <value_name>`.
    pub fn option(long: impl Into<String>, value_name: impl Into<String>) -> ArgSpec {
        ArgSpec::new(Some(long.into()), Some(value_name.into()), true)
    }

    /// An unlabeled argument identified by its value name.
    pub fn positional(value_name: impl Into<String>) -> ArgSpec {
        ArgSpec::new(None, Some(value_name.into()), true)
    }

    fn new(long: Option<String>, value_name: Option<String>, takes_value: bool) -> ArgSpec {
        ArgSpec {
            long,
            short: None,
            value_name,
            help: None,
            takes_value,
            required: false,
            multiple: false,
            xor_group: None,
            matched: 0,
        }
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }
    pub fn short(&self) -> Option<char> {
        self.short
    }
    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
    pub fn is_required(&self) -> bool {
        self.required
    }
    pub fn allows_multiple(&self) -> bool {
        self.multiple
    }
    pub fn is_positional(&self) -> bool {
        self.long.is_none()
    }
    pub fn xor_group(&self) -> Option<usize> {
        self.xor_group
    }
    /// How many times the argument matched during the last parse.
    pub fn matched(&self) -> u32 {
        self.matched
    }

    pub fn set_short(&mut self, short: char) {
        self.short = Some(short);
    }
    pub fn set_value_name(&mut self, value_name: impl Into<String>) {
        self.value_name = Some(value_name.into());
    }
    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = Some(help.into());
    }
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }
    pub fn set_multiple(&mut self, multiple: bool) {
        self.multiple = multiple;
    }
    pub fn set_xor_group(&mut self, group: Option<usize>) {
        self.xor_group = group;
    }

    /// The name used in messages: `--long` for labeled arguments, `<value>`
    /// for positional ones.
    pub fn name(&self) -> String {
        match (&self.long, &self.value_name) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(value)) => format!("<{value}>"),
            (None, None) => String::new(),
        }
    }

    /// Every form the argument can be written as. No two registered
    /// arguments may share one.
    pub fn names(&self) -> Vec<String> {
        let mut res = vec![self.name()];
        if let (false, Some(short)) = (self.is_positional(), self.short) {
            res.push(format!("-{short}"));
        }
        res
    }

    pub(crate) fn validate(&self) -> Result<(), SpecificationError> {
        let invalid = |name: String| Err(SpecificationError::InvalidName { name });
        match &self.long {
            Some(long) => {
                if long.is_empty() || long.starts_with('-') || long.contains(char::is_whitespace)
                {
                    return invalid(format!("--{long}"));
                }
                if let Some(short) = self.short {
                    if short == '-' || short.is_whitespace() {
                        return invalid(format!("-{short}"));
                    }
                }
            }
            None => match &self.value_name {
                Some(value) if !value.is_empty() && !value.contains(char::is_whitespace) => (),
                _ => return invalid(self.name()),
            },
        }
        Ok(())
    }

    /// Matches a labeled token. Yields `Some(None)` for an exact match and
    /// `Some(Some(value))` for `--long<delimiter>value`.
    pub fn match_flag<'t>(&self, token: &'t str, delimiter: char) -> Option<Option<&'t str>> {
        if self.is_positional() {
            return None;
        }
        if self.is_name(token) {
            return Some(None);
        }
        if self.takes_value && delimiter != ' ' {
            if let Some((head, value)) = token.split_once(delimiter) {
                if self.is_name(head) {
                    return Some(Some(value));
                }
            }
        }
        None
    }

    fn is_name(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return self.long.as_deref() == Some(long);
        }
        let mut chars = token.strip_prefix('-').unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            _ => false,
        }
    }

    pub(crate) fn record_match(&mut self) -> u32 {
        self.matched += 1;
        self.matched
    }

    pub(crate) fn reset_matches(&mut self) {
        self.matched = 0;
    }
}

/// Remaining tokens offered to an argument, starting at the current one.
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    tokens: &'a [String],
    delimiter: char,
    literal: bool,
}

impl<'a> Input<'a> {
    /// `literal` is set once `--` has been seen: only positional arguments
    /// may take tokens from then on.
    pub fn new(tokens: &'a [String], delimiter: char, literal: bool) -> Input<'a> {
        Input { tokens, delimiter, literal }
    }

    pub fn tokens(&self) -> &'a [String] {
        self.tokens
    }
    pub fn first(&self) -> Option<&'a str> {
        self.tokens.first().map(String::as_str)
    }
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Whether the head token is exactly one of `spec`'s flag names.
    pub fn switch(&self, spec: &ArgSpec) -> bool {
        match self.first() {
            Some(token) if !self.literal => spec.match_flag(token, ' ') == Some(None),
            _ => false,
        }
    }

    /// The value for a labeled argument at the head of the input, with the
    /// number of tokens it spans.
    pub fn flag_value(&self, spec: &ArgSpec) -> Result<Option<(usize, &'a str)>, ParseError> {
        let token = match self.first() {
            Some(it) if !self.literal => it,
            _ => return Ok(None),
        };
        match spec.match_flag(token, self.delimiter) {
            None => Ok(None),
            Some(Some(value)) => Ok(Some((1, value))),
            Some(None) => match self.tokens.get(1) {
                Some(value) if value != "--" => Ok(Some((2, value.as_str()))),
                _ => Err(ParseError::MissingValue { arg: spec.name() }),
            },
        }
    }

    /// The head token, if it can be taken by a positional argument.
    pub fn positional(&self) -> Option<&'a str> {
        let token = self.first()?;
        if self.literal || !looks_like_flag(token) {
            Some(token)
        } else {
            None
        }
    }
}

pub(crate) fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// A declared command line argument.
///
/// Implementors keep an [`ArgSpec`] and bind their own values in
/// [`Arg::consume`]. Match counting, repetition and exclusivity checks are
/// done by the command line.
pub trait Arg: Any + fmt::Debug {
    fn spec(&self) -> &ArgSpec;

    fn spec_mut(&mut self) -> &mut ArgSpec;

    /// Tries to take tokens from the head of `input`. Returns how many were
    /// consumed, `0` if the argument does not match there.
    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError>;

    /// Drops values bound by a previous parse.
    fn reset(&mut self);

    fn as_any(&self) -> &dyn Any;
}

/// Index of an argument within its command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgId(pub(crate) usize);

impl ArgId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Typed reference to a registered argument, used to read it back after
/// parsing.
pub struct ArgHandle<T> {
    id: ArgId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArgHandle<T> {
    pub(crate) fn new(id: ArgId) -> ArgHandle<T> {
        ArgHandle { id, _marker: PhantomData }
    }

    pub fn id(self) -> ArgId {
        self.id
    }
}

impl<T> Clone for ArgHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArgHandle<T> {}

impl<T> fmt::Debug for ArgHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgHandle").field(&self.id.0).finish()
    }
}

impl<T> From<ArgHandle<T>> for ArgId {
    fn from(handle: ArgHandle<T>) -> ArgId {
        handle.id
    }
}

/// Registered arguments in registration order.
#[derive(Debug, Default)]
pub struct ArgList {
    args: Vec<Box<dyn Arg>>,
}

impl ArgList {
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArgId, &dyn Arg)> + Clone + '_ {
        self.args.iter().enumerate().map(|(i, arg)| (ArgId(i), arg.as_ref()))
    }

    pub fn get(&self, id: ArgId) -> Option<&dyn Arg> {
        self.args.get(id.0).map(|it| it.as_ref())
    }

    /// Looks an argument up by any of its name forms (`--long`, `-s`,
    /// `<value>`).
    pub fn find(&self, name: &str) -> Option<ArgId> {
        self.iter().find(|(_, arg)| arg.spec().names().iter().any(|it| it == name)).map(|it| it.0)
    }

    pub(crate) fn get_mut(&mut self, id: ArgId) -> Option<&mut (dyn Arg + 'static)> {
        self.args.get_mut(id.0).map(|it| it.as_mut())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Arg>> {
        self.args.iter_mut()
    }

    /// Checks that `spec` is well formed and shares no name with a
    /// registered argument.
    pub(crate) fn check_new(&self, spec: &ArgSpec) -> Result<(), SpecificationError> {
        spec.validate()?;
        for name in spec.names() {
            if self.find(&name).is_some() {
                return Err(SpecificationError::DuplicateArg { name });
            }
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, arg: Box<dyn Arg>) -> ArgId {
        self.args.push(arg);
        ArgId(self.args.len() - 1)
    }
}

impl Index<ArgId> for ArgList {
    type Output = dyn Arg;

    fn index(&self, id: ArgId) -> &(dyn Arg + 'static) {
        self.args[id.0].as_ref()
    }
}
