use std::{any::Any, fmt, str::FromStr};

use crate::{Arg, ArgSpec, Input, ParseError};

/// A labeled argument taking one value, `-n, --number <value>`.
#[derive(Debug)]
pub struct ValueArg<T> {
    spec: ArgSpec,
    value: Option<T>,
    default: Option<T>,
    allowed: Vec<String>,
}

impl<T> ValueArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    pub fn new(long: impl Into<String>) -> ValueArg<T> {
        ValueArg {
            spec: ArgSpec::option(long, "value"),
            value: None,
            default: None,
            allowed: Vec::new(),
        }
    }

    builders!(labeled);
    builders!(valued);

    /// Value reported by [`ValueArg::value`] when the argument is absent.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Restricts the raw value to one of `values`.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    /// The bound value, or the default if the argument did not match.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl<T> Arg for ValueArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        let (n, raw) = match input.flag_value(&self.spec)? {
            Some(it) => it,
            None => return Ok(0),
        };
        self.value = Some(value_from_str(&self.spec, &self.allowed, raw)?);
        Ok(n)
    }

    fn reset(&mut self) {
        self.value = None;
    }
}

/// A labeled argument that may be repeated, collecting every value.
#[derive(Debug)]
pub struct MultiArg<T> {
    spec: ArgSpec,
    values: Vec<T>,
    allowed: Vec<String>,
}

impl<T> MultiArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    pub fn new(long: impl Into<String>) -> MultiArg<T> {
        let mut spec = ArgSpec::option(long, "value");
        spec.set_multiple(true);
        MultiArg { spec, values: Vec::new(), allowed: Vec::new() }
    }

    builders!(labeled);
    builders!(valued);

    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Arg for MultiArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        let (n, raw) = match input.flag_value(&self.spec)? {
            Some(it) => it,
            None => return Ok(0),
        };
        self.values.push(value_from_str(&self.spec, &self.allowed, raw)?);
        Ok(n)
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}

/// An unlabeled argument taking a single token, `<file>`.
#[derive(Debug)]
pub struct PositionalArg<T> {
    spec: ArgSpec,
    value: Option<T>,
    default: Option<T>,
}

impl<T> PositionalArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    pub fn new(name: impl Into<String>) -> PositionalArg<T> {
        PositionalArg { spec: ArgSpec::positional(name), value: None, default: None }
    }

    builders!(positional);

    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref().or(self.default.as_ref())
    }
}

impl<T> Arg for PositionalArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        // Leave later tokens to the next positional.
        if self.spec.matched() > 0 {
            return Ok(0);
        }
        let raw = match input.positional() {
            Some(it) => it,
            None => return Ok(0),
        };
        self.value = Some(value_from_str(&self.spec, &[], raw)?);
        Ok(1)
    }

    fn reset(&mut self) {
        self.value = None;
    }
}

/// An unlabeled argument collecting every remaining positional token,
/// `<file>...`.
#[derive(Debug)]
pub struct MultiPositionalArg<T> {
    spec: ArgSpec,
    values: Vec<T>,
}

impl<T> MultiPositionalArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    pub fn new(name: impl Into<String>) -> MultiPositionalArg<T> {
        let mut spec = ArgSpec::positional(name);
        spec.set_multiple(true);
        MultiPositionalArg { spec, values: Vec::new() }
    }

    builders!(positional);

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Arg for MultiPositionalArg<T>
where
    T: FromStr + fmt::Debug + 'static,
    T::Err: fmt::Display,
{
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        let raw = match input.positional() {
            Some(it) => it,
            None => return Ok(0),
        };
        self.values.push(value_from_str(&self.spec, &[], raw)?);
        Ok(1)
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}

fn value_from_str<T>(spec: &ArgSpec, allowed: &[String], raw: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let invalid = |reason: String| ParseError::InvalidValue {
        arg: spec.name(),
        value: raw.to_string(),
        reason,
    };
    if !allowed.is_empty() && !allowed.iter().any(|it| it == raw) {
        return Err(invalid(format!("expected one of `{}`, got `{raw}`", allowed.join("`, `"))));
    }
    raw.parse::<T>().map_err(|err| invalid(err.to_string()))
}
