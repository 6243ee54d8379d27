use thiserror::Error;

/// A mistake in how the command line was declared.
///
/// These are raised by registration methods and never deferred to parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecificationError {
    #[error("Invalid argument name: `{name}`")]
    InvalidName { name: String },

    #[error("Argument already registered: `{name}`")]
    DuplicateArg { name: String },

    #[error("Argument already belongs to another exclusive group: `{name}`")]
    AlreadyGrouped { name: String },

    #[error("An exclusive group needs at least two arguments, got {count}")]
    GroupTooSmall { count: usize },

    #[error("Argument is not registered with this command line: #{index}")]
    UnknownArg { index: usize },
}

/// A usage problem found while parsing the argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown argument: `{token}`. Use `--help` for more information")]
    UnknownArgument { token: String },

    #[error("Expected a value for `{arg}`")]
    MissingValue { arg: String },

    #[error("Can't parse `{arg}`, {reason}")]
    InvalidValue { arg: String, value: String, reason: String },

    #[error("Can't parse `{token}`, invalid utf8")]
    InvalidUtf8 { token: String },

    #[error("Argument specified more than once: `{arg}`")]
    RepeatedArgument { arg: String },

    #[error("Required argument missing: `{}`", .args.join("`, `"))]
    MissingRequiredArgument { args: Vec<String> },

    #[error("`{arg}` can't be used together with `{other}`")]
    ExclusivityViolation { arg: String, other: String },

    #[error("One of `{}` is required", .args.join("`, `"))]
    MissingExclusiveChoice { args: Vec<String> },

    #[error("Help requested")]
    HelpRequested,

    #[error("Version requested")]
    VersionRequested,
}

impl ParseError {
    /// Name of the argument the error is about, if there is a single one.
    pub fn arg(&self) -> Option<&str> {
        match self {
            ParseError::MissingValue { arg }
            | ParseError::InvalidValue { arg, .. }
            | ParseError::RepeatedArgument { arg }
            | ParseError::ExclusivityViolation { arg, .. } => Some(arg),
            ParseError::MissingRequiredArgument { args } if args.len() == 1 => Some(&args[0]),
            _ => None,
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, ParseError::HelpRequested)
    }

    pub fn is_version(&self) -> bool {
        matches!(self, ParseError::VersionRequested)
    }

    /// Exit status used when the error terminates the process.
    pub fn exit_code(&self) -> i32 {
        if self.is_help() || self.is_version() {
            0
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Specification(#[from] SpecificationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
