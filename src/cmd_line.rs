use std::{collections::HashSet, ffi::OsString, fmt, path::Path};

use tracing::{debug, trace};

use crate::{
    output::{CmdLineOutput, ProcessExit, StdOutput, Terminator},
    rt::Tokens,
    Arg, ArgHandle, ArgId, ArgList, ArgSpec, Input, ParseError, SpecificationError, SwitchArg,
    XorHandler,
};

/// Registration and parsing, as seen by callers and renderers.
pub trait CmdLineInterface {
    /// Registers an argument. Fails if one of its names is malformed or
    /// already taken.
    fn add_arg(&mut self, arg: Box<dyn Arg>) -> Result<ArgId, SpecificationError>;

    /// Registers `args` and makes them mutually exclusive. Nothing is
    /// registered if any of them is rejected.
    fn xor_add_args(&mut self, args: Vec<Box<dyn Arg>>) -> Result<Vec<ArgId>, SpecificationError>;

    /// Parses `args` (without the program name). With `exit_on_error`, a
    /// failure or a help/version request is rendered and the terminator is
    /// invoked before the error is returned.
    fn parse_vec(&mut self, args: Vec<OsString>, exit_on_error: bool) -> Result<(), ParseError>;

    fn output(&self) -> &dyn CmdLineOutput;

    fn set_output(&mut self, output: Box<dyn CmdLineOutput>);

    fn version(&self) -> &str;

    fn program_name(&self) -> &str;

    fn message(&self) -> &str;

    fn delimiter(&self) -> char;

    fn arg_list(&self) -> &ArgList;

    fn xor_handler(&self) -> &XorHandler;

    /// Whether `-h, --help` and `--version` were registered at construction.
    fn has_help_and_version(&self) -> bool;
}

pub struct CommandLine {
    program_name: String,
    version: String,
    message: String,
    delimiter: char,
    args: ArgList,
    xor: XorHandler,
    output: Box<dyn CmdLineOutput>,
    terminator: Box<dyn Terminator>,
    help_and_version: Option<(ArgId, ArgId)>,
}

pub struct CommandLineBuilder {
    message: String,
    program_name: Option<String>,
    version: String,
    delimiter: char,
    help_and_version: bool,
    output: Box<dyn CmdLineOutput>,
    terminator: Box<dyn Terminator>,
}

impl CommandLineBuilder {
    /// Defaults to the file name of the running executable.
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Character joining a flag to its value in a single token, as in
    /// `--name=value`. The default, `' '`, only accepts the value as the
    /// next token.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn help_and_version(mut self, yes: bool) -> Self {
        self.help_and_version = yes;
        self
    }

    pub fn output(mut self, output: impl CmdLineOutput + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    pub fn build(self) -> CommandLine {
        let mut args = ArgList::default();
        let help_and_version = if self.help_and_version {
            let help =
                SwitchArg::new("help").short('h').help("Displays usage information and exits.");
            let version =
                SwitchArg::new("version").help("Displays version information and exits.");
            Some((args.push(Box::new(help)), args.push(Box::new(version))))
        } else {
            None
        };

        CommandLine {
            program_name: self.program_name.unwrap_or_else(program_name_from_env),
            version: self.version,
            message: self.message,
            delimiter: self.delimiter,
            args,
            xor: XorHandler::new(),
            output: self.output,
            terminator: self.terminator,
            help_and_version,
        }
    }
}

fn program_name_from_env() -> String {
    std::env::args_os()
        .next()
        .and_then(|it| Path::new(&it).file_name().map(|it| it.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "program".to_string())
}

impl CommandLine {
    pub fn new(message: impl Into<String>) -> CommandLine {
        CommandLine::builder(message).build()
    }

    pub fn builder(message: impl Into<String>) -> CommandLineBuilder {
        CommandLineBuilder {
            message: message.into(),
            program_name: None,
            version: String::new(),
            delimiter: ' ',
            help_and_version: true,
            output: Box::new(StdOutput),
            terminator: Box::new(ProcessExit),
        }
    }

    pub fn add<T: Arg>(&mut self, arg: T) -> Result<ArgHandle<T>, SpecificationError> {
        self.add_arg(Box::new(arg)).map(ArgHandle::new)
    }

    pub fn xor_add<A: Arg, B: Arg>(
        &mut self,
        a: A,
        b: B,
    ) -> Result<(ArgHandle<A>, ArgHandle<B>), SpecificationError> {
        let ids = self.xor_add_args(vec![Box::new(a) as Box<dyn Arg>, Box::new(b)])?;
        Ok((ArgHandle::new(ids[0]), ArgHandle::new(ids[1])))
    }

    pub fn xor_add_all<T: Arg>(
        &mut self,
        args: Vec<T>,
    ) -> Result<Vec<ArgHandle<T>>, SpecificationError> {
        let args = args.into_iter().map(|it| Box::new(it) as Box<dyn Arg>).collect();
        Ok(self.xor_add_args(args)?.into_iter().map(ArgHandle::new).collect())
    }

    /// Makes already registered arguments mutually exclusive.
    ///
    /// If some of them already share a group, the others join it. Returns the
    /// group index.
    pub fn xor(&mut self, ids: &[ArgId]) -> Result<usize, SpecificationError> {
        let mut unique = Vec::new();
        for &id in ids {
            if self.args.get(id).is_none() {
                return Err(SpecificationError::UnknownArg { index: id.index() });
            }
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.len() < 2 {
            return Err(SpecificationError::GroupTooSmall { count: unique.len() });
        }
        self.group(&unique)
    }

    pub fn parse<I, S>(&mut self, args: I, exit_on_error: bool) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.parse_vec(args.into_iter().map(Into::into).collect(), exit_on_error)
    }

    /// Parses the arguments of the running process.
    pub fn parse_env(&mut self, exit_on_error: bool) -> Result<(), ParseError> {
        self.parse(std::env::args_os().skip(1), exit_on_error)
    }

    /// The argument behind `handle`, with whatever the last parse bound.
    ///
    /// # Panics
    ///
    /// If `handle` was issued by a different command line.
    pub fn get<T: Arg>(&self, handle: ArgHandle<T>) -> &T {
        match self.args.get(handle.id()).and_then(|it| it.as_any().downcast_ref::<T>()) {
            Some(it) => it,
            None => panic!("{handle:?} does not belong to this command line"),
        }
    }

    fn register(&mut self, mut arg: Box<dyn Arg>) -> ArgId {
        arg.spec_mut().set_xor_group(None);
        trace!(program = %self.program_name, arg = %arg.spec().name(), "registered argument");
        self.args.push(arg)
    }

    fn group(&mut self, ids: &[ArgId]) -> Result<usize, SpecificationError> {
        let group = self
            .xor
            .add_xor(ids)
            .map_err(|id| SpecificationError::AlreadyGrouped { name: self.args[id].spec().name() })?;
        for &id in ids {
            if let Some(arg) = self.args.get_mut(id) {
                arg.spec_mut().set_xor_group(Some(group));
            }
        }
        trace!(program = %self.program_name, group, members = ids.len(), "exclusive group");
        Ok(group)
    }

    fn reset(&mut self) {
        for arg in self.args.iter_mut() {
            arg.reset();
            arg.spec_mut().reset_matches();
        }
        self.xor.reset();
    }

    fn scan(&mut self, mut tokens: Tokens) -> Result<(), ParseError> {
        self.reset();

        while !tokens.is_empty() {
            if tokens.eat_double_dash() {
                continue;
            }
            if let Some((id, n)) = self.consume(tokens.input(self.delimiter))? {
                tokens.advance(n);
                self.record(id)?;
                continue;
            }

            let token = tokens.peek().unwrap_or_default().to_string();
            let bundle = match tokens.bundle().and_then(|it| self.resolve_bundle(&it)) {
                Some(it) => it,
                None => return Err(ParseError::UnknownArgument { token }),
            };
            tokens.advance(1);
            for (short, id) in bundle {
                let single = [format!("-{short}")];
                let consumed = match self.args.get_mut(id) {
                    Some(arg) => arg.consume(Input::new(&single, self.delimiter, false))?,
                    None => 0,
                };
                if consumed == 0 {
                    return Err(ParseError::UnknownArgument { token });
                }
                self.record(id)?;
            }
        }

        self.check_required()
    }

    /// Offers the head of `input` to every argument in registration order;
    /// the first to take it wins.
    fn consume(&mut self, input: Input<'_>) -> Result<Option<(ArgId, usize)>, ParseError> {
        for (i, arg) in self.args.iter_mut().enumerate() {
            let n = arg.consume(input)?;
            if n > 0 {
                trace!(arg = %arg.spec().name(), token = input.first().unwrap_or_default(), "matched");
                return Ok(Some((ArgId(i), n)));
            }
        }
        Ok(None)
    }

    /// Maps every character of a `-abc` bundle to a value-less short flag.
    fn resolve_bundle(&self, shorts: &[char]) -> Option<Vec<(char, ArgId)>> {
        shorts
            .iter()
            .map(|&short| {
                self.args
                    .iter()
                    .find(|(_, arg)| {
                        let spec = arg.spec();
                        !spec.is_positional() && !spec.takes_value() && spec.short() == Some(short)
                    })
                    .map(|(id, _)| (short, id))
            })
            .collect()
    }

    fn record(&mut self, id: ArgId) -> Result<(), ParseError> {
        let (name, count, multiple) = match self.args.get_mut(id) {
            Some(arg) => {
                let spec = arg.spec_mut();
                (spec.name(), spec.record_match(), spec.allows_multiple())
            }
            None => return Ok(()),
        };
        match self.help_and_version {
            Some((help, _)) if help == id => return Err(ParseError::HelpRequested),
            Some((_, version)) if version == id => return Err(ParseError::VersionRequested),
            _ => (),
        }
        if count > 1 && !multiple {
            return Err(ParseError::RepeatedArgument { arg: name });
        }
        self.xor.check(id).map_err(|other| ParseError::ExclusivityViolation {
            arg: name,
            other: self.args[other].spec().name(),
        })
    }

    fn check_required(&self) -> Result<(), ParseError> {
        let missing = self
            .args
            .iter()
            .filter(|&(id, arg)| {
                let spec = arg.spec();
                spec.is_required() && spec.matched() == 0 && self.xor.contains(id).is_none()
            })
            .map(|(_, arg)| arg.spec().name())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(ParseError::MissingRequiredArgument { args: missing });
        }

        for group in self.xor.groups() {
            let specs = group.members().iter().map(|&id| self.args[id].spec());
            if group.matched().is_none() && specs.clone().any(ArgSpec::is_required) {
                return Err(ParseError::MissingExclusiveChoice {
                    args: specs.map(ArgSpec::name).collect(),
                });
            }
        }
        Ok(())
    }

    fn exit_with(&self, err: &ParseError) {
        match err {
            ParseError::HelpRequested => self.output.usage(self),
            ParseError::VersionRequested => self.output.version(self),
            _ => self.output.failure(self, err),
        }
        self.terminator.exit(err.exit_code());
    }
}

impl CmdLineInterface for CommandLine {
    fn add_arg(&mut self, arg: Box<dyn Arg>) -> Result<ArgId, SpecificationError> {
        self.args.check_new(arg.spec())?;
        Ok(self.register(arg))
    }

    fn xor_add_args(&mut self, args: Vec<Box<dyn Arg>>) -> Result<Vec<ArgId>, SpecificationError> {
        if args.len() < 2 {
            return Err(SpecificationError::GroupTooSmall { count: args.len() });
        }
        let mut names = HashSet::new();
        for arg in &args {
            self.args.check_new(arg.spec())?;
            for name in arg.spec().names() {
                if !names.insert(name.clone()) {
                    return Err(SpecificationError::DuplicateArg { name });
                }
            }
        }

        let ids = args.into_iter().map(|arg| self.register(arg)).collect::<Vec<_>>();
        self.group(&ids)?;
        Ok(ids)
    }

    fn parse_vec(&mut self, args: Vec<OsString>, exit_on_error: bool) -> Result<(), ParseError> {
        debug!(program = %self.program_name, tokens = args.len(), "parsing command line");
        let res = Tokens::new(args).and_then(|tokens| self.scan(tokens));
        match res {
            Ok(()) => {
                debug!(program = %self.program_name, "parsed command line");
                Ok(())
            }
            Err(err) => {
                debug!(program = %self.program_name, error = %err, "command line rejected");
                if exit_on_error {
                    self.exit_with(&err);
                }
                Err(err)
            }
        }
    }

    fn output(&self) -> &dyn CmdLineOutput {
        self.output.as_ref()
    }

    fn set_output(&mut self, output: Box<dyn CmdLineOutput>) {
        self.output = output;
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn program_name(&self) -> &str {
        &self.program_name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn arg_list(&self) -> &ArgList {
        &self.args
    }

    fn xor_handler(&self) -> &XorHandler {
        &self.xor
    }

    fn has_help_and_version(&self) -> bool {
        self.help_and_version.is_some()
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("program_name", &self.program_name)
            .field("version", &self.version)
            .field("message", &self.message)
            .field("delimiter", &self.delimiter)
            .field("args", &self.args)
            .field("xor", &self.xor)
            .finish_non_exhaustive()
    }
}
