//! Command line arguments parser with mutually exclusive argument groups.
//!
//! Arguments are declared up front and moved into a [`CommandLine`], which
//! hands back typed handles. After [`CommandLine::parse`] the handles give
//! access to the bound values.
//!
//! ```
//! use cmdline::{CommandLine, ParseError, SwitchArg, ValueArg};
//!
//! let mut cmd = CommandLine::builder("Greets people.").program_name("hello").build();
//! let name = cmd.add(ValueArg::<String>::new("name").short('n').required()).unwrap();
//! let (json, _xml) = cmd.xor_add(SwitchArg::new("json"), SwitchArg::new("xml")).unwrap();
//!
//! cmd.parse(["--name", "Alice", "--json"], false).unwrap();
//! assert_eq!(cmd.get(name).value().map(String::as_str), Some("Alice"));
//! assert!(cmd.get(json).is_set());
//!
//! let err = cmd.parse(["-n", "Bob", "--json", "--xml"], false).unwrap_err();
//! assert!(matches!(err, ParseError::ExclusivityViolation { .. }));
//! ```

macro_rules! builders {
    (@common) => {
        /// Description shown in help.
        pub fn help(mut self, help: impl Into<String>) -> Self {
            self.spec.set_help(help);
            self
        }

        pub fn required(mut self) -> Self {
            self.spec.set_required(true);
            self
        }
    };
    (labeled) => {
        builders!(@common);

        pub fn short(mut self, short: char) -> Self {
            self.spec.set_short(short);
            self
        }
    };
    (valued) => {
        /// Placeholder for the value in help, `--name <value_name>`.
        pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
            self.spec.set_value_name(value_name);
            self
        }
    };
    (positional) => {
        builders!(@common);
    };
}

macro_rules! arg_accessors {
    () => {
        fn spec(&self) -> &ArgSpec {
            &self.spec
        }

        fn spec_mut(&mut self) -> &mut ArgSpec {
            &mut self.spec
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    };
}

mod arg;
mod cmd_line;
mod error;
pub mod output;
mod rt;
mod switch;
mod value;
mod xor;

pub use crate::{
    arg::{Arg, ArgHandle, ArgId, ArgList, ArgSpec, Input},
    cmd_line::{CmdLineInterface, CommandLine, CommandLineBuilder},
    error::{Error, ParseError, SpecificationError},
    output::{CmdLineOutput, ProcessExit, StdOutput, Terminator},
    switch::{MultiSwitchArg, SwitchArg},
    value::{MultiArg, MultiPositionalArg, PositionalArg, ValueArg},
    xor::{XorGroup, XorHandler},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
