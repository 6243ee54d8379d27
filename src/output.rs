//! Rendering of help, version and failure text, and the process exit hook.

use std::fmt::Write;

use crate::{ArgSpec, CmdLineInterface, ParseError, XorGroup};

/// Renders what the command line has to say to the user.
pub trait CmdLineOutput {
    fn usage(&self, cmd: &dyn CmdLineInterface);

    fn version(&self, cmd: &dyn CmdLineInterface);

    fn failure(&self, cmd: &dyn CmdLineInterface, err: &ParseError);
}

/// Help and version go to stdout, failures to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdOutput;

impl CmdLineOutput for StdOutput {
    fn usage(&self, cmd: &dyn CmdLineInterface) {
        print!("{}", help(cmd));
    }

    fn version(&self, cmd: &dyn CmdLineInterface) {
        print!("{}", version_text(cmd));
    }

    fn failure(&self, cmd: &dyn CmdLineInterface, err: &ParseError) {
        eprint!("{}", failure_text(cmd, err));
    }
}

/// Ends the program after a rendered parse outcome.
pub trait Terminator {
    fn exit(&self, code: i32);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code)
    }
}

macro_rules! w {
    ($($tt:tt)*) => {
        let _ = write!($($tt)*);
    };
}

pub fn version_text(cmd: &dyn CmdLineInterface) -> String {
    let mut buf = cmd.program_name().to_string();
    if !cmd.version().is_empty() {
        w!(buf, " {}", cmd.version());
    }
    buf.push('\n');
    buf
}

/// One line synopsis: `prog --name <string> (--json | --xml) [<file>]`.
pub fn usage_line(cmd: &dyn CmdLineInterface) -> String {
    let args = cmd.arg_list();
    let xor = cmd.xor_handler();

    let mut items = vec![cmd.program_name().to_string()];
    let mut seen_groups = Vec::new();
    for (id, arg) in args.iter() {
        let spec = arg.spec();
        match xor.contains(id) {
            Some(group) => {
                if seen_groups.contains(&group) {
                    continue;
                }
                seen_groups.push(group);
                let members = xor.get(group).map(XorGroup::members).unwrap_or_default();
                let required = members.iter().any(|&it| args[it].spec().is_required());
                let forms = members
                    .iter()
                    .map(|&it| synopsis(args[it].spec()))
                    .collect::<Vec<_>>()
                    .join(" | ");
                items.push(if required { format!("({forms})") } else { format!("[{forms}]") });
            }
            None => {
                let form = synopsis(spec);
                items.push(if spec.is_required() { form } else { format!("[{form}]") });
            }
        }
    }
    items.join(" ")
}

pub fn help(cmd: &dyn CmdLineInterface) -> String {
    let mut buf = version_text(cmd);
    if !cmd.message().is_empty() {
        w!(buf, "  {}\n", cmd.message());
    }

    blank_line(&mut buf);
    w!(buf, "USAGE:\n    {}\n", usage_line(cmd));

    let args = cmd.arg_list();
    let (positional, labeled): (Vec<_>, Vec<_>) =
        args.iter().partition(|(_, arg)| arg.spec().is_positional());

    for (title, section) in [("ARGS", positional), ("OPTIONS", labeled)] {
        if section.is_empty() {
            continue;
        }
        blank_line(&mut buf);
        w!(buf, "{}:\n", title);

        let mut blank = "";
        for (id, arg) in section {
            w!(buf, "{}", blank);
            blank = "\n";

            let spec = arg.spec();
            w!(buf, "    {}\n", entry(spec));
            if let Some(help) = spec.help() {
                w!(buf, "      {}\n", help);
            }
            let others = cmd
                .xor_handler()
                .groups()
                .find(|it| it.contains(id))
                .map(|group| {
                    group
                        .members()
                        .iter()
                        .filter(|&&it| it != id)
                        .map(|&it| args[it].spec().name())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            if !others.is_empty() {
                w!(buf, "      Exclusive with: {}\n", others.join(", "));
            }
        }
    }
    buf
}

/// Error message followed by the usage line.
pub fn failure_text(cmd: &dyn CmdLineInterface, err: &ParseError) -> String {
    let mut buf = String::new();
    w!(buf, "error: {}\n", err);
    blank_line(&mut buf);
    w!(buf, "USAGE:\n    {}\n", usage_line(cmd));
    if cmd.has_help_and_version() {
        blank_line(&mut buf);
        w!(buf, "For more information, try `{} --help`.\n", cmd.program_name());
    }
    buf
}

fn synopsis(spec: &ArgSpec) -> String {
    let mut res = spec.long().map(|it| format!("--{it}")).unwrap_or_default();
    if let (true, Some(value)) = (spec.takes_value(), spec.value_name()) {
        if !res.is_empty() {
            res.push(' ');
        }
        w!(res, "<{}>", value);
    }
    if spec.allows_multiple() {
        res.push_str("...");
    }
    res
}

fn entry(spec: &ArgSpec) -> String {
    if spec.is_positional() {
        let (l, r) = match (spec.is_required(), spec.allows_multiple()) {
            (true, false) => ("<", ">"),
            (true, true) => ("<", ">..."),
            (false, false) => ("[", "]"),
            (false, true) => ("[", "]..."),
        };
        return format!("{}{}{}", l, spec.value_name().unwrap_or_default(), r);
    }
    let mut res = spec.short().map(|it| format!("-{it}, ")).unwrap_or_default();
    res.push_str(&synopsis(spec));
    res
}

fn blank_line(buf: &mut String) {
    buf.push('\n');
}
