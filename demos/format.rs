use std::path::PathBuf;

use cmdline::{CommandLine, MultiPositionalArg, MultiSwitchArg, SwitchArg, ValueArg};

fn main() {
    let mut cmd = CommandLine::builder("Converts documents.")
        .version(env!("CARGO_PKG_VERSION"))
        .delimiter('=')
        .build();
    let (json, _xml) = cmd
        .xor_add(
            SwitchArg::new("json").short('j').help("Write JSON.").required(),
            SwitchArg::new("xml").short('x').help("Write XML."),
        )
        .unwrap();
    let indent = cmd
        .add(ValueArg::<usize>::new("indent").value_name("width").default_value(2))
        .unwrap();
    let verbose = cmd.add(MultiSwitchArg::new("verbose").short('v')).unwrap();
    let files = cmd
        .add(MultiPositionalArg::<PathBuf>::new("files").required().help("Documents to convert."))
        .unwrap();

    if cmd.parse_env(true).is_err() {
        return;
    }

    let format = if cmd.get(json).is_set() { "json" } else { "xml" };
    let indent = cmd.get(indent).value().copied().unwrap_or_default();
    for file in cmd.get(files).values() {
        if cmd.get(verbose).count() > 0 {
            eprintln!("converting {}", file.display());
        }
        println!("{} -> {format} (indent {indent})", file.display());
    }
}
