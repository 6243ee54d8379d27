use cmdline::{CommandLine, SwitchArg, ValueArg};

fn main() {
    let mut cmd = CommandLine::builder("Says hello.").version(env!("CARGO_PKG_VERSION")).build();
    let name = cmd.add(ValueArg::<String>::new("name").short('n').required()).unwrap();
    let emoji = cmd.add(SwitchArg::new("emoji").short('e')).unwrap();

    if cmd.parse_env(true).is_err() {
        return;
    }

    let bang = if cmd.get(emoji).is_set() { "❣️" } else { "!" };
    println!("Hello {}{}", cmd.get(name).value().map(String::as_str).unwrap_or_default(), bang);
}
