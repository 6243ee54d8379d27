use std::path::PathBuf;

use cmdline::{
    CommandLine, MultiArg, MultiPositionalArg, MultiSwitchArg, PositionalArg, SwitchArg, ValueArg,
};
use expect_test::expect;

use crate::{check, quiet};

#[test]
fn delimiter_joins_flag_and_value() {
    let mut cmd = CommandLine::builder("").program_name("prog").delimiter('=').build();
    let jobs = cmd.add(ValueArg::<u32>::new("jobs").short('j')).unwrap();

    check(&mut cmd, "--jobs=4", expect![[r#"--jobs x1"#]]);
    assert_eq!(cmd.get(jobs).value(), Some(&4));
    check(&mut cmd, "-j=2", expect![[r#"--jobs x1"#]]);
    assert_eq!(cmd.get(jobs).value(), Some(&2));
    check(&mut cmd, "--jobs 3", expect![[r#"--jobs x1"#]]);
    assert_eq!(cmd.get(jobs).value(), Some(&3));
    check(&mut cmd, "--jobs=", expect![[r#"Can't parse `--jobs`, cannot parse integer from empty string"#]]);

    let mut cmd = quiet("");
    cmd.add(ValueArg::<u32>::new("jobs")).unwrap();
    check(
        &mut cmd,
        "--jobs=4",
        expect![[r#"Unknown argument: `--jobs=4`. Use `--help` for more information"#]],
    );
}

#[test]
fn missing_values() {
    let mut cmd = quiet("");
    cmd.add(ValueArg::<PathBuf>::new("out")).unwrap();
    cmd.add(MultiPositionalArg::<String>::new("rest")).unwrap();

    check(&mut cmd, "--out", expect![[r#"Expected a value for `--out`"#]]);
    check(&mut cmd, "--out --", expect![[r#"Expected a value for `--out`"#]]);
    check(&mut cmd, "--out -- x", expect![[r#"Expected a value for `--out`"#]]);
    check(&mut cmd, "--out --help", expect![[r#"--out x1"#]]);
}

#[test]
fn defaults_and_repeats() {
    let mut cmd = quiet("");
    let level = cmd.add(ValueArg::<u8>::new("level").default_value(3)).unwrap();
    let include = cmd.add(MultiArg::<String>::new("include").short('I')).unwrap();
    let verbose = cmd.add(MultiSwitchArg::new("verbose").short('v')).unwrap();

    check(&mut cmd, "", expect![[r#""#]]);
    assert_eq!(cmd.get(level).value(), Some(&3));
    assert!(cmd.get(include).values().is_empty());
    assert_eq!(cmd.get(verbose).count(), 0);

    check(
        &mut cmd,
        "-I a --level 9 -v --include b -v",
        expect![[r#"--level x1, --include x2, --verbose x2"#]],
    );
    assert_eq!(cmd.get(level).value(), Some(&9));
    assert_eq!(cmd.get(include).values(), ["a", "b"]);
    assert_eq!(cmd.get(verbose).count(), 2);
}

#[test]
fn allowed_values() {
    let mut cmd = quiet("");
    let format = ValueArg::<String>::new("format")
        .allowed_values(["json", "xml"])
        .default_value("json".to_string());
    let format = cmd.add(format).unwrap();

    check(&mut cmd, "--format xml", expect![[r#"--format x1"#]]);
    assert_eq!(cmd.get(format).value().map(String::as_str), Some("xml"));
    check(
        &mut cmd,
        "--format yaml",
        expect![[r#"Can't parse `--format`, expected one of `json`, `xml`, got `yaml`"#]],
    );
}

#[test]
fn bundled_switches() {
    let mut cmd = quiet("");
    let all = cmd.add(SwitchArg::new("all").short('a')).unwrap();
    let long = cmd.add(SwitchArg::new("long").short('l')).unwrap();
    let verbose = cmd.add(MultiSwitchArg::new("verbose").short('v')).unwrap();
    cmd.add(ValueArg::<String>::new("sort").short('s')).unwrap();

    check(&mut cmd, "-alv", expect![[r#"--all x1, --long x1, --verbose x1"#]]);
    assert!(cmd.get(all).is_set());
    assert!(cmd.get(long).is_set());

    check(&mut cmd, "-vvv", expect![[r#"--verbose x3"#]]);
    assert_eq!(cmd.get(verbose).count(), 3);

    check(&mut cmd, "-aa", expect![[r#"Argument specified more than once: `--all`"#]]);
    check(&mut cmd, "-ax", expect![[r#"Unknown argument: `-ax`. Use `--help` for more information"#]]);
    check(&mut cmd, "-as", expect![[r#"Unknown argument: `-as`. Use `--help` for more information"#]]);
    check(&mut cmd, "-ah", expect![[r#"Help requested"#]]);
}

#[test]
fn bundles_respect_groups() {
    let mut cmd = quiet("");
    cmd.xor_add(SwitchArg::new("json").short('j'), SwitchArg::new("xml").short('x')).unwrap();

    check(&mut cmd, "-jx", expect![[r#"`--xml` can't be used together with `--json`"#]]);
}

#[test]
fn positionals() {
    let mut cmd = quiet("");
    let src = cmd.add(PositionalArg::<PathBuf>::new("src").required()).unwrap();
    let dst = cmd.add(PositionalArg::<PathBuf>::new("dst")).unwrap();
    cmd.add(SwitchArg::new("force").short('f')).unwrap();

    check(&mut cmd, "a -f b", expect![[r#"<src> x1, <dst> x1, --force x1"#]]);
    assert_eq!(cmd.get(src).value(), Some(&PathBuf::from("a")));
    assert_eq!(cmd.get(dst).value(), Some(&PathBuf::from("b")));

    check(&mut cmd, "a", expect![[r#"<src> x1"#]]);
    assert_eq!(cmd.get(dst).value(), None);

    check(&mut cmd, "a b c", expect![[r#"Unknown argument: `c`. Use `--help` for more information"#]]);
    check(&mut cmd, "-f", expect![[r#"Required argument missing: `<src>`"#]]);
}

#[test]
fn double_dash_makes_the_rest_literal() {
    let mut cmd = quiet("");
    let force = cmd.add(SwitchArg::new("force").short('f')).unwrap();
    let files = cmd.add(MultiPositionalArg::<String>::new("files")).unwrap();

    check(&mut cmd, "a -f -- -f --", expect![[r#"--force x1, <files> x3"#]]);
    assert!(cmd.get(force).is_set());
    assert_eq!(cmd.get(files).values(), ["a", "-f", "--"]);

    check(&mut cmd, "-5", expect![[r#"Unknown argument: `-5`. Use `--help` for more information"#]]);
    check(&mut cmd, "-- -5", expect![[r#"<files> x1"#]]);
}

#[test]
fn literal_tokens_need_a_positional() {
    let mut cmd = quiet("");
    cmd.add(SwitchArg::new("force")).unwrap();

    check(&mut cmd, "--", expect![[r#""#]]);
    check(
        &mut cmd,
        "-- --force",
        expect![[r#"Unknown argument: `--force`. Use `--help` for more information"#]],
    );
}

#[cfg(unix)]
#[test]
fn non_utf8() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    use cmdline::CmdLineInterface;

    let mut cmd = quiet("");
    cmd.add(MultiPositionalArg::<String>::new("files")).unwrap();

    let args = vec![OsString::from("ok"), OsString::from_vec(vec![254, 255])];
    let err = cmd.parse_vec(args, false).unwrap_err();
    assert_eq!(err.to_string(), "Can't parse `\\xFE\\xFF`, invalid utf8");
}
