use cmdline::{
    Arg, CmdLineInterface, CommandLine, MultiSwitchArg, ParseError, SpecificationError, SwitchArg,
    ValueArg,
};
use expect_test::expect;

use crate::{check, quiet};

#[test]
fn json_or_xml() {
    let mut cmd = quiet("");
    let (json, xml) = cmd.xor_add(SwitchArg::new("json"), SwitchArg::new("xml")).unwrap();

    check(&mut cmd, "--json", expect![[r#"--json x1"#]]);
    assert!(cmd.get(json).is_set());
    assert!(!cmd.get(xml).is_set());

    check(&mut cmd, "--json --xml", expect![[r#"`--xml` can't be used together with `--json`"#]]);
    check(&mut cmd, "--xml --json", expect![[r#"`--json` can't be used together with `--xml`"#]]);
    check(&mut cmd, "", expect![[r#""#]]);

    let err = cmd.parse(["--json", "--xml"], false).unwrap_err();
    assert_eq!(
        err,
        ParseError::ExclusivityViolation { arg: "--xml".to_string(), other: "--json".to_string() }
    );
    assert_eq!(err.arg(), Some("--xml"));
}

#[test]
fn required_group() {
    let mut cmd = quiet("");
    cmd.xor_add(SwitchArg::new("json").required(), SwitchArg::new("xml")).unwrap();

    check(&mut cmd, "", expect![[r#"One of `--json`, `--xml` is required"#]]);
    check(&mut cmd, "--xml", expect![[r#"--xml x1"#]]);
    check(&mut cmd, "--json", expect![[r#"--json x1"#]]);

    let err = cmd.parse(Vec::<String>::new(), false).unwrap_err();
    assert!(matches!(err, ParseError::MissingExclusiveChoice { .. }));
}

#[test]
fn required_args_are_checked_before_groups() {
    let mut cmd = quiet("");
    cmd.add(ValueArg::<String>::new("out").required()).unwrap();
    cmd.xor_add(SwitchArg::new("json").required(), SwitchArg::new("xml").required()).unwrap();

    check(&mut cmd, "", expect![[r#"Required argument missing: `--out`"#]]);
    check(&mut cmd, "--out x", expect![[r#"One of `--json`, `--xml` is required"#]]);
    check(&mut cmd, "--out x --xml", expect![[r#"--out x1, --xml x1"#]]);
}

#[test]
fn exclusivity_does_not_leak_between_parses() {
    let mut cmd = quiet("");
    let (a, b) = cmd.xor_add(SwitchArg::new("a"), SwitchArg::new("b")).unwrap();

    check(&mut cmd, "--a", expect![[r#"--a x1"#]]);
    check(&mut cmd, "--b", expect![[r#"--b x1"#]]);
    assert!(!cmd.get(a).is_set());
    assert!(cmd.get(b).is_set());

    let group = cmd.xor_handler().groups().next().unwrap();
    assert_eq!(group.matched(), Some(b.id()));
}

#[test]
fn larger_groups() {
    let mut cmd = quiet("");
    let modes = cmd
        .xor_add_all(vec![SwitchArg::new("fast"), SwitchArg::new("safe"), SwitchArg::new("slow")])
        .unwrap();
    assert_eq!(modes.len(), 3);

    check(&mut cmd, "--safe", expect![[r#"--safe x1"#]]);
    check(&mut cmd, "--fast --slow", expect![[r#"`--slow` can't be used together with `--fast`"#]]);

    let groups = cmd.xor_handler().groups().collect::<Vec<_>>();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members(), modes.iter().map(|it| it.id()).collect::<Vec<_>>());
    for mode in modes {
        assert_eq!(cmd.get(mode).spec().xor_group(), Some(0));
    }
}

#[test]
fn repeating_the_same_member_is_not_a_conflict() {
    let mut cmd = quiet("");
    let (verbose, _) =
        cmd.xor_add(MultiSwitchArg::new("verbose").short('v'), SwitchArg::new("quiet")).unwrap();

    check(&mut cmd, "-v -v --verbose", expect![[r#"--verbose x3"#]]);
    assert_eq!(cmd.get(verbose).count(), 3);
    check(&mut cmd, "-v --quiet", expect![[r#"`--quiet` can't be used together with `--verbose`"#]]);
}

#[test]
fn value_args_in_groups() {
    let mut cmd = quiet("");
    let (file, stdin) =
        cmd.xor_add(ValueArg::<String>::new("file"), SwitchArg::new("stdin")).unwrap();

    check(&mut cmd, "--file a.txt", expect![[r#"--file x1"#]]);
    assert_eq!(cmd.get(file).value().map(String::as_str), Some("a.txt"));
    check(&mut cmd, "--stdin", expect![[r#"--stdin x1"#]]);
    assert!(cmd.get(stdin).is_set());
    check(&mut cmd, "--file a --stdin", expect![[r#"`--stdin` can't be used together with `--file`"#]]);
}

#[test]
fn malformed_groups() {
    let mut cmd = quiet("");
    assert_eq!(
        cmd.xor_add_all(vec![SwitchArg::new("only")]).unwrap_err(),
        SpecificationError::GroupTooSmall { count: 1 }
    );
    assert_eq!(
        cmd.xor_add_all(Vec::<SwitchArg>::new()).unwrap_err(),
        SpecificationError::GroupTooSmall { count: 0 }
    );
    assert_eq!(
        cmd.xor_add(SwitchArg::new("x"), SwitchArg::new("x")).unwrap_err(),
        SpecificationError::DuplicateArg { name: "--x".to_string() }
    );

    cmd.add(SwitchArg::new("taken")).unwrap();
    assert_eq!(
        cmd.xor_add(SwitchArg::new("free"), SwitchArg::new("taken")).unwrap_err(),
        SpecificationError::DuplicateArg { name: "--taken".to_string() }
    );

    // Nothing from the failed calls was registered.
    assert_eq!(cmd.arg_list().len(), 3);
    assert!(cmd.arg_list().find("--free").is_none());
    assert!(cmd.xor_handler().is_empty());
}

#[test]
fn grouping_registered_args() {
    let mut cmd = quiet("");
    let a = cmd.add(SwitchArg::new("a")).unwrap().id();
    let b = cmd.add(SwitchArg::new("b")).unwrap().id();
    let c = cmd.add(SwitchArg::new("c")).unwrap().id();
    let d = cmd.add(SwitchArg::new("d")).unwrap().id();
    let e = cmd.add(SwitchArg::new("e")).unwrap().id();

    assert_eq!(cmd.xor(&[a, b]), Ok(0));
    assert_eq!(cmd.xor(&[c, d]), Ok(1));
    assert_eq!(cmd.xor(&[b, e]), Ok(0));
    assert_eq!(cmd.xor(&[a, c]), Err(SpecificationError::AlreadyGrouped { name: "--c".to_string() }));
    assert_eq!(cmd.xor(&[a]), Err(SpecificationError::GroupTooSmall { count: 1 }));
    assert_eq!(cmd.xor(&[a, a]), Err(SpecificationError::GroupTooSmall { count: 1 }));

    assert_eq!(cmd.xor_handler().contains(e), Some(0));
    assert_eq!(cmd.xor_handler().get(0).map(|it| it.members().to_vec()), Some(vec![a, b, e]));

    check(&mut cmd, "--a --d", expect![[r#"--a x1, --d x1"#]]);
    check(&mut cmd, "--a --e", expect![[r#"`--e` can't be used together with `--a`"#]]);

    let mut other = CommandLine::new("");
    for name in ["p", "q", "r", "s", "t", "u", "v", "w"] {
        other.add(SwitchArg::new(name)).unwrap();
    }
    let far = other.arg_list().find("--w").unwrap();
    assert_eq!(cmd.xor(&[a, far]), Err(SpecificationError::UnknownArg { index: 9 }));
}
