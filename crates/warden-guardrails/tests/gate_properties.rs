//! Property tests for the policy gate.

use proptest::prelude::*;
use warden_guardrails::{ActionDescriptor, ActionKind, PolicyGate};

fn gate() -> PolicyGate {
    PolicyGate::with_builtin_rules().unwrap()
}

/// Whitespace runs the normalizer must collapse.
fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec![" ", "  ", "\t", " \t ", "\n", "   "]).prop_map(str::to_owned)
}

/// Harmless rm flags that may sit between the dangerous ones.
fn filler_flags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["-v", "-i", "--verbose", "--one-file-system", "-d"]),
        0..3,
    )
    .prop_map(|flags| flags.into_iter().map(str::to_owned).collect())
}

fn recursive_flag() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["-r", "-R", "--recursive"]).prop_map(str::to_owned)
}

fn force_flag() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["-f", "-F", "--force"]).prop_map(str::to_owned)
}

fn randomize_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn rm_recursive_force_any_order_is_blocked(
        prefix in filler_flags(),
        middle in filler_flags(),
        recursive in recursive_flag(),
        force in force_flag(),
        force_first in any::<bool>(),
        sep in separator(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let (first, second) = if force_first { (force, recursive) } else { (recursive, force) };
        let mut tokens = vec!["rm".to_string()];
        tokens.extend(prefix);
        tokens.push(first);
        tokens.extend(middle);
        tokens.push(second);
        tokens.push("target".to_string());
        let command = randomize_case(&tokens.join(&sep), &mask);

        let verdict = gate().evaluate(&ActionDescriptor::shell(&command));
        prop_assert!(verdict.is_blocked(), "not blocked: {command:?}");
    }

    #[test]
    fn rm_combined_flags_are_blocked(
        letters in prop::sample::subsequence(vec!['v', 'i', 'd'], 0..=3),
        force_first in any::<bool>(),
        upper in any::<bool>(),
    ) {
        let mut flag: String = letters.into_iter().collect();
        flag.push_str(if force_first { "fr" } else { "rf" });
        let command = format!("rm -{flag} /tmp/build");
        let command = if upper { command.to_uppercase() } else { command };

        prop_assert!(gate().evaluate(&ActionDescriptor::shell(&command)).is_blocked());
    }

    #[test]
    fn sudo_destructive_verbs_are_blocked(
        verb in prop::sample::select(vec!["rm", "chmod", "chown"]),
        sep in separator(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let command = randomize_case(&format!("sudo{sep}{verb}{sep}target"), &mask);
        prop_assert!(gate().evaluate(&ActionDescriptor::shell(&command)).is_blocked());
    }

    #[test]
    fn evaluation_is_idempotent(
        kind in prop::sample::select(ActionKind::all().to_vec()),
        text in ".{0,64}",
    ) {
        let gate = gate();
        let action = ActionDescriptor {
            kind,
            command: Some(text.clone()),
            path: Some(text),
        };
        prop_assert_eq!(gate.evaluate(&action), gate.evaluate(&action));
    }

    #[test]
    fn arbitrary_input_never_panics(
        kind in prop::sample::select(ActionKind::all().to_vec()),
        command in proptest::option::of(any::<String>()),
        path in proptest::option::of(any::<String>()),
    ) {
        let verdict = gate().evaluate(&ActionDescriptor { kind, command, path });
        prop_assert_eq!(verdict.allowed(), verdict.reason().is_empty());
    }

    #[test]
    fn blocked_verdicts_always_have_reason(path in "/(etc|var|usr|bin|sbin|boot)(/[a-z]{1,8}){0,3}") {
        let verdict = gate().evaluate(&ActionDescriptor::file(ActionKind::FileRead, &path));
        prop_assert!(verdict.is_blocked());
        prop_assert!(!verdict.reason().is_empty());
    }

    #[test]
    fn sibling_directories_are_not_blocked(
        dir in prop::sample::select(vec!["etc", "var", "usr", "bin", "sbin", "boot"]),
        suffix in "[a-z]{1,6}",
        file in "[a-z]{1,8}\\.txt",
    ) {
        let path = format!("/{dir}{suffix}/{file}");
        let verdict = gate().evaluate(&ActionDescriptor::file(ActionKind::FileWrite, &path));
        prop_assert!(verdict.allowed(), "blocked: {path}");
    }

    #[test]
    fn exemption_marker_always_overrides(
        fragment in prop::sample::select(vec![".env", "credentials", "secrets", "id_rsa"]),
        marker in prop::sample::select(vec![".sample", ".example", ".template"]),
        dir in "(/home/[a-z]{1,6})?",
    ) {
        let path = format!("{dir}/{fragment}{marker}");
        let verdict = gate().evaluate(&ActionDescriptor::file(ActionKind::FileEdit, &path));
        prop_assert!(verdict.allowed(), "blocked: {path}");
    }
}

#[test]
fn documented_examples() {
    let gate = gate();

    assert!(gate.evaluate(&ActionDescriptor::shell("ls -la")).allowed());

    for path in ["/etc", "/etc/passwd"] {
        assert!(gate.classify_path(path).is_some(), "{path}");
    }
    assert!(gate.classify_path("/etcetera/foo").is_none());
    assert!(gate.classify_path(".env").is_some());
    assert!(gate.classify_path(".env.sample").is_none());

    assert!(
        gate.evaluate(&ActionDescriptor::file(ActionKind::FileRead, "/root/.ssh/id_rsa"))
            .allowed()
    );
    assert!(
        gate.evaluate(&ActionDescriptor::file(ActionKind::FileWrite, "credentials.json"))
            .is_blocked()
    );
}
