//! Integration tests for powerbi-rs.

#![allow(clippy::expect_used)]

use powerbi_rs::error::{Error, ProcessError, Result};
use powerbi_rs::process::Invoker;
use powerbi_rs::{Options, PowerBi, ResourceSummary};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fake invoker replying per subcommand (first argument).
#[derive(Debug, Default)]
struct ScriptedInvoker {
    replies: HashMap<String, std::result::Result<String, i32>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedInvoker {
    fn new() -> Self {
        Self::default()
    }

    fn reply(mut self, subcommand: &str, output: &str) -> Self {
        self.replies
            .insert(subcommand.to_string(), Ok(output.to_string()));
        self
    }

    fn fail(mut self, subcommand: &str, code: i32) -> Self {
        self.replies.insert(subcommand.to_string(), Err(code));
        self
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl Invoker for ScriptedInvoker {
    fn invoke(&self, args: &[String]) -> Result<String> {
        self.calls.lock().expect("lock poisoned").push(args.to_vec());
        let key = args.first().cloned().unwrap_or_default();
        match self.replies.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(code)) => Err(ProcessError::Failed {
                program: "powerbi".to_string(),
                args: args.join(" "),
                code: Some(*code),
                stderr: "simulated failure".to_string(),
            }
            .into()),
            None => Ok(String::new()),
        }
    }
}

fn options() -> Options {
    Options::from([("-c", "acme"), ("-k", "secret"), ("-w", "ws-1")])
}

const REPORTS_OUTPUT: &str = "\
[ powerbi ] =====================================
[ powerbi ] Gettting reports
[ powerbi ] =====================================
[ powerbi ] ID: 42 | Name: Sales
[ powerbi ] ID: 43 | Name: Ops
";

const WORKSPACES_OUTPUT: &str = "\
[ powerbi ] =====================================
[ powerbi ] Gettting workspaces for Collection: acme
[ powerbi ] =====================================
[ powerbi ] ws-1
[ powerbi ] ws-2
";

#[test]
fn test_empty_options_is_config_error() {
    let invoker = ScriptedInvoker::new();
    let result = PowerBi::new(Options::new(), &invoker);
    assert!(matches!(result, Err(Error::Config { .. })));
    assert!(invoker.calls().is_empty());
}

#[test]
fn test_fragment_matches_input_order() {
    let invoker = ScriptedInvoker::new();
    let powerbi = PowerBi::new([("a", "1"), ("b", "2")], &invoker).expect("construct");
    assert_eq!(powerbi.fragment(), "a 1 b 2");
    assert_eq!(powerbi.format_input(&Options::new()), "");
}

#[test]
fn test_construction_config_failure_propagates() {
    let invoker = ScriptedInvoker::new().fail("config", 1);
    let result = PowerBi::new(options(), &invoker);
    assert!(matches!(
        result,
        Err(Error::Process(ProcessError::Failed { code: Some(1), .. }))
    ));
}

#[test]
fn test_reports_and_datasets() {
    let invoker = ScriptedInvoker::new()
        .reply("get-reports", REPORTS_OUTPUT)
        .reply("get-datasets", "[ powerbi ] ID: d1 |\n[ powerbi ] Name: Finance\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");

    assert_eq!(
        powerbi.reports().expect("reports"),
        vec![
            ResourceSummary::new("42", "Sales"),
            ResourceSummary::new("43", "Ops"),
        ]
    );
    assert_eq!(
        powerbi.datasets().expect("datasets"),
        vec![ResourceSummary::new("d1", "Finance")]
    );

    let calls = invoker.calls();
    assert_eq!(calls[1], vec!["get-reports", "-c", "acme", "-k", "secret", "-w", "ws-1"]);
    assert_eq!(calls[2], vec!["get-datasets", "-c", "acme", "-k", "secret", "-w", "ws-1"]);
}

#[test]
fn test_workspaces_keep_first_entry() {
    let invoker = ScriptedInvoker::new().reply("get-workspaces", WORKSPACES_OUTPUT);
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    assert_eq!(powerbi.workspaces().expect("workspaces"), vec!["ws-1", "ws-2"]);
    assert_eq!(invoker.calls()[1], vec!["get-workspaces"]);
}

#[test]
fn test_workspaces_legacy_listing() {
    let invoker = ScriptedInvoker::new().reply("get-workspaces", WORKSPACES_OUTPUT);
    let powerbi = PowerBi::new(options(), &invoker)
        .expect("construct")
        .workspace_listing(powerbi_rs::WorkspaceListing::Legacy);
    assert_eq!(powerbi.workspaces().expect("workspaces"), vec!["ws-2"]);
}

#[test]
fn test_create_workspace() {
    let invoker = ScriptedInvoker::new()
        .reply("create-workspace", "[ powerbi ] Workspace created: 6d2f-11\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    assert_eq!(powerbi.create_workspace().expect("create"), vec![" 6d2f-11"]);
}

#[test]
fn test_import_and_missing_id() {
    let invoker = ScriptedInvoker::new().reply("import", "[ powerbi ] Import ID: abc123\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    let result = powerbi
        .import(&Options::new(), "report.pbix", "Report", false)
        .expect("import");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "abc123");

    let invoker = ScriptedInvoker::new().reply("import", "[ powerbi ] Uploading...\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    let result = powerbi
        .import(&Options::new(), "report.pbix", "Report", false)
        .expect("import");
    assert!(result.is_empty());
}

#[test]
fn test_create_token() {
    let invoker = ScriptedInvoker::new().reply(
        "create-embed-token",
        "[ powerbi ] Embed Token: XYZ \n[ powerbi ] Expires: soon\n",
    );
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    let params = Options::from([("-r", "report-1")]);
    assert_eq!(powerbi.create_token(&params).expect("token"), "XYZ");
    assert_eq!(invoker.calls()[1], vec!["create-embed-token", "-r", "report-1"]);
}

#[test]
fn test_crlf_output_is_cleaned() {
    let invoker = ScriptedInvoker::new()
        .reply(
            "get-reports",
            "[ powerbi ] ID: 42 | Name: Sales\r\n[ powerbi ] ID: 43 | Name: Ops\r\n",
        )
        .reply("create-embed-token", "[ powerbi ] Embed Token: XYZ\r\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");

    assert_eq!(
        powerbi.reports().expect("reports"),
        vec![
            ResourceSummary::new("42", "Sales"),
            ResourceSummary::new("43", "Ops"),
        ]
    );
    assert_eq!(powerbi.create_token(&Options::new()).expect("token"), "XYZ");
}

#[test]
fn test_missing_token_is_empty() {
    let invoker = ScriptedInvoker::new().reply("create-embed-token", "[ powerbi ] nope\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    assert_eq!(powerbi.create_token(&Options::new()).expect("token"), "");
}

#[test]
fn test_version_trimmed_config_raw() {
    let invoker = ScriptedInvoker::new()
        .reply("-V", "\n1.0.4\n")
        .reply("config", "[ powerbi ] collection: acme\n");
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");
    assert_eq!(powerbi.version().expect("version"), "1.0.4");
    assert_eq!(powerbi.config().expect("config"), "[ powerbi ] collection: acme\n");
}

#[test]
fn test_failure_never_degrades_to_empty() {
    let invoker = ScriptedInvoker::new()
        .fail("get-reports", 2)
        .fail("create-embed-token", 1)
        .fail("import", 1);
    let powerbi = PowerBi::new(options(), &invoker).expect("construct");

    assert!(matches!(powerbi.reports(), Err(Error::Process(_))));
    assert!(matches!(
        powerbi.create_token(&Options::new()),
        Err(Error::Process(_))
    ));
    assert!(matches!(
        powerbi.import(&Options::new(), "a.pbix", "A", true),
        Err(Error::Process(_))
    ));
}

/// Tests running a real child process through a shell-script stand-in.
#[cfg(unix)]
mod system_invoker_tests {
    use powerbi_rs::error::{Error, ProcessError};
    use powerbi_rs::process::{Invoker, InvokerConfig, SystemInvoker};
    use powerbi_rs::{Options, PowerBi};
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    /// Writes an executable script standing in for the Power BI CLI.
    fn fake_cli(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("powerbi");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    fn config(temp: &TempDir, body: &str) -> InvokerConfig {
        InvokerConfig::default()
            .with_binary(fake_cli(temp.path(), body))
            .with_working_dir(temp.path())
            .with_timeout(Duration::from_secs(30))
    }

    #[test]
    fn test_args_arrive_as_discrete_tokens() {
        let temp = TempDir::new().expect("temp dir");
        let invoker = SystemInvoker::new(config(&temp, r#"for a in "$@"; do echo "[$a]"; done"#));
        let args = vec!["-n".to_string(), "Q1 report; echo pwned".to_string()];
        let output = invoker.invoke(&args).expect("invoke");
        assert_eq!(output, "[-n]\n[Q1 report; echo pwned]\n");
    }

    #[test]
    fn test_runs_in_working_dir() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(temp.path().join("marker.txt"), "here").expect("write marker");
        let invoker = SystemInvoker::new(config(&temp, "cat marker.txt"));
        assert_eq!(invoker.invoke(&[]).expect("invoke"), "here");
    }

    #[test]
    fn test_nonzero_exit_carries_status_and_stderr() {
        let temp = TempDir::new().expect("temp dir");
        let invoker = SystemInvoker::new(config(&temp, "echo 'bad access key' >&2; exit 3"));
        let err = invoker
            .invoke(&["get-reports".to_string()])
            .expect_err("exit 3 must fail");
        match err {
            Error::Process(ProcessError::Failed { code, stderr, args, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "bad access key");
                assert_eq!(args, "get-reports");
            }
            other => unreachable!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_child() {
        let temp = TempDir::new().expect("temp dir");
        let invoker = SystemInvoker::new(
            config(&temp, "exec sleep 5").with_timeout(Duration::from_millis(200)),
        );
        let err = invoker.invoke(&[]).expect_err("sleep must time out");
        assert!(matches!(err, Error::Process(ProcessError::Timeout { .. })));
    }

    #[test]
    fn test_timeout_with_grandchild_holding_pipes() {
        let temp = TempDir::new().expect("temp dir");
        let invoker = SystemInvoker::new(
            config(&temp, "sleep 4; echo late").with_timeout(Duration::from_millis(200)),
        );
        let started = Instant::now();
        let err = invoker.invoke(&[]).expect_err("sleep must time out");
        assert!(matches!(err, Error::Process(ProcessError::Timeout { .. })));
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "timeout took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_huge_timeout_means_no_deadline() {
        let temp = TempDir::new().expect("temp dir");
        let invoker = SystemInvoker::new(
            config(&temp, "echo ok").with_timeout(Duration::from_secs(u64::MAX)),
        );
        assert_eq!(invoker.invoke(&[]).expect("invoke"), "ok\n");
    }

    #[test]
    fn test_non_utf8_stdout_is_decoded_lossily() {
        let temp = TempDir::new().expect("temp dir");
        let body = r#"case "$1" in
  config) exit 0 ;;
  get-reports) printf '[ powerbi ] ID: 42 | Name: Caf\351\n' ;;
esac"#;
        let powerbi =
            PowerBi::with_config(Options::from([("-c", "acme")]), config(&temp, body))
                .expect("construct");
        let reports = powerbi.reports().expect("reports");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, "42");
        assert_eq!(reports[0].name, "Caf\u{FFFD}");
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let temp = TempDir::new().expect("temp dir");
        let config = InvokerConfig::default()
            .with_binary(temp.path().join("does-not-exist"))
            .with_working_dir(temp.path());
        let err = SystemInvoker::new(config)
            .invoke(&[])
            .expect_err("missing binary must fail");
        assert!(matches!(err, Error::Process(ProcessError::Spawn { .. })));
    }

    #[test]
    fn test_end_to_end_reports() {
        let temp = TempDir::new().expect("temp dir");
        let body = r#"case "$1" in
  config) exit 0 ;;
  get-reports) echo "[ powerbi ] ID: 42 | Name: Sales" ;;
  *) echo "unknown $1" >&2; exit 1 ;;
esac"#;
        let powerbi =
            PowerBi::with_config(Options::from([("-c", "acme")]), config(&temp, body))
                .expect("construct");
        let reports = powerbi.reports().expect("reports");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "Sales");
        assert!(matches!(powerbi.workspaces(), Err(Error::Process(_))));
    }
}

/// Binary front-end tests.
#[cfg(unix)]
mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_cli(temp: &TempDir) -> String {
        let path = temp.path().join("powerbi");
        let body = r#"#!/bin/sh
case "$1" in
  config) exit 0 ;;
  -V) echo " 1.0.4 " ;;
  get-reports) printf '[ powerbi ] ID: 42 | Name: Sales\n[ powerbi ] ID: 43 | Name: Ops\n' ;;
  create-embed-token) echo "[ powerbi ] Embed Token: tok-$3" ;;
  *) echo "unknown command $1" >&2; exit 4 ;;
esac
"#;
        std::fs::write(&path, body).expect("write script");
        let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod");
        path.display().to_string()
    }

    fn command(temp: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("powerbi-rs").expect("binary");
        cmd.env_remove("POWERBI_TIMEOUT_SECS")
            .arg("--binary")
            .arg(fake_cli(temp))
            .arg("--working-dir")
            .arg(temp.path())
            .arg("--set=-c=acme");
        cmd
    }

    #[test]
    fn test_version_text() {
        let temp = TempDir::new().expect("temp dir");
        command(&temp)
            .arg("version")
            .assert()
            .success()
            .stdout("1.0.4\n");
    }

    #[test]
    fn test_reports_json() {
        let temp = TempDir::new().expect("temp dir");
        let output = command(&temp)
            .args(["--format", "json", "reports"])
            .output()
            .expect("run");
        assert!(output.status.success());
        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("json output");
        assert_eq!(value[1]["id"], "43");
        assert_eq!(value[1]["name"], "Ops");
    }

    #[test]
    fn test_create_token_params() {
        let temp = TempDir::new().expect("temp dir");
        command(&temp)
            .args(["create-token", "--param=-r=r1"])
            .assert()
            .success()
            .stdout("tok-r1\n");
    }

    #[test]
    fn test_failure_exit_code_and_stderr() {
        let temp = TempDir::new().expect("temp dir");
        command(&temp)
            .arg("workspaces")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown command get-workspaces"));
    }

    #[test]
    fn test_missing_options_is_config_error() {
        let temp = TempDir::new().expect("temp dir");
        let mut cmd = Command::cargo_bin("powerbi-rs").expect("binary");
        cmd.arg("--binary")
            .arg(fake_cli(&temp))
            .arg("--working-dir")
            .arg(temp.path())
            .args(["--format", "json", "version"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"type\": \"configuration\""));
    }
}

mod property_tests {
    use powerbi_rs::response::{parse_import, parse_token};
    use powerbi_rs::{Options, format_input};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn format_joins_every_pair(pairs in prop::collection::vec(("[a-z-]{1,8}", "[A-Za-z0-9]{1,12}"), 0..8)) {
            let options: Options = pairs.iter().cloned().collect();
            let formatted = format_input(&options);
            let expected: Vec<String> = pairs.iter().map(|(k, v)| format!("{k} {v}")).collect();
            prop_assert_eq!(formatted, expected.join(" "));
        }

        #[test]
        fn to_args_has_two_tokens_per_pair(pairs in prop::collection::vec(("[a-z]{1,4}", ".{0,10}"), 0..6)) {
            let options: Options = pairs.iter().cloned().collect();
            prop_assert_eq!(options.to_args().len(), pairs.len() * 2);
        }

        #[test]
        fn token_is_recovered_trimmed(token in "[A-Za-z0-9._-]{1,40}") {
            let text = format!("[ powerbi ] Embed Token:  {token}  \n");
            prop_assert_eq!(parse_token(&text), token);
        }

        #[test]
        fn parsing_arbitrary_text_never_panics(text in "\\PC{0,200}") {
            let _ = parse_token(&text);
            let _ = parse_import(&text);
        }
    }
}
