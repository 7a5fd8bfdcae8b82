//! Integration tests for the tomcat-dev CLI surface.
//!
//! Tests exercise the public CLI via `assert_cmd`. Each test is
//! independent: filesystem side-effects are isolated with
//! `tempfile::TempDir` and `CATALINA_HOME` is set per-process via the
//! `env()` builder, never mutated globally.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tomcat_dev() -> Command {
    let mut cmd = Command::cargo_bin("tomcat-dev").expect("tomcat-dev binary should exist");
    cmd.env_remove("CATALINA_HOME").env_remove("TOMCAT_DEV_JAVA_OPTS");
    cmd
}

// ── Help and registration ─────────────────────────────────────────────────────

#[test]
fn no_args_shows_help_and_exits_two() {
    tomcat_dev()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lifecycle manager"));
}

#[test]
fn help_lists_the_three_lifecycle_commands() {
    tomcat_dev()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("restart"));
}

#[test]
fn invalid_compat_level_is_rejected_at_parse_time() {
    tomcat_dev()
        .args(["start", "--compat", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("compatibility level"));
}

// ── Fatal precondition ────────────────────────────────────────────────────────

#[test]
fn start_without_catalina_home_fails_fast() {
    let cwd = TempDir::new().expect("tempdir");
    tomcat_dev()
        .current_dir(cwd.path())
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CATALINA_HOME"));
}

#[test]
fn stop_without_catalina_home_fails_fast() {
    let cwd = TempDir::new().expect("tempdir");
    tomcat_dev()
        .current_dir(cwd.path())
        .arg("stop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CATALINA_HOME"));
}

#[test]
fn empty_catalina_home_counts_as_unset() {
    let cwd = TempDir::new().expect("tempdir");
    tomcat_dev()
        .current_dir(cwd.path())
        .env("CATALINA_HOME", "")
        .arg("stop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CATALINA_HOME"));
}

// ── End-to-end against a fake control script (unix) ───────────────────────────

#[cfg(unix)]
mod fake_container {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use super::*;

    /// A home installation whose control script records its invocation
    /// and exits with `code`.
    fn fake_home(code: i32) -> TempDir {
        let home = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(home.path().join("conf")).expect("mkdir");
        std::fs::write(home.path().join("conf").join("server.xml"), "<Server/>").expect("write");
        let bin = home.path().join("bin");
        std::fs::create_dir_all(&bin).expect("mkdir");
        let script = bin.join("catalina.sh");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\n\
                 home=$(dirname \"$0\")/..\n\
                 printf '%s\\n' \"$@\" > \"$home/invocation.txt\"\n\
                 printf '%s\\n%s\\n%s\\n' \"$CATALINA_BASE\" \"$CATALINA_PID\" \"$JAVA_OPTS\" \
                 > \"$home/env.txt\"\n\
                 exit {code}\n"
            ),
        )
        .expect("write script");
        let mut perms = std::fs::metadata(&script).expect("metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).expect("chmod");
        home
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).expect("read")
    }

    #[test]
    fn start_prepares_the_workspace_and_invokes_the_script() {
        let home = fake_home(0);
        let cwd = TempDir::new().expect("tempdir");

        tomcat_dev()
            .current_dir(cwd.path())
            .env("CATALINA_HOME", home.path())
            .args(["start", "--classpath", "lib/a.jar", "--java-opts", "-Xmx1g"])
            .assert()
            .success();

        let base = cwd.path().join(".tomcat");
        for dir in ["webapps", "logs", "temp", "work"] {
            assert!(base.join(dir).is_dir(), "{dir} should exist");
        }
        assert_eq!(read(&base.join("conf").join("server.xml")), "<Server/>");

        let descriptor = read(&base.join("conf/Catalina/localhost/ROOT.xml"));
        assert!(descriptor.contains("webAppMount=\"/WEB-INF/lib/a.jar\""));
        assert!(descriptor.contains("reloadable=\"false\""));

        assert_eq!(read(&home.path().join("invocation.txt")).trim(), "start");
        let env = read(&home.path().join("env.txt"));
        let mut lines = env.lines();
        assert_eq!(lines.next(), Some(base.to_str().expect("utf-8 path")));
        assert_eq!(lines.next(), Some(base.join("pid").to_str().expect("utf-8 path")));
        assert_eq!(lines.next(), Some("-Xmx1g"));
    }

    #[test]
    fn stop_does_not_touch_the_workspace() {
        let home = fake_home(0);
        let cwd = TempDir::new().expect("tempdir");

        tomcat_dev()
            .current_dir(cwd.path())
            .env("CATALINA_HOME", home.path())
            .arg("stop")
            .assert()
            .success();

        assert!(!cwd.path().join(".tomcat").exists(), "stop must not create the workspace");
        assert_eq!(read(&home.path().join("invocation.txt")).trim(), "stop");
    }

    #[test]
    fn failed_start_leaves_the_workspace_for_inspection() {
        let home = fake_home(1);
        let cwd = TempDir::new().expect("tempdir");

        tomcat_dev()
            .current_dir(cwd.path())
            .env("CATALINA_HOME", home.path())
            .arg("start")
            .assert()
            .failure()
            .stderr(predicate::str::contains("start"));

        assert!(
            cwd.path().join(".tomcat/conf/Catalina/localhost/ROOT.xml").is_file(),
            "the generated descriptor must stay in place after a failure"
        );
    }

    #[test]
    fn restart_ends_with_a_start_invocation() {
        let home = fake_home(0);
        let cwd = TempDir::new().expect("tempdir");

        tomcat_dev()
            .current_dir(cwd.path())
            .env("CATALINA_HOME", home.path())
            .arg("restart")
            .assert()
            .success();

        // The script truncates on each run; the last invocation wins.
        assert_eq!(read(&home.path().join("invocation.txt")).trim(), "start");
    }

    #[test]
    fn project_file_supplies_defaults() {
        let home = fake_home(0);
        let cwd = TempDir::new().expect("tempdir");
        std::fs::write(
            cwd.path().join("tomcat-dev.yaml"),
            "catalina_base: .server\ncompat: \"7\"\nclasspath:\n  - lib/a.jar\n",
        )
        .expect("write");

        tomcat_dev()
            .current_dir(cwd.path())
            .env("CATALINA_HOME", home.path())
            .arg("start")
            .assert()
            .success();

        let descriptor = read(&cwd.path().join(".server/conf/Catalina/localhost/ROOT.xml"));
        assert!(descriptor.contains("VirtualWebappLoader"), "compat 7 selects the legacy dialect");
    }
}
