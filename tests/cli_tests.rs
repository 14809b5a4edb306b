mod common;

use common::{run_reps, TestEnv};

#[test]
fn reps_help_shows_usage() {
    let output = run_reps(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(
        !stderr.contains("No config file found"),
        "--help should not log config fallback noise\nstderr:\n{}",
        stderr
    );
}

#[test]
fn reps_version_shows_version() {
    let output = run_reps(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("reps "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_reps(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("reps"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn completions_zsh_outputs_script() {
    let output = run_reps(&["completions", "zsh"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("reps"));
}

#[test]
fn config_path_prints_a_path() {
    let env = TestEnv::new();
    let path = env.config_path();
    assert!(path.to_string_lossy().ends_with("config.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let output = run_reps(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("base_url"));
    assert!(stdout.contains("localhost:8000"));
}

#[test]
fn config_init_writes_file_and_refuses_overwrite() {
    let env = TestEnv::new();

    let output = env.run(&["config", "init"]);
    assert!(
        output.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(env.config_path().exists());

    let output = env.run(&["config", "init"]);
    assert!(
        !output.status.success(),
        "second config init without --force should fail"
    );

    let output = env.run(&["config", "init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn config_set_persists_value() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "api.base_url", "https://fit.example.com/api"]);
    assert!(
        output.status.success(),
        "config set should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(env.config_path().exists());

    let output = env.run(&["config", "set", "session.sound_enabled", "false"]);
    assert!(output.status.success());

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("fit.example.com"));
    assert!(stdout.contains("sound_enabled = false"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "api.bogus", "x"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Unknown config key"),
        "expected a key error\nstderr:\n{}",
        stderr
    );
    assert!(!env.config_path().exists(), "a bad key must not write the file");
}

#[test]
fn help_lists_account_and_catalog_commands() {
    let output = run_reps(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["register", "profile", "exercises", "plan", "chat"] {
        assert!(
            stdout.contains(command),
            "expected `{}` in help output\nstdout:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn exercises_without_login_fails() {
    let output = run_reps(&["exercises"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Not logged in"),
        "expected auth guidance\nstderr:\n{}",
        stderr
    );
}

#[test]
fn chat_list_without_login_fails() {
    let output = run_reps(&["chat", "--list"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Not logged in"));
}

#[test]
fn history_on_fresh_environment_is_empty() {
    let output = run_reps(&["history"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "history should succeed without a database\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("No recorded sessions"));
}

#[test]
fn whoami_without_login_fails() {
    let output = run_reps(&["whoami"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Not logged in"),
        "expected auth guidance\nstderr:\n{}",
        stderr
    );
}

#[test]
fn config_respects_custom_base_url() {
    let env = TestEnv::new();
    env.write_config(
        r#"
[api]
base_url = "https://fit.example.com/api"
"#,
    );

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("fit.example.com"));
}
