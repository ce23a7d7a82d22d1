use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn kb_help_works() {
    Command::cargo_bin("kb")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("kanban"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["task", "auth", "settings", "board"];
    for subcommand in subcommands {
        Command::cargo_bin("kb")
            .expect("binary")
            .args([subcommand, "--help"])
            .assert()
            .success();
    }
}

#[test]
fn task_subcommand_help_works() {
    let subcommands = [
        "add",
        "list",
        "edit",
        "move",
        "rm",
        "clear",
        "tags",
        "assignees",
    ];
    for subcommand in subcommands {
        Command::cargo_bin("kb")
            .expect("binary")
            .args(["task", subcommand, "--help"])
            .assert()
            .success();
    }
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("kb")
        .expect("binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("kb"));
}
