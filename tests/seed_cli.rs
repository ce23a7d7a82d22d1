mod support;

use assert_cmd::Command;
use serde_json::Value;

use support::TestStore;

fn kb_cmd(store: &TestStore) -> Command {
    let mut cmd = support::kb_cmd();
    cmd.current_dir(store.root());
    cmd.env("KB_DIR", store.store_dir());
    cmd
}

fn list(store: &TestStore) -> Value {
    let output = kb_cmd(store)
        .args(["task", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("task list json")
}

fn ids(value: &Value) -> Vec<String> {
    value["data"]["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn first_command_persists_the_demo_board() {
    let store = TestStore::new();
    assert!(!store.has_doc("tasks"));

    list(&store);

    let doc = store.read_doc("tasks");
    let tasks = doc.as_array().expect("tasks document is an array");
    assert_eq!(tasks.len(), 9);
    for task in tasks {
        assert!(task["id"].as_str().is_some());
        assert!(task["title"].as_str().is_some());
        assert!(task["createdAt"].is_i64());
    }
}

#[test]
fn seeded_ids_are_stable_across_runs() {
    let store = TestStore::new();
    let first = ids(&list(&store));
    let second = ids(&list(&store));
    assert_eq!(first, second);
}

#[test]
fn corrupt_documents_do_not_retrigger_the_seed() {
    let store = TestStore::new();
    list(&store);
    store.write_doc("tasks", "{ not json");

    let value = list(&store);
    assert_eq!(value["data"]["total"], 0);

    kb_cmd(&store)
        .args(["task", "add", "Fresh start"])
        .assert()
        .success();
    let value = list(&store);
    assert_eq!(value["data"]["total"], 1);
}

#[test]
fn clearing_an_account_board_never_reseeds() {
    let store = TestStore::new();
    kb_cmd(&store)
        .args([
            "auth",
            "register",
            "--name",
            "Amy",
            "--email",
            "amy@example.com",
            "--password",
            "hunter2",
        ])
        .assert()
        .success();
    list(&store);

    kb_cmd(&store).args(["task", "clear"]).assert().success();
    assert_eq!(list(&store)["data"]["total"], 0);
    assert_eq!(list(&store)["data"]["total"], 0);
}
