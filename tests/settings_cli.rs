mod support;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

use support::TestStore;

fn kb_cmd(store: &TestStore) -> Command {
    let mut cmd = support::kb_cmd();
    cmd.current_dir(store.root());
    cmd.env("KB_DIR", store.store_dir());
    cmd
}

fn show(store: &TestStore) -> Value {
    let output = kb_cmd(store)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("settings show json")
}

#[test]
fn show_starts_from_defaults() {
    let store = TestStore::new();
    let value = show(&store);
    assert_eq!(value["data"]["autoSave"], true);
    assert_eq!(value["data"]["theme"], "system");
    assert_eq!(value["data"]["notifications"], true);
    assert_eq!(value["data"]["emailNotifications"], false);
}

#[test]
fn set_persists_changed_fields() {
    let store = TestStore::new();
    kb_cmd(&store)
        .args(["settings", "set", "--theme", "dark", "--auto-save", "false"])
        .assert()
        .success()
        .stdout(contains("Settings updated"));

    let doc = store.read_doc("userSettings");
    assert_eq!(doc["theme"], "dark");
    assert_eq!(doc["autoSave"], false);
    assert_eq!(doc["notifications"], true);

    let value = show(&store);
    assert_eq!(value["data"]["theme"], "dark");
    assert_eq!(value["data"]["autoSave"], false);
}

#[test]
fn set_without_flags_is_rejected() {
    let store = TestStore::new();
    kb_cmd(&store)
        .args(["settings", "set"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("nothing to change"));
}

#[test]
fn unknown_theme_is_rejected() {
    let store = TestStore::new();
    kb_cmd(&store)
        .args(["settings", "set", "--theme", "purple"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown theme 'purple'"));
}

#[test]
fn partial_documents_fill_in_defaults() {
    let store = TestStore::new();
    store.write_doc("userSettings", "{\"theme\":\"dark\"}");

    let value = show(&store);
    assert_eq!(value["data"]["theme"], "dark");
    assert_eq!(value["data"]["autoSave"], true);
    assert_eq!(value["data"]["emailNotifications"], false);
}
