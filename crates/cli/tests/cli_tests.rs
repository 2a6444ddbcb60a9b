use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hbnb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hbnb").unwrap();
    cmd.env("HBNB_TYPE_STORAGE", "file")
        .env("HBNB_FILE_PATH", dir.path().join("file.json"))
        .env("RUST_LOG", "warn");
    cmd
}

fn create(dir: &TempDir, args: &[&str]) -> String {
    let output = hbnb(dir).arg("create").args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_owned()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("hbnb").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("HBNB property-rental catalog"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("hbnb").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_create_then_show() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, &["State", "name=\"New_York\""]);
    assert_eq!(id.len(), 36);

    hbnb(&dir)
        .args(["show", "State", &id])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("[State] ({id})")))
        .stdout(predicate::str::contains("\"name\":\"New York\""));
}

#[test]
fn test_count_and_all() {
    let dir = TempDir::new().unwrap();
    create(&dir, &["State", "name=\"Texas\""]);
    create(&dir, &["Amenity", "name=\"Wifi\""]);
    create(&dir, &["Amenity", "name=\"Pool\""]);

    hbnb(&dir).arg("count").assert().success().stdout("3\n");
    hbnb(&dir).args(["count", "Amenity"]).assert().success().stdout("2\n");
    hbnb(&dir)
        .args(["all", "State"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[State]").and(predicate::str::contains("[Amenity]").not()));
}

#[test]
fn test_update_then_destroy() {
    let dir = TempDir::new().unwrap();
    let id = create(&dir, &["Place", "name=\"Loft\"", "max_guest=2", "latitude=37.77"]);

    hbnb(&dir).args(["update", "Place", &id, "max_guest", "6"]).assert().success();
    hbnb(&dir)
        .args(["show", "Place", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_guest\":6"))
        .stdout(predicate::str::contains("\"latitude\":37.77"));

    hbnb(&dir).args(["destroy", "Place", &id]).assert().success().stdout("");
    hbnb(&dir)
        .args(["show", "Place", &id])
        .assert()
        .success()
        .stdout("** no instance found **\n");
}

#[test]
fn test_console_error_messages() {
    let dir = TempDir::new().unwrap();
    hbnb(&dir).arg("create").assert().success().stdout("** class name missing **\n");
    hbnb(&dir).args(["create", "Planet"]).assert().success().stdout("** class doesn't exist **\n");
    hbnb(&dir).args(["show", "State"]).assert().success().stdout("** instance id missing **\n");
    hbnb(&dir).args(["destroy", "State", "ghost"]).assert().success().stdout("** no instance found **\n");
    hbnb(&dir).args(["count", "Planet"]).assert().success().stdout("** class doesn't exist **\n");

    let id = create(&dir, &["User", "email=\"a@b.c\""]);
    hbnb(&dir).args(["update", "User", &id]).assert().success().stdout("** attribute name missing **\n");
    hbnb(&dir)
        .args(["update", "User", &id, "first_name"])
        .assert()
        .success()
        .stdout("** value missing **\n");
}

#[test]
fn test_update_changes_foreign_keys_and_email() {
    let dir = TempDir::new().unwrap();
    let user = create(&dir, &["User", "email=\"old@hbnb.io\""]);
    let city = create(&dir, &["City", "name=\"Reno\"", "state_id=\"s-1\""]);

    hbnb(&dir).args(["update", "User", &user, "email", "new@hbnb.io"]).assert().success().stdout("");
    hbnb(&dir).args(["update", "City", &city, "state_id", "s-2"]).assert().success().stdout("");
    hbnb(&dir).args(["update", "City", &city, "id", "hijack"]).assert().success();

    hbnb(&dir)
        .args(["show", "User", &user])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"email\":\"new@hbnb.io\""));
    hbnb(&dir)
        .args(["show", "City", &city])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state_id\":\"s-2\""))
        .stdout(predicate::str::contains(format!("\"id\":\"{city}\"")));
}
