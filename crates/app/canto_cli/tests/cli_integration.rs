//! Integration tests: run the `canto` binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_prints_package_version() {
    Command::cargo_bin("canto")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unreachable_relay_shows_error_reply() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    Command::cargo_bin("canto")
        .unwrap()
        .args(["chat", "--url", &format!("http://127.0.0.1:{port}")])
        .write_stdin("hola\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("you> hola"))
        .stdout(predicate::str::contains(
            "Something went wrong while connecting to the AI. Please try again.",
        ));
}

#[test]
fn invalid_url_fails() {
    Command::cargo_bin("canto")
        .unwrap()
        .args(["chat", "--url", "not a url"])
        .write_stdin("")
        .assert()
        .failure();
}
