use crate::common::{blogrig, free_port};
use predicates::prelude::*;
use std::net::TcpListener;

#[test]
fn free_port_reports_free() {
    let port = free_port();

    blogrig()
        .args(["check", &port.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("is free"));
}

#[test]
fn occupied_port_fails_the_check() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    blogrig()
        .args(["check", &port.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in use"));

    drop(listener);
}
