use crate::common::{blogrig, TestWorkspace};
use predicates::prelude::*;

#[test]
fn scaffolded_workspace_validates() {
    let ws = TestWorkspace::scaffold();

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn privileged_port_is_rejected_with_a_diagnostic() {
    let ws = TestWorkspace::scaffold();
    ws.write_config("[site]\ntitle = \"t\"\n\n[preview]\nport = 80\n");

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("port_out_of_range"));
}

#[test]
fn unknown_default_layout_is_rejected() {
    let ws = TestWorkspace::scaffold();
    ws.write_config("[site]\ntitle = \"t\"\n\n[preview]\ndefault_layout = \"letter\"\n");

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown_layout"));
}
