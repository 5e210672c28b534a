use crate::common::{blogrig, TestWorkspace};
use predicates::prelude::*;

#[test]
fn init_scaffolds_a_servable_workspace() {
    let ws = TestWorkspace::scaffold();
    let root = ws.dir.path();

    assert!(root.join("scaffolds/post.md").is_file());
    assert!(root.join("scaffolds/draft.md").is_file());
    assert!(root.join("scaffolds/page.md").is_file());
    assert!(root.join("source/_posts/hello-world.md").is_file());
    assert!(root.join("public/index.html").is_file());

    // The scaffolded title comes from the directory name, and no placeholders
    // survive into the written config.
    let config = std::fs::read_to_string(&ws.config_path).unwrap();
    assert!(!config.contains("{{"));
}

#[test]
fn init_refuses_an_existing_workspace() {
    let ws = TestWorkspace::scaffold();

    blogrig()
        .arg("init")
        .arg(ws.dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("blogrig.toml already exists"));
}
