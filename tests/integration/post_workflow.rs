use crate::common::{blogrig, TestWorkspace};
use predicates::prelude::*;

#[test]
fn new_post_lands_in_posts() {
    let ws = TestWorkspace::scaffold();

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .args(["post", "new", "My First Post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my-first-post.md"));

    let path = ws.dir.path().join("source/_posts/my-first-post.md");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("title: My First Post"));
}

#[test]
fn draft_roundtrip_publishes() {
    let ws = TestWorkspace::scaffold();

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .args(["post", "new", "Work in Progress", "--layout", "draft"])
        .assert()
        .success();
    assert!(ws
        .dir
        .path()
        .join("source/_drafts/work-in-progress.md")
        .is_file());

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .args(["post", "publish", "work-in-progress", "--layout", "post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published"));

    assert!(ws
        .dir
        .path()
        .join("source/_posts/work-in-progress.md")
        .is_file());
    assert!(!ws
        .dir
        .path()
        .join("source/_drafts/work-in-progress.md")
        .exists());
}

#[test]
fn unknown_layout_suggests_a_fix() {
    let ws = TestWorkspace::scaffold();

    blogrig()
        .args(["-f"])
        .arg(&ws.config_path)
        .args(["post", "new", "Hello", "--layout", "psot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean `post`?"));
}
