#![allow(dead_code)]
use assert_cmd::Command;
use std::net::TcpListener;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestWorkspace {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl TestWorkspace {
    /// Scaffold a fresh workspace with `blogrig init`.
    pub fn scaffold() -> Self {
        let dir = TempDir::new().unwrap();
        blogrig()
            .arg("init")
            .arg(dir.path())
            .assert()
            .success();
        let config_path = dir.path().join("blogrig.toml");
        assert!(config_path.is_file());
        Self { dir, config_path }
    }

    /// Overwrite the workspace config.
    pub fn write_config(&self, config_toml: &str) {
        std::fs::write(&self.config_path, config_toml).unwrap();
    }
}

pub fn blogrig() -> Command {
    Command::cargo_bin("blogrig").unwrap()
}

pub fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
