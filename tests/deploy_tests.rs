//! Integration tests for payload deployment into a staged layout.

mod helpers;

use std::fs;

use helpers::{assert_dir_exists, assert_file_exists, assert_symlink_to, mode_of, TestEnv};

use apsetup::deploy;

#[test]
fn deploy_creates_the_full_layout() {
    let env = TestEnv::new();
    let config = env.config();

    deploy::deploy(&config, &env.layout).unwrap();

    assert_dir_exists(&env.layout.scripts_dir());
    assert_dir_exists(&env.layout.proc_dir());
    assert_file_exists(&env.layout.scripts_dir().join("ap_manager.sh"));
    assert_file_exists(&env.layout.scripts_dir().join("ap_manager_daemon.sh"));
    assert_file_exists(&env.layout.unit_file());
    assert_symlink_to(&env.layout.launcher_link(), &config.launcher_target);
    assert!(deploy::is_deployed(&env.layout));
}

#[test]
fn deployed_scripts_are_executable() {
    let env = TestEnv::new();
    let config = env.config();

    deploy::deploy(&config, &env.layout).unwrap();

    assert_eq!(mode_of(&env.layout.scripts_dir().join("ap_manager.sh")), 0o755);
}

#[test]
fn state_dir_is_world_writable() {
    let env = TestEnv::new();
    let config = env.config();

    deploy::deploy(&config, &env.layout).unwrap();

    assert_eq!(mode_of(&env.layout.state_dir()), 0o777);
}

#[test]
fn only_shell_scripts_are_deployed_from_scripts_dir() {
    let env = TestEnv::new();
    let config = env.config();
    fs::write(env.payload.join("scripts/README.md"), "docs\n").unwrap();

    deploy::deploy(&config, &env.layout).unwrap();

    assert!(!env.layout.scripts_dir().join("README.md").exists());
}

#[test]
fn manager_tree_is_copied_when_present() {
    let env = TestEnv::new();
    let config = env.config();
    let core = env.payload.join("manager/core");
    fs::create_dir_all(&core).unwrap();
    fs::write(core.join("signals.py"), "# handlers\n").unwrap();

    let copied = deploy::copy_payload(&config, &env.layout).unwrap();

    // Two scripts plus the manager file.
    assert_eq!(copied, 3);
    assert_file_exists(&env.layout.manager_dir().join("core/signals.py"));
}

#[test]
fn deploy_twice_is_idempotent() {
    let env = TestEnv::new();
    let config = env.config();

    deploy::deploy(&config, &env.layout).unwrap();
    deploy::deploy(&config, &env.layout).unwrap();

    assert_symlink_to(&env.layout.launcher_link(), &config.launcher_target);
}

#[test]
fn stale_launcher_symlink_is_replaced() {
    let env = TestEnv::new();
    let config = env.config();

    let link = env.layout.launcher_link();
    fs::create_dir_all(link.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink("/old/target", &link).unwrap();

    deploy::deploy(&config, &env.layout).unwrap();

    assert_symlink_to(&link, &config.launcher_target);
}

#[test]
fn unit_file_has_service_and_install_sections() {
    let env = TestEnv::new();
    let config = env.config();

    deploy::deploy(&config, &env.layout).unwrap();

    let unit = fs::read_to_string(env.layout.unit_file()).unwrap();
    assert!(unit.contains("[Unit]"));
    assert!(unit.contains("[Service]"));
    assert!(unit.contains("[Install]"));
    assert_eq!(mode_of(&env.layout.unit_file()), 0o644);
}
