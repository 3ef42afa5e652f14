#[path = "common/mod.rs"]
mod common;

use common::{translate, write_unit};
use tempfile::tempdir;

#[test]
fn user_gets_login_shell_and_wrapped_pre_commands() {
    let temp = tempdir().expect("failed to create tempdir");
    let dir = temp.path();
    let unit = write_unit(
        dir,
        "demo.service",
        "[Service]\nUser=alice\nExecStartPre=-/bin/false\n",
    );

    let script = translate(&unit, &dir.join("out.sh"));

    assert!(script.contains("chsh alice -s /bin/sh\n"));
    assert!(script.contains(
        "/bin/su alice <<'EOSUWRAPPEDCMD'\n/bin/false; (exit 0);\nEOSUWRAPPEDCMD\n"
    ));
    assert!(script.contains("command: -/bin/false"));
}

#[test]
fn user_owns_every_provisioned_directory() {
    let temp = tempdir().expect("failed to create tempdir");
    let dir = temp.path();
    let unit = write_unit(dir, "web.service", "[Service]\nUser=www\n");

    let script = translate(&unit, &dir.join("out.sh"));

    for path in ["/run/web", "/var/lib/web", "/var/cache/web", "/var/logs/web", "/etc/web"] {
        assert!(
            script.contains(&format!("chown www {path}\n")),
            "missing chown for {path}"
        );
    }
}

#[test]
fn exec_start_runs_through_su() {
    let temp = tempdir().expect("failed to create tempdir");
    let dir = temp.path();
    let unit = write_unit(
        dir,
        "demo.service",
        "[Service]\nUser=alice\nExecStartPre=/bin/mkdir -p /tmp/demo\nExecStart=+/usr/bin/demo --serve\n",
    );

    let script = translate(&unit, &dir.join("out.sh"));

    assert!(script.contains(
        "/bin/su alice <<'EOSUWRAPPEDCMD'\n/bin/mkdir -p /tmp/demo\nEOSUWRAPPEDCMD\n"
    ));
    assert!(script.contains(
        "/bin/su alice <<'EOSUWRAPPEDCMD'\n/usr/bin/demo --serve\nEOSUWRAPPEDCMD\n"
    ));
    assert_eq!(script.matches("/bin/su alice").count(), 2);
}

#[test]
fn login_shell_setup_follows_directories() {
    let temp = tempdir().expect("failed to create tempdir");
    let dir = temp.path();
    let unit = write_unit(
        dir,
        "demo.service",
        "[Service]\nUser=alice\nEnvironment=A=1\n",
    );

    let script = translate(&unit, &dir.join("out.sh"));
    let last_dir = script.find("chown alice /etc/demo").unwrap();
    let chsh = script.find("chsh alice").unwrap();
    let export = script.find("export A=1").unwrap();
    assert!(last_dir < chsh && chsh < export);
}

#[test]
fn hostile_user_value_is_quoted_everywhere() {
    let temp = tempdir().expect("failed to create tempdir");
    let dir = temp.path();
    let unit = write_unit(
        dir,
        "demo.service",
        "[Service]\nUser=alice; touch /tmp/owned\nExecStart=/bin/true\n",
    );

    let script = translate(&unit, &dir.join("out.sh"));

    assert!(script.contains("chown 'alice; touch /tmp/owned' /run/demo\n"));
    assert!(script.contains("chsh 'alice; touch /tmp/owned' -s /bin/sh\n"));
    assert!(script.contains("/bin/su 'alice; touch /tmp/owned' <<'EOSUWRAPPEDCMD'\n"));
    assert!(!script.contains("chown alice;"));
}
