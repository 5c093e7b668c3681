//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn version_checker() -> Command {
    let mut cmd = Command::new(cargo_bin("version-checker"));
    cmd.env_remove("VERSION_CHECKER_TIMEOUT");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Minimum-version checks"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn compare_passes_for_newer_version() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["compare", "1.0.27", "1.0.10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0.27 satisfies minimum 1.0.10"));
    Ok(())
}

#[test]
fn compare_fails_for_shorter_prefix() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["compare", "1.0", "1.0.10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lower than minimum version 1.0.10"));
    Ok(())
}

#[test]
fn compare_rejects_malformed_version() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["compare", "1.2", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid version format"));
    Ok(())
}

#[test]
fn extract_from_argument() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["extract", "version is v1.0"])
        .assert()
        .success()
        .stdout("1.0\n");
    Ok(())
}

#[test]
fn extract_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .arg("extract")
        .write_stdin("Packer v1.9.4\n\nYour version of Packer is out of date!\n")
        .assert()
        .success()
        .stdout("1.9.4\n");
    Ok(())
}

#[test]
fn extract_fails_without_version() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["extract", "version is vabc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to find version"));
    Ok(())
}

#[test]
fn check_without_checks_file_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    version_checker()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".version-checks.yml"));
    Ok(())
}

#[test]
fn check_rejects_invalid_minimum_before_running() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    version_checker()
        .current_dir(temp.path())
        .args(["check", "--binary", "docker", "--minimum", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid version format"));
    Ok(())
}

#[test]
fn check_rejects_unsupported_binary_in_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".version-checks.yml"),
        "checks:\n  - binary: podman\n    minimum_version: \"4.0\"\n",
    )?;
    version_checker()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported binary"))
        .stderr(predicate::str::contains("podman"));
    Ok(())
}

#[test]
fn check_rejects_malformed_checks_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("checks.yml");
    fs::write(&path, "checks: [unclosed")?;
    version_checker()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse checks file"));
    Ok(())
}

#[test]
fn check_with_unreadable_checks_file_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    version_checker()
        .arg("check")
        .arg("--config")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read checks file"));
    Ok(())
}

#[test]
fn extract_prints_version_when_quiet() -> Result<(), Box<dyn std::error::Error>> {
    version_checker()
        .args(["--quiet", "extract", "Terraform v1.5.7"])
        .assert()
        .success()
        .stdout("1.5.7\n");
    Ok(())
}

#[test]
fn check_with_empty_file_warns() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join(".version-checks.yml"), "checks: []\n")?;
    version_checker()
        .args(["check", "--project"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No checks defined"));
    Ok(())
}

#[cfg(unix)]
mod fake_binaries {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A temp dir with fake executables on a private PATH entry.
    struct FakeTools {
        temp: TempDir,
    }

    impl FakeTools {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir(temp.path().join("bin")).unwrap();
            Self { temp }
        }

        fn root(&self) -> &Path {
            self.temp.path()
        }

        fn bin_dir(&self) -> PathBuf {
            self.temp.path().join("bin")
        }

        fn install(&self, name: &str, output: &str) {
            let path = self.bin_dir().join(name);
            fs::write(&path, format!("#!/bin/sh\nprintf '%s\\n' '{}'\n", output)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        fn command(&self) -> Command {
            let system_path = std::env::var_os("PATH").unwrap_or_default();
            let mut dirs = vec![self.bin_dir()];
            dirs.extend(std::env::split_paths(&system_path));

            let mut cmd = version_checker();
            cmd.env("PATH", std::env::join_paths(dirs).unwrap());
            cmd.current_dir(self.root());
            cmd
        }
    }

    #[test]
    fn check_passes_for_new_enough_binary() {
        let tools = FakeTools::new();
        tools.install("terraform", "Terraform v1.5.7");

        tools
            .command()
            .args(["check", "--binary", "terraform", "--minimum", "1.5.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "terraform 1.5.7 satisfies minimum 1.5.0",
            ));
    }

    #[test]
    fn check_fails_for_old_binary() {
        let tools = FakeTools::new();
        tools.install("docker", "Docker version 1.2.2, build abc");

        tools
            .command()
            .args(["check", "-b", "docker", "-m", "1.2.3"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "actual version 1.2.2 is lower than minimum version 1.2.3",
            ));
    }

    #[test]
    fn check_runs_every_entry_in_file() {
        let tools = FakeTools::new();
        tools.install("terraform", "Terraform v1.5.7");
        tools.install("packer", "Packer v1.9.4");
        fs::write(
            tools.root().join(".version-checks.yml"),
            r#"
checks:
  - binary: terraform
    minimum_version: "1.5"
  - binary: packer
    minimum_version: "1.10.0"
"#,
        )
        .unwrap();

        tools
            .command()
            .arg("check")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("terraform 1.5.7 satisfies minimum 1.5"))
            .stderr(predicate::str::contains("packer: found version mismatch"));
    }

    #[test]
    fn check_json_reports_each_binary() {
        let tools = FakeTools::new();
        tools.install("packer", "Packer v1.9.4");

        let output = tools
            .command()
            .args(["check", "-b", "packer", "-m", "1.9", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(reports[0]["binary"], "packer");
        assert_eq!(reports[0]["actual_version"], "1.9.4");
        assert_eq!(reports[0]["passed"], true);
    }

    #[test]
    fn check_reports_output_without_version() {
        let tools = FakeTools::new();
        tools.install("docker", "Docker version unknown");

        tools
            .command()
            .args(["check", "-b", "docker", "-m", "20.10"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to extract version"))
            .stderr(predicate::str::contains("Docker version unknown"));
    }

    #[test]
    fn check_kills_hanging_binary() {
        let tools = FakeTools::new();
        let path = tools.bin_dir().join("terraform");
        fs::write(&path, "#!/bin/sh\nexec sleep 10\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        tools
            .command()
            .args(["check", "-b", "terraform", "-m", "1.0", "--timeout", "1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("timed out"));
    }

    #[test]
    fn check_timeout_covers_background_children() {
        let tools = FakeTools::new();
        let path = tools.bin_dir().join("packer");
        fs::write(&path, "#!/bin/sh\necho 'Packer v1.9.4'\nsleep 10 &\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let start = std::time::Instant::now();
        tools
            .command()
            .args(["check", "-b", "packer", "-m", "1.9", "--timeout", "1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("timed out"));
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn check_resolves_relative_dir_against_project() {
        let tools = FakeTools::new();
        let path = tools.bin_dir().join("terraform");
        fs::write(&path, "#!/bin/sh\ntest -f marker && echo 'Terraform v1.5.7'\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let project = tools.root().join("project");
        fs::create_dir_all(project.join("infra")).unwrap();
        fs::write(project.join("infra").join("marker"), "").unwrap();

        tools
            .command()
            .arg("--project")
            .arg(&project)
            .args(["check", "-b", "terraform", "-m", "1.5", "--dir", "infra"])
            .assert()
            .success()
            .stdout(predicate::str::contains("terraform 1.5.7 satisfies"));
    }

    #[test]
    fn quiet_json_still_prints_report() {
        let tools = FakeTools::new();
        tools.install("docker", "Docker version 24.0.7, build afdd53b");

        tools
            .command()
            .args(["--quiet", "check", "-b", "docker", "-m", "20.10", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"passed\": true"));
    }
}
