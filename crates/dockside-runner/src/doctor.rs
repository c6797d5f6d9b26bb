use std::fmt;
use std::path::Path;

use dockside_core::{CommandLine, DocksideConfig};

use crate::executor::{CommandExecutor, RealExecutor};

/// Environment checks, parameterized over the executor for testability.
pub struct Doctor<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl Doctor<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for Doctor<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> Doctor<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Run all diagnostic checks without early return.
    /// Returns a report with pass/fail for each check item.
    pub async fn check(&self, config: &DocksideConfig, project_dir: &Path) -> DoctorReport {
        let mut report = DoctorReport::default();

        // 1. Go toolchain
        match self
            .executor
            .exec(&CommandLine::new(&config.tools.go, ["version"]))
            .await
        {
            Ok(out) => {
                // "go version go1.22.0 linux/amd64" -> "go1.22.0 linux/amd64"
                let line = out.stdout.lines().next().unwrap_or_default().trim();
                let version = line.strip_prefix("go version ").unwrap_or(line);
                report.go = CheckResult::ok(version);
            }
            Err(e) => report.go = CheckResult::fail(&e.to_string()),
        }

        // 2. Docker daemon reachable
        match self
            .executor
            .exec(&CommandLine::new(
                &config.tools.docker,
                ["version", "--format", "{{.Server.Version}}"],
            ))
            .await
        {
            Ok(out) if !out.stdout.trim().is_empty() => {
                report.docker = CheckResult::ok(out.stdout.trim());
            }
            Ok(_) => report.docker = CheckResult::fail("daemon did not report a version"),
            Err(e) => report.docker = CheckResult::fail(&e.to_string()),
        }

        // 3. Dependency manifest
        report.manifest = file_check(&project_dir.join("go.mod"));

        // 4. Build descriptor
        report.dockerfile = file_check(&project_dir.join(&config.image.dockerfile));

        report
    }
}

fn file_check(path: &Path) -> CheckResult {
    if path.is_file() {
        CheckResult::ok("Found")
    } else {
        CheckResult::fail(&format!("{} not found", path.display()))
    }
}

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub go: CheckResult,
    pub docker: CheckResult,
    pub manifest: CheckResult,
    pub dockerfile: CheckResult,
    /// Set by the caller; a missing config file is not a failure.
    pub config_file: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.go.passed
            && self.docker.passed
            && self.manifest.passed
            && self.dockerfile.passed
            && self.config_file.passed
    }

    fn rows(&self) -> [(&'static str, &CheckResult); 5] {
        [
            ("Go toolchain", &self.go),
            ("Docker", &self.docker),
            ("go.mod", &self.manifest),
            ("Dockerfile", &self.dockerfile),
            ("Config", &self.config_file),
        ]
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dockside doctor")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for (name, result) in self.rows() {
            writeln!(
                f,
                "{name:<14} {icon}  {detail}",
                icon = result.icon(),
                detail = result.detail
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
