use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "dockside.toml";

/// dockside.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocksideConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub container: ContainerConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Application name; binary, image and container names fall back to it
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Line printed after the timestamp
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory receiving the compiled binary, relative to the working directory
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Binary file name (defaults to the project name)
    pub binary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Image tag (defaults to the project name)
    pub tag: Option<String>,
    /// Build descriptor passed to `docker build -f`
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,
    /// Build context directory
    #[serde(default = "default_context")]
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Container name (defaults to the project name)
    pub name: Option<String>,
    #[serde(default = "default_port")]
    pub host_port: u16,
    #[serde(default = "default_port")]
    pub container_port: u16,
    /// Value of `docker run --restart`
    #[serde(default = "default_restart")]
    pub restart: String,
}

/// Programs resolved from `PATH` for the toolchain steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_go")]
    pub go: String,
    #[serde(default = "default_docker")]
    pub docker: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,
}

/// How child process output reaches the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Inherit stdout/stderr; the tools print directly to the terminal.
    #[default]
    Stream,
    /// Capture stdout/stderr; replay on success, attach to the error on failure.
    Capture,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            greeting: default_greeting(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            binary: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            tag: None,
            dockerfile: default_dockerfile(),
            context: default_context(),
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: None,
            host_port: default_port(),
            container_port: default_port(),
            restart: default_restart(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            go: default_go(),
            docker: default_docker(),
        }
    }
}

impl DocksideConfig {
    /// Load from dockside.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. Unlike [`DocksideConfig::load`], the file must exist.
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        let names = [
            ("project.name", Some(self.project.name.as_str())),
            ("build.output_dir", Some(self.build.output_dir.as_str())),
            ("build.binary", self.build.binary.as_deref()),
            ("image.tag", self.image.tag.as_deref()),
            ("image.dockerfile", Some(self.image.dockerfile.as_str())),
            ("image.context", Some(self.image.context.as_str())),
            ("container.name", self.container.name.as_deref()),
            ("container.restart", Some(self.container.restart.as_str())),
            ("tools.go", Some(self.tools.go.as_str())),
            ("tools.docker", Some(self.tools.docker.as_str())),
        ];
        for (field, value) in names {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(crate::Error::InvalidConfig {
                    field,
                    reason: "must not be empty",
                });
            }
        }
        if self.container.host_port == 0 {
            return Err(crate::Error::InvalidConfig {
                field: "container.host_port",
                reason: "must be between 1 and 65535",
            });
        }
        if self.container.container_port == 0 {
            return Err(crate::Error::InvalidConfig {
                field: "container.container_port",
                reason: "must be between 1 and 65535",
            });
        }
        Ok(())
    }

    pub fn binary_name(&self) -> &str {
        self.build.binary.as_deref().unwrap_or(&self.project.name)
    }

    pub fn image_tag(&self) -> &str {
        self.image.tag.as_deref().unwrap_or(&self.project.name)
    }

    pub fn container_name(&self) -> &str {
        self.container.name.as_deref().unwrap_or(&self.project.name)
    }

    /// `<output_dir>/<binary>`, the path handed to `go build -o`.
    pub fn binary_path(&self) -> String {
        let dir = self.build.output_dir.trim_end_matches('/');
        format!("{dir}/{binary}", binary = self.binary_name())
    }
}

fn default_project_name() -> String {
    "multiverse-authorization".to_owned()
}

fn default_greeting() -> String {
    "hello dockside".to_owned()
}

fn default_output_dir() -> String {
    "build".to_owned()
}

fn default_dockerfile() -> String {
    "Dockerfile".to_owned()
}

fn default_context() -> String {
    ".".to_owned()
}

fn default_port() -> u16 {
    8001
}

fn default_restart() -> String {
    "always".to_owned()
}

fn default_go() -> String {
    "go".to_owned()
}

fn default_docker() -> String {
    "docker".to_owned()
}
