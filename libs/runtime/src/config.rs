use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::home_dir::resolve_home_dir;

/// Main application configuration with strongly-typed global sections
/// and a flexible per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub home_dir: String, // will be normalized to absolute path
    pub host: String,
    pub port: u16,
    /// Per-request timeout; 0 disables it.
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/api.log", empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

pub const DEFAULT_PORT: u16 = 1337;

fn default_timeout_sec() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Empty => platform default: $HOME/.usergraph (APPDATA on Windows)
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            timeout_sec: default_timeout_sec(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/usergraph.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading:
    /// defaults → YAML file → `PORT` → `APP__*` environment variables.
    /// Also normalizes `server.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Optional sections stay None unless the YAML/ENV layers provide them.
        let base = AppConfig {
            server: ServerConfig::default(),
            logging: None,
            modules: HashMap::new(),
        };
        Self::extract(base, Some(path))
    }

    /// Load configuration from file or fall back to defaults (still honoring the environment).
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Self::extract(Self::default(), None),
        }
    }

    fn extract(base: AppConfig, file: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(base));
        if let Some(file) = file {
            figment = figment.merge(Yaml::file(file));
        }
        let figment = figment
            // PORT=8080 is the conventional process port knob
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            // Example: APP__SERVER__HOST=0.0.0.0 maps to server.host
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .context("Failed to extract config from figment")?;

        normalize_home_dir_inplace(&mut config.server)
            .context("Failed to resolve server.home_dir")?;

        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }

    /// Typed view of one entry of the `modules` bag.
    ///
    /// Missing entries yield `T::default()`; malformed ones are logged and
    /// also fall back to the default.
    pub fn module_config<T>(&self, module_name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.try_module_config(module_name).unwrap_or_else(|e| {
            tracing::warn!(
                module = module_name,
                error = %e,
                "Invalid module config, falling back to defaults"
            );
            T::default()
        })
    }

    /// Like [`AppConfig::module_config`], but a malformed entry is an error.
    pub fn try_module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_value(raw.clone())
                .with_context(|| format!("Invalid config for module '{module_name}'")),
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

const fn default_subdir() -> &'static str {
    ".usergraph"
}

/// Normalize `server.home_dir` using `resolve_home_dir` and store the absolute path back.
fn normalize_home_dir_inplace(server: &mut ServerConfig) -> Result<()> {
    // Treat empty string as "not provided" => None.
    let opt = if server.home_dir.trim().is_empty() {
        None
    } else {
        Some(server.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, default_subdir(), /*create*/ true)
        .context("home_dir normalization failed")?;

    server.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use serde::Deserialize;

    /// A normalized home_dir should be absolute and not start with '~'.
    fn is_normalized_path(p: &str) -> bool {
        let pb = PathBuf::from(p);
        pb.is_absolute() && !p.starts_with('~')
    }

    fn point_home_at_jail(jail: &mut Jail) {
        let dir = jail.directory().display().to_string();
        #[cfg(target_os = "windows")]
        jail.set_env("APPDATA", &dir);
        #[cfg(not(target_os = "windows"))]
        jail.set_env("HOME", &dir);
    }

    #[test]
    fn test_default_config_structure() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 1337);
        assert_eq!(config.server.home_dir, "");
        assert_eq!(config.server.timeout_sec, 30);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:1337");

        let logging = config.logging.as_ref().unwrap();
        let default_section = &logging["default"];
        assert_eq!(default_section.console_level, "info");
        assert_eq!(default_section.file, "logs/usergraph.log");

        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_load_layered_normalizes_home_dir() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.create_file(
                "cfg.yaml",
                r#"
server:
  home_dir: "~/.test_usergraph"
  host: "0.0.0.0"
  port: 9090
  timeout_sec: 5

logging:
  default:
    console_level: debug
    file: "logs/default.log"
"#,
            )?;

            let config = AppConfig::load_layered("cfg.yaml").map_err(|e| e.to_string())?;

            assert!(is_normalized_path(&config.server.home_dir));
            assert!(config.server.home_dir.ends_with(".test_usergraph"));
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.timeout_sec, 5);

            let logging = config.logging.as_ref().unwrap();
            assert_eq!(logging["default"].console_level, "debug");
            assert_eq!(logging["default"].file, "logs/default.log");
            Ok(())
        });
    }

    #[test]
    fn test_load_or_default_without_file() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);

            let config = AppConfig::load_or_default(None::<&str>).map_err(|e| e.to_string())?;

            assert!(is_normalized_path(&config.server.home_dir));
            assert!(config.server.home_dir.ends_with(default_subdir()));
            assert_eq!(config.server.port, DEFAULT_PORT);
            assert!(config.logging.is_some());
            Ok(())
        });
    }

    #[test]
    fn test_port_env_overrides_default_and_file() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.set_env("PORT", "4242");

            let config = AppConfig::load_or_default(None::<&str>).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 4242);

            jail.create_file(
                "cfg.yaml",
                r#"
server:
  home_dir: "home"
  host: "localhost"
  port: 8080
"#,
            )?;
            let config = AppConfig::load_layered("cfg.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 4242);
            assert_eq!(config.server.host, "localhost");
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_wins_over_port() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.set_env("PORT", "4242");
            jail.set_env("APP__SERVER__PORT", "5151");
            jail.set_env("APP__SERVER__HOST", "0.0.0.0");

            let config = AppConfig::load_or_default(None::<&str>).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 5151);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_port_env_is_an_error() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.set_env("PORT", "not-a-port");

            assert!(AppConfig::load_or_default(None::<&str>).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            let err = AppConfig::load_layered("nope.yaml").unwrap_err();
            assert!(err.to_string().contains("Config file not found"));
            Ok(())
        });
    }

    #[test]
    fn test_minimal_yaml_config() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.create_file(
                "cfg.yaml",
                r#"
server:
  home_dir: "~/.minimal"
  host: "localhost"
  port: 8080
"#,
            )?;

            let config = AppConfig::load_layered("cfg.yaml").map_err(|e| e.to_string())?;

            assert!(config.server.home_dir.ends_with(".minimal"));
            assert_eq!(config.server.timeout_sec, 30);
            assert!(config.logging.is_none());
            assert!(config.modules.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();

        let args = CliArgs {
            port: Some(3000),
            verbose: 2,
            ..Default::default()
        };

        config.apply_cli_overrides(&args);

        assert_eq!(config.server.port, 3000);
        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging["default"].console_level, "trace");
    }

    #[test]
    fn test_cli_verbose_levels_matrix() {
        for (verbose_level, expected_log_level) in
            [(0, "info"), (1, "debug"), (2, "trace"), (3, "trace")]
        {
            let mut config = AppConfig::default();
            let args = CliArgs {
                verbose: verbose_level,
                ..Default::default()
            };

            config.apply_cli_overrides(&args);

            let logging = config.logging.as_ref().unwrap();
            assert_eq!(logging["default"].console_level, expected_log_level);
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct DemoModuleConfig {
        #[serde(default)]
        enabled: bool,
        #[serde(default)]
        size: u32,
    }

    impl Default for DemoModuleConfig {
        fn default() -> Self {
            Self {
                enabled: true,
                size: 7,
            }
        }
    }

    #[test]
    fn test_module_config_lookup() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.module_config::<DemoModuleConfig>("demo"),
            DemoModuleConfig::default()
        );

        config.modules.insert(
            "demo".to_string(),
            serde_json::json!({ "enabled": false, "size": 3 }),
        );
        assert_eq!(
            config.module_config::<DemoModuleConfig>("demo"),
            DemoModuleConfig {
                enabled: false,
                size: 3
            }
        );

        config
            .modules
            .insert("demo".to_string(), serde_json::json!({ "bogus": 1 }));
        assert_eq!(
            config.module_config::<DemoModuleConfig>("demo"),
            DemoModuleConfig::default()
        );

        let err = config
            .try_module_config::<DemoModuleConfig>("demo")
            .unwrap_err();
        assert!(err.to_string().contains("demo"));
    }

    #[test]
    fn test_modules_section_from_yaml() {
        Jail::expect_with(|jail| {
            point_home_at_jail(jail);
            jail.create_file(
                "cfg.yaml",
                r#"
server:
  home_dir: "~/.modules_test"
  host: "127.0.0.1"
  port: 1337

modules:
  demo:
    enabled: false
    size: 11
"#,
            )?;

            let config = AppConfig::load_layered("cfg.yaml").map_err(|e| e.to_string())?;
            assert_eq!(
                config.module_config::<DemoModuleConfig>("demo"),
                DemoModuleConfig {
                    enabled: false,
                    size: 11
                }
            );
            Ok(())
        });
    }

    #[test]
    fn test_to_yaml_roundtrip_basic() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("logging:"));

        let roundtrip: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(roundtrip.server.port, config.server.port);
    }

    #[test]
    fn test_invalid_yaml_missing_required_field() {
        let invalid_yaml = r#"
server:
  home_dir: "~/.test"
  # Missing required host field
  port: 1337
"#;

        let result: Result<AppConfig, _> = serde_yaml::from_str(invalid_yaml);
        assert!(result.is_err());
    }
}
