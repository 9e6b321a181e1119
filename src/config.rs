use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use crate::exec;

pub const DEFAULT_NODE_VERSION: &str = "lts";

#[derive(Debug, Clone)]
pub struct SrvkitConfig {
    pub base: BaseConfig,
    pub nodejs: NodejsConfig,
}

impl Default for SrvkitConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            nodejs: NodejsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BaseConfig {
    pub extra_packages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NodejsConfig {
    pub version: String,
}

impl Default for NodejsConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_NODE_VERSION.to_string(),
        }
    }
}

pub fn load_or_init() -> anyhow::Result<SrvkitConfig> {
    let home = exec::home_dir()?;
    load_or_init_for_home(&home)
}

pub fn load_or_init_for_home(home: &Path) -> anyhow::Result<SrvkitConfig> {
    let path = config_path_for_home(home);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    if !path.exists() {
        let default_cfg = SrvkitConfig::default();
        fs::write(&path, serialize_config(&default_cfg))
            .with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(default_cfg);
    }

    let raw =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let (config, missing_keys) = parse_config(&raw)?;

    if missing_keys.any_missing() {
        fs::write(&path, serialize_config(&config))
            .with_context(|| format!("failed to update {}", path.display()))?;
    }

    if config.nodejs.version.trim().is_empty() {
        bail!("`nodejs.version` must not be empty");
    }

    Ok(config)
}

pub fn config_path_for_home(home: &Path) -> PathBuf {
    home.join(".config").join("srvkit").join("config.toml")
}

#[derive(Debug, Clone, Copy)]
struct MissingKeys {
    base_extra_packages: bool,
    nodejs_version: bool,
}

impl MissingKeys {
    fn any_missing(self) -> bool {
        self.base_extra_packages || self.nodejs_version
    }
}

fn parse_config(raw: &str) -> anyhow::Result<(SrvkitConfig, MissingKeys)> {
    let mut config = SrvkitConfig::default();
    let mut section = String::new();

    let mut seen_extra_packages = false;
    let mut seen_node_version = false;

    for (idx, line) in raw.lines().enumerate() {
        let stripped = strip_comment(line);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].trim().to_string();
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            bail!("invalid config line {}: expected `key = value`", idx + 1);
        };

        let key = key.trim();
        let value = value.trim();

        match (section.as_str(), key) {
            ("base", "extra_packages") => {
                config.base.extra_packages = parse_string_array(value).with_context(|| {
                    format!("invalid array at line {} for base.extra_packages", idx + 1)
                })?;
                seen_extra_packages = true;
            }
            ("nodejs", "version") => {
                config.nodejs.version = parse_string_value(value).with_context(|| {
                    format!("invalid string at line {} for nodejs.version", idx + 1)
                })?;
                seen_node_version = true;
            }
            _ => {}
        }
    }

    let missing = MissingKeys {
        base_extra_packages: !seen_extra_packages,
        nodejs_version: !seen_node_version,
    };

    Ok((config, missing))
}

fn parse_string_value(value: &str) -> anyhow::Result<String> {
    let value = value.trim();
    if value.starts_with('"') {
        if !value.ends_with('"') || value.len() < 2 {
            bail!("missing closing quote");
        }
        Ok(unescape_basic(&value[1..value.len() - 1]))
    } else {
        Ok(value.to_string())
    }
}

fn parse_string_array(value: &str) -> anyhow::Result<Vec<String>> {
    let value = value.trim();
    if !value.starts_with('[') || !value.ends_with(']') {
        bail!("array must use [..] format");
    }

    let inner = value[1..value.len() - 1].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for part in inner.split(',') {
        items.push(parse_string_value(part.trim())?);
    }
    Ok(items)
}

fn strip_comment(line: &str) -> String {
    let mut out = String::new();
    let mut in_string = false;
    let chars = line.chars();

    for c in chars {
        if c == '"' {
            in_string = !in_string;
            out.push(c);
            continue;
        }

        if c == '#' && !in_string {
            break;
        }

        out.push(c);
    }

    out
}

fn serialize_config(config: &SrvkitConfig) -> String {
    format!(
        "[base]\nextra_packages = {}\n\n[nodejs]\nversion = \"{}\"\n",
        serialize_array(&config.base.extra_packages),
        escape_basic(&config.nodejs.version)
    )
}

fn serialize_array(items: &[String]) -> String {
    let quoted = items
        .iter()
        .map(|item| format!("\"{}\"", escape_basic(item)))
        .collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}

fn escape_basic(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape_basic(raw: &str) -> String {
    raw.replace("\\\"", "\"").replace("\\\\", "\\")
}
