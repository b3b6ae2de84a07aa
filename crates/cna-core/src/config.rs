//! Scaffold configuration.
//!
//! Everything the pipeline needs to know about its external collaborators
//! lives in a single immutable [`ScaffoldConfig`], built once at startup.
//! The defaults reproduce the stock create-next-apollo-app behavior; an
//! optional TOML file can override any field.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{CnaError, CnaResult};

/// Packages added on top of the generated project.
pub const DEFAULT_DEPENDENCIES: &[&str] = &[
    "next",
    "next-with-apollo",
    "apollo-boost",
    "apollo-client",
    "react-apollo",
    "graphql",
    "graphql-tag",
    "styled-components",
    "prop-types",
];

/// Scripts written into `package.json`, in manifest order.
pub const DEFAULT_SCRIPTS: &[(&str, &str)] = &[
    ("dev", "next -p 7777"),
    ("build", "next build"),
    ("start", "next start"),
    ("test", "NODE_ENV=test jest --watch"),
    ("heroku-postbuild", "next build"),
];

/// An external program plus the fixed arguments that precede any
/// per-invocation arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Render the command the way a user would type it.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How the `scripts` section of `package.json` gets replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestRewrite {
    /// Read, patch and write the manifest in-process.
    #[default]
    Native,
    /// Shell out to the `json` npm tool (`json -I -f package.json -e ...`).
    JsonCli,
}

/// Ordered script-name to command mapping.
///
/// Order is significant only for presentation: it is the order the entries
/// appear in the rewritten manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMap {
    entries: Vec<(String, String)>,
}

impl ScriptMap {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace a script, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, command: impl Into<String>) {
        let name = name.into();
        let command = command.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = command,
            None => self.entries.push((name, command)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a JSON object, preserving entry order.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(n, c)| (n.clone(), serde_json::Value::String(c.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Default for ScriptMap {
    fn default() -> Self {
        let mut scripts = Self::new();
        for (name, command) in DEFAULT_SCRIPTS {
            scripts.insert(*name, *command);
        }
        scripts
    }
}

impl Serialize for ScriptMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, command) in &self.entries {
            map.serialize_entry(name, command)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScriptMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScriptMapVisitor;

        impl<'de> Visitor<'de> for ScriptMapVisitor {
            type Value = ScriptMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of script names to commands")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ScriptMap, A::Error> {
                let mut scripts = ScriptMap::new();
                while let Some((name, command)) = access.next_entry::<String, String>()? {
                    scripts.insert(name, command);
                }
                Ok(scripts)
            }
        }

        deserializer.deserialize_map(ScriptMapVisitor)
    }
}

/// Complete configuration for one scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Project generator; the project name is appended after the program
    /// and before `args`.
    pub generator: CommandSpec,
    /// Package manager install command; dependencies are appended.
    pub package_manager: CommandSpec,
    pub dependencies: Vec<String>,
    pub scripts: ScriptMap,
    pub manifest_rewrite: ManifestRewrite,
    /// Stop the pipeline on generator or installer failure.
    pub strict: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            generator: CommandSpec::new("create-react-app", &["--use-npm"]),
            package_manager: CommandSpec::new("npm", &["install", "--save"]),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
            scripts: ScriptMap::default(),
            manifest_rewrite: ManifestRewrite::default(),
            strict: false,
        }
    }
}

impl ScaffoldConfig {
    /// Parse a configuration from TOML text. Missing fields keep defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> CnaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CnaError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| CnaError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded scaffold configuration");
        Ok(config)
    }

    /// Reject configurations that cannot drive a run.
    pub fn validate(&self) -> CnaResult<()> {
        if self.generator.program.trim().is_empty() {
            return Err(CnaError::config("generator.program must not be empty"));
        }
        if self.package_manager.program.trim().is_empty() {
            return Err(CnaError::config("package_manager.program must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scripts_order_and_content() {
        let scripts = ScriptMap::default();
        let names: Vec<&str> = scripts.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["dev", "build", "start", "test", "heroku-postbuild"]);
        assert_eq!(scripts.get("dev"), Some("next -p 7777"));
        assert_eq!(scripts.get("test"), Some("NODE_ENV=test jest --watch"));
    }

    #[test]
    fn test_script_map_json_keeps_order() {
        let json = serde_json::to_string(&ScriptMap::default().to_json()).unwrap();
        assert!(json.starts_with(r#"{"dev":"next -p 7777","build":"next build""#));
        assert!(json.ends_with(r#""heroku-postbuild":"next build"}"#));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut scripts = ScriptMap::default();
        scripts.insert("build", "next build --profile");
        assert_eq!(scripts.len(), 5);
        assert_eq!(scripts.iter().nth(1), Some(("build", "next build --profile")));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ScaffoldConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScaffoldConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = ScaffoldConfig::from_toml_str(
            r#"
strict = true
manifest_rewrite = "json-cli"
dependencies = ["next"]

[package_manager]
program = "yarn"
args = ["add"]

[scripts]
dev = "next"
"#,
        )
        .unwrap();

        assert!(config.strict);
        assert_eq!(config.manifest_rewrite, ManifestRewrite::JsonCli);
        assert_eq!(config.dependencies, vec!["next".to_string()]);
        assert_eq!(config.package_manager.display(), "yarn add");
        assert_eq!(config.scripts.len(), 1);
        assert_eq!(config.generator, ScaffoldConfig::default().generator);
    }

    #[test]
    fn test_validate_rejects_empty_program() {
        let mut config = ScaffoldConfig::default();
        config.generator.program = " ".into();
        assert!(matches!(config.validate(), Err(CnaError::Config(_))));
    }

    #[test]
    fn test_load_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cna.toml");
        std::fs::write(&path, "strict = \"yes\"").unwrap();
        match ScaffoldConfig::load(&path) {
            Err(CnaError::ConfigParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
