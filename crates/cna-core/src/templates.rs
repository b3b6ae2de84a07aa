//! Template set and destination classification.
//!
//! Templates are embedded at compile time from `templates/` and written
//! into the generated project by [`crate::writer`]. Where a template lands
//! depends only on its file name, decided by [`classify`].

use std::path::{Path, PathBuf};

/// A single template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Logical file name, also the name written to disk.
    pub name: String,
    pub content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn destination(&self) -> Destination {
        classify(&self.name)
    }
}

/// Built-in templates, keyed by logical file name.
static BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("_app.js", include_str!("../templates/pages/_app.js")),
    ("_document.js", include_str!("../templates/pages/_document.js")),
    ("index.js", include_str!("../templates/pages/index.js")),
    ("withData.js", include_str!("../templates/lib/withData.js")),
    ("config.js", include_str!("../templates/config.js")),
    ("Page.js", include_str!("../templates/components/Page.js")),
    ("Meta.js", include_str!("../templates/components/Meta.js")),
    ("Inner.js", include_str!("../templates/components/Inner.js")),
];

/// Ordered collection of templates for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The Next.js + Apollo starter files shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_TEMPLATES
                .iter()
                .map(|(name, content)| Template::new(*name, *content))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Where a template is written, relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Pages,
    Components,
    Root,
    Lib,
}

impl Destination {
    /// Directories the writer creates before writing any file.
    pub const CREATED_DIRS: [Destination; 3] =
        [Destination::Pages, Destination::Components, Destination::Lib];

    /// Subdirectory name, `None` for the project root.
    pub fn dir_name(self) -> Option<&'static str> {
        match self {
            Destination::Pages => Some("pages"),
            Destination::Components => Some("components"),
            Destination::Lib => Some("lib"),
            Destination::Root => None,
        }
    }

    /// Absolute directory for this destination under `project_dir`.
    pub fn dir(self, project_dir: &Path) -> PathBuf {
        match self.dir_name() {
            Some(name) => project_dir.join(name),
            None => project_dir.to_path_buf(),
        }
    }
}

struct Rule {
    matches: fn(&str) -> bool,
    destination: Destination,
}

/// First match wins.
const RULES: &[Rule] = &[
    Rule {
        matches: |name| name.starts_with('_') || name == "index.js",
        destination: Destination::Pages,
    },
    Rule {
        matches: |name| name.chars().next().is_some_and(char::is_uppercase),
        destination: Destination::Components,
    },
    Rule {
        matches: |name| name == "config.js",
        destination: Destination::Root,
    },
];

/// Pick the destination for a template file name.
pub fn classify(name: &str) -> Destination {
    RULES
        .iter()
        .find(|rule| (rule.matches)(name))
        .map(|rule| rule.destination)
        .unwrap_or(Destination::Lib)
}
