//! Output types of a generation run.
//!
//! A run produces an ordered list of artifacts; each artifact is a name and
//! the lines of text to write under that name. The generator never touches
//! the filesystem itself.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::{Artifact, GeneratedCode};
//!
//! let mut code = GeneratedCode::new();
//! code.add_artifact(Artifact::new("routes.js", vec!["var routes = {};".to_string()]));
//!
//! assert_eq!(code.artifact_count(), 1);
//! assert_eq!(code.artifacts().next().unwrap().contents(), "var routes = {};\n");
//! ```

use serde::{Deserialize, Serialize};

/// Result of code generation containing every artifact of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Artifacts in emission order
    pub artifacts: Vec<Artifact>,
}

impl GeneratedCode {
    /// Creates an empty container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            artifacts: Vec::new(),
        }
    }

    /// Appends an artifact.
    pub fn add_artifact(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    /// Appends every artifact from `artifacts`.
    pub fn extend(&mut self, artifacts: impl IntoIterator<Item = Artifact>) {
        self.artifacts.extend(artifacts);
    }

    /// Number of artifacts.
    #[inline]
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Iterates artifacts in emission order.
    #[inline]
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Finds an artifact by name.
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.name == name)
    }
}

/// One output unit: a file name relative to the output directory and its
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Relative file name
    pub name: String,
    /// Lines without trailing newlines
    pub lines: Vec<String>,
}

impl Artifact {
    /// Creates an artifact.
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Joins the lines, terminating each with `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        let capacity = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut contents = String::with_capacity(capacity);
        for line in &self.lines {
            contents.push_str(line);
            contents.push('\n');
        }
        contents
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
