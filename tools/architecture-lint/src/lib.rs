//! Layer-boundary lint for the AccessManager client crate.
//!
//! `client/src` is split into four layers, one directory each:
//!
//! - `domain`: identifiers, errors, and the transport port. Depends on no
//!   other layer and names no HTTP library.
//! - `client`: the request core and both facades. May build the default
//!   transport from `outbound`, never touches `test_support`, and names no
//!   HTTP library.
//! - `outbound`: the reqwest adapter. Must not reach back into `client` or
//!   `test_support`.
//! - `test_support`: the in-memory service. Must not use `outbound` or an
//!   HTTP library.
//!
//! Files directly under `src` (`lib.rs`, `config.rs`) wire the layers
//! together and are not checked. Run with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name the linted crate uses for itself in paths.
const CRATE_NAME: &str = "access_manager_client";

/// HTTP stacks reserved for the outbound layer.
const HTTP_CRATES: &[&str] = &["reqwest", "hyper", "hyper_util", "http_body_util", "mockito"];

/// A dependency one file is not allowed to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending file, relative to `src`.
    pub file: PathBuf,
    /// Which boundary was crossed.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Why a lint run did not pass.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed or placed in a layer.
    Parse { file: PathBuf, message: String },
    /// Boundaries were crossed.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read client sources: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} layer boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Io(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A source file handed to [`lint_sources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `src`; its first component names the layer.
    pub file: PathBuf,
    /// Rust source text.
    pub contents: String,
}

/// Lint every layer file under `crate_dir/src`.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src = crate_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src.join(layer.dir());
        if dir.is_dir() {
            read_tree(&src, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let parse_error = |message: String| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message,
        };
        let layer = Layer::of(&source.file)
            .ok_or_else(|| parse_error("file is not inside a layer directory".to_owned()))?;
        let syntax = syn::parse_file(&source.contents).map_err(|err| parse_error(err.to_string()))?;

        let mut imports = ImportRoots::default();
        imports.visit_file(&syntax);
        violations.extend(
            imports
                .breaches(layer)
                .into_iter()
                .map(|message| Violation {
                    file: source.file.clone(),
                    message,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Client,
    Outbound,
    TestSupport,
}

impl Layer {
    const ALL: [Self; 4] = [Self::Domain, Self::Client, Self::Outbound, Self::TestSupport];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Client => "client",
            Self::Outbound => "outbound",
            Self::TestSupport => "test_support",
        }
    }

    fn named(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir() == name)
    }

    fn of(relative: &Path) -> Option<Self> {
        let first = relative.components().next()?;
        Self::named(first.as_os_str().to_str()?)
    }

    /// Layers this layer must not import.
    const fn forbidden_layers(self) -> &'static [Self] {
        match self {
            Self::Domain => &[Self::Client, Self::Outbound, Self::TestSupport],
            Self::Client => &[Self::TestSupport],
            Self::Outbound => &[Self::Client, Self::TestSupport],
            Self::TestSupport => &[Self::Outbound],
        }
    }

    const fn may_use_http_crates(self) -> bool {
        matches!(self, Self::Outbound)
    }
}

/// First segments of every path a file names, split into crate-internal
/// layers and external crates.
#[derive(Default)]
struct ImportRoots {
    layers: BTreeSet<&'static str>,
    crates: BTreeSet<String>,
}

impl ImportRoots {
    fn record(&mut self, segments: &[String]) {
        let Some(first) = segments.first().map(String::as_str) else {
            return;
        };
        let layer_name = match first {
            "crate" | CRATE_NAME => segments.get(1).map(String::as_str),
            "self" | "super" => None,
            // A lone identifier is a local binding, not a module path.
            _ if segments.len() > 1 => Some(first),
            _ => None,
        };
        if let Some(layer) = layer_name.and_then(Layer::named) {
            self.layers.insert(layer.dir());
        } else if !matches!(first, "crate" | "self" | "super" | CRATE_NAME) {
            self.crates.insert(first.to_owned());
        }
    }

    fn walk_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.walk_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.walk_use(item, prefix);
                }
            }
        }
    }

    fn breaches(&self, layer: Layer) -> Vec<String> {
        let name = layer.dir();
        let mut messages: Vec<String> = layer
            .forbidden_layers()
            .iter()
            .filter(|forbidden| self.layers.contains(forbidden.dir()))
            .map(|forbidden| format!("{name} module must not depend on crate::{}", forbidden.dir()))
            .collect();
        if !layer.may_use_http_crates() {
            messages.extend(
                HTTP_CRATES
                    .iter()
                    .filter(|http| self.crates.contains(**http))
                    .map(|http| format!("{name} module must not depend on external crate `{http}`")),
            );
        }
        messages
    }
}

impl<'ast> Visit<'ast> for ImportRoots {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        self.record(&segments);
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.walk_use(&node.tree, &mut Vec::new());
    }
}

fn read_tree(src: &Path, dir: &Path, out: &mut Vec<LintSource>) -> Result<(), ArchitectureLintError> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|found| found.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    for path in paths {
        if path.is_dir() {
            read_tree(src, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            out.push(LintSource {
                contents: fs::read_to_string(&path)?,
                file,
            });
        }
    }
    Ok(())
}
