//! Presales project scaffolding.
//!
//! "Do X": Materialize the fixed project skeleton on disk.
//!
//! The layout is a static typed tree (`LAYOUT`). One node is the customer
//! slot: instead of being created bare, it receives the customer name as
//! its single child directory.
//!
//! # Example
//!
//! ```no_run
//! use now_sc::project::{self, ProjectDescriptor};
//! use std::path::Path;
//!
//! let descriptor = ProjectDescriptor::new("acme-poc", "Acme Corp")?;
//! let root = Path::new("acme-poc");
//! project::create_structure(root, descriptor.customer_name())?;
//! project::write_project_files(root, &descriptor)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::{bail, Result};
use std::path::{Component, Path, PathBuf};

use crate::paths;

/// One node of the project directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirNode {
    /// Plain directory with (possibly empty) children
    Dir {
        name: &'static str,
        children: &'static [DirNode],
    },
    /// Directory that gets the customer name as its only child
    CustomerSlot { name: &'static str },
}

impl DirNode {
    pub const fn name(&self) -> &'static str {
        match *self {
            DirNode::Dir { name, .. } | DirNode::CustomerSlot { name } => name,
        }
    }
}

const fn leaf(name: &'static str) -> DirNode {
    DirNode::Dir {
        name,
        children: &[],
    }
}

/// The project skeleton, identical for every project.
pub const LAYOUT: &[DirNode] = &[
    DirNode::Dir {
        name: paths::INBOX,
        children: &[
            DirNode::Dir {
                name: "calls",
                children: &[leaf("internal"), leaf("external")],
            },
            leaf("emails"),
            leaf("notes"),
        ],
    },
    DirNode::CustomerSlot {
        name: paths::CUSTOMERS,
    },
    leaf(paths::PROMPT_TEMPLATES),
    leaf(paths::DEMO_LIBRARY),
    leaf(paths::COMMUNICATION_TEMPLATES),
    DirNode::Dir {
        name: paths::ASSETS,
        children: &[
            leaf("Project_Overview"),
            leaf("Communications"),
            leaf("POC_Documents"),
        ],
    },
];

/// Project and customer names for one `init` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    name: String,
    customer_name: String,
}

impl ProjectDescriptor {
    /// Validate and build a descriptor.
    ///
    /// The project name must stay below the working directory. The customer
    /// name becomes exactly one directory level, so it may not contain path
    /// separators or be `.`/`..`.
    pub fn new(name: impl Into<String>, customer_name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        let customer_name = customer_name.into().trim().to_string();

        validate_project_name(&name)?;
        validate_customer_name(&customer_name)?;

        Ok(Self {
            name,
            customer_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }
}

/// Check that a project name is a relative path below the working directory.
///
/// Absolute paths, drive prefixes and `..` components are rejected.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Project name is required");
    }

    let path = Path::new(name);
    let contained = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    let names_a_dir = path.components().any(|c| matches!(c, Component::Normal(_)));
    if !contained || !names_a_dir {
        bail!(
            "Project name '{}' must be a relative folder name inside the current directory",
            name
        );
    }
    Ok(())
}

/// Check that a customer name maps to a single directory.
pub fn validate_customer_name(customer: &str) -> Result<()> {
    if customer.trim().is_empty() {
        bail!("Customer name is required");
    }
    if customer == "." || customer == ".." || customer.contains(['/', '\\']) {
        bail!(
            "Customer name '{}' must be a single folder name (no '/', '\\', '.' or '..')",
            customer
        );
    }
    Ok(())
}

/// Create every directory of `LAYOUT` under `root` (and `root` itself).
///
/// Idempotent: existing directories are left alone. Any failure aborts and
/// names the offending path.
pub fn create_structure(root: &Path, customer: &str) -> Result<()> {
    validate_customer_name(customer)?;
    internal::create_tree(root, LAYOUT, customer)
}

/// Every directory `create_structure` would create, in creation order.
pub fn planned_directories(root: &Path, customer: &str) -> Vec<PathBuf> {
    let mut out = vec![root.to_path_buf()];
    internal::collect_tree(root, LAYOUT, customer, &mut out);
    out
}

/// Write README.md, .env.example and .gitignore into the project root.
pub fn write_project_files(root: &Path, descriptor: &ProjectDescriptor) -> Result<()> {
    internal::write_files(root, descriptor)
}
