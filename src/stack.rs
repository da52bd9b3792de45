//! Stack references and the path of their generated core config.

use std::path::{Path, PathBuf};

/// A FireFly stack plus the index of one of its core nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRef {
    pub name: String,
    pub index: u32,
}

impl StackRef {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// File name of the core config for this index, e.g. `firefly_core_0.yml`.
    pub fn config_file_name(&self) -> String {
        format!("firefly_core_{}.yml", self.index)
    }

    /// `<stacks_dir>/<name>/configs/firefly_core_<index>.yml`
    pub fn config_path(&self, stacks_dir: &Path) -> PathBuf {
        stacks_dir
            .join(&self.name)
            .join("configs")
            .join(self.config_file_name())
    }
}
