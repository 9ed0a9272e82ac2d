//! Filesystem store: templates in one directory, output in another.

use std::path::PathBuf;

use arborist_nbt::{read_structure, write_structure, StructureFile};

use super::StructureStore;

pub struct DirectoryStore {
    templates: PathBuf,
    output: PathBuf,
}

impl DirectoryStore {
    pub fn new(templates: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            templates: templates.into(),
            output: output.into(),
        }
    }

    pub fn template_path(&self, template: &str) -> PathBuf {
        self.templates.join(format!("{}.nbt", template))
    }

    pub fn output_path(&self, target: &str, file: &str) -> PathBuf {
        self.output.join(target).join(format!("{}.nbt", file))
    }
}

impl StructureStore for DirectoryStore {
    fn load(&self, template: &str) -> anyhow::Result<StructureFile> {
        read_structure(&self.template_path(template))
    }

    fn save(&self, target: &str, file: &str, structure: &StructureFile) -> anyhow::Result<()> {
        let path = self.output_path(target, file);
        write_structure(&path, structure)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}
