//! In-memory store.
//!
//! Structures are kept as encoded NBT, so everything passing through goes
//! through the same codec as files on disk.

use std::collections::HashMap;
use std::sync::RwLock;

use arborist_nbt::{decode_structure, encode_structure, StructureFile};

use super::StructureStore;

#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<String, Vec<u8>>>,
    saved: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_template(&self, template: &str, structure: &StructureFile) -> anyhow::Result<()> {
        let data = encode_structure(structure)?;
        self.templates
            .write()
            .map_err(|_| anyhow::anyhow!("Template lock poisoned"))?
            .insert(template.to_string(), data);
        Ok(())
    }

    /// A structure written by `save`, decoded again.
    pub fn saved(&self, target: &str, file: &str) -> anyhow::Result<Option<StructureFile>> {
        let saved = self.saved.read().map_err(|_| anyhow::anyhow!("Output lock poisoned"))?;
        saved
            .get(&(target.to_string(), file.to_string()))
            .map(|data| decode_structure(data))
            .transpose()
    }

    /// Every `(target, file)` saved so far, sorted.
    pub fn list_saved(&self) -> anyhow::Result<Vec<(String, String)>> {
        let saved = self.saved.read().map_err(|_| anyhow::anyhow!("Output lock poisoned"))?;
        let mut keys: Vec<(String, String)> = saved.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl StructureStore for MemoryStore {
    fn load(&self, template: &str) -> anyhow::Result<StructureFile> {
        let templates =
            self.templates.read().map_err(|_| anyhow::anyhow!("Template lock poisoned"))?;
        let data = templates
            .get(template)
            .ok_or_else(|| anyhow::anyhow!("No template named {}", template))?;
        decode_structure(data)
    }

    fn save(&self, target: &str, file: &str, structure: &StructureFile) -> anyhow::Result<()> {
        let data = encode_structure(structure)?;
        self.saved
            .write()
            .map_err(|_| anyhow::anyhow!("Output lock poisoned"))?
            .insert((target.to_string(), file.to_string()), data);
        Ok(())
    }
}
