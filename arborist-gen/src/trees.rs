//! Tree tables: which templates make up each tree, and how they are combined.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How the game assembles a tree from its templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "feature", rename_all = "snake_case")]
pub enum Feature {
    /// One of `count` whole-tree templates, `<variant>1` to `<variant><count>`.
    Random { count: u32 },
    /// A base template `<variant>` with `<variant>_overlay` placed on top.
    Overlay,
    /// Layers of templates on a trunk; entry `i` is the template count of layer `i + 1`.
    Stacked { layers: Vec<u32> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Wood type, used for block ids and the output directory.
    pub name: String,
    #[serde(flatten)]
    pub feature: Feature,
    /// Template family the tree is built from. Several woods share one family.
    pub variant: String,
}

impl Tree {
    fn random(name: &str, variant: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            feature: Feature::Random { count },
            variant: variant.to_string(),
        }
    }

    fn overlay(name: &str, variant: &str) -> Self {
        Self {
            name: name.to_string(),
            feature: Feature::Overlay,
            variant: variant.to_string(),
        }
    }

    fn stacked(name: &str, variant: &str, layers: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            feature: Feature::Stacked { layers: layers.to_vec() },
            variant: variant.to_string(),
        }
    }

    /// Output directory for this tree within `set`.
    pub fn target(&self, set: TreeSet) -> String {
        format!("{}{}", self.name, set.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeSet {
    Normal,
    Large,
    Dead,
}

impl TreeSet {
    pub const ALL: [TreeSet; 3] = [TreeSet::Normal, TreeSet::Large, TreeSet::Dead];

    pub fn suffix(self) -> &'static str {
        match self {
            TreeSet::Normal => "",
            TreeSet::Large => "_large",
            TreeSet::Dead => "_dead",
        }
    }
}

impl FromStr for TreeSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TreeSet::Normal),
            "large" => Ok(TreeSet::Large),
            "dead" => Ok(TreeSet::Dead),
            other => Err(format!("Unknown tree set '{}', expected normal, large or dead", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTables {
    #[serde(default)]
    pub normal: Vec<Tree>,
    #[serde(default)]
    pub large: Vec<Tree>,
    #[serde(default)]
    pub dead: Vec<Tree>,
}

impl TreeTables {
    pub fn get(&self, set: TreeSet) -> &[Tree] {
        match set {
            TreeSet::Normal => &self.normal,
            TreeSet::Large => &self.large,
            TreeSet::Dead => &self.dead,
        }
    }

    pub fn from_reader(reader: impl Read) -> anyhow::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a JSON manifest with `normal`, `large` and `dead` lists.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open manifest {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    /// The mod's own trees.
    pub fn builtin() -> Self {
        Self {
            normal: vec![
                Tree::random("acacia", "acacia", 35),
                Tree::overlay("ash", "normal"),
                Tree::random("aspen", "aspen", 16),
                Tree::random("birch", "aspen", 16),
                Tree::random("blackwood", "blackwood", 10),
                Tree::overlay("chestnut", "normal"),
                Tree::random("douglas_fir", "fir", 9),
                Tree::random("hickory", "fir", 9),
                Tree::random("kapok", "jungle", 17),
                Tree::overlay("maple", "normal"),
                Tree::overlay("oak", "tall"),
                Tree::random("palm", "tropical", 7),
                Tree::random("pine", "fir", 9),
                Tree::overlay("rosewood", "tall"),
                Tree::random("sequoia", "conifer", 9),
                Tree::random("spruce", "conifer", 9),
                Tree::overlay("sycamore", "normal"),
                Tree::overlay("white_cedar", "white_cedar"),
                Tree::random("willow", "willow", 7),
            ],
            large: vec![
                Tree::random("acacia", "kapok_large", 6),
                Tree::random("ash", "normal_large", 5),
                Tree::random("blackwood", "blackwood_large", 10),
                Tree::random("chestnut", "normal_large", 5),
                Tree::random("douglas_fir", "fir_large", 5),
                Tree::random("hickory", "fir_large", 5),
                Tree::random("maple", "normal_large", 5),
                Tree::random("pine", "fir_large", 5),
                Tree::stacked("sequoia", "conifer_large", &[3, 3, 3]),
                Tree::stacked("spruce", "conifer_large", &[3, 3, 3]),
                Tree::random("sycamore", "normal_large", 5),
                Tree::overlay("white_cedar", "tall"),
                Tree::random("willow", "willow_large", 14),
            ],
            dead: vec![
                Tree::random("acacia", "dead_small", 6),
                Tree::random("ash", "dead_tall", 6),
                Tree::random("aspen", "dead_tall", 6),
                Tree::random("birch", "dead_tall", 6),
                Tree::random("blackwood", "dead_small", 6),
                Tree::random("chestnut", "dead_small", 6),
                Tree::random("douglas_fir", "dead_tall", 6),
                Tree::random("hickory", "dead_tall", 6),
                Tree::random("kapok", "dead_jungle", 4),
                Tree::random("maple", "dead_small", 6),
                Tree::random("oak", "dead_small", 6),
                Tree::random("palm", "dead_stump", 3),
                Tree::random("pine", "dead_tall", 6),
                Tree::random("rosewood", "dead_tall", 6),
                Tree::random("sequoia", "dead_tall", 6),
                Tree::random("spruce", "dead_tall", 6),
                Tree::random("sycamore", "dead_small", 6),
                Tree::random("white_cedar", "dead_tall", 6),
                Tree::random("willow", "dead_stump", 3),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let tables = TreeTables::builtin();
        assert_eq!(tables.normal.len(), 19);
        assert_eq!(tables.large.len(), 13);
        assert_eq!(tables.dead.len(), 19);

        let spruce = tables.large.iter().find(|t| t.name == "spruce").unwrap();
        assert_eq!(spruce.feature, Feature::Stacked { layers: vec![3, 3, 3] });
        assert_eq!(spruce.target(TreeSet::Large), "spruce_large");
    }

    #[test]
    fn test_manifest() {
        let json = r#"{
            "normal": [
                { "name": "oak", "feature": "overlay", "variant": "tall" },
                { "name": "acacia", "feature": "random", "count": 2, "variant": "acacia" }
            ],
            "large": [
                { "name": "spruce", "feature": "stacked", "layers": [1, 2], "variant": "conifer_large" }
            ]
        }"#;
        let tables = TreeTables::from_reader(json.as_bytes()).unwrap();
        assert_eq!(tables.normal[0], Tree::overlay("oak", "tall"));
        assert_eq!(tables.normal[1], Tree::random("acacia", "acacia", 2));
        assert_eq!(tables.large[0], Tree::stacked("spruce", "conifer_large", &[1, 2]));
        assert!(tables.dead.is_empty());
    }

    #[test]
    fn test_tree_set_parsing() {
        assert_eq!("dead".parse::<TreeSet>(), Ok(TreeSet::Dead));
        assert!("huge".parse::<TreeSet>().is_err());
        assert_eq!(Tree::random("oak", "dead_small", 6).target(TreeSet::Dead), "oak_dead");
    }
}
