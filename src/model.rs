use serde::{Deserialize, Serialize};
use std::fmt;

/// How demanding a recipe is to cook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction of a recipe.
///
/// In JSON a plain string is a [`Step::Leaf`] and an object with `text` and
/// `substeps` is a [`Step::Group`]. Groups nest to any finite depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Leaf(String),
    Group {
        text: String,
        #[serde(default)]
        substeps: Vec<Step>,
    },
}

impl Step {
    pub fn text(&self) -> &str {
        match self {
            Step::Leaf(text) | Step::Group { text, .. } => text.as_str(),
        }
    }

    /// Depth of the step tree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Step::Leaf(_) => 1,
            Step::Group { substeps, .. } => 1 + substeps.iter().map(Step::depth).max().unwrap_or(0),
        }
    }
}

/// A catalog entry describing one dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    /// Cooking time in minutes
    pub time: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}
