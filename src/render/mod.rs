//! HTML and plain-text renderers for recipe cards and pages.

mod card;
mod page;
mod steps;

pub use card::{
    create_ingredients_html, create_recipe_card, ingredients_text, render_card, OpenSections,
};
pub use page::{render_page, PageContent};
pub use steps::{render_steps, render_steps_text};

use std::fmt;

/// A collapsible block on a recipe card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Steps,
    Ingredients,
}

impl Section {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "steps" => Some(Section::Steps),
            "ingredients" => Some(Section::Ingredients),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Steps => "steps",
            Section::Ingredients => "ingredients",
        }
    }

    /// Button label for the given visibility, e.g. "Show Steps" or "Hide Steps"
    pub fn toggle_label(&self, visible: bool) -> String {
        let noun = match self {
            Section::Steps => "Steps",
            Section::Ingredients => "Ingredients",
        };
        if visible {
            format!("Hide {}", noun)
        } else {
            format!("Show {}", noun)
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter line shown above the cards
pub fn counter_text(visible: usize, total: usize) -> String {
    format!("Showing {} of {} recipes", visible, total)
}
