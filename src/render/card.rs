use html_escape::{encode_double_quoted_attribute, encode_text};

use super::steps::render_steps;
use super::Section;
use crate::model::Recipe;

pub fn create_ingredients_html(ingredients: &[String]) -> String {
    let items: String = ingredients
        .iter()
        .map(|i| format!("<li>{}</li>", encode_text(i)))
        .collect();
    format!(r#"<ul class="ingredient-list">{}</ul>"#, items)
}

/// Ingredients as bulleted lines for a terminal
pub fn ingredients_text(ingredients: &[String]) -> Vec<String> {
    ingredients.iter().map(|i| format!("- {}", i)).collect()
}

/// Which collapsible sections of a card are open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenSections {
    pub steps: bool,
    pub ingredients: bool,
}

impl OpenSections {
    pub fn is_open(&self, section: Section) -> bool {
        match section {
            Section::Steps => self.steps,
            Section::Ingredients => self.ingredients,
        }
    }

    /// Flip one section; returns whether it is open afterwards
    pub fn toggle(&mut self, section: Section) -> bool {
        let open = match section {
            Section::Steps => &mut self.steps,
            Section::Ingredients => &mut self.ingredients,
        };
        *open = !*open;
        *open
    }
}

/// Build the card for one recipe with both collapsible sections hidden.
///
/// The favorite button shows a filled heart and the `active` class when
/// `is_favorite` is set.
pub fn create_recipe_card(recipe: &Recipe, is_favorite: bool) -> String {
    render_card(recipe, is_favorite, OpenSections::default())
}

/// Build the card for one recipe; open sections carry the `visible` class
/// and their button offers to hide them.
pub fn render_card(recipe: &Recipe, is_favorite: bool, open: OpenSections) -> String {
    let id = recipe.id;
    let difficulty = recipe.difficulty.as_str();
    let (fav_class, heart) = if is_favorite {
        (" active", "♥")
    } else {
        ("", "♡")
    };

    format!(
        concat!(
            r#"<div class="recipe-card" data-id="{id}">"#,
            "<h3>{title}</h3>",
            r#"<div class="recipe-meta">"#,
            "<span>⏱️ {time} min</span>",
            r#"<span class="difficulty {difficulty}">{difficulty}</span>"#,
            r#"<button class="favorite-btn{fav_class}" data-favorite-id="{id}" aria-label="Toggle favorite">{heart}</button>"#,
            "</div>",
            "<p>{description}</p>",
            r#"<div class="card-controls">{steps_btn}{ingredients_btn}</div>"#,
            r#"<div id="steps-{id}" class="steps-container{steps_class}">{steps}</div>"#,
            r#"<div id="ingredients-{id}" class="ingredients-container{ingredients_class}">{ingredients}</div>"#,
            "</div>"
        ),
        id = id,
        title = encode_text(&recipe.title),
        time = recipe.time,
        difficulty = difficulty,
        fav_class = fav_class,
        heart = heart,
        description = encode_text(&recipe.description),
        steps_btn = toggle_button(id, Section::Steps, open.steps),
        ingredients_btn = toggle_button(id, Section::Ingredients, open.ingredients),
        steps_class = visible_class(open.steps),
        ingredients_class = visible_class(open.ingredients),
        steps = render_steps(&recipe.steps),
        ingredients = create_ingredients_html(&recipe.ingredients),
    )
}

fn visible_class(open: bool) -> &'static str {
    if open {
        " visible"
    } else {
        ""
    }
}

fn toggle_button(id: u32, section: Section, open: bool) -> String {
    format!(
        r#"<button class="toggle-btn" data-recipe-id="{}" data-toggle="{}">{}</button>"#,
        id,
        encode_double_quoted_attribute(section.as_str()),
        section.toggle_label(open)
    )
}
