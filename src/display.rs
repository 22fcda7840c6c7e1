use log::{debug, info, warn};
use std::collections::HashSet;
use std::io::Write;

use crate::catalog::Catalog;
use crate::favorites::FavoritesStore;
use crate::model::Recipe;
use crate::query::{visible_recipes, Filter, FilterContext, SortOrder, DEFAULT_QUICK_MAX_MINUTES};
use crate::render::{
    counter_text, create_recipe_card, ingredients_text, render_card, render_page,
    render_steps_text, OpenSections, PageContent, Section,
};
use crate::state::AppState;

/// One card of the visible list, already rendered
#[derive(Debug, Clone)]
pub struct RenderedCard<'a> {
    pub recipe: &'a Recipe,
    pub favorite: bool,
    pub html: String,
}

/// The result of one pass of the display pipeline
#[derive(Debug, Clone)]
pub struct DisplayFrame<'a> {
    pub cards: Vec<RenderedCard<'a>>,
    pub total_count: usize,
    pub filter: Filter,
    pub sort: SortOrder,
    pub search_query: &'a str,
}

impl DisplayFrame<'_> {
    pub fn visible_count(&self) -> usize {
        self.cards.len()
    }

    pub fn counter(&self) -> String {
        counter_text(self.visible_count(), self.total_count)
    }

    pub fn container_html(&self) -> String {
        self.cards.iter().map(|c| c.html.as_str()).collect()
    }
}

/// Where frames are shown.
///
/// `present` replaces everything previously shown, which also collapses any
/// expanded sections.
pub trait RenderSurface {
    fn present(&mut self, frame: &DisplayFrame<'_>);

    /// Flip one section of one shown card. Returns the new visibility, or
    /// `None` when no such card is shown.
    fn toggle_section(&mut self, recipe_id: u32, section: Section) -> Option<bool>;
}

#[derive(Debug)]
struct HtmlCard {
    recipe: Recipe,
    favorite: bool,
    open: OpenSections,
    html: String,
}

/// Surface that keeps the page as HTML
#[derive(Debug, Default)]
pub struct HtmlSurface {
    content: PageContent,
    shown: Vec<u32>,
    cards: Vec<HtmlCard>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> &str {
        &self.content.counter
    }

    pub fn shown_ids(&self) -> &[u32] {
        &self.shown
    }

    pub fn is_expanded(&self, recipe_id: u32, section: Section) -> bool {
        self.cards
            .iter()
            .any(|c| c.recipe.id == recipe_id && c.open.is_open(section))
    }

    /// Markup of every shown card in display order
    pub fn container_html(&self) -> String {
        self.cards.iter().map(|c| c.html.as_str()).collect()
    }

    /// Full standalone document
    pub fn page(&self) -> String {
        render_page(&PageContent {
            container_html: self.container_html(),
            ..self.content.clone()
        })
    }
}

impl RenderSurface for HtmlSurface {
    fn present(&mut self, frame: &DisplayFrame<'_>) {
        self.content = PageContent {
            counter: frame.counter(),
            container_html: String::new(),
            filter: frame.filter,
            sort: frame.sort,
            search_query: frame.search_query.to_string(),
        };
        self.shown = frame.cards.iter().map(|c| c.recipe.id).collect();
        self.cards = frame
            .cards
            .iter()
            .map(|c| HtmlCard {
                recipe: c.recipe.clone(),
                favorite: c.favorite,
                open: OpenSections::default(),
                html: c.html.clone(),
            })
            .collect();
    }

    fn toggle_section(&mut self, recipe_id: u32, section: Section) -> Option<bool> {
        let card = self.cards.iter_mut().find(|c| c.recipe.id == recipe_id)?;
        let visible = card.open.toggle(section);
        card.html = render_card(&card.recipe, card.favorite, card.open);
        Some(visible)
    }
}

struct TerminalCard {
    id: u32,
    steps: Vec<String>,
    ingredients: Vec<String>,
}

/// Surface that prints a plain-text summary to a writer
pub struct TerminalSurface<W: Write> {
    out: W,
    cards: Vec<TerminalCard>,
    expanded: HashSet<(u32, Section)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cards: Vec::new(),
            expanded: HashSet::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn present(&mut self, frame: &DisplayFrame<'_>) {
        let mut lines = vec![
            format!(
                "[filter: {}] [sort: {}] [search: \"{}\"]",
                frame.filter, frame.sort, frame.search_query
            ),
            frame.counter(),
        ];
        for card in &frame.cards {
            let recipe = card.recipe;
            lines.push(format!(
                "  {} #{} {} ({} min, {})",
                if card.favorite { "♥" } else { "♡" },
                recipe.id,
                recipe.title,
                recipe.time,
                recipe.difficulty
            ));
        }

        self.cards = frame
            .cards
            .iter()
            .map(|c| TerminalCard {
                id: c.recipe.id,
                steps: render_steps_text(&c.recipe.steps),
                ingredients: ingredients_text(&c.recipe.ingredients),
            })
            .collect();
        self.expanded.clear();
        self.write_lines(&lines);
    }

    fn toggle_section(&mut self, recipe_id: u32, section: Section) -> Option<bool> {
        let card = self.cards.iter().find(|c| c.id == recipe_id)?;
        let key = (recipe_id, section);
        let visible = !self.expanded.remove(&key);

        let mut lines = vec![format!("#{} [{}]", recipe_id, section.toggle_label(visible))];
        if visible {
            self.expanded.insert(key);
            let body = match section {
                Section::Steps => &card.steps,
                Section::Ingredients => &card.ingredients,
            };
            lines.extend(body.iter().map(|l| format!("    {}", l)));
        }
        self.write_lines(&lines);
        Some(visible)
    }
}

/// Owns the catalog, session state and favorites, and re-derives the
/// visible list after every state change.
pub struct RecipeBrowser<S: RenderSurface> {
    catalog: Catalog,
    state: AppState,
    favorites: FavoritesStore,
    surface: S,
    quick_max_minutes: u32,
}

impl<S: RenderSurface> RecipeBrowser<S> {
    pub fn new(catalog: Catalog, favorites: FavoritesStore, surface: S) -> Self {
        Self {
            catalog,
            state: AppState::new(),
            favorites,
            surface,
            quick_max_minutes: DEFAULT_QUICK_MAX_MINUTES,
        }
    }

    pub fn with_quick_max_minutes(mut self, minutes: u32) -> Self {
        self.quick_max_minutes = minutes;
        self
    }

    /// Load persisted favorites and show the first frame
    pub async fn init(&mut self) -> usize {
        info!("Recipe browser initializing with {} recipes", self.catalog.len());
        self.favorites.load_favorites().await;
        let count = self.update_display();
        info!("Recipe browser ready");
        count
    }

    /// Run search, filter and sort, then replace the surface contents.
    /// Returns the number of visible recipes.
    pub fn update_display(&mut self) -> usize {
        let favorites = self.favorites.favorites();
        let ctx = FilterContext {
            favorites,
            quick_max_minutes: self.quick_max_minutes,
        };
        let visible = visible_recipes(
            self.catalog.recipes(),
            self.state.search_query(),
            self.state.filter(),
            self.state.sort(),
            &ctx,
        );

        let cards = visible
            .into_iter()
            .map(|recipe| {
                let favorite = favorites.contains(recipe.id);
                RenderedCard {
                    recipe,
                    favorite,
                    html: create_recipe_card(recipe, favorite),
                }
            })
            .collect();
        let frame = DisplayFrame {
            cards,
            total_count: self.catalog.len(),
            filter: self.state.filter(),
            sort: self.state.sort(),
            search_query: self.state.search_query(),
        };

        self.surface.present(&frame);
        debug!(
            "Displaying {} recipes (Filter: {}, Sort: {}, Search: \"{}\")",
            frame.visible_count(),
            frame.filter,
            frame.sort,
            frame.search_query
        );
        frame.visible_count()
    }

    pub fn set_filter(&mut self, filter: Filter) -> usize {
        self.state.set_filter(filter);
        self.update_display()
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> usize {
        self.state.set_sort(sort);
        self.update_display()
    }

    pub fn commit_search(&mut self, query: impl Into<String>) -> usize {
        self.state.commit_search(query);
        self.update_display()
    }

    pub fn clear_search(&mut self) -> usize {
        self.state.clear_search();
        self.update_display()
    }

    pub async fn toggle_favorite(&mut self, id: u32) -> usize {
        self.favorites.toggle_favorite(id).await;
        self.update_display()
    }

    /// Purely local: shows or hides one section without recomputing.
    /// Returns the new button label.
    pub fn toggle_section(&mut self, recipe_id: u32, section: Section) -> Option<String> {
        let visible = self.surface.toggle_section(recipe_id, section)?;
        Some(section.toggle_label(visible))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
