//! Pure query functions over the recipe catalog.
//!
//! The visible list is always derived as search, then filter, then sort.
//! Each step takes a borrowed list and returns a new one; inputs are never
//! reordered in place.

use icu_collator::{Collator, CollatorOptions, Strength};
use log::warn;
use std::cmp::Ordering;
use std::fmt;

use crate::favorites::Favorites;
use crate::model::{Difficulty, Recipe};

/// Recipes strictly shorter than this many minutes count as quick
pub const DEFAULT_QUICK_MAX_MINUTES: u32 = 30;

/// The single active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Difficulty(Difficulty),
    Quick,
    Favorites,
}

impl Filter {
    /// Every filter in control order
    pub const CONTROLS: [Filter; 6] = [
        Filter::All,
        Filter::Difficulty(Difficulty::Easy),
        Filter::Difficulty(Difficulty::Medium),
        Filter::Difficulty(Difficulty::Hard),
        Filter::Quick,
        Filter::Favorites,
    ];

    /// Parse a filter name; anything unrecognized means `All`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" => Filter::Difficulty(Difficulty::Easy),
            "medium" => Filter::Difficulty(Difficulty::Medium),
            "hard" => Filter::Difficulty(Difficulty::Hard),
            "quick" => Filter::Quick,
            "favorites" => Filter::Favorites,
            _ => Filter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Difficulty(d) => d.as_str(),
            Filter::Quick => "quick",
            Filter::Favorites => "favorites",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single active sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Name,
    Time,
}

impl SortOrder {
    pub const CONTROLS: [SortOrder; 3] = [SortOrder::None, SortOrder::Name, SortOrder::Time];

    /// Parse a sort name; anything unrecognized means `None`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "name" => SortOrder::Name,
            "time" => SortOrder::Time,
            _ => SortOrder::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::Name => "name",
            SortOrder::Time => "time",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data a filter may consult besides the recipe itself
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub favorites: &'a Favorites,
    pub quick_max_minutes: u32,
}

impl<'a> FilterContext<'a> {
    pub fn new(favorites: &'a Favorites) -> Self {
        Self {
            favorites,
            quick_max_minutes: DEFAULT_QUICK_MAX_MINUTES,
        }
    }
}

/// Keep recipes whose title, description or any ingredient contains the
/// query, ignoring case. A blank query returns the list unchanged.
pub fn apply_search<'a>(list: &[&'a Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return list.to_vec();
    }

    list.iter()
        .copied()
        .filter(|recipe| {
            recipe.title.to_lowercase().contains(&query)
                || recipe.description.to_lowercase().contains(&query)
                || recipe
                    .ingredients
                    .iter()
                    .any(|i| i.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn apply_filter<'a>(
    list: &[&'a Recipe],
    filter: Filter,
    ctx: &FilterContext<'_>,
) -> Vec<&'a Recipe> {
    let keep = |recipe: &Recipe| match filter {
        Filter::All => true,
        Filter::Difficulty(difficulty) => recipe.difficulty == difficulty,
        Filter::Quick => recipe.time < ctx.quick_max_minutes,
        Filter::Favorites => ctx.favorites.contains(recipe.id),
    };

    list.iter().copied().filter(|r| keep(*r)).collect()
}

/// Stable sort into a new list; `SortOrder::None` keeps input order
pub fn apply_sort<'a>(list: &[&'a Recipe], order: SortOrder) -> Vec<&'a Recipe> {
    let mut sorted = list.to_vec();
    match order {
        SortOrder::None => {}
        SortOrder::Name => {
            let order = TitleOrder::new();
            sorted.sort_by(|a, b| order.compare(&a.title, &b.title));
        }
        SortOrder::Time => sorted.sort_by_key(|r| r.time),
    }
    sorted
}

/// Compose the pipeline in its fixed order: search, filter, sort.
pub fn visible_recipes<'a>(
    recipes: &'a [Recipe],
    query: &str,
    filter: Filter,
    order: SortOrder,
    ctx: &FilterContext<'_>,
) -> Vec<&'a Recipe> {
    let all: Vec<&Recipe> = recipes.iter().collect();
    let searched = apply_search(&all, query);
    let filtered = apply_filter(&searched, filter, ctx);
    apply_sort(&filtered, order)
}

/// Locale-aware title order under the root collation: accents and case
/// only break ties between otherwise equal titles.
pub struct TitleOrder {
    collator: Option<Collator>,
}

impl TitleOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("Root collator unavailable, sorting titles by code point: {}", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            None => a.cmp(b),
        }
    }
}

impl Default for TitleOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two titles the way a name sort orders them
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TitleOrder::new().compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::Step;

    fn recipe(id: u32, title: &str, time: u32) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            time,
            difficulty: Difficulty::Easy,
            description: String::new(),
            category: String::new(),
            ingredients: vec![],
            steps: vec![Step::Leaf("Cook".to_string())],
        }
    }

    fn ids(list: &[&Recipe]) -> Vec<u32> {
        list.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_parse_falls_back_to_defaults() {
        assert_eq!(Filter::parse("quick"), Filter::Quick);
        assert_eq!(Filter::parse("HARD"), Filter::Difficulty(Difficulty::Hard));
        assert_eq!(Filter::parse("spicy"), Filter::All);
        assert_eq!(SortOrder::parse("time"), SortOrder::Time);
        assert_eq!(SortOrder::parse("rating"), SortOrder::None);
    }

    #[test]
    fn test_blank_search_is_identity() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();

        assert_eq!(ids(&apply_search(&all, "")), ids(&all));
        assert_eq!(ids(&apply_search(&all, "   ")), ids(&all));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();

        let upper = apply_search(&all, "EGGS");
        let lower = apply_search(&all, "eggs");
        assert_eq!(ids(&upper), ids(&lower));
        // Carbonara, Beef Wellington and Pad Thai list eggs
        assert_eq!(ids(&lower), vec![1, 5, 7]);
    }

    #[test]
    fn test_search_matches_description_and_ingredients() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();

        assert_eq!(ids(&apply_search(&all, "tamarind")), vec![7]);
        assert_eq!(ids(&apply_search(&all, "mozzarella")), vec![8]);
        assert!(apply_search(&all, "durian").is_empty());
    }

    #[test]
    fn test_filters_return_subsets() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();
        let favorites = Favorites::from_ids([2, 4]);
        let ctx = FilterContext::new(&favorites);

        for filter in Filter::CONTROLS {
            let out = apply_filter(&all, filter, &ctx);
            assert!(out.iter().all(|r| all.iter().any(|a| a.id == r.id)));
            assert!(out.len() <= all.len());
        }
    }

    #[test]
    fn test_quick_filter_is_strict() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();
        let favorites = Favorites::default();
        let ctx = FilterContext::new(&favorites);

        let quick = apply_filter(&all, Filter::Quick, &ctx);
        // Pad Thai takes exactly 30 minutes and is excluded
        assert_eq!(ids(&quick), vec![1, 4, 6]);
    }

    #[test]
    fn test_difficulty_filter() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();
        let favorites = Favorites::default();
        let ctx = FilterContext::new(&favorites);

        let hard = apply_filter(&all, Filter::Difficulty(Difficulty::Hard), &ctx);
        assert_eq!(ids(&hard), vec![3, 5]);
    }

    #[test]
    fn test_favorites_filter_with_empty_set() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();
        let favorites = Favorites::default();
        let ctx = FilterContext::new(&favorites);

        assert!(apply_filter(&all, Filter::Favorites, &ctx).is_empty());
    }

    #[test]
    fn test_sort_by_name_is_ordered_and_idempotent() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();

        let once = apply_sort(&all, SortOrder::Name);
        let twice = apply_sort(&once, SortOrder::Name);
        assert_eq!(ids(&once), ids(&twice));
        assert!(once
            .windows(2)
            .all(|w| compare_titles(&w[0].title, &w[1].title) != Ordering::Greater));
        assert_eq!(once[0].title, "Beef Wellington");
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let a = recipe(1, "banana bread", 10);
        let b = recipe(2, "Apple pie", 10);
        let c = recipe(3, "cherry tart", 10);
        let list = vec![&a, &b, &c];

        assert_eq!(ids(&apply_sort(&list, SortOrder::Name)), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_by_name_places_accented_titles_by_base_letter() {
        let zucchini = recipe(1, "Zucchini Bread", 60);
        let eclair = recipe(2, "Éclair", 90);
        let apple = recipe(3, "Apple Pie", 75);
        let fig = recipe(4, "Fig Tart", 40);
        let date = recipe(5, "Date Loaf", 50);
        let list = vec![&zucchini, &eclair, &apple, &fig, &date];

        assert_eq!(ids(&apply_sort(&list, SortOrder::Name)), vec![3, 5, 2, 4, 1]);
    }

    #[test]
    fn test_compare_titles_accent_and_case_break_ties_only() {
        assert_eq!(compare_titles("Éclair", "Zucchini"), Ordering::Less);
        assert_eq!(compare_titles("eclair", "Éclair"), Ordering::Less);
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("Crêpes", "Crepes"), Ordering::Greater);
        assert_eq!(compare_titles("Pad Thai", "Pad Thai"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_time_is_stable() {
        let a = recipe(1, "A", 20);
        let b = recipe(2, "B", 10);
        let c = recipe(3, "C", 20);
        let d = recipe(4, "D", 10);
        let list = vec![&a, &b, &c, &d];

        let sorted = apply_sort(&list, SortOrder::Time);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
        // input untouched
        assert_eq!(ids(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_none_preserves_order() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();

        assert_eq!(ids(&apply_sort(&all, SortOrder::None)), ids(&all));
    }

    #[test]
    fn test_pipeline_quick_pasta() {
        let catalog = Catalog::builtin().unwrap();
        let favorites = Favorites::default();
        let ctx = FilterContext::new(&favorites);

        let visible = visible_recipes(
            catalog.recipes(),
            "pasta",
            Filter::Quick,
            SortOrder::None,
            &ctx,
        );
        assert_eq!(ids(&visible), vec![1]);
        assert_eq!(visible[0].title, "Classic Spaghetti Carbonara");
    }

    #[test]
    fn test_custom_quick_threshold() {
        let catalog = Catalog::builtin().unwrap();
        let all: Vec<&Recipe> = catalog.recipes().iter().collect();
        let favorites = Favorites::default();
        let ctx = FilterContext {
            favorites: &favorites,
            quick_max_minutes: 31,
        };

        assert_eq!(ids(&apply_filter(&all, Filter::Quick, &ctx)), vec![1, 4, 6, 7]);
    }
}
