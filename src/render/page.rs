use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::Difficulty;
use crate::query::{Filter, SortOrder};

/// Everything the static page shell shows besides the cards' own markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub counter: String,
    pub container_html: String,
    pub filter: Filter,
    pub sort: SortOrder,
    pub search_query: String,
}

fn filter_label(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "All",
        Filter::Difficulty(Difficulty::Easy) => "Easy",
        Filter::Difficulty(Difficulty::Medium) => "Medium",
        Filter::Difficulty(Difficulty::Hard) => "Hard",
        Filter::Quick => "Quick",
        Filter::Favorites => "Favorites",
    }
}

fn sort_label(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::None => "Default",
        SortOrder::Name => "Name",
        SortOrder::Time => "Time",
    }
}

fn control_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

/// Render a complete standalone HTML document for the current display
pub fn render_page(content: &PageContent) -> String {
    let filter_buttons: String = Filter::CONTROLS
        .iter()
        .map(|&f| {
            format!(
                r#"<button class="{}" data-filter="{}">{}</button>"#,
                control_class("filter-btn", f == content.filter),
                f.as_str(),
                filter_label(f)
            )
        })
        .collect();

    let sort_buttons: String = SortOrder::CONTROLS
        .iter()
        .map(|&s| {
            format!(
                r#"<button class="{}" data-sort="{}">{}</button>"#,
                control_class("sort-btn", s == content.sort),
                s.as_str(),
                sort_label(s)
            )
        })
        .collect();

    let clear_class = if content.search_query.trim().is_empty() {
        "search-clear hidden"
    } else {
        "search-clear"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Recipes</title>
</head>
<body>
<header>
<h1>Recipes</h1>
<div class="search">
<input id="search-input" type="search" placeholder="Search recipes or ingredients" value="{query}">
<button id="search-clear" class="{clear_class}" aria-label="Clear search">×</button>
</div>
<nav class="filters">{filter_buttons}</nav>
<nav class="sorts">{sort_buttons}</nav>
<p id="recipe-counter">{counter}</p>
</header>
<main id="recipe-container">{cards}</main>
</body>
</html>
"#,
        query = encode_double_quoted_attribute(&content.search_query),
        clear_class = clear_class,
        filter_buttons = filter_buttons,
        sort_buttons = sort_buttons,
        counter = encode_text(&content.counter),
        cards = content.container_html,
    )
}
