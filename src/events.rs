use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc::Receiver;

use crate::debounce::Debouncer;
use crate::display::{RecipeBrowser, RenderSurface};
use crate::error::BrowserError;
use crate::query::{Filter, SortOrder};
use crate::render::Section;

/// User interactions the browser reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FilterClicked(String),
    SortClicked(String),
    FavoriteClicked(u32),
    ToggleClicked { recipe_id: u32, section: Section },
    /// Current contents of the search box after a keystroke
    SearchInput(String),
    SearchCleared,
    Quit,
}

/// Parse one line of the interactive command language.
///
/// ```
/// use recipe_browser::{parse_command, Section, UiEvent};
///
/// assert_eq!(parse_command("fav 3").unwrap(), UiEvent::FavoriteClicked(3));
/// assert_eq!(
///     parse_command("toggle 3 steps").unwrap(),
///     UiEvent::ToggleClicked { recipe_id: 3, section: Section::Steps }
/// );
/// ```
pub fn parse_command(line: &str) -> Result<UiEvent, BrowserError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let unknown = || BrowserError::UnknownCommand(line.to_string());
    let parse_id = |value: &str| value.parse::<u32>().map_err(|_| unknown());

    match command.to_lowercase().as_str() {
        "filter" if !rest.is_empty() => Ok(UiEvent::FilterClicked(rest.to_string())),
        "sort" if !rest.is_empty() => Ok(UiEvent::SortClicked(rest.to_string())),
        "type" | "search" => Ok(UiEvent::SearchInput(rest.to_string())),
        "clear" => Ok(UiEvent::SearchCleared),
        "fav" | "favorite" => Ok(UiEvent::FavoriteClicked(parse_id(rest)?)),
        "toggle" => {
            let (id, section) = rest.split_once(char::is_whitespace).ok_or_else(unknown)?;
            let section = Section::parse(section).ok_or_else(unknown)?;
            Ok(UiEvent::ToggleClicked {
                recipe_id: parse_id(id)?,
                section,
            })
        }
        "quit" | "exit" => Ok(UiEvent::Quit),
        _ => Err(unknown()),
    }
}

async fn handle_event<S: RenderSurface>(
    browser: &mut RecipeBrowser<S>,
    debouncer: &mut Debouncer<String>,
    event: UiEvent,
) {
    match event {
        UiEvent::FilterClicked(value) => {
            browser.set_filter(Filter::parse(&value));
        }
        UiEvent::SortClicked(value) => {
            browser.set_sort(SortOrder::parse(&value));
        }
        UiEvent::FavoriteClicked(id) => {
            browser.toggle_favorite(id).await;
        }
        UiEvent::ToggleClicked { recipe_id, section } => {
            match browser.toggle_section(recipe_id, section) {
                Some(label) => debug!("Recipe {} {} toggled: {}", recipe_id, section, label),
                None => debug!("Recipe {} is not shown, ignoring toggle", recipe_id),
            }
        }
        UiEvent::SearchInput(text) => debouncer.schedule(text),
        UiEvent::SearchCleared => {
            debouncer.cancel();
            browser.clear_search();
        }
        UiEvent::Quit => {}
    }
}

/// Drive the browser from a stream of events until `Quit` or until the
/// sender is dropped.
///
/// Search input is committed only after `debounce` of inactivity. When the
/// stream ends a pending search is still committed; `Quit` discards it.
pub async fn run_event_loop<S: RenderSurface>(
    browser: &mut RecipeBrowser<S>,
    mut events: Receiver<UiEvent>,
    debounce: Duration,
) {
    let (mut debouncer, mut commits) = Debouncer::new(debounce);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(UiEvent::Quit) => break,
                Some(event) => handle_event(browser, &mut debouncer, event).await,
                None => {
                    // superseded commits may still be queued ahead of the latest one
                    while debouncer.is_pending() {
                        match commits.recv().await {
                            Some(commit) => {
                                if let Some(query) = debouncer.accept(commit) {
                                    browser.commit_search(query);
                                }
                            }
                            None => break,
                        }
                    }
                    break;
                }
            },
            Some(commit) = commits.recv() => {
                if let Some(query) = debouncer.accept(commit) {
                    browser.commit_search(query);
                }
            }
        }
    }

    info!("Event loop stopped");
}
