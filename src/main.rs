use clap::{Args, Parser, Subcommand};
use log::{debug, error};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use recipe_browser::{
    browser_from_config, parse_command, run_event_loop, BrowserConfig, Filter, HtmlSurface,
    RecipeBrowser, RenderSurface, SortOrder, TerminalSurface, UiEvent,
};

/// Browse the recipe catalog
#[derive(Parser)]
#[command(name = "recipe-browser")]
#[command(version)]
#[command(about = "Search, filter, sort and favorite recipes")]
struct Cli {
    /// Favorites file (overrides configuration)
    #[arg(long, global = true)]
    favorites: Option<PathBuf>,

    /// JSON catalog to browse instead of the built-in recipes
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// all, easy, medium, hard, quick or favorites
    #[arg(short, long, default_value = "all")]
    filter: String,

    /// none, name or time
    #[arg(short, long, default_value = "none")]
    sort: String,

    /// Free text matched against title, description and ingredients
    #[arg(short = 'q', long, default_value = "")]
    search: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the browsing page as a standalone HTML document
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the counter and the visible recipes
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Add a recipe to favorites, or remove it if already there
    Favorite {
        /// Recipe id
        id: u32,
    },

    /// Read commands from stdin: filter, sort, type, clear, fav, toggle, quit
    Interactive,
}

async fn apply_view<S: RenderSurface>(browser: &mut RecipeBrowser<S>, view: &ViewArgs) {
    browser.init().await;
    browser.commit_search(view.search.clone());
    browser.set_filter(Filter::parse(&view.filter));
    browser.set_sort(SortOrder::parse(&view.sort));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = BrowserConfig::load()?;
    if let Some(path) = cli.favorites {
        config.favorites_path = path;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    debug!("{:#?}", config);

    match cli.command {
        Commands::Render { view, output } => {
            let mut browser = browser_from_config(&config, HtmlSurface::new()).await?;
            apply_view(&mut browser, &view).await;
            let page = browser.surface().page();
            match output {
                Some(path) => tokio::fs::write(&path, page).await?,
                None => print!("{}", page),
            }
        }
        Commands::List { view } => {
            let mut browser = browser_from_config(&config, HtmlSurface::new()).await?;
            apply_view(&mut browser, &view).await;

            println!("{}", browser.surface().counter());
            for id in browser.surface().shown_ids() {
                if let Some(recipe) = browser.catalog().get(*id) {
                    let heart = if browser.favorites().is_favorite(*id) { "♥" } else { " " };
                    println!(
                        "{} {:>3}  {:<32} {:>4} min  {}",
                        heart, recipe.id, recipe.title, recipe.time, recipe.difficulty
                    );
                }
            }
        }
        Commands::Favorite { id } => {
            let mut browser = browser_from_config(&config, HtmlSurface::new()).await?;
            browser.init().await;
            if browser.catalog().get(id).is_none() {
                return Err(format!("No recipe with id {}", id).into());
            }
            browser.toggle_favorite(id).await;
            println!("Favorites: {:?}", browser.favorites().favorites().ids());
        }
        Commands::Interactive => {
            let surface = TerminalSurface::new(std::io::stdout());
            let mut browser = browser_from_config(&config, surface).await?;
            browser.init().await;

            let (tx, rx) = mpsc::channel(32);
            tokio::spawn(async move {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_command(&line) {
                        Ok(event) => {
                            let quit = event == UiEvent::Quit;
                            if tx.send(event).await.is_err() || quit {
                                break;
                            }
                        }
                        Err(e) => error!("{}", e),
                    }
                }
            });

            run_event_loop(&mut browser, rx, config.debounce()).await;
        }
    }

    Ok(())
}
