//! Terminal entry point.
//!
//! A thin shell around the library: command-line arguments become listing
//! [`Event`]s or community calls, and the resulting state is rendered as plain
//! text on stdout. Errors go to stderr and the process exits non-zero.
//!
//! # Commands
//!
//! - `browse`: the explore page (`--query`, `--genre`, `--source`, `--sort`, `--reset`)
//! - `genres`: one genre at a time (`--pick`)
//! - `ranking`: the top list with a title filter (`--filter`)
//! - `show <ID>`: one title's detail page
//! - `suggest <QUERY>`: debounced suggestions for a partial query
//! - `forum list|post`: community threads
//! - `list show|set`: a user's reading list
//!
//! Listing commands restore the page's persisted state first, so flags apply
//! on top of whatever the previous run left behind. `--no-cache` uses an
//! in-memory store instead.

#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use manhwadex::app::{Event, PageKind, SortKey, SourceFilter, GENRES};
use manhwadex::catalog::CatalogSource;
use manhwadex::community::{self, JsonDocumentStore, NewThread, ReadingStatus, User};
use manhwadex::storage::{JsonKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use manhwadex::suggest::{SuggestionBox, MIN_QUERY_CHARS};
use manhwadex::{infrastructure, ui, CatalogError, Config, ConfigOverrides, Context, Result};

/// Extra time allowed for a suggestion search after the settle window.
const SUGGEST_GRACE: Duration = Duration::from_secs(30);

#[derive(Debug, Parser)]
#[command(name = "manhwadex", version, about = "Discover manhwa from the terminal")]
struct Cli {
    /// Config file (TOML). Defaults to ~/.config/manhwadex/config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for cached views, community data, and traces.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog API root.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Tracing level: trace, debug, info, warn, error.
    #[arg(long, global = true)]
    trace_level: Option<String>,

    /// Built-in theme name or path to a TOML theme.
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Keep listing state in memory for this run only.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Output width in columns.
    #[arg(long, global = true, default_value_t = 100)]
    width: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Explore titles with genre, source, and sort filters.
    Browse(BrowseArgs),

    /// Browse one genre at a time.
    Genres {
        /// Genre to show; picking the current genre again clears it.
        #[arg(long)]
        pick: Option<String>,
    },

    /// The top ranking, optionally filtered by title.
    Ranking {
        /// Case-insensitive title filter.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show one title.
    Show { id: u64 },

    /// Search suggestions for a partial query.
    Suggest {
        query: String,

        /// Use the compact box (5 entries instead of 8).
        #[arg(long)]
        compact: bool,
    },

    /// Community forum.
    #[command(subcommand)]
    Forum(ForumCommand),

    /// Reading lists.
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Search the catalog instead of listing top titles.
    #[arg(long)]
    query: Option<String>,

    /// Toggle a genre filter; repeatable.
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// all, webtoon, or non-webtoon.
    #[arg(long)]
    source: Option<SourceFilter>,

    /// rank or score.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Clear every filter and the cached list before anything else.
    #[arg(long)]
    reset: bool,
}

#[derive(Debug, Args)]
struct Identity {
    /// Signed-in user id; omit to act signed out.
    #[arg(long)]
    user_id: Option<String>,

    #[arg(long)]
    email: Option<String>,
}

impl Identity {
    fn user(&self) -> Option<User> {
        self.user_id.as_deref().map(|uid| User::new(uid, self.email.as_deref()))
    }
}

#[derive(Debug, Subcommand)]
enum ForumCommand {
    /// List threads, newest first.
    List,

    /// Start a new thread.
    Post {
        #[command(flatten)]
        identity: Identity,

        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    /// Show a user's reading list.
    Show {
        #[arg(long)]
        user_id: String,
    },

    /// Set the status of one title.
    Set {
        #[command(flatten)]
        identity: Identity,

        item_id: u64,

        /// Currently Reading, Completed, On Hold, Plan to Read, or Dropped.
        status: ReadingStatus,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprint!("{}", ui::render_failure(&e, &ui::Theme::plain()));
            return ExitCode::FAILURE;
        }
    };
    manhwadex::observability::init_tracing(&config);

    let context = match manhwadex::initialize(config) {
        Ok(context) => context,
        Err(e) => {
            eprint!("{}", ui::render_failure(&e, &ui::Theme::plain()));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprint!("{}", ui::render_failure(&e.into(), &context.theme));
            return ExitCode::FAILURE;
        }
    };

    let _span = tracing::info_span!("command", name = command_name(&cli.command)).entered();
    match runtime.block_on(run(&cli, &context)) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprint!("{}", ui::render_failure(&e, &context.theme));
            ExitCode::FAILURE
        }
    }
}

/// Config file (explicit, or the default location if it exists) plus flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let file = match &cli.config {
        Some(path) => Some(Config::from_file(path)?),
        None => infrastructure::default_config_file()
            .filter(|path| path.exists())
            .map(Config::from_file)
            .transpose()?,
    };

    Ok(file.unwrap_or_default().with_overrides(ConfigOverrides {
        base_url: cli.base_url.clone(),
        data_dir: cli.data_dir.clone(),
        trace_level: cli.trace_level.clone(),
        theme: cli.theme.clone(),
    }))
}

const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Browse(_) => "browse",
        Command::Genres { .. } => "genres",
        Command::Ranking { .. } => "ranking",
        Command::Show { .. } => "show",
        Command::Suggest { .. } => "suggest",
        Command::Forum(_) => "forum",
        Command::List(_) => "list",
    }
}

async fn run(cli: &Cli, context: &Context) -> Result<String> {
    let theme = &context.theme;
    let cols = cli.width;

    match &cli.command {
        Command::Browse(args) => {
            let (initial_query, steps) = browse_steps(args)?;
            listing(cli, context, PageKind::Browse, initial_query, steps).await
        }
        Command::Genres { pick } => {
            let steps = match pick {
                Some(genre) => vec![Event::PickGenre(canonical_genre(genre)?)],
                None => Vec::new(),
            };
            listing(cli, context, PageKind::Genres, None, steps).await
        }
        Command::Ranking { filter } => {
            let steps = filter.iter().map(|f| Event::QueryEdited(f.clone())).collect();
            listing(cli, context, PageKind::Ranking, None, steps).await
        }
        Command::Show { id } => {
            let item = context.catalog.fetch_by_id(*id).await;
            Ok(ui::render_detail(*id, item.as_ref(), theme, cols))
        }
        Command::Suggest { query, compact } => suggest(context, query, *compact, cols).await,
        Command::Forum(forum) => run_forum(context, forum, cols),
        Command::List(list) => run_list(context, list, cols).await,
    }
}

/// Maps browse flags to the initial deep-link query and follow-up events.
///
/// With `--reset`, the reset comes first and the query is submitted after it
/// so it survives. Genre names must be on the genre shelf.
fn browse_steps(args: &BrowseArgs) -> Result<(Option<String>, Vec<Event>)> {
    let mut steps = Vec::new();
    let initial_query = if args.reset {
        steps.push(Event::Reset);
        if let Some(query) = &args.query {
            steps.push(Event::QueryEdited(query.clone()));
            steps.push(Event::SubmitSearch);
        }
        None
    } else {
        args.query.clone()
    };

    for genre in &args.genres {
        steps.push(Event::ToggleGenre(canonical_genre(genre)?));
    }
    steps.extend(args.source.map(Event::SetSource));
    steps.extend(args.sort.map(Event::SetSort));
    Ok((initial_query, steps))
}

fn canonical_genre(genre: &str) -> Result<String> {
    GENRES
        .iter()
        .find(|g| g.eq_ignore_ascii_case(genre.trim()))
        .map(|g| (*g).to_string())
        .ok_or_else(|| CatalogError::validation("Unknown genre", format!("Pick one of: {}", GENRES.join(", "))))
}

async fn listing(
    cli: &Cli,
    context: &Context,
    page: PageKind,
    initial_query: Option<String>,
    steps: Vec<Event>,
) -> Result<String> {
    if cli.no_cache {
        drive_listing(context, MemoryKeyValueStore::default(), page, initial_query, steps, cli.width).await
    } else {
        let backend = JsonKeyValueStore::new(context.views_path())?;
        drive_listing(context, backend, page, initial_query, steps, cli.width).await
    }
}

async fn drive_listing<K: KeyValueStore>(
    context: &Context,
    backend: K,
    page: PageKind,
    initial_query: Option<String>,
    steps: Vec<Event>,
    cols: usize,
) -> Result<String> {
    let mut session = context.listing_session(page, backend);
    session.mount(initial_query).await?;
    for event in steps {
        session.dispatch(event).await?;
    }

    tracing::info!(page = page.key_prefix(), shown = session.displayed().len(), "listing rendered");
    Ok(ui::render_listing(session.state(), &context.theme, cols))
}

async fn suggest(context: &Context, query: &str, compact: bool, cols: usize) -> Result<String> {
    let target = if compact { SuggestionBox::Compact } else { SuggestionBox::Full };
    let mut debouncer = context.debouncer(target);
    let mut updates = debouncer.subscribe();
    updates.mark_unchanged();

    debouncer.on_query_changed(query);

    if query.chars().count() >= MIN_QUERY_CHARS {
        let wait = context.config.debounce_window() + SUGGEST_GRACE;
        if tokio::time::timeout(wait, updates.changed()).await.is_err() {
            tracing::warn!(query = %query, "suggestions timed out");
        }
    }

    let suggestions = debouncer.current();
    Ok(ui::render_suggestions(query, &suggestions, &context.theme, cols))
}

fn run_forum(context: &Context, command: &ForumCommand, cols: usize) -> Result<String> {
    let theme = &context.theme;

    match command {
        ForumCommand::List => {
            let store = JsonDocumentStore::open(context.community_path())?;
            let threads = community::list_threads(&store)?;
            Ok(ui::render_threads(&threads, theme, cols))
        }
        ForumCommand::Post {
            identity,
            title,
            content,
            category,
        } => {
            let mut draft = NewThread::new(title.as_str(), content.as_str());
            if let Some(category) = category {
                draft = draft.with_category(category.as_str());
            }

            let mut store = JsonDocumentStore::open(context.community_path())?;
            community::create_thread(&mut store, identity.user().as_ref(), &draft)?;
            Ok(ui::render_notice("Success!", "Your thread has been posted.", theme))
        }
    }
}

async fn run_list(context: &Context, command: &ListCommand, cols: usize) -> Result<String> {
    let theme = &context.theme;

    match command {
        ListCommand::Show { user_id } => {
            let store = JsonDocumentStore::open(context.community_path())?;
            let entries = community::entries(&store, &User::new(user_id.as_str(), None))?;
            Ok(ui::render_reading_list(&entries, theme, cols))
        }
        ListCommand::Set {
            identity,
            item_id,
            status,
        } => {
            let user = identity.user();
            community::reading_list::require_user(user.as_ref())?;

            let item = context
                .catalog
                .fetch_by_id(*item_id)
                .await
                .ok_or(CatalogError::NotFound(*item_id))?;

            let mut store = JsonDocumentStore::open(context.community_path())?;
            let entry = community::set_status(&mut store, user.as_ref(), &item, *status)?;
            Ok(ui::render_notice(
                "List Updated",
                &format!("\"{}\" is now marked as {}.", entry.title, entry.status),
                theme,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("manhwadex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn browse_flags_become_events_in_order() {
        let cli = parse(&["browse", "--genre", "action", "--genre", "Drama", "--source", "webtoon", "--sort", "score"]);
        let Command::Browse(args) = &cli.command else {
            panic!("expected browse");
        };

        let (initial, steps) = browse_steps(args).unwrap();

        assert_eq!(initial, None);
        assert_eq!(
            steps,
            vec![
                Event::ToggleGenre("Action".into()),
                Event::ToggleGenre("Drama".into()),
                Event::SetSource(SourceFilter::Webtoon),
                Event::SetSort(SortKey::Score),
            ]
        );
    }

    #[test]
    fn reset_submits_query_afterwards() {
        let cli = parse(&["browse", "--reset", "--query", "tower"]);
        let Command::Browse(args) = &cli.command else {
            panic!("expected browse");
        };

        let (initial, steps) = browse_steps(args).unwrap();

        assert_eq!(initial, None);
        assert_eq!(steps, vec![Event::Reset, Event::QueryEdited("tower".into()), Event::SubmitSearch]);
    }

    #[test]
    fn query_without_reset_is_a_deep_link() {
        let cli = parse(&["browse", "--query", "solo"]);
        let Command::Browse(args) = &cli.command else {
            panic!("expected browse");
        };
        assert_eq!(browse_steps(args).unwrap().0.as_deref(), Some("solo"));
    }

    #[test]
    fn unknown_browse_genre_is_rejected() {
        let cli = parse(&["browse", "--genre", "Cooking", "--genre", "action"]);
        let Command::Browse(args) = &cli.command else {
            panic!("expected browse");
        };

        let err = browse_steps(args).unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Unknown genre"));
    }

    #[test]
    fn genre_names_are_canonicalized() {
        assert_eq!(canonical_genre(" romance ").unwrap(), "Romance");
        assert!(canonical_genre("Cooking").unwrap_err().is_validation());
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = parse(&["ranking", "--filter", "god", "--no-cache", "--width", "60"]);
        assert!(cli.no_cache);
        assert_eq!(cli.width, 60);
    }

    #[test]
    fn invalid_source_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["manhwadex", "browse", "--source", "manga"]).is_err());
    }

    #[test]
    fn reading_status_parses_from_argument() {
        let cli = parse(&["list", "set", "--user-id", "u1", "11", "plan-to-read"]);
        let Command::List(ListCommand::Set { status, identity, .. }) = cli.command else {
            panic!("expected list set");
        };
        assert_eq!(status, ReadingStatus::PlanToRead);
        assert_eq!(identity.user(), Some(User::new("u1", None)));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
