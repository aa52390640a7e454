//! Argument parsing and command dispatch.

use std::path::PathBuf;

use cinedesk_api_models::{GenreOrdering, MovieOrdering, Role, SortKey, UserOrdering};
use cinedesk_telemetry::{LogFormat, LoggingConfig, command_span, init_logging};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, ConnectionSettings, parse_url};
use crate::commands::auth::{handle_login, handle_logout, handle_profile};
use crate::commands::genres::{
    handle_genre_create, handle_genre_delete, handle_genre_get, handle_genre_list,
    handle_genre_update,
};
use crate::commands::movies::{
    handle_movie_batch_delete, handle_movie_create, handle_movie_delete, handle_movie_get,
    handle_movie_list, handle_movie_update,
};
use crate::commands::users::{
    handle_user_batch_delete, handle_user_create, handle_user_delete, handle_user_get,
    handle_user_list, handle_user_update,
};

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&cli.log_level);

    let request_id = Uuid::new_v4().to_string();
    let _span = command_span(command_label(&cli.command), &request_id);
    let settings = ConnectionSettings {
        api_url: cli.api_url,
        timeout_secs: cli.timeout,
        session_file: cli.session_file,
        request_id,
    };

    let result = match AppContext::connect(&settings) {
        Ok(ctx) => dispatch(&ctx, cli.command, cli.output).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => {
            debug!("command completed");
            0
        }
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn install_logging(level: &str) {
    let config = LoggingConfig {
        level,
        format: LogFormat::from_env(),
        build_sha: option_env!("CINEDESK_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: {err}");
    }
}

pub(crate) async fn dispatch(
    ctx: &AppContext,
    command: Command,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        Command::Login(args) => handle_login(ctx, args).await,
        Command::Logout => handle_logout(ctx).await,
        Command::Profile => handle_profile(ctx, format).await,
        Command::Movies(movies) => match movies {
            MovieCommand::List(args) => handle_movie_list(ctx, args, format).await,
            MovieCommand::Get(args) => handle_movie_get(ctx, args, format).await,
            MovieCommand::Create(args) => handle_movie_create(ctx, args, format).await,
            MovieCommand::Update(args) => handle_movie_update(ctx, args, format).await,
            MovieCommand::Delete(args) => handle_movie_delete(ctx, args).await,
            MovieCommand::BatchDelete(args) => handle_movie_batch_delete(ctx, args, format).await,
        },
        Command::Genres(genres) => match genres {
            GenreCommand::List(args) => handle_genre_list(ctx, args, format).await,
            GenreCommand::Get(args) => handle_genre_get(ctx, args, format).await,
            GenreCommand::Create(args) => handle_genre_create(ctx, args).await,
            GenreCommand::Update(args) => handle_genre_update(ctx, args).await,
            GenreCommand::Delete(args) => handle_genre_delete(ctx, args).await,
        },
        Command::Users(users) => match users {
            UserCommand::List(args) => handle_user_list(ctx, args, format).await,
            UserCommand::Get(args) => handle_user_get(ctx, args, format).await,
            UserCommand::Create(args) => handle_user_create(ctx, args, format).await,
            UserCommand::Update(args) => handle_user_update(ctx, args, format).await,
            UserCommand::Delete(args) => handle_user_delete(ctx, args).await,
            UserCommand::BatchDelete(args) => handle_user_batch_delete(ctx, args, format).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "cinedesk", about = "Administrative CLI for the Cinedesk movie catalogue")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "CINEDESK_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "CINEDESK_HTTP_TIMEOUT_SECS",
        help = "Per-request timeout in seconds (unbounded when unset)"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long,
        global = true,
        env = "CINEDESK_SESSION_FILE",
        help = "Where the signed-in session is stored"
    )]
    pub(crate) session_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "CINEDESK_LOG_LEVEL",
        default_value = DEFAULT_CLI_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sign in and store the session tokens.
    Login(LoginArgs),
    /// Revoke the session and forget the stored tokens.
    Logout,
    /// Show the signed-in account.
    Profile,
    #[command(subcommand)]
    Movies(MovieCommand),
    #[command(subcommand)]
    Genres(GenreCommand),
    #[command(subcommand)]
    Users(UserCommand),
}

#[derive(Subcommand)]
pub(crate) enum MovieCommand {
    List(MovieListArgs),
    Get(MovieIdArgs),
    Create(MovieCreateArgs),
    Update(MovieUpdateArgs),
    Delete(MovieIdArgs),
    BatchDelete(MovieBatchDeleteArgs),
}

#[derive(Subcommand)]
pub(crate) enum GenreCommand {
    List(GenreListArgs),
    Get(GenreIdArgs),
    Create(GenreCreateArgs),
    Update(GenreUpdateArgs),
    Delete(GenreIdArgs),
}

#[derive(Subcommand)]
pub(crate) enum UserCommand {
    List(UserListArgs),
    Get(UserIdArgs),
    Create(UserCreateArgs),
    Update(UserUpdateArgs),
    Delete(UserIdArgs),
    BatchDelete(UserBatchDeleteArgs),
}

#[derive(Args, Default)]
pub(crate) struct LoginArgs {
    #[arg(long, env = "CINEDESK_EMAIL")]
    pub(crate) email: String,
    #[arg(
        long,
        env = "CINEDESK_PASSWORD",
        hide_env_values = true,
        help = "Prompted for when omitted on an interactive terminal"
    )]
    pub(crate) password: Option<String>,
}

#[derive(Args, Default, Clone)]
pub(crate) struct PageArgs {
    #[arg(long, help = "Free-text search")]
    pub(crate) search: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page_size: Option<u32>,
}

#[derive(Args, Default)]
pub(crate) struct MovieListArgs {
    #[command(flatten)]
    pub(crate) paging: PageArgs,
    #[arg(long = "genre", help = "Filter by genre id (repeatable)")]
    pub(crate) genres: Vec<String>,
    #[arg(long, help = "Filter by release date (YYYY-MM-DD)")]
    pub(crate) release_date: Option<String>,
    #[arg(long)]
    pub(crate) active: Option<bool>,
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_ordering::<MovieOrdering>
    )]
    pub(crate) ordering: Option<MovieOrdering>,
}

#[derive(Args)]
pub(crate) struct MovieIdArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) id: String,
}

#[derive(Args, Default)]
pub(crate) struct MovieCreateArgs {
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long)]
    pub(crate) description: String,
    #[arg(long, help = "Running time in minutes")]
    pub(crate) duration: String,
    #[arg(long, help = "Release date (YYYY-MM-DD)")]
    pub(crate) release_date: String,
    #[arg(long, help = "Rating between 0 and 10")]
    pub(crate) rating: Option<String>,
    #[arg(long = "poster")]
    pub(crate) poster_image: Option<String>,
    #[arg(long = "trailer")]
    pub(crate) trailer_url: Option<String>,
    #[arg(long = "genre", help = "Genre id to tag (repeatable)")]
    pub(crate) genres: Vec<String>,
    #[arg(long, help = "Create the movie as not bookable")]
    pub(crate) inactive: bool,
}

#[derive(Args, Default)]
pub(crate) struct MovieUpdateArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) title: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long)]
    pub(crate) duration: Option<String>,
    #[arg(long)]
    pub(crate) release_date: Option<String>,
    #[arg(long)]
    pub(crate) rating: Option<String>,
    #[arg(long = "poster", help = "Poster URL; pass an empty value to clear")]
    pub(crate) poster_image: Option<String>,
    #[arg(long = "trailer", help = "Trailer URL; pass an empty value to clear")]
    pub(crate) trailer_url: Option<String>,
    #[arg(long = "genre", help = "Replace tagged genres (repeatable)")]
    pub(crate) genres: Vec<String>,
    #[arg(long, conflicts_with = "genres", help = "Remove every tagged genre")]
    pub(crate) clear_genres: bool,
    #[arg(long)]
    pub(crate) active: Option<bool>,
}

#[derive(Args, Default)]
pub(crate) struct MovieBatchDeleteArgs {
    #[arg(required = true, num_args = 1.., help = "Movie identifiers")]
    pub(crate) ids: Vec<String>,
}

#[derive(Args, Default)]
pub(crate) struct GenreListArgs {
    #[command(flatten)]
    pub(crate) paging: PageArgs,
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_ordering::<GenreOrdering>
    )]
    pub(crate) ordering: Option<GenreOrdering>,
}

#[derive(Args)]
pub(crate) struct GenreIdArgs {
    #[arg(help = "Genre identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct GenreCreateArgs {
    #[arg(help = "Genre name")]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct GenreUpdateArgs {
    #[arg(help = "Genre identifier")]
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Args, Default)]
pub(crate) struct UserListArgs {
    #[command(flatten)]
    pub(crate) paging: PageArgs,
    #[arg(long, value_parser = parse_role)]
    pub(crate) role: Option<Role>,
    #[arg(long)]
    pub(crate) active: Option<bool>,
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_ordering::<UserOrdering>
    )]
    pub(crate) ordering: Option<UserOrdering>,
}

#[derive(Args)]
pub(crate) struct UserIdArgs {
    #[arg(help = "User identifier")]
    pub(crate) id: u64,
}

#[derive(Args, Default)]
pub(crate) struct UserCreateArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(
        long,
        env = "CINEDESK_NEW_USER_PASSWORD",
        hide_env_values = true,
        help = "Prompted for (twice) when omitted on an interactive terminal"
    )]
    pub(crate) password: Option<String>,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long, help = "Date of birth (YYYY-MM-DD)")]
    pub(crate) date_of_birth: Option<String>,
    #[arg(long, help = "Preferred language (en, es, fr)")]
    pub(crate) language: Option<String>,
    #[arg(long)]
    pub(crate) avatar_url: Option<String>,
    #[arg(long)]
    pub(crate) staff: bool,
    #[arg(long)]
    pub(crate) superuser: bool,
    #[arg(long)]
    pub(crate) inactive: bool,
    #[arg(long)]
    pub(crate) no_notifications: bool,
}

#[derive(Args, Default)]
pub(crate) struct UserUpdateArgs {
    #[arg(help = "User identifier")]
    pub(crate) id: u64,
    #[arg(long)]
    pub(crate) username: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) active: Option<bool>,
    #[arg(long)]
    pub(crate) staff: Option<bool>,
    #[arg(long)]
    pub(crate) superuser: Option<bool>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long, help = "Date of birth (YYYY-MM-DD); pass an empty value to clear")]
    pub(crate) date_of_birth: Option<String>,
    #[arg(long)]
    pub(crate) language: Option<String>,
    #[arg(long)]
    pub(crate) notifications: Option<bool>,
    #[arg(long, help = "Avatar URL; pass an empty value to clear")]
    pub(crate) avatar_url: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct UserBatchDeleteArgs {
    #[arg(required = true, num_args = 1.., help = "User identifiers")]
    pub(crate) ids: Vec<u64>,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_ordering<S: SortKey>(value: &str) -> Result<S, String> {
    S::parse(value.trim()).ok_or_else(|| {
        let accepted: Vec<&str> = S::ALL.iter().map(|key| key.as_str()).collect();
        format!(
            "unknown ordering '{value}' (expected one of: {})",
            accepted.join(", ")
        )
    })
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value.trim())
        .ok_or_else(|| format!("unknown role '{value}' (expected customer or admin)"))
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Profile => "profile",
        Command::Movies(movies) => match movies {
            MovieCommand::List(_) => "movies.list",
            MovieCommand::Get(_) => "movies.get",
            MovieCommand::Create(_) => "movies.create",
            MovieCommand::Update(_) => "movies.update",
            MovieCommand::Delete(_) => "movies.delete",
            MovieCommand::BatchDelete(_) => "movies.batch_delete",
        },
        Command::Genres(genres) => match genres {
            GenreCommand::List(_) => "genres.list",
            GenreCommand::Get(_) => "genres.get",
            GenreCommand::Create(_) => "genres.create",
            GenreCommand::Update(_) => "genres.update",
            GenreCommand::Delete(_) => "genres.delete",
        },
        Command::Users(users) => match users {
            UserCommand::List(_) => "users.list",
            UserCommand::Get(_) => "users.get",
            UserCommand::Create(_) => "users.create",
            UserCommand::Update(_) => "users.update",
            UserCommand::Delete(_) => "users.delete",
            UserCommand::BatchDelete(_) => "users.batch_delete",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use anyhow::{Result, anyhow};
    use cinedesk_client::{ClientConfig, MemorySessionStore};
    use clap::CommandFactory;
    use httpmock::prelude::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::try_parse_from(std::iter::once("cinedesk").chain(args.iter().copied()))
            .map_err(|err| anyhow!(err.to_string()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hyphenated_orderings_parse() -> Result<()> {
        let cli = parse(&["movies", "list", "--ordering", "-rating", "--genre", "a"])?;
        match cli.command {
            Command::Movies(MovieCommand::List(args)) => {
                assert_eq!(args.ordering, Some(MovieOrdering::HighestRated));
                assert_eq!(args.genres, vec!["a".to_string()]);
            }
            _ => return Err(anyhow!("unexpected command")),
        }
        assert!(parse(&["genres", "list", "--ordering", "popularity"]).is_err());
        Ok(())
    }

    #[test]
    fn format_alias_selects_json() -> Result<()> {
        let cli = parse(&["--format", "json", "profile"])?;
        assert!(matches!(cli.output, OutputFormat::Json));
        Ok(())
    }

    #[test]
    fn page_must_be_positive() {
        assert!(parse(&["users", "list", "--page", "0"]).is_err());
        assert!(parse(&["users", "list", "--role", "owner"]).is_err());
    }

    #[test]
    fn command_label_matches_variants() -> Result<()> {
        assert_eq!(command_label(&parse(&["logout"])?.command), "logout");
        assert_eq!(
            command_label(&parse(&["movies", "batch-delete", "a", "b"])?.command),
            "movies.batch_delete"
        );
        assert_eq!(
            command_label(&parse(&["users", "get", "4"])?.command),
            "users.get"
        );
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_routes_to_handler() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/movies/genres/g1/delete/");
            then.status(200).json_body(json!({"message": "Genre deleted"}));
        });
        let ctx = AppContext::with_session(
            ClientConfig::new(&server.base_url())?,
            Arc::new(MemorySessionStore::with_access_token("tok")),
        )
        .map_err(|err| anyhow!(err.display_message()))?;

        let cli = parse(&["genres", "delete", "g1"])?;
        dispatch(&ctx, cli.command, cli.output)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }
}
