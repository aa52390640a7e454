use cinedesk_api_models::{
    CreateMovieRequest, FieldErrors, MovieFilters, UpdateMovieRequest, validation,
};

use crate::cli::{
    MovieBatchDeleteArgs, MovieCreateArgs, MovieIdArgs, MovieListArgs, MovieUpdateArgs,
    OutputFormat,
};
use crate::client::{AppContext, CliError, CliResult, stored};
use crate::commands::{apply_paging, page_window};
use crate::output::{print_json, render_movie, render_movie_batch, render_movie_page};

pub(crate) async fn handle_movie_list(
    ctx: &AppContext,
    args: MovieListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let filters = build_filters(args)?;
    let page = stored(ctx.movies.list(&filters).await?)?;
    render_movie_page(&page, page_window(&filters), format)
}

pub(crate) async fn handle_movie_get(
    ctx: &AppContext,
    args: MovieIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let movie = ctx
        .movies
        .get(args.id.trim())
        .await?
        .ok_or_else(|| CliError::validation("movie id must not be empty"))?;
    render_movie(&movie, format)
}

pub(crate) async fn handle_movie_create(
    ctx: &AppContext,
    args: MovieCreateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let request = build_create_request(args)?;
    let movie = ctx.movies.create(&request).await?;
    match format {
        OutputFormat::Json => print_json(&movie),
        OutputFormat::Table => {
            println!("\"{}\" has been created successfully (id: {})", movie.title, movie.id);
            Ok(())
        }
    }
}

pub(crate) async fn handle_movie_update(
    ctx: &AppContext,
    args: MovieUpdateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let id = args.id.trim().to_string();
    if id.is_empty() {
        return Err(CliError::validation("movie id must not be empty"));
    }
    let request = build_update_request(&args)?;
    let current = ctx
        .movies
        .get(&id)
        .await?
        .ok_or_else(|| CliError::validation("movie id must not be empty"))?;
    let request = request.without_unchanged(&current);
    if request.is_empty() {
        return Err(CliError::validation("No changes to save"));
    }

    let movie = ctx.movies.update(&id, &request).await?;
    match format {
        OutputFormat::Json => print_json(&movie),
        OutputFormat::Table => {
            println!("\"{}\" has been updated successfully", movie.title);
            Ok(())
        }
    }
}

pub(crate) async fn handle_movie_delete(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    ctx.require_session()?;
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::validation("movie id must not be empty"));
    }
    let response = ctx.movies.delete(id).await?;
    if response.message.is_empty() {
        println!("Movie {id} has been deleted successfully");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

pub(crate) async fn handle_movie_batch_delete(
    ctx: &AppContext,
    args: MovieBatchDeleteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut ids: Vec<String> = Vec::with_capacity(args.ids.len());
    for id in args.ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    if ids.is_empty() {
        return Err(CliError::validation("at least one movie id is required"));
    }
    let response = ctx.movies.batch_delete(&ids).await?;
    render_movie_batch(&response, format)
}

fn build_filters(args: MovieListArgs) -> CliResult<MovieFilters> {
    let release_date = args
        .release_date
        .as_deref()
        .map(validation::release_date)
        .transpose()
        .map_err(CliError::validation)?;
    let mut filters = MovieFilters {
        genres: args.genres,
        release_date,
        is_active: args.active,
        ordering: args.ordering,
        ..MovieFilters::default()
    };
    apply_paging(&mut filters, args.paging);
    Ok(filters)
}

fn build_create_request(args: MovieCreateArgs) -> CliResult<CreateMovieRequest> {
    let mut errors = FieldErrors::new();
    let title = errors.check("title", validation::title(&args.title));
    let description = errors.check("description", validation::description(&args.description));
    let duration = errors.check("duration", validation::duration(&args.duration));
    let release_date = errors.check(
        "release_date",
        validation::release_date(&args.release_date),
    );
    let rating = errors.check(
        "rating",
        validation::rating(args.rating.as_deref().unwrap_or_default()),
    );
    let poster_image = errors.check(
        "poster_image",
        validation::optional_url(args.poster_image.as_deref().unwrap_or_default()),
    );
    let trailer_url = errors.check(
        "trailer_url",
        validation::optional_url(args.trailer_url.as_deref().unwrap_or_default()),
    );
    let genre_ids = args.genres;
    let is_active = !args.inactive;

    let request = errors.finish(|| {
        Some(CreateMovieRequest {
            title: title?,
            description: description?,
            duration: duration?,
            release_date: release_date?,
            rating: rating?,
            poster_image: poster_image.filter(|url| !url.is_empty()),
            trailer_url: trailer_url.filter(|url| !url.is_empty()),
            genre_ids,
            is_active: Some(is_active),
        })
    })?;
    Ok(request)
}

fn build_update_request(args: &MovieUpdateArgs) -> CliResult<UpdateMovieRequest> {
    let mut errors = FieldErrors::new();
    let mut request = UpdateMovieRequest::default();
    if let Some(raw) = &args.title {
        request.title = errors.check("title", validation::title(raw));
    }
    if let Some(raw) = &args.description {
        request.description = errors.check("description", validation::description(raw));
    }
    if let Some(raw) = &args.duration {
        request.duration = errors.check("duration", validation::duration(raw));
    }
    if let Some(raw) = &args.release_date {
        request.release_date = errors.check("release_date", validation::release_date(raw));
    }
    if let Some(raw) = &args.rating {
        request.rating = errors.check("rating", validation::rating(raw)).flatten();
    }
    if let Some(raw) = &args.poster_image {
        request.poster_image = errors.check("poster_image", validation::optional_url(raw));
    }
    if let Some(raw) = &args.trailer_url {
        request.trailer_url = errors.check("trailer_url", validation::optional_url(raw));
    }
    if args.clear_genres {
        request.genre_ids = Some(Vec::new());
    } else if !args.genres.is_empty() {
        request.genre_ids = Some(args.genres.clone());
    }
    request.is_active = args.active;

    if !errors.is_empty() {
        return Err(errors.into());
    }
    if request.is_empty() {
        return Err(CliError::validation("No changes to save"));
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cinedesk_client::{ClientConfig, MemorySessionStore};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::cli::PageArgs;

    fn context_with(server: &MockServer) -> AppContext {
        let config = ClientConfig::new(&server.base_url()).expect("valid URL");
        AppContext::with_session(config, Arc::new(MemorySessionStore::with_access_token("tok")))
            .expect("context")
    }

    fn movie_json(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id, "title": title, "description": "d", "duration": 170,
            "duration_formatted": "2h 50m", "release_date": "1995-12-15",
            "rating": "8.30", "poster_image": "", "trailer_url": null,
            "genres": [{"id": "g1", "name": "Crime"}], "is_active": true
        })
    }

    fn create_args() -> MovieCreateArgs {
        MovieCreateArgs {
            title: "Heat".into(),
            description: "LA heist".into(),
            duration: "170".into(),
            release_date: "1995-12-15".into(),
            rating: Some("8.3".into()),
            genres: vec!["g1".into()],
            ..MovieCreateArgs::default()
        }
    }

    #[tokio::test]
    async fn movie_list_sends_filters_in_order() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movies/")
                .query_param("genres", "g1")
                .query_param("search", "heat")
                .query_param("is_active", "true")
                .query_param("ordering", "-rating")
                .query_param("page_size", "10")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(json!({
                "count": 1, "next": null, "previous": null,
                "results": [movie_json("m1", "Heat")]
            }));
        });

        let ctx = context_with(&server);
        let args = MovieListArgs {
            paging: PageArgs {
                search: Some("heat".into()),
                ..PageArgs::default()
            },
            genres: vec!["g1".into()],
            active: Some(true),
            ordering: Some(cinedesk_api_models::MovieOrdering::HighestRated),
            ..MovieListArgs::default()
        };
        handle_movie_list(&ctx, args, OutputFormat::Json)
            .await
            .expect("list should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn movie_create_posts_validated_payload() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/movies/create/").json_body(json!({
                "title": "Heat",
                "description": "LA heist",
                "duration": 170,
                "release_date": "1995-12-15",
                "rating": 8.3,
                "genre_ids": ["g1"],
                "is_active": true
            }));
            then.status(201).json_body(movie_json("m1", "Heat"));
        });

        let ctx = context_with(&server);
        handle_movie_create(&ctx, create_args(), OutputFormat::Table)
            .await
            .expect("create should succeed");
        mock.assert();
    }

    #[test]
    fn invalid_create_reports_every_field() {
        let args = MovieCreateArgs {
            title: String::new(),
            duration: "0".into(),
            poster_image: Some("not a url".into()),
            ..create_args()
        };
        let err = build_create_request(args).expect_err("invalid input");
        assert_eq!(
            err.display_message(),
            "duration: Duration must be at least 1 minute; poster_image: Must be a valid URL; \
             title: Title is required"
        );
    }

    #[tokio::test]
    async fn movie_update_without_changes_skips_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/movies/m1/update/");
            then.status(200).json_body(movie_json("m1", "Heat"));
        });

        let ctx = context_with(&server);
        let args = MovieUpdateArgs {
            id: "m1".into(),
            ..MovieUpdateArgs::default()
        };
        let err = handle_movie_update(&ctx, args, OutputFormat::Table)
            .await
            .expect_err("nothing to change");
        assert_eq!(err.display_message(), "No changes to save");
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn movie_update_sends_only_changed_fields() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movies/m1/");
            then.status(200).json_body(movie_json("m1", "Heat"));
        });
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/movies/m1/update/")
                .json_body(json!({"genre_ids": [], "is_active": false}));
            then.status(200).json_body(movie_json("m1", "Heat"));
        });

        let ctx = context_with(&server);
        let args = MovieUpdateArgs {
            id: "m1".into(),
            title: Some("Heat".into()),
            rating: Some("8.3".into()),
            trailer_url: Some(String::new()),
            clear_genres: true,
            active: Some(false),
            ..MovieUpdateArgs::default()
        };
        handle_movie_update(&ctx, args, OutputFormat::Table)
            .await
            .expect("update should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn movie_batch_delete_deduplicates_ids() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/movies/batch-delete/")
                .json_body(json!({"movie_ids": ["m1", "m2"]}));
            then.status(200).json_body(json!({
                "message": "2 movies deleted", "deleted_count": 2,
                "deleted_movies": ["m1", "m2"]
            }));
        });

        let ctx = context_with(&server);
        let args = MovieBatchDeleteArgs {
            ids: vec!["m1".into(), " m2 ".into(), "m1".into()],
        };
        handle_movie_batch_delete(&ctx, args, OutputFormat::Table)
            .await
            .expect("batch delete should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn missing_movie_is_reported_with_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/movies/m9/delete/");
            then.status(404).json_body(json!({"detail": "Not found."}));
        });

        let ctx = context_with(&server);
        let err = handle_movie_delete(&ctx, MovieIdArgs { id: "m9".into() })
            .await
            .expect_err("missing movie");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "Not found. (status 404)");
    }
}
