use anyhow::anyhow;
use cinedesk_api_models::{CreateGenreRequest, GenreFilters, UpdateGenreRequest, validation};
use cinedesk_client::ClientError;

use crate::cli::{GenreCreateArgs, GenreIdArgs, GenreListArgs, GenreUpdateArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, classify_client_error, stored};
use crate::commands::{apply_paging, page_window};
use crate::output::{render_genre, render_genre_page};

pub(crate) async fn handle_genre_list(
    ctx: &AppContext,
    args: GenreListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut filters = GenreFilters {
        ordering: args.ordering,
        ..GenreFilters::default()
    };
    apply_paging(&mut filters, args.paging);
    let page = stored(ctx.genres.list(&filters).await?)?;
    render_genre_page(&page, page_window(&filters), format)
}

pub(crate) async fn handle_genre_get(
    ctx: &AppContext,
    args: GenreIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let genre = ctx
        .genres
        .get(args.id.trim())
        .await?
        .ok_or_else(|| CliError::validation("genre id must not be empty"))?;
    render_genre(&genre, format)
}

pub(crate) async fn handle_genre_create(ctx: &AppContext, args: GenreCreateArgs) -> CliResult<()> {
    ctx.require_session()?;
    let name = validation::genre_name(&args.name).map_err(CliError::validation)?;
    let genre = ctx
        .genres
        .create(&CreateGenreRequest { name })
        .await
        .map_err(|err| genre_failure("create", err))?;
    println!("\"{}\" has been created successfully (id: {})", genre.name, genre.id);
    Ok(())
}

pub(crate) async fn handle_genre_update(ctx: &AppContext, args: GenreUpdateArgs) -> CliResult<()> {
    ctx.require_session()?;
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::validation("genre id must not be empty"));
    }
    let name = validation::genre_name(&args.name).map_err(CliError::validation)?;
    let mut request = UpdateGenreRequest { name: Some(name) };
    if let Some(current) = ctx.genres.get(id).await? {
        request = request.without_unchanged(&current.name);
    }
    if request.is_empty() {
        return Err(CliError::validation("No changes to save"));
    }

    let genre = ctx
        .genres
        .update(id, &request)
        .await
        .map_err(|err| genre_failure("update", err))?;
    println!("\"{}\" has been updated successfully", genre.name);
    Ok(())
}

pub(crate) async fn handle_genre_delete(ctx: &AppContext, args: GenreIdArgs) -> CliResult<()> {
    ctx.require_session()?;
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::validation("genre id must not be empty"));
    }
    let response = ctx.genres.delete(id).await?;
    if response.message.is_empty() {
        println!("Genre {id} has been deleted successfully");
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

/// Surface the server's `name` message when a genre write is rejected.
fn genre_failure(action: &str, err: ClientError) -> CliError {
    if err.is_rejection()
        && let Some(message) = err.server_body().field_message("name")
    {
        return CliError::validation(format!("Failed to {action} genre: {message}"));
    }
    match classify_client_error(err) {
        CliError::Validation(_) => {
            CliError::validation(format!("Failed to {action} genre. Please try again."))
        }
        CliError::Failure(error) => {
            CliError::failure(anyhow!("failed to {action} genre: {error:#}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cinedesk_api_models::GenreOrdering;
    use cinedesk_client::{ClientConfig, MemorySessionStore};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::cli::PageArgs;

    fn context_with(server: &MockServer) -> AppContext {
        let config = ClientConfig::new(&server.base_url()).expect("valid URL");
        AppContext::with_session(config, Arc::new(MemorySessionStore::with_access_token("tok")))
            .expect("context")
    }

    #[tokio::test]
    async fn genre_list_uses_backend_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movies/genres/")
                .query_param("search", "dra")
                .query_param("ordering", "-movies_count")
                .query_param("page", "2")
                .query_param("page_size", "20");
            then.status(200).json_body(json!({
                "count": 21, "next": null, "previous": "http://x/?page=1",
                "results": [{"id": "g1", "name": "Drama", "movies_count": 4,
                             "created_at": "2024-01-01T00:00:00Z", "updated_at": ""}]
            }));
        });

        let ctx = context_with(&server);
        let args = GenreListArgs {
            paging: PageArgs {
                search: Some("dra".into()),
                page: Some(2),
                page_size: Some(20),
            },
            ordering: Some(GenreOrdering::MostMovies),
        };
        handle_genre_list(&ctx, args, OutputFormat::Table)
            .await
            .expect("list should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn blank_genre_name_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/movies/genres/create/");
            then.status(201);
        });

        let ctx = context_with(&server);
        let err = handle_genre_create(&ctx, GenreCreateArgs { name: "  ".into() })
            .await
            .expect_err("blank name");
        assert_eq!(err.display_message(), "Genre name is required");
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn duplicate_genre_reports_name_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/movies/genres/create/")
                .json_body(json!({"name": "Drama"}));
            then.status(400)
                .json_body(json!({"name": ["genre with this name already exists."]}));
        });

        let ctx = context_with(&server);
        let err = handle_genre_create(&ctx, GenreCreateArgs { name: " Drama ".into() })
            .await
            .expect_err("duplicate");
        assert_eq!(
            err.display_message(),
            "Failed to create genre: genre with this name already exists."
        );
    }

    #[tokio::test]
    async fn unchanged_genre_name_skips_update() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movies/genres/g1/");
            then.status(200).json_body(json!({"id": "g1", "name": "Drama"}));
        });
        let patch = server.mock(|when, then| {
            when.method(PATCH).path("/movies/genres/g1/update/");
            then.status(200).json_body(json!({"id": "g1", "name": "Drama"}));
        });

        let ctx = context_with(&server);
        let args = GenreUpdateArgs {
            id: "g1".into(),
            name: "Drama".into(),
        };
        let err = handle_genre_update(&ctx, args)
            .await
            .expect_err("no change");
        assert_eq!(err.display_message(), "No changes to save");
        patch.assert_hits(0);
    }

    #[tokio::test]
    async fn renamed_genre_is_patched() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/movies/genres/g1/");
            then.status(200).json_body(json!({"id": "g1", "name": "Drama"}));
        });
        let patch = server.mock(|when, then| {
            when.method(PATCH)
                .path("/movies/genres/g1/update/")
                .json_body(json!({"name": "Melodrama"}));
            then.status(200).json_body(json!({"id": "g1", "name": "Melodrama"}));
        });

        let ctx = context_with(&server);
        let args = GenreUpdateArgs {
            id: "g1".into(),
            name: "Melodrama".into(),
        };
        handle_genre_update(&ctx, args)
            .await
            .expect("update should succeed");
        patch.assert();
    }
}
