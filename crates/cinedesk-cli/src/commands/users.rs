use anyhow::anyhow;
use cinedesk_api_models::{
    CreateUserRequest, FieldErrors, UpdateUserRequest, UserFilters, validation,
};

use crate::cli::{
    OutputFormat, UserBatchDeleteArgs, UserCreateArgs, UserIdArgs, UserListArgs, UserUpdateArgs,
};
use crate::client::{AppContext, CliError, CliResult, stored};
use crate::commands::{apply_paging, page_window, read_secret};
use crate::output::{print_json, render_user, render_user_batch, render_user_page};

pub(crate) async fn handle_user_list(
    ctx: &AppContext,
    args: UserListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut filters = UserFilters {
        role: args.role,
        is_active: args.active,
        ordering: args.ordering,
        ..UserFilters::default()
    };
    apply_paging(&mut filters, args.paging);
    let page = stored(ctx.users.list(&filters).await?)?;
    render_user_page(&page, page_window(&filters), format)
}

pub(crate) async fn handle_user_get(
    ctx: &AppContext,
    args: UserIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let user = ctx
        .users
        .get(args.id)
        .await?
        .ok_or_else(|| CliError::validation("user id must be greater than zero"))?;
    render_user(&user, format)
}

pub(crate) async fn handle_user_create(
    ctx: &AppContext,
    args: UserCreateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let prompted = args.password.is_none();
    let password = read_secret(args.password.clone(), "New password: ")?.unwrap_or_default();
    let confirm = if prompted && !password.is_empty() {
        read_secret(None, "Confirm password: ")?.unwrap_or_default()
    } else {
        password.clone()
    };
    let request = build_create_request(args, &password, &confirm)?;
    let user = ctx.users.create(&request).await?;
    match format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Table => {
            println!(
                "\"{}\" has been created successfully (id: {})",
                user.username, user.id
            );
            Ok(())
        }
    }
}

pub(crate) async fn handle_user_update(
    ctx: &AppContext,
    args: UserUpdateArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let request = build_update_request(&args)?;
    let current = ctx
        .users
        .get(args.id)
        .await?
        .ok_or_else(|| CliError::validation("user id must be greater than zero"))?;
    let request = request.without_unchanged(&current);
    if request.is_empty() {
        return Err(CliError::validation("No changes to save"));
    }

    let user = ctx.users.update(args.id, &request).await?;
    match format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Table => {
            println!("\"{}\" has been updated successfully", user.username);
            Ok(())
        }
    }
}

pub(crate) async fn handle_user_delete(ctx: &AppContext, args: UserIdArgs) -> CliResult<()> {
    ctx.require_session()?;
    if args.id == 0 {
        return Err(CliError::validation("user id must be greater than zero"));
    }
    let response = ctx.users.delete(args.id).await.map_err(|err| {
        if err.status().is_some() {
            CliError::failure(anyhow!("Failed to delete user. Please try again."))
        } else {
            err.into()
        }
    })?;
    if response.message.is_empty() {
        println!("User {} has been deleted successfully", args.id);
    } else {
        println!("{}", response.message);
    }
    Ok(())
}

pub(crate) async fn handle_user_batch_delete(
    ctx: &AppContext,
    args: UserBatchDeleteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_session()?;
    let mut ids: Vec<u64> = Vec::with_capacity(args.ids.len());
    for id in args.ids.into_iter().filter(|id| *id > 0) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(CliError::validation("at least one user id is required"));
    }
    let response = ctx.users.batch_delete(&ids).await?;
    render_user_batch(&response, format)
}

fn build_create_request(
    args: UserCreateArgs,
    password: &str,
    confirm: &str,
) -> CliResult<CreateUserRequest> {
    let mut errors = FieldErrors::new();
    let username = errors.check("username", validation::username(&args.username));
    let email = errors.check("email", validation::email(&args.email));
    let password = errors.check("password", validation::password(password));
    let password_confirm = password
        .as_deref()
        .and_then(|password| {
            errors.check(
                "password_confirm",
                validation::password_confirm(password, confirm),
            )
        });
    let first_name = args
        .first_name
        .as_deref()
        .and_then(|raw| errors.check("first_name", validation::first_name(raw)));
    let last_name = args
        .last_name
        .as_deref()
        .and_then(|raw| errors.check("last_name", validation::last_name(raw)));
    let date_of_birth = args
        .date_of_birth
        .as_deref()
        .and_then(|raw| errors.check("date_of_birth", validation::optional_date(raw)));
    let preferred_language = args
        .language
        .as_deref()
        .and_then(|raw| errors.check("preferred_language", validation::language(raw)));
    let avatar_url = args
        .avatar_url
        .as_deref()
        .and_then(|raw| errors.check("avatar_url", validation::optional_url(raw)));

    let request = errors.finish(|| {
        Some(CreateUserRequest {
            username: username?,
            email: email?,
            password: password?,
            password_confirm: password_confirm?,
            first_name: first_name.filter(|name| !name.is_empty()),
            last_name: last_name.filter(|name| !name.is_empty()),
            is_active: Some(!args.inactive),
            is_staff: Some(args.staff),
            is_superuser: Some(args.superuser),
            phone_number: args
                .phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            date_of_birth: date_of_birth.filter(|date| !date.is_empty()),
            preferred_language,
            receive_booking_notifications: Some(!args.no_notifications),
            avatar_url: avatar_url.filter(|url| !url.is_empty()),
        })
    })?;
    Ok(request)
}

fn build_update_request(args: &UserUpdateArgs) -> CliResult<UpdateUserRequest> {
    if args.id == 0 {
        return Err(CliError::validation("user id must be greater than zero"));
    }
    let mut errors = FieldErrors::new();
    let mut request = UpdateUserRequest::default();
    if let Some(raw) = &args.username {
        request.username = errors.check("username", validation::username(raw));
    }
    if let Some(raw) = &args.email {
        request.email = errors.check("email", validation::email(raw));
    }
    if let Some(raw) = &args.first_name {
        request.first_name = errors.check("first_name", validation::first_name(raw));
    }
    if let Some(raw) = &args.last_name {
        request.last_name = errors.check("last_name", validation::last_name(raw));
    }
    if let Some(raw) = &args.date_of_birth {
        request.date_of_birth = errors.check("date_of_birth", validation::optional_date(raw));
    }
    if let Some(raw) = &args.language {
        request.preferred_language = errors.check("preferred_language", validation::language(raw));
    }
    if let Some(raw) = &args.avatar_url {
        request.avatar_url = errors.check("avatar_url", validation::optional_url(raw));
    }
    request.phone_number = args.phone.as_ref().map(|phone| phone.trim().to_string());
    request.is_active = args.active;
    request.is_staff = args.staff;
    request.is_superuser = args.superuser;
    request.receive_booking_notifications = args.notifications;

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

    use cinedesk_api_models::{Language, Role};
    use cinedesk_client::{ClientConfig, MemorySessionStore};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::cli::PageArgs;

    fn context_with(server: &MockServer) -> AppContext {
        let config = ClientConfig::new(&server.base_url()).expect("valid URL");
        AppContext::with_session(config, Arc::new(MemorySessionStore::with_access_token("tok")))
            .expect("context")
    }

    fn user_json(id: u64, username: &str) -> serde_json::Value {
        json!({
            "id": id, "username": username, "email": format!("{username}@example.com"),
            "first_name": "Ada", "last_name": "", "is_active": true, "is_staff": false,
            "is_superuser": false, "date_joined": "2024-01-01T00:00:00Z", "last_login": null,
            "role": "customer", "is_admin": false,
            "customer_profile": {
                "id": "p1", "phone_number": "", "date_of_birth": null,
                "preferred_language": "en", "receive_booking_notifications": true,
                "loyalty_points": 0, "avatar_url": null, "created_at": "", "updated_at": "",
                "full_name": "Ada"
            }
        })
    }

    fn create_args() -> UserCreateArgs {
        UserCreateArgs {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: Some("correct horse".into()),
            language: Some("fr".into()),
            ..UserCreateArgs::default()
        }
    }

    #[tokio::test]
    async fn user_list_filters_by_role() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/auth/admin/users/")
                .query_param("role", "admin")
                .query_param("is_active", "true")
                .query_param("page_size", "10");
            then.status(200).json_body(json!({
                "count": 1, "next": null, "previous": null,
                "results": [user_json(7, "ada")]
            }));
        });

        let ctx = context_with(&server);
        let args = UserListArgs {
            paging: PageArgs::default(),
            role: Some(Role::Admin),
            active: Some(true),
            ordering: None,
        };
        handle_user_list(&ctx, args, OutputFormat::Table)
            .await
            .expect("list should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn user_create_registers_account() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/auth/register/").json_body(json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": "correct horse",
                "password_confirm": "correct horse",
                "is_active": true,
                "is_staff": false,
                "is_superuser": false,
                "preferred_language": "fr",
                "receive_booking_notifications": true
            }));
            then.status(201).json_body(user_json(8, "ada"));
        });

        let ctx = context_with(&server);
        handle_user_create(&ctx, create_args(), OutputFormat::Table)
            .await
            .expect("create should succeed");
        mock.assert();
    }

    #[test]
    fn create_rejects_short_password_and_bad_language() {
        let args = UserCreateArgs {
            email: "ada@".into(),
            language: Some("de".into()),
            ..create_args()
        };
        let err = build_create_request(args, "short", "short").expect_err("invalid");
        assert_eq!(
            err.display_message(),
            "email: Must be a valid email address; password: Password must be at least 8 \
             characters; preferred_language: Language must be one of en, es, fr"
        );
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let err = build_create_request(create_args(), "correct horse", "correct hose")
            .expect_err("mismatch");
        assert_eq!(
            err.display_message(),
            "password_confirm: Passwords do not match"
        );
    }

    #[tokio::test]
    async fn user_update_sends_only_changed_fields() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/auth/admin/users/7/");
            then.status(200).json_body(user_json(7, "ada"));
        });
        let patch = server.mock(|when, then| {
            when.method(PATCH)
                .path("/auth/admin/users/7/")
                .json_body(json!({"is_staff": true, "preferred_language": "es"}));
            then.status(200).json_body(user_json(7, "ada"));
        });

        let ctx = context_with(&server);
        let args = UserUpdateArgs {
            id: 7,
            first_name: Some("Ada".into()),
            staff: Some(true),
            language: Some("es".into()),
            notifications: Some(true),
            ..UserUpdateArgs::default()
        };
        handle_user_update(&ctx, args, OutputFormat::Table)
            .await
            .expect("update should succeed");
        patch.assert();
    }

    #[tokio::test]
    async fn user_update_matching_server_skips_patch() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/auth/admin/users/7/");
            then.status(200).json_body(user_json(7, "ada"));
        });
        let patch = server.mock(|when, then| {
            when.method(PATCH).path("/auth/admin/users/7/");
            then.status(200).json_body(user_json(7, "ada"));
        });

        let ctx = context_with(&server);
        let args = UserUpdateArgs {
            id: 7,
            username: Some(" ada ".into()),
            phone: Some(String::new()),
            ..UserUpdateArgs::default()
        };
        let err = handle_user_update(&ctx, args, OutputFormat::Table)
            .await
            .expect_err("no change");
        assert_eq!(err.display_message(), "No changes to save");
        patch.assert_hits(0);
    }

    #[tokio::test]
    async fn failed_delete_uses_friendly_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/auth/admin/users/7/");
            then.status(500);
        });

        let ctx = context_with(&server);
        let err = handle_user_delete(&ctx, UserIdArgs { id: 7 })
            .await
            .expect_err("server error");
        assert_eq!(err.display_message(), "Failed to delete user. Please try again.");
    }

    #[tokio::test]
    async fn batch_delete_skips_zero_and_duplicates() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/admin/users/batch-delete/")
                .json_body(json!({"user_ids": [3, 5]}));
            then.status(200).json_body(json!({
                "message": "2 users deleted", "deleted_count": 2, "deleted_users": [3, 5]
            }));
        });

        let ctx = context_with(&server);
        let args = UserBatchDeleteArgs {
            ids: vec![3, 0, 5, 3],
        };
        handle_user_batch_delete(&ctx, args, OutputFormat::Json)
            .await
            .expect("batch delete should succeed");
        mock.assert();
    }

    #[test]
    fn language_flag_maps_to_wire_value() {
        let args = UserUpdateArgs {
            id: 1,
            language: Some("es".into()),
            ..UserUpdateArgs::default()
        };
        let request = build_update_request(&args).expect("valid");
        assert_eq!(request.preferred_language, Some(Language::Es));
    }
}
