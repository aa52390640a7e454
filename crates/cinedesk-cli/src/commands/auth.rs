use cinedesk_api_models::{LoginRequest, login_error_message, validation};

use crate::cli::{LoginArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::read_secret;
use crate::output::render_profile;

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let password = read_secret(args.password, "Password: ")?.unwrap_or_default();
    validation::login_credentials(&args.email, &password).map_err(CliError::validation)?;

    let request = LoginRequest {
        email: args.email.trim().to_string(),
        password,
    };
    match ctx.auth.login(&request).await {
        Ok(response) => {
            println!(
                "Login successful! Signed in as {}",
                response.user.display_name()
            );
            Ok(())
        }
        Err(err) if err.is_rejection() => {
            Err(CliError::validation(login_error_message(&err.server_body())))
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    ctx.auth.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub(crate) async fn handle_profile(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    ctx.require_session()?;
    let profile = ctx.auth.profile().await?;
    render_profile(&profile, format)
}
