//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use cinedesk_api_models::{
    BatchDeleteMoviesResponse, BatchDeleteUsersResponse, GenreDetail, Movie, Page,
    ProfileResponse, User,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Page position shown under list tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_movie_page(
    page: &Page<Movie>,
    window: PageWindow,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            println!(
                "{:<36} {:<32} {:<10} {:>6} {:>8} {:<6} GENRES",
                "ID", "TITLE", "RELEASED", "RATING", "DURATION", "ACTIVE"
            );
            for movie in &page.results {
                println!(
                    "{:<36} {:<32} {:<10} {:>6} {:>8} {:<6} {}",
                    movie.id,
                    truncate(&movie.title, 32),
                    movie.release_date,
                    format_rating(&movie.rating),
                    format_duration(movie),
                    yes_no(movie.is_active),
                    genre_names(movie)
                );
            }
            print_page_footer(page, window);
        }
    }
    Ok(())
}

pub(crate) fn render_movie(movie: &Movie, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(movie)?,
        OutputFormat::Table => {
            println!("id: {}", movie.id);
            println!("title: {}", movie.title);
            println!("released: {}", movie.release_date);
            println!("duration: {}", format_duration(movie));
            println!("rating: {}", format_rating(&movie.rating));
            println!("active: {}", yes_no(movie.is_active));
            if !movie.genres.is_empty() {
                println!("genres: {}", genre_names(movie));
            }
            if !movie.poster_image.is_empty() {
                println!("poster: {}", movie.poster_image);
            }
            if let Some(trailer) = movie.trailer_url.as_deref().filter(|url| !url.is_empty()) {
                println!("trailer: {trailer}");
            }
            if !movie.description.is_empty() {
                println!("description: {}", movie.description);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_genre_page(
    page: &Page<GenreDetail>,
    window: PageWindow,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            println!("{:<36} {:<24} {:>6} CREATED", "ID", "NAME", "MOVIES");
            for genre in &page.results {
                println!(
                    "{:<36} {:<24} {:>6} {}",
                    genre.id,
                    truncate(&genre.name, 24),
                    genre.movies_count,
                    format_timestamp(&genre.created_at)
                );
            }
            print_page_footer(page, window);
        }
    }
    Ok(())
}

pub(crate) fn render_genre(genre: &GenreDetail, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(genre)?,
        OutputFormat::Table => {
            println!("id: {}", genre.id);
            println!("name: {}", genre.name);
            println!("movies: {}", genre.movies_count);
            println!("created: {}", format_timestamp(&genre.created_at));
            println!("updated: {}", format_timestamp(&genre.updated_at));
        }
    }
    Ok(())
}

pub(crate) fn render_user_page(
    page: &Page<User>,
    window: PageWindow,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            println!(
                "{:>6} {:<20} {:<32} {:<8} {:<6} JOINED",
                "ID", "USERNAME", "EMAIL", "ROLE", "ACTIVE"
            );
            for user in &page.results {
                println!(
                    "{:>6} {:<20} {:<32} {:<8} {:<6} {}",
                    user.id,
                    truncate(&user.username, 20),
                    truncate(&user.email, 32),
                    user.role.as_str(),
                    yes_no(user.is_active),
                    format_timestamp(&user.date_joined)
                );
            }
            print_page_footer(page, window);
        }
    }
    Ok(())
}

pub(crate) fn render_user(user: &User, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(user)?,
        OutputFormat::Table => {
            println!("id: {}", user.id);
            println!("username: {}", user.username);
            println!("name: {}", user.display_name());
            println!("email: {}", user.email);
            println!("role: {}", user.role);
            println!(
                "flags: active={} staff={} superuser={}",
                yes_no(user.is_active),
                yes_no(user.is_staff),
                yes_no(user.is_superuser)
            );
            println!("joined: {}", format_timestamp(&user.date_joined));
            if let Some(last_login) = &user.last_login {
                println!("last login: {}", format_timestamp(last_login));
            }
            if let Some(profile) = &user.customer_profile {
                if !profile.phone_number.is_empty() {
                    println!("phone: {}", profile.phone_number);
                }
                if let Some(date_of_birth) = &profile.date_of_birth {
                    println!("born: {date_of_birth}");
                }
                println!("language: {}", profile.preferred_language.label());
                println!(
                    "booking notifications: {}",
                    yes_no(profile.receive_booking_notifications)
                );
                println!("loyalty points: {}", profile.loyalty_points);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_profile(profile: &ProfileResponse, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(profile)?,
        OutputFormat::Table => {
            let user = &profile.user;
            println!("signed in as: {} <{}>", user.display_name(), user.email);
            println!("username: {}", user.username);
            println!("role: {}", user.role);
            if let Some(customer) = &profile.customer_profile {
                println!("language: {}", customer.preferred_language);
                if !customer.phone_number.is_empty() {
                    println!("phone: {}", customer.phone_number);
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_movie_batch(
    response: &BatchDeleteMoviesResponse,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(response)?,
        OutputFormat::Table => println!("{} movie(s) deleted successfully", response.deleted_count),
    }
    Ok(())
}

pub(crate) fn render_user_batch(
    response: &BatchDeleteUsersResponse,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(response)?,
        OutputFormat::Table => println!("{} user(s) deleted successfully", response.deleted_count),
    }
    Ok(())
}

fn print_page_footer<T>(page: &Page<T>, window: PageWindow) {
    let total = page.total_pages(window.page_size).max(1);
    let mut footer = format!("page {} of {total} ({} total)", window.page, page.count);
    if page.has_next() {
        footer.push_str(&format!("; next: --page {}", window.page.saturating_add(1)));
    }
    println!("{footer}");
}

fn genre_names(movie: &Movie) -> String {
    movie
        .genres
        .iter()
        .map(|genre| genre.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_duration(movie: &Movie) -> String {
    if movie.duration_formatted.is_empty() {
        format!("{}m", movie.duration)
    } else {
        movie.duration_formatted.clone()
    }
}

/// Render a decimal rating string with one fractional digit; `-` when unset.
#[must_use]
pub(crate) fn format_rating(raw: &str) -> String {
    raw.trim()
        .parse::<f64>()
        .map_or_else(|_| "-".to_string(), |rating| format!("{rating:.1}"))
}

/// Date portion of an ISO-8601 timestamp.
#[must_use]
pub(crate) fn format_timestamp(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}

#[must_use]
pub(crate) const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Cut `text` to `width` characters, marking the cut with `~`.
#[must_use]
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_is_formatted_with_one_decimal() {
        assert_eq!(format_rating("8.70"), "8.7");
        assert_eq!(format_rating(""), "-");
    }

    #[test]
    fn timestamps_keep_the_date() {
        assert_eq!(format_timestamp("2024-01-05T10:00:00Z"), "2024-01-05");
        assert_eq!(format_timestamp("2024-01-05"), "2024-01-05");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Heat", 10), "Heat");
        assert_eq!(truncate("The Good, the Bad", 8), "The Goo~");
    }
}
