//! Command handlers grouped by resource.

pub(crate) mod auth;
pub(crate) mod genres;
pub(crate) mod movies;
pub(crate) mod users;

use std::io::{self, IsTerminal};

use anyhow::anyhow;
use cinedesk_api_models::ListFilters;

use crate::cli::PageArgs;
use crate::client::{CliError, CliResult};
use crate::output::PageWindow;

/// Page size requested when `--page-size` is omitted.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;

/// Copy `--search`, `--page` and `--page-size` onto a filter set.
pub(crate) fn apply_paging<F: ListFilters>(filters: &mut F, paging: PageArgs) {
    filters.set_search(paging.search);
    filters.set_page(paging.page);
    filters.set_page_size(Some(paging.page_size.unwrap_or(DEFAULT_PAGE_SIZE)));
}

pub(crate) fn page_window<F: ListFilters>(filters: &F) -> PageWindow {
    PageWindow {
        page: filters.page().unwrap_or(1),
        page_size: filters.page_size().unwrap_or(DEFAULT_PAGE_SIZE),
    }
}

/// Use the provided secret, or prompt for it on an interactive terminal.
pub(crate) fn read_secret(provided: Option<String>, prompt: &str) -> CliResult<Option<String>> {
    if provided.is_some() {
        return Ok(provided);
    }
    if !io::stdin().is_terminal() {
        return Ok(None);
    }
    rpassword::prompt_password(prompt)
        .map(Some)
        .map_err(|err| CliError::failure(anyhow!("failed to read password from terminal: {err}")))
}
