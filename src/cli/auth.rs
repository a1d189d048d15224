//! Auth command - store a personal access token

use crate::cli::style::{Stylize, check, hyperlink};
use anstream::println;
use dialoguer::Password;
use gitlab_mr::config::{config_path, load_preferences, save_preferences};
use gitlab_mr::error::{Error, Result};
use gitlab_mr::remote::{PUBLIC_API_URL, personal_access_token_url};

/// Prompt for a token for `host` (an API base URL) and save it
pub fn run_auth(host: Option<&str>) -> Result<()> {
    let api_url = host.unwrap_or(PUBLIC_API_URL).trim_end_matches('/');
    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(Error::Config(format!(
            "host must be an API base URL such as https://gitlab.example.com, got '{api_url}'"
        )));
    }

    let token_page = personal_access_token_url(api_url);
    println!(
        "Create a token with the {} scope at {}",
        "api".emphasis(),
        hyperlink(&token_page, &token_page)
    );

    let token = Password::new()
        .with_prompt(format!("Access token for {api_url}"))
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read token: {e}")))?;
    let token = token.trim();
    if token.is_empty() {
        println!("{}", "No token entered".muted());
        return Ok(());
    }

    // Environment tokens stay out of the file
    let path = config_path()?;
    let mut prefs = load_preferences(&path)?;
    prefs.set_token(api_url, token.to_string());
    save_preferences(&path, &prefs)?;

    println!("{} Token saved to {}", check(), path.display().to_string().accent());
    Ok(())
}
