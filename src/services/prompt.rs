// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive step of the OAuth flow: getting an authorization code from the user.

use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::models::AuthorizationCode;

/// Source of authorization codes for first-time authorization.
///
/// Implementations may block for as long as the user takes.
pub trait AuthorizationPrompt {
    fn request_code(&self, authorize_url: &str) -> Result<AuthorizationCode, AppError>;
}

/// Prompts on the terminal and reads the code (or the full redirect URL) from stdin.
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    pub open_browser: bool,
}

impl TerminalPrompt {
    pub fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

impl AuthorizationPrompt for TerminalPrompt {
    fn request_code(&self, authorize_url: &str) -> Result<AuthorizationCode, AppError> {
        let rule = "=".repeat(60);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let write_err = |e: std::io::Error| AppError::Authorization(e.to_string());

        writeln!(out, "\n{rule}\nSTRAVA AUTHENTICATION REQUIRED\n{rule}").map_err(write_err)?;
        writeln!(out, "\nStep 1: Visit this URL to authorize the application:\n").map_err(write_err)?;
        writeln!(out, "{authorize_url}").map_err(write_err)?;
        writeln!(out, "\nStep 2: After authorizing, you'll be redirected to a URL like:").map_err(write_err)?;
        writeln!(out, "  http://localhost:8000/callback?code=XXXXXX&scope=...").map_err(write_err)?;
        writeln!(
            out,
            "\nStep 3: Paste the 'code' parameter (or the whole URL) below.\n"
        )
        .map_err(write_err)?;

        if self.open_browser {
            match open::that(authorize_url) {
                Ok(()) => writeln!(out, "(Browser should open automatically)").map_err(write_err)?,
                Err(e) => tracing::debug!(error = %e, "Could not open browser"),
            }
        }

        write!(out, "Enter the authorization code: ").map_err(write_err)?;
        out.flush().map_err(write_err)?;
        drop(out);

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| AppError::Authorization(format!("Failed to read code: {}", e)))?;

        parse_code_input(&line)
    }
}

/// Accept either a bare code or the redirect URL carrying `?code=...`.
pub fn parse_code_input(input: &str) -> Result<AuthorizationCode, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::Authorization(
            "No authorization code entered".to_string(),
        ));
    }

    if !input.contains("://") {
        return Ok(AuthorizationCode::new(input));
    }

    let url = url::Url::parse(input)
        .map_err(|e| AppError::Authorization(format!("Invalid redirect URL: {}", e)))?;

    if let Some((_, error)) = url.query_pairs().find(|(k, _)| k == "error") {
        return Err(AppError::Authorization(format!(
            "Strava returned error: {}",
            error
        )));
    }

    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, code)| code.into_owned())
        .filter(|code| !code.is_empty())
        .map(AuthorizationCode::new)
        .ok_or_else(|| AppError::Authorization("No code parameter in redirect URL".to_string()))
}
