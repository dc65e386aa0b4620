//! Command-line surface: `serve` (default) and `create-admin`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `create-admin` bootstraps the first administrator. Missing values are
//! prompted for on stdin, and the result goes through the same registration
//! rules the dashboard uses before anything touches the database.

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use lumastack_client::net::types::{User, UserRole};
use lumastack_client::schemas::ValidationErrors;
use lumastack_client::schemas::auth::{RegisterInput, validate_register};
use sqlx::PgPool;

use crate::db::users::{self, NewUser, UserError};
use crate::password::{self, PasswordError};

#[derive(Parser, Debug)]
#[command(name = "lumastack", about = "LumaStack dashboard server", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server.
    Serve,
    /// Create an administrator account.
    CreateAdmin {
        #[arg(short, long, env = "LUMASTACK_ADMIN_EMAIL")]
        email: Option<String>,
        #[arg(short, long, env = "LUMASTACK_ADMIN_USERNAME")]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed before {0} was entered")]
    MissingInput(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("a user with {field} {value:?} already exists")]
    Duplicate { field: &'static str, value: String },
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Prompts and their answers. Generic so tests can script stdin.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one trimmed line.
    ///
    /// # Errors
    ///
    /// [`CliError::MissingInput`] at end of input, [`CliError::Io`] otherwise.
    pub fn ask(&mut self, label: &'static str) -> Result<String, CliError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::MissingInput(label));
        }
        Ok(line.trim_end_matches(['\r', '\n']).trim().to_owned())
    }

    pub fn say(&mut self, message: &str) -> Result<(), CliError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

/// Fill in whatever the flags left out, then validate.
///
/// A prompted password is asked twice; a password given as a flag is its
/// own confirmation.
///
/// # Errors
///
/// [`CliError::PasswordMismatch`] when the two prompted passwords differ,
/// [`CliError::Validation`] when the registration rules fail.
pub fn collect_admin_input<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<RegisterInput, CliError> {
    let email = match email {
        Some(email) => email,
        None => prompter.ask("Admin email")?,
    };
    let username = match username {
        Some(username) => username,
        None => prompter.ask("Admin username")?,
    };
    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => {
            let first = prompter.ask("Admin password")?;
            let second = prompter.ask("Confirm password")?;
            if first != second {
                return Err(CliError::PasswordMismatch);
            }
            (first, second)
        }
    };

    Ok(validate_register(&RegisterInput { username, email, password, confirm_password })?)
}

async fn ensure_absent(pool: &PgPool, field: &'static str, value: &str) -> Result<(), CliError> {
    let lookup = match field {
        "email" => users::find_user_by_email(pool, value).await,
        _ => users::find_user_by_username(pool, value).await,
    };
    match lookup {
        Ok(_) => Err(CliError::Duplicate { field, value: value.to_owned() }),
        Err(UserError::NotFound) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Create an administrator, prompting for missing values.
///
/// # Errors
///
/// Any [`CliError`]; nothing is written when validation or the duplicate
/// check fails.
pub async fn create_admin<R: BufRead, W: Write>(
    pool: &PgPool,
    prompter: &mut Prompter<R, W>,
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<User, CliError> {
    let input = collect_admin_input(prompter, email, username, password)?;

    ensure_absent(pool, "email", &input.email).await?;
    ensure_absent(pool, "username", &input.username).await?;

    let hash = password::hash_password(&input.password)?;
    let new_user = NewUser { username: input.username, email: input.email, role: UserRole::Admin };
    let record = users::create_user(pool, &new_user, &hash).await?;
    let user = record.to_api_user();

    tracing::info!(user_id = user.id, username = %user.username, "admin user created");
    prompter.say(&format!("Created admin {} <{}> (id {})", user.username, user.email, user.id))?;
    Ok(user)
}
