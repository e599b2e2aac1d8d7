use anyhow::{Context as _, Result};
use clap::Args;
use leadboard_core::{validate_login, validate_registration, CoreError, LoginForm, RegistrationForm};
use leadboard_source::{load_credentials, open_source};
use leadboard_store::{paths, AccountsRepo};
use tracing::debug;

use crate::commands::{print_json, Context};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long, default_value = "")]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

pub fn register(ctx: &Context<'_>, args: RegisterArgs) -> Result<()> {
    let user = validate_registration(&RegistrationForm {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    })?;
    let dir = paths::ensure_data_dir().with_context(|| "prepare data directory")?;
    let repo = AccountsRepo::new(&dir);
    repo.save(&user)
        .with_context(|| format!("save registered user to {}", repo.path().display()))?;
    debug!(path = %repo.path().display(), "registered user saved");

    if ctx.json {
        print_json(&serde_json::json!({
            "username": user.username,
            "email": user.email,
        }))?;
    } else {
        println!("registered {}", user.username);
    }
    Ok(())
}

pub fn login(ctx: &Context<'_>, args: LoginArgs) -> Result<()> {
    let login = validate_login(&LoginForm {
        username: args.username,
        password: args.password,
    })?;

    let known = match ctx.config.credentials.as_deref() {
        Some(location) => {
            let source = open_source(location);
            load_credentials(source.as_ref())
                .with_context(|| format!("load credentials from {location}"))?
        }
        None => Vec::new(),
    };
    let dir = paths::data_dir().with_context(|| "resolve data directory")?;
    let repo = AccountsRepo::new(&dir);
    if !repo.authenticate(&known, &login)? {
        return Err(CoreError::InvalidCredentials.into());
    }

    if ctx.json {
        print_json(&serde_json::json!({
            "username": login.username,
            "authenticated": true,
        }))?;
    } else {
        println!("logged in as {}", login.username);
    }
    Ok(())
}
