//! # Roster
//!
//! Command-line front end for the user directory.
//!
//! ## Core Components
//!
//! - **[`RosterSystem`]**: starts the user store over a [`FileStorage`] slot.
//! - **[`UserForm`]**: every `add`/`edit` goes through a form session first, so input is
//!   checked by the form rules before the store applies its own validation.
//!
//! ## Usage
//!
//! ```bash
//! roster list
//! roster add --name Ana --email ana@x.com --phone +351911222333 --type Architect
//! roster edit 1 --type Engineer --type "Project Manager"
//! roster remove 2
//! RUST_LOG=debug roster --config roster.json show 1
//! ```

use clap::{Args, Parser, Subcommand};
use roster_app::clients::UserClient;
use roster_app::config::RosterConfig;
use roster_app::forms::user_form::{
    CONFIRM_PASSWORD, EMAIL, NAME, PASSWORD, PHONE, USER_TYPES,
};
use roster_app::forms::UserForm;
use roster_app::lifecycle::RosterSystem;
use roster_app::model::{UserRecord, UserType};
use roster_framework::form::{InputEvent, SubmitOutcome};
use roster_framework::storage::FileStorage;
use roster_framework::tracing::setup_tracing;
use roster_framework::RecordClient;
use std::path::PathBuf;
use tracing::{info, warn};

/// Roster - a small user directory with local persistence
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every user
    List,

    /// Show one user
    Show { id: String },

    /// Register a new user
    Add(UserArgs),

    /// Replace an existing user; omitted flags keep their current values
    Edit {
        id: String,
        #[command(flatten)]
        user: UserArgs,
    },

    /// Delete a user (deleting an unknown id is not an error)
    Remove { id: String },
}

#[derive(Args, Debug, Default)]
struct UserArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Role tag; repeat for several (Architect, Engineer, "Project Manager", Designer, Consultant)
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<UserType>,

    #[arg(long)]
    password: Option<String>,

    /// Defaults to --password
    #[arg(long)]
    confirm_password: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    let config = RosterConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    info!(storage_path = %config.storage_path.display(), "Starting roster");

    let system = RosterSystem::new(&config, FileStorage::new(&config.storage_path));
    let result = run(cli.command, &system.user_client).await;

    system.shutdown().await?;
    result
}

async fn run(command: Command, client: &UserClient) -> Result<(), String> {
    match command {
        Command::List => {
            let users = client.list().await.map_err(|e| e.to_string())?;
            for user in users.iter() {
                println!("{}", summary(user));
            }
        }
        Command::Show { id } => {
            let user = client
                .get(id.clone())
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("User not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&user).map_err(|e| e.to_string())?);
        }
        Command::Add(user) => {
            let form = UserForm::create(client.clone());
            fill(&form, user);
            submit(&form).await?;
        }
        Command::Edit { id, user } => {
            let record = client
                .get(id.clone())
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("User not found: {id}"))?;
            let form = UserForm::edit(client.clone(), &record);
            fill(&form, user);
            submit(&form).await?;
        }
        Command::Remove { id } => {
            client.delete(id.clone()).await.map_err(|e| e.to_string())?;
            println!("Removed {id}");
        }
    }
    Ok(())
}

/// Feeds the given flags into the form the way a front end would on input.
fn fill(form: &UserForm, user: UserArgs) {
    let engine = form.engine();
    for (field, value) in [(NAME, user.name), (EMAIL, user.email), (PHONE, user.phone)] {
        if let Some(value) = value {
            engine.handle_change(&InputEvent::text(field, value));
        }
    }
    if !user.types.is_empty() {
        let labels: Vec<String> = user.types.iter().map(|t| t.to_string()).collect();
        engine.set_value(USER_TYPES, labels);
    }
    if let Some(password) = user.password {
        let confirm = user.confirm_password.unwrap_or_else(|| password.clone());
        engine.handle_change(&InputEvent::text(PASSWORD, password));
        engine.handle_change(&InputEvent::text(CONFIRM_PASSWORD, confirm));
    }
}

async fn submit(form: &UserForm) -> Result<(), String> {
    match form.submit().await {
        SubmitOutcome::Submitted | SubmitOutcome::Stale => {
            if let Some(user) = form.saved() {
                println!("Saved {}", summary(&user));
            }
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let errors = form.engine().errors();
            warn!(?errors, "Input rejected");
            let lines: Vec<String> = errors
                .iter()
                .map(|(field, message)| format!("  {field}: {message}"))
                .collect();
            Err(format!("Invalid input:\n{}", lines.join("\n")))
        }
        SubmitOutcome::Failed(message) => Err(message),
    }
}

fn summary(user: &UserRecord) -> String {
    let types: Vec<&str> = user.user_types.iter().map(|t| t.label()).collect();
    format!(
        "{}  {} <{}>  {}  [{}]",
        user.id,
        user.name,
        user.email,
        user.phone,
        types.join(", ")
    )
}
