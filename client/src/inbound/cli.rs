//! Command-line front end over the resource clients.
//!
//! Commands map one-to-one onto port operations. Results are written as
//! pretty-printed JSON; failures carry the message the user should see,
//! already translated when the active translation scope covers it.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use zeroize::Zeroizing;

use crate::context::ClientContext;
use crate::domain::ports::{
    AuthApi, ComplimentsApi, DEFAULT_HISTORY_LIMIT, DEFAULT_UPCOMING_LIMIT,
    DEFAULT_USER_HISTORY_LIMIT, KeyValueStoreError, TasksApi, UsersApi,
};
use crate::domain::{
    ApiError, AuthResponse, ComplimentId, FrequencyUnit, Identity, Locale, LoginCredentials,
    NavigationDecision, NewCompliment, NewTask, NewUser, Registration, TaskId, TenantId, UserId,
};

/// Environment variable read when `--password` is not given.
pub const PASSWORD_ENV: &str = "KUDOS_PASSWORD";

/// `kudos` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "kudos",
    about = "Send compliments, track household tasks, and rank tenant members",
    version
)]
pub struct Cli {
    /// Backend base URL. Falls back to `KUDOS_API_BASE_URL`.
    #[arg(long = "api-base-url", value_name = "url", global = true)]
    pub api_base_url: Option<String>,
    /// Session storage file. Falls back to `KUDOS_STORAGE_PATH`.
    #[arg(long = "storage-path", value_name = "path", global = true)]
    pub storage_path: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        /// Prefer `KUDOS_PASSWORD`; flags are visible in the process list.
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Create a tenant with its first user and sign in.
    Register(RegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show the supported locales, or switch to `code`.
    Locale { code: Option<String> },
    /// Evaluate the navigation guard for a view path such as `/user/3/tasks`.
    Navigate { path: String },
    /// Compliment operations.
    #[command(subcommand)]
    Compliments(ComplimentsCommand),
    /// Task operations.
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// User operations.
    #[command(subcommand)]
    Users(UsersCommand),
}

/// Registration form.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long = "tenant-name")]
    pub tenant_name: String,
    #[arg(long = "tenant-domain")]
    pub tenant_domain: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,
}

/// `kudos compliments ...`
#[derive(Debug, Subcommand)]
pub enum ComplimentsCommand {
    /// Every compliment in the tenant.
    List,
    /// One compliment by id.
    Show { id: ComplimentId },
    /// Most recent compliment received.
    Last,
    /// Compliments sent or received.
    History,
    /// Received compliments not yet viewed.
    Unviewed,
    /// Send a compliment.
    Send {
        #[arg(long = "to")]
        to_user_id: UserId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 1)]
        points: i32,
    },
    /// Mark received compliments as viewed.
    MarkViewed {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<ComplimentId>,
    },
    /// Delete a compliment.
    Delete { id: ComplimentId },
}

/// `kudos tasks ...`
#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// Open tasks ordered by due date.
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Recently completed tasks.
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },
    /// Schedule a task.
    Create(CreateTaskArgs),
    /// Complete a task, optionally crediting another user.
    Complete {
        id: TaskId,
        #[arg(long = "by")]
        completed_by: Option<UserId>,
    },
    /// Revert a completion.
    Undo { id: TaskId },
    /// Tasks completed by one user.
    ByUser {
        user_id: UserId,
        #[arg(long, default_value_t = DEFAULT_USER_HISTORY_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

/// Task form.
#[derive(Debug, Args)]
pub struct CreateTaskArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value_t = 1)]
    pub points: i32,
    #[arg(long, default_value = "pending")]
    pub status: String,
    /// First due date (RFC 3339).
    #[arg(long = "scheduled-to")]
    pub scheduled_to: Option<DateTime<Utc>>,
    #[arg(long = "scheduled-by")]
    pub scheduled_by: Option<UserId>,
    #[arg(long = "every", default_value_t = 1)]
    pub frequency_value: i32,
    /// `days`, `weeks`, or `months`.
    #[arg(long = "unit", default_value = "weeks")]
    pub frequency_unit: FrequencyUnit,
    /// Create a one-off task that never repeats.
    #[arg(long, conflicts_with_all = ["frequency_value", "frequency_unit"])]
    pub once: bool,
}

/// `kudos users ...`
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Every user in the tenant.
    List,
    /// Users ordered by points.
    Ranking,
    /// One user by id.
    Show { id: UserId },
    /// Add a user; the tenant defaults to the signed-in user's.
    Create(CreateUserArgs),
}

/// User form.
#[derive(Debug, Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,
    #[arg(long = "tenant")]
    pub tenant_id: Option<TenantId>,
    #[arg(long)]
    pub points: Option<i32>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

/// Failures reported by [`execute`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A resource client failed; the message is the one to show.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Local session or locale storage failed.
    #[error(transparent)]
    Storage(#[from] KeyValueStoreError),
    /// The command cannot run with the given input or state.
    #[error("{0}")]
    Invalid(String),
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// Encoding the result failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run `command` against `context`, writing the result to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when the operation fails or the output cannot be
/// written.
pub async fn execute(
    context: &ClientContext,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials::new(&email, &password);
            let reply = context.auth.login(&credentials).await?;
            emit(out, &session_summary(&reply))
        }
        Command::Register(args) => {
            let registration = Registration {
                tenant_name: args.tenant_name,
                tenant_domain: args.tenant_domain,
                user_name: args.name,
                email: args.email,
                password: Zeroizing::new(args.password),
            };
            let reply = context.auth.register(&registration).await?;
            emit(out, &session_summary(&reply))
        }
        Command::Logout => {
            context.auth.logout()?;
            emit(out, &json!({ "signed_in": false }))
        }
        Command::Whoami => emit(out, &require_identity(context)?),
        Command::Locale { code } => select_locale(context, code.as_deref(), out),
        Command::Navigate { path } => navigate(context, &path, out),
        Command::Compliments(command) => compliments(context, command, out).await,
        Command::Tasks(command) => tasks(context, command, out).await,
        Command::Users(command) => users(context, command, out).await,
    }
}

async fn compliments(
    context: &ClientContext,
    command: ComplimentsCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let api = &context.compliments;
    match command {
        ComplimentsCommand::List => emit(out, &api.list().await?),
        ComplimentsCommand::Show { id } => emit(out, &api.get(id).await?),
        ComplimentsCommand::Last => emit(out, &api.last_received().await?),
        ComplimentsCommand::History => emit(out, &api.history().await?),
        ComplimentsCommand::Unviewed => emit(out, &api.unviewed().await?),
        ComplimentsCommand::Send {
            to_user_id,
            title,
            description,
            points,
        } => {
            let compliment = NewCompliment::new(title, description, points, to_user_id)
                .map_err(|error| CliError::Invalid(error.to_string()))?;
            emit(out, &api.create(&compliment).await?)
        }
        ComplimentsCommand::MarkViewed { ids } => {
            api.mark_viewed(&ids).await?;
            emit(out, &json!({ "marked_viewed": ids }))
        }
        ComplimentsCommand::Delete { id } => {
            api.delete(id).await?;
            emit(out, &json!({ "deleted": id }))
        }
    }
}

async fn tasks(
    context: &ClientContext,
    command: TasksCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let api = &context.tasks;
    match command {
        TasksCommand::Upcoming { limit, offset } => emit(out, &api.upcoming(limit, offset).await?),
        TasksCommand::History { limit } => emit(out, &api.history(limit).await?),
        TasksCommand::Create(args) => {
            let (frequency_value, frequency_unit) = if args.once {
                (0, None)
            } else {
                (args.frequency_value, Some(args.frequency_unit))
            };
            let task = NewTask {
                title: args.title,
                description: args.description,
                points: args.points,
                status: args.status,
                scheduled_to: args.scheduled_to,
                scheduled_by_id: args.scheduled_by,
                frequency_value,
                frequency_unit,
            };
            emit(out, &api.create(&task).await?)
        }
        TasksCommand::Complete { id, completed_by } => {
            let task = api.complete(id, completed_by).await?;
            let next_due = task.next_occurrence();
            emit(out, &json!({ "task": task, "next_due": next_due }))
        }
        TasksCommand::Undo { id } => emit(out, &api.undo(id).await?),
        TasksCommand::ByUser {
            user_id,
            limit,
            offset,
        } => emit(out, &api.completed_by_user(user_id, limit, offset).await?),
    }
}

async fn users(
    context: &ClientContext,
    command: UsersCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let api = &context.users;
    match command {
        UsersCommand::List => emit(out, &api.list().await?),
        UsersCommand::Ranking => emit(out, &api.ranking().await?),
        UsersCommand::Show { id } => emit(out, &api.get(id).await?),
        UsersCommand::Create(args) => {
            let tenant_id = match args.tenant_id {
                Some(tenant_id) => tenant_id,
                None => require_identity(context)?.tenant_id,
            };
            let user = NewUser {
                name: args.name,
                email: args.email,
                password: Zeroizing::new(args.password),
                tenant_id,
                points: args.points,
                role: args.role,
                status: args.status,
            };
            emit(out, &api.create(&user).await?)
        }
    }
}

fn require_identity(context: &ClientContext) -> Result<Identity, CliError> {
    context
        .sessions
        .current_identity()?
        .ok_or_else(|| CliError::Invalid(context.localizer.t("errors.userNotAuthenticated")))
}

#[derive(Serialize)]
struct LocaleView {
    code: &'static str,
    name: &'static str,
    flag: &'static str,
    active: bool,
}

fn select_locale(
    context: &ClientContext,
    code: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(code) = code {
        let locale = Locale::from_code(code)
            .ok_or_else(|| CliError::Invalid(format!("unsupported locale `{code}`")))?;
        context.localizer.select(locale)?;
    }
    let active = context.localizer.locale();
    let views: Vec<LocaleView> = Locale::ALL
        .into_iter()
        .map(|locale| LocaleView {
            code: locale.code(),
            name: locale.display_name(),
            flag: locale.flag(),
            active: locale == active,
        })
        .collect();
    emit(out, &views)
}

fn navigate(context: &ClientContext, path: &str, out: &mut impl Write) -> Result<(), CliError> {
    let (matched, decision) = context
        .guard
        .check_path(path)
        .ok_or_else(|| CliError::Invalid(format!("no view matches `{path}`")))?;
    let outcome = match decision {
        NavigationDecision::Proceed => json!({ "proceed": matched.route.path }),
        NavigationDecision::Redirect(name) => {
            let target = context.guard.table().get(name).map(|route| route.path);
            json!({ "redirect": target })
        }
    };
    emit(
        out,
        &json!({
            "route": matched.route.path,
            "params": matched.params,
            "decision": outcome,
        }),
    )
}

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Signed-in identity without the token.
fn session_summary(reply: &AuthResponse) -> serde_json::Value {
    json!({
        "user_id": reply.user_id,
        "tenant_id": reply.tenant_id,
        "name": reply.name,
        "email": reply.email,
    })
}
