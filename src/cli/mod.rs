//! Command-line interface for kb
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand group is implemented in its own submodule.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod auth;
mod board;
mod settings;
mod task;

/// kb - a local-first kanban board
///
/// Tasks live in three columns (todo, doing, done) and persist as JSON
/// documents in a flat on-disk store. Accounts are optional: signing in
/// moves the board onto a per-user partition, signing out returns to the
/// shared anonymous one.
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the board's JSON documents (defaults to the platform data dir)
    #[arg(long, global = true, env = "KB_DIR")]
    pub dir: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, edit, move, and delete tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Accounts and the active session
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Persisted preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Open the interactive board
    Board,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Column to create the task in (todo, doing, done)
        #[arg(long)]
        status: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Assignee to attach (repeatable; defaults to the signed-in account)
        #[arg(long = "assignee")]
        assignees: Vec<String>,

        /// Due date label, e.g. "12/20"
        #[arg(long)]
        due: Option<String>,

        /// Priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Issue type (bug, feature, enhancement, documentation)
        #[arg(long = "type")]
        issue_type: Option<String>,

        /// Comment count badge
        #[arg(long)]
        comments: Option<u32>,

        /// Attachment count badge
        #[arg(long)]
        attachments: Option<u32>,
    },

    /// List tasks, optionally filtered
    List {
        /// Restrict to one column (todo, doing, done)
        #[arg(long)]
        status: Option<String>,

        /// Keep tasks carrying at least one of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Keep tasks with at least one of these assignees (repeatable)
        #[arg(long = "assignee")]
        assignees: Vec<String>,

        /// Hide the done column
        #[arg(long)]
        hide_done: bool,

        /// Case-insensitive substring match on title or description
        #[arg(long)]
        search: Option<String>,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id (a unique prefix is enough)
        id: String,

        /// Replace the title
        #[arg(long)]
        title: Option<String>,

        /// Replace the description
        #[arg(short, long)]
        description: Option<String>,

        /// Move to a column (todo, doing, done)
        #[arg(long)]
        status: Option<String>,

        /// Replace the tag list (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Replace the assignee list (repeatable)
        #[arg(long = "assignee")]
        assignees: Vec<String>,

        /// Remove all assignees
        #[arg(long, conflicts_with = "assignees")]
        clear_assignees: bool,

        /// Replace the due date label
        #[arg(long)]
        due: Option<String>,

        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,

        /// Replace the priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Replace the issue type (bug, feature, enhancement, documentation)
        #[arg(long = "type")]
        issue_type: Option<String>,

        /// Replace the comment count badge
        #[arg(long)]
        comments: Option<u32>,

        /// Replace the attachment count badge
        #[arg(long)]
        attachments: Option<u32>,
    },

    /// Move a task to another column
    Move {
        /// Task id (a unique prefix is enough)
        id: String,

        /// Target column (todo, doing, done)
        status: String,
    },

    /// Delete a task
    Rm {
        /// Task id (a unique prefix is enough)
        id: String,
    },

    /// Delete every task on the board (requires being signed in)
    Clear,

    /// List the distinct tags in use
    Tags,

    /// List the distinct assignees in use
    Assignees,
}

/// Auth subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address (account key)
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,
    },

    /// Sign out of the active session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Update the avatar image reference
    Avatar {
        /// Image URL or other reference
        image: String,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the persisted preferences
    Show,

    /// Change one or more preferences
    Set {
        /// Persist board changes automatically (true, false)
        #[arg(long)]
        auto_save: Option<bool>,

        /// Color theme (light, dark, system)
        #[arg(long)]
        theme: Option<String>,

        /// Desktop notifications (true, false)
        #[arg(long)]
        notifications: Option<bool>,

        /// Email notifications (true, false)
        #[arg(long)]
        email_notifications: Option<bool>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    description,
                    status,
                    tags,
                    assignees,
                    due,
                    priority,
                    issue_type,
                    comments,
                    attachments,
                } => task::run_add(task::AddOptions {
                    title,
                    description,
                    status,
                    tags,
                    assignees,
                    due,
                    priority,
                    issue_type,
                    comments,
                    attachments,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List {
                    status,
                    tags,
                    assignees,
                    hide_done,
                    search,
                } => task::run_list(task::ListOptions {
                    status,
                    tags,
                    assignees,
                    hide_done,
                    search,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    status,
                    tags,
                    clear_tags,
                    assignees,
                    clear_assignees,
                    due,
                    clear_due,
                    priority,
                    issue_type,
                    comments,
                    attachments,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    description,
                    status,
                    tags,
                    clear_tags,
                    assignees,
                    clear_assignees,
                    due,
                    clear_due,
                    priority,
                    issue_type,
                    comments,
                    attachments,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Move { id, status } => task::run_move(task::MoveOptions {
                    id,
                    status,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Clear => task::run_clear(task::ClearOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Tags => task::run_tags(task::LabelOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Assignees => task::run_assignees(task::LabelOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Auth(cmd) => match cmd {
                AuthCommands::Register {
                    name,
                    email,
                    password,
                } => auth::run_register(auth::RegisterOptions {
                    name,
                    email,
                    password,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AuthCommands::Login { email, password } => auth::run_login(auth::LoginOptions {
                    email,
                    password,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AuthCommands::Logout => auth::run_logout(auth::SessionOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AuthCommands::Whoami => auth::run_whoami(auth::SessionOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AuthCommands::Avatar { image } => auth::run_avatar(auth::AvatarOptions {
                    image,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Settings(cmd) => match cmd {
                SettingsCommands::Show => settings::run_show(settings::ShowOptions {
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SettingsCommands::Set {
                    auto_save,
                    theme,
                    notifications,
                    email_notifications,
                } => settings::run_set(settings::SetOptions {
                    auto_save,
                    theme,
                    notifications,
                    email_notifications,
                    dir: self.dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Board => board::run(board::BoardOptions {
                dir: self.dir,
                quiet: self.quiet,
            }),
        }
    }
}
