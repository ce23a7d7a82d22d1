//! kb auth command implementations.
//!
//! Accounts are local records in the store's `users` document and the
//! active session is the `user` document; nothing leaves the machine.

use std::path::PathBuf;

use crate::config::{self, Config};
use crate::error::Result;
use crate::identity::{self, User};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{Partition, Store};

/// Options for `kb auth register`
pub struct RegisterOptions {
    pub name: String,
    pub email: String,
    pub password: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb auth login`
pub struct LoginOptions {
    pub email: String,
    pub password: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb auth logout` and `kb auth whoami`
pub struct SessionOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb auth avatar`
pub struct AvatarOptions {
    pub image: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SessionReport {
    signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
    partition: String,
}

fn open_store(dir: Option<PathBuf>) -> Result<Store> {
    let config = Config::load_default();
    Store::open(config::resolve_store_dir(dir, &config))
}

pub fn run_register(options: RegisterOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let user = identity::register(&store, &options.name, &options.email, &options.password)?;

    let mut human = HumanOutput::new(format!("Registered: {}", user.name));
    human.push_summary("Email", user.email.clone());
    human.push_summary("Id", user.id.to_string());
    human.push_summary("Board", Partition::User(user.id).key());
    human.push_warning("passwords are stored in plaintext; use a throwaway one");
    human.push_next_step("kb task list");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "auth register",
        &user,
        Some(&human),
    )
}

pub fn run_login(options: LoginOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let user = identity::login(&store, &options.email, &options.password)?;

    let mut human = HumanOutput::new(format!("Signed in: {}", user.name));
    human.push_summary("Email", user.email.clone());
    human.push_summary("Board", Partition::User(user.id).key());
    human.push_next_step("kb board");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "auth login",
        &user,
        Some(&human),
    )
}

pub fn run_logout(options: SessionOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let previous = identity::current_user(&store);
    identity::logout(&store);

    let report = SessionReport {
        signed_in: false,
        user: None,
        partition: Partition::Anonymous.key(),
    };

    let header = match previous {
        Some(user) => format!("Signed out: {}", user.name),
        None => "No active session".to_string(),
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("Board", Partition::Anonymous.key());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "auth logout",
        &report,
        Some(&human),
    )
}

pub fn run_whoami(options: SessionOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let user = identity::current_user(&store);
    let partition = Partition::for_user(user.as_ref().map(|user| user.id));

    let report = SessionReport {
        signed_in: user.is_some(),
        user: user.clone(),
        partition: partition.key(),
    };

    let mut human = match user {
        Some(ref user) => {
            let mut human = HumanOutput::new(format!("Signed in: {}", user.name));
            human.push_summary("Email", user.email.clone());
            human.push_summary("Id", user.id.to_string());
            human.push_summary("Avatar", user.avatar.clone());
            human
        }
        None => {
            let mut human = HumanOutput::new("Not signed in");
            human.push_next_step(
                "kb auth register --name <name> --email <email> --password <password>",
            );
            human
        }
    };
    human.push_summary("Board", report.partition.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "auth whoami",
        &report,
        Some(&human),
    )
}

pub fn run_avatar(options: AvatarOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let user = identity::update_avatar(&store, &options.image)?;

    let mut human = HumanOutput::new(format!("Avatar updated: {}", user.name));
    human.push_summary("Avatar", user.avatar.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "auth avatar",
        &user,
        Some(&human),
    )
}
