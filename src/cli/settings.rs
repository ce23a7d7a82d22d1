//! kb settings command implementations.

use std::path::PathBuf;

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::settings::UserSettings;
use crate::store::Store;

/// Options for `kb settings show`
pub struct ShowOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb settings set`
pub struct SetOptions {
    pub auto_save: Option<bool>,
    pub theme: Option<String>,
    pub notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

fn open_store(dir: Option<PathBuf>) -> Result<Store> {
    let config = Config::load_default();
    Store::open(config::resolve_store_dir(dir, &config))
}

fn push_settings(human: &mut HumanOutput, settings: &UserSettings) {
    human.push_summary("Auto save", settings.auto_save.to_string());
    human.push_summary("Theme", settings.theme.as_str());
    human.push_summary("Notifications", settings.notifications.to_string());
    human.push_summary(
        "Email notifications",
        settings.email_notifications.to_string(),
    );
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let settings = UserSettings::load(&store);

    let mut human = HumanOutput::new("Settings");
    push_settings(&mut human, &settings);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "settings show",
        &settings,
        Some(&human),
    )
}

pub fn run_set(options: SetOptions) -> Result<()> {
    let store = open_store(options.dir)?;
    let mut settings = UserSettings::load(&store);

    let mut changed = false;
    if let Some(auto_save) = options.auto_save {
        settings.auto_save = auto_save;
        changed = true;
    }
    if let Some(raw) = options.theme.as_deref() {
        settings.theme = raw.parse()?;
        changed = true;
    }
    if let Some(notifications) = options.notifications {
        settings.notifications = notifications;
        changed = true;
    }
    if let Some(email_notifications) = options.email_notifications {
        settings.email_notifications = email_notifications;
        changed = true;
    }
    if !changed {
        return Err(Error::InvalidArgument(
            "nothing to change (pass --auto-save, --theme, --notifications, or --email-notifications)"
                .to_string(),
        ));
    }

    settings.save(&store);

    let mut human = HumanOutput::new("Settings updated");
    push_settings(&mut human, &settings);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "settings set",
        &settings,
        Some(&human),
    )
}
