//! Locally simulated accounts and session state.
//!
//! Identity resolution is a single document read: `user.json` holds the
//! active session, `users.json` the credential table keyed by email.
//! There is no server; registering and signing in only move documents
//! around the local store.
//!
//! Credentials are stored in plaintext, matching the simulated scope of
//! this tool. Anything beyond a local demo must replace the comparison
//! with a salted hash before trusting it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::{Store, KEY_USER, KEY_USERS};

/// The active account as persisted in the session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// One entry of the credential table, keyed by email in `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credential {
    id: Uuid,
    name: String,
    password: String,
    avatar: String,
}

type CredentialTable = BTreeMap<String, Credential>;

/// Generated avatar for an account that never picked one.
pub fn default_avatar(id: Uuid) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={id}")
}

/// The signed-in account, restored from the session document.
pub fn current_user(store: &Store) -> Option<User> {
    store.read_doc(KEY_USER)
}

/// Create an account and activate its session.
///
/// Fails with `EmailTaken` when the email already keys a credential,
/// leaving the table untouched.
pub fn register(store: &Store, name: &str, email: &str, password: &str) -> Result<User> {
    let name = require_field(name, "name")?;
    let email = require_field(email, "email")?;
    let password = require_field(password, "password")?;

    let mut table = credential_table(store);
    if table.contains_key(&email) {
        return Err(Error::EmailTaken(email));
    }

    let id = Uuid::new_v4();
    let avatar = default_avatar(id);
    table.insert(
        email.clone(),
        Credential {
            id,
            name: name.clone(),
            password,
            avatar: avatar.clone(),
        },
    );
    store.write_doc(KEY_USERS, &table);

    let user = User {
        id,
        name,
        email,
        avatar,
    };
    store.write_doc(KEY_USER, &user);
    debug!(user = %user.id, "registered account");
    Ok(user)
}

/// Verify credentials and activate the session.
///
/// Unknown email and wrong password fail identically so the error does
/// not reveal which accounts exist.
pub fn login(store: &Store, email: &str, password: &str) -> Result<User> {
    let email = require_field(email, "email")?;

    let table = credential_table(store);
    let credential = match table.get(&email) {
        Some(credential) if credential.password == password => credential,
        _ => return Err(Error::InvalidCredentials),
    };

    let avatar = if credential.avatar.is_empty() {
        default_avatar(credential.id)
    } else {
        credential.avatar.clone()
    };
    let user = User {
        id: credential.id,
        name: credential.name.clone(),
        email,
        avatar,
    };
    store.write_doc(KEY_USER, &user);
    debug!(user = %user.id, "signed in");
    Ok(user)
}

/// Drop the session document. Tasks and credentials stay untouched.
pub fn logout(store: &Store) {
    store.remove_doc(KEY_USER);
    debug!("signed out");
}

/// Point the active account's avatar at a new image reference,
/// updating both the session and the credential table.
pub fn update_avatar(store: &Store, avatar: &str) -> Result<User> {
    let mut user =
        current_user(store).ok_or(Error::IdentityRequired("updating the avatar"))?;
    user.avatar = avatar.trim().to_string();
    store.write_doc(KEY_USER, &user);

    let mut table = credential_table(store);
    if let Some(credential) = table.get_mut(&user.email) {
        credential.avatar = user.avatar.clone();
        store.write_doc(KEY_USERS, &table);
    }

    Ok(user)
}

fn credential_table(store: &Store) -> CredentialTable {
    store.read_doc(KEY_USERS).unwrap_or_default()
}

fn require_field(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
