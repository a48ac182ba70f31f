// Copyright (c) Microsoft. All rights reserved.

use std::io::Write;

use anyhow::Context;

use provisioning_common::UserEntry;

use crate::options::Command;
use crate::prompt::{prompt, prompt_secret, Reader};

/// The user operations of an authenticated session.
#[async_trait::async_trait]
pub(crate) trait Directory {
    async fn create_user(
        &self,
        user_name: &str,
        given_name: &str,
        family_name: &str,
        password: &str,
    ) -> std::io::Result<UserEntry>;

    async fn retrieve_user(&self, user_name: &str) -> std::io::Result<UserEntry>;

    async fn retrieve_all_users(&self) -> std::io::Result<Vec<UserEntry>>;

    async fn update_user(&self, user_name: &str, user: &UserEntry) -> std::io::Result<UserEntry>;

    async fn delete_user(&self, user_name: &str) -> std::io::Result<()>;
}

#[async_trait::async_trait]
impl Directory for provisioning_client_async::Session {
    async fn create_user(
        &self,
        user_name: &str,
        given_name: &str,
        family_name: &str,
        password: &str,
    ) -> std::io::Result<UserEntry> {
        provisioning_client_async::Session::create_user(
            self,
            user_name,
            given_name,
            family_name,
            password,
        )
        .await
    }

    async fn retrieve_user(&self, user_name: &str) -> std::io::Result<UserEntry> {
        provisioning_client_async::Session::retrieve_user(self, user_name).await
    }

    async fn retrieve_all_users(&self) -> std::io::Result<Vec<UserEntry>> {
        provisioning_client_async::Session::retrieve_all_users(self).await
    }

    async fn update_user(&self, user_name: &str, user: &UserEntry) -> std::io::Result<UserEntry> {
        provisioning_client_async::Session::update_user(self, user_name, user).await
    }

    async fn delete_user(&self, user_name: &str) -> std::io::Result<()> {
        provisioning_client_async::Session::delete_user(self, user_name).await
    }
}

/// The new password and its confirmation differed. Nothing was created.
#[derive(Debug)]
pub(crate) struct PasswordMismatch;

impl std::fmt::Display for PasswordMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passwords do not match!")
    }
}

impl std::error::Error for PasswordMismatch {}

/// Runs `command` against `directory`, reading any missing input from `stdin` and writing the result to `out`.
pub(crate) async fn execute<D>(
    directory: &D,
    command: Command,
    stdin: &mut impl Reader,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    D: Directory + ?Sized,
{
    match command {
        Command::Create {
            user_name,
            first_name,
            last_name,
            password,
        } => {
            writeln!(out, "Creating {}", user_name)?;

            let first_name = match first_name {
                Some(first_name) => first_name,
                None => prompt(stdin, "First Name: ")?,
            };

            let last_name = match last_name {
                Some(last_name) => last_name,
                None => prompt(stdin, "Last Name: ")?,
            };

            let password = match password {
                Some(password) => password,
                None => {
                    let password = prompt_secret(stdin, "New Password: ")?;
                    let verify = prompt_secret(stdin, "Verify Password: ")?;
                    if password != verify {
                        return Err(PasswordMismatch.into());
                    }

                    password
                }
            };

            let user = directory
                .create_user(&user_name, &first_name, &last_name, &password)
                .await
                .with_context(|| format!("could not create user {}", user_name))?;
            write_json(out, &user)?;
        }

        Command::Retrieve { user_name } => {
            let user = directory
                .retrieve_user(&user_name)
                .await
                .with_context(|| format!("could not retrieve user {}", user_name))?;
            write_json(out, &user)?;
        }

        Command::RetrieveAll => {
            let users = directory
                .retrieve_all_users()
                .await
                .context("could not retrieve users")?;
            write_json(out, &users)?;
        }

        Command::Delete { user_name } => {
            directory
                .delete_user(&user_name)
                .await
                .with_context(|| format!("could not delete user {}", user_name))?;
            writeln!(out, "Deleted user {}", user_name)?;
        }

        Command::Update {
            user_name,
            password,
        } => {
            let mut user = directory
                .retrieve_user(&user_name)
                .await
                .with_context(|| format!("could not retrieve user {}", user_name))?;
            user.login.password = Some(password);

            directory
                .update_user(&user_name, &user)
                .await
                .with_context(|| format!("could not update user {}", user_name))?;
            log::info!("Updated password of {}", user_name);
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
