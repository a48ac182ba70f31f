// Copyright (c) Microsoft. All rights reserved.

//! An in-memory stand-in for the provisioning API.
//!
//! It serves the login and user feed routes over plain HTTP with the same status codes and error bodies as the
//! real service, so the client and the CLI can be exercised end to end.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod login;
mod server;
mod users;

use provisioning_common::UserEntry;

/// Page size of the user listing, as served by the real API.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub struct Options {
    pub bind: std::net::SocketAddr,
    pub admin_email: String,
    pub admin_password: String,
    pub domain: String,
    pub page_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            bind: ([127, 0, 0, 1], 0).into(),
            admin_email: "admin@example.com".to_owned(),
            admin_password: "admin-password".to_owned(),
            domain: "example.com".to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub struct MockServer {
    local_addr: std::net::SocketAddr,
    context: server::Context,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl MockServer {
    /// Binds the listener and starts serving on the current tokio runtime.
    pub fn start(options: &Options) -> std::io::Result<Self> {
        let context = server::ContextInner::new(options);
        let context = std::sync::Arc::new(std::sync::Mutex::new(context));

        let server_context = context.clone();
        let server = hyper::Server::try_bind(&options.bind)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::AddrInUse, err))?
            .serve(hyper::service::make_service_fn(move |_| {
                let context = server_context.clone();

                let service = hyper::service::service_fn(move |req| {
                    crate::server::serve_request(context.clone(), req)
                });

                async move { Ok::<_, std::convert::Infallible>(service) }
            }));

        let local_addr = server.local_addr();

        let task = tokio::spawn(async move {
            if let Err(err) = server.await {
                log::error!("mock provisioning server failed: {}", err);
            }
        });

        Ok(MockServer {
            local_addr,
            context,
            task: Some(task),
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.local_addr
    }

    /// Base URL to hand to a provisioning client.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// The stored entry for `user_name`, including its password.
    #[must_use]
    pub fn user(&self, user_name: &str) -> Option<UserEntry> {
        self.lock().users.get(user_name).cloned()
    }

    pub fn insert_user(&self, user: UserEntry) {
        self.lock().users.insert(user.login.user_name.clone(), user);
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Serves until the server task ends.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                log::error!("mock provisioning server task failed: {}", err);
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, server::ContextInner> {
        match self.context.lock() {
            Ok(context) => context,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
