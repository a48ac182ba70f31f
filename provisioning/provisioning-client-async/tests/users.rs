// Copyright (c) Microsoft. All rights reserved.

use std::io::ErrorKind;

use mock_provisioning_server::{MockServer, Options};
use provisioning_client_async::{Client, Session};
use provisioning_common::{Credentials, UserEntry};

fn admin(options: &Options) -> Credentials {
    Credentials {
        email: options.admin_email.clone(),
        domain: options.domain.clone(),
        password: options.admin_password.clone(),
    }
}

fn client(server: &MockServer) -> Client {
    Client::new(server.endpoint().parse().unwrap())
        .unwrap()
        .with_timeout(std::time::Duration::from_secs(5))
}

async fn session(options: &Options) -> (MockServer, Session) {
    let server = MockServer::start(options).unwrap();
    let session = client(&server).login(&admin(options)).await.unwrap();

    (server, session)
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let options = Options::default();
    let server = MockServer::start(&options).unwrap();

    let mut credentials = admin(&options);
    credentials.password = "wrong".to_owned();

    let err = client(&server).login(&credentials).await.err().unwrap();
    assert_eq!(ErrorKind::PermissionDenied, err.kind());
    assert_eq!("login failed: BadAuthentication", err.to_string());
}

#[tokio::test]
async fn login_binds_session_to_domain() {
    let options = Options::default();
    let (_server, session) = session(&options).await;

    assert_eq!("example.com", session.domain());
}

#[tokio::test]
async fn create_then_retrieve() {
    let options = Options::default();
    let (server, session) = session(&options).await;

    let created = session
        .create_user("alice", "Alice", "Smith", "secret-password")
        .await
        .unwrap();
    assert_eq!("alice", created.login.user_name);
    assert_eq!("Alice", created.name.given_name);
    assert_eq!("Smith", created.name.family_name);
    assert_eq!(None, created.login.password);

    let retrieved = session.retrieve_user("alice").await.unwrap();
    assert_eq!(created, retrieved);

    let stored = server.user("alice").unwrap();
    assert_eq!(Some("secret-password"), stored.login.password.as_deref());
}

#[tokio::test]
async fn create_existing_user_fails() {
    let options = Options::default();
    let (server, session) = session(&options).await;
    server.insert_user(UserEntry::new("alice", "Alice", "Smith", "secret-password"));

    let err = session
        .create_user("alice", "Alice", "Smith", "secret-password")
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::AlreadyExists, err.kind());
    assert_eq!("EntityExists (1300): alice", err.to_string());
}

#[tokio::test]
async fn retrieve_missing_user_fails() {
    let options = Options::default();
    let (_server, session) = session(&options).await;

    let err = session.retrieve_user("nobody").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn retrieve_all_follows_pages() {
    let options = Options {
        page_size: 2,
        ..Options::default()
    };
    let (server, session) = session(&options).await;

    for user_name in ["erin", "alice", "dave", "bob", "carol"] {
        server.insert_user(UserEntry::new(user_name, "Given", "Family", "secret-password"));
    }

    let first_page = session.retrieve_page(None).await.unwrap();
    assert_eq!(2, first_page.entries.len());
    assert_eq!(Some("carol"), first_page.next_start_username.as_deref());

    let users = session.retrieve_all_users().await.unwrap();
    let user_names: Vec<&str> = users
        .iter()
        .map(|user| user.login.user_name.as_str())
        .collect();
    assert_eq!(vec!["alice", "bob", "carol", "dave", "erin"], user_names);
    assert!(users.iter().all(|user| user.login.password.is_none()));
}

#[tokio::test]
async fn retrieve_all_of_empty_domain() {
    let options = Options::default();
    let (_server, session) = session(&options).await;

    assert!(session.retrieve_all_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_sets_password() {
    let options = Options::default();
    let (server, session) = session(&options).await;
    server.insert_user(UserEntry::new("bob", "Bob", "Jones", "old-password"));

    let mut user = session.retrieve_user("bob").await.unwrap();
    user.login.password = Some("newpass".to_owned());

    let updated = session.update_user("bob", &user).await.unwrap();
    assert_eq!("Bob", updated.name.given_name);
    assert_eq!(None, updated.login.password);

    let stored = server.user("bob").unwrap();
    assert_eq!(Some("newpass"), stored.login.password.as_deref());
}

#[tokio::test]
async fn update_missing_user_fails() {
    let options = Options::default();
    let (_server, session) = session(&options).await;

    let user = UserEntry::new("bob", "Bob", "Jones", "newpass");

    let err = session.update_user("bob", &user).await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn delete_then_retrieve() {
    let options = Options::default();
    let (server, session) = session(&options).await;
    server.insert_user(UserEntry::new("carol", "Carol", "White", "secret-password"));

    session.delete_user("carol").await.unwrap();
    assert_eq!(0, server.user_count());

    let err = session.retrieve_user("carol").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());

    let err = session.delete_user("carol").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn user_names_are_path_encoded() {
    let options = Options::default();
    let (server, session) = session(&options).await;
    server.insert_user(UserEntry::new("first.last", "First", "Last", "secret-password"));

    let user = session.retrieve_user("first.last").await.unwrap();
    assert_eq!("first.last", user.login.user_name);

    let err = session.retrieve_user("a/b").await.unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn unreachable_endpoint() {
    // Bind and drop a listener to get a port nothing is serving on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let client = Client::new(format!("http://{}", addr).parse().unwrap()).unwrap();

    let err = client
        .login(&admin(&Options::default()))
        .await
        .err()
        .unwrap();
    assert_eq!(ErrorKind::NotConnected, err.kind());
}

#[tokio::test]
async fn other_domain_is_denied() {
    let options = Options::default();
    let server = MockServer::start(&options).unwrap();

    let mut credentials = admin(&options);
    credentials.domain = "other.com".to_owned();

    let session = client(&server).login(&credentials).await.unwrap();

    let err = session.retrieve_all_users().await.unwrap_err();
    assert_eq!(ErrorKind::PermissionDenied, err.kind());
    assert_eq!("DomainFeatureUnavailable (1203): other.com", err.to_string());
}
