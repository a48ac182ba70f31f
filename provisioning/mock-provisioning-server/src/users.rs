// Copyright (c) Microsoft. All rights reserved.

use provisioning_common::{AppsErrorCode, UserEntry, UserFeed};

use crate::server::{ContextInner, ParsedRequest, Response};

/// Stored entries keep their password. Responses never carry it.
fn without_password(user: &UserEntry) -> UserEntry {
    let mut user = user.clone();
    user.login.password = None;
    user
}

fn validate(user: &UserEntry) -> Result<(), Response> {
    let invalid = |code| {
        Err(Response::apps_error(
            hyper::StatusCode::BAD_REQUEST,
            code,
            Some(&user.login.user_name),
        ))
    };

    if user.login.user_name.is_empty() || user.login.user_name.contains('@') {
        return invalid(AppsErrorCode::InvalidUsername);
    }

    if user.name.given_name.is_empty() {
        return invalid(AppsErrorCode::InvalidGivenName);
    }

    if user.name.family_name.is_empty() {
        return invalid(AppsErrorCode::InvalidFamilyName);
    }

    Ok(())
}

fn list_users(context: &ContextInner, start_username: Option<&str>) -> Response {
    let start = start_username.unwrap_or_default().to_owned();

    let mut users = context.users.range(start..);

    let entries: Vec<UserEntry> = users
        .by_ref()
        .take(context.page_size)
        .map(|(_, user)| without_password(user))
        .collect();
    let next_start_username = users.next().map(|(user_name, _)| user_name.clone());

    Response::json(
        hyper::StatusCode::OK,
        UserFeed {
            entries,
            next_start_username,
        },
    )
}

fn create_user(req: &ParsedRequest, context: &mut ContextInner) -> Response {
    let user: UserEntry = match req.json_body() {
        Ok(user) => user,
        Err(response) => return response,
    };

    if let Err(response) = validate(&user) {
        return response;
    }

    if user.login.password.as_deref().unwrap_or_default().is_empty() {
        return Response::apps_error(
            hyper::StatusCode::BAD_REQUEST,
            AppsErrorCode::InvalidPassword,
            Some(&user.login.user_name),
        );
    }

    if context.users.contains_key(&user.login.user_name) {
        return Response::apps_error(
            hyper::StatusCode::BAD_REQUEST,
            AppsErrorCode::EntityExists,
            Some(&user.login.user_name),
        );
    }

    let response = Response::json(hyper::StatusCode::CREATED, without_password(&user));
    context.users.insert(user.login.user_name.clone(), user);

    response
}

fn user_action(req: &ParsedRequest, user_name: &str, context: &mut ContextInner) -> Response {
    let not_found = || {
        Response::apps_error(
            hyper::StatusCode::NOT_FOUND,
            AppsErrorCode::EntityDoesNotExist,
            Some(user_name),
        )
    };

    match req.method {
        hyper::Method::GET => match context.users.get(user_name) {
            Some(user) => Response::json(hyper::StatusCode::OK, without_password(user)),
            None => not_found(),
        },

        hyper::Method::PUT => {
            let mut update: UserEntry = match req.json_body() {
                Ok(update) => update,
                Err(response) => return response,
            };

            if update.login.user_name != user_name {
                return Response::apps_error(
                    hyper::StatusCode::BAD_REQUEST,
                    AppsErrorCode::InvalidUsername,
                    Some(&update.login.user_name),
                );
            }

            if let Err(response) = validate(&update) {
                return response;
            }

            let existing = match context.users.get_mut(user_name) {
                Some(existing) => existing,
                None => return not_found(),
            };

            // Omitting the password leaves it unchanged.
            if update.login.password.is_none() {
                update.login.password = existing.login.password.take();
            }
            *existing = update;

            Response::json(hyper::StatusCode::OK, without_password(existing))
        }

        hyper::Method::DELETE => match context.users.remove(user_name) {
            Some(_) => Response::no_content(),
            None => not_found(),
        },

        _ => Response::method_not_allowed(&req.method),
    }
}

fn is_authorized(req: &ParsedRequest, context: &ContextInner) -> bool {
    req.headers
        .get("authorization")
        .and_then(|value| value.strip_prefix("GoogleLogin auth="))
        .map_or(false, |token| context.tokens.contains(token))
}

pub(crate) fn process_request(
    req: &ParsedRequest,
    context: &crate::server::Context,
) -> Option<Response> {
    lazy_static::lazy_static! {
        static ref USERS_REGEX: regex::Regex = regex::Regex::new(
            "^/a/feeds/(?P<domain>[^/]+)/user/2\\.0(/(?P<userName>[^/?]+))?/?(\\?(?P<query>.*))?$"
        ).expect("hard-coded regex must compile");
    }

    let captures = USERS_REGEX.captures(&req.uri)?;

    let domain = match crate::server::get_param(&captures, "domain") {
        Ok(domain) => domain,
        Err(response) => return Some(response),
    };

    let user_name = match captures.name("userName") {
        Some(_) => match crate::server::get_param(&captures, "userName") {
            Ok(user_name) => Some(user_name),
            Err(response) => return Some(response),
        },
        None => None,
    };

    let start_username = captures.name("query").and_then(|query| {
        url::form_urlencoded::parse(query.as_str().as_bytes())
            .find(|(key, _)| key == "startUsername")
            .map(|(_, value)| value.into_owned())
    });

    let mut context = match context.lock() {
        Ok(context) => context,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !is_authorized(req, &context) {
        return Some(Response::unauthorized());
    }

    if !domain.eq_ignore_ascii_case(&context.admin.domain) {
        return Some(Response::apps_error(
            hyper::StatusCode::FORBIDDEN,
            AppsErrorCode::DomainFeatureUnavailable,
            Some(&domain),
        ));
    }

    let response = match (user_name, &req.method) {
        (Some(user_name), _) => user_action(req, &user_name, &mut context),
        (None, &hyper::Method::GET) => list_users(&context, start_username.as_deref()),
        (None, &hyper::Method::POST) => create_user(req, &mut context),
        (None, method) => Response::method_not_allowed(method),
    };

    Some(response)
}
