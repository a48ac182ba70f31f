// Copyright (c) Microsoft. All rights reserved.

use provisioning_common::{ClientLoginRequest, ClientLoginResponse};

use crate::server::Response;

fn login(req: &crate::server::ParsedRequest, context: &crate::server::Context) -> Response {
    let request: ClientLoginRequest = match req.json_body() {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut context = match context.lock() {
        Ok(context) => context,
        Err(poisoned) => poisoned.into_inner(),
    };

    if request.account_type != "HOSTED" && request.account_type != "HOSTED_OR_GOOGLE" {
        return Response::login_error("BadAuthentication");
    }

    if request.service != "apps" {
        return Response::login_error("ServiceUnavailable");
    }

    if !request
        .email
        .eq_ignore_ascii_case(&context.admin.email)
        || request.password != context.admin.password
    {
        return Response::login_error("BadAuthentication");
    }

    let auth = context.issue_token();

    Response::json(hyper::StatusCode::OK, ClientLoginResponse { auth })
}

pub(crate) fn process_request(
    req: &crate::server::ParsedRequest,
    context: &crate::server::Context,
) -> Option<Response> {
    if req.uri != "/accounts/ClientLogin" {
        return None;
    }

    if req.method != hyper::Method::POST {
        return Some(Response::method_not_allowed(&req.method));
    }

    Some(login(req, context))
}
