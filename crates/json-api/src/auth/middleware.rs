//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{auth::into_status_error, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.auth.authenticate(token).await {
        Ok(admin) => depot.insert_admin(admin),
        Err(error) => {
            res.render(into_status_error(error));
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// The bearer token from the `Authorization` header, if well formed.
pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use academy_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::{TestServices, make_admin};

    use super::*;

    #[salvo::handler]
    async fn echo_admin(depot: &mut Depot, res: &mut Response) {
        let email = depot
            .admin_or_401()
            .map_or_else(|_| "missing".to_string(), |admin| admin.email.clone());

        res.render(email);
    }

    fn make_service(auth: MockAuthService) -> Service {
        TestServices {
            auth,
            ..TestServices::default()
        }
        .service(Router::new().hoop(handler).push(Router::new().get(echo_admin)))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(
            res.status_code,
            Some(StatusCode::UNAUTHORIZED),
            "requests without a token are rejected"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(
            res.status_code,
            Some(StatusCode::UNAUTHORIZED),
            "only bearer tokens are accepted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .with(eq("abc123"))
            .return_once(|_| Err(AuthServiceError::NotAdmin));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(
            res.status_code,
            Some(StatusCode::UNAUTHORIZED),
            "signed-in users without an admin row are rejected"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_admin() -> TestResult {
        let admin = make_admin();

        let mut auth = MockAuthService::new();

        auth.expect_authenticate()
            .once()
            .with(eq("abc123"))
            .return_once(move |_| Ok(admin));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK), "admin passes through");
        assert_eq!(
            res.take_string().await?,
            "admin@example.com",
            "admin is available to later handlers"
        );

        Ok(())
    }
}
