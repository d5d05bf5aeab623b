//! App Router

use salvo::{Router, handler};

use crate::{
    analytics, auth, contact, courses, dashboard, functions, healthcheck,
    observability::metrics_handler, registrations, session,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("courses").get(courses::catalogue::handler))
        .push(Router::with_path("registrations").post(registrations::create::handler))
        .push(Router::with_path("contact").post(contact::handler))
        .push(functions_router())
        .push(admin_router())
}

fn functions_router() -> Router {
    Router::with_path("functions")
        .hoop(functions::cors())
        .push(
            Router::with_path("forward-to-webhook")
                .post(functions::forward::handler)
                .options(handler::empty()),
        )
        .push(
            Router::with_path("record-registration")
                .post(functions::record::handler)
                .options(handler::empty()),
        )
        .push(
            Router::with_path("send-admin-email")
                .post(functions::email::handler)
                .options(handler::empty()),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .push(
            Router::with_path("session")
                .post(session::create::handler)
                .delete(session::delete::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("dashboard").get(dashboard::handler))
                .push(
                    Router::with_path("courses")
                        .get(courses::index::handler)
                        .post(courses::create::handler)
                        .push(
                            Router::with_path("{course}")
                                .put(courses::update::handler)
                                .delete(courses::delete::handler)
                                .push(Router::with_path("lists").patch(courses::lists::handler)),
                        ),
                )
                .push(
                    Router::with_path("registrations")
                        .get(registrations::index::handler)
                        .push(
                            Router::with_path("{registration}/status")
                                .put(registrations::status::handler),
                        ),
                )
                .push(Router::with_path("analytics").get(analytics::report::handler)),
        )
}
