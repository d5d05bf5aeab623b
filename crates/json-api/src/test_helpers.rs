//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use academy_app::{
    auth::{AdminUser, AdminUserUuid, MockAuthService},
    context::AppContext,
    domain::{
        analytics::MockAnalyticsService,
        courses::{
            MockCoursesService,
            data::CourseDraft,
            records::{CourseRecord, CourseUuid},
        },
        registrations::{
            MockRegistrationsService,
            records::{RegistrationRecord, RegistrationUuid},
            status::RegistrationStatus,
        },
        submissions::MockSubmissionsService,
    },
    relay::{email::MockAdminNotifier, webhook::MockWebhookForwarder},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN_UUID: AdminUserUuid = AdminUserUuid::from_uuid(Uuid::nil());

pub(crate) fn make_admin() -> AdminUser {
    AdminUser {
        uuid: TEST_ADMIN_UUID,
        email: "admin@example.com".to_string(),
        last_dashboard_view: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_course(uuid: CourseUuid, code: &str) -> CourseRecord {
    CourseRecord {
        uuid,
        details: CourseDraft {
            course_code: code.to_string(),
            course_name: "Team Leadership".to_string(),
            upcoming_date: Some("2026-11-03".to_string()),
            credits: 12,
            key_topics: vec!["Delegation".to_string()],
            ..CourseDraft::default()
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_registration(uuid: RegistrationUuid, status: RegistrationStatus) -> RegistrationRecord {
    RegistrationRecord {
        uuid,
        name: "Thandi Mokoena".to_string(),
        email: "thandi@example.com".to_string(),
        phone: "+27821234567".to_string(),
        company_name: None,
        vat_number: None,
        course_selection: "SP-201201".to_string(),
        number_of_seats: 2,
        status,
        submission_date: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin(make_admin());
    ctrl.call_next(req, depot, res).await;
}

fn strict_registrations_mock() -> MockRegistrationsService {
    let mut registrations = MockRegistrationsService::new();

    registrations.expect_list_registrations().never();
    registrations.expect_create_registration().never();
    registrations.expect_update_status().never();

    registrations
}

fn strict_courses_mock() -> MockCoursesService {
    let mut courses = MockCoursesService::new();

    courses.expect_list_courses().never();
    courses.expect_create_course().never();
    courses.expect_update_course().never();
    courses.expect_edit_lists().never();
    courses.expect_delete_course().never();
    courses.expect_seed_defaults().never();

    courses
}

fn strict_submissions_mock() -> MockSubmissionsService {
    let mut submissions = MockSubmissionsService::new();

    submissions.expect_record_submission().never();

    submissions
}

fn strict_analytics_mock() -> MockAnalyticsService {
    let mut analytics = MockAnalyticsService::new();

    analytics.expect_report().never();

    analytics
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_sign_in().never();
    auth.expect_authenticate().never();
    auth.expect_sign_out().never();
    auth.expect_record_dashboard_view().never();

    auth
}

fn strict_webhook_mock() -> MockWebhookForwarder {
    let mut webhook = MockWebhookForwarder::new();

    webhook.expect_forward().never();
    webhook.expect_forward_raw().never();

    webhook
}

fn strict_notifier_mock() -> MockAdminNotifier {
    let mut notifier = MockAdminNotifier::new();

    notifier.expect_notify().never();

    notifier
}

/// Service mocks for handler tests. Anything not overridden refuses every call.
pub(crate) struct TestServices {
    pub(crate) registrations: MockRegistrationsService,
    pub(crate) courses: MockCoursesService,
    pub(crate) submissions: MockSubmissionsService,
    pub(crate) analytics: MockAnalyticsService,
    pub(crate) auth: MockAuthService,
    pub(crate) webhook: MockWebhookForwarder,
    pub(crate) admin_notifier: MockAdminNotifier,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            registrations: strict_registrations_mock(),
            courses: strict_courses_mock(),
            submissions: strict_submissions_mock(),
            analytics: strict_analytics_mock(),
            auth: strict_auth_mock(),
            webhook: strict_webhook_mock(),
            admin_notifier: strict_notifier_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            registrations: Arc::new(self.registrations),
            courses: Arc::new(self.courses),
            submissions: Arc::new(self.submissions),
            analytics: Arc::new(self.analytics),
            auth: Arc::new(self.auth),
            webhook: Arc::new(self.webhook),
            admin_notifier: Arc::new(self.admin_notifier),
        })
    }

    /// A service with the state injected and no admin.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// A service that behaves as if the auth middleware let [`make_admin`] through.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}
