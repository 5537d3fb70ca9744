//! HTTP router.
//!
//! Returns a composable `Router` with every clinic route, the request
//! logging middleware and `Cache-Control: no-store` on all responses.

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::state::ClinicState;

/// Build the clinic router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7). Static
/// segments such as `/patients/new` take priority over `/patients/:id`.
pub fn clinic_router(state: ClinicState) -> Router {
    Router::new()
        .route("/", get(endpoints::dashboard::summary))
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/new",
            get(endpoints::patients::new_form).post(endpoints::patients::create),
        )
        .route("/patients/:id", get(endpoints::patients::detail))
        .route(
            "/patients/:id/edit",
            get(endpoints::patients::edit_form).post(endpoints::patients::update),
        )
        .route("/patients/:id/delete", post(endpoints::patients::delete))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route(
            "/appointments/new",
            get(endpoints::appointments::new_form).post(endpoints::appointments::create),
        )
        .route("/appointments/:id", get(endpoints::appointments::detail))
        .route(
            "/appointments/:id/edit",
            get(endpoints::appointments::edit_form).post(endpoints::appointments::update),
        )
        .route(
            "/appointments/:id/delete",
            post(endpoints::appointments::delete),
        )
        .route(
            "/appointments/:id/complete",
            post(endpoints::appointments::complete),
        )
        .route(
            "/diagnostics/:patient_id",
            get(endpoints::diagnostics::list).post(endpoints::diagnostics::create),
        )
        .route(
            "/export/patient/:id",
            get(endpoints::export::patient_report),
        )
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::config::Config;

    /// State backed by a migrated database in a temp directory.
    /// The tempdir guard must be kept alive for the duration of the test.
    fn test_state(seed: bool) -> (ClinicState, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let state = ClinicState::new(Config {
            database_path: tmp.path().join("clinic.db"),
            seed_demo_data: seed,
            ..Config::default()
        });
        state.prepare_storage().unwrap();
        (state, tmp)
    }

    async fn get(state: &ClinicState, uri: &str) -> Response {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        clinic_router(state.clone()).oneshot(req).await.unwrap()
    }

    async fn post_form(state: &ClinicState, uri: &str, body: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        clinic_router(state.clone()).oneshot(req).await.unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers().get(LOCATION).unwrap().to_str().unwrap()
    }

    async fn create_patient(state: &ClinicState, body: &str) -> i64 {
        let response = post_form(state, "/patients", body).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn dashboard_on_empty_store() {
        let (state, _tmp) = test_state(false);
        let response = get(&state, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CACHE_CONTROL).unwrap(), "no-store");

        let body = json(response).await;
        assert_eq!(body["total_patients"], 0);
        assert_eq!(body["appointments_by_status"], serde_json::json!([]));
        assert_eq!(body["patients_by_gender"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn dashboard_reflects_seed_data() {
        let (state, _tmp) = test_state(true);
        let body = json(get(&state, "/").await).await;
        assert_eq!(body["total_patients"], 5);
        assert_eq!(body["total_appointments"], 3);
        assert_eq!(body["total_diagnostics"], 3);
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (state, _tmp) = test_state(false);
        let body = json(get(&state, "/health").await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], true);
    }

    #[tokio::test]
    async fn create_patient_redirects_and_persists() {
        let (state, _tmp) = test_state(false);
        let response = post_form(
            &state,
            "/patients/new",
            "first_name=Ann&last_name=Lee&dob=1990-04-02&gender=Female&contact=555-0199",
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/patients");
        let notice = json(response).await;
        assert_eq!(notice["level"], "success");
        let id = notice["id"].as_i64().unwrap();

        let bundle = json(get(&state, &format!("/patients/{id}")).await).await;
        assert_eq!(bundle["patient"]["first_name"], "Ann");
        assert_eq!(bundle["patient"]["contact"], "555-0199");
        assert_eq!(bundle["appointments"], serde_json::json!([]));
        assert_eq!(bundle["diagnostics"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_patient_without_last_name_rejected() {
        let (state, _tmp) = test_state(false);
        let response = post_form(&state, "/patients", "first_name=Ann").await;
        assert!(response.status().is_client_error());
        let body = json(get(&state, "/").await).await;
        assert_eq!(body["total_patients"], 0);
    }

    #[tokio::test]
    async fn patient_list_sorted_by_name() {
        let (state, _tmp) = test_state(false);
        create_patient(&state, "first_name=Zoe&last_name=Brown").await;
        create_patient(&state, "first_name=Carl&last_name=Adams").await;
        create_patient(&state, "first_name=Anna&last_name=Brown").await;

        let body = json(get(&state, "/patients").await).await;
        let names: Vec<String> = body["patients"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["first_name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Carl", "Anna", "Zoe"]);
    }

    #[tokio::test]
    async fn unknown_patient_redirects_with_error() {
        let (state, _tmp) = test_state(false);
        for uri in ["/patients/41", "/patients/41/edit", "/diagnostics/41", "/export/patient/41"] {
            let response = get(&state, uri).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&response), "/patients");
            assert_eq!(json(response).await["message"], "Patient not found!");
        }
    }

    #[tokio::test]
    async fn update_and_delete_patient() {
        let (state, _tmp) = test_state(false);
        let id = create_patient(&state, "first_name=Ann&last_name=Lee").await;

        let response = post_form(
            &state,
            &format!("/patients/{id}/edit"),
            "first_name=Anne&last_name=Lee&gender=Female",
        )
        .await;
        assert_eq!(location(&response), format!("/patients/{id}"));
        let patient = json(get(&state, &format!("/patients/{id}/edit")).await).await;
        assert_eq!(patient["first_name"], "Anne");
        assert_eq!(patient["gender"], "Female");

        let response = post_form(&state, &format!("/patients/{id}/delete"), "").await;
        assert_eq!(location(&response), "/patients");
        let response = get(&state, &format!("/patients/{id}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = post_form(&state, &format!("/patients/{id}/delete"), "").await;
        assert_eq!(json(response).await["level"], "error");
    }

    #[tokio::test]
    async fn appointment_lifecycle() {
        let (state, _tmp) = test_state(false);
        let pid = create_patient(&state, "first_name=Ann&last_name=Lee").await;

        let response = post_form(
            &state,
            "/appointments",
            &format!("patient_id={pid}&appt_datetime=2024-12-15+10%3A00&reason=Checkup"),
        )
        .await;
        assert_eq!(location(&response), "/appointments");
        let id = json(response).await["id"].as_i64().unwrap();

        let appt = json(get(&state, &format!("/appointments/{id}")).await).await;
        assert_eq!(appt["status"], "scheduled");
        assert_eq!(appt["appt_datetime"], "2024-12-15 10:00");

        post_form(&state, &format!("/appointments/{id}/complete"), "").await;
        let list = json(get(&state, "/appointments").await).await;
        assert_eq!(list["appointments"][0]["status"], "completed");
        assert_eq!(list["appointments"][0]["last_name"], "Lee");

        let response = post_form(
            &state,
            &format!("/appointments/{id}/edit"),
            &format!("patient_id={pid}&appt_datetime=2024-12-16+10%3A00&status=cancelled"),
        )
        .await;
        assert_eq!(json(response).await["level"], "success");
        let ctx = json(get(&state, &format!("/appointments/{id}/edit")).await).await;
        assert_eq!(ctx["appointment"]["status"], "cancelled");
        assert_eq!(ctx["appointment"]["reason"], "");
        assert_eq!(ctx["patients"].as_array().unwrap().len(), 1);

        post_form(&state, &format!("/appointments/{id}/delete"), "").await;
        let response = get(&state, &format!("/appointments/{id}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/appointments");
    }

    #[tokio::test]
    async fn appointment_form_lists_statuses() {
        let (state, _tmp) = test_state(true);
        let ctx = json(get(&state, "/appointments/new").await).await;
        assert_eq!(
            ctx["statuses"],
            serde_json::json!(["scheduled", "completed", "cancelled"])
        );
        assert_eq!(ctx["patients"].as_array().unwrap().len(), 5);
        assert!(ctx["appointment"].is_null());
    }

    #[tokio::test]
    async fn appointment_with_unknown_status_rejected() {
        let (state, _tmp) = test_state(false);
        let pid = create_patient(&state, "first_name=Ann&last_name=Lee").await;
        let response = post_form(
            &state,
            "/appointments",
            &format!("patient_id={pid}&appt_datetime=2024-12-15&status=postponed"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn appointment_for_unknown_patient_redirects() {
        let (state, _tmp) = test_state(false);
        let response = post_form(
            &state,
            "/appointments/new",
            "patient_id=99&appt_datetime=2024-12-15",
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(json(response).await["message"], "Patient not found!");
        let body = json(get(&state, "/").await).await;
        assert_eq!(body["total_appointments"], 0);
    }

    #[tokio::test]
    async fn complete_unknown_appointment_redirects() {
        let (state, _tmp) = test_state(false);
        let response = post_form(&state, "/appointments/5/complete", "").await;
        assert_eq!(location(&response), "/appointments");
        assert_eq!(json(response).await["message"], "Appointment not found!");
    }

    #[tokio::test]
    async fn diagnostics_add_and_list() {
        let (state, _tmp) = test_state(false);
        let pid = create_patient(&state, "first_name=Ann&last_name=Lee").await;

        for (when, notes) in [("2024-01-01+09%3A00", "first"), ("2024-02-01+09%3A00", "second")] {
            let response = post_form(
                &state,
                &format!("/diagnostics/{pid}"),
                &format!("diag_datetime={when}&notes={notes}"),
            )
            .await;
            assert_eq!(location(&response), format!("/diagnostics/{pid}"));
        }

        let body = json(get(&state, &format!("/diagnostics/{pid}")).await).await;
        assert_eq!(body["patient"]["last_name"], "Lee");
        assert_eq!(body["diagnostics"][0]["notes"], "second");
        assert_eq!(body["diagnostics"][1]["notes"], "first");
    }

    #[tokio::test]
    async fn diagnostic_for_unknown_patient_redirects() {
        let (state, _tmp) = test_state(false);
        let response = post_form(&state, "/diagnostics/8", "diag_datetime=2024-01-01").await;
        assert_eq!(location(&response), "/patients");
        let body = json(get(&state, "/").await).await;
        assert_eq!(body["total_diagnostics"], 0);
    }

    #[tokio::test]
    async fn export_returns_pdf_attachment() {
        let (state, _tmp) = test_state(false);
        let pid = create_patient(&state, "first_name=Ann&last_name=Lee").await;

        let response = get(&state, &format!("/export/patient/{pid}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/pdf");
        assert_eq!(
            response.headers().get(CONTENT_DISPOSITION).unwrap(),
            &format!("attachment; filename=\"patient_{pid}_report.pdf\"")
        );
        let body = to_bytes(response.into_body(), 1 << 22).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }
}
