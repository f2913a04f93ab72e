//! End-to-end scenarios for the application form workflow: option loading
//! with partial failures, the dependent selection cascade, and multipart
//! create/update submission against a mock API.

mod common {
    use std::sync::Arc;

    use rti_portal::api::{ApiClient, Session, SessionStore};
    use rti_portal::config::ApiConfig;

    pub(super) fn session() -> Session {
        Session {
            token: "tok".to_string(),
            refresh_token: "refresh".to_string(),
            user_name: "clerk".to_string(),
            email: "clerk@rti.example.gov".to_string(),
            role: "operator".to_string(),
            id: "u-17".to_string(),
        }
    }

    pub(super) fn signed_in_client(server: &mockito::ServerGuard) -> Arc<ApiClient> {
        let config = ApiConfig::new(server.url()).expect("mock server url is valid");
        let store = Arc::new(SessionStore::new());
        store.set(session());
        Arc::new(ApiClient::new(&config, store))
    }

    pub(super) fn list_envelope(entries: &[(&str, &str)]) -> String {
        let items: Vec<String> = entries
            .iter()
            .map(|(id, name)| format!(r#"{{"id":"{id}","name":"{name}"}}"#))
            .collect();
        format!(r#"{{"errorCode":0,"data":[{}]}}"#, items.join(","))
    }

    pub(super) fn record_envelope(id: &str) -> String {
        format!(
            r#"{{"errorCode":0,"data":{{
                "id":"{id}",
                "applicant_name":"Asha Verma",
                "father_name":"Ram Verma",
                "mobile_no":"9876543210",
                "email":"asha@example.in",
                "address":"12 Lake Road, Kolkata",
                "area":"rural",
                "village":"Rampur",
                "panchayat":"Rampur GP",
                "state_id":"st-1",
                "district_id":"dt-9",
                "pincode":"700012",
                "applicant_query":[{{"query":"Copy of the sanction order","pollution_id":"cat-2"}}],
                "bpl":true,
                "fees_receive":false
            }}}}"#
        )
    }

    /// Mount the four independent reference-list endpoints with one entry
    /// each so `ApplicationForm::load` succeeds quietly.
    pub(super) async fn mount_catalog(server: &mut mockito::ServerGuard) {
        for (path, id, name) in [
            ("/states", "st-1", "West Bengal"),
            ("/pollution-types", "cat-2", "Water"),
            ("/fees-categories", "fee-1", "Court fee stamp"),
            ("/municipalities", "mun-1", "Kolkata"),
        ] {
            server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(list_envelope(&[(id, name)]))
                .create_async()
                .await;
        }
    }
}

mod loading {
    use super::common::*;
    use rti_portal::workflows::application::{ApplicationForm, Area};

    #[tokio::test]
    async fn failed_reference_lists_degrade_to_empty_without_blocking_siblings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/states")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("st-1", "West Bengal")]))
            .create_async()
            .await;
        server
            .mock("GET", "/pollution-types")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/fees-categories")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":3,"message":"unavailable"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/municipalities")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("mun-1", "Kolkata")]))
            .create_async()
            .await;

        let form = ApplicationForm::load(signed_in_client(&server), None).await;

        let catalog = form.catalog();
        assert_eq!(catalog.states.len(), 1);
        assert!(catalog.question_categories.is_empty());
        assert!(catalog.fee_categories.is_empty());
        assert_eq!(catalog.municipalities.len(), 1);
    }

    #[tokio::test]
    async fn edit_hydration_fills_the_draft_and_toggles() {
        let mut server = mockito::Server::new_async().await;
        mount_catalog(&mut server).await;
        server
            .mock("GET", "/applications/app-42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_envelope("app-42"))
            .create_async()
            .await;

        let form = ApplicationForm::load(signed_in_client(&server), Some("app-42")).await;

        assert!(form.is_edit());
        assert_eq!(form.draft().area, Area::Rural);
        assert_eq!(form.draft().village, "Rampur");
        assert!(form.draft().bpl);
        let visibility = form.visibility();
        assert!(visibility.rural_fields && visibility.bpl_certificate);
        assert!(!visibility.fees_section);
    }

    #[tokio::test]
    async fn edit_fetch_failure_falls_back_to_a_blank_form() {
        let mut server = mockito::Server::new_async().await;
        mount_catalog(&mut server).await;
        server
            .mock("GET", "/applications/app-gone")
            .with_status(500)
            .create_async()
            .await;

        let form = ApplicationForm::load(signed_in_client(&server), Some("app-gone")).await;

        assert!(!form.is_edit());
        assert!(form.draft().applicant_name.is_empty());
        assert_eq!(form.catalog().states.len(), 1);
    }
}

mod cascade {
    use super::common::*;
    use mockito::Matcher;
    use rti_portal::workflows::application::ApplicationForm;

    #[tokio::test]
    async fn selecting_a_state_loads_districts_scoped_to_it() {
        let mut server = mockito::Server::new_async().await;
        let districts = server
            .mock("GET", "/districts")
            .match_query(Matcher::UrlEncoded("state_id".into(), "st-1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("dt-9", "Howrah"), ("dt-10", "Nadia")]))
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        form.select_state("st-1").await;

        districts.assert_async().await;
        assert!(form.districts().contains("dt-9"));
        assert_eq!(form.draft().state_id, "st-1");
        assert!(form.draft().district_id.is_empty());
    }

    #[tokio::test]
    async fn changing_the_parent_clears_every_downstream_list_and_selection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/districts")
            .match_query(Matcher::UrlEncoded("state_id".into(), "st-1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("dt-9", "Howrah")]))
            .create_async()
            .await;
        server
            .mock("GET", "/districts")
            .match_query(Matcher::UrlEncoded("state_id".into(), "st-2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("dt-77", "Patna")]))
            .create_async()
            .await;
        server
            .mock("GET", "/police-stations")
            .match_query(Matcher::UrlEncoded("district_id".into(), "dt-9".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(list_envelope(&[("ps-3", "Shibpur")]))
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        form.select_state("st-1").await;
        form.select_district("dt-9").await;
        assert!(form.police_stations().contains("ps-3"));

        form.select_state("st-2").await;

        assert!(form.districts().contains("dt-77"));
        assert!(form.police_stations().entries().is_empty());
        assert!(form.post_offices().entries().is_empty());
        assert!(form.draft().district_id.is_empty());
        assert!(form.draft().police_station_id.is_empty());
        assert!(form.draft().post_office_id.is_empty());
    }

    #[tokio::test]
    async fn dependent_fetch_failure_leaves_an_empty_dropdown() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/districts")
            .match_query(Matcher::UrlEncoded("state_id".into(), "st-1".into()))
            .with_status(502)
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        form.select_state("st-1").await;

        assert!(form.districts().entries().is_empty());
        assert_eq!(form.draft().state_id, "st-1");
    }
}

mod submission {
    use super::common::*;
    use mockito::Matcher;
    use rti_portal::workflows::application::{ApplicationForm, SubmitError};

    fn fill_draft(form: &mut ApplicationForm) {
        let draft = form.draft_mut();
        draft.applicant_name = "Asha Verma".to_string();
        draft.father_name = "Ram Verma".to_string();
        draft.mobile_no = "9876543210".to_string();
        draft.email = "asha@example.in".to_string();
        draft.address = "12 Lake Road, Kolkata".to_string();
        draft.state_id = "st-1".to_string();
        draft.district_id = "dt-9".to_string();
        draft.pincode = "700012".to_string();
        draft.applicant_query[0].query = "Copy of the sanction order".to_string();
        draft.applicant_query[0].pollution_id = "cat-2".to_string();
        draft.fees_not_receive_reason = "Applicant paid at the counter".to_string();
    }

    #[tokio::test]
    async fn new_application_is_posted_as_multipart_with_a_json_query_field() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/applications")
            .match_header("authorization", "Bearer tok")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="applicant_query""#.to_string()),
                Matcher::Regex(r#"\[\{"query":"Copy of the sanction order","pollution_id":"cat-2"\}\]"#.to_string()),
                Matcher::Regex(r#"name="bpl"\s+true"#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_envelope("app-99"))
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        fill_draft(&mut form);
        form.set_bpl(true);
        form.draft_mut().bpl_file = Some(rti_portal::workflows::application::FileAttachment {
            file_name: "bpl.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 certificate".to_vec(),
        });

        let record = form.submit().await.expect("submission succeeds");

        create.assert_async().await;
        assert_eq!(record.id, "app-99");
    }

    #[tokio::test]
    async fn editing_an_existing_application_issues_a_put() {
        let mut server = mockito::Server::new_async().await;
        mount_catalog(&mut server).await;
        server
            .mock("GET", "/applications/app-42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_envelope("app-42"))
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/applications/app-42")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_envelope("app-42"))
            .create_async()
            .await;

        let mut form = ApplicationForm::load(signed_in_client(&server), Some("app-42")).await;
        // The stored record is BPL but the certificate bytes never come
        // back from the server; re-attach before resubmitting.
        form.draft_mut().bpl_file = Some(rti_portal::workflows::application::FileAttachment {
            file_name: "bpl.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 certificate".to_vec(),
        });

        form.submit().await.expect("update succeeds");
        update.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_draft_blocks_submission_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/applications")
            .expect(0)
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        let outcome = form.submit().await;

        match outcome {
            Err(SubmitError::Validation(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected validation failure, got {other:?}"),
        }
        create.assert_async().await;
    }

    #[tokio::test]
    async fn application_level_failure_is_surfaced_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/applications")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode":12,"message":"duplicate application"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut form = ApplicationForm::new(signed_in_client(&server));
        fill_draft(&mut form);

        match form.submit().await {
            Err(SubmitError::Api(error)) => {
                assert!(error.to_string().contains("duplicate application"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
        create.assert_async().await;
    }
}
