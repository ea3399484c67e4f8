//! Tests for applications module

#[cfg(test)]
mod extract_tests {
    use crate::applications::extract::{extract_resume_text, DOC_EXTRACTION_PLACEHOLDER};

    #[test]
    fn test_txt_passes_through() {
        let text = extract_resume_text("resume.txt", b"plain text resume");
        assert_eq!(text, "plain text resume");
    }

    #[test]
    fn test_doc_gets_placeholder() {
        let text = extract_resume_text("resume.doc", b"\xd0\xcf\x11\xe0");
        assert_eq!(text, DOC_EXTRACTION_PLACEHOLDER);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let text = extract_resume_text("resume.DOC", b"");
        assert_eq!(text, DOC_EXTRACTION_PLACEHOLDER);
    }

    #[test]
    fn test_invalid_utf8_txt_is_empty() {
        let text = extract_resume_text("resume.txt", &[0xff, 0xfe, 0xfd]);
        assert_eq!(text, "");
    }

    #[test]
    fn test_unknown_extension_is_empty() {
        assert_eq!(extract_resume_text("resume.png", b"binary"), "");
        assert_eq!(extract_resume_text("resume", b"no extension"), "");
    }

    #[test]
    fn test_corrupt_pdf_and_docx_fail_soft() {
        assert_eq!(extract_resume_text("resume.pdf", b"not a pdf"), "");
        assert_eq!(extract_resume_text("resume.docx", b"not a docx"), "");
    }
}

#[cfg(test)]
mod transition_tests {
    use crate::applications::handlers::validate_status_transition;
    use crate::common::ApiError;

    #[test]
    fn test_pending_can_be_reviewed() {
        assert!(validate_status_transition("pending", "shortlisted").is_ok());
        assert!(validate_status_transition("pending", "rejected").is_ok());
    }

    #[test]
    fn test_unknown_target_rejected() {
        let result = validate_status_transition("pending", "hired");
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_reviewed_is_terminal() {
        for current in ["shortlisted", "rejected"] {
            let result = validate_status_transition(current, "shortlisted");
            assert!(matches!(result, Err(ApiError::Conflict(_))));
        }
    }
}

#[cfg(test)]
mod handler_tests {
    use axum::body::Body;
    use axum::extract::{Extension, FromRequest, Multipart, Query};
    use axum::http::Request;
    use axum::response::Json;

    use crate::applications::handlers::{
        get_applications, persist_application, submit_application, update_application_status,
    };
    use crate::applications::models::{ApplicantDetails, ApplicationQuery, UpdateApplicationRequest};
    use crate::auth::AuthedUser;
    use crate::common::test_support::{insert_job, insert_user, test_state};
    use crate::common::ApiError;

    fn authed(id: &str) -> AuthedUser {
        AuthedUser {
            id: id.to_string(),
            email: None,
        }
    }

    fn details(name: &str) -> ApplicantDetails {
        ApplicantDetails {
            full_name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name)),
            years_of_experience: Some(4.5),
            ..Default::default()
        }
    }

    /// Multipart body with a jobId field and a small text resume, as the
    /// frontend would send it.
    async fn resume_submission(job_id: &str) -> Multipart {
        let boundary = "FORMBOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"jobId\"\r\n\r\n\
             {job_id}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"name\"\r\n\r\n\
             Alice\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             plain text resume\r\n\
             --{boundary}--\r\n"
        );

        let request = Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_submission_leaves_no_extra_resume() {
        let state = test_state().await;
        let db = state.read().await.db.clone();
        let resumes_dir = state.read().await.resumes_dir.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_BLOB01", "rec_1").await;

        let first = submit_application(
            Extension(state.clone()),
            authed("cand_1"),
            resume_submission("J_BLOB01").await,
        )
        .await;
        assert!(first.is_ok());

        let second = submit_application(
            Extension(state),
            authed("cand_1"),
            resume_submission("J_BLOB01").await,
        )
        .await;
        assert!(matches!(second, Err(ApiError::Conflict(_))));

        // Only the first submission's resume reached storage
        let stored: Vec<_> = std::fs::read_dir(resumes_dir.join("J_BLOB01"))
            .unwrap()
            .collect();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_increments_applicant_counter() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_APPLY01", "rec_1").await;

        let application = persist_application(
            &db,
            "J_APPLY01",
            "cand_1",
            &details("alice"),
            "http://localhost:8080/api/resumes/J_APPLY01/cand_1-1.pdf",
            "resume text",
        )
        .await
        .unwrap();

        assert_eq!(application.status, "pending");
        assert_eq!(application.job_id, "J_APPLY01");

        let count: i64 = sqlx::query_scalar("SELECT applicants_count FROM jobs WHERE id = ?")
            .bind("J_APPLY01")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_duplicate_application_conflicts() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_DUP001", "rec_1").await;

        persist_application(&db, "J_DUP001", "cand_1", &details("alice"), "url", "text")
            .await
            .unwrap();
        let second =
            persist_application(&db, "J_DUP001", "cand_1", &details("alice"), "url", "text").await;

        assert!(matches!(second, Err(ApiError::Conflict(_))));

        // Neither the row count nor the counter moved on the rejected attempt
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let count: i64 = sqlx::query_scalar("SELECT applicants_count FROM jobs WHERE id = ?")
            .bind("J_DUP001")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_same_candidate_can_apply_to_other_jobs() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_MULTI01", "rec_1").await;
        insert_job(&db, "J_MULTI02", "rec_1").await;

        persist_application(&db, "J_MULTI01", "cand_1", &details("alice"), "url", "")
            .await
            .unwrap();
        let second =
            persist_application(&db, "J_MULTI02", "cand_1", &details("alice"), "url", "").await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_check_reflects_submission() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_CHK001", "rec_1").await;

        let query = || {
            Query(ApplicationQuery {
                job_id: Some("J_CHK001".to_string()),
                check: Some("true".to_string()),
            })
        };

        let before = get_applications(Extension(state.clone()), authed("cand_1"), query()).await;
        assert!(before.is_ok());

        persist_application(&db, "J_CHK001", "cand_1", &details("alice"), "url", "")
            .await
            .unwrap();

        let after = get_applications(Extension(state), authed("cand_1"), query()).await;
        assert!(after.is_ok());
    }

    #[tokio::test]
    async fn test_listing_requires_job_id() {
        let state = test_state().await;

        let result = get_applications(
            Extension(state),
            authed("cand_1"),
            Query(ApplicationQuery {
                job_id: None,
                check: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_listing_joins_scores() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_SCORE01", "rec_1").await;

        let application =
            persist_application(&db, "J_SCORE01", "cand_1", &details("alice"), "url", "")
                .await
                .unwrap();

        sqlx::query("INSERT INTO scores (id, application_id, score) VALUES ('S_1', ?, ?)")
            .bind(&application.id)
            .bind(87.5)
            .execute(&db)
            .await
            .unwrap();

        let result = get_applications(
            Extension(state),
            authed("rec_1"),
            Query(ApplicationQuery {
                job_id: Some("J_SCORE01".to_string()),
                check: None,
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_review_requires_job_ownership() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "rec_2", "other@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_REV001", "rec_1").await;

        let application =
            persist_application(&db, "J_REV001", "cand_1", &details("alice"), "url", "")
                .await
                .unwrap();

        let result = update_application_status(
            Extension(state.clone()),
            authed("rec_2"),
            Json(UpdateApplicationRequest {
                application_id: application.id.clone(),
                status: "shortlisted".to_string(),
                feedback: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let status: String = sqlx::query_scalar("SELECT status FROM applications WHERE id = ?")
            .bind(&application.id)
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(status, "pending");
    }

    #[tokio::test]
    async fn test_owner_shortlists_and_review_is_final() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_FIN001", "rec_1").await;

        let application =
            persist_application(&db, "J_FIN001", "cand_1", &details("alice"), "url", "")
                .await
                .unwrap();

        let response = update_application_status(
            Extension(state.clone()),
            authed("rec_1"),
            Json(UpdateApplicationRequest {
                application_id: application.id.clone(),
                status: "shortlisted".to_string(),
                feedback: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.0.application.status, "shortlisted");

        let again = update_application_status(
            Extension(state),
            authed("rec_1"),
            Json(UpdateApplicationRequest {
                application_id: application.id,
                status: "rejected".to_string(),
                feedback: None,
            }),
        )
        .await;
        assert!(matches!(again, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_rejection_feedback_persists() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        insert_user(&db, "rec_1", "rec@example.com", Some("recruiter")).await;
        insert_user(&db, "cand_1", "cand@example.com", Some("candidate")).await;
        insert_job(&db, "J_FBK001", "rec_1").await;

        let application =
            persist_application(&db, "J_FBK001", "cand_1", &details("alice"), "url", "")
                .await
                .unwrap();

        let response = update_application_status(
            Extension(state),
            authed("rec_1"),
            Json(UpdateApplicationRequest {
                application_id: application.id,
                status: "rejected".to_string(),
                feedback: Some("Not enough backend experience".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.application.status, "rejected");
        assert_eq!(
            response.0.application.rejection_feedback.as_deref(),
            Some("Not enough backend experience")
        );
    }

    #[tokio::test]
    async fn test_review_unknown_application_not_found() {
        let state = test_state().await;

        let result = update_application_status(
            Extension(state),
            authed("rec_1"),
            Json(UpdateApplicationRequest {
                application_id: "A_MISSING".to_string(),
                status: "rejected".to_string(),
                feedback: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
