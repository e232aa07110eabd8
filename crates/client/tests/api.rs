//! REST wrapper behaviour against the fake backend.

mod common;

use askknightro_client::ApiError;
use askknightro_core::models::{CourseDraft, EnrollmentRequest, MaterialFile};
use askknightro_core::roles::Role;
use assert_matches::assert_matches;

use common::{course, spawn, Backend};

// ---------------------------------------------------------------------------
// Bearer token is attached only when present
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bearer_token_is_sent_when_set() {
    let backend = spawn(Backend {
        courses: vec![course(1, "Physics", None, "PHY")],
        ..Default::default()
    })
    .await;

    backend.api().get_course(1).await.unwrap();
    backend
        .api()
        .with_token(Some("abc.def.ghi".into()))
        .get_course(1)
        .await
        .unwrap();

    let auth = backend.state().authorization.clone();
    assert_eq!(auth, vec![None, Some("Bearer abc.def.ghi".to_string())]);
}

// ---------------------------------------------------------------------------
// Error bodies map to typed variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_course_is_not_found() {
    let backend = spawn(Backend::default()).await;
    let err = backend.api().get_course(42).await.unwrap_err();
    assert_matches!(err, ApiError::NotFound { message } if message == "Course 42 not found");
}

#[tokio::test]
async fn duplicate_enrollment_is_a_conflict() {
    let mut state = Backend {
        courses: vec![course(3, "Biology", None, "BIO3")],
        ..Default::default()
    };
    state.enrollments.insert(3, vec![8]);
    let backend = spawn(state).await;

    let err = backend
        .api()
        .enroll(&EnrollmentRequest {
            student_id: 8,
            enrollment_code: "BIO3".into(),
        })
        .await
        .unwrap_err();
    assert_matches!(&err, ApiError::Conflict { .. });
    assert_eq!(err.code(), Some("ALREADY_ENROLLED"));
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    let api = askknightro_client::KnightroApi::new("http://127.0.0.1:9");
    assert_matches!(api.get_course(1).await, Err(ApiError::Request(_)));
}

// ---------------------------------------------------------------------------
// Course listing sends the role filter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn course_listing_passes_role_parameter() {
    let backend = spawn(Backend {
        courses: vec![
            course(1, "Physics", Some(5), "PHY"),
            course(2, "History", Some(6), "HIS"),
        ],
        ..Default::default()
    })
    .await;

    let courses = backend
        .api()
        .list_courses_for_user(5, Role::Teacher)
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_name, "Physics");

    backend
        .api()
        .list_courses_for_user(5, Role::Anonymous)
        .await
        .unwrap();
    assert_eq!(
        backend.state().role_params,
        vec![Some("TEACHER".to_string()), None]
    );
}

// ---------------------------------------------------------------------------
// Courses: create, edit, delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn course_lifecycle() {
    let backend = spawn(Backend::default()).await;
    let api = backend.api();

    let mut draft = CourseDraft {
        course_name: "Organic Chemistry".into(),
        semester: "Fall 2025".into(),
        course_description: None,
        teacher_id: Some(5),
        shard_id: None,
        enrollment_code: Some("CHEM2".into()),
    };
    let created = api.create_course(&draft).await.unwrap();

    draft.course_name = "Organic Chemistry II".into();
    draft.course_description = Some("Reactions and mechanisms".into());
    draft.enrollment_code = None;
    let updated = api.update_course(created.class_id, &draft).await.unwrap();
    assert_eq!(updated.course_name, "Organic Chemistry II");
    assert_eq!(updated.enrollment_code.as_deref(), Some("CHEM2"));
    assert_eq!(
        api.get_course(created.class_id).await.unwrap().course_description.as_deref(),
        Some("Reactions and mechanisms")
    );

    api.delete_course(created.class_id).await.unwrap();
    assert_matches!(
        api.get_course(created.class_id).await,
        Err(ApiError::NotFound { .. })
    );
    assert_matches!(
        api.delete_course(created.class_id).await,
        Err(ApiError::NotFound { .. })
    );
}

// ---------------------------------------------------------------------------
// Materials: upload, rename, replace, delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn material_lifecycle() {
    let backend = spawn(Backend::default()).await;
    let api = backend.api();

    let uploaded = api
        .upload_material(
            7,
            &MaterialFile {
                name: "week1.txt".into(),
                bytes: b"cells and membranes".to_vec(),
            },
        )
        .await
        .unwrap();
    assert_eq!(uploaded.class_id, Some(7));

    let renamed = api
        .update_material(uploaded.id, "Week 1 notes.txt", None)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Week 1 notes.txt");

    api.update_material(
        uploaded.id,
        "Week 1 notes.txt",
        Some(&MaterialFile {
            name: "Week 1 notes.txt".into(),
            bytes: b"revised".to_vec(),
        }),
    )
    .await
    .unwrap();

    api.delete_material(uploaded.id).await.unwrap();
    let listed = api.list_materials(7).await.unwrap();
    assert_eq!(listed[0].is_deleted, Some(true));

    let uploads = backend.state().uploads.clone();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].2, "cells and membranes");
    assert_eq!(uploads[1].2, "revised");
}
