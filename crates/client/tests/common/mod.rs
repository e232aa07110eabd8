//! In-process fake of the AskKnightro backend.
//!
//! Serves the REST surface the client uses from an in-memory [`Backend`]
//! and records what it was sent, so tests can assert on both sides.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use askknightro_core::models::{
    AskRequest, CourseDto, EnrollmentRequest, LoginResponse, MaterialDto, StoredChatMessage,
    StudentDto, TeacherDto,
};
use askknightro_core::types::DbId;
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use askknightro_client::KnightroApi;

#[derive(Debug, Default)]
pub struct Backend {
    pub courses: Vec<CourseDto>,
    pub teachers: HashMap<DbId, TeacherDto>,
    pub students: HashMap<DbId, StudentDto>,
    /// course id -> enrolled student ids, in enrollment order.
    pub enrollments: HashMap<DbId, Vec<DbId>>,
    /// (student id, course id) -> stored history.
    pub histories: HashMap<(DbId, DbId), Vec<StoredChatMessage>>,
    /// Students whose history endpoint answers 500.
    pub broken_histories: Vec<DbId>,
    pub materials: Vec<MaterialDto>,
    pub login: Option<LoginResponse>,
    pub ask_answer: Option<String>,

    // ---- recorded ----
    pub authorization: Vec<Option<String>>,
    pub uploads: Vec<(DbId, String, String)>,
    pub asks: Vec<AskRequest>,
    pub signups: Vec<serde_json::Value>,
    pub role_params: Vec<Option<String>>,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub fn api(&self) -> KnightroApi {
        KnightroApi::new(&self.base_url)
    }

    pub fn state(&self) -> MutexGuard<'_, Backend> {
        self.state.lock().unwrap()
    }
}

/// Bind the fake on an ephemeral port and serve it in the background.
pub async fn spawn(backend: Backend) -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(backend));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

pub fn course(id: DbId, name: &str, teacher_id: Option<DbId>, code: &str) -> CourseDto {
    CourseDto {
        class_id: id,
        course_name: name.to_string(),
        semester: Some("Fall 2025".into()),
        teacher_id,
        course_description: None,
        enrollment_code: Some(code.to_string()),
        shard_id: None,
    }
}

pub fn student(id: DbId, name: &str) -> StudentDto {
    StudentDto {
        student_id: Some(id),
        name: Some(name.to_string()),
        email: Some(format!("s{id}@ucf.edu")),
        ..Default::default()
    }
}

pub fn teacher(id: DbId, name: &str) -> TeacherDto {
    TeacherDto {
        teacher_id: Some(id),
        name: Some(name.to_string()),
        email: Some(format!("t{id}@ucf.edu")),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/confirm-signup", post(|| async { StatusCode::OK }))
        .route("/api/users/courses", post(create_course))
        .route("/api/users/courses/{id}", get(get_course).delete(delete_course))
        .route("/api/users/courses/list/{id}", put(update_course))
        .route("/api/users/courses/user/{user_id}", get(courses_for_user))
        .route("/api/users/teachers/{id}", get(get_teacher).put(put_teacher))
        .route("/api/users/students/{id}", get(get_student).put(put_student))
        .route("/api/enrollments/enroll", post(enroll))
        .route("/api/enrollments/{course_id}", get(roster))
        .route(
            "/api/enrollments/{course_id}/students/{student_id}",
            delete(remove_student),
        )
        .route("/api/materials", post(upload_material))
        .route("/api/materials/course/{course_id}", get(list_materials))
        .route("/api/materials/{id}", put(update_material).delete(delete_material))
        .route(
            "/api/messages/student/{student_id}/class/{course_id}",
            get(history),
        )
        .route("/api/ask", post(ask))
        .layer(middleware::from_fn_with_state(state.clone(), record_auth))
        .with_state(state)
}

async fn record_auth(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().authorization.push(header);
    next.run(request).await
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

// ---- auth ----

async fn login(State(state): State<Shared>) -> Response {
    match state.lock().unwrap().login.clone() {
        Some(tokens) => Json(tokens).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid credentials"),
    }
}

async fn signup(State(state): State<Shared>, Json(body): Json<serde_json::Value>) -> StatusCode {
    state.lock().unwrap().signups.push(body);
    StatusCode::ACCEPTED
}

// ---- courses ----

async fn get_course(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    let state = state.lock().unwrap();
    match state.courses.iter().find(|c| c.class_id == id) {
        Some(course) => Json(course.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", &format!("Course {id} not found")),
    }
}

#[derive(Deserialize)]
struct RoleQuery {
    role: Option<String>,
}

async fn courses_for_user(
    State(state): State<Shared>,
    Path(user_id): Path<DbId>,
    Query(query): Query<RoleQuery>,
) -> Json<Vec<CourseDto>> {
    let mut state = state.lock().unwrap();
    state.role_params.push(query.role.clone());
    let courses = match query.role.as_deref() {
        Some("TEACHER") => state
            .courses
            .iter()
            .filter(|c| c.teacher_id == Some(user_id))
            .cloned()
            .collect(),
        _ => state
            .courses
            .iter()
            .filter(|c| {
                state
                    .enrollments
                    .get(&c.class_id)
                    .is_some_and(|ids| ids.contains(&user_id))
            })
            .cloned()
            .collect(),
    };
    Json(courses)
}

async fn create_course(
    State(state): State<Shared>,
    Json(body): Json<serde_json::Value>,
) -> Json<CourseDto> {
    let mut state = state.lock().unwrap();
    let id = state.courses.iter().map(|c| c.class_id).max().unwrap_or(0) + 1;
    let course = course_from_draft(id, &body);
    state.courses.push(course.clone());
    Json(course)
}

async fn update_course(
    State(state): State<Shared>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match state.courses.iter_mut().find(|c| c.class_id == id) {
        Some(existing) => {
            let mut updated = course_from_draft(id, &body);
            if body["enrollmentCode"].is_null() {
                updated.enrollment_code = existing.enrollment_code.clone();
            }
            *existing = updated.clone();
            Json(updated).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", &format!("Course {id} not found")),
    }
}

async fn delete_course(State(state): State<Shared>, Path(id): Path<DbId>) -> StatusCode {
    let mut state = state.lock().unwrap();
    let before = state.courses.len();
    state.courses.retain(|c| c.class_id != id);
    if state.courses.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

fn course_from_draft(id: DbId, body: &serde_json::Value) -> CourseDto {
    CourseDto {
        class_id: id,
        course_name: body["courseName"].as_str().unwrap_or_default().to_string(),
        semester: body["semester"].as_str().map(str::to_string),
        teacher_id: body["teacherId"].as_i64(),
        course_description: body["courseDescription"].as_str().map(str::to_string),
        enrollment_code: Some(
            body["enrollmentCode"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("GEN{id}")),
        ),
        shard_id: None,
    }
}

// ---- people ----

async fn get_teacher(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    match state.lock().unwrap().teachers.get(&id) {
        Some(t) => Json(t.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", "Teacher not found"),
    }
}

async fn put_teacher(
    State(state): State<Shared>,
    Path(id): Path<DbId>,
    Json(mut body): Json<TeacherDto>,
) -> Json<TeacherDto> {
    body.teacher_id = Some(id);
    body.password = None;
    state.lock().unwrap().teachers.insert(id, body.clone());
    Json(body)
}

async fn get_student(State(state): State<Shared>, Path(id): Path<DbId>) -> Response {
    match state.lock().unwrap().students.get(&id) {
        Some(s) => Json(s.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "NOT_FOUND", "Student not found"),
    }
}

async fn put_student(
    State(state): State<Shared>,
    Path(id): Path<DbId>,
    Json(mut body): Json<StudentDto>,
) -> Json<StudentDto> {
    body.student_id = Some(id);
    body.password = None;
    state.lock().unwrap().students.insert(id, body.clone());
    Json(body)
}

// ---- enrollments ----

async fn enroll(State(state): State<Shared>, Json(body): Json<EnrollmentRequest>) -> Response {
    let mut state = state.lock().unwrap();
    let Some(course_id) = state
        .courses
        .iter()
        .find(|c| {
            c.enrollment_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(&body.enrollment_code))
        })
        .map(|c| c.class_id)
    else {
        return error(StatusCode::NOT_FOUND, "NOT_FOUND", "Invalid enrollment code");
    };

    let enrolled = state.enrollments.entry(course_id).or_default();
    if enrolled.contains(&body.student_id) {
        return error(
            StatusCode::CONFLICT,
            "ALREADY_ENROLLED",
            "Student is already enrolled in this course",
        );
    }
    enrolled.push(body.student_id);
    StatusCode::NO_CONTENT.into_response()
}

async fn roster(State(state): State<Shared>, Path(course_id): Path<DbId>) -> Json<Vec<StudentDto>> {
    let state = state.lock().unwrap();
    let students = state
        .enrollments
        .get(&course_id)
        .into_iter()
        .flatten()
        .filter_map(|id| state.students.get(id).cloned())
        .collect();
    Json(students)
}

async fn remove_student(
    State(state): State<Shared>,
    Path((course_id, student_id)): Path<(DbId, DbId)>,
) -> StatusCode {
    if let Some(ids) = state.lock().unwrap().enrollments.get_mut(&course_id) {
        ids.retain(|id| *id != student_id);
    }
    StatusCode::NO_CONTENT
}

// ---- materials ----

async fn upload_material(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let mut class_id = None;
    let mut name = None;
    let mut content = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("classId") => class_id = field.text().await.unwrap().parse::<DbId>().ok(),
            Some("name") => name = Some(field.text().await.unwrap()),
            Some("file") => content = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    let (Some(class_id), Some(name), Some(content)) = (class_id, name, content) else {
        return error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "classId, name and file are required");
    };

    let mut state = state.lock().unwrap();
    let id = state.materials.iter().map(|m| m.id).max().unwrap_or(0) + 1;
    let material = MaterialDto {
        id,
        class_id: Some(class_id),
        name: name.clone(),
        vector_id: Some(format!("vec-{id}")),
        is_deleted: Some(false),
        deleted_at: None,
    };
    state.materials.push(material.clone());
    state.uploads.push((class_id, name, content));
    Json(material).into_response()
}

async fn list_materials(
    State(state): State<Shared>,
    Path(course_id): Path<DbId>,
) -> Json<Vec<MaterialDto>> {
    let state = state.lock().unwrap();
    Json(
        state
            .materials
            .iter()
            .filter(|m| m.class_id == Some(course_id))
            .cloned()
            .collect(),
    )
}

async fn update_material(
    State(state): State<Shared>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> Response {
    let mut name = None;
    let mut content = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("name") => name = Some(field.text().await.unwrap()),
            Some("file") => content = Some(field.text().await.unwrap()),
            _ => {}
        }
    }

    let mut state = state.lock().unwrap();
    let Some(material) = state.materials.iter_mut().find(|m| m.id == id) else {
        return error(StatusCode::NOT_FOUND, "NOT_FOUND", "Material not found");
    };
    if let Some(name) = name {
        material.name = name;
    }
    let updated = material.clone();
    if let Some(content) = content {
        let class_id = updated.class_id.unwrap_or_default();
        state.uploads.push((class_id, updated.name.clone(), content));
    }
    Json(updated).into_response()
}

async fn delete_material(State(state): State<Shared>, Path(id): Path<DbId>) -> StatusCode {
    let mut state = state.lock().unwrap();
    if let Some(material) = state.materials.iter_mut().find(|m| m.id == id) {
        material.is_deleted = Some(true);
    }
    StatusCode::NO_CONTENT
}

// ---- messages & assistant ----

async fn history(
    State(state): State<Shared>,
    Path((student_id, course_id)): Path<(DbId, DbId)>,
) -> Response {
    let state = state.lock().unwrap();
    if state.broken_histories.contains(&student_id) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "history unavailable");
    }
    let messages = state
        .histories
        .get(&(student_id, course_id))
        .cloned()
        .unwrap_or_default();
    Json(messages).into_response()
}

async fn ask(State(state): State<Shared>, Json(body): Json<AskRequest>) -> Response {
    let mut state = state.lock().unwrap();
    state.asks.push(body);
    match state.ask_answer.clone() {
        Some(answer) => Json(json!({ "answer": answer, "sources": [] })).into_response(),
        None => error(StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", "Assistant offline"),
    }
}
