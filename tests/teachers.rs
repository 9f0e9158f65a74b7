mod common;

use common::{TestApp, json_body, location, spawn_app};
use http::StatusCode;
use serde_json::Value;

async fn subject_ids(app: &TestApp, cookie: &str) -> Vec<(String, String)> {
    let body = json_body(app.get("/subject/list", Some(cookie)).await).await;
    body["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|subject| {
            (
                subject["name"].as_str().unwrap().to_string(),
                subject["subject_id"].to_string(),
            )
        })
        .collect()
}

async fn teachers(app: &TestApp, cookie: &str) -> Value {
    let response = app.get("/teacher/list", Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn teacher_created_with_subjects_lists_them() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    for name in ["Mat", "Fiz", "Pol"] {
        app.create("/subject/add", &[("name", name)], &cookie).await;
    }
    let subjects = subject_ids(&app, &cookie).await;
    let id_of = |name: &str| {
        subjects
            .iter()
            .find(|(subject, _)| subject == name)
            .map(|(_, id)| id.clone())
            .unwrap()
    };
    let (maths, physics) = (id_of("Mat"), id_of("Fiz"));

    app.create(
        "/teacher/add",
        &[
            ("first_name", "Jan"),
            ("last_name", "Kowalski"),
            ("gender", "M"),
            ("subjects", maths.as_str()),
            ("subjects", physics.as_str()),
        ],
        &cookie,
    )
    .await;
    app.create(
        "/teacher/add",
        &[("first_name", "Ewa"), ("last_name", "Adamska"), ("gender", "F")],
        &cookie,
    )
    .await;

    let body = teachers(&app, &cookie).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["teachers"][0]["last_name"], "Adamska");
    assert_eq!(body["teachers"][0]["subjects"].as_array().unwrap().len(), 0);

    let kowalski = &body["teachers"][1];
    assert_eq!(kowalski["gender"], "M");
    let mut names: Vec<&str> = kowalski["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|subject| subject["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Fiz", "Mat"]);
}

#[tokio::test]
async fn unknown_subject_rejects_the_teacher() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/teacher/add",
            &[
                ("first_name", "Jan"),
                ("last_name", "Kowalski"),
                ("gender", "M"),
                ("subjects", "42"),
            ],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["errors"]["subjects"],
        "Select a valid choice. 42 is not one of the available choices."
    );
    assert_eq!(teachers(&app, &cookie).await["total"], 0);
}

#[tokio::test]
async fn deleting_a_teacher() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    app.create(
        "/teacher/add",
        &[("first_name", "Jan"), ("last_name", "Kowalski"), ("gender", "M")],
        &cookie,
    )
    .await;
    let teacher_id = teachers(&app, &cookie).await["teachers"][0]["teacher_id"]
        .as_i64()
        .unwrap();
    let delete_path = format!("/teacher/delete/{teacher_id}");

    let response = app.get(&delete_path, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["first_name"], "Jan");

    let response = app.post_form(&delete_path, &[], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/teacher/list");
    assert_eq!(teachers(&app, &cookie).await["total"], 0);

    let response = app.get(&delete_path, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
