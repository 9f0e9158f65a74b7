mod common;

use common::{TestApp, json_body, location, spawn_app, text_body};
use http::StatusCode;
use serde_json::Value;
use sms::repositories::{StudentFilter, StudentRepository};

async fn add_student(app: &TestApp, cookie: &str, first_name: &str, last_name: &str, age: &str) {
    app.create(
        "/student/add",
        &[
            ("first_name", first_name),
            ("last_name", last_name),
            ("gender", "F"),
            ("age", age),
        ],
        cookie,
    )
    .await;
}

async fn list(app: &TestApp, cookie: &str, query: &str) -> Value {
    let response = app.get(&format!("/student/list{query}"), Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn created_student_is_retrievable_by_each_field() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    add_student(&app, &cookie, "Anna", "Nowak", "17").await;
    add_student(&app, &cookie, "Piotr", "Zielinski", "19").await;

    for query in ["?first_name=Anna", "?last_name=Nowak", "?age=17"] {
        let body = list(&app, &cookie, query).await;
        assert_eq!(body["total"], 1, "{query}");
        assert_eq!(body["students"][0]["first_name"], "Anna");
        assert_eq!(body["students"][0]["gender"], "F");
    }

    let repo = StudentRepository::new(&app.db);
    let by_last_name = repo
        .find_filtered(StudentFilter {
            last_name: Some("Nowak".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_last_name.len(), 1);
    assert_eq!(by_last_name[0].age, 17);
}

#[tokio::test]
async fn creating_n_students_counts_n() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let names = ["Adam", "Beata", "Cezary", "Dorota", "Ewa"];
    for name in names {
        add_student(&app, &cookie, name, "Kowalski", "20").await;
    }

    assert_eq!(
        StudentRepository::new(&app.db).count().await.unwrap(),
        names.len() as u64
    );
    let body = list(&app, &cookie, "").await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["students"][0]["first_name"], "Adam");

    let dashboard = json_body(app.get("/index/", Some(&cookie)).await).await;
    assert_eq!(dashboard["counts"]["students"], 5);
}

#[tokio::test]
async fn blank_list_filters_return_every_student() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    add_student(&app, &cookie, "Anna", "Nowak", "17").await;
    add_student(&app, &cookie, "Piotr", "Zielinski", "19").await;

    let body = list(&app, &cookie, "?first_name=&last_name=&age=&school_class=").await;
    assert_eq!(body["total"], 2);

    let body = list(&app, &cookie, "?first_name=&last_name=&age=19&school_class=").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["students"][0]["first_name"], "Piotr");

    let response = app.get("/student/list?age=old", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_student_is_not_persisted() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let response = app
        .post_form(
            "/student/add",
            &[
                ("first_name", "Anna"),
                ("last_name", "Nowak2"),
                ("gender", "F"),
                ("age", "15"),
                ("school_class", "99"),
            ],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["errors"]["age"], "Age must be between 16 and 80.");
    assert_eq!(body["errors"]["last_name"], "Only letters are allowed.");
    assert_eq!(body["form"]["first_name"], "Anna");
    assert_eq!(body["choices"]["gender"].as_array().unwrap().len(), 2);

    // The form itself is valid, but the class does not exist
    let response = app
        .post_form(
            "/student/add",
            &[
                ("first_name", "Anna"),
                ("last_name", "Nowak"),
                ("gender", "F"),
                ("age", "18"),
                ("school_class", "99"),
            ],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["errors"]["school_class"].is_string());

    assert_eq!(StudentRepository::new(&app.db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_student_removes_it() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    add_student(&app, &cookie, "Anna", "Nowak", "17").await;
    add_student(&app, &cookie, "Piotr", "Zielinski", "19").await;
    let body = list(&app, &cookie, "?first_name=Anna").await;
    let student_id = body["students"][0]["student_id"].as_i64().unwrap();

    let response = app
        .get(&format!("/student/delete/{student_id}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["last_name"], "Nowak");

    let response = app
        .post_form(&format!("/student/delete/{student_id}"), &[], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/student/list");

    assert_eq!(StudentRepository::new(&app.db).count().await.unwrap(), 1);

    let response = app.get(&format!("/student/{student_id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(text_body(response).await, "Student not found");

    let response = app
        .post_form(&format!("/student/delete/{student_id}"), &[], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attendance_appears_in_student_details() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    app.create("/class/add", &[("name", "2A"), ("year", "2024")], &cookie)
        .await;
    let classes = json_body(app.get("/class/list", Some(&cookie)).await).await;
    let class_id = classes["classes"][0]["school_class_id"].to_string();

    app.create("/subject/add", &[("name", "Mat")], &cookie).await;
    let subjects = json_body(app.get("/subject/list", Some(&cookie)).await).await;
    let subject_id = subjects["subjects"][0]["subject_id"].to_string();

    app.create(
        "/student/add",
        &[
            ("first_name", "Anna"),
            ("last_name", "Nowak"),
            ("gender", "F"),
            ("age", "17"),
            ("school_class", class_id.as_str()),
            ("subjects", subject_id.as_str()),
        ],
        &cookie,
    )
    .await;
    let body = list(&app, &cookie, "").await;
    let student_id = body["students"][0]["student_id"].as_i64().unwrap();
    let detail_path = format!("/student/{student_id}");

    let response = app
        .post_form(
            &detail_path,
            &[("day", "2024-09-02"), ("present", "true")],
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), detail_path);

    app.create(
        &detail_path,
        &[("day", "2024-09-03 08:00"), ("present", "")],
        &cookie,
    )
    .await;

    let response = app
        .post_form(&detail_path, &[("day", "tomorrow")], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let detail = json_body(app.get(&detail_path, Some(&cookie)).await).await;
    assert_eq!(detail["student"]["first_name"], "Anna");
    assert_eq!(detail["school_class"]["name"], "2A");
    assert_eq!(detail["subjects"][0]["display_name"], "Mathematics");

    let presence = detail["presence"].as_array().unwrap();
    assert_eq!(presence.len(), 2);
    assert_eq!(presence[0]["day"], "2024-09-03T08:00:00");
    assert!(presence[0]["present"].is_null());
    assert_eq!(presence[1]["present"], true);
}
