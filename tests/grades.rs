mod common;

use common::{TestApp, json_body, location, spawn_app};
use http::StatusCode;
use sms::repositories::GradeRepository;

struct Fixture {
    cookie: String,
    maths: String,
    physics: String,
    fractions: String,
    optics: String,
    anna: String,
    piotr: String,
}

async fn fixture(app: &TestApp) -> Fixture {
    let cookie = app.login().await;

    app.create("/subject/add", &[("name", "Mat")], &cookie).await;
    app.create("/subject/add", &[("name", "Fiz")], &cookie).await;
    let subjects = json_body(app.get("/subject/list", Some(&cookie)).await).await;
    let subject_id = |name: &str| {
        subjects["subjects"]
            .as_array()
            .unwrap()
            .iter()
            .find(|subject| subject["name"] == name)
            .map(|subject| subject["subject_id"].to_string())
            .unwrap()
    };
    let (maths, physics) = (subject_id("Mat"), subject_id("Fiz"));

    for (name, subject) in [("Fractions", &maths), ("Optics", &physics)] {
        let response = app
            .post_form(
                "/topic/add",
                &[("name", name), ("subject", subject.as_str())],
                Some(&cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/grades/subject/list");
    }
    let subjects = json_body(app.get("/subject/list", Some(&cookie)).await).await;
    let topic_id = |name: &str| {
        subjects["subjects"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|subject| subject["topics"].as_array().unwrap().iter())
            .find(|topic| topic["name"] == name)
            .map(|topic| topic["topic_id"].to_string())
            .unwrap()
    };
    let (fractions, optics) = (topic_id("Fractions"), topic_id("Optics"));

    for first_name in ["Anna", "Piotr"] {
        app.create(
            "/student/add",
            &[
                ("first_name", first_name),
                ("last_name", "Nowak"),
                ("gender", "F"),
                ("age", "17"),
            ],
            &cookie,
        )
        .await;
    }
    let students = json_body(app.get("/student/list", Some(&cookie)).await).await;
    let anna = students["students"][0]["student_id"].to_string();
    let piotr = students["students"][1]["student_id"].to_string();

    Fixture {
        cookie,
        maths,
        physics,
        fractions,
        optics,
        anna,
        piotr,
    }
}

#[tokio::test]
async fn grade_outside_the_scale_is_rejected() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    for grade in ["7", "1.25", "A"] {
        let response = app
            .post_form(
                "/grades/add",
                &[
                    ("grade", grade),
                    ("subject", f.maths.as_str()),
                    ("students", f.anna.as_str()),
                ],
                Some(&f.cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{grade}");
        let body = json_body(response).await;
        assert!(body["errors"]["grade"].is_string());
        assert_eq!(body["choices"]["grade"].as_array().unwrap().len(), 16);
    }

    assert_eq!(GradeRepository::new(&app.db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn topic_from_another_subject_is_rejected() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let response = app
        .post_form(
            "/grades/add",
            &[
                ("grade", "4"),
                ("subject", f.maths.as_str()),
                ("topics", f.optics.as_str()),
                ("students", f.anna.as_str()),
            ],
            Some(&f.cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["errors"]["topics"],
        "Topic Optics does not belong to the selected subject."
    );

    let response = app
        .post_form(
            "/grades/add",
            &[("grade", "4"), ("subject", f.maths.as_str())],
            Some(&f.cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["errors"]["students"], "This field is required.");

    assert_eq!(GradeRepository::new(&app.db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_topic_in_a_subject_is_rejected() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let response = app
        .post_form(
            "/topic/add",
            &[("name", "Fractions"), ("subject", f.maths.as_str())],
            Some(&f.cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["errors"]["__all__"].is_string());

    // Same name under another subject is fine
    app.create(
        "/topic/add",
        &[("name", "Fractions"), ("subject", f.physics.as_str())],
        &f.cookie,
    )
    .await;
}

#[tokio::test]
async fn subjects_come_from_the_catalogue_once() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    let response = app
        .post_form("/subject/add", &[("name", "Mat")], Some(&f.cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["errors"]["name"],
        "Subject with this Name already exists."
    );
    // Remaining choices exclude the taken codes
    assert_eq!(body["choices"]["name"].as_array().unwrap().len(), 9);

    let response = app
        .post_form("/subject/add", &[("name", "Astrology")], Some(&f.cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn grades_are_listed_by_subject_and_averaged_per_student() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    app.create(
        "/grades/add",
        &[
            ("grade", "5"),
            ("subject", f.maths.as_str()),
            ("topics", f.fractions.as_str()),
            ("students", f.anna.as_str()),
            ("students", f.piotr.as_str()),
        ],
        &f.cookie,
    )
    .await;
    app.create(
        "/grades/add",
        &[
            ("grade", "3+"),
            ("subject", f.maths.as_str()),
            ("students", f.anna.as_str()),
        ],
        &f.cookie,
    )
    .await;
    app.create(
        "/grades/add",
        &[
            ("grade", "2"),
            ("subject", f.physics.as_str()),
            ("topics", f.optics.as_str()),
            ("students", f.piotr.as_str()),
        ],
        &f.cookie,
    )
    .await;

    let body = json_body(app.get("/grades/subject/list", Some(&f.cookie)).await).await;
    assert_eq!(body["total"], 3);
    let maths = body["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .find(|group| group["subject"]["name"] == "Mat")
        .unwrap();
    let grades = maths["grades"].as_array().unwrap();
    assert_eq!(grades.len(), 2);
    assert_eq!(grades[0]["label"], "5");
    assert_eq!(grades[0]["students"].as_array().unwrap().len(), 2);
    assert_eq!(grades[0]["topics"][0]["name"], "Fractions");
    assert_eq!(grades[1]["value"], 3.5);

    let filtered = format!("/grades/subject/list?subject={}", f.physics);
    let body = json_body(app.get(&filtered, Some(&f.cookie)).await).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["subjects"].as_array().unwrap().len(), 1);
    assert_eq!(body["subjects"][0]["grades"][0]["label"], "2");

    let response = app
        .get("/grades/subject/list?subject=999", Some(&f.cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let detail = json_body(
        app.get(&format!("/student/{}", f.anna), Some(&f.cookie))
            .await,
    )
    .await;
    assert_eq!(detail["grades"].as_array().unwrap().len(), 2);
    let averages = detail["averages"].as_array().unwrap();
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0]["subject_name"], "Mathematics");
    assert_eq!(averages[0]["average"], 4.25);
    assert_eq!(averages[0]["count"], 2);
}

#[tokio::test]
async fn blank_subject_filter_lists_every_subject() {
    let app = spawn_app().await;
    let f = fixture(&app).await;

    for subject in [&f.maths, &f.physics] {
        app.create(
            "/grades/add",
            &[
                ("grade", "4"),
                ("subject", subject.as_str()),
                ("students", f.anna.as_str()),
            ],
            &f.cookie,
        )
        .await;
    }

    for query in ["?subject=", "?subject=%20"] {
        let response = app
            .get(&format!("/grades/subject/list{query}"), Some(&f.cookie))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{query}");
        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["subjects"].as_array().unwrap().len(), 2);
    }

    let response = app
        .get("/grades/subject/list?subject=maths", Some(&f.cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
