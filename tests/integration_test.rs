use fizzbot_client::config::{normalize_base_url, Config};
use fizzbot_client::error::{AppError, ProtocolError};
use fizzbot_client::models::{QuestionDb, INTRO_INDEX, RESULT_COMPLETE};
use fizzbot_client::utils::logging;
use fizzbot_client::{App, SessionState, SessionStore};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use std::path::Path;

fn test_config(server: &ServerGuard, db_file: &Path) -> Config {
    Config {
        base_url: normalize_base_url(server.url()),
        db_file: db_file.to_string_lossy().to_string(),
        static_answer: Some("Rust".to_string()),
        ..Config::default()
    }
}

async fn json_mock(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    body: serde_json::Value,
) -> mockito::Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// 介绍页 → 第 1 题（手动）→ 第 abc 题（FizzBuzz）→ 结束
async fn interview_mocks(server: &mut ServerGuard, runs: usize) -> Vec<Mock> {
    let intro = json_mock(
        server,
        "GET",
        "/",
        200,
        json!({
            "message": "Thank you for your application to Noops Inc.",
            "nextQuestion": "/fizzbot/questions/1"
        }),
    )
    .await;

    let q1 = json_mock(
        server,
        "GET",
        "/questions/1",
        200,
        json!({"message": "What is your favorite programming language?"}),
    )
    .await;

    let a1 = server
        .mock("POST", "/questions/1")
        .match_body(Matcher::Json(json!({"answer": "Rust"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"result": "correct", "nextQuestion": "/fizzbot/questions/abc"}).to_string(),
        )
        .expect(runs)
        .create_async()
        .await;

    let q2 = json_mock(
        server,
        "GET",
        "/questions/abc",
        200,
        json!({
            "message": "FizzBuzz is a classic: say Fizz for multiples of 3 and Buzz for multiples of 5.",
            "numbers": [1, 2, 3, 4, 5],
            "rules": [
                {"number": 3, "response": "Fizz"},
                {"number": 5, "response": "Buzz"}
            ]
        }),
    )
    .await;

    let a2 = server
        .mock("POST", "/questions/abc")
        .match_body(Matcher::Json(json!({"answer": "1 2 Fizz 4 Buzz"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"result": "interview complete", "message": "Congratulations", "grade": "A"})
                .to_string(),
        )
        .expect(runs)
        .create_async()
        .await;

    vec![intro, q1, a1, q2, a2]
}

#[tokio::test]
async fn test_full_interview() {
    logging::init(false);

    let mut server = mockito::Server::new_async().await;
    let mocks = interview_mocks(&mut server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("fizzbot.db");

    let session = App::initialize(test_config(&server, &db_file))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(session.is_finished());
    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(session.submitted(), 2);
    for mock in &mocks {
        mock.assert_async().await;
    }

    let saved = SessionStore::new(&db_file).load().await;
    assert_eq!(saved.len(), 3);
    assert!(saved.contains_key(INTRO_INDEX));
    assert_eq!(saved["1"].accepted_answer(), Some("Rust"));
    let ack = saved["abc"].ack.as_ref().unwrap();
    assert_eq!(ack.result, RESULT_COMPLETE);
    assert_eq!(ack.extra["grade"], json!("A"));
}

#[tokio::test]
async fn test_restart_replays_without_fetching() {
    logging::init(false);

    let mut server = mockito::Server::new_async().await;
    let mocks = interview_mocks(&mut server, 2).await;
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("fizzbot.db");

    App::initialize(test_config(&server, &db_file))
        .unwrap()
        .run()
        .await
        .unwrap();

    // 第二次运行：题目都已缓存（GET 各一次），答案按快照重发（POST 各两次），不询问
    let mut config = test_config(&server, &db_file);
    config.static_answer = Some("wrong answer".to_string());
    let session = App::initialize(config).unwrap().run().await.unwrap();

    assert!(session.is_finished());
    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_rejected_answer_stops_run() {
    logging::init(false);

    let mut server = mockito::Server::new_async().await;
    let _intro = json_mock(&mut server, "GET", "/", 200, json!({"message": "Welcome"})).await;
    let _q1 = json_mock(
        &mut server,
        "GET",
        "/questions/1",
        200,
        json!({"message": "What is your favorite programming language?"}),
    )
    .await;
    let _a1 = json_mock(
        &mut server,
        "POST",
        "/questions/1",
        400,
        json!({"result": "incorrect"}),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("fizzbot.db");

    let err = App::initialize(test_config(&server, &db_file))
        .unwrap()
        .run()
        .await
        .unwrap_err();

    match err {
        AppError::Protocol(ProtocolError::AnswerRejected { index, result }) => {
            assert_eq!(index, "1");
            assert_eq!(result, "incorrect");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!db_file.exists());
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_fresh() {
    logging::init(false);

    let mut server = mockito::Server::new_async().await;
    let mocks = interview_mocks(&mut server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("fizzbot.db");
    std::fs::write(&db_file, "not json at all").unwrap();

    let session = App::initialize(test_config(&server, &db_file))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(session.is_finished());
    for mock in &mocks {
        mock.assert_async().await;
    }

    let saved: QuestionDb =
        serde_json::from_str(&std::fs::read_to_string(&db_file).unwrap()).unwrap();
    assert_eq!(saved.len(), 3);
}

#[tokio::test]
async fn test_transport_failure_is_fatal() {
    logging::init(false);

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        // 没有服务在监听
        base_url: "http://127.0.0.1:9/".to_string(),
        db_file: dir.path().join("fizzbot.db").to_string_lossy().to_string(),
        static_answer: Some("Rust".to_string()),
        ..Config::default()
    };

    let err = App::initialize(config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
}

#[tokio::test]
async fn test_off_shape_question_falls_back_to_manual_answer() {
    logging::init(false);

    let mut server = mockito::Server::new_async().await;
    let _intro = json_mock(
        &mut server,
        "GET",
        "/",
        200,
        json!({"message": "Welcome", "nextQuestion": "/fizzbot/questions/odd"}),
    )
    .await;
    let question = json_mock(
        &mut server,
        "GET",
        "/questions/odd",
        200,
        json!({
            "message": "Fizz Buzz with strange numbers",
            "numbers": [1.5, 2],
            "rules": {"number": 3}
        }),
    )
    .await;
    let answer = server
        .mock("POST", "/questions/odd")
        .match_body(Matcher::Json(json!({"answer": "Rust"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"result": "interview complete"}).to_string())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_file = dir.path().join("fizzbot.db");

    let session = App::initialize(test_config(&server, &db_file))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(session.is_finished());
    question.assert_async().await;
    answer.assert_async().await;

    let saved = SessionStore::new(&db_file).load().await;
    assert_eq!(saved["odd"].question.numbers, Some(json!([1.5, 2])));
    assert_eq!(saved["odd"].accepted_answer(), Some("Rust"));
}
