//! Smoke tests against a running server (`cargo run`, or `spin up --listen 127.0.0.1:3000`).
use std::sync::Mutex;

const BASE_URL: &str = "http://127.0.0.1:3000";
static TEST_LOCK: Mutex<()> = Mutex::new(());

fn lock_test() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

#[ignore]
#[tokio::test]
async fn test_live_post_appears_in_feed() {
    let _lock = lock_test();
    let client = client();
    let content = format!("live post {}", uuid::Uuid::new_v4());

    let resp = client
        .post(&format!("{}/posts", BASE_URL))
        .form(&[("content", content.as_str()), ("name", "Live")])
        .send()
        .await
        .expect("Failed to create post");
    assert_eq!(resp.status(), 303);

    let page = client
        .get(&format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to load page")
        .text()
        .await
        .unwrap();
    assert!(page.contains(&content));

    let state = client
        .get(&format!("{}/api/state", BASE_URL))
        .send()
        .await
        .expect("Failed to load state")
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(state["posts"][0]["content"], content.as_str());
    assert_eq!(state["posts"][0]["author"], "Live");
}

#[ignore]
#[tokio::test]
async fn test_live_blank_post_rejected() {
    let _lock = lock_test();
    let client = client();

    let resp = client
        .post(&format!("{}/posts", BASE_URL))
        .form(&[("content", "   ")])
        .send()
        .await
        .expect("Failed to make request");

    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Please enter a message."));
}
