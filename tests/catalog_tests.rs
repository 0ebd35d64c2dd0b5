use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use macabre::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = macabre::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    macabre::api::router(state).await
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("X-Session-Token", token);
    }

    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn create_story(
    app: &Router,
    title: &str,
    genres: serde_json::Value,
    author_id: i32,
    token: Option<&str>,
) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/stories",
            token,
            Some(serde_json::json!({
                "title": title,
                "description": format!("About {title}"),
                "genre": genres,
                "authorId": author_id,
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    body["story"]["id"].as_i64().unwrap()
}

async fn record_views(app: &Router, story_id: i64, count: usize) {
    for _ in 0..count {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/interactions",
                None,
                Some(serde_json::json!({
                    "storyId": story_id,
                    "action": "view",
                    "userId": 1,
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_authors_list_get_and_top() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors/1", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["stories"], 23);

    // top by followers: author 3 (456) then author 1 (340)
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors/top?limit=2", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let top = body["authors"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["id"], 3);
    assert_eq!(top[1]["id"], 1);

    // non-numeric limit falls back to the default of 4
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors/top?limit=abc", None, None))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_author_not_found() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors/999", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Author not found");
}

#[tokio::test]
async fn test_create_story_with_genres_then_fetch() {
    let app = spawn_app().await;

    let story_id = create_story(
        &app,
        "The Cellar Door",
        serde_json::json!(["Horror", "Gothic"]),
        1,
        None,
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/stories/{story_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    assert_eq!(body["title"], "The Cellar Door");
    let genres = body["genre"].as_array().unwrap();
    assert_eq!(genres.len(), 2);
    assert!(genres.contains(&serde_json::json!("Horror")));
    assert!(genres.contains(&serde_json::json!("Gothic")));
    assert_eq!(body["views"], 0);
    assert_eq!(body["likes"], 0);
    assert_eq!(body["author"]["id"], 1);

    // the author's story counter moved from its seeded 23
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/authors/1", None, None))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["stories"], 24);
}

#[tokio::test]
async fn test_create_story_scalar_genre_and_missing_fields() {
    let app = spawn_app().await;

    // scalar genre value is accepted as a one-element list
    let story_id = create_story(&app, "Single Tag", serde_json::json!("Мистика"), 2, None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/stories/{story_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["genre"], serde_json::json!(["Мистика"]));
    assert_eq!(body["readingTime"], 10);

    // missing required fields name the contract
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/stories",
            None,
            Some(serde_json::json!({ "title": "No description" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["required"],
        serde_json::json!(["title", "description", "authorId"])
    );

    // unknown author
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/stories",
            None,
            Some(serde_json::json!({
                "title": "Orphan",
                "description": "No such author",
                "authorId": 999,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_story_not_found() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/stories/424242", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Story not found");
}

#[tokio::test]
async fn test_stories_popular_sort_non_increasing() {
    let app = spawn_app().await;

    let quiet = create_story(&app, "Quiet One", serde_json::json!(["Тишина"]), 1, None).await;
    let loud = create_story(&app, "Loud One", serde_json::json!(["Крик"]), 2, None).await;
    let middling = create_story(&app, "Middling One", serde_json::json!([]), 3, None).await;

    record_views(&app, quiet, 1).await;
    record_views(&app, loud, 5).await;
    record_views(&app, middling, 3).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/stories?sort=popular", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let stories = body["stories"].as_array().unwrap();
    assert_eq!(stories.len(), 3);
    assert_eq!(stories[0]["title"], "Loud One");

    let views: Vec<i64> = stories
        .iter()
        .map(|s| s["views"].as_i64().unwrap())
        .collect();
    assert!(views.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_stories_genre_filter() {
    let app = spawn_app().await;

    create_story(&app, "Tagged", serde_json::json!(["Готика"]), 1, None).await;
    create_story(&app, "Untagged", serde_json::json!(["Триллер"]), 2, None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/stories?genre=%D0%93%D0%BE%D1%82%D0%B8%D0%BA%D0%B0",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["stories"][0]["title"], "Tagged");
}

#[tokio::test]
async fn test_like_twice_counts_once() {
    let app = spawn_app().await;

    let story_id = create_story(&app, "Likable", serde_json::json!([]), 1, None).await;

    let like = serde_json::json!({
        "storyId": story_id,
        "action": "like",
        "userId": 7,
    });

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(like.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["likes"], 1);

    // same user again: counter does not move
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/interactions", None, Some(like)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["likes"], 1);
    assert_eq!(body["message"], "Already liked");

    // a different user moves it
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "like",
                "userId": 8,
            })),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["likes"], 2);

    // the denormalized counter matches on the story itself
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/stories/{story_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["likes"], 2);
}

#[tokio::test]
async fn test_comment_flow() {
    let app = spawn_app().await;

    let story_id = create_story(&app, "Discussed", serde_json::json!([]), 1, None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "comment",
                "userId": 5,
                "userName": "Иван Читатель",
                "comment": "Мурашки по коже.",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["comment"]["userName"], "Иван Читатель");
    assert_eq!(body["comment"]["likes"], 0);

    // missing text
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "comment",
                "userId": 5,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Comment text is required");

    // second comment, then list newest-first
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "comment",
                "userId": 6,
                "comment": "Second!",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/interactions?storyId={story_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["comments"][0]["text"], "Second!");
    // anonymous default display name
    assert_eq!(body["comments"][0]["userName"], "Гость");

    // the denormalized counter moved with the inserts
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/stories/{story_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["comments"], 2);
}

#[tokio::test]
async fn test_view_counter_increments() {
    let app = spawn_app().await;

    let story_id = create_story(&app, "Watched", serde_json::json!([]), 1, None).await;

    record_views(&app, story_id, 3).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "view",
                "userId": 1,
            })),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["views"], 4);
    assert_eq!(body["message"], "View recorded");
}

#[tokio::test]
async fn test_interaction_validation() {
    let app = spawn_app().await;

    // missing fields
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({ "storyId": 1 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["required"],
        serde_json::json!(["storyId", "action", "userId"])
    );

    // unknown action
    let story_id = create_story(&app, "Target", serde_json::json!([]), 1, None).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": story_id,
                "action": "shout",
                "userId": 1,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // unknown story
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interactions",
            None,
            Some(serde_json::json!({
                "storyId": 424242,
                "action": "like",
                "userId": 1,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // comment listing without a story id
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/interactions", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "storyId parameter required");
}

#[tokio::test]
async fn test_authenticated_story_shows_in_profile() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({
                "email": "writer@example.com",
                "password": "dread-and-gloom",
                "username": "writer",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let token = read_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    create_story(
        &app,
        "Mine",
        serde_json::json!(["Хоррор"]),
        1,
        Some(&token),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/profile", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["stats"]["storiesCount"], 1);
    assert_eq!(body["recentStories"][0]["title"], "Mine");
}
