//! Integration tests for the HTTP client.
//!
//! Every call runs against a local mock server and checks the request
//! that went out as well as the decoded response.


use fixtures::*;
use serde_json::json;
use six_cities::environment::types::{AppRoute, AuthData, CommentData, FavoriteData};
use six_cities::environment::ApiError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[tokio::test]
async fn test_offers_are_decoded() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            offer("1", "Paris", 120, false),
            offer("2", "Amsterdam", 80, true),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let environment = environment(&server);
    let offers = environment.model.offers().await.unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].kind, "apartment");
    assert_eq!(offers[1].city.name, "Amsterdam");
    assert!(offers[1].is_favorite);
    assert_eq!(offers[0].preview_image.as_deref(), Some("https://url-to-image/1.jpg"));
}

#[tokio::test]
async fn test_token_header_is_attached() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/favorite"))
        .and(header("X-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([offer(
            "1", "Paris", 100, true
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let environment = signed_in_environment(&server);
    let favorites = environment.model.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn test_no_token_header_without_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(|req: &Request| {
            if req.headers.contains_key("x-token") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(json!([]))
            }
        })
        .mount(&server)
        .await;

    let environment = environment(&server);
    assert!(environment.model.offers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_redirects_to_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/favorite"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let environment = environment(&server);
    let changes = environment.router.changes();
    let result = environment.model.favorites().await;
    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(environment.router.current(), AppRoute::Login);
    assert_eq!(changes.try_recv().ok(), Some(AppRoute::Login));
}

#[tokio::test]
async fn test_server_errors_keep_their_status() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let environment = environment(&server);
    let error = environment.model.offers().await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(environment.router.current(), AppRoute::Root);
}

#[tokio::test]
async fn test_offer_details_near_offers_and_comments() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offer_details("7")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/offers/7/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            offer("8", "Amsterdam", 90, false),
            offer("9", "Amsterdam", 95, false),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review(
            "r1",
            "2019-05-08T14:13:56.569Z"
        )])))
        .mount(&server)
        .await;

    let environment = environment(&server);
    let id = "7".to_string();
    let details = environment.model.offer(&id).await.unwrap();
    assert_eq!(details.bedrooms, 3);
    assert_eq!(details.max_adults, 4);
    assert!(details.host.is_pro);
    assert_eq!(details.images.len(), 2);

    let near = environment.model.near_offers(&id).await.unwrap();
    assert_eq!(near.len(), 2);

    let reviews = environment.model.comments(&id).await.unwrap();
    assert_eq!(reviews[0].user.name, "Oliver Conner");
    assert_eq!(reviews[0].rating, 4.0);
    assert_eq!(reviews[0].offer_id, "7");
}

#[tokio::test]
async fn test_favorite_status_is_in_the_path() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/favorite/3/1"))
        .and(header("X-Token", TOKEN))
        .respond_with(ResponseTemplate::new(201).set_body_json(offer("3", "Paris", 10, true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/favorite/3/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offer("3", "Paris", 10, false)))
        .expect(1)
        .mount(&server)
        .await;

    let environment = signed_in_environment(&server);
    let added = environment
        .model
        .set_favorite(&FavoriteData::new("3", true))
        .await
        .unwrap();
    assert!(added.is_favorite);
    let removed = environment
        .model
        .set_favorite(&FavoriteData::new("3", false))
        .await
        .unwrap();
    assert!(!removed.is_favorite);
}

#[tokio::test]
async fn test_comment_body() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    let comment = "The house is very good, very happy, hygienic and simple living conditions around it are also very good.";
    Mock::given(method("POST"))
        .and(path("/comments/5"))
        .and(body_json(json!({ "comment": comment, "rating": 5 })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(review("r9", "2024-01-08T10:00:00.000Z")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let environment = signed_in_environment(&server);
    let posted = environment
        .model
        .post_comment(&CommentData::new("5", comment, 5))
        .await
        .unwrap();
    assert_eq!(posted.id, "r9");
    assert_eq!(posted.offer_id, "5");
}

#[tokio::test]
async fn test_invalid_comment_is_not_sent() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let environment = signed_in_environment(&server);
    let result = environment
        .model
        .post_comment(&CommentData::new("5", "too short", 5))
        .await;
    assert!(matches!(result, Err(ApiError::Invalid(_))));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "Oliver.conner@gmail.com",
            "password": "12345678a"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user()))
        .expect(1)
        .mount(&server)
        .await;

    let environment = environment(&server);
    let user = environment
        .model
        .login(&AuthData::new("Oliver.conner@gmail.com", "12345678a"))
        .await
        .unwrap();
    assert_eq!(user.token, TOKEN);
    // saving the token is up to the caller
    assert!(!environment.repository.has_token());
}

#[tokio::test]
async fn test_check_auth_without_token_stays_offline() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user()))
        .expect(0)
        .mount(&server)
        .await;

    let environment = environment(&server);
    assert_eq!(environment.model.check_auth().await, Err(ApiError::NoToken));
}

#[tokio::test]
async fn test_logout_sends_delete() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logout"))
        .and(header("X-Token", TOKEN))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let environment = signed_in_environment(&server);
    assert_eq!(environment.model.logout().await, Ok(()));
}
