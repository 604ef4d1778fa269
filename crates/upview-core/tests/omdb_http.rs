//! Movie data client against a mocked OMDB endpoint.

use std::time::Duration;

use serde_json::json;
use upview_core::{ClientConfig, MediaType, MovieDb, MovieSource, UpviewError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn movie_db(server: &MockServer, timeout_secs: u64) -> MovieDb {
    MovieDb::with_config(ClientConfig {
        api_key: API_KEY.to_string(),
        base_url: server.uri(),
        timeout_secs,
    })
    .unwrap()
}

#[tokio::test]
async fn search_sends_query_page_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("s", "star wars"))
        .and(query_param("page", "2"))
        .and(query_param("apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": [
                {"Title": "Star Wars: Episode V", "Year": "1980", "imdbID": "tt0080684", "Type": "movie", "Poster": "https://example.com/v.jpg"},
                {"Title": "Star Wars: Clone Wars", "Year": "2003–2005", "imdbID": "tt0361243", "Type": "series", "Poster": "N/A"}
            ],
            "totalResults": "864",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = movie_db(&server, 5).search_movies("star wars", 2).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_results, 864);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].media_type, MediaType::Series);
    assert_eq!(page.items[1].year, "2003–2005");
    assert!(page.items[1].poster.is_none());
}

#[tokio::test]
async fn search_failure_envelope_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&server)
        .await;

    let err = movie_db(&server, 5)
        .search_movies("asdfghjkl", 1)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = movie_db(&server, 5).search_movies("matrix", 1).await.unwrap_err();
    assert!(matches!(err, UpviewError::HttpError(_)));
    assert!(err.is_network_error());
}

#[tokio::test]
async fn malformed_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = movie_db(&server, 5).search_movies("matrix", 1).await.unwrap_err();
    assert!(matches!(err, UpviewError::ParseError(_)));
    assert!(err.is_network_error());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "False", "Error": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = movie_db(&server, 1).search_movies("matrix", 1).await.unwrap_err();
    match err {
        UpviewError::HttpError(e) => assert!(e.is_timeout()),
        other => panic!("Expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn detail_by_imdb_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", "tt0133093"))
        .and(query_param("apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Runtime": "136 min",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
            "Plot": "A computer hacker learns about the true nature of reality.",
            "Poster": "https://example.com/matrix.jpg",
            "imdbRating": "8.7",
            "imdbID": "tt0133093",
            "Type": "movie",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = movie_db(&server, 5).get_movie_detail("tt0133093").await.unwrap();

    assert_eq!(detail.title, "The Matrix");
    assert_eq!(detail.runtime.as_deref(), Some("136 min"));
    assert_eq!(detail.rating(), Some(8.7));
    assert_eq!(detail.actor_list()[0], "Keanu Reeves");
}

#[tokio::test]
async fn detail_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&server)
        .await;

    match movie_db(&server, 5).get_movie_detail("tt0000000").await {
        Err(UpviewError::NotFound(msg)) => assert_eq!(msg, "Incorrect IMDb ID."),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}
