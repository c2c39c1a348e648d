mod common;

use common::free_port;
use common::mock_backend::{MockDogApi, MockResponse};
use furryfriends::config::ApiConfig;
use furryfriends::fetcher::{FetchError, ImageSource, RemoteImageFetcher};
use furryfriends::{App, DogImage};

fn api(endpoint: String) -> ApiConfig {
    ApiConfig {
        endpoint,
        timeout_seconds: 1,
        connect_timeout_seconds: 1,
    }
}

#[tokio::test]
async fn decodes_success_envelope_and_sends_accept_header() {
    let mock = MockDogApi::start().await;
    mock.enqueue_response(MockResponse::json(
        r#"{"message":"https://images.dog.ceo/breeds/pug/n02110958_1975.jpg","status":"success"}"#,
    ))
    .await;

    let fetcher = RemoteImageFetcher::new(&api(mock.endpoint())).unwrap();
    let image = fetcher.fetch().await.unwrap();

    assert_eq!(
        image,
        DogImage::new("https://images.dog.ceo/breeds/pug/n02110958_1975.jpg", "success")
    );
    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/breeds/image/random");
    assert_eq!(requests[0].header("accept"), Some("application/json"));
}

#[tokio::test]
async fn error_envelope_is_decoded_not_rejected() {
    let mock = MockDogApi::start().await;
    mock.enqueue_response(
        MockResponse::json(r#"{"message":"Breed not found (master breed does not exist)","status":"error","code":404}"#)
            .with_status(404),
    )
    .await;

    let fetcher = RemoteImageFetcher::new(&api(mock.endpoint())).unwrap();
    let image = fetcher.fetch().await.unwrap();

    assert!(!image.is_success());
    assert_eq!(image.url(), None);
}

#[tokio::test]
async fn non_envelope_body_is_decode_error() {
    let mock = MockDogApi::start().await;
    mock.enqueue_response(MockResponse::json("<html>502 Bad Gateway</html>").with_status(502))
        .await;

    let fetcher = RemoteImageFetcher::new(&api(mock.endpoint())).unwrap();
    let err = fetcher.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let endpoint = format!("http://127.0.0.1:{}/api/breeds/image/random", free_port());
    let fetcher = RemoteImageFetcher::new(&api(endpoint)).unwrap();

    let err = fetcher.fetch().await.unwrap_err();
    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn slow_response_times_out() {
    let mock = MockDogApi::start().await;
    mock.enqueue_response(MockResponse::default().with_delay(1_500)).await;

    let fetcher = RemoteImageFetcher::new(&api(mock.endpoint())).unwrap();
    let err = fetcher.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout { seconds: 1, .. }));
}

#[tokio::test]
async fn app_over_http_applies_fetched_image() {
    let mock = MockDogApi::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let fetcher = RemoteImageFetcher::new(&api(mock.endpoint())).unwrap();
    let mut app = App::new(fetcher, dir.path().join("savedFavourites"));

    app.on_launch();
    app.settle().await;

    assert_eq!(
        app.state().display_url(),
        "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg"
    );
}
