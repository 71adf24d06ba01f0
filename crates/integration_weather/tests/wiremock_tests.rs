//! Integration tests for the weather client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer) -> OpenWeatherMapClient {
    let config = WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherConfig::default()
    };
    OpenWeatherMapClient::new(config, SecretString::from("owm-test-key".to_string()))
        .expect("client creation should succeed")
}

fn slot(dt_txt: &str, temp: f64, pop: Option<f64>) -> serde_json::Value {
    let mut slot = serde_json::json!({
        "dt": 0,
        "dt_txt": dt_txt,
        "main": {"temp": temp, "feels_like": temp, "humidity": 70, "pressure": 1010},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds"}],
        "wind": {"speed": 2.4, "deg": 200}
    });
    if let Some(pop) = pop {
        slot["pop"] = serde_json::json!(pop);
    }
    slot
}

/// Sample forecast response for Mumbai
fn sample_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "message": 0,
        "cnt": 4,
        "list": [
            slot("2025-11-05 21:00:00", 26.0, Some(0.9)),
            slot("2025-11-06 06:00:00", 24.1, Some(0.0)),
            slot("2025-11-06 09:00:00", 28.3, None),
            slot("2025-11-06 12:00:00", 32.5, Some(0.2))
        ],
        "city": {
            "id": 1_275_339,
            "name": "Mumbai",
            "coord": {"lat": 19.0144, "lon": 72.8479},
            "country": "IN",
            "timezone": 19800
        }
    })
}

#[tokio::test]
async fn test_get_forecast_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "mumbai,IN"))
        .and(query_param("appid", "owm-test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let forecast = client.get_forecast("mumbai").await.expect("should succeed");

    assert_eq!(forecast.city, "Mumbai");
    assert_eq!(forecast.country.as_deref(), Some("IN"));
    assert_eq!(forecast.slots.len(), 4);

    let noon = &forecast.slots[3];
    assert_eq!(noon.time.to_string(), "2025-11-06 12:00:00");
    assert!((noon.temperature - 32.5).abs() < f64::EPSILON);
    assert_eq!(noon.humidity, 70);
    assert_eq!(noon.pressure, 1010);
    assert_eq!(noon.description, "scattered clouds");
    assert_eq!(noon.wind_speed, Some(2.4));
}

#[tokio::test]
async fn test_missing_pop_is_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let forecast = client.get_forecast("Mumbai").await.expect("should succeed");

    assert!(forecast.slots[2].precipitation_probability.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_configured_country_code_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Kathmandu,NP"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&server)
        .await;

    let config = WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        country_code: "NP".to_string(),
        units: "imperial".to_string(),
        ..WeatherConfig::default()
    };
    let client =
        OpenWeatherMapClient::new(config, SecretString::from("owm-test-key".to_string())).unwrap();

    assert!(client.get_forecast("Kathmandu").await.is_ok());
}

#[tokio::test]
async fn test_invalid_key_returns_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_forecast("Mumbai").await.unwrap_err();

    match err {
        WeatherError::Unauthorized(message) => {
            assert!(message.contains("Invalid API key"));
            assert!(!message.contains("owm-test-key"));
        },
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_city_returns_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Atlantis").await;

    assert!(matches!(result, Err(WeatherError::CityNotFound(city)) if city == "Atlantis"));
}

#[tokio::test]
async fn test_rate_limit_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Mumbai").await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Mumbai").await;

    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_other_client_error_is_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "cod": "400",
            "message": "Nothing to geocode"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_forecast("Mumbai").await.unwrap_err();

    match err {
        WeatherError::RequestFailed(message) => assert!(message.contains("Nothing to geocode")),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Mumbai").await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_missing_city_block_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "list": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Mumbai").await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_malformed_timestamp_is_parse_error() {
    let server = MockServer::start().await;

    let mut body = sample_forecast_response();
    body["list"][0]["dt_txt"] = serde_json::json!("yesterday");

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_forecast("Mumbai").await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = WeatherConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..WeatherConfig::default()
    };
    let client =
        OpenWeatherMapClient::new(config, SecretString::from("owm-test-key".to_string())).unwrap();

    let result = client.get_forecast("Mumbai").await;
    assert!(matches!(result, Err(WeatherError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_is_healthy_reflects_service_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Delhi,IN"))
        .and(query_param("cnt", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.is_healthy().await);

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;

    assert!(!client_for(&down).is_healthy().await);
}

#[tokio::test]
async fn test_is_healthy_reuses_recent_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..5 {
        assert!(client.is_healthy().await);
    }
}

#[tokio::test]
async fn test_is_healthy_probes_again_after_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(2)
        .mount(&server)
        .await;

    let config = WeatherConfig {
        base_url: server.uri(),
        health_ttl_secs: 0,
        ..WeatherConfig::default()
    };
    let client =
        OpenWeatherMapClient::new(config, SecretString::from("owm-test-key".to_string())).unwrap();

    assert!(client.is_healthy().await);
    assert!(client.is_healthy().await);
}
