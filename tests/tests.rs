#[cfg(test)]
mod tests {
    use chrono::Utc;
    use field_dashboard::config::Config;
    use field_dashboard::hooks::page_state::{FetchState, PageController, RefreshOutcome};
    use field_dashboard::hooks::poller::Poller;
    use field_dashboard::models::{analytics::DashboardData, error::AppError};
    use field_dashboard::services::api::{ApiConfig, Days, FieldClient};
    use field_dashboard::services::pages::{load_analytics_in, load_dashboard, load_last_updated};
    use field_dashboard::services::report::ErrorReporter;
    use field_dashboard::services::timer::Timer;
    use field_dashboard::services::transport::{
        HttpRequest, HttpResponse, Transport, TransportError,
    };
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::future::Future;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;
    use tokio::time::Instant;

    const BASE_URL: &str = "http://localhost:8000/api/v1";

    const DASHBOARD_JSON: &str = r#"{
        "current_soil_moisture": 45.5,
        "current_nutrients": {"nitrogen": 25.0, "phosphorus": 12.0, "potassium": 200.0},
        "current_weather": {"temperature": 22.0, "humidity": 60.0, "rainfall": 5.0},
        "yield_forecast": 8.5,
        "recommendations": {
            "irrigation": "Medium",
            "fertilizer": "Apply",
            "pest_risk": "Low",
            "confidence": 0.85,
            "alerts": ["Nitrogen trending low"]
        },
        "last_updated": "2026-02-15T14:00:00"
    }"#;

    const HISTORICAL_JSON: &str = r#"{
        "sensor_data": [
            {"timestamp": "2026-02-14T08:00:00", "soil_moisture": 40.0, "temperature": 18.0,
             "humidity": 60.0, "soil_nitrogen": 24.0, "soil_phosphorus": 15.0, "soil_potassium": 180.0},
            {"timestamp": "2026-02-14T20:00:00", "soil_moisture": 44.0, "temperature": 22.0,
             "humidity": 50.0, "soil_nitrogen": 26.0, "soil_phosphorus": 17.0, "soil_potassium": 200.0},
            {"timestamp": "2026-02-15T08:00:00", "soil_moisture": 38.0, "temperature": 19.0,
             "humidity": 58.0, "soil_nitrogen": 23.0, "soil_phosphorus": 14.0, "soil_potassium": 175.0}
        ],
        "yield_history": [{"season": "2024-2025", "yield_amount": 8.1}]
    }"#;

    const RECOMMENDATIONS_JSON: &str = r#"{
        "irrigation": "Low",
        "fertilizer": "Delay",
        "pest_risk": "High",
        "confidence": 0.9
    }"#;

    const FORECAST_JSON: &str = r#"{"forecast": [
        {"date": "2026-02-16T00:00:00", "temperature": 24.0, "humidity": 61.0, "rainfall": 0.0}
    ]}"#;

    // ===== Test Doubles =====

    #[derive(Clone)]
    enum Reply {
        Respond {
            status: u16,
            body: String,
            delay: Duration,
        },
        Hang,
        Fail(TransportError),
    }

    fn ok(body: &str) -> Reply {
        Reply::Respond {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    fn slow(body: &str, delay: Duration) -> Reply {
        Reply::Respond {
            status: 200,
            body: body.to_string(),
            delay,
        }
    }

    fn status(status: u16, body: &str) -> Reply {
        Reply::Respond {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// In-memory transport keyed by the last path segment, e.g. "historical".
    #[derive(Default)]
    struct StubTransport {
        routes: HashMap<&'static str, Reply>,
        calls: RefCell<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn route(mut self, segment: &'static str, reply: Reply) -> Self {
            self.routes.insert(segment, reply);
            self
        }

        fn calls(&self) -> Vec<HttpRequest> {
            self.calls.borrow().clone()
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Transport for StubTransport {
        fn send(
            &self,
            request: &HttpRequest,
        ) -> impl Future<Output = Result<HttpResponse, TransportError>> {
            self.calls.borrow_mut().push(request.clone());

            let segment = request
                .url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default();
            let reply = self
                .routes
                .get(segment)
                .cloned()
                .unwrap_or_else(|| status(404, r#"{"detail": "Not Found"}"#));

            async move {
                match reply {
                    Reply::Respond {
                        status,
                        body,
                        delay,
                    } => {
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        Ok(HttpResponse { status, body })
                    }
                    Reply::Hang => std::future::pending().await,
                    Reply::Fail(error) => Err(error),
                }
            }
        }
    }

    struct TokioTimer;

    impl Timer for TokioTimer {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            tokio::time::sleep(duration)
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reports: RefCell<Vec<(String, AppError)>>,
    }

    impl ErrorReporter for RecordingReporter {
        fn report(&self, context: &str, error: &AppError) {
            self.reports
                .borrow_mut()
                .push((context.to_string(), error.clone()));
        }
    }

    type TestClient = FieldClient<StubTransport, TokioTimer>;

    fn client_with(
        transport: StubTransport,
        timeout: Duration,
    ) -> (TestClient, Rc<RecordingReporter>) {
        let reporter = Rc::new(RecordingReporter::default());
        let config = ApiConfig::builder()
            .base_url(BASE_URL)
            .timeout(timeout)
            .build();
        let client = FieldClient::with_parts(config, transport, TokioTimer, reporter.clone());
        (client, reporter)
    }

    fn client(transport: StubTransport) -> (TestClient, Rc<RecordingReporter>) {
        client_with(
            transport,
            Duration::from_millis(Config::REQUEST_TIMEOUT_MS.into()),
        )
    }

    fn full_backend() -> StubTransport {
        StubTransport::default()
            .route("dashboard", ok(DASHBOARD_JSON))
            .route("historical", ok(HISTORICAL_JSON))
            .route("recommendations", ok(RECOMMENDATIONS_JSON))
            .route("weather-forecast", ok(FORECAST_JSON))
            .route("sensor-data", ok("[]"))
    }

    // ===== Transport Client Tests =====

    #[tokio::test]
    async fn test_server_error_carries_status_and_detail() {
        let transport =
            StubTransport::default().route("dashboard", status(500, r#"{"detail": "db down"}"#));
        let (client, _) = client(transport);

        let error = client.get_dashboard().await.unwrap_err();
        assert_eq!(
            error,
            AppError::ServerError {
                status: 500,
                message: "db down".to_string()
            }
        );
        assert_eq!(error.to_string(), "db down");
    }

    #[tokio::test]
    async fn test_server_error_without_body_falls_back_to_status() {
        let transport = StubTransport::default().route("recommendations", status(502, ""));
        let (client, _) = client(transport);

        let error = client.get_recommendations().await.unwrap_err();
        assert_eq!(error.to_string(), "Server error: 502");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_request_times_out_at_deadline() {
        let transport = StubTransport::default().route("dashboard", Reply::Hang);
        let (client, reporter) = client(transport);

        let start = Instant::now();
        let error = client.get_dashboard().await.unwrap_err();
        let elapsed = start.elapsed();

        assert_eq!(error, AppError::TimeoutError(10_000));
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_millis(10_100));
        assert_eq!(reporter.reports.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_are_classified() {
        let transport = StubTransport::default()
            .route(
                "dashboard",
                Reply::Fail(TransportError::NoResponse("connection refused".into())),
            )
            .route("recommendations", Reply::Fail(TransportError::Timeout))
            .route(
                "weather-forecast",
                Reply::Fail(TransportError::Other("bad request builder".into())),
            );
        let (client, _) = client_with(transport, Duration::from_secs(5));

        assert_eq!(
            client.get_dashboard().await.unwrap_err(),
            AppError::NetworkError("connection refused".to_string())
        );
        assert_eq!(
            client.get_recommendations().await.unwrap_err(),
            AppError::TimeoutError(5_000)
        );
        assert!(matches!(
            client.get_weather_forecast().await,
            Err(AppError::UnknownError(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unknown_error() {
        let transport = StubTransport::default().route("dashboard", ok("not json"));
        let (client, _) = client(transport);

        let error = client.get_dashboard().await.unwrap_err();
        assert_eq!(error.code(), "UNKNOWN_ERROR");
    }

    #[tokio::test]
    async fn test_missing_base_url_never_touches_network() {
        let reporter = Rc::new(RecordingReporter::default());
        let client = FieldClient::with_parts(
            ApiConfig::default(),
            full_backend(),
            TokioTimer,
            reporter.clone(),
        );

        let error = client.get_weather_forecast().await.unwrap_err();
        assert!(matches!(error, AppError::ConfigError(_)));
        assert_eq!(client.transport().call_count(), 0);
        assert_eq!(reporter.reports.borrow()[0].0, "/weather-forecast");
    }

    #[tokio::test]
    async fn test_requests_send_json_content_type() {
        let (client, _) = client(full_backend());
        client.get_dashboard().await.unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].header("Content-Type"), Some("application/json"));
        assert_eq!(calls[0].url.as_str(), "http://localhost:8000/api/v1/dashboard");
    }

    #[tokio::test]
    async fn test_every_failure_is_reported_once() {
        let transport = StubTransport::default()
            .route("dashboard", status(500, r#"{"detail": "db down"}"#))
            .route("recommendations", ok(RECOMMENDATIONS_JSON));
        let (client, reporter) = client(transport);

        let _ = client.get_dashboard().await;
        client.get_recommendations().await.unwrap();
        let _ = client.get_weather_forecast().await;

        let reports = reporter.reports.borrow();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].0, "/dashboard");
        assert_eq!(reports[1].0, "/weather-forecast");
        assert_eq!(reports[1].1.code(), "SERVER_ERROR");
    }

    // ===== Fetch Operation Tests =====

    #[tokio::test]
    async fn test_days_parameter_is_clamped() {
        let (client, _) = client(full_backend());

        client.get_historical(Some(Days::new(0))).await.unwrap();
        client.get_historical(Some(Days::new(400))).await.unwrap();
        client.get_historical(Days::parse("abc").ok()).await.unwrap();
        client.get_historical(None).await.unwrap();
        client.get_sensor_data(Some(Days::new(0))).await.unwrap();
        client.get_sensor_data(Some(Days::new(400))).await.unwrap();
        client.get_sensor_data(Days::parse("abc").ok()).await.unwrap();
        client.get_sensor_data(None).await.unwrap();

        let queries: Vec<_> = client
            .transport()
            .calls()
            .iter()
            .map(|call| call.url.query().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            queries,
            vec![
                "days=1", "days=365", "days=30", "days=30", "days=1", "days=365", "days=7",
                "days=7"
            ]
        );
    }

    #[tokio::test]
    async fn test_historical_decodes_samples() {
        let (client, _) = client(full_backend());
        let data = client.get_historical(None).await.unwrap();

        assert_eq!(data.sensor_data.len(), 3);
        assert_eq!(data.yield_history[0].season, "2024-2025");
    }

    // ===== Page Join Tests =====

    #[tokio::test]
    async fn test_dashboard_join_fails_when_one_fetch_fails() {
        let transport = StubTransport::default()
            .route("dashboard", ok(DASHBOARD_JSON))
            .route("historical", status(500, r#"{"detail": "db down"}"#));
        let (client, _) = client(transport);

        let error = load_dashboard(&client).await.unwrap_err();
        assert_eq!(error.to_string(), "db down");
        assert_eq!(client.transport().call_count(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_page_is_not_partially_ready() {
        let transport = StubTransport::default()
            .route("dashboard", ok(DASHBOARD_JSON))
            .route("historical", status(500, r#"{"detail": "db down"}"#));
        let (client, _) = client(transport);
        let controller = PageController::new(|_: &FetchState<DashboardData>| {});

        let outcome = controller.refresh(|| load_dashboard(&client)).await;

        assert_eq!(outcome, RefreshOutcome::Completed);
        assert_eq!(
            controller.state(),
            FetchState::Error {
                message: "db down".to_string(),
                stale: None
            }
        );
        assert!(controller.state().data().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard_page_settles_ready_once() {
        let delay = Duration::from_millis(50);
        let transport = StubTransport::default()
            .route("dashboard", slow(DASHBOARD_JSON, delay))
            .route("historical", slow(HISTORICAL_JSON, delay));
        let (client, _) = client(transport);

        let seen: Rc<RefCell<Vec<FetchState<DashboardData>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let controller =
            PageController::new(move |state: &FetchState<DashboardData>| {
                sink.borrow_mut().push(state.clone());
            });

        let start = Instant::now();
        let outcome = controller.refresh(|| load_dashboard(&client)).await;

        assert_eq!(outcome, RefreshOutcome::Completed);
        assert!(start.elapsed() < Duration::from_millis(100));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let data = seen[0].data().expect("ready payload");
        assert_eq!(data.snapshot.current_soil_moisture, 45.5);
        assert_eq!(data.historical.sensor_data.len(), 3);
        assert!(matches!(seen[0], FetchState::Ready(_)));
    }

    #[tokio::test]
    async fn test_analytics_forecast_is_optional() {
        let transport = full_backend().route("weather-forecast", status(503, ""));
        let (client, reporter) = client(transport);

        let data = load_analytics_in(&client, &Utc).await.unwrap();

        assert_eq!(data.forecast, None);
        assert_eq!(data.daily.len(), 2);
        assert!((data.daily[0].moisture - 42.0).abs() < 1e-9);
        assert_eq!(data.daily[0].samples, 2);
        assert_eq!(data.summary().confidence_percent, 90);
        assert_eq!(reporter.reports.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_analytics_accepts_date_only_forecast() {
        let forecast = r#"{"forecast": [
            {"date": "2026-02-16", "temperature": 20, "humidity": 60, "rainfall": 0},
            {"date": "2026-02-17", "temperature": 21, "humidity": 58, "rainfall": 5},
            {"date": "2026-02-18", "temperature": 22, "humidity": 56, "rainfall": 10}
        ]}"#;
        let transport = full_backend().route("weather-forecast", ok(forecast));
        let (client, reporter) = client(transport);

        let data = load_analytics_in(&client, &Utc).await.unwrap();

        let days = data.forecast.expect("forecast decoded").forecast;
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].label(), "Feb 16");
        assert_eq!(days[2].rainfall, 10.0);
        assert!(reporter.reports.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_analytics_requires_recommendations() {
        let transport = full_backend().route("recommendations", status(500, "{}"));
        let (client, _) = client(transport);

        let result = load_analytics_in(&client, &Utc).await;
        assert!(matches!(
            result,
            Err(AppError::ServerError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_last_updated_is_optional() {
        let (healthy, _) = client(full_backend());
        let ts = load_last_updated(&healthy).await.unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-02-15T14:00:00+00:00");

        let (failing, _) = client(StubTransport::default());
        assert_eq!(load_last_updated(&failing).await, None);
    }

    // ===== View-State Controller Tests =====

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refresh_is_skipped() {
        let delay = Duration::from_millis(200);
        let transport = StubTransport::default()
            .route("dashboard", slow(DASHBOARD_JSON, delay))
            .route("historical", slow(HISTORICAL_JSON, delay));
        let (client, _) = client(transport);
        let controller = PageController::new(|_: &FetchState<DashboardData>| {});

        let (first, second) = futures::join!(
            controller.refresh(|| load_dashboard(&client)),
            controller.refresh(|| load_dashboard(&client)),
        );

        assert_eq!(first, RefreshOutcome::Completed);
        assert_eq!(second, RefreshOutcome::Skipped);
        assert_eq!(client.transport().call_count(), 2);
        assert!(matches!(controller.state(), FetchState::Ready(_)));
    }

    #[tokio::test]
    async fn test_retry_after_error_recovers() {
        let (failing, _) = client(StubTransport::default());
        let (healthy, _) = client(full_backend());
        let controller = PageController::new(|_: &FetchState<DashboardData>| {});

        controller.refresh(|| load_dashboard(&failing)).await;
        assert_eq!(controller.state().error(), Some("Not Found"));

        controller.refresh(|| load_dashboard(&healthy)).await;
        assert!(matches!(controller.state(), FetchState::Ready(_)));
    }

    // ===== Poller Tests =====

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_until_cancelled() {
        LocalSet::new()
            .run_until(async {
                let ticks = Rc::new(Cell::new(0));
                let counter = Rc::clone(&ticks);
                let (poller, task) =
                    Poller::task(TokioTimer, Duration::from_secs(300), move || {
                        counter.set(counter.get() + 1);
                    });
                let handle = tokio::task::spawn_local(task);

                tokio::time::sleep(Duration::from_secs(901)).await;
                assert_eq!(ticks.get(), 3);

                drop(poller);
                tokio::time::sleep(Duration::from_secs(600)).await;
                assert_eq!(ticks.get(), 3);
                assert!(handle.is_finished());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_tick_skipped_while_refresh_outstanding() {
        LocalSet::new()
            .run_until(async {
                let delay = Duration::from_secs(400);
                let transport = StubTransport::default()
                    .route("dashboard", slow(DASHBOARD_JSON, delay))
                    .route("historical", slow(HISTORICAL_JSON, delay));
                let (client, _) = client_with(transport, Duration::from_secs(1_000));
                let client = Rc::new(client);

                let controller =
                    Rc::new(PageController::new(|_: &FetchState<DashboardData>| {}));
                let outcomes: Rc<RefCell<Vec<RefreshOutcome>>> = Rc::default();

                let (poller, task) = {
                    let client = Rc::clone(&client);
                    let controller = Rc::clone(&controller);
                    let outcomes = Rc::clone(&outcomes);
                    Poller::task(TokioTimer, Duration::from_secs(300), move || {
                        let client = Rc::clone(&client);
                        let controller = Rc::clone(&controller);
                        let outcomes = Rc::clone(&outcomes);
                        tokio::task::spawn_local(async move {
                            let outcome = controller.refresh(|| load_dashboard(&*client)).await;
                            outcomes.borrow_mut().push(outcome);
                        });
                    })
                };
                tokio::task::spawn_local(task);

                // Ticks at 300 s, 600 s and 900 s; the first refresh settles at 700 s.
                tokio::time::sleep(Duration::from_secs(901)).await;

                assert_eq!(
                    *outcomes.borrow(),
                    vec![RefreshOutcome::Skipped, RefreshOutcome::Completed]
                );
                assert_eq!(client.transport().call_count(), 4);
                assert!(controller.is_in_flight());
                drop(poller);
            })
            .await;
    }
}
