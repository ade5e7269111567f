use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::json;
use sparql_bridge::sparql::build_keyword_query;
use sparql_bridge::{
    BridgeError, InsertSpec, QuerySpec, RequestKind, SparqlStore, StoreClient, StoreConfig,
    TripleRecord,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// A request as seen by the simulated store
#[derive(Debug, Clone)]
struct Captured {
    content_type: Option<String>,
    accept: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl Recorder {
    fn record(&self, headers: &HeaderMap, body: String) {
        let get = |name: header::HeaderName| {
            headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
        };
        self.requests.lock().unwrap().push(Captured {
            content_type: get(header::CONTENT_TYPE),
            accept: get(header::ACCEPT),
            body,
        });
    }

    fn take(&self) -> Vec<Captured> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

async fn sparql_endpoint(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    recorder.record(&headers, body);
    axum::Json(json!({
        "head": { "vars": ["subject", "predicate", "object"] },
        "results": { "bindings": [
            {
                "subject": { "type": "uri", "value": "http://ex/tomato" },
                "predicate": { "type": "uri", "value": "http://ex/color" },
                "object": { "type": "literal", "value": "red" }
            },
            {
                "subject": { "type": "uri", "value": "http://ex/basil" },
                "object": { "type": "literal", "value": "42", "datatype": "http://www.w3.org/2001/XMLSchema#integer" }
            }
        ]}
    }))
}

async fn update_endpoint(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    recorder.record(&headers, body);
    StatusCode::NO_CONTENT
}

/// Serve `app` on an ephemeral local port and return its base URL
async fn spawn_store(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base: &str) -> StoreClient {
    let config = StoreConfig::new(format!("{}/ds/sparql", base), format!("{}/ds/update", base));
    StoreClient::new(&config).unwrap()
}

async fn recording_store() -> (StoreClient, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/ds/sparql", post(sparql_endpoint))
        .route("/ds/update", post(update_endpoint))
        .with_state(recorder.clone());
    let base = spawn_store(app).await;
    (client_for(&base), recorder)
}

#[tokio::test]
async fn test_query_sends_sparql_and_normalizes() {
    let (client, recorder) = recording_store().await;

    let records = client
        .query(&QuerySpec::Keyword { keyword: "Tomato".to_string(), limit: 20 })
        .await
        .unwrap();

    assert_eq!(
        records,
        vec![
            TripleRecord {
                subject: Some("http://ex/tomato".to_string()),
                predicate: Some("http://ex/color".to_string()),
                object: Some("red".to_string()),
            },
            TripleRecord {
                subject: Some("http://ex/basil".to_string()),
                predicate: None,
                object: Some("42".to_string()),
            },
        ]
    );

    let requests = recorder.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/sparql-query"));
    assert_eq!(requests[0].accept.as_deref(), Some("application/json"));
    assert_eq!(requests[0].body, build_keyword_query("Tomato", 20).unwrap().as_str());
}

#[tokio::test]
async fn test_insert_posts_update() {
    let (client, recorder) = recording_store().await;

    let spec = InsertSpec::new()
        .prefix("ex", "http://ex#")
        .triple(("<http://ex#a>", "<http://ex#b>", "<http://ex#c>"));
    client.insert(&spec).await.unwrap();

    let requests = recorder.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/sparql-update"));
    assert!(requests[0].body.starts_with("PREFIX ex: <http://ex#>\nINSERT DATA {"));
    assert!(requests[0].body.contains("<http://ex#a> <http://ex#b> <http://ex#c>"));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_store() {
    let (client, recorder) = recording_store().await;

    let err = client.query(&QuerySpec::Dump { limit: 0 }).await.unwrap_err();
    assert!(matches!(err, BridgeError::InvalidArgument(_)));

    let err = client.insert(&InsertSpec::new().prefix("ex", "http://ex#")).await.unwrap_err();
    assert!(matches!(err, BridgeError::InvalidArgument(_)));

    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn test_store_error_carries_status_and_body() {
    let app = Router::new().route(
        "/ds/sparql",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "syntax error") }),
    );
    let base = spawn_store(app).await;
    let client = client_for(&base);

    let err = client
        .execute(client.query_endpoint(), "SELEKT nonsense", RequestKind::Query)
        .await
        .unwrap_err();

    match err {
        BridgeError::Store { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "syntax error");
        }
        other => panic!("expected store error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client
        .execute(client.query_endpoint(), "SELECT * WHERE { ?s ?p ?o }", RequestKind::Query)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Transport(_)));
    assert_eq!(err.kind(), "transport_error");
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let app = Router::new().route("/ds/sparql", post(|| async { "<html>oops</html>" }));
    let base = spawn_store(app).await;
    let client = client_for(&base);

    let err = client.query(&QuerySpec::Dump { limit: 5 }).await.unwrap_err();
    assert!(matches!(err, BridgeError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_configured_timeout_is_transport_error() {
    let app = Router::new().route(
        "/ds/sparql",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let base = spawn_store(app).await;
    let mut config = StoreConfig::new(format!("{}/ds/sparql", base), format!("{}/ds/update", base));
    config.timeout_secs = Some(1);
    let client = StoreClient::new(&config).unwrap();

    let err = client.query(&QuerySpec::Dump { limit: 5 }).await.unwrap_err();
    assert!(matches!(err, BridgeError::Transport(_)));
}

/// Signals on its channel when the store's handler future is dropped
struct DropSignal(Option<oneshot::Sender<()>>);

impl Drop for DropSignal {
    fn drop(&mut self) {
        if let Some(tx) = self.0.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Clone)]
struct Hooks {
    started: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    dropped: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

async fn stalled_endpoint(State(hooks): State<Hooks>) -> &'static str {
    let _signal = DropSignal(hooks.dropped.lock().unwrap().take());
    let started = hooks.started.lock().unwrap().take();
    if let Some(tx) = started {
        let _ = tx.send(());
    }
    tokio::time::sleep(Duration::from_secs(30)).await;
    "{}"
}

#[tokio::test]
async fn test_dropped_request_is_abandoned_upstream() {
    let (started_tx, started_rx) = oneshot::channel();
    let (dropped_tx, dropped_rx) = oneshot::channel();
    let hooks = Hooks {
        started: Arc::new(Mutex::new(Some(started_tx))),
        dropped: Arc::new(Mutex::new(Some(dropped_tx))),
    };
    let app = Router::new()
        .route("/ds/sparql", post(stalled_endpoint))
        .with_state(hooks);
    let base = spawn_store(app).await;
    let client = client_for(&base);

    let request = client.query(&QuerySpec::Dump { limit: 5 });
    tokio::select! {
        _ = request => panic!("store never answers, the request cannot complete"),
        started = started_rx => started.unwrap(),
    }
    // The request future is dropped once the select returns; its connection
    // closes and the store stops serving it.

    let dropped = tokio::time::timeout(Duration::from_secs(5), dropped_rx).await;
    assert!(
        matches!(dropped, Ok(Ok(()))),
        "store handler should be dropped after the caller abandons the request"
    );
}
