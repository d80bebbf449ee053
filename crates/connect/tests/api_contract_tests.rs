use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use finfolio_connect::{
    ApiClient, CredentialStore, HoldingsApiClient, HoldingsService, HoldingsServiceTrait,
    SessionInvalidationHandler, SessionManager, StoredCredential,
};
use finfolio_core::errors::{FetchError, UploadError};
use finfolio_core::{Error, Holding, HoldingType, PortfolioSnapshot, Result};

#[derive(Default)]
struct MemoryStore {
    credential: Mutex<Option<StoredCredential>>,
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredCredential>> {
        Ok(self.credential.lock().unwrap().clone())
    }

    fn store(&self, credential: &StoredCredential) -> Result<()> {
        *self.credential.lock().unwrap() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.credential.lock().unwrap() = None;
        Ok(())
    }
}

/// Counts invalidations before handing them on to the session manager.
struct CountingHandler {
    session: Arc<SessionManager>,
    fired: AtomicUsize,
}

impl SessionInvalidationHandler for CountingHandler {
    fn on_unauthorized(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
        self.session.on_unauthorized();
    }
}

/// Matches only requests that carry no credential.
struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    session: Arc<SessionManager>,
    handler: Arc<CountingHandler>,
    client: Arc<ApiClient>,
    service: HoldingsService,
}

fn connect(base_url: &str) -> Harness {
    let store = Arc::new(MemoryStore::default());
    let session = Arc::new(SessionManager::new(store.clone()));
    let handler = Arc::new(CountingHandler {
        session: session.clone(),
        fired: AtomicUsize::new(0),
    });
    let client =
        Arc::new(ApiClient::new(base_url, session.clone(), handler.clone()).unwrap());
    let service = HoldingsService::new(client.clone());
    Harness {
        store,
        session,
        handler,
        client,
        service,
    }
}

fn ids(snapshot: &PortfolioSnapshot) -> Vec<i64> {
    snapshot.iter().map(Holding::id).collect()
}

fn write_workbook(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"spreadsheet bytes").unwrap();
    path
}

#[tokio::test]
async fn login_exchanges_credentials_and_persists_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .and(body_string_contains("username=user%40example.com"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": "tok-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    assert!(!harness.session.has_session());

    let signed_in = harness
        .client
        .login("user@example.com", "hunter2")
        .await
        .unwrap();

    assert!(signed_in);
    assert!(harness.session.has_session());
    assert_eq!(
        harness.session.current_user(),
        Some("user@example.com".to_string())
    );
    assert_eq!(
        *harness.store.credential.lock().unwrap(),
        Some(StoredCredential {
            token: "tok-1".to_string(),
            email: "user@example.com".to_string(),
        })
    );
}

#[tokio::test]
async fn rejected_login_reports_false_and_keeps_the_existing_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "detail": "Incorrect email or password" })),
        )
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("old-token", "old@example.com").unwrap();

    let signed_in = harness
        .client
        .login("user@example.com", "wrong")
        .await
        .unwrap();

    // The failed attempt is reported, not raised, and does not disturb
    // the session that was already held.
    assert!(!signed_in);
    assert!(harness.session.has_session());
    assert_eq!(
        harness.session.current_user(),
        Some("old@example.com".to_string())
    );
    assert_eq!(harness.handler.fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_sends_the_bearer_credential_and_merges_both_classes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock_holdings/"))
        .and(header("authorization", "Bearer tok-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "name": "Apex Industries", "sector": "Technology", "quantity": 10.0 },
            { "id": 2, "name": "Borealis Steel" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mutual_fund_holdings/"))
        .and(header("authorization", "Bearer tok-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 3, "scheme_name": "Blue Lake Flexi Cap", "xirr": "12.4%" }
        ])))
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("tok-7", "user@example.com").unwrap();

    let snapshot = harness.service.fetch_holdings().await.unwrap();

    // Equities first, then funds, each in backend order.
    assert_eq!(ids(&snapshot), vec![1, 2, 3]);
    let names: Vec<String> = snapshot.iter().map(|h| h.display_name().to_string()).collect();
    assert_eq!(
        names,
        vec!["Apex Industries", "Borealis Steel", "Blue Lake Flexi Cap"]
    );
    assert_eq!(snapshot.of_type(HoldingType::Fund).count(), 1);
}

#[tokio::test]
async fn failed_fund_leg_fails_the_fetch_and_preserves_the_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock_holdings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 1, "name": "Apex Industries" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mutual_fund_holdings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 3, "scheme_name": "Blue Lake Flexi Cap" }
        ])))
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("tok-7", "user@example.com").unwrap();
    harness.service.fetch_holdings().await.unwrap();
    assert_eq!(ids(&harness.service.snapshot()), vec![1, 3]);

    // The backend starts failing the fund leg.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/stock_holdings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 9, "name": "Nimbus Power" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mutual_fund_holdings/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "upstream unavailable" })),
        )
        .mount(&server)
        .await;

    let err = harness.service.fetch_holdings().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Fetch(FetchError::Status { status: 500, .. })
    ));

    // No partial views: the half-fetched cycle is discarded wholesale.
    assert_eq!(ids(&harness.service.snapshot()), vec![1, 3]);
}

#[tokio::test]
async fn unauthorized_response_invalidates_the_session_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stock_holdings/upload"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("stale-token", "user@example.com").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let workbook = write_workbook(&dir, "march_holdings.xlsx");
    let err = harness
        .service
        .upload_holdings(HoldingType::Equity, &workbook)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upload(UploadError::Rejected(_))));
    assert_eq!(harness.handler.fired.load(Ordering::SeqCst), 1);
    assert!(!harness.session.has_session());
    assert_eq!(*harness.store.credential.lock().unwrap(), None);

    // Follow-up requests go out bare. The mock below only matches
    // requests without an authorization header.
    Mock::given(method("GET"))
        .and(path("/api/stock_holdings/"))
        .and(NoAuthorizationHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let holdings = harness.client.get_equity_holdings().await.unwrap();
    assert!(holdings.is_empty());
}

#[tokio::test]
async fn upload_rejection_surfaces_the_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/mutual_fund_holdings/upload"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Only .xlsx files are allowed" })),
        )
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("tok-7", "user@example.com").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let workbook = write_workbook(&dir, "april_funds.xlsx");
    let err = harness
        .service
        .upload_holdings(HoldingType::Fund, &workbook)
        .await
        .unwrap_err();

    match err {
        Error::Upload(UploadError::Rejected(detail)) => {
            assert_eq!(detail, "Only .xlsx files are allowed");
        }
        other => panic!("expected a rejected upload, got {other:?}"),
    }
    // A backend rejection is not a credential problem.
    assert_eq!(harness.handler.fired.load(Ordering::SeqCst), 0);
    assert!(harness.session.has_session());
}

#[tokio::test]
async fn upload_sends_the_file_as_a_multipart_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/mutual_fund_holdings/upload"))
        .and(header("authorization", "Bearer tok-7"))
        .and(body_string_contains("april_funds.xlsx"))
        .and(body_string_contains("spreadsheet bytes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "File processed successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("tok-7", "user@example.com").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let workbook = write_workbook(&dir, "april_funds.xlsx");
    harness
        .service
        .upload_holdings(HoldingType::Fund, &workbook)
        .await
        .unwrap();
}

#[tokio::test]
async fn register_reports_the_backend_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_string_contains("new@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12, "email": "new@example.com"
        })))
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    let created = harness
        .client
        .register("new@example.com", "hunter2")
        .await
        .unwrap();
    assert!(created);
    // Registration does not sign the user in.
    assert!(!harness.session.has_session());

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let created = harness
        .client
        .register("new@example.com", "hunter2")
        .await
        .unwrap();
    assert!(!created);
}

#[tokio::test]
async fn malformed_holdings_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock_holdings/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let harness = connect(&server.uri());
    harness.session.establish("tok-7", "user@example.com").unwrap();

    let err = harness.client.get_equity_holdings().await.unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Decode(_))));
}
