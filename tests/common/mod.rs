#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::watch;

use product_catalog_client::telemetry::RecordingTelemetry;
use product_catalog_client::{AppConfig, ProductsController};

/// What the mock `/api/products` endpoint answers
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
pub struct Observed {
    pub hits: AtomicUsize,
    pub accept: Mutex<Vec<Option<String>>>,
}

/// Holds requests until opened; stays open afterwards
#[derive(Clone)]
pub struct Gate(Arc<watch::Sender<bool>>);

impl Gate {
    pub fn new() -> Self {
        Self(Arc::new(watch::channel(false).0))
    }

    pub fn open(&self) {
        self.0.send_replace(true);
    }

    pub async fn passed(&self) {
        let mut rx = self.0.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

struct Shared {
    reply: Mutex<Reply>,
    gate: Option<Gate>,
    observed: Arc<Observed>,
}

async fn products(req: HttpRequest, shared: web::Data<Shared>) -> HttpResponse {
    shared.observed.hits.fetch_add(1, Ordering::SeqCst);
    shared.observed.accept.lock().unwrap().push(
        req.headers()
            .get("accept")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    if let Some(gate) = &shared.gate {
        gate.passed().await;
    }

    let reply = shared.reply.lock().unwrap().clone();
    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body)
}

/// Local catalog API on an ephemeral port, serving `GET /api/products`.
pub struct MockCatalog {
    pub base_url: String,
    pub observed: Arc<Observed>,
    gate: Option<Gate>,
    shared: web::Data<Shared>,
    handle: ServerHandle,
}

impl MockCatalog {
    pub fn start(reply: Reply) -> Self {
        Self::start_inner(reply, None)
    }

    /// Requests block until [`MockCatalog::open_gate`] is called
    pub fn start_gated(reply: Reply) -> Self {
        Self::start_inner(reply, Some(Gate::new()))
    }

    fn start_inner(reply: Reply, gate: Option<Gate>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let observed = Arc::new(Observed::default());
        let shared = web::Data::new(Shared {
            reply: Mutex::new(reply),
            gate: gate.clone(),
            observed: observed.clone(),
        });

        let data = shared.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/api/products", web::get().to(products))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}/api/"),
            observed,
            gate,
            shared,
            handle,
        }
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.open();
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.shared.reply.lock().unwrap() = reply;
    }

    pub fn hits(&self) -> usize {
        self.observed.hits.load(Ordering::SeqCst)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Raw TCP endpoint for responses actix will not produce.
pub struct RawServer {
    pub base_url: String,
    gate: Gate,
}

impl RawServer {
    /// Accepts each connection, waits for the gate, then closes it without
    /// writing a response.
    pub async fn hang_up() -> Self {
        Self::spawn(None).await
    }

    /// Answers every request with `status_line` (e.g. `500 Boom`) and an
    /// empty body. The gate starts open.
    pub async fn status_line(status_line: &str) -> Self {
        let server = Self::spawn(Some(status_line.to_string())).await;
        server.open_gate();
        server
    }

    async fn spawn(status_line: Option<String>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let gate = Gate::new();

        let held = gate.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let gate = held.clone();
                let status_line = status_line.clone();
                tokio::spawn(async move {
                    read_request_head(&mut stream).await;
                    gate.passed().await;
                    if let Some(line) = status_line {
                        let response = format!(
                            "HTTP/1.1 {line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                        );
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                });
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}/api/"),
            gate,
        }
    }

    pub fn open_gate(&self) {
        self.gate.open();
    }
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

/// A base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/")
}

pub fn controller_for(base_url: &str) -> (Arc<ProductsController>, Arc<RecordingTelemetry>) {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let controller = ProductsController::new(Arc::new(AppConfig::new(base_url)), telemetry.clone());
    (Arc::new(controller), telemetry)
}
