use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use clap::Parser;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use once_cell::sync::OnceCell;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use lib_rsa::form::AdForm;
use lib_rsa::save_file::{self, FileStore};

static INDEX: &str = std::include_str!("../index.html");
const DEFAULT_DATA_DIR: &str = ".rsa";

/// Serve the responsive search ad preview form.
#[derive(Debug, Parser)]
#[command(name = "rsa-http", version, about = "Responsive search ad preview server")]
struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "RSA_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "RSA_PORT", default_value_t = 8080)]
    port: u16,

    /// Directory where the saved form is kept.
    #[arg(long, value_name = "DIR", env = "RSA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

static CONFIG: OnceCell<ServerConfig> = OnceCell::new();

fn data_dir() -> &'static Path {
    CONFIG.get()
        .map(|config| config.data_dir.as_path())
        .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
}

fn with_type(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn text(status: StatusCode, body: impl Into<Body>) -> Response<Body> {
    with_type(status, "text/plain; charset=utf-8", body)
}

fn empty(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

fn index() -> Response<Body> {
    // Return embedded index.html
    with_type(StatusCode::OK, "text/html; charset=utf-8", INDEX)
}

fn preview(query: Option<&str>) -> Response<Body> {
    let form = AdForm::from_urlencoded(query.unwrap_or("").as_bytes());

    match lib_rsa::preview_lines(&form.headlines) {
        Ok(lines) => text(StatusCode::OK, lines),
        Err(e) => text(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn save(req: Request<Body>, data_dir: &Path) -> Response<Body> {
    let body = match hyper::body::to_bytes(req.into_body()).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "unable to read form body");
            return text(StatusCode::BAD_REQUEST, "Unable to read form");
        }
    };

    let form = AdForm::from_urlencoded(&body);
    let mut store = FileStore::new(data_dir);

    match save_file::save(&mut store, &form) {
        Ok(()) => empty(StatusCode::NO_CONTENT),
        Err(e) => {
            error!(error = %e, "unable to save form");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Unable to save form")
        }
    }
}

fn load(data_dir: &Path) -> Response<Body> {
    let store = FileStore::new(data_dir);

    match save_file::load(&store) {
        Ok(Some(form)) => with_type(StatusCode::OK, "application/x-www-form-urlencoded", form.to_urlencoded()),
        Ok(None) => empty(StatusCode::NO_CONTENT),
        Err(e) => {
            error!(error = %e, "unable to load form");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Unable to load form")
        }
    }
}

fn reset(data_dir: &Path) -> Response<Body> {
    let mut store = FileStore::new(data_dir);

    match save_file::reset(&mut store) {
        Ok(()) => empty(StatusCode::NO_CONTENT),
        Err(e) => {
            error!(error = %e, "unable to reset form");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Unable to reset form")
        }
    }
}

async fn route(req: Request<Body>, data_dir: &Path) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => index(),
        (&Method::GET, "/preview") => preview(req.uri().query()),
        (&Method::POST, "/save") => save(req, data_dir).await,
        (&Method::GET, "/load") => load(data_dir),
        (&Method::POST, "/reset") => reset(data_dir),
        _ => text(StatusCode::NOT_FOUND, "Not Found"),
    };

    info!(%method, %path, status = response.status().as_u16(), "request");
    Ok(response)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::parse();
    let addr = SocketAddr::new(config.host, config.port);
    if CONFIG.set(config).is_err() {
        bail!("Server configuration was already set");
    }

    info!(%addr, data_dir = %data_dir().display(), "starting");

    let make_svc = make_service_fn(|_conn| async {
        Ok::<_, Infallible>(service_fn(|req| route(req, data_dir())))
    });

    let server = Server::try_bind(&addr)
        .with_context(|| format!("binding {addr}"))?
        .serve(make_svc)
        .with_graceful_shutdown(shutdown_signal());

    server.await.context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "unable to listen for ctrl-c");
        std::future::pending::<()>().await;
    }

    info!("shutting down");
}
