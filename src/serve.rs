//! Development server.
//!
//! A lightweight HTTP server for previewing the built site, built on
//! `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - `GET /api/search?q=...` answering from the loaded posts
//! - Graceful shutdown on Ctrl+C
//!
//! ```text
//!   request ──► /api/search ──► filter_posts() ──► JSON
//!      │
//!      └──────► config.build.output ──► file | dir/index.html | 404.html
//! ```

use crate::{
    config::SiteConfig,
    content::Post,
    log,
    search::{filter_posts, search_index},
};
use anyhow::{Context, Result, anyhow};
use std::{
    borrow::Cow,
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const SEARCH_ENDPOINT: &str = "api/search";

/// Start the server and block until Ctrl+C.
pub fn serve_site(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface: {}", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, posts) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. Search endpoint → JSON
/// 2. Exact file or directory `index.html` → serve file
/// 3. Nothing found → `404.html` with status 404
fn handle_request(request: Request, config: &SiteConfig, posts: &[Post]) -> Result<()> {
    let (path, query) = split_url(request.url());
    let path = path.to_owned();

    if path.trim_matches('/') == SEARCH_ENDPOINT {
        let q = query.and_then(|q| query_param(q, "q")).unwrap_or_default();
        let body = search_response(posts, &q, &config.listing.base)?;
        log!("api"; "search {:?}: {} bytes", q, body.len());
        return respond(request, StatusCode(200), "application/json; charset=utf-8", body.into_bytes());
    }

    match resolve_path(&config.build.output, &path) {
        Some(file) => {
            let content = fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            respond(request, StatusCode(200), guess_content_type(&file), content)
        }
        None => serve_not_found(request, &config.build.output),
    }
}

/// Split a request URL into its path and optional query string.
fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Value of `key` in a `a=1&b=2` query string, percent- and `+`-decoded.
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then(|| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v)
                .map(Cow::into_owned)
                .unwrap_or(v)
        })
    })
}

/// Posts matching `query`, in the search index format.
fn search_response(posts: &[Post], query: &str, listing_base: &str) -> Result<String> {
    let matches = filter_posts(posts, query);
    Ok(serde_json::to_string(&search_index(matches, listing_base))?)
}

/// Map a URL path to a file under `root`, resolving `index.html` for
/// directories. Paths escaping `root` are rejected.
fn resolve_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    let relative = decoded.trim_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = root.join(relative);
    if local.is_file() {
        return Some(local);
    }
    let index = local.join("index.html");
    index.is_file().then_some(index)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header value: {value}"))
}

fn respond(request: Request, status: StatusCode, mime: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(status)
        .with_header(content_type(mime)?);
    request.respond(response)?;
    Ok(())
}

/// Serve the generated 404 page, or plain text when it is missing.
fn serve_not_found(request: Request, root: &Path) -> Result<()> {
    if let Ok(page) = fs::read(root.join("404.html")) {
        return respond(request, StatusCode(404), "text/html; charset=utf-8", page);
    }

    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain")?],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}
