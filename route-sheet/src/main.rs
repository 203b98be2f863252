use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use route_sheet::ekispert::{EkispertClient, EkispertConfig, MockEkispert};
use route_sheet::planner::{Backend, CacheConfig, CachedSource, RouteSheet, SheetLayout};
use route_sheet::sheet::{MemoryWorkbook, WorkbookStore, WorkbookStoreConfig};
use route_sheet::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Mock fixtures if `EKISPERT_MOCK_DIR` is set, else the live API.
fn backend() -> Backend {
    if let Some(dir) = env("EKISPERT_MOCK_DIR") {
        let mock = MockEkispert::load(&dir).expect("Failed to load Ekispert mock data");
        info!(dir = %dir, "using recorded Ekispert responses");
        return Backend::Mock(mock);
    }

    let api_key = env("EKISPERT_API_KEY").unwrap_or_else(|| {
        warn!("EKISPERT_API_KEY not set. API calls will fail.");
        String::new()
    });
    let mut config = EkispertConfig::new(api_key);
    if let Some(url) = env("EKISPERT_BASE_URL") {
        config = config.with_base_url(url);
    }
    if let Some(secs) = env("EKISPERT_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
        config = config.with_timeout(secs);
    }

    let client = EkispertClient::new(config).expect("Failed to create Ekispert client");
    Backend::Live(client)
}

fn cache_config() -> CacheConfig {
    let mut config = CacheConfig::default();
    if let Some(secs) = env("EKISPERT_CACHE_TTL_SECS").and_then(|s| s.parse().ok()) {
        config.ttl = Duration::from_secs(secs);
    }
    config
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let source = CachedSource::new(backend(), &cache_config());
    let planner = RouteSheet::new(source, SheetLayout::default());

    // Load the saved workbook, or start empty
    let store = env("WORKBOOK_PATH").map(|path| WorkbookStore::new(WorkbookStoreConfig::new(path)));
    let mut workbook = match &store {
        Some(store) => match store.load().expect("Failed to load workbook") {
            Some(workbook) => {
                info!(path = %store.path().display(), "loaded workbook");
                workbook
            }
            None => MemoryWorkbook::new(),
        },
        None => MemoryWorkbook::new(),
    };
    planner
        .ensure_layout(&mut workbook)
        .expect("Failed to prepare input sheets");

    let state = AppState::new(planner, workbook, store);
    let app = create_router(state);

    let addr: SocketAddr = env("BIND_ADDR")
        .as_deref()
        .unwrap_or(DEFAULT_BIND_ADDR)
        .parse()
        .expect("Invalid BIND_ADDR");
    info!(%addr, "route sheet listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
