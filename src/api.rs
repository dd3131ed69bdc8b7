use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use matchit::Router;
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::query::RawParams;

pub mod health;
pub mod products;

/// Route identifier
#[derive(Clone, Copy)]
enum Route {
    Health,
    ListProducts,
    ByCategory,
    Search,
    Filter,
    PriceRange,
}

/// Build the router
fn build_router() -> std::result::Result<Router<Route>, matchit::InsertError> {
    let mut router = Router::new();
    router.insert("/health", Route::Health)?;
    router.insert("/products", Route::ListProducts)?;
    router.insert("/products/category/{category}", Route::ByCategory)?;
    router.insert("/products/search", Route::Search)?;
    router.insert("/products/filter", Route::Filter)?;
    router.insert("/products/price-range", Route::PriceRange)?;
    Ok(router)
}

/// Routes requests to the catalog.
///
/// Holds no per-request state, so one instance serves every connection.
pub struct App {
    router: Router<Route>,
    catalog: Catalog,
}

impl App {
    pub fn new(catalog: Catalog) -> std::result::Result<Self, matchit::InsertError> {
        Ok(Self {
            router: build_router()?,
            catalog,
        })
    }

    /// Handle one request. Only the method, path and query are read.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);

        debug!("{} {}", method, path);

        let result = self.dispatch(&method, &path, query.as_deref()).await;

        match result {
            Ok(response) => response,
            Err(e) => {
                if e.status_code().is_server_error() {
                    error!("{} {} failed: {}", method, path, e);
                } else {
                    debug!("{} {} rejected: {}", method, path, e);
                }
                e.into_response()
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
    ) -> Result<Response<Full<Bytes>>> {
        let matched = self
            .router
            .at(path)
            .map_err(|_| Error::NotFound(path.to_string()))?;

        if method != Method::GET {
            return Err(Error::MethodNotAllowed);
        }

        let params = RawParams::from_query(query);
        let catalog = &self.catalog;

        match *matched.value {
            Route::Health => health::health().await,
            Route::ListProducts => products::list(catalog, &params).await,
            Route::ByCategory => {
                let category = matched.params.get("category").unwrap_or_default();
                products::by_category(catalog, &percent_decode(category), &params).await
            }
            Route::Search => products::search(catalog, &params).await,
            Route::Filter => products::filter(catalog, &params).await,
            Route::PriceRange => products::price_range(catalog, &params).await,
        }
    }
}

/// Build a JSON response with the given status
pub fn json_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Decode `%XX` escapes in a path segment
fn percent_decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Run the HTTP server
pub async fn run(config: Config, catalog: Catalog) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    let app = Arc::new(App::new(catalog)?);

    info!("Server listening on http://{}", addr);

    loop {
        let (stream, remote_addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let app = Arc::clone(&app);

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let app = Arc::clone(&app);
                async move { Ok::<_, std::convert::Infallible>(app.handle(req).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!("Error serving connection from {}: {}", remote_addr, e);
            }
        });
    }
}
