use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

use crate::api::json_response;
use crate::catalog::{Catalog, ProductPage};
use crate::error::Result;
use crate::query::{PageRequestSpec, RawParams};

/// Handle GET /products
pub async fn list(catalog: &Catalog, params: &RawParams) -> Result<Response<Full<Bytes>>> {
    let spec = PageRequestSpec::parse(params)?;
    ok(&catalog.list_all(&spec).await?)
}

/// Handle GET /products/category/{category}
pub async fn by_category(
    catalog: &Catalog,
    category: &str,
    params: &RawParams,
) -> Result<Response<Full<Bytes>>> {
    let spec = PageRequestSpec::parse(params)?;
    ok(&catalog.by_category(category, &spec).await?)
}

/// Handle GET /products/search
///
/// `keyword` is required here, but a blank one matches everything.
pub async fn search(catalog: &Catalog, params: &RawParams) -> Result<Response<Full<Bytes>>> {
    let spec = PageRequestSpec::parse(params);
    let keyword = params.get("keyword");

    let spec = match (spec, keyword) {
        (Ok(spec), Some(_)) => spec,
        (spec, keyword) => {
            let mut errors = spec.err().unwrap_or_default();
            if keyword.is_none() {
                errors.push("keyword", "is required");
            }
            return Err(errors.into());
        }
    };

    ok(&catalog.search(spec.keyword().unwrap_or_default(), &spec).await?)
}

/// Handle GET /products/filter
pub async fn filter(catalog: &Catalog, params: &RawParams) -> Result<Response<Full<Bytes>>> {
    let spec = PageRequestSpec::parse(params)?;
    ok(&catalog.filter(&spec).await?)
}

/// Handle GET /products/price-range
pub async fn price_range(catalog: &Catalog, params: &RawParams) -> Result<Response<Full<Bytes>>> {
    let spec = PageRequestSpec::parse(params)?;
    ok(&catalog.price_range(&spec).await?)
}

fn ok(page: &ProductPage) -> Result<Response<Full<Bytes>>> {
    let body = serde_json::to_vec(page)?;
    Ok(json_response(StatusCode::OK, Bytes::from(body)))
}
