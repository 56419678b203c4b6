//! Service description at `/`

use axum::{routing::get, Json, Router};
use serde::Serialize;

const TITLE: &str = "Stockroom";
const DESCRIPTION: &str =
    "CRUD and application API for a database emulating item stock in multiple stores.";

/// Contact details advertised by the service
#[derive(Serialize)]
pub struct Contact {
    pub name: &'static str,
    pub email: &'static str,
}

/// License advertised by the service
#[derive(Serialize)]
pub struct License {
    pub name: &'static str,
    pub url: &'static str,
}

/// Service info response
#[derive(Serialize)]
pub struct ServiceInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub contact: Contact,
    pub license: License,
}

/// GET /
async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: TITLE,
        description: DESCRIPTION,
        version: env!("CARGO_PKG_VERSION"),
        contact: Contact {
            name: "Stockroom Contributors",
            email: "stockroom@example.com",
        },
        license: License {
            name: "Apache 2.0",
            url: "https://www.apache.org/licenses/LICENSE-2.0.html",
        },
    })
}

/// Info routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(info))
}
