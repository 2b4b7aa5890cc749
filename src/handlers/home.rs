//! Landing page handler.
//!
//! Lists the routes the server answers as plain text.

use once_cell::sync::Lazy;

/// Every route the API serves, in the order they are listed
pub const ROUTES: [&str; 6] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
    "/heartbeat",
];

static HOME_PAGE: Lazy<String> = Lazy::new(|| {
    let mut page = String::from("Welcome to the 'Home' page!\nAvailable Routes:\n");
    for route in ROUTES {
        page.push_str(route);
        page.push('\n');
    }
    page
});

/// Handle GET / requests
pub async fn home_handler() -> &'static str {
    HOME_PAGE.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::empty_dataset;
    use crate::handlers::test_helpers::{get_text, router_for};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_home_lists_routes() {
        let router = router_for(empty_dataset().await);
        let (status, body) = get_text(router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Welcome to the 'Home' page!"));
        for route in ROUTES {
            assert!(body.contains(route), "missing {route}");
        }
    }
}
