pub mod contact;
pub mod health;
pub mod login;
pub mod orders;
pub mod payments;
pub mod profiles;

use crate::core::auth::constant_time_eq;
use axum::http::HeaderMap;
use std::collections::HashMap;

/// Admin gate shared by the listing endpoints: the token can come from a
/// header or the `key`/`token` query parameters. An empty configured token
/// leaves the endpoint open.
pub(crate) fn admin_authorized(
    configured: &str,
    header_name: &str,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> bool {
    if configured.is_empty() {
        return true;
    }
    let provided = headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| params.get("key").cloned())
        .or_else(|| params.get("token").cloned());
    match provided {
        Some(value) => constant_time_eq(value.as_bytes(), configured.as_bytes()),
        None => false,
    }
}

pub(crate) fn request_meta(headers: &HeaderMap) -> crate::domain::model::RequestMeta {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    crate::domain::model::RequestMeta {
        user_agent: get("user-agent"),
        referer: get("referer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn open_when_no_token_configured() {
        assert!(admin_authorized("", "x-admin-token", &HeaderMap::new(), &HashMap::new()));
    }

    #[test]
    fn header_or_query_param_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-admin-token", HeaderValue::from_static("tok"));
        assert!(admin_authorized("tok", "x-admin-token", &headers, &HashMap::new()));

        let params: HashMap<String, String> =
            [("key".to_string(), "tok".to_string())].into_iter().collect();
        assert!(admin_authorized("tok", "x-admin-token", &HeaderMap::new(), &params));

        let params: HashMap<String, String> =
            [("token".to_string(), "tok".to_string())].into_iter().collect();
        assert!(admin_authorized("tok", "x-admin-token", &HeaderMap::new(), &params));
    }

    #[test]
    fn wrong_or_missing_token_rejected() {
        assert!(!admin_authorized("tok", "x-admin-token", &HeaderMap::new(), &HashMap::new()));
        let params: HashMap<String, String> =
            [("key".to_string(), "nope".to_string())].into_iter().collect();
        assert!(!admin_authorized("tok", "x-admin-token", &HeaderMap::new(), &params));
    }
}
