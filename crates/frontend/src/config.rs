//! Runtime configuration of the console.
//!
//! Defaults are baked in at compile time (`ERP_API_URL`, `ERP_ORGANIZATION_ID`)
//! and may be overridden per browser through `localStorage`.

use contracts::shared::pricing::DEFAULT_IVA_RATE;

pub const STORAGE_API_URL_KEY: &str = "erp_api_base_url";
pub const STORAGE_ORGANIZATION_KEY: &str = "erp_organization_id";

/// Port of the ERP backend when no URL is configured.
const DEFAULT_API_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API root without trailing slash, e.g. "http://localhost:5000/api"
    pub api_base_url: String,
    pub organization_id: Option<i64>,
    pub iva_rate: f64,
}

impl AppConfig {
    /// Compile-time defaults, then `localStorage` overrides.
    pub fn load() -> Self {
        let mut config = Self {
            api_base_url: option_env!("ERP_API_URL")
                .map(normalize_base_url)
                .unwrap_or_else(default_api_base),
            organization_id: option_env!("ERP_ORGANIZATION_ID").and_then(parse_organization_id),
            iva_rate: DEFAULT_IVA_RATE,
        };

        if let Some(url) = read_storage(STORAGE_API_URL_KEY).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = normalize_base_url(&url);
        }
        if let Some(org) =
            read_storage(STORAGE_ORGANIZATION_KEY).and_then(|v| parse_organization_id(&v))
        {
            config.organization_id = Some(org);
        }

        log::info!(
            "ERP API at {} (organization {:?})",
            config.api_base_url,
            config.organization_id
        );
        config
    }

    /// `{api_base_url}{base}[/{path}][/{id}]`
    pub fn resource_url(&self, base: &str, path: Option<&str>, id: Option<i64>) -> String {
        resource_url(&self.api_base_url, base, path, id)
    }
}

pub fn use_config() -> AppConfig {
    leptos::prelude::use_context::<AppConfig>().expect("AppConfig not provided in context")
}

/// Joins URL segments without doubled or missing slashes.
pub fn resource_url(api_base: &str, base: &str, path: Option<&str>, id: Option<i64>) -> String {
    let mut url = api_base.trim_end_matches('/').to_string();
    for segment in std::iter::once(base)
        .chain(path)
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
    {
        url.push('/');
        url.push_str(segment);
    }
    if let Some(id) = id {
        url.push('/');
        url.push_str(&id.to_string());
    }
    url
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_organization_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

// Same host as the page, backend port.
fn default_api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return format!("http://127.0.0.1:{}/api", DEFAULT_API_PORT),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}/api", protocol, hostname, DEFAULT_API_PORT)
}

fn read_storage(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(key)
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_segments() {
        let base = "http://localhost:5000/api/";
        assert_eq!(
            resource_url(base, "/Areas", None, None),
            "http://localhost:5000/api/Areas"
        );
        assert_eq!(
            resource_url(base, "/Areas", None, Some(7)),
            "http://localhost:5000/api/Areas/7"
        );
        assert_eq!(
            resource_url(base, "/CustomerDeliveryAddress", Some("/customer/"), Some(3)),
            "http://localhost:5000/api/CustomerDeliveryAddress/customer/3"
        );
        assert_eq!(
            resource_url(base, "/Payment", Some("sale"), Some(12)),
            "http://localhost:5000/api/Payment/sale/12"
        );
    }

    #[test]
    fn organization_id_parsing() {
        assert_eq!(parse_organization_id(" 4 "), Some(4));
        assert_eq!(parse_organization_id("0"), None);
        assert_eq!(parse_organization_id("abc"), None);
    }

    #[test]
    fn config_builds_urls() {
        let config = AppConfig {
            api_base_url: normalize_base_url(" https://erp.example.com/api/ "),
            organization_id: Some(1),
            iva_rate: DEFAULT_IVA_RATE,
        };
        assert_eq!(
            config.resource_url("/Sale", None, Some(5)),
            "https://erp.example.com/api/Sale/5"
        );
    }
}
