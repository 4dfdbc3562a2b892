pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Base URL of the finance API, fixed at build time through `FINTRACK_API_URL`.
pub fn api_base_url() -> String {
    resolve_base_url(option_env!("FINTRACK_API_URL"))
}

fn resolve_base_url(configured: Option<&str>) -> String {
    let raw = configured
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);

    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset_or_blank() {
        assert_eq!(resolve_base_url(None), DEFAULT_API_BASE_URL);
        assert_eq!(resolve_base_url(Some("   ")), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(
            resolve_base_url(Some("https://api.example.com//")),
            "https://api.example.com"
        );
    }
}
