/**
    A GET request to a provider, built up before being
    handed to a [`Transport`](super::Transport).
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_order() {
        let req = Request::get("https://example.com/search")
            .with_query("format", "json")
            .with_query("limit", 5)
            .with_header("User-Agent", "test");

        assert_eq!(req.url(), "https://example.com/search");
        assert_eq!(req.query()[0], ("format".into(), "json".into()));
        assert_eq!(req.query_value("limit"), Some("5"));
        assert_eq!(req.query_value("missing"), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = Request::get("u").with_header("User-Agent", "geocoder");
        assert_eq!(req.header_value("user-agent"), Some("geocoder"));
    }
}
