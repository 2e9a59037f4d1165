//! Links back into the bot's own web front end

use reqwest::Url;
use timebot_domain::Result;

use crate::http::base_url;

/// Public base URL of the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUrl {
    base: Url,
}

impl AppUrl {
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self { base: base_url(raw)? })
    }

    /// Resolve `path` against the base and append `query` urlencoded.
    ///
    /// An empty path resolves to the base itself.
    pub fn resolve(&self, path: &str, query: &[(&str, &str)]) -> String {
        let path = path.trim_start_matches('/');
        let mut url = self.base.clone();
        if !path.is_empty() {
            let joined = format!("{}{}", url.path(), path);
            url.set_path(&joined);
        }
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect();
            url.set_query(Some(&encoded.join("&")));
        }
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_the_root() {
        let app = AppUrl::new("http://localhost:3000").unwrap();
        assert_eq!(app.resolve("", &[]), "http://localhost:3000/");
    }

    #[test]
    fn resolves_paths_under_a_prefix() {
        let app = AppUrl::new("https://bots.acme.com/timebot").unwrap();
        assert_eq!(app.resolve("/copy", &[]), "https://bots.acme.com/timebot/copy");
        assert_eq!(app.resolve("harvest-auth", &[]), "https://bots.acme.com/timebot/harvest-auth");
    }

    #[test]
    fn appends_encoded_query() {
        let app = AppUrl::new("http://localhost:3000/").unwrap();
        assert_eq!(
            app.resolve("harvest-auth", &[("next", "/copy?x=1"), ("user", "a b")]),
            "http://localhost:3000/harvest-auth?next=%2Fcopy%3Fx%3D1&user=a%20b"
        );
    }
}
