//! E-utilities endpoints and request URL construction.

use super::params::Params;
use crate::error::Result;
use std::fmt;
use url::Url;

/// Base URL of the NCBI E-utilities service.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// The E-utilities this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// EFetch: full records for a list of UIDs.
    Fetch,
    /// EInfo: database statistics and field lists.
    Info,
    /// ESearch: UIDs matching a query.
    Search,
    /// ESummary: document summaries for a list of UIDs.
    Summary,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Fetch,
        Endpoint::Info,
        Endpoint::Search,
        Endpoint::Summary,
    ];

    /// Path suffix appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Fetch => "/efetch.fcgi",
            Endpoint::Info => "/einfo.fcgi",
            Endpoint::Search => "/esearch.fcgi",
            Endpoint::Summary => "/esummary.fcgi",
        }
    }

    /// Utility name as NCBI documents it.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Fetch => "efetch",
            Endpoint::Info => "einfo",
            Endpoint::Search => "esearch",
            Endpoint::Summary => "esummary",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds `base + endpoint.path()` with `params` as the query string.
///
/// Pairs are form-urlencoded in the order `params` holds them. List values
/// have already been flattened by [`Value::render`](super::Value::render).
pub(crate) fn request_url(base: &str, endpoint: Endpoint, params: &Params) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), endpoint.path()))?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.iter() {
            pairs.append_pair(key, &value.render());
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths: Vec<&str> = Endpoint::ALL.iter().map(Endpoint::path).collect();
        assert_eq!(
            paths,
            vec!["/efetch.fcgi", "/einfo.fcgi", "/esearch.fcgi", "/esummary.fcgi"]
        );
        assert_eq!(Endpoint::Search.to_string(), "esearch");
    }

    #[test]
    fn test_request_url_joins_path() {
        let url = request_url(DEFAULT_BASE_URL, Endpoint::Fetch, &Params::new()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi"
        );

        let url = request_url("http://localhost:8080/eutils/", Endpoint::Info, &Params::new()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/eutils/einfo.fcgi");
    }

    #[test]
    fn test_request_url_encodes_params_in_order() {
        let params = Params::new()
            .with("db", "snp")
            .with("id", vec![123, 456])
            .with("term", "low coverage[WORD]+AND+inprogress[SEQS]");

        let url = request_url(DEFAULT_BASE_URL, Endpoint::Search, &params).unwrap();
        assert_eq!(
            url.query(),
            Some("db=snp&id=123%2C456&term=low+coverage%5BWORD%5D%2BAND%2Binprogress%5BSEQS%5D")
        );

        // Decoding gives back exactly what was rendered
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded[1], ("id".to_string(), "123,456".to_string()));
        assert_eq!(
            decoded[2],
            (
                "term".to_string(),
                "low coverage[WORD]+AND+inprogress[SEQS]".to_string()
            )
        );
    }

    #[test]
    fn test_request_url_rejects_bad_base() {
        assert!(request_url("not a url", Endpoint::Info, &Params::new()).is_err());
    }
}
