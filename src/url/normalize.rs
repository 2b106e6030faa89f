use crate::UrlError;
use url::Url;

/// Parses and validates the seed URL of a crawl
///
/// The seed goes through the same serialization as every discovered link, so
/// `https://example.com` becomes `https://example.com/` and a later link to
/// `/` is recognised as the same page. No other normalization is applied.
///
/// # Arguments
///
/// * `seed` - The seed URL as given on the command line
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed
/// * `Err(UrlError)` - The seed is malformed, not HTTP(S), or has no host
///
/// # Examples
///
/// ```
/// use page_trawler::url::parse_seed;
///
/// let url = parse_seed("https://example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    Ok(url)
}
