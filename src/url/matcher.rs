use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

/// File extensions that are never crawled (audio, video, images, documents, archives)
pub const SKIPPED_EXTENSIONS: &[&str] = &[
    // Audio & video
    "mp3", "wav", "ogg", "mp4", "avi", "mov", "mkv",
    // Images
    "jpg", "jpeg", "png", "gif", "svg", "webp",
    // Documents & archives
    "pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "zip", "rar",
];

static PAGINATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page/\d+/?$").expect("pagination pattern is valid"));

/// Returns the path component of a URL string
///
/// Falls back to everything before the query or fragment when the string does
/// not parse as an absolute URL.
fn path_of(url: &str) -> Cow<'_, str> {
    match Url::parse(url) {
        Ok(parsed) => Cow::Owned(parsed.path().to_string()),
        Err(_) => {
            let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
            Cow::Borrowed(&url[..end])
        }
    }
}

/// Checks if a URL points to a media or document file
///
/// The comparison is case-insensitive, so `/photo.JPG` is rejected the same as
/// `/photo.jpg`. Only the path is inspected; a query string does not hide the
/// extension.
///
/// # Examples
///
/// ```
/// use page_trawler::url::is_media_file;
///
/// assert!(is_media_file("https://example.com/song.mp3"));
/// assert!(is_media_file("https://example.com/IMAGE.PNG"));
/// assert!(!is_media_file("https://example.com/about"));
/// ```
pub fn is_media_file(url: &str) -> bool {
    let path = path_of(url).to_lowercase();
    SKIPPED_EXTENSIONS.iter().any(|ext| {
        path.strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Checks if a URL is a pagination link such as `/blog/page/2/`
///
/// # Examples
///
/// ```
/// use page_trawler::url::is_pagination_link;
///
/// assert!(is_pagination_link("https://example.com/blog/page/2/"));
/// assert!(is_pagination_link("https://example.com/blog/page/2"));
/// assert!(!is_pagination_link("https://example.com/blog/page2/"));
/// ```
pub fn is_pagination_link(url: &str) -> bool {
    PAGINATION_PATTERN.is_match(&path_of(url))
}

/// Checks if a URL carries a fragment marker anywhere in the string
pub fn has_fragment(url: &str) -> bool {
    url.contains('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_skipped_extension_rejected() {
        for ext in SKIPPED_EXTENSIONS {
            let url = format!("https://example.com/files/report.{}", ext);
            assert!(is_media_file(&url), "expected {} to be rejected", url);
        }
    }

    #[test]
    fn test_media_check_ignores_case() {
        assert!(is_media_file("https://example.com/photo.JPG"));
        assert!(is_media_file("https://example.com/photo.Jpeg"));
        assert!(is_media_file("https://example.com/SLIDES.PPTX"));
    }

    #[test]
    fn test_media_check_looks_at_path_only() {
        assert!(is_media_file("https://example.com/photo.png?size=large"));
        assert!(!is_media_file("https://example.com/gallery?format=png"));
    }

    #[test]
    fn test_extension_needs_dot_separator() {
        assert!(!is_media_file("https://example.com/blog/mp3"));
        assert!(!is_media_file("https://example.com/shapes/svg-guide"));
    }

    #[test]
    fn test_html_pages_not_media() {
        assert!(!is_media_file("https://example.com/"));
        assert!(!is_media_file("https://example.com/index.html"));
        assert!(!is_media_file("https://example.com/docs/intro"));
    }

    #[test]
    fn test_pagination_with_and_without_trailing_slash() {
        assert!(is_pagination_link("https://example.com/blog/page/2/"));
        assert!(is_pagination_link("https://example.com/blog/page/2"));
        assert!(is_pagination_link("https://example.com/page/10"));
    }

    #[test]
    fn test_pagination_requires_separator_and_digits() {
        assert!(!is_pagination_link("https://example.com/blog/page2/"));
        assert!(!is_pagination_link("https://example.com/blog/page/"));
        assert!(!is_pagination_link("https://example.com/blog/page/two"));
        assert!(!is_pagination_link("https://example.com/page/2/comments"));
    }

    #[test]
    fn test_pagination_ignores_query() {
        assert!(is_pagination_link("https://example.com/news/page/3?sort=new"));
    }

    #[test]
    fn test_fragment_detection() {
        assert!(has_fragment("https://example.com/about#team"));
        assert!(has_fragment("https://example.com/#"));
        assert!(!has_fragment("https://example.com/about"));
    }

    #[test]
    fn test_path_of_unparseable_input() {
        assert_eq!(path_of("/relative/path.pdf?x=1"), "/relative/path.pdf");
    }
}
