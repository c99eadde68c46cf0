use url::Url;

/// Extracts the path of a stored social profile link, without surrounding
/// slashes: `www.linkedin.com/in/jane` gives `in/jane`.
///
/// Returns an empty string when the link is blank or cannot be parsed.
pub fn social_link_path(link: &str) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }

    let parsed = if link.contains("://") {
        Url::parse(link)
    } else {
        Url::parse(&format!("https://{link}"))
    };

    match parsed {
        Ok(url) => url.path().trim_matches('/').to_string(),
        Err(e) => {
            tracing::debug!("Ignoring unparsable social link {:?}: {}", link, e);
            String::new()
        }
    }
}
