// Characters other than ASCII letters and digits that may appear in a URL.
// Same set PHP's FILTER_SANITIZE_URL keeps.
const URL_PUNCTUATION: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || URL_PUNCTUATION.contains(c)
}

/// Removes every character that may not appear in a URL.
pub fn sanitize_url(uri: &str) -> String {
    uri.chars().filter(|c| is_url_char(*c)).collect()
}

/// Joins `base_path` and `path` and normalizes the slashes of the result.
///
/// Runs of `/` collapse to a single `/`, trailing slashes are stripped, and
/// an empty result becomes the root path `/`.
pub fn clean_request(base_path: &str, path: &str) -> String {
    let mut cleaned = String::with_capacity(base_path.len() + path.len());

    for c in base_path.chars().chain(path.chars()) {
        if c == '/' && cleaned.ends_with('/') {
            continue;
        }
        cleaned.push(c);
    }

    if cleaned.is_empty() || cleaned == "/" {
        return "/".to_string();
    }

    if cleaned.ends_with('/') {
        cleaned.truncate(cleaned.trim_end_matches('/').len());
    }

    cleaned
}
