//! Safe filename generation utilities

use regex::Regex;

/// Convert a string to a safe filename by removing/replacing invalid characters
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    let whitespace = Regex::new(r"\s+").unwrap();
    let dashes = Regex::new(r"-+").unwrap();

    let mut safe = invalid_chars.replace_all(name, "-").to_string();
    safe = whitespace.replace_all(&safe, "-").to_string();
    safe = dashes.replace_all(&safe, "-").to_string();
    safe = safe.trim_matches('-').to_string();

    // Limit length
    if safe.len() > 100 {
        safe.truncate(100);
    }

    safe
}

/// Build the on-disk filename for one thumbnail
pub fn thumbnail_filename(video_id: &str, tier_key: &str) -> String {
    format!("{}.jpg", sanitize_filename(&format!("{}_{}", video_id, tier_key)))
}
