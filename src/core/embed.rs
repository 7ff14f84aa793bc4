//! Embeddable fragments for post bodies.
//!
//! Two video hosts are recognized:
//!
//! - YouTube: `https://www.youtube.com/watch?v=<id>` or `https://youtu.be/<id>`
//!   → `https://www.youtube.com/embed/<id>`
//! - Vimeo: `https://vimeo.com/<id>` → `https://player.vimeo.com/video/<id>`

use reqwest::Url;

/// Normalize a video page URL into its embeddable player URL.
/// Returns `None` for unsupported hosts or links without a video id.
pub fn embed_url(link: &str) -> Option<String> {
    let link = link.trim();
    if link.contains("youtu.be/") {
        let url = Url::parse(link).ok()?;
        if url.host_str() != Some("youtu.be") {
            return None;
        }
        let video_id = url.path_segments()?.next().filter(|id| !id.is_empty())?;
        return Some(format!("https://www.youtube.com/embed/{video_id}"));
    }

    if link.contains("youtube.com") {
        let url = Url::parse(link).ok()?;
        let video_id = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())?;
        return Some(format!("https://www.youtube.com/embed/{video_id}"));
    }

    if link.contains("vimeo.com") {
        let last = link.rsplit('/').next().unwrap_or("");
        let video_id = last.split('&').next().unwrap_or("");
        if video_id.is_empty() {
            return None;
        }
        return Some(format!("https://player.vimeo.com/video/{video_id}"));
    }

    None
}

/// `<iframe>` markup for an embed URL, on its own line.
pub fn video_fragment(embed_url: &str) -> String {
    format!("\n<iframe src=\"{embed_url}\" frameborder=\"0\" allowfullscreen></iframe>")
}

/// Download button markup for an arbitrary file URL, on its own line.
pub fn file_link_fragment(file_url: &str) -> String {
    format!(
        "\n<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" \
         style=\"background-color: blue; color: white; padding: 16px 32px; \
         text-decoration: none; display: inline-block; border-radius: 4px;\">Download File</a>",
        file_url.trim()
    )
}
