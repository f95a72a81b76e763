use serde::{Deserialize, Serialize};
use url::Url;

const PLAYLIST_BASE_URL: &str = "https://youtube.com/playlist?list=";

/// A video on a YouTube playlist. `id` identifies the membership itself
/// and is what has to be given when removing the video again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: String,
    pub video_id: String,
}

/// One page of playlist members
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("{}{}", PLAYLIST_BASE_URL, playlist_id)
}

/// Finds the YouTube video id of a submitted song.
///
/// Understands the long form `https://www.youtube.com/watch?v=<id>&...`
/// and the short form `https://youtu.be/<id>`. Anything else, like a
/// Spotify link or free text, has no video id.
pub fn extract_video_id(song: &str) -> Option<String> {
    let song = song.trim();
    let url = match Url::parse(song) {
        Ok(url) => url,
        Err(_) if song.contains("youtu") => Url::parse(&format!("https://{}", song)).ok()?,
        Err(_) => return None,
    };
    let host = url.host_str()?.to_lowercase();

    let id = if host == "youtu.be" {
        url.path_segments()?.next().map(|s| s.to_string())
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_long_form_ids() {
        let cases = vec![
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s", "dQw4w9WgXcQ"),
            ("https://youtube.com/watch?feature=share&v=abc123", "abc123"),
            ("https://music.youtube.com/watch?v=xyz&list=RDAMVM", "xyz"),
            ("www.youtube.com/watch?v=noscheme", "noscheme"),
        ];
        for (song, expected) in cases {
            assert_eq!(extract_video_id(song).as_deref(), Some(expected), "song: {}", song);
        }
    }

    #[test]
    fn extracts_short_form_ids() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=tracking").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("youtu.be/shortnoscheme").as_deref(),
            Some("shortnoscheme")
        );
    }

    #[test]
    fn ignores_songs_without_video_ids() {
        for song in &[
            "Never Gonna Give You Up - Rick Astley",
            "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT",
            "https://www.youtube.com/channel/UC38IQsAvIsxxjztdMZQtwHA",
            "https://youtu.be/",
            "https://www.youtube.com/watch?v=",
            "https://notyoutube.com/watch?v=abc",
        ] {
            assert_eq!(extract_video_id(song), None, "song: {}", song);
        }
    }

    #[test]
    fn builds_playlist_url() {
        assert_eq!(
            playlist_url("PL123"),
            "https://youtube.com/playlist?list=PL123"
        );
    }
}
