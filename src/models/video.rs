// src/models/video.rs

use serde::{Deserialize, Serialize};
use url::Url;

const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";

/// A study video from the lecture playlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub title: String,

    /// YouTube video id.
    #[serde(rename = "videoId")]
    pub video_id: String,

    pub thumbnail: String,
    pub duration: String,

    #[serde(rename = "playlistId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}

impl Video {
    /// Public watch page for this video.
    pub fn watch_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse_with_params(WATCH_BASE_URL, &[("v", self.video_id.as_str())])?;
        if let Some(list) = &self.playlist_id {
            url.query_pairs_mut().append_pair("list", list);
        }
        Ok(url)
    }
}

/// A video paired with its resolved watch URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLink {
    #[serde(flatten)]
    pub video: Video,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_url: Option<String>,
}

impl From<Video> for VideoLink {
    fn from(video: Video) -> Self {
        let watch_url = video.watch_url().ok().map(String::from);
        Self { video, watch_url }
    }
}
