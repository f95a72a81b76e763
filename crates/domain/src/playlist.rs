use crate::providers::youtube::PlaylistItem;
use crate::submission::SubmissionQuery;
use std::collections::HashSet;

/// Identifies the playlist made for a set of submissions.
///
/// `day` is 0 when the playlist spans every day of the month and
/// `scope_user_id` is empty when it holds everyone's picks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistKey {
    pub month_label: String,
    pub day: i64,
    pub scope_user_id: String,
}

/// The external playlist that was created for a `PlaylistKey`.
/// The same playlist is reused every time the key is synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistBinding {
    pub key: PlaylistKey,
    pub playlist_id: String,
}

impl PlaylistKey {
    pub fn new(month_label: String, day: Option<i64>, user_id: Option<String>) -> Self {
        Self {
            month_label,
            day: day.unwrap_or(0),
            scope_user_id: user_id.unwrap_or_default(),
        }
    }

    pub fn day(&self) -> Option<i64> {
        if self.day == 0 {
            None
        } else {
            Some(self.day)
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        if self.scope_user_id.is_empty() {
            None
        } else {
            Some(&self.scope_user_id)
        }
    }

    /// The `Submission`s this playlist should contain
    pub fn submission_query(&self) -> SubmissionQuery {
        let mut query = SubmissionQuery::month(self.month_label.clone());
        if let Some(user_id) = self.user_id() {
            query = query.for_user(user_id.to_string());
        }
        if let Some(day) = self.day() {
            query = query.on_day(day);
        }
        query
    }

    /// e.g. "Jan 2024 Day 3"
    pub fn describe(&self) -> String {
        match self.day() {
            Some(day) => format!("{} Day {}", self.month_label, day),
            None => self.month_label.clone(),
        }
    }

    pub fn title(&self, community: &str) -> String {
        let title = format!("{} Music Month: {}", community, self.describe());
        match self.user_id() {
            Some(user_id) => format!("{} (picks of {})", title, user_id),
            None => title,
        }
    }

    pub fn description(&self, community: &str) -> String {
        let songs = match self.user_id() {
            Some(user_id) => format!("All the songs posted by {}", user_id),
            None => "All the songs posted".to_string(),
        };
        match self.day() {
            Some(day) => format!(
                "{} on day {} of {}'s music month in {}",
                songs, day, self.month_label, community
            ),
            None => format!(
                "{} during {}'s music month in {}",
                songs, self.month_label, community
            ),
        }
    }
}

/// The changes that make a playlist hold exactly the wanted videos.
///
/// Videos that are wanted but missing get inserted once. Members that are
/// not wanted, or that repeat a video already kept, get deleted.
/// Members that are already right are left alone, so planning against a
/// converged playlist yields an empty plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergencePlan {
    pub to_insert: Vec<String>,
    pub to_delete: Vec<PlaylistItem>,
}

impl ConvergencePlan {
    pub fn new(wanted_video_ids: &[String], current: &[PlaylistItem]) -> Self {
        let wanted: HashSet<&str> = wanted_video_ids.iter().map(|id| id.as_str()).collect();
        let present: HashSet<&str> = current.iter().map(|item| item.video_id.as_str()).collect();

        let mut to_insert = Vec::new();
        let mut planned = HashSet::new();
        for video_id in wanted_video_ids {
            if !present.contains(video_id.as_str()) && planned.insert(video_id.as_str()) {
                to_insert.push(video_id.clone());
            }
        }

        let mut to_delete = Vec::new();
        let mut kept = HashSet::new();
        for item in current {
            let video_id = item.video_id.as_str();
            if !wanted.contains(video_id) || !kept.insert(video_id) {
                to_delete.push(item.clone());
            }
        }

        Self {
            to_insert,
            to_delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}
