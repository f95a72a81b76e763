use crate::shared::entity::{Entity, ID};

/// A song a member picked for one day of a `MusicMonth`.
///
/// There is at most one `Submission` per user, month and day. A new pick
/// for the same key replaces the old one by deleting it and inserting the
/// new `Submission`.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: ID,
    pub user_id: String,
    /// Label of the owning `MusicMonth`, e.g. "Jan 2024"
    pub month_label: String,
    pub day: i64,
    /// Usually a YouTube link, but any text is accepted
    pub song: String,
}

impl Submission {
    pub fn new(user_id: String, month_label: String, day: i64, song: String) -> Self {
        Self {
            id: Default::default(),
            user_id,
            month_label,
            day,
            song,
        }
    }
}

impl Entity for Submission {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Selects the `Submission`s of a month, optionally narrowed down to a
/// single user and/or a single day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionQuery {
    pub month_label: String,
    pub user_id: Option<String>,
    pub day: Option<i64>,
}

impl SubmissionQuery {
    pub fn month(month_label: String) -> Self {
        Self {
            month_label,
            user_id: None,
            day: None,
        }
    }

    pub fn for_user(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn on_day(mut self, day: i64) -> Self {
        self.day = Some(day);
        self
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        submission.month_label == self.month_label
            && self
                .user_id
                .as_ref()
                .map(|user_id| *user_id == submission.user_id)
                .unwrap_or(true)
            && self.day.map(|day| day == submission.day).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_narrows_down_by_user_and_day() {
        let submission = Submission::new("1".into(), "Jan 2024".into(), 3, "song".into());

        let month = SubmissionQuery::month("Jan 2024".into());
        assert!(month.matches(&submission));
        assert!(month.clone().for_user("1".into()).matches(&submission));
        assert!(!month.clone().for_user("2".into()).matches(&submission));
        assert!(month.clone().on_day(3).matches(&submission));
        assert!(!month.clone().on_day(4).matches(&submission));
        assert!(month.for_user("1".into()).on_day(3).matches(&submission));
        assert!(!SubmissionQuery::month("Feb 2024".into()).matches(&submission));
    }
}
