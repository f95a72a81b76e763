use super::ISubmissionRepo;
use crate::repos::shared::inmemory_repo::*;
use promptbot_domain::{Submission, SubmissionQuery, ID};

pub struct InMemorySubmissionRepo {
    submissions: std::sync::Mutex<Vec<Submission>>,
}

impl InMemorySubmissionRepo {
    pub fn new() -> Self {
        Self {
            submissions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubmissionRepo for InMemorySubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        insert(submission, &self.submissions);
        Ok(())
    }

    async fn find_by_query(&self, query: &SubmissionQuery) -> anyhow::Result<Vec<Submission>> {
        Ok(find_by(&self.submissions, |s| query.matches(s)))
    }

    async fn delete(&self, submission_id: &ID) -> anyhow::Result<()> {
        delete(submission_id, &self.submissions);
        Ok(())
    }
}
