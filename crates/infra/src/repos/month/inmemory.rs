use super::IMonthRepo;
use crate::repos::shared::inmemory_repo::*;
use promptbot_domain::{MonthQuery, MusicMonth};
use std::cmp::Reverse;

pub struct InMemoryMonthRepo {
    months: std::sync::Mutex<Vec<MusicMonth>>,
}

impl InMemoryMonthRepo {
    pub fn new() -> Self {
        Self {
            months: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMonthRepo for InMemoryMonthRepo {
    async fn insert(&self, month: &MusicMonth) -> anyhow::Result<()> {
        insert(month, &self.months);
        Ok(())
    }

    async fn find_one(&self, query: &MonthQuery) -> anyhow::Result<Option<MusicMonth>> {
        let month = if query.ascending() {
            find_first_by(&self.months, |m| query.matches(m), |m| m.start_time)
        } else {
            find_first_by(&self.months, |m| query.matches(m), |m| Reverse(m.start_time))
        };
        Ok(month)
    }
}
