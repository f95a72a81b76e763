use chrono::{DateTime, TimeZone, Utc};
use promptbot_domain::{PlaylistBinding, PlaylistKey, Reminder, Submission, SubmissionQuery, ID};
use promptbot_infra::{
    BotContext, IPlaylistBindingRepo, IReminderRepo, ISubmissionRepo, ISys, InMemoryNotifier,
    InMemoryPlaylistProvider,
};
use std::sync::{Arc, Mutex};

pub struct StaticTimeSys(pub DateTime<Utc>);

impl ISys for StaticTimeSys {
    fn get_now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct TestContext {
    pub ctx: BotContext,
    pub playlists: Arc<InMemoryPlaylistProvider>,
    pub notifier: Arc<InMemoryNotifier>,
}

/// In-memory context where the time is always `now`
pub fn setup_at(now: DateTime<Utc>) -> TestContext {
    let playlists = Arc::new(InMemoryPlaylistProvider::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = BotContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.playlists = Some(playlists.clone());
    ctx.notifier = Some(notifier.clone());
    ctx.config.community_name = "Speedfriends".into();

    TestContext {
        ctx,
        playlists,
        notifier,
    }
}

/// Mid January 2024, while the music month starting on January 1 is running
pub fn mid_january() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    FindDueReminders,
    DeleteReminder,
    InsertBinding,
    DeleteSubmission,
}

/// Makes one kind of store call fail until told otherwise
#[derive(Default)]
pub struct StoreFailures(Mutex<Option<StoreCall>>);

impl StoreFailures {
    pub fn fail(&self, call: Option<StoreCall>) {
        *self.0.lock().unwrap() = call;
    }

    fn check(&self, call: StoreCall) -> anyhow::Result<()> {
        if *self.0.lock().unwrap() == Some(call) {
            anyhow::bail!("{:?} failed", call);
        }
        Ok(())
    }
}

struct FlakyReminderRepo {
    inner: Arc<dyn IReminderRepo>,
    failures: Arc<StoreFailures>,
}

#[async_trait::async_trait]
impl IReminderRepo for FlakyReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        self.failures.check(StoreCall::FindDueReminders)?;
        self.inner.find_due(before).await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        self.failures.check(StoreCall::DeleteReminder)?;
        self.inner.delete(reminder_id).await
    }
}

struct FlakySubmissionRepo {
    inner: Arc<dyn ISubmissionRepo>,
    failures: Arc<StoreFailures>,
}

#[async_trait::async_trait]
impl ISubmissionRepo for FlakySubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        self.inner.insert(submission).await
    }

    async fn find_by_query(&self, query: &SubmissionQuery) -> anyhow::Result<Vec<Submission>> {
        self.inner.find_by_query(query).await
    }

    async fn delete(&self, submission_id: &ID) -> anyhow::Result<()> {
        self.failures.check(StoreCall::DeleteSubmission)?;
        self.inner.delete(submission_id).await
    }
}

struct FlakyBindingRepo {
    inner: Arc<dyn IPlaylistBindingRepo>,
    failures: Arc<StoreFailures>,
}

#[async_trait::async_trait]
impl IPlaylistBindingRepo for FlakyBindingRepo {
    async fn insert(&self, binding: &PlaylistBinding) -> anyhow::Result<()> {
        self.failures.check(StoreCall::InsertBinding)?;
        self.inner.insert(binding).await
    }

    async fn find(&self, key: &PlaylistKey) -> anyhow::Result<Option<PlaylistBinding>> {
        self.inner.find(key).await
    }
}

/// Wraps the store of `ctx` so that single calls can be made to fail
pub fn with_flaky_store(ctx: &mut BotContext) -> Arc<StoreFailures> {
    let failures = Arc::new(StoreFailures::default());
    let repos = ctx.repos.as_mut().expect("context has a store");
    repos.reminders = Arc::new(FlakyReminderRepo {
        inner: repos.reminders.clone(),
        failures: failures.clone(),
    });
    repos.submissions = Arc::new(FlakySubmissionRepo {
        inner: repos.submissions.clone(),
        failures: failures.clone(),
    });
    repos.playlist_bindings = Arc::new(FlakyBindingRepo {
        inner: repos.playlist_bindings.clone(),
        failures: failures.clone(),
    });
    failures
}
