use promptbot_infra::BotContext;

/// Optional collaborators a `UseCase` may need. Each one is only present
/// on the `BotContext` when it was configured and reachable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Store,
    Playlists,
    Notifier,
}

impl Dependency {
    pub fn is_available(&self, ctx: &BotContext) -> bool {
        match self {
            Self::Store => ctx.repos.is_some(),
            Self::Playlists => ctx.playlists.is_some(),
            Self::Notifier => ctx.notifier.is_some(),
        }
    }
}

/// The first of `dependencies` that is missing on the context, if any
pub fn find_unavailable(dependencies: &[Dependency], ctx: &BotContext) -> Option<Dependency> {
    dependencies
        .iter()
        .find(|dependency| !dependency.is_available(ctx))
        .copied()
}
