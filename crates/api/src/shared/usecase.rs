use super::dependencies::{find_unavailable, Dependency};
use promptbot_infra::BotContext;
use std::fmt::Debug;
use tracing::{error, warn};

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Errors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors>;
}

/// Restrict which optional `Dependency`s have to be set up
/// for the `UseCase` to be executed
pub trait DependencyBoundary: UseCase {
    fn dependencies(&self) -> Vec<Dependency>;

    /// Name of the feature the `UseCase` belongs to, as told to users
    /// when it is not available, e.g. "reminders"
    fn feature(&self) -> &'static str;
}

#[derive(Debug)]
pub enum UseCaseErrorContainer<T: Debug> {
    /// The feature that could not be served
    Unavailable(String),
    UseCase(T),
}

#[tracing::instrument(name = "Executing usecase with dependencies", skip(usecase, ctx))]
pub async fn execute_with_dependencies<U>(
    usecase: U,
    ctx: &BotContext,
) -> Result<U::Response, UseCaseErrorContainer<U::Errors>>
where
    U: DependencyBoundary,
    U::Errors: Debug,
{
    if let Some(missing) = find_unavailable(&usecase.dependencies(), ctx) {
        warn!(
            "Rejected usecase: {:?} because {:?} is not available",
            usecase, missing
        );
        return Err(UseCaseErrorContainer::Unavailable(usecase.feature().to_string()));
    }

    execute(usecase, ctx)
        .await
        .map_err(UseCaseErrorContainer::UseCase)
}

#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &BotContext) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
