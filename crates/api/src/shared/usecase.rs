use super::auth::{Permission, Policy};
use crate::error::StewardError;
use futures::future::join_all;
use std::fmt::Debug;
use steward_infra::StewardContext;
use tracing::error;

/// Subscriber is a side effect to a `UseCase`
///
/// It is going to act upon the response of the execution
/// of the `UseCase` if the execution was a success.
#[async_trait::async_trait(?Send)]
pub trait Subscriber<U: UseCase> {
    async fn notify(&self, e: &U::Response, ctx: &StewardContext);
}

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response: Debug;
    type Error: Debug;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error>;

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        Default::default()
    }
}

/// Restrict what `Permission`s are needed for a `User`
/// to be able to execute the `UseCase`
pub trait PermissionBoundary: UseCase {
    fn permissions(&self) -> Vec<Permission>;
}

#[derive(Debug)]
pub enum UseCaseErrorContainer<T: Debug> {
    Unauthorized(String),
    UseCase(T),
}

#[tracing::instrument(name = "UseCase executed with policy", skip(usecase, policy, ctx), fields(usecase = %U::NAME))]
pub async fn execute_with_policy<U>(
    usecase: U,
    policy: &Policy,
    ctx: &StewardContext,
) -> Result<U::Response, UseCaseErrorContainer<U::Error>>
where
    U: PermissionBoundary,
{
    let required_permissions = usecase.permissions();
    if !policy.authorize(&required_permissions) {
        return Err(UseCaseErrorContainer::Unauthorized(format!(
            "Client is not permitted to perform some or all of these actions: {:?}",
            required_permissions
        )));
    }

    execute(usecase, ctx)
        .await
        .map_err(UseCaseErrorContainer::UseCase)
}

#[tracing::instrument(name = "UseCase executed", skip(usecase, ctx), fields(usecase = %U::NAME))]
pub async fn execute<U>(mut usecase: U, ctx: &StewardContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
{
    let res = usecase.execute(ctx).await;

    match &res {
        Ok(res) => {
            let subscribers = U::subscribers();
            let mut subscriber_promises = Vec::with_capacity(subscribers.len());
            for subscriber in &subscribers {
                subscriber_promises.push(subscriber.notify(res, ctx));
            }
            join_all(subscriber_promises).await;
        }
        Err(e) => {
            error!("Use case error: {:?}", e);
        }
    }

    res
}

impl<T: Debug + Into<StewardError>> From<UseCaseErrorContainer<T>> for StewardError {
    fn from(e: UseCaseErrorContainer<T>) -> Self {
        match e {
            UseCaseErrorContainer::Unauthorized(e) => Self::Forbidden(e),
            UseCaseErrorContainer::UseCase(e) => e.into(),
        }
    }
}
