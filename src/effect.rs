use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{FuturesUnordered, StreamExt};

pub type BoxFuture<A> = Pin<Box<dyn Future<Output = A> + Send + 'static>>;

/// What a reducer wants to happen after it mutated its state.
pub enum Effect<A> {
    Nothing,
    /// Reduce another action right away
    Action(A),
    /// Run a future, its output is reduced once it resolves
    Future(BoxFuture<A>),
    Merge(Vec<Effect<A>>),
}

impl<A> std::fmt::Debug for Effect<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Nothing => f.write_str("Nothing"),
            Effect::Action(a) => f.debug_tuple("Action").field(a).finish(),
            Effect::Future(_) => f.write_str("Future"),
            Effect::Merge(effects) => f.debug_tuple("Merge").field(effects).finish(),
        }
    }
}

impl<A: Send + 'static> Effect<A> {
    pub const NONE: Self = Effect::Nothing;

    pub fn action(action: A) -> Self {
        Effect::Action(action)
    }

    pub fn future<T, F>(future: F, mapper: impl FnOnce(T) -> A + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Effect::Future(Box::pin(async move {
            let output = future.await;
            mapper(output)
        }))
    }

    pub fn merge2(a: Self, b: Self) -> Self {
        Effect::Merge(vec![a, b])
    }

    /// Lift the actions of a child reducer into the parent action type
    pub fn map<B: Send + 'static>(self, f: impl Fn(A) -> B + Clone + Send + 'static) -> Effect<B> {
        match self {
            Effect::Nothing => Effect::Nothing,
            Effect::Action(a) => Effect::Action(f(a)),
            Effect::Future(fut) => Effect::Future(Box::pin(async move {
                let action = fut.await;
                f(action)
            })),
            Effect::Merge(effects) => {
                Effect::Merge(effects.into_iter().map(|e| e.map(f.clone())).collect())
            }
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Effect::Nothing => true,
            Effect::Merge(effects) => effects.iter().all(Effect::is_none),
            _ => false,
        }
    }

    /// Split into the actions to reduce right away and the futures to await
    pub fn flatten(self, actions: &mut Vec<A>, futures: &mut FuturesUnordered<BoxFuture<A>>) {
        match self {
            Effect::Nothing => {}
            Effect::Action(a) => actions.push(a),
            Effect::Future(fut) => futures.push(fut),
            Effect::Merge(effects) => {
                for effect in effects {
                    effect.flatten(actions, futures);
                }
            }
        }
    }

    /// Run every future of this effect to completion, yielding the resolved
    /// actions in the order they finish. Immediate actions come first.
    pub async fn resolve(self) -> Vec<A> {
        let mut actions = Vec::new();
        let mut futures = FuturesUnordered::new();
        self.flatten(&mut actions, &mut futures);
        while let Some(action) = futures.next().await {
            actions.push(action);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_everything() {
        let effect: Effect<u32> = Effect::merge2(
            Effect::action(1),
            Effect::Merge(vec![
                Effect::future(async { "22" }, |s: &str| s.len() as u32),
                Effect::NONE,
            ]),
        );
        assert!(!effect.is_none());
        let resolved = effect.resolve().await;
        assert_eq!(resolved, vec![1, 2]);
    }

    #[tokio::test]
    async fn maps_into_parent_actions() {
        let effect: Effect<u32> = Effect::future(async { 20 }, |n| n + 1);
        let mapped = effect.map(|n| format!("#{n}"));
        assert_eq!(mapped.resolve().await, vec!["#21".to_string()]);
    }

    #[tokio::test]
    async fn maps_with_send_only_closures() {
        // `Cell` is `Send` but not `Sync`
        let offset = std::cell::Cell::new(5u32);
        let effect: Effect<u32> = Effect::merge2(
            Effect::future(async { 1 }, |n: u32| n),
            Effect::action(2),
        );
        let mapped = effect.map(move |n| n + offset.get());
        let handle = tokio::spawn(mapped.resolve());
        let mut resolved = handle.await.unwrap();
        resolved.sort();
        assert_eq!(resolved, vec![6, 7]);
    }

    #[test]
    fn nested_nothing_is_none() {
        let effect: Effect<u32> = Effect::Merge(vec![Effect::NONE, Effect::Merge(vec![])]);
        assert!(effect.is_none());
    }
}
