//! The build process's lifecycle: named signals that plugins connect hooks to

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::settings::Settings;

/// A point in the build at which connected hooks are invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The settings have been loaded; no content has been processed yet.
    Initialized,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => f.write_str("initialized"),
        }
    }
}

/// A callback that a plugin connects to a [Signal]. Hooks can't fail: they must deal with their
/// own errors, so that a misbehaving plugin never stops the build.
#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait Hook: Send + Sync {
    /// The hook's name (for human consumption, e.g. in logs)
    fn name(&self) -> &str;

    /// Runs the hook for the given signal.
    async fn call(&self, signal: Signal, settings: &Settings);
}

/// A dynamically dispatched, boxed hook
pub type BoxedHook = Box<dyn Hook>;

/// The hooks connected to each signal, in the order they were connected
#[derive(Default)]
pub struct Lifecycle {
    hooks: HashMap<Signal, Vec<BoxedHook>>,
}

impl Lifecycle {
    /// Creates a lifecycle without any hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a hook to a signal. A hook connected to several signals is given the signal it
    /// is called for.
    pub fn connect<H>(&mut self, signal: Signal, hook: H)
    where
        H: Hook + 'static,
    {
        self.hooks.entry(signal).or_default().push(Box::new(hook));
    }

    /// Returns the names of the hooks connected to `signal`.
    pub fn hook_names(&self, signal: Signal) -> Vec<&str> {
        self.connected(signal).iter().map(|hook| hook.name()).collect()
    }

    /// Sends a signal: calls each hook connected to it, one at a time. Returns the number of
    /// hooks that were called.
    pub async fn send(&self, signal: Signal, settings: &Settings) -> usize {
        let hooks = self.connected(signal);
        for hook in hooks {
            tracing::debug!(hook = hook.name(), %signal, "calling hook");
            hook.call(signal, settings).await;
        }
        hooks.len()
    }

    fn connected(&self, signal: Signal) -> &[BoxedHook] {
        self.hooks.get(&signal).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (signal, hooks) in &self.hooks {
            let names: Vec<_> = hooks.iter().map(|hook| hook.name()).collect();
            map.entry(signal, &names);
        }
        map.finish()
    }
}
