use std::collections::HashMap;

/// Where provider API keys come from. Implementations are queried on every
/// request; nothing is cached between calls.
pub trait SecretSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    /// Like `get`, but blank values count as missing.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

/// Reads keys from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl SecretSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}
