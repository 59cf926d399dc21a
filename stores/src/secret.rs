use async_trait::async_trait;
use common::error::Res;

/// Durable name/value storage for credentials.
///
/// Implementations MUST NOT log secret values.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Stores `value` under `name`, silently replacing any previous value.
    async fn set_secret(&self, name: &str, value: &str) -> Res<()>;

    /// Where the secrets live, for log lines.
    fn location(&self) -> &str;
}
