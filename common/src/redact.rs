/// Number of leading characters kept when a key is long enough to show any.
const VISIBLE_PREFIX: usize = 4;

/// Masks an API key for log output.
///
/// Keys longer than twice the visible prefix keep their first few characters
/// so log lines can still be correlated; shorter keys are hidden entirely.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= VISIBLE_PREFIX * 2 {
        return "***".to_string();
    }
    let prefix: String = key.chars().take(VISIBLE_PREFIX).collect();
    format!("{}***", prefix)
}
