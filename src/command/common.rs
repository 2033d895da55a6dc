//! Common utilities shared across commands.

/// Sort and deduplicate user-supplied issue keys so each issue is
/// processed once, in a stable order.
pub fn normalize_issue_keys(issues: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = issues.to_vec();
    keys.sort();
    keys.dedup();
    keys
}
