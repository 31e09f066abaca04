//! Key expressions for utilization topics.
//!
//! Reports are published under:
//!
//! ```text
//! [<vhost>/]utilization/<topic>
//! ```
//!
//! where the leading segment is present only for virtual hosts other than
//! the root vhost `/`. The final segment is the routing key the watcher
//! groups its summaries by.

/// Namespace segment carried by every utilization key.
pub const EXCHANGE: &str = "utilization";

/// Build the key expression for a topic within a virtual host.
pub fn utilization_key(vhost: &str, topic: &str) -> String {
    let ns = vhost_namespace(vhost);
    if ns.is_empty() {
        format!("{}/{}", EXCHANGE, topic)
    } else {
        format!("{}/{}/{}", ns, EXCHANGE, topic)
    }
}

/// Convert a virtual host name into a key-expression namespace segment.
///
/// The root vhost `/` maps to no segment. Characters that are not legal in
/// a single key segment collapse to underscores.
pub fn vhost_namespace(vhost: &str) -> String {
    let mut result = String::with_capacity(vhost.len());
    for c in vhost.chars() {
        match c {
            '/' | ' ' | '#' | '?' | '*' => {
                if !result.ends_with('_') && !result.is_empty() {
                    result.push('_');
                }
            }
            _ => result.push(c),
        }
    }
    result.trim_matches('_').to_string()
}
