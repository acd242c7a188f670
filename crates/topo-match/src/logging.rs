//! Diagnostics for matching sessions
//!
//! Index builds and narrowing steps emit `debug` events under the
//! `topo_match` target; skipped values emit `trace` events.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,topo_match=info";

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_default(DEFAULT_FILTER)
}

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `topo_match=debug` to follow every rule).
pub fn init_with_default(
    default_filter: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatchProcessingEnv, MatchRule, RawMatchList};

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_narrowing_with_subscriber() {
        // A global subscriber can only be installed once per process
        let _ = init_with_default("topo_match=trace");

        let raw = RawMatchList::from_json_str(r#"[{"name": "A"}, {"name": ["B", {"x": "y"}]}]"#)
            .unwrap();
        let mut env = MatchProcessingEnv::new(&raw)
            .with_options(crate::MatchOptions::with_shape_policy(crate::ShapePolicy::Lenient));
        let query = crate::AttributeTree::try_from(serde_json::json!({"name": "A"})).unwrap();

        let outcome = env.run(&[MatchRule::new(["name"])], &query).unwrap();

        assert_eq!(outcome.unique().map(|id| id.index()), Some(0));
    }
}
