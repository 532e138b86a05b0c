//! Chain identifiers: `family:network` (e.g. `sui:mainnet`).

/// Family accounts are filtered to unless configured otherwise
pub const DEFAULT_CHAIN_FAMILY: &str = "sui";

/// Namespace before the first `:`; the whole id when there is none.
pub fn chain_family(chain: &str) -> &str {
    chain.split(':').next().unwrap_or(chain)
}

/// True when any of `chains` belongs to `family` (prefix match on the namespace).
pub fn in_chain_family<S: AsRef<str>>(chains: &[S], family: &str) -> bool {
    chains.iter().any(|c| chain_family(c.as_ref()) == family)
}

pub fn format_chain(family: &str, network: &str) -> String {
    format!("{}:{}", family, network)
}
