//! Core vocabulary shared by every component: feature names, chains, subscriptions.

pub(crate) mod busy;
pub mod chain;
pub mod features;
pub mod subscription;

pub use chain::{chain_family, format_chain, in_chain_family, DEFAULT_CHAIN_FAMILY};
pub use features::{Feature, FeatureSet};
pub use subscription::Subscription;
