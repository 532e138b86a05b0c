//! Feature name constants for the wallet standard.
//!
//! Centralized registry for all feature identifiers wallets advertise.
//! Use [`Feature`] variants for type-safe capability checks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Chain-agnostic features
pub mod standard {
    pub const CONNECT: &str = "standard:connect";
    pub const DISCONNECT: &str = "standard:disconnect";
    pub const EVENTS: &str = "standard:events";

    /// Features every usable wallet must declare
    pub const REQUIRED: &[&str] = &[CONNECT, EVENTS];
}

/// Sui features
pub mod sui {
    pub const SIGN_TRANSACTION: &str = "sui:signTransaction";
    pub const SIGN_TRANSACTION_BLOCK: &str = "sui:signTransactionBlock";
    pub const SIGN_PERSONAL_MESSAGE: &str = "sui:signPersonalMessage";
    pub const SIGN_MESSAGE: &str = "sui:signMessage";
    pub const REPORT_TRANSACTION_EFFECTS: &str = "sui:reportTransactionEffects";
}

/// A capability tag a wallet declares at discovery time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Connect,
    Disconnect,
    Events,
    SignTransaction,
    /// Legacy name of [`Feature::SignTransaction`]
    SignTransactionBlock,
    SignPersonalMessage,
    /// Legacy name of [`Feature::SignPersonalMessage`]
    SignMessage,
    ReportTransactionEffects,
    Other(String),
}

impl Feature {
    pub fn as_str(&self) -> &str {
        match self {
            Feature::Connect => standard::CONNECT,
            Feature::Disconnect => standard::DISCONNECT,
            Feature::Events => standard::EVENTS,
            Feature::SignTransaction => sui::SIGN_TRANSACTION,
            Feature::SignTransactionBlock => sui::SIGN_TRANSACTION_BLOCK,
            Feature::SignPersonalMessage => sui::SIGN_PERSONAL_MESSAGE,
            Feature::SignMessage => sui::SIGN_MESSAGE,
            Feature::ReportTransactionEffects => sui::REPORT_TRANSACTION_EFFECTS,
            Feature::Other(name) => name,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            standard::CONNECT => Feature::Connect,
            standard::DISCONNECT => Feature::Disconnect,
            standard::EVENTS => Feature::Events,
            sui::SIGN_TRANSACTION => Feature::SignTransaction,
            sui::SIGN_TRANSACTION_BLOCK => Feature::SignTransactionBlock,
            sui::SIGN_PERSONAL_MESSAGE => Feature::SignPersonalMessage,
            sui::SIGN_MESSAGE => Feature::SignMessage,
            sui::REPORT_TRANSACTION_EFFECTS => Feature::ReportTransactionEffects,
            other => Feature::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Feature {
    fn from(value: &str) -> Self { Feature::parse(value) }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Feature::parse(&name))
    }
}

/// The set of features a wallet declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, feature: Feature) -> Self {
        self.0.insert(feature);
        self
    }

    pub fn insert(&mut self, feature: Feature) -> bool { self.0.insert(feature) }

    pub fn contains(&self, feature: &Feature) -> bool { self.0.contains(feature) }

    pub fn contains_all<'a>(&self, features: impl IntoIterator<Item = &'a Feature>) -> bool {
        features.into_iter().all(|f| self.0.contains(f))
    }

    pub fn contains_any<'a>(&self, features: impl IntoIterator<Item = &'a Feature>) -> bool {
        features.into_iter().any(|f| self.0.contains(f))
    }

    /// Required set: `standard:connect` and `standard:events`.
    pub fn has_required(&self) -> bool {
        standard::REQUIRED.iter().all(|name| self.0.contains(&Feature::parse(name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> { self.0.iter() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

impl<'a> FromIterator<&'a str> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(Feature::parse).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_known_and_unknown_names() {
        assert_eq!(Feature::parse("sui:signMessage"), Feature::SignMessage);
        assert_eq!(Feature::parse("acme:teleport"), Feature::Other("acme:teleport".into()));
        assert_eq!(Feature::ReportTransactionEffects.as_str(), "sui:reportTransactionEffects");
    }

    #[test]
    fn required_set_needs_connect_and_events() {
        let partial: FeatureSet = ["standard:connect", "sui:signTransaction"].into_iter().collect();
        assert!(!partial.has_required());
        let full = partial.with(Feature::Events);
        assert!(full.has_required());
    }

    #[test]
    fn serializes_as_plain_names() {
        let set: FeatureSet = ["standard:events", "standard:connect"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["standard:connect","standard:events"]"#);
        let back: FeatureSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
