//! Transaction payloads and lazy serialization.

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;

use super::executor::ChainExecutor;
use crate::error::Result;

/// What a builder sees when asked for its serialized form.
#[derive(Clone)]
pub struct BuildContext {
    /// Intents negotiated with the connected wallet
    pub supported_intents: Vec<String>,
    /// Executor of the active network, for object and gas resolution
    pub executor: Rc<dyn ChainExecutor>,
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext").field("supported_intents", &self.supported_intents).finish_non_exhaustive()
    }
}

/// A transaction that still has to be built.
#[async_trait(?Send)]
pub trait TransactionBuilder {
    async fn to_json(&self, ctx: &BuildContext) -> Result<String>;
}

#[derive(Clone)]
pub enum TransactionPayload {
    /// Already serialized; passed through untouched
    Serialized(String),
    Builder(Rc<dyn TransactionBuilder>),
}

impl From<String> for TransactionPayload {
    fn from(s: String) -> Self { TransactionPayload::Serialized(s) }
}

impl From<&str> for TransactionPayload {
    fn from(s: &str) -> Self { TransactionPayload::Serialized(s.to_string()) }
}

impl From<Rc<dyn TransactionBuilder>> for TransactionPayload {
    fn from(b: Rc<dyn TransactionBuilder>) -> Self { TransactionPayload::Builder(b) }
}

impl fmt::Debug for TransactionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionPayload::Serialized(s) => f.debug_tuple("Serialized").field(&s.len()).finish(),
            TransactionPayload::Builder(_) => f.write_str("Builder"),
        }
    }
}

/// Payload handed to the wallet. Builders run only when the wallet calls
/// [`LazyTransaction::to_json`].
#[derive(Clone, Debug)]
pub struct LazyTransaction {
    payload: TransactionPayload,
    context: BuildContext,
}

impl LazyTransaction {
    pub fn new(payload: TransactionPayload, context: BuildContext) -> Self { Self { payload, context } }

    pub fn payload(&self) -> &TransactionPayload { &self.payload }

    pub async fn to_json(&self) -> Result<String> {
        match &self.payload {
            TransactionPayload::Serialized(s) => Ok(s.clone()),
            TransactionPayload::Builder(builder) => {
                tracing::debug!(intents = ?self.context.supported_intents, "serializing transaction");
                builder.to_json(&self.context).await
            }
        }
    }
}
