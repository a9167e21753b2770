//! Typed identifiers for backend records.
//!
//! Automation and payment ids are minted by the backend and only ever parsed.
//! Conversation ids are minted client-side when a sales chat starts, using the
//! `tiny_id` crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{LazyLock, Mutex, PoisonError};
use tiny_id::ShortCodeGenerator;

const CONVERSATION_ID_LENGTH: usize = 12;

// Alphanumeric minus the characters people misread when reading an id aloud.
static CONVERSATION_ID_GENERATOR: LazyLock<Mutex<ShortCodeGenerator<char>>> =
    LazyLock::new(|| {
        let alphabet: Vec<char> = "123456789ABCDEFGHJKMNPQRSTUVWXYZabcdefghkmnpqrstuvwxyz"
            .chars()
            .collect();
        Mutex::new(ShortCodeGenerator::with_alphabet(
            alphabet,
            CONVERSATION_ID_LENGTH,
        ))
    });

/// A string id tagged with the kind of record it names, so an automation id
/// cannot be passed where a payment id is expected.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_string(value))
    }
}

impl<T> Id<T> {
    /// # Example
    /// ```
    /// use lobby::id::AutomationId;
    ///
    /// let id = AutomationId::from_string("lead-capture".to_string());
    /// assert_eq!(id.as_str(), "lead-capture");
    /// ```
    pub fn from_string(value: String) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_string(value.to_string())
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AutomationMarker;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentMarker;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationMarker;

pub type AutomationId = Id<AutomationMarker>;

pub type PaymentId = Id<PaymentMarker>;

pub type ConversationId = Id<ConversationMarker>;

impl ConversationId {
    /// Generates a fresh id for a new sales conversation.
    ///
    /// # Example
    /// ```
    /// use lobby::id::ConversationId;
    ///
    /// let id = ConversationId::new();
    /// assert_eq!(id.as_str().len(), 12);
    /// ```
    pub fn new() -> Self {
        let mut generator = CONVERSATION_ID_GENERATOR
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Self::from_string(generator.next_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}
