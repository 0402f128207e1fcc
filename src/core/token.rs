//! Identity tokens for states and events.
//!
//! A token is an opaque identity with a label attached for diagnostics.
//! Two tokens are equal only when one was cloned from the other: creating
//! two states with the same label yields two distinct states.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
struct Token {
    id: Uuid,
    name: Arc<str>,
}

impl Token {
    fn mint(name: &str, fallback: &str) -> Self {
        let name = if name.is_empty() { fallback } else { name };
        Self {
            id: Uuid::new_v4(),
            name: Arc::from(name),
        }
    }

    fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

macro_rules! identity_token {
    ($(#[$meta:meta])* $name:ident, $fallback:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(Token);

        impl $name {
            /// Label used when an empty name is given.
            pub const FALLBACK_NAME: &'static str = $fallback;

            /// Mint a new identity carrying `name` as its label.
            ///
            /// Every call produces a distinct identity, even for equal labels.
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(Token::mint(name.as_ref(), $fallback))
            }

            /// The label given at creation.
            pub fn name(&self) -> &str {
                &self.0.name
            }

            /// The identity backing equality and hashing.
            pub fn id(&self) -> Uuid {
                self.0.id
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.name)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}#{})", $kind, self.0.name, self.0.short_id())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut token = serializer.serialize_struct($kind, 2)?;
                token.serialize_field("id", &self.0.id)?;
                token.serialize_field("name", &*self.0.name)?;
                token.end()
            }
        }
    };
}

identity_token!(
    /// A mode the machine can occupy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsmkit::State;
    ///
    /// let idle = State::new("Idle");
    /// let other_idle = State::new("Idle");
    ///
    /// assert_eq!(idle, idle.clone());
    /// assert_ne!(idle, other_idle);
    /// assert_eq!(idle.name(), other_idle.name());
    /// ```
    State,
    "generic_state_name",
    "State"
);

identity_token!(
    /// Something that happened, fed into the machine.
    ///
    /// Events follow the same identity rules as [`State`].
    Event,
    "generic_event_name",
    "Event"
);
