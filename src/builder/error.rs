//! Build errors for transition tables and machines.

use crate::core::{Event, State};
use std::fmt;
use thiserror::Error;

/// The builder argument that was left absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Origin,
    Event,
    Destination,
    InitialState,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Origin => "origin state",
            Self::Event => "event",
            Self::Destination => "destination state",
            Self::InitialState => "initial state",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when building transition tables and machines.
///
/// These are programming errors in the table declaration and are always
/// reported to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid argument: the {argument} is required")]
    InvalidArgument { argument: Argument },

    #[error("A transition from state '{from}' reacting to event '{event}' already exists")]
    DuplicateTransition { from: State, event: Event },
}

impl BuildError {
    pub(crate) fn missing(argument: Argument) -> Self {
        Self::InvalidArgument { argument }
    }
}
