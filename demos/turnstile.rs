//! Turnstile State Machine
//!
//! This example demonstrates the classic coin-operated turnstile.
//!
//! Key concepts:
//! - Declaring the table with the `transitions!` macro
//! - Listening to state changes and unplanned transitions
//! - Strict versus lenient event processing
//! - Exporting the event history as JSON
//!
//! Run with: RUST_LOG=debug cargo run --example turnstile

use fsmkit::{transitions, Event, FsmBuilder, FsmListener, HistoryRecorder, State};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Display;

impl FsmListener for Display {
    fn state_changed(&self, from: &State, event: &Event, to: &State) {
        println!("  {from} --{event}--> {to}");
    }

    fn state_loop(&self, state: &State, event: &Event) {
        println!("  {state} --{event}--> (stays)");
    }

    fn unplanned_transition(&self, from: &State, event: &Event) {
        println!("  {from} ignores {event}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile State Machine ===\n");

    let locked = State::new("Locked");
    let unlocked = State::new("Unlocked");
    let coin = Event::new("Coin");
    let push = Event::new("Push");

    let mut builder = FsmBuilder::new();
    transitions!(builder, {
        locked + coin => unlocked,
        unlocked + coin => unlocked,
        unlocked + push => locked,
    })?;

    let recorder = Arc::new(HistoryRecorder::new());
    builder.listener(Arc::new(Display)).listener(recorder.clone());
    let turnstile = builder.create_fsm(&locked)?;

    println!("Initial state: {}", turnstile.state());
    println!("Can push? {}\n", turnstile.has_transition(&push));

    println!("Strict processing:");
    turnstile.process_event(&coin)?;
    turnstile.process_event(&coin)?;
    turnstile.process_event(&push)?;
    if let Err(rejected) = turnstile.process_event(&push) {
        println!("  error: {rejected}");
    }

    println!("\nLenient processing:");
    turnstile.process_event_ignoring_errors(&push);
    turnstile.process_event_ignoring_errors(&coin);

    println!("\nFinal state: {}", turnstile.state());
    println!("History: {}", recorder.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
