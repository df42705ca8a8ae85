//! Getting Started Example - Your First Actor
//!
//! Demonstrates the complete workflow: define a message, implement an
//! actor, register it with an `ActorSystem`, and drive it with `tell`
//! and `ask`.
//!
//! Run with: cargo run --example getting_started

use async_trait::async_trait;
use emberrt::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
enum CounterMessage {
    Increment,
    Decrement,
    GetValue(AskReplyHandle<i32>),
}

impl Message for CounterMessage {
    const MESSAGE_TYPE: &'static str = "counter";
}

struct CounterActor {
    value: i32,
}

#[async_trait]
impl Actor for CounterActor {
    type Message = CounterMessage;
    type Error = std::convert::Infallible;

    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        println!("counter actor starting at value {}", self.value);
        Ok(())
    }

    async fn receive(&mut self, message: Self::Message, _ctx: &mut ActorContext<Self::Message>) -> Result<ReceiveOutcome, Self::Error> {
        match message {
            CounterMessage::Increment => {
                self.value += 1;
                println!("counter incremented to: {}", self.value);
            }
            CounterMessage::Decrement => {
                self.value -= 1;
                println!("counter decremented to: {}", self.value);
            }
            CounterMessage::GetValue(reply) => {
                let _ = reply.reply(self.value);
            }
        }
        Ok(ReceiveOutcome::Handled)
    }

    async fn post_stop(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        println!("counter actor stopped at value {}", self.value);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    println!("=== Getting Started Example ===\n");

    let system = ActorSystem::new(SystemConfig::default());
    system
        .register_prop::<CounterActor, _>(PropsRegistry::default_prop_id::<CounterActor>(), || CounterActor { value: 0 }, MailboxKind::default(), None)
        .unwrap();

    let path = ActorPath::root().child("counter");

    println!("1. Sending messages...");
    system.tell::<CounterActor>(path.clone(), CounterMessage::Increment).await.unwrap();
    system.tell::<CounterActor>(path.clone(), CounterMessage::Increment).await.unwrap();
    system.tell::<CounterActor>(path.clone(), CounterMessage::Decrement).await.unwrap();

    let value = system.ask::<CounterActor, i32>(path.clone(), CounterMessage::GetValue, Duration::from_secs(1)).await.unwrap();
    println!("\n2. Current value via ask: {value}");
    assert_eq!(value, 1);

    println!("\n3. Shutting down...");
    let clean = system.shutdown_await(Duration::from_secs(2)).await;
    println!("   clean shutdown: {clean}");

    println!("\n=== Example Complete ===");
}
