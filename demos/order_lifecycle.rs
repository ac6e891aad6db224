//! E-commerce Order Lifecycle
//!
//! This example demonstrates an order workflow driven by external events.
//!
//! Key concepts:
//! - Order states (Created -> Paid -> Shipped -> Delivered)
//! - Guarded payment acceptance and a final delivered state
//! - Internal actions for notes that change no state
//! - Listener-based audit trail from per-fire debug info
//!
//! Run with: cargo run --example order_lifecycle

use statecraft::builder::{StateConfig, StateMachineBuilder};
use statecraft::core::{Action, Guard};
use statecraft::{event_enum, state_enum};

state_enum! {
    enum OrderState {
        Created,
        Paid,
        Shipped,
        Delivered,
        Cancelled,
    }
}

event_enum! {
    enum OrderEvent {
        Pay,
        Ship,
        Deliver,
        Cancel,
        Annotate,
    }
}

struct Order {
    id: u64,
    total: f64,
    notes: Vec<String>,
}

fn main() {
    let machine = StateMachineBuilder::<OrderState, OrderEvent, Order>::new()
        .initial(OrderState::Created)
        .state(
            StateConfig::new(OrderState::Created)
                .permit_if(
                    OrderEvent::Pay,
                    OrderState::Paid,
                    Guard::new(|_, order: &Order| order.total > 0.0),
                )
                .permit(OrderEvent::Cancel, OrderState::Cancelled)
                .internal(
                    OrderEvent::Annotate,
                    Action::infallible(|_, _, _, order: &mut Order| {
                        order.notes.push("annotated while created".into());
                    }),
                ),
        )
        .state(
            StateConfig::new(OrderState::Paid)
                .permit(OrderEvent::Ship, OrderState::Shipped)
                .on_entry(Action::infallible(|_, _, _, order: &mut Order| {
                    order.notes.push("payment captured".into());
                })),
        )
        .state(
            StateConfig::new(OrderState::Shipped)
                .permit(OrderEvent::Deliver, OrderState::Delivered),
        )
        .state(StateConfig::new(OrderState::Delivered).final_state())
        .state(StateConfig::new(OrderState::Cancelled).final_state())
        .listener(|info: &statecraft::DebugInfo<OrderState, OrderEvent>| {
            println!(
                "  [audit] {:?} / {:?} -> {} at {}",
                info.state, info.event, info.reason, info.timestamp
            );
        })
        .build()
        .expect("order machine builds");

    let report = machine.validate();
    println!("machine valid: {}", report.is_valid());

    let mut order = Order {
        id: 42,
        total: 129.90,
        notes: Vec::new(),
    };

    let mut state = OrderState::Created;
    println!("order {} starts in {state:?}", order.id);

    for event in [
        OrderEvent::Annotate,
        OrderEvent::Pay,
        OrderEvent::Ship,
        OrderEvent::Deliver,
    ] {
        state = machine
            .fire(&state, &event, &mut order)
            .expect("no action fails in this demo");
        println!("after {event:?}: {state:?}");
    }

    // firing against a final state fails by design, without moving
    let result = machine
        .fire_with_result(&state, &OrderEvent::Ship, &mut order)
        .expect("resolution failures are results, not errors");
    println!(
        "late ship attempt: transitioned={} reason={}",
        result.transitioned, result.reason
    );

    println!("order notes: {:?}", order.notes);
}
