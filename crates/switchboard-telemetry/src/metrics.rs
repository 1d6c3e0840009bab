//! Metric name constants and recording helpers
//!
//! Instruments come from the global meter, so recording is a no-op until
//! [`crate::init`] installs an exporting provider.

use opentelemetry::{KeyValue, global};
use switchboard_core::{Provider, Tier};

const METER_NAME: &str = "switchboard";

// Routing metric names
pub const ROUTING_DECISION_COUNT: &str = "switchboard.routing.decisions";
pub const ROUTING_CONFIDENCE: &str = "switchboard.routing.confidence";

// Ledger metric names
pub const LEDGER_COST: &str = "switchboard.ledger.cost";
pub const LEDGER_TOKEN_USAGE: &str = "switchboard.ledger.token.usage";

/// Count a routing decision and record its confidence
pub fn record_routing_decision(tier: Tier, method: &str, confidence: f64) {
    let meter = global::meter(METER_NAME);
    let attributes = [
        KeyValue::new("tier", tier.to_string()),
        KeyValue::new("method", method.to_owned()),
    ];

    meter
        .u64_counter(ROUTING_DECISION_COUNT)
        .with_description("Routing decisions by tier and method")
        .build()
        .add(1, &attributes);
    meter
        .f64_histogram(ROUTING_CONFIDENCE)
        .with_description("Confidence of routing decisions")
        .build()
        .record(confidence, &attributes);
}

/// Record the cost and token usage of one tracked request
pub fn record_spend(tier: Tier, provider: Provider, cost: f64, input_tokens: u64, output_tokens: u64) {
    let meter = global::meter(METER_NAME);
    let attributes = [
        KeyValue::new("tier", tier.to_string()),
        KeyValue::new("provider", provider.to_string()),
    ];

    meter
        .f64_counter(LEDGER_COST)
        .with_unit("USD")
        .with_description("Accumulated request cost")
        .build()
        .add(cost, &attributes);

    let tokens = meter
        .u64_counter(LEDGER_TOKEN_USAGE)
        .with_unit("{token}")
        .with_description("Tokens accounted by the ledger")
        .build();
    for (direction, count) in [("input", input_tokens), ("output", output_tokens)] {
        let mut attrs = attributes.to_vec();
        attrs.push(KeyValue::new("direction", direction));
        tokens.add(count, &attrs);
    }
}
