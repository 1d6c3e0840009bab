mod harness;

use harness::config::ConfigBuilder;
use harness::fixture::TestRouter;
use switchboard_config::Config;
use switchboard_core::{Message, Tier};
use switchboard_routing::{RoutingError, RoutingMethod, Selection};

fn router() -> TestRouter {
    TestRouter::start(&ConfigBuilder::new().build()).unwrap()
}

#[test]
fn simple_question_routes_to_cheapest_simple_model() {
    let decision = router().route("What is 2+2?").unwrap();

    assert_eq!(decision.tier, Tier::Simple);
    assert_eq!(decision.model.id, "gemini-1.5-flash-latest");
}

#[test]
fn proof_request_routes_to_reasoning_by_rules() {
    let decision = router()
        .route("Prove that the square root of 2 is irrational using proof by contradiction")
        .unwrap();

    assert_eq!(decision.tier, Tier::Reasoning);
    assert_eq!(decision.method, RoutingMethod::Rules);
    assert!((decision.confidence - 0.97).abs() < f64::EPSILON);
    assert_eq!(decision.model.id, "deepseek-reasoner");
    assert!(decision.scores.is_none());
}

#[test]
fn application_build_routes_to_complex() {
    let decision = router()
        .route("Build me a React todo application with TypeScript, state management, and API integration")
        .unwrap();

    assert_eq!(decision.tier, Tier::Complex);
    assert_eq!(decision.model.id, "gpt-4o");
}

#[test]
fn empty_conversation_is_invalid_input() {
    let err = router().router.route(&[], Tier::Medium).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidInput(_)));
}

#[test]
fn only_the_last_message_is_scored() {
    let fixture = router();
    let conversation = [
        Message::system("You are a theorem prover. Prove everything formally."),
        Message::user("Prove the lemma by contradiction"),
        Message::assistant("Done."),
        Message::user("What is 2+2?"),
    ];

    let decision = fixture.router.route(&conversation, Tier::Medium).unwrap();
    assert_eq!(decision.tier, Tier::Simple);
}

#[test]
fn ambiguous_prompt_uses_configured_default_tier() {
    let config = ConfigBuilder::new().with_default_tier(Tier::Complex).build();
    let fixture = TestRouter::start(&config).unwrap();

    // long enough to skip the short-prompt rule, with no keyword hits
    let prompt = "zz ".repeat(80);
    let decision = fixture.route(&prompt).unwrap();

    assert_eq!(decision.tier, Tier::Complex);
    assert_eq!(decision.method, RoutingMethod::Fallback);
    assert_eq!(decision.reasoning, "Ambiguous complexity - defaulting to COMPLEX tier");
}

#[test]
fn routing_is_deterministic() {
    let fixture = router();
    let prompt = "Design a distributed database architecture, then optimize latency";

    let first = fixture.route(prompt).unwrap();
    for _ in 0..10 {
        assert_eq!(fixture.route(prompt).unwrap(), first);
    }
}

#[test]
fn substituted_reasoning_markers_change_the_shortcut() {
    let config = ConfigBuilder::new()
        .with_reasoning_keywords(&["ponder", "deliberate"])
        .build();
    let fixture = TestRouter::start(&config).unwrap();

    let decision = fixture.route("Ponder this and deliberate").unwrap();
    assert_eq!(decision.method, RoutingMethod::Rules);

    let decision = fixture
        .route("Prove that the square root of 2 is irrational using proof by contradiction")
        .unwrap();
    assert_ne!(decision.method, RoutingMethod::Rules);
}

#[test]
fn catalog_override_from_toml() {
    let config = Config::from_toml(
        r#"
        [[catalog.models]]
        id = "tiny"
        display_name = "Tiny"
        provider = "groq"
        input_price_per_mtok = 0.01
        output_price_per_mtok = 0.02
        context_window = 8192
        tier = "SIMPLE"

        [[catalog.models]]
        id = "mid"
        display_name = "Mid"
        provider = "openai"
        input_price_per_mtok = 1.0
        output_price_per_mtok = 2.0
        context_window = 32000
        tier = "MEDIUM"

        [[catalog.models]]
        id = "big"
        display_name = "Big"
        provider = "anthropic"
        input_price_per_mtok = 5.0
        output_price_per_mtok = 10.0
        context_window = 200000
        tier = "COMPLEX"

        [[catalog.models]]
        id = "thinker"
        display_name = "Thinker"
        provider = "google"
        input_price_per_mtok = 2.0
        output_price_per_mtok = 8.0
        context_window = 100000
        tier = "REASONING"
        "#,
    )
    .unwrap();
    let fixture = TestRouter::start(&config).unwrap();

    assert_eq!(fixture.route("What is 2+2?").unwrap().model.id, "tiny");
    let explanation = fixture
        .router
        .explain(&fixture.route("Prove the lemma by contradiction").unwrap());
    assert!(explanation.contains("Model: Thinker (thinker)"));
    assert!(explanation.contains("Savings vs Big: ~33%"));
}

#[test]
fn catalog_missing_a_tier_is_rejected() {
    let config = Config::from_toml(
        r#"
        [[catalog.models]]
        id = "tiny"
        display_name = "Tiny"
        provider = "groq"
        input_price_per_mtok = 0.01
        output_price_per_mtok = 0.02
        context_window = 8192
        tier = "SIMPLE"
        "#,
    )
    .unwrap();

    let Err(err) = TestRouter::start(&config) else {
        panic!("catalog without MEDIUM should be rejected");
    };
    assert!(err.to_string().contains("no model configured for tier MEDIUM"));
}

#[test]
fn resolve_covers_auto_tier_and_pinned_requests() {
    let fixture = router();
    let conversation = [Message::user("What is 2+2?")];

    let auto = fixture
        .router
        .resolve(Some("switchboard/auto"), &conversation, Tier::Medium)
        .unwrap();
    assert!(matches!(auto, Selection::Routed(_)));

    let tier = fixture
        .router
        .resolve(Some("switchboard/medium"), &conversation, Tier::Medium)
        .unwrap();
    assert_eq!(tier.model().id, "gpt-4o-mini");

    let pinned = fixture
        .router
        .resolve(Some("anthropic/claude-opus-4.5"), &conversation, Tier::Medium)
        .unwrap();
    assert!(matches!(pinned, Selection::Pinned(_)));
    assert_eq!(pinned.model().id, "claude-opus-4.5");
}
