//! Tests for ResponseGenerator: context resolution, history maintenance, fail-soft.
//! Uses the in-memory store with mock backends; no network.

mod common;

use std::sync::Arc;

use chat_handlers::{CommandHandler, ResponseGenerator, FALLBACK_REPLY};
use common::{EchoClient, FailingClient};
use conversation::{ConversationStore, InMemoryConversationStore};
use jarvis_core::Role;

fn setup_echo() -> (
    Arc<InMemoryConversationStore>,
    Arc<EchoClient>,
    ResponseGenerator,
) {
    let store = Arc::new(InMemoryConversationStore::new());
    let client = Arc::new(EchoClient::default());
    let generator = ResponseGenerator::new(store.clone(), client.clone());
    (store, client, generator)
}

#[tokio::test]
async fn test_plain_message_uses_classified_template_as_one_shot_context() {
    let (store, client, generator) = setup_echo();

    let reply = generator
        .generate("u1@c.us", "estou com um problema no meu notebook", None)
        .await;
    assert_eq!(reply, "eco: estou com um problema no meu notebook");

    let requests = client.requests.lock().unwrap();
    let (prior, input) = &requests[0];
    // technical template ("problema" keyword) leads the request
    assert_eq!(prior[0].text, prompt_catalog::resolve("tecnico").unwrap());
    assert_eq!(input, "estou com um problema no meu notebook");

    // one-shot context never touches stored history
    let history = store.history("u1@c.us");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].text, "estou com um problema no meu notebook");
    assert_eq!(history[1].role, Role::Model);
}

#[tokio::test]
async fn test_stored_override_beats_keyword_classification() {
    let (store, client, generator) = setup_echo();
    let router = CommandHandler::new(store.clone());
    router.run_command("u1@c.us", "/prompt_tecnico");

    generator
        .generate("u1@c.us", "quero fazer uma venda hoje", None)
        .await;

    let requests = client.requests.lock().unwrap();
    let (prior, _) = &requests[0];
    // context is the technical seed turn from the command, not the sales template
    assert_eq!(prior.len(), 1);
    assert_eq!(prior[0].text, prompt_catalog::resolve("tecnico").unwrap());
    assert_ne!(prior[0].text, prompt_catalog::resolve("vendas").unwrap());
}

#[tokio::test]
async fn test_stored_override_outlives_history_cap() {
    let (store, client, generator) = setup_echo();
    let router = CommandHandler::new(store.clone());
    router.run_command("u1@c.us", "/prompt_tecnico");
    let template = prompt_catalog::resolve("tecnico").unwrap();

    // 6 exchanges: enough appended turns for the cap to evict the seed turn
    for i in 0..6 {
        generator
            .generate("u1@c.us", &format!("mensagem {}", i), None)
            .await;
    }

    let history = store.history("u1@c.us");
    assert!(history.iter().all(|t| t.text != template));

    let requests = client.requests.lock().unwrap();
    let (prior, _) = requests.last().unwrap();
    // persona still leads the request once the seed turn is gone
    assert_eq!(prior[0].text, template);
    assert_eq!(prior[1].text, "eco: mensagem 0");
}

#[tokio::test]
async fn test_explicit_override_reseeds_history() {
    let (store, client, generator) = setup_echo();
    generator.generate("u1@c.us", "primeira mensagem", None).await;
    assert_eq!(store.history("u1@c.us").len(), 2);

    generator
        .generate("u1@c.us", "oi", Some("Você é um pirata"))
        .await;

    assert_eq!(
        store.override_for("u1@c.us").as_deref(),
        Some("Você é um pirata")
    );
    let requests = client.requests.lock().unwrap();
    let (prior, _) = &requests[1];
    assert_eq!(prior.len(), 1);
    assert_eq!(prior[0].text, "Você é um pirata");
    // history: seed + user + model
    assert_eq!(store.history("u1@c.us").len(), 3);
}

#[tokio::test]
async fn test_backend_failure_returns_fallback_and_keeps_user_turn() {
    let store = Arc::new(InMemoryConversationStore::new());
    let generator = ResponseGenerator::new(store.clone(), Arc::new(FailingClient));

    let reply = generator.generate("u1@c.us", "oi", None).await;
    assert_eq!(reply, FALLBACK_REPLY);

    let history = store.history("u1@c.us");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].text, "oi");
}

#[tokio::test]
async fn test_eleven_messages_cap_history_at_ten() {
    let (store, _, generator) = setup_echo();

    for i in 0..11 {
        generator
            .generate("u1@c.us", &format!("mensagem {}", i), None)
            .await;
    }

    let history = store.history("u1@c.us");
    assert_eq!(history.len(), 10);
    // 22 turns appended in total; the oldest twelve were evicted
    assert_eq!(history[0].text, "mensagem 6");
    assert_eq!(history[9].text, "eco: mensagem 10");
}

#[tokio::test]
async fn test_prior_context_excludes_current_input() {
    let (store, client, generator) = setup_echo();
    generator.generate("u1@c.us", "um", None).await;
    generator.generate("u1@c.us", "dois", None).await;

    let requests = client.requests.lock().unwrap();
    let (prior, input) = &requests[1];
    assert_eq!(input, "dois");
    // template + [user "um", model "eco: um"]; the new input is not in prior turns
    assert!(prior.iter().all(|t| t.text != "dois"));
    assert!(prior.iter().any(|t| t.text == "um"));
    assert!(prior.iter().any(|t| t.text == "eco: um"));
    drop(requests);

    assert_eq!(store.history("u1@c.us").len(), 4);
}
