//! Demo de consola: recorre el alta de un cliente de punta a punta contra
//! el backend in-memory, con reloj lógico para mostrar el ciclo completo
//! (debounce, creación implícita del borrador, promoción final).
use std::sync::Arc;

use serde_json::json;

use form_core::{AutosaveConfig, Clock, InMemoryDraftBackend, InMemoryEventStore, ManualClock, WizardSession};
use formflow_rust::config::{init_dotenv, CONFIG};
use formflow_rust::intake::client_wizard;

async fn run_client_intake_demo() -> Result<(), Box<dyn std::error::Error>> {
    let definition = Arc::new(client_wizard()?);
    let backend = InMemoryDraftBackend::new();
    let cfg: AutosaveConfig = CONFIG.autosave.engine_config();
    let clock = ManualClock::new(0);

    let mut session = WizardSession::new(definition, InMemoryEventStore::default(), cfg);
    println!("-- client intake: {} steps, progress {:?}", session.definition().len(), session.progress());

    // Paso 1: contacto
    session.set_field("first_name", json!("Ana"), clock.now_ms())?;
    session.set_field("last_name", json!("Torres"), clock.now_ms())?;
    session.set_field("email", json!("ana.torres@example.com"), clock.now_ms())?;

    // La ventana de debounce vence: el primer autosave crea el borrador
    clock.advance(cfg.debounce_ms);
    session.autosave_tick(&backend, clock.now_ms()).await;
    println!("-- autosave status: {:?}, draft: {:?}", session.autosave_status(), session.draft_id());

    session.next()?;
    println!("-- progress {:?} ({})", session.progress(), session.current_step().title());

    // Paso 2: intención. BUY revela el paso de financiamiento
    session.set_field("intent", json!("BUY"), clock.now_ms())?;
    session.set_field("budget", json!(320_000), clock.now_ms())?;
    println!("-- progress {:?} (financing step revealed)", session.progress());

    clock.advance(cfg.debounce_ms);
    session.autosave_tick(&backend, clock.now_ms()).await;

    session.next()?;
    session.set_field("financing_type", json!("MORTGAGE"), clock.now_ms())?;
    session.set_field("mortgage_lender", json!("Banco Central Hipotecario"), clock.now_ms())?;
    session.next()?;

    // Paso 4: preferencias y submit final
    session.set_field("areas_of_interest", json!(["CENTER", "NORTH"]), clock.now_ms())?;
    match session.submit(&backend).await? {
        Some(final_id) => println!("-- completed: final entity {}", final_id),
        None => println!("-- submit blocked: {:?}", session.validation_errors()),
    }

    println!("-- {} session event(s) recorded", session.events().len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_dotenv();
    run_client_intake_demo().await
}
