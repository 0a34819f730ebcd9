//! Implementación in-memory del puerto de borradores.
//!
//! Rápida para tests y prototipos, con las mismas garantías que se esperan
//! del almacenamiento real: merge por campo en guardados parciales y
//! finalización todo-o-nada. Registra además cada payload parcial recibido
//! para poder afirmar minimalidad de diffs en tests.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use form_domain::FieldMap;

use super::{BackendError, DraftBackend};

/// Registro almacenado: entidad parcial o finalizada.
#[derive(Debug, Clone)]
pub struct DraftRecord {
    pub entity_kind: String,
    pub fields: FieldMap,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Merge shallow por campo: las claves de `src` pisan las de `dst`.
/// Última escritura gana; las claves no mencionadas quedan intactas.
fn merge_fields(dst: &mut FieldMap, src: &FieldMap) {
    for (k, v) in src.iter() {
        dst.insert(k.clone(), v.clone());
    }
}

#[derive(Clone)]
pub struct InMemoryDraftBackend {
    records: Arc<RwLock<HashMap<Uuid, DraftRecord>>>,
    save_log: Arc<RwLock<Vec<(Option<Uuid>, FieldMap)>>>,
}

impl InMemoryDraftBackend {
    pub fn new() -> Self {
        Self { records: Arc::new(RwLock::new(HashMap::new())),
               save_log: Arc::new(RwLock::new(Vec::new())) }
    }

    /// Copia del registro (borrador o entidad final) por id.
    pub async fn draft(&self, id: Uuid) -> Option<DraftRecord> {
        self.records.read().await.get(&id).cloned()
    }

    pub async fn draft_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Payloads parciales recibidos, en orden de llegada. `None` como id
    /// marca la llamada de creación.
    pub async fn saved_payloads(&self) -> Vec<(Option<Uuid>, FieldMap)> {
        self.save_log.read().await.clone()
    }
}

impl Default for InMemoryDraftBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftBackend for InMemoryDraftBackend {
    async fn create_draft(&self, entity_kind: &str, fields: &FieldMap) -> Result<Uuid, BackendError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let record = DraftRecord { entity_kind: entity_kind.to_string(),
                                   fields: fields.clone(),
                                   finalized: false,
                                   created_at: now,
                                   updated_at: now };
        self.records.write().await.insert(id, record);
        self.save_log.write().await.push((None, fields.clone()));
        debug!("draft {} created with {} field(s)", id, fields.len());
        Ok(id)
    }

    async fn update_draft(&self, draft_id: Uuid, fields: &FieldMap) -> Result<(), BackendError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&draft_id).ok_or(BackendError::DraftNotFound(draft_id))?;
        if record.finalized {
            return Err(BackendError::AlreadyFinalized(draft_id));
        }
        merge_fields(&mut record.fields, fields);
        record.updated_at = Utc::now();
        self.save_log.write().await.push((Some(draft_id), fields.clone()));
        debug!("draft {} merged {} field(s)", draft_id, fields.len());
        Ok(())
    }

    async fn finalize(&self, draft_id: Option<Uuid>, fields: &FieldMap) -> Result<Uuid, BackendError> {
        let mut records = self.records.write().await;
        match draft_id {
            Some(id) => {
                let record = records.get_mut(&id).ok_or(BackendError::DraftNotFound(id))?;
                if record.finalized {
                    return Err(BackendError::AlreadyFinalized(id));
                }
                merge_fields(&mut record.fields, fields);
                record.finalized = true;
                record.updated_at = Utc::now();
                Ok(id)
            }
            None => {
                let id = Uuid::new_v4();
                let now = Utc::now();
                records.insert(id,
                               DraftRecord { entity_kind: String::new(),
                                             fields: fields.clone(),
                                             finalized: true,
                                             created_at: now,
                                             updated_at: now });
                Ok(id)
            }
        }
    }
}

/// Envoltorio de inyección de fallos para probar los caminos de error.
/// Delegación transparente salvo cuando los flags de fallo están activos.
pub struct FailingDraftBackend {
    inner: InMemoryDraftBackend,
    fail_saves: AtomicBool,
    fail_finalize: AtomicBool,
}

impl FailingDraftBackend {
    pub fn new() -> Self {
        Self { inner: InMemoryDraftBackend::new(),
               fail_saves: AtomicBool::new(false),
               fail_finalize: AtomicBool::new(false) }
    }

    pub fn inner(&self) -> &InMemoryDraftBackend {
        &self.inner
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_finalize(&self, fail: bool) {
        self.fail_finalize.store(fail, Ordering::SeqCst);
    }

    fn transport_error() -> BackendError {
        BackendError::Transport("injected failure".into())
    }
}

impl Default for FailingDraftBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftBackend for FailingDraftBackend {
    async fn create_draft(&self, entity_kind: &str, fields: &FieldMap) -> Result<Uuid, BackendError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::transport_error());
        }
        self.inner.create_draft(entity_kind, fields).await
    }

    async fn update_draft(&self, draft_id: Uuid, fields: &FieldMap) -> Result<(), BackendError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::transport_error());
        }
        self.inner.update_draft(draft_id, fields).await
    }

    async fn finalize(&self, draft_id: Option<Uuid>, fields: &FieldMap) -> Result<Uuid, BackendError> {
        if self.fail_finalize.load(Ordering::SeqCst) {
            return Err(Self::transport_error());
        }
        self.inner.finalize(draft_id, fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn partial_saves_merge_per_field() {
        let backend = InMemoryDraftBackend::new();
        let id = backend.create_draft("client", &map(&[("name", json!("Ana"))])).await.unwrap();

        backend.update_draft(id, &map(&[("phone", json!("555-1234"))])).await.unwrap();
        backend.update_draft(id, &map(&[("name", json!("Ana María"))])).await.unwrap();

        let record = backend.draft(id).await.unwrap();
        assert_eq!(record.fields.get("name"), Some(&json!("Ana María")));
        assert_eq!(record.fields.get("phone"), Some(&json!("555-1234")), "untouched key must survive the merge");
        assert!(!record.finalized);
    }

    #[tokio::test]
    async fn finalize_promotes_existing_draft_and_rejects_reuse() {
        let backend = InMemoryDraftBackend::new();
        let id = backend.create_draft("client", &map(&[("name", json!("Ana"))])).await.unwrap();

        let final_id = backend.finalize(Some(id), &map(&[("email", json!("a@b.c"))])).await.unwrap();
        assert_eq!(final_id, id);
        assert!(backend.draft(id).await.unwrap().finalized);

        let err = backend.update_draft(id, &map(&[("name", json!("x"))])).await.unwrap_err();
        assert_eq!(err, BackendError::AlreadyFinalized(id));
    }

    #[tokio::test]
    async fn finalize_without_draft_creates_final_record() {
        let backend = InMemoryDraftBackend::new();
        let id = backend.finalize(None, &map(&[("title", json!("Loft"))])).await.unwrap();
        let record = backend.draft(id).await.unwrap();
        assert!(record.finalized);
        assert_eq!(record.fields.get("title"), Some(&json!("Loft")));
    }

    #[tokio::test]
    async fn failing_wrapper_is_recoverable() {
        let backend = FailingDraftBackend::new();
        backend.fail_saves(true);
        assert!(backend.create_draft("client", &FieldMap::new()).await.is_err());

        backend.fail_saves(false);
        let id = backend.create_draft("client", &FieldMap::new()).await.unwrap();
        assert!(backend.inner().draft(id).await.is_some());
    }
}
