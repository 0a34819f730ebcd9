//! Valores vivos de un formulario.
//!
//! `FormValues` es el mapa autoritativo clave -> valor JSON de una sesión.
//! Se usa tanto para el estado en edición como para el snapshot persistido;
//! la resta entre ambos (`diff_against`) es la base del autosave incremental.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mapa ordenado de campos (clave -> valor JSON). El orden de inserción se
/// conserva para que los payloads parciales sean estables y legibles.
pub type FieldMap = IndexMap<String, Value>;

/// Conjunto de valores actuales de un formulario.
///
/// Las claves son la unión de todas las claves de `FieldSchema` del wizard.
/// Sólo la sesión muta este mapa; las capas de validación y autosave lo leen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    inner: FieldMap,
}

impl FormValues {
    pub fn new() -> Self {
        Self { inner: FieldMap::new() }
    }

    /// Fija el valor de una clave (inserta o reemplaza).
    pub fn set(&mut self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Acceso de conveniencia para valores string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_map(&self) -> &FieldMap {
        &self.inner
    }

    /// Indica si la clave carece de un valor "real": ausente, `null`,
    /// string vacío o array vacío cuentan como faltante.
    pub fn is_blank(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(a)) => a.is_empty(),
            Some(_) => false,
        }
    }

    /// Calcula el diff contra un snapshot: únicamente las claves cuyo valor
    /// difiere del snapshot (o no existen en él). Las claves nunca se
    /// eliminan de un formulario, por lo que no hay caso de borrado.
    pub fn diff_against(&self, snapshot: &FormValues) -> FieldMap {
        let mut out = FieldMap::new();
        for (k, v) in self.inner.iter() {
            if snapshot.get(k) != Some(v) {
                out.insert(k.clone(), v.clone());
            }
        }
        out
    }

    /// Proyección del mapa restringida a un conjunto de claves.
    pub fn project<'a, I>(&self, keys: I) -> FieldMap
        where I: IntoIterator<Item = &'a str>
    {
        let mut out = FieldMap::new();
        for k in keys {
            if let Some(v) = self.inner.get(k) {
                out.insert(k.to_string(), v.clone());
            }
        }
        out
    }
}

impl From<FieldMap> for FormValues {
    fn from(inner: FieldMap) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn diff_only_reports_changed_keys() {
        let mut snapshot = FormValues::new();
        snapshot.set("name", json!("Ana"));
        snapshot.set("phone", json!("555-1234"));

        let mut values = snapshot.clone();
        values.set("phone", json!("555-9876"));
        values.set("email", json!("ana@example.com"));

        let diff = values.diff_against(&snapshot);
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.get("phone"), Some(&json!("555-9876")));
        assert_eq!(diff.get("email"), Some(&json!("ana@example.com")));
        assert!(diff.get("name").is_none(), "unchanged key must not be in diff");
    }

    #[test]
    fn diff_against_identical_values_is_empty() {
        let mut values = FormValues::new();
        values.set("name", json!("Ana"));
        assert!(values.diff_against(&values.clone()).is_empty());
    }

    #[test]
    fn blank_detection_covers_null_empty_string_and_empty_array() {
        let mut values = FormValues::new();
        values.set("a", json!(null));
        values.set("b", json!(""));
        values.set("c", json!("  "));
        values.set("d", json!([]));
        values.set("e", json!("x"));
        values.set("f", json!(0));

        assert!(values.is_blank("a"));
        assert!(values.is_blank("b"));
        assert!(values.is_blank("c"));
        assert!(values.is_blank("d"));
        assert!(values.is_blank("missing"));
        assert!(!values.is_blank("e"));
        assert!(!values.is_blank("f"));
    }
}
