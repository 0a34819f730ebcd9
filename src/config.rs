//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) con los ajustes de tiempo del autosave. Los valores tienen
//! defaults razonables; las variables sólo hace falta fijarlas para afinar.
use once_cell::sync::Lazy;
use std::env;

use form_core::autosave::AutosaveConfig;
use form_core::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_FAILED_DISPLAY_MS, DEFAULT_SAVED_DISPLAY_MS};

/// Configuración global de la aplicación (extensible para más secciones).
pub struct AppConfig {
    /// Ajustes del motor de autosave.
    pub autosave: AutosaveTuning,
}

/// Parámetros de tiempo del autosave, en milisegundos.
pub struct AutosaveTuning {
    /// Ventana de silencio tras la última edición.
    pub debounce_ms: u64,
    /// Exhibición del badge "guardado".
    pub saved_display_ms: u64,
    /// Exhibición del badge "falló" (más larga para que se alcance a ver).
    pub failed_display_ms: u64,
}

fn env_ms(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| AppConfig {
    autosave: AutosaveTuning {
        debounce_ms: env_ms("FORMFLOW_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
        saved_display_ms: env_ms("FORMFLOW_SAVED_DISPLAY_MS", DEFAULT_SAVED_DISPLAY_MS),
        failed_display_ms: env_ms("FORMFLOW_FAILED_DISPLAY_MS", DEFAULT_FAILED_DISPLAY_MS),
    },
});

/// Carga `.env` si existe (ignora su ausencia).
pub fn init_dotenv() {
    let _ = dotenvy::dotenv();
}

impl AutosaveTuning {
    /// Proyección al tipo de configuración que consume el motor.
    pub fn engine_config(&self) -> AutosaveConfig {
        AutosaveConfig { debounce_ms: self.debounce_ms,
                         saved_display_ms: self.saved_display_ms,
                         failed_display_ms: self.failed_display_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let cfg = CONFIG.autosave.engine_config();
        assert_eq!(cfg.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(cfg.saved_display_ms, DEFAULT_SAVED_DISPLAY_MS);
        assert_eq!(cfg.failed_display_ms, DEFAULT_FAILED_DISPLAY_MS);
    }
}
