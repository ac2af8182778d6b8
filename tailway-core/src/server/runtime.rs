use crate::conf::load_config;
use crate::conf::types::{RuntimeConfig, TailConfig};
use crate::tail::Tailer;
use anyhow::Result;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// Per-request view of the configuration. Swapped wholesale on reload.
#[derive(Debug)]
pub struct RuntimeState {
    pub listen: String,
    pub tail: TailConfig,
    pub tailer: Tailer,
}

pub fn build_runtime_state(cfg: &RuntimeConfig) -> RuntimeState {
    RuntimeState {
        listen: cfg.listener.addr.clone(),
        tail: cfg.tail.clone(),
        tailer: Tailer::new(&cfg.tail),
    }
}

/// Reload the config directory and swap in the new tail settings.
///
/// The listener is bound once at startup; an address change only takes
/// effect after a restart.
pub async fn reload_runtime_state(config_dir: &Path, state: &ArcSwap<RuntimeState>) -> Result<()> {
    let validated = load_config(config_dir)?;
    let new_state = build_runtime_state(&validated.config);

    let old = state.load();
    if old.listen != new_state.listen {
        tracing::warn!(
            old_listen = %old.listen,
            new_listen = %new_state.listen,
            "listener address changed; restart required to rebind"
        );
    }

    tracing::info!(
        old_log_dir = %old.tail.log_dir.display(),
        new_log_dir = %new_state.tail.log_dir.display(),
        route = %new_state.tail.route,
        warnings = validated.report.warnings.len(),
        "runtime state reloaded"
    );

    state.store(Arc::new(new_state));

    Ok(())
}
