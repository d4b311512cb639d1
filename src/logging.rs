// SPDX-License-Identifier: MPL-2.0
//! Process-wide tracing subscriber.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset. The renderer and text shaper are chatty at
/// `info`.
const DEFAULT_LOG_FILTER: &str =
    "post_lens=info,wgpu_core=warn,wgpu_hal=warn,naga=warn,cosmic_text=warn,iced_wgpu=warn";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the subscriber. `RUST_LOG` takes precedence over the default
/// filter. Calling it again is a no-op.
pub fn init() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt().with_env_filter(env_filter).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_renderer_targets() {
        for target in ["wgpu_core=warn", "naga=warn", "cosmic_text=warn"] {
            assert!(DEFAULT_LOG_FILTER.contains(target));
        }
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
