/*
 * Process-wide default scale factor for views that are not attached to a window.
 *
 * `ScaleService` asks its `ScaleProvider` once, on first use, and reuses the
 * answer for the rest of the process; there is no teardown. The global instance
 * uses the platform provider and honours `DpiConfig::from_env()`. Tests build
 * private services around a fixed provider instead of touching the global.
 */
use log::{debug, warn};
use std::sync::{Arc, OnceLock};

/// Environment variable that forces the default scale factor (e.g. `1.5`).
pub const FORCE_SCALE_FACTOR_ENV: &str = "DUCTPAINT_FORCE_SCALE_FACTOR";

pub trait ScaleProvider: Send + Sync {
    /// Pixels per logical unit for the primary display.
    fn system_scale_factor(&self) -> f32;
}

/// Queries the screen DC: LOGPIXELSX relative to 96 DPI.
#[cfg(target_os = "windows")]
#[derive(Debug, Default)]
pub struct PlatformScaleProvider;

#[cfg(target_os = "windows")]
impl ScaleProvider for PlatformScaleProvider {
    fn system_scale_factor(&self) -> f32 {
        use windows::Win32::Graphics::Gdi::{GetDC, GetDeviceCaps, LOGPIXELSX, ReleaseDC};
        let hdc_screen = unsafe { GetDC(None) };
        if hdc_screen.is_invalid() {
            warn!("ScaleService: could not acquire screen DC; assuming 96 DPI");
            return 1.0;
        }
        let dpi = unsafe { GetDeviceCaps(Some(hdc_screen), LOGPIXELSX) };
        unsafe { ReleaseDC(None, hdc_screen) };
        if dpi <= 0 { 1.0 } else { dpi as f32 / 96.0 }
    }
}

/// Non-Windows builds have no screen to ask and report 1.0.
#[cfg(not(target_os = "windows"))]
#[derive(Debug, Default)]
pub struct PlatformScaleProvider;

#[cfg(not(target_os = "windows"))]
impl ScaleProvider for PlatformScaleProvider {
    fn system_scale_factor(&self) -> f32 {
        1.0
    }
}

/// A provider that always answers with the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedScaleProvider(pub f32);

impl ScaleProvider for FixedScaleProvider {
    fn system_scale_factor(&self) -> f32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DpiConfig {
    /// Overrides whatever the provider reports.
    pub forced_scale_factor: Option<f32>,
}

impl DpiConfig {
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(FORCE_SCALE_FACTOR_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let forced_scale_factor = value.and_then(|raw| match raw.trim().parse::<f32>() {
            Ok(scale) if is_usable_scale(scale) => Some(scale),
            _ => {
                warn!("ScaleService: ignoring {FORCE_SCALE_FACTOR_ENV}={raw:?}; expected a positive number");
                None
            }
        });
        Self {
            forced_scale_factor,
        }
    }
}

fn is_usable_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}

pub struct ScaleService {
    provider: Box<dyn ScaleProvider>,
    config: DpiConfig,
    cached: OnceLock<f32>,
}

impl ScaleService {
    pub fn new(provider: Box<dyn ScaleProvider>, config: DpiConfig) -> Self {
        Self {
            provider,
            config,
            cached: OnceLock::new(),
        }
    }

    pub fn fixed(scale_factor: f32) -> Self {
        Self::new(Box::new(FixedScaleProvider(scale_factor)), DpiConfig::default())
    }

    /// The process-wide service, created on first access.
    pub fn global() -> Arc<ScaleService> {
        static GLOBAL: OnceLock<Arc<ScaleService>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| {
                Arc::new(ScaleService::new(
                    Box::new(PlatformScaleProvider),
                    DpiConfig::from_env(),
                ))
            })
            .clone()
    }

    /// Default scale factor, queried once and cached.
    pub fn default_scale_factor(&self) -> f32 {
        *self.cached.get_or_init(|| {
            if let Some(forced) = self.config.forced_scale_factor {
                debug!("ScaleService: using forced scale factor {forced}");
                return forced;
            }
            let reported = self.provider.system_scale_factor();
            if is_usable_scale(reported) {
                debug!("ScaleService: system scale factor {reported}");
                reported
            } else {
                warn!("ScaleService: provider reported {reported}; falling back to 1.0");
                1.0
            }
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.cached.get().is_some()
    }
}

impl std::fmt::Debug for ScaleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleService")
            .field("config", &self.config)
            .field("cached", &self.cached.get())
            .finish()
    }
}
