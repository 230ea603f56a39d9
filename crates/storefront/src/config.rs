//! Session configuration
//!
//! Every field has a default matching the live storefront, so a config
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use crate::cart::MergePolicy;
use crate::error::{Result, StorefrontError};
use crate::observers::drawer::DrawerMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub id: String,
    pub cart_key: String,
    pub wishlist_key: String,
    pub merge_policy: MergePolicy,
    /// Viewport width at session start, in CSS pixels
    pub viewport_width: u32,
    pub drawer: DrawerConfig,
    pub toast: ToastConfig,
    pub pricing: PricingConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            cart_key: "cart".to_string(),
            wishlist_key: "wishlist".to_string(),
            merge_policy: MergePolicy::default(),
            viewport_width: 1280,
            drawer: DrawerConfig::default(),
            toast: ToastConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cart_key.is_empty() || self.wishlist_key.is_empty() {
            return Err(StorefrontError::Config("storage keys must not be empty".into()));
        }
        if self.cart_key == self.wishlist_key {
            return Err(StorefrontError::Config(
                "cart and wishlist must use different storage keys".into(),
            ));
        }
        if self.drawer.modal_breakpoint_px == 0 {
            return Err(StorefrontError::Config("modal breakpoint must be positive".into()));
        }
        Ok(())
    }
}

/// Cart drawer behaviour and the page elements it binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Widths at or above this are modal, below are non-modal
    pub modal_breakpoint_px: u32,
    pub confirmation_ms: u64,
    pub bundle_confirmation_ms: u64,
    pub focus_delay_ms: u64,
    pub resize_debounce_ms: u64,
    pub panel_id: String,
    pub close_control_id: String,
    /// Tag of the region hidden from assistive technology while modal
    pub inert_region_tag: String,
    pub placeholder_image: String,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            modal_breakpoint_px: 768,
            confirmation_ms: 3000,
            bundle_confirmation_ms: 3500,
            focus_delay_ms: 50,
            resize_debounce_ms: 150,
            panel_id: "cart-drawer".to_string(),
            close_control_id: "cart-drawer-close".to_string(),
            inert_region_tag: "main".to_string(),
            placeholder_image: "/placeholder-product.jpg".to_string(),
        }
    }
}

impl DrawerConfig {
    pub fn mode_for_width(&self, width: u32) -> DrawerMode {
        if width < self.modal_breakpoint_px {
            DrawerMode::NonModal
        } else {
            DrawerMode::Modal
        }
    }

    pub fn confirmation(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }

    pub fn bundle_confirmation(&self) -> Duration {
        Duration::from_millis(self.bundle_confirmation_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Toast timings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub default_duration_ms: u64,
    pub cart_duration_ms: u64,
    pub clear_cart_duration_ms: u64,
    pub wishlist_duration_ms: u64,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            cart_duration_ms: 3000,
            clear_cart_duration_ms: 2000,
            wishlist_duration_ms: 2000,
            fade_in_ms: 100,
            fade_out_ms: 400,
        }
    }
}

impl ToastConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

/// Shipping, tax and currency display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub currency_symbol: String,
    /// Subtotals strictly above this ship free
    pub free_shipping_threshold: u64,
    pub flat_shipping: u64,
    /// VAT in tenths of a percent (75 = 7.5%)
    pub vat_per_mille: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₦".to_string(),
            free_shipping_threshold: 50_000,
            flat_shipping: 5_000,
            vat_per_mille: 75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        let drawer = DrawerConfig::default();
        assert_eq!(drawer.mode_for_width(767), DrawerMode::NonModal);
        assert_eq!(drawer.mode_for_width(768), DrawerMode::Modal);
        assert_eq!(drawer.mode_for_width(1440), DrawerMode::Modal);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        std::fs::write(
            &path,
            r#"{ "merge_policy": "merge_by_id", "drawer": { "modal_breakpoint_px": 1024 } }"#,
        )
        .unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(config.merge_policy, MergePolicy::MergeById);
        assert_eq!(config.drawer.modal_breakpoint_px, 1024);
        assert_eq!(config.drawer.confirmation_ms, 3000);
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.pricing.vat_per_mille, 75);
    }

    #[test]
    fn test_rejects_shared_keys() {
        let config = StorefrontConfig {
            wishlist_key: "cart".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(StorefrontError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = StorefrontConfig::from_file("/nonexistent/storefront.json").unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
