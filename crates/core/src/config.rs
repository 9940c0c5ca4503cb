//! Configuration structures for the pricing analytics pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for one analysis run.
///
/// The surrounding UI hands parameter changes across as JSON; every change
/// triggers a full recomputation with the updated configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Working-set filter configuration.
    pub filter: FilterConfig,
    /// Ranking and chart-feed configuration.
    pub ranking: RankingConfig,
    /// Schema alias extensions.
    pub schema: SchemaConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            ranking: RankingConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration payload handed across from the UI layer.
    ///
    /// Absent sections and fields keep their defaults.
    pub fn from_json(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        let min_revenue = self.filter.min_partner_revenue;
        if !min_revenue.is_finite() || min_revenue < 0.0 {
            return Err(Error::config(format!(
                "min_partner_revenue must be a non-negative number, got {min_revenue}"
            )));
        }
        if self.ranking.top_n == 0 {
            return Err(Error::config("top_n must be at least 1"));
        }
        if self.ranking.box_plot_top_k == 0 {
            return Err(Error::config("box_plot_top_k must be at least 1"));
        }
        Ok(())
    }
}

/// Working-set filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Apply the IQR price outlier filter.
    pub enable_outlier_filter: bool,
    /// Minimum aggregate partner revenue to keep (inclusive).
    pub min_partner_revenue: f64,
    /// Partner allow-list; empty means no restriction.
    pub partner_allowlist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enable_outlier_filter: true,
            min_partner_revenue: 10_000.0,
            partner_allowlist: Vec::new(),
        }
    }
}

/// Ranking and chart-feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of partners in the top/bottom price rankings.
    pub top_n: usize,
    /// Number of highest-volume partners fed to the box-plot collaborator.
    pub box_plot_top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            box_plot_top_k: 20,
        }
    }
}

/// Extra column aliases appended to the built-in alias table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Extra aliases resolving to `unit_price`.
    pub extra_price_aliases: Vec<String>,
    /// Extra aliases resolving to `quantity`.
    pub extra_quantity_aliases: Vec<String>,
    /// Extra aliases resolving to `partner`.
    pub extra_partner_aliases: Vec<String>,
    /// Extra aliases resolving to `amount`.
    pub extra_amount_aliases: Vec<String>,
}
