//! # Assistant placeholders
//!
//! None of this is functional. The compliance score is random, the checks
//! always pass, background removal returns its input, color suggestions and
//! campaign generation only report back, and the tips are a fixed list. These stubs exist so the shell can offer the same actions as the
//! hosted tool; nothing here inspects a creative.

use std::thread;
use std::time::Duration;

use image::RgbImage;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// Canned checks every audit reports as passing
pub const COMPLIANCE_CHECKS: [&str; 5] = [
    "Brand Guidelines",
    "Font Size (>=20px)",
    "Color Contrast",
    "Safe Zones",
    "File Size (<500KB)",
];

const DESIGN_TIPS: [&str; 4] = [
    "Use bold colors for attention",
    "Keep headlines under 40 characters",
    "Center product image",
    "Add Tesco branding elements",
];

/// Output of a placeholder audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceReport {
    /// Random percentage in 85..=95
    pub score: u8,
    pub checks: Vec<(String, bool)>,
}

/// Placeholder compliance auditor
pub struct ComplianceAuditor {
    rng: SmallRng,
    latency: Duration,
}

impl ComplianceAuditor {
    pub fn new(latency: Duration) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            latency,
        }
    }

    /// Auditor with a fixed seed, for reproducible scores
    pub fn with_seed(seed: u64, latency: Duration) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            latency,
        }
    }

    pub fn audit(&mut self) -> ComplianceReport {
        simulate_latency(self.latency);
        warn!("Compliance audit is a placeholder: score is random and checks always pass");

        ComplianceReport {
            score: self.rng.gen_range(85..=95),
            checks: COMPLIANCE_CHECKS.iter().map(|c| (c.to_string(), true)).collect(),
        }
    }
}

/// Placeholder background removal: returns the image unchanged
pub fn remove_background(image: RgbImage, latency: Duration) -> RgbImage {
    simulate_latency(latency);
    warn!("Background removal is a placeholder: image returned unchanged");
    image
}

/// Placeholder color suggestions: no palette is produced
pub fn suggest_colors(latency: Duration) {
    simulate_latency(latency);
    warn!("Color suggestions are a placeholder: no palette was generated");
}

/// Placeholder campaign generation: nothing is created
pub fn generate_campaign(latency: Duration) {
    simulate_latency(latency);
    warn!("Campaign generation is a placeholder: no campaign was created");
}

pub fn design_tips() -> &'static [&'static str] {
    &DESIGN_TIPS
}

fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        info!("Simulating {}ms of processing", latency.as_millis());
        thread::sleep(latency);
    }
}
