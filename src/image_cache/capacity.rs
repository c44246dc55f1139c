//! Memory budget for the image cache, decided once at startup

use sysinfo::System;
use tracing::info;

use crate::config::ImageCacheConfig;
use crate::config::defaults::DEFAULT_MIN_CACHE_BYTES;
use crate::errors::AppResult;
use crate::utils::format_memory;

/// Explicit `max_memory` if configured, otherwise a fraction of the memory
/// currently available to the system, never below the 4MB floor.
pub fn cache_capacity_bytes(config: &ImageCacheConfig) -> AppResult<usize> {
    let budget = match config.max_memory_bytes()? {
        Some(bytes) => bytes,
        None => {
            let mut system = System::new();
            system.refresh_memory();
            fraction_of(system.available_memory(), config.memory_fraction)
        }
    };

    info!("Image cache budget: {}", format_memory(budget as f64));
    Ok(usize::try_from(budget).unwrap_or(usize::MAX))
}

fn fraction_of(available: u64, fraction: u32) -> u64 {
    (available / u64::from(fraction.max(1))).max(DEFAULT_MIN_CACHE_BYTES)
}
