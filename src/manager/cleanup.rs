// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Maintenance sweep over the stored zone data

use crate::store::Backend;
use crate::Result;

use super::DnsManager;

impl<B: Backend> DnsManager<B> {
    /// Drop record entries whose stored value is empty or degenerate, across
    /// every zone hash in the store.
    ///
    /// Best effort: a zone or entry that fails is logged and skipped, only a
    /// failure to list the zones at all aborts the sweep.
    pub async fn cleanup(&self) -> Result<()> {
        let zones = self.store.list_zones().await?;

        for zone in zones {
            if let Err(err) = self.clean_zone(&zone).await {
                tracing::error!(%zone, error = %err, "failed to cleanup zone");
            }
        }

        Ok(())
    }

    async fn clean_zone(&self, zone_key: &str) -> Result<()> {
        let names = self.store.record_names(zone_key).await?;

        for name in names {
            let value = match self.store.raw_records(zone_key, &name).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::error!(zone = %zone_key, %name, error = %err, "failed to get value");
                    continue;
                }
            };

            let degenerate = match &value {
                None => true,
                Some(value) => value.is_empty() || value.as_slice() == b"{}",
            };

            if degenerate {
                if let Err(err) = self.store.delete_zone_records(zone_key, &name).await {
                    tracing::error!(
                        zone = %zone_key,
                        %name,
                        error = %err,
                        "failed to delete empty entry"
                    );
                }
            }
        }

        Ok(())
    }
}
