/*!
 * Diagnostic Dump
 * Human-readable and serializable views of a pool's live allocations
 */

use super::LocalPool;
use crate::core::limits::DUMP_TARGET;
use crate::memory::types::{AllocationInfo, Handle, PoolReport};
use std::io;
use tracing::info;

impl LocalPool {
    /// Visit every live allocation in list order
    pub fn for_each_allocation<F>(&self, mut f: F)
    where
        F: FnMut(&AllocationInfo),
    {
        for (key, header) in self.allocations.iter(&self.headers) {
            f(&header.info(Handle::new(self.id, key)));
        }
    }

    /// Live allocations in list order
    pub fn live_allocations(&self) -> Vec<AllocationInfo> {
        self.allocations
            .iter(&self.headers)
            .map(|(key, header)| header.info(Handle::new(self.id, key)))
            .collect()
    }

    pub fn report(&self) -> PoolReport {
        PoolReport {
            pool: self.id,
            site: self.site.clone(),
            stats: self.stats(),
            allocations: self.live_allocations(),
        }
    }

    /// Emit the dump through `tracing`, one event per line
    pub fn print(&self) {
        let report = self.report().to_string();
        for line in report.lines() {
            info!(target: DUMP_TARGET, "{}", line);
        }
    }

    /// Write the plain-text dump to `out`
    pub fn print_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.report())
    }
}
