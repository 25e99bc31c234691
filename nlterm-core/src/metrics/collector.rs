use std::sync::Arc;

use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System, MINIMUM_CPU_UPDATE_INTERVAL,
};
use tokio::sync::RwLock;
use tracing::trace;

use crate::models::{DiskUsage, MemoryUsage, ProcessInfo, SystemSnapshot};

/// Read-only inspector for CPU, memory, disk, and process state.
///
/// The inner `System` is kept alive between calls so CPU usage deltas are
/// meaningful across snapshots. Cloning shares the same inner state.
pub struct SystemCollector {
    system: Arc<RwLock<System>>,
}

impl SystemCollector {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything())
                .with_processes(ProcessRefreshKind::everything()),
        );

        Self {
            system: Arc::new(RwLock::new(system)),
        }
    }

    /// Take a full snapshot: global CPU, memory, disk, and the process table.
    ///
    /// Process and CPU percentages need two refreshes separated by the
    /// minimum update interval to produce a usable delta.
    pub async fn collect(&self) -> SystemSnapshot {
        let mut system = self.system.write().await;

        system.refresh_cpu_all();
        system.refresh_processes(ProcessesToUpdate::All, true);
        tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
        system.refresh_cpu_all();
        system.refresh_processes(ProcessesToUpdate::All, true);
        system.refresh_memory();

        let cpu_percent = system.global_cpu_usage();
        let memory = MemoryUsage {
            used_bytes: system.used_memory(),
            total_bytes: system.total_memory(),
        };

        let memory_total = memory.total_bytes.max(1);
        let processes: Vec<ProcessInfo> = system
            .processes()
            .values()
            .map(|process| ProcessInfo {
                pid: process.pid().as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                cpu_percent: process.cpu_usage(),
                memory_percent: (process.memory() as f32 / memory_total as f32) * 100.0,
            })
            .collect();

        let disk = collect_disk_usage();

        trace!(
            cpu_percent = cpu_percent,
            memory_used = memory.used_bytes,
            process_count = processes.len(),
            "System snapshot collected"
        );

        SystemSnapshot::new(cpu_percent, memory, disk, processes)
    }

    pub async fn get_cpu_usage(&self) -> f32 {
        let mut system = self.system.write().await;
        system.refresh_cpu_all();
        system.global_cpu_usage()
    }

    pub async fn get_memory_info(&self) -> MemoryUsage {
        let mut system = self.system.write().await;
        system.refresh_memory();
        MemoryUsage {
            used_bytes: system.used_memory(),
            total_bytes: system.total_memory(),
        }
    }
}

/// Disk usage summed across all mounted disks.
fn collect_disk_usage() -> DiskUsage {
    let disks = Disks::new_with_refreshed_list();
    let mut total = 0u64;
    let mut available = 0u64;
    for disk in disks.list() {
        total += disk.total_space();
        available += disk.available_space();
    }
    DiskUsage {
        used_bytes: total.saturating_sub(available),
        total_bytes: total,
    }
}

impl Default for SystemCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SystemCollector {
    fn clone(&self) -> Self {
        Self {
            system: Arc::clone(&self.system),
        }
    }
}
