use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Point-in-time memory usage in bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryUsage {
    pub fn percent(&self) -> f32 {
        if self.total_bytes > 0 {
            (self.used_bytes as f32 / self.total_bytes as f32) * 100.0
        } else {
            0.0
        }
    }

    pub fn used_gb(&self) -> u64 {
        self.used_bytes / BYTES_PER_GB
    }

    pub fn total_gb(&self) -> u64 {
        self.total_bytes / BYTES_PER_GB
    }
}

/// Point-in-time disk usage in bytes, aggregated across mounted disks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiskUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl DiskUsage {
    pub fn percent(&self) -> f32 {
        if self.total_bytes > 0 {
            (self.used_bytes as f32 / self.total_bytes as f32) * 100.0
        } else {
            0.0
        }
    }

    pub fn used_gb(&self) -> u64 {
        self.used_bytes / BYTES_PER_GB
    }

    pub fn total_gb(&self) -> u64 {
        self.total_bytes / BYTES_PER_GB
    }
}

/// One running process as reported by the OS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// A read-only snapshot of system resources: CPU, memory, disk, and the
/// running process table. No side effects; backs `ps`, `top`, and the
/// status display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f32,
    pub memory: MemoryUsage,
    pub disk: DiskUsage,
    pub processes: Vec<ProcessInfo>,
}

impl SystemSnapshot {
    pub fn new(
        cpu_percent: f32,
        memory: MemoryUsage,
        disk: DiskUsage,
        processes: Vec<ProcessInfo>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            cpu_percent,
            memory,
            disk,
            processes,
        }
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Processes ordered by descending (cpu, pid, name, mem), the natural
    /// tuple sort order of the report.
    pub fn top_processes(&self, limit: usize) -> Vec<&ProcessInfo> {
        let mut sorted: Vec<&ProcessInfo> = self.processes.iter().collect();
        sorted.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.pid.cmp(&a.pid))
                .then_with(|| b.name.cmp(&a.name))
                .then_with(|| {
                    b.memory_percent
                        .partial_cmp(&a.memory_percent)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
        sorted.truncate(limit);
        sorted
    }
}
