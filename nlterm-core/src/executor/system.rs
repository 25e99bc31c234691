//! System-report built-ins (`ps`, `top`/`htop`) rendered from collector
//! snapshots as fixed-width text.

use crate::error::TermResult;
use crate::metrics::SystemCollector;
use crate::models::CommandResult;

const PS_LIMIT: usize = 20;
const TOP_LIMIT: usize = 10;

/// `ps`: pid, name, CPU% for up to 20 processes, pid-ordered.
pub async fn ps(collector: &SystemCollector) -> TermResult<CommandResult> {
    let snapshot = collector.collect().await;

    let mut processes = snapshot.processes;
    processes.sort_by_key(|p| p.pid);
    processes.truncate(PS_LIMIT);

    if processes.is_empty() {
        return Ok(CommandResult::ok("No processes found"));
    }

    let mut output = format!("{:<8} {:<20} {}\n", "PID", "NAME", "CPU%");
    output.push_str(&"-".repeat(40));
    for process in &processes {
        output.push_str(&format!(
            "\n{:<8} {:<20} {:.1}%",
            process.pid, process.name, process.cpu_percent
        ));
    }

    Ok(CommandResult::ok(output))
}

/// `top`/`htop`: CPU, memory, disk summary plus the ten highest-CPU
/// processes.
pub async fn top(collector: &SystemCollector) -> TermResult<CommandResult> {
    let snapshot = collector.collect().await;

    let mut output = format!(
        "System Information:\n\
         CPU Usage: {:.1}%\n\
         Memory: {:.1}% ({}GB / {}GB)\n\
         Disk: {:.1}% ({}GB / {}GB)\n\
         \nTop Processes:",
        snapshot.cpu_percent,
        snapshot.memory.percent(),
        snapshot.memory.used_gb(),
        snapshot.memory.total_gb(),
        snapshot.disk.percent(),
        snapshot.disk.used_gb(),
        snapshot.disk.total_gb(),
    );

    for process in snapshot.top_processes(TOP_LIMIT) {
        output.push_str(&format!(
            "\n{:<8} {:<20} {:.1}% CPU, {:.1}% MEM",
            process.pid, process.name, process.cpu_percent, process.memory_percent
        ));
    }

    Ok(CommandResult::ok(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ps_output_shape() {
        let collector = SystemCollector::new();
        let result = ps(&collector).await.unwrap();

        assert!(result.is_success());
        let lines: Vec<&str> = result.output.lines().collect();
        assert!(lines[0].starts_with("PID"));
        assert!(lines[1].starts_with("---"));
        // header + separator + at most 20 rows
        assert!(lines.len() <= 2 + 20);
        assert!(lines.len() > 2);
    }

    #[tokio::test]
    async fn test_top_output_shape() {
        let collector = SystemCollector::new();
        let result = top(&collector).await.unwrap();

        assert!(result.is_success());
        assert!(result.output.starts_with("System Information:"));
        assert!(result.output.contains("CPU Usage:"));
        assert!(result.output.contains("Memory:"));
        assert!(result.output.contains("Disk:"));
        assert!(result.output.contains("Top Processes:"));

        let process_rows = result
            .output
            .lines()
            .filter(|l| l.contains("% CPU,"))
            .count();
        assert!(process_rows <= 10);
    }
}
