//! barmon-sources: Reference monitor implementations for barmon.

mod cpu;
mod memory;

pub use cpu::CpuMonitor;
pub use memory::MemoryMonitor;

/// Register all built-in monitors with the global registry
pub fn register_all() {
    use barmon_core::global_registry;

    let mut registry = global_registry().write().unwrap_or_else(|poisoned| {
        log::warn!("Monitor registry lock was poisoned, recovering");
        poisoned.into_inner()
    });

    registry.register("cpu", "Cpu", || Box::new(CpuMonitor::new()));
    registry.register("memory", "Memory", || Box::new(MemoryMonitor::new()));
}
