// ============================================================
// Layer 5 - Backend Selection
// ============================================================
// Which Burn backend a command runs on. Single-character steps
// are tiny, so the CPU backend is the default; Wgpu is there
// for large models.

use serde::{Deserialize, Serialize};

pub type CpuBackend = burn::backend::NdArray;
pub type GpuBackend = burn::backend::Wgpu;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    #[default]
    Cpu,
    Wgpu,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu  => write!(f, "cpu (ndarray)"),
            Self::Wgpu => write!(f, "wgpu"),
        }
    }
}
