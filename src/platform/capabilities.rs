/*!
 * Platform Capabilities
 *
 * Compile-time facts about the target, with the numeric codes the managed
 * side of the runtime expects.
 */

use serde::{Deserialize, Serialize};

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum OsFamily {
    Unknown = 0,
    MacOsX = 1,
    Ios = 2,
    Linux = 3,
    Windows = 4,
    Android = 5,
    Wasm = 6,
    TvOs = 7,
    WatchOs = 8,
}

impl OsFamily {
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            OsFamily::MacOsX
        } else if cfg!(target_os = "ios") {
            OsFamily::Ios
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else if cfg!(target_os = "android") {
            OsFamily::Android
        } else if cfg!(target_family = "wasm") {
            OsFamily::Wasm
        } else if cfg!(target_os = "tvos") {
            OsFamily::TvOs
        } else if cfg!(target_os = "watchos") {
            OsFamily::WatchOs
        } else {
            OsFamily::Unknown
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum CpuArchitecture {
    Unknown = 0,
    Arm32 = 1,
    Arm64 = 2,
    X86 = 3,
    X64 = 4,
    Mips32 = 5,
    Mipsel32 = 6,
    Wasm32 = 7,
}

impl CpuArchitecture {
    pub const fn current() -> Self {
        if cfg!(target_arch = "arm") {
            CpuArchitecture::Arm32
        } else if cfg!(target_arch = "aarch64") {
            CpuArchitecture::Arm64
        } else if cfg!(target_arch = "x86") {
            CpuArchitecture::X86
        } else if cfg!(target_arch = "x86_64") {
            CpuArchitecture::X64
        } else if cfg!(all(target_arch = "mips", target_endian = "big")) {
            CpuArchitecture::Mips32
        } else if cfg!(all(target_arch = "mips", target_endian = "little")) {
            CpuArchitecture::Mipsel32
        } else if cfg!(target_arch = "wasm32") {
            CpuArchitecture::Wasm32
        } else {
            CpuArchitecture::Unknown
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Memory model the runtime was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MemoryModel {
    Strict = 0,
    Relaxed = 1,
}

impl MemoryModel {
    /// Strict unless built with the `relaxed-memory-model` feature
    pub const fn current() -> Self {
        if cfg!(feature = "relaxed-memory-model") {
            MemoryModel::Relaxed
        } else {
            MemoryModel::Strict
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, MemoryModel::Strict)
    }
}

/// Snapshot of the target's capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlatformInfo {
    pub os_family: OsFamily,
    pub cpu_architecture: CpuArchitecture,
    pub little_endian: bool,
    pub unaligned_access: bool,
    pub debug_binary: bool,
    pub memory_model: MemoryModel,
}

impl PlatformInfo {
    pub const fn current() -> Self {
        Self {
            os_family: OsFamily::current(),
            cpu_architecture: CpuArchitecture::current(),
            little_endian: is_little_endian(),
            unaligned_access: can_access_unaligned(),
            debug_binary: is_debug_binary(),
            memory_model: MemoryModel::current(),
        }
    }
}

#[inline]
pub const fn is_little_endian() -> bool {
    cfg!(target_endian = "little")
}

/// Whether unaligned loads and stores are safe on this target
#[inline]
pub const fn can_access_unaligned() -> bool {
    cfg!(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
}

/// Whether this is a debug build; leak checkers default to this
#[inline]
pub const fn is_debug_binary() -> bool {
    cfg!(debug_assertions)
}
