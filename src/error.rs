//! Construction-time errors.
//!
//! Per-frame operations are total; only building a component from bad
//! parameters, or bringing up the GPU, can fail.

use std::fmt;

/// Invalid configuration detected while building a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A quantity that must be strictly positive was zero or negative.
    NonPositive { field: &'static str, value: f32 },
    /// A quantity was NaN or infinite.
    NonFinite { field: &'static str },
    /// A `[min, max)` range had `min >= max`.
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A count that must be at least one was zero.
    ZeroCount { field: &'static str },
    /// A time-to-live or interval was zero.
    ZeroDuration { field: &'static str },
    /// A flat position buffer did not split into `(x, y, z)` triples.
    BufferNotTriples { len: usize },
    /// A flat position buffer held fewer values than required.
    BufferTooSmall { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be > 0, got {}", field, value)
            }
            ConfigError::NonFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::EmptyRange { field, min, max } => {
                write!(f, "{} range is empty: [{}, {})", field, min, max)
            }
            ConfigError::ZeroCount { field } => write!(f, "{} must be at least 1", field),
            ConfigError::ZeroDuration { field } => write!(f, "{} must be longer than 0ms", field),
            ConfigError::BufferNotTriples { len } => write!(
                f,
                "position buffer length {} is not a multiple of 3",
                len
            ),
            ConfigError::BufferTooSmall { expected, actual } => write!(
                f,
                "position buffer too small: expected {} values, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// GPU initialisation failure.
#[derive(Debug)]
pub enum GpuError {
    CreateSurface(wgpu::CreateSurfaceError),
    NoAdapter,
    RequestDevice(wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::CreateSurface(e) => write!(f, "failed to create surface: {}", e),
            GpuError::NoAdapter => write!(f, "failed to find suitable GPU adapter"),
            GpuError::RequestDevice(e) => write!(f, "failed to request device: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "surface supports no texture formats"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::CreateSurface(e) => Some(e),
            GpuError::RequestDevice(e) => Some(e),
            GpuError::NoAdapter | GpuError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::CreateSurface(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::RequestDevice(e)
    }
}

/// Reject zero, negative and non-finite values.
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

/// Reject non-finite values only (zero and negatives allowed).
pub(crate) fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}
