use thiserror::Error;

/// Fatal conditions reported by the frame scheduler
///
/// Rendering itself never fails; the platform layer is expected to restart the
/// device when it receives one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BootError {
    #[error("no valid time after {waited_s} s, restart required")]
    TimeSyncTimeout { waited_s: u64 },
}
