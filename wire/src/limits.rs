//! Configurable limits for bounded frame decoding.

/// Limits enforced while decoding frames.
///
/// Length prefixes come straight off the network, so they are validated
/// against these limits before any allocation or buffering happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum frame body size in bytes (compressed or not).
    pub max_frame_bytes: usize,

    /// Maximum size a compressed body may inflate to.
    pub max_inflated_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // The protocol caps packets at 2^21 bytes.
            max_frame_bytes: 2 * 1024 * 1024,
            max_inflated_bytes: 8 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
            max_inflated_bytes: 16 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_protocol_cap() {
        let limits = Limits::default();
        assert_eq!(limits.max_frame_bytes, 1 << 21);
    }

    #[test]
    fn testing_limits_smaller() {
        let test = Limits::for_testing();
        let default = Limits::default();
        assert!(test.max_frame_bytes < default.max_frame_bytes);
        assert!(test.max_inflated_bytes < default.max_inflated_bytes);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_frame_bytes, 4096);
    }
}
