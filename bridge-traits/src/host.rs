//! Host Surface Abstraction
//!
//! Reports what the current platform can do: whether a credential store
//! exists at all, and whether a foreground interactive surface is available
//! right now. Credential pickers are system UI and can only be shown over a
//! foreground surface, so its absence is a precondition failure rather than
//! something to wait for.

/// Host platform capability queries.
pub trait HostSurface: Send + Sync {
    /// Whether this platform ships a usable credential store.
    ///
    /// `false` puts the whole facade into graceful-degradation mode: every
    /// operation except availability checks fails with an
    /// unsupported-platform error without touching any collaborator.
    fn credential_store_supported(&self) -> bool;

    /// Whether a foreground interactive surface exists at this moment.
    fn has_foreground(&self) -> bool;
}

/// A [`HostSurface`] with fixed answers.
///
/// Handy for hosts whose capabilities never change at runtime, and for
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticHostSurface {
    pub supported: bool,
    pub foreground: bool,
}

impl StaticHostSurface {
    /// A platform with a credential store and a foreground surface.
    pub fn available() -> Self {
        Self {
            supported: true,
            foreground: true,
        }
    }

    /// A platform without credential store support.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            foreground: false,
        }
    }
}

impl HostSurface for StaticHostSurface {
    fn credential_store_supported(&self) -> bool {
        self.supported
    }

    fn has_foreground(&self) -> bool {
        self.foreground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_surface_answers() {
        let available = StaticHostSurface::available();
        assert!(available.credential_store_supported());
        assert!(available.has_foreground());

        let unsupported = StaticHostSurface::unsupported();
        assert!(!unsupported.credential_store_supported());
        assert!(!unsupported.has_foreground());
    }
}
