//! Host behavior guard.
//!
//! While a lasso is active the host must not pan, start its own box
//! selection, or grab nodes under the pointer. The three flags are
//! captured together, overridden together, and restored together; the
//! snapshot is consumed by `restore`, so it cannot be applied twice.

use lariat_core::host::GraphHost;
use lariat_core::model::HostFlags;

/// Read the three flags.
pub fn snapshot<H: GraphHost + ?Sized>(host: &H) -> HostFlags {
    HostFlags {
        auto_ungrabify: host.auto_ungrabify(),
        user_panning_enabled: host.user_panning_enabled(),
        box_selection_enabled: host.box_selection_enabled(),
    }
}

/// Write all three flags.
pub fn apply<H: GraphHost + ?Sized>(host: &mut H, flags: HostFlags) {
    host.set_auto_ungrabify(flags.auto_ungrabify);
    host.set_user_panning_enabled(flags.user_panning_enabled);
    host.set_box_selection_enabled(flags.box_selection_enabled);
}

/// Capture the current flags and switch the host to `HostFlags::SUPPRESSED`.
#[must_use = "the snapshot is the only way back to the host's own settings"]
pub fn suppress<H: GraphHost + ?Sized>(host: &mut H) -> HostFlags {
    let saved = snapshot(host);
    apply(host, HostFlags::SUPPRESSED);
    log::debug!("host behavior suppressed (saved {saved:?})");
    saved
}

/// Put back a snapshot taken by `suppress`.
pub fn restore<H: GraphHost + ?Sized>(host: &mut H, saved: HostFlags) {
    apply(host, saved);
    log::debug!("host behavior restored to {saved:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use lariat_core::memory::MemoryHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn suppress_then_restore_roundtrip() {
        let mut host = MemoryHost::new(10.0, 10.0);
        host.user_panning_enabled = false;
        let before = snapshot(&host);

        let saved = suppress(&mut host);
        assert_eq!(saved, before);
        assert_eq!(snapshot(&host), HostFlags::SUPPRESSED);

        restore(&mut host, saved);
        assert_eq!(snapshot(&host), before);
    }

    #[test]
    fn flags_are_written_together() {
        let mut host = MemoryHost::new(10.0, 10.0);
        let saved = suppress(&mut host);
        assert_eq!(host.flag_writes, 3);
        restore(&mut host, saved);
        assert_eq!(host.flag_writes, 6);
    }
}
