//! Handler registry keyed by packet identity.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

use codec::Packet;
use schema::Phase;
use tracing::error;

/// Identity a handler is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKey {
    /// A known clientbound packet in the given phase.
    Known(Phase, i32),
    /// Packets with no matching schema.
    Unknown,
}

impl PacketKey {
    /// Returns the key a decoded packet dispatches under.
    #[must_use]
    pub fn of(packet: &Packet) -> Self {
        match packet {
            Packet::Known(known) => Self::Known(known.phase, known.id),
            Packet::Unknown(_) => Self::Unknown,
        }
    }
}

/// A registered callback.
pub type Callback = Box<dyn FnMut(&Packet) + Send>;

/// Number of invocations a handler has left. `-1` means unlimited.
pub const UNLIMITED: i32 = -1;

struct Entry {
    remaining: i32,
    callback: Callback,
}

/// Ordered per-key handler lists with remaining-invocation counters.
///
/// Handlers for one key run in registration order on every arrival.
/// Counters decrement durably; exhausted entries are skipped and pruned.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: HashMap<PacketKey, Vec<Entry>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `key` for `times` invocations.
    ///
    /// `times` of [`UNLIMITED`] never exhausts; `times` of zero or less
    /// than `-1` registers an entry that never runs.
    pub fn on(&mut self, key: PacketKey, callback: Callback, times: i32) {
        self.entries.entry(key).or_default().push(Entry {
            remaining: times,
            callback,
        });
    }

    /// Registers a one-shot handler.
    pub fn once(&mut self, key: PacketKey, callback: Callback) {
        self.on(key, callback, 1);
    }

    /// Returns the number of live handlers under `key`.
    #[must_use]
    pub fn live_handlers(&self, key: PacketKey) -> usize {
        self.entries
            .get(&key)
            .map(|entries| entries.iter().filter(|entry| entry.remaining != 0).count())
            .unwrap_or(0)
    }
}

/// Invokes every live handler registered for `packet`, in insertion order.
///
/// The registry lock is released while callbacks run, so handlers may
/// register further handlers; those become visible from the next arrival.
/// A panicking handler is reported and does not stop dispatch. Returns the
/// number of handlers invoked.
pub fn dispatch(registry: &Mutex<HandlerRegistry>, packet: &Packet) -> usize {
    let key = PacketKey::of(packet);

    let mut taken = {
        let mut guard = registry.lock().unwrap();
        match guard.entries.get_mut(&key) {
            Some(entries) => std::mem::take(entries),
            None => return 0,
        }
    };

    let mut invoked = 0;
    for entry in &mut taken {
        if entry.remaining == 0 {
            continue;
        }
        if entry.remaining > 0 {
            entry.remaining -= 1;
        }
        invoked += 1;
        if catch_unwind(AssertUnwindSafe(|| (entry.callback)(packet))).is_err() {
            error!(id = packet.id(), "packet handler panicked");
        }
    }

    // Put the surviving entries back, ahead of any handlers that were
    // registered while the callbacks ran.
    taken.retain(|entry| entry.remaining != 0);
    let mut guard = registry.lock().unwrap();
    let slot = guard.entries.entry(key).or_default();
    let added_during_dispatch = std::mem::replace(slot, taken);
    slot.extend(added_during_dispatch);

    invoked
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::UnknownPacket;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unknown_packet(id: i32) -> Packet {
        Packet::Unknown(UnknownPacket {
            id,
            data: Vec::new(),
        })
    }

    fn known_key() -> PacketKey {
        PacketKey::Known(Phase::Play, 0x24)
    }

    #[test]
    fn unlimited_handler_runs_every_time() {
        let registry = Mutex::new(HandlerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            registry.lock().unwrap().on(
                PacketKey::Unknown,
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
                UNLIMITED,
            );
        }

        for _ in 0..5 {
            dispatch(&registry, &unknown_packet(0xFE));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn counted_handler_exhausts_durably() {
        let registry = Mutex::new(HandlerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            registry.lock().unwrap().on(
                PacketKey::Unknown,
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
                3,
            );
        }

        for _ in 0..10 {
            dispatch(&registry, &unknown_packet(0xFE));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(registry.lock().unwrap().live_handlers(PacketKey::Unknown), 0);
    }

    #[test]
    fn once_is_one_shot() {
        let registry = Mutex::new(HandlerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            registry.lock().unwrap().once(
                PacketKey::Unknown,
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        assert_eq!(dispatch(&registry, &unknown_packet(1)), 1);
        assert_eq!(dispatch(&registry, &unknown_packet(1)), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handlers_run_in_insertion_order() {
        let registry = Mutex::new(HandlerRegistry::new());
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..3 {
            let order = order.clone();
            registry.lock().unwrap().on(
                PacketKey::Unknown,
                Box::new(move |_| order.lock().unwrap().push(tag)),
                UNLIMITED,
            );
        }

        dispatch(&registry, &unknown_packet(0));
        dispatch(&registry, &unknown_packet(0));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn keys_are_namespaced_by_phase_and_id() {
        let registry = Mutex::new(HandlerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            registry.lock().unwrap().on(
                known_key(),
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
                UNLIMITED,
            );
        }

        // An unknown packet with the same numeric id does not match.
        dispatch(&registry, &unknown_packet(0x24));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handler_may_register_another_handler() {
        let registry = Arc::new(Mutex::new(HandlerRegistry::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let registry = registry.clone();
            let calls = calls.clone();
            let outer_registry = registry.clone();
            outer_registry.lock().unwrap().once(
                PacketKey::Unknown,
                Box::new(move |_| {
                    let calls = calls.clone();
                    registry.lock().unwrap().on(
                        PacketKey::Unknown,
                        Box::new(move |_| {
                            calls.fetch_add(1, Ordering::SeqCst);
                        }),
                        UNLIMITED,
                    );
                }),
            );
        }

        // First arrival runs the registering handler only.
        dispatch(&registry, &unknown_packet(0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // The nested handler is live from the next arrival.
        dispatch(&registry, &unknown_packet(0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_handler_does_not_stop_dispatch() {
        let registry = Mutex::new(HandlerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        registry.lock().unwrap().on(
            PacketKey::Unknown,
            Box::new(|_| panic!("boom")),
            UNLIMITED,
        );
        {
            let calls = calls.clone();
            registry.lock().unwrap().on(
                PacketKey::Unknown,
                Box::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }),
                UNLIMITED,
            );
        }

        let invoked = dispatch(&registry, &unknown_packet(9));
        assert_eq!(invoked, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
