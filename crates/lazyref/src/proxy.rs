use crate::{
    error::{Error, FieldError, StoreError},
    key::Key,
    obs::{MetricsEvent, sink},
    store::StoreHandle,
    traits::{Entity, FieldValues},
    value::Value,
};
use parking_lot::{RwLock, RwLockWriteGuard};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

///
/// RefState
///
/// Resolution state of a reference. Transitions are monotonic: the only way
/// out of a terminal state is `invalidate`, which moves back to `Unloaded`.
///

enum RefState<E> {
    Unloaded,
    Resolved(E),
    Failed(StoreError),
}

impl<E> RefState<E> {
    const fn label(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Resolved(_) => "resolved",
            Self::Failed(_) => "failed",
        }
    }
}

///
/// LazyRef
///
/// A lazily resolved reference to one entity in a store.
///
/// The reference starts unloaded and contacts the store at most once: the
/// first accessor performs the lookup, and the outcome, instance or failure,
/// is held until `invalidate`. A remembered failure is re-raised verbatim by
/// every later accessor; retry is always an explicit `invalidate` followed
/// by a fresh access.
///
/// Resolution is race-safe. Accessors that arrive while a lookup is in
/// flight block until it completes and then share its outcome, so a burst of
/// first reads still produces a single store call. Reads of an already
/// resolved reference take a shared lock only for the duration of the
/// forwarded operation.
///
/// Equality and hashing are reference identity: entity type plus key. The
/// resolved instance never takes part, and comparing a reference against a
/// plain entity value is deliberately not defined.
///
/// Share one reference across threads with `Arc`. A closure passed to `with`
/// or `with_mut` must not call back into the same reference; doing so can
/// deadlock.
///

pub struct LazyRef<E: Entity> {
    key: E::PrimaryKey,
    store: StoreHandle<E>,
    state: RwLock<RefState<E>>,
}

impl<E: Entity> LazyRef<E> {
    /// Create an unloaded reference. The store is not contacted.
    pub const fn new(key: E::PrimaryKey, store: StoreHandle<E>) -> Self {
        Self {
            key,
            store,
            state: RwLock::new(RefState::Unloaded),
        }
    }

    /// Create a reference that starts out resolved with `entity`.
    ///
    /// No lookup runs unless the reference is later invalidated; the key is
    /// taken from the instance.
    pub fn preloaded(entity: E, store: StoreHandle<E>) -> Self {
        Self {
            key: entity.primary_key(),
            store,
            state: RwLock::new(RefState::Resolved(entity)),
        }
    }

    /// The typed key this reference points at.
    pub const fn primary_key(&self) -> &E::PrimaryKey {
        &self.key
    }

    /// Normalized runtime form of the key.
    pub fn key(&self) -> Key {
        self.key.clone().into()
    }

    /// Path of the referenced entity type.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        E::PATH
    }

    /// True when the reference holds a terminal state, either an instance or
    /// a remembered failure. Never triggers resolution.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !matches!(&*self.state.read(), RefState::Unloaded)
    }

    /// True when the reference remembers a failed lookup. Never triggers
    /// resolution.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(&*self.state.read(), RefState::Failed(_))
    }

    /// Resolve the reference if it is unloaded.
    ///
    /// Idempotent: on a terminal state this returns the remembered outcome
    /// without contacting the store.
    pub fn resolve(&self) -> Result<(), StoreError> {
        self.with_state(|_| ())
    }

    /// Read one field of the resolved instance by name.
    pub fn get(&self, field: &str) -> Result<Value, Error> {
        match self.with_state(|entity| entity.get_value(field))? {
            Some(value) => Ok(value),
            None => Err(FieldError::unknown(field).into()),
        }
    }

    /// Write one field of the resolved instance by name.
    ///
    /// The write lands on the cached instance; the store row is untouched.
    pub fn set(&self, field: &str, value: &Value) -> Result<(), Error> {
        let outcome = self.with_state_mut(|entity| entity.try_set_value(field, value))?;
        outcome.map_err(Error::from)
    }

    /// Run a closure against the resolved instance.
    ///
    /// The closure's result passes through unchanged; errors it produces are
    /// the caller's to handle and are never remembered by the reference.
    pub fn with<R>(&self, f: impl FnOnce(&E) -> R) -> Result<R, StoreError> {
        self.with_state(f)
    }

    /// Run a closure against the resolved instance with mutable access.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut E) -> R) -> Result<R, StoreError> {
        self.with_state_mut(f)
    }

    /// Clone the resolved instance out of the reference.
    pub fn snapshot(&self) -> Result<E, StoreError> {
        self.with_state(Clone::clone)
    }

    /// Discard any cached instance or remembered failure.
    ///
    /// The next accessor performs a fresh lookup. A no-op on an unloaded
    /// reference.
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        if !matches!(&*state, RefState::Unloaded) {
            *state = RefState::Unloaded;
            sink::record(MetricsEvent::Invalidate {
                entity_path: E::PATH,
            });
        }
    }

    /// Run the one store lookup and record its outcome.
    fn fetch(&self) -> RefState<E> {
        match self.store.find(&self.key) {
            Ok(entity) => {
                sink::record(MetricsEvent::ResolveOk {
                    entity_path: E::PATH,
                });
                RefState::Resolved(entity)
            }
            Err(err) => {
                sink::record(MetricsEvent::ResolveFail {
                    entity_path: E::PATH,
                    not_found: err.is_not_found(),
                });
                RefState::Failed(err)
            }
        }
    }

    /// Shared-access core: resolve if needed, then apply `f`.
    fn with_state<R>(&self, f: impl FnOnce(&E) -> R) -> Result<R, StoreError> {
        // fast path: the reference is already terminal
        {
            let state = self.state.read();
            match &*state {
                RefState::Unloaded => {}
                RefState::Resolved(entity) => {
                    sink::record(MetricsEvent::StateHit {
                        entity_path: E::PATH,
                    });
                    return Ok(f(entity));
                }
                RefState::Failed(err) => {
                    sink::record(MetricsEvent::StateHit {
                        entity_path: E::PATH,
                    });
                    return Err(err.clone());
                }
            }
        }

        // slow path: whoever wins the write lock performs the one lookup;
        // racers block here, re-check, and share the outcome.
        let mut state = self.state.write();
        if matches!(&*state, RefState::Unloaded) {
            *state = self.fetch();
        } else {
            sink::record(MetricsEvent::StateHit {
                entity_path: E::PATH,
            });
        }

        // downgrade keeps the state pinned between transition and access
        let state = RwLockWriteGuard::downgrade(state);
        match &*state {
            RefState::Resolved(entity) => Ok(f(entity)),
            RefState::Failed(err) => Err(err.clone()),
            RefState::Unloaded => Err(StoreError::invariant(
                "reference state must be terminal after a store lookup",
            )),
        }
    }

    /// Exclusive-access core: resolve if needed, then apply `f` mutably.
    fn with_state_mut<R>(&self, f: impl FnOnce(&mut E) -> R) -> Result<R, StoreError> {
        let mut state = self.state.write();
        if matches!(&*state, RefState::Unloaded) {
            *state = self.fetch();
        } else {
            sink::record(MetricsEvent::StateHit {
                entity_path: E::PATH,
            });
        }

        match &mut *state {
            RefState::Resolved(entity) => Ok(f(entity)),
            RefState::Failed(err) => Err(err.clone()),
            RefState::Unloaded => Err(StoreError::invariant(
                "reference state must be terminal after a store lookup",
            )),
        }
    }
}

impl<E: Entity> fmt::Debug for LazyRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_read so a reference is printable from inside its own closure
        let state = self
            .state
            .try_read()
            .map_or("busy", |guard| guard.label());

        f.debug_struct("LazyRef")
            .field("path", &E::PATH)
            .field("key", &self.key)
            .field("state", &state)
            .finish()
    }
}

impl<E: Entity> fmt::Display for LazyRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", E::PATH, self.key())
    }
}

impl<E: Entity> PartialEq for LazyRef<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E: Entity> Eq for LazyRef<E> {}

impl<E: Entity> Hash for LazyRef<E>
where
    E::PrimaryKey: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

///
/// TESTS
///
