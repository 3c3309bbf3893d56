//! Identity and dirty-tracking shared by every catalog resource.
//!
//! A resource carries two names: the one the caller wants (`desired`) and
//! the one the server is believed to know it by (`confirmed`). Server
//! lookups that must find the existing object use the confirmed name;
//! writes that establish the new state use the desired name.

use serde::Serialize;

/// Desired and confirmed names of a catalog resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    #[serde(rename = "name")]
    desired: String,
    #[serde(rename = "previous_name")]
    confirmed: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            confirmed: name.clone(),
            desired: name,
        }
    }

    /// The name the caller wants the resource to have.
    pub fn desired(&self) -> &str {
        &self.desired
    }

    /// The name the resource was last known by.
    pub fn confirmed(&self) -> &str {
        &self.confirmed
    }

    pub fn is_renamed(&self) -> bool {
        self.desired != self.confirmed
    }

    /// Shifts the current desired name into `confirmed`. Returns false when
    /// `name` equals the current desired name, in which case nothing moves.
    fn rename(&mut self, name: String) -> bool {
        if name == self.desired {
            return false;
        }
        self.confirmed = std::mem::replace(&mut self.desired, name);
        true
    }

    fn restore(&mut self) {
        self.desired = self.confirmed.clone();
    }
}

/// Identity plus the persisted flag.
///
/// Every mutator is crate-private: callers can read the state of a resource
/// but only hydration, field setters and the sync engine can change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState {
    #[serde(flatten)]
    identity: Identity,
    persisted: bool,
}

impl ResourceState {
    /// State for an entity built locally and not yet written.
    pub(crate) fn local(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            persisted: false,
        }
    }

    /// State for an entity built from a server response.
    pub(crate) fn hydrated(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            persisted: true,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub(crate) fn rename(&mut self, name: String) {
        if self.identity.rename(name) {
            self.persisted = false;
        }
    }

    /// Writes `value` into `slot`, clearing the persisted flag only when the
    /// value actually changes.
    pub(crate) fn assign<V: PartialEq>(&mut self, slot: &mut V, value: V) {
        if *slot != value {
            *slot = value;
            self.persisted = false;
        }
    }

    /// Runs `edit` against `slot` and clears the persisted flag if the
    /// edit left it different from before.
    pub(crate) fn edit<V: PartialEq + Clone>(&mut self, slot: &mut V, edit: impl FnOnce(&mut V)) {
        let before = slot.clone();
        edit(slot);
        if *slot != before {
            self.persisted = false;
        }
    }

    /// Called after a successful delete: the entity no longer matches
    /// anything live and goes back to its last confirmed name.
    pub(crate) fn detach(&mut self) {
        self.identity.restore();
        self.persisted = false;
    }
}

pub(crate) mod sealed {
    /// Mutable access to a resource's state, kept out of reach of callers.
    pub trait StateMut {
        fn state_mut(&mut self) -> &mut super::ResourceState;
    }
}

/// Capability shared by workspaces, data stores, layers and styles.
pub trait Resource: sealed::StateMut {
    fn state(&self) -> &ResourceState;

    fn name(&self) -> &str {
        self.state().identity().desired()
    }

    /// Name the server knows this resource by (equal to `name` until a
    /// rename is made locally).
    fn previous_name(&self) -> &str {
        self.state().identity().confirmed()
    }

    fn is_persisted(&self) -> bool {
        self.state().is_persisted()
    }

    fn set_name(&mut self, name: impl Into<String>)
    where
        Self: Sized,
    {
        self.state_mut().rename(name.into());
    }
}
