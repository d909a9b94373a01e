//! Outstanding forms of a session, keyed by form ID.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mcs_game::form::Form;

/// What the client sends when the player closes a form without answering.
pub const CANCELLED: &[u8] = b"null";

#[derive(Default)]
struct Pending {
    forms: HashMap<u32, Form>,
    // IDs in the order they were sent; IDs wrap, so this is not sorted.
    order: VecDeque<u32>,
}

impl Pending {
    fn remove(&mut self, id: u32) -> Option<Form> {
        let form = self.forms.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(form)
    }
}

pub struct FormCorrelator {
    pending: Mutex<Pending>,
    next_id: AtomicU32,
    max_pending: usize,
}

impl FormCorrelator {
    pub fn new(max_pending: usize) -> Self {
        Self::starting_at(max_pending, 0)
    }

    fn starting_at(max_pending: usize, first_id: u32) -> Self {
        Self {
            pending: Mutex::new(Pending::default()),
            next_id: AtomicU32::new(first_id),
            max_pending: max_pending.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `form` under a fresh ID. If the cap is reached the oldest
    /// outstanding form is dropped first; its ID is returned alongside.
    /// IDs wrap at `u32::MAX`, and a still pending form with a reused ID is
    /// replaced.
    pub fn register(&self, form: Form) -> (u32, Option<u32>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut pending = self.lock();
        let mut evicted = pending.remove(id).map(|_| id);
        if pending.forms.len() >= self.max_pending {
            if let Some(oldest) = pending.order.pop_front() {
                pending.forms.remove(&oldest);
                evicted = Some(oldest);
            }
        }
        pending.forms.insert(id, form);
        pending.order.push_back(id);
        (id, evicted)
    }

    /// Remove and return the form with `id`. A second call for the same ID
    /// returns `None`.
    pub fn take(&self, id: u32) -> Option<Form> {
        self.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.lock().forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().forms.is_empty()
    }
}

/// Whether a response payload means the form was closed.
pub fn is_cancelled(data: &[u8]) -> bool {
    data.trim_ascii() == CANCELLED
}
