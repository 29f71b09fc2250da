//! The currently expressed attribute.
//!
//! There is one `SelectionState` per map session. It is passed explicitly to
//! whoever needs it; dependents subscribe and are called synchronously, in
//! subscription order, every time `set` runs.

use crate::attribute::AttributeName;
use crate::error::SelectionError;
use log::debug;
use std::fmt;

type Subscriber = Box<dyn FnMut(AttributeName)>;

pub struct SelectionState {
    expressed: AttributeName,
    subscribers: Vec<Subscriber>,
}

impl SelectionState {
    pub fn new(initial: AttributeName) -> Self {
        Self {
            expressed: initial,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> AttributeName {
        self.expressed
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(AttributeName) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Select `attr` and notify every subscriber.
    ///
    /// Selecting the current attribute again still notifies; dependents
    /// recompute unconditionally.
    pub fn set(&mut self, attr: AttributeName) {
        debug!("[EMIG] selection: {} -> {}", self.expressed, attr);
        self.expressed = attr;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(attr);
        }
    }

    /// Select by column name. Unknown names are rejected and nothing is notified.
    pub fn set_by_name(&mut self, name: &str) -> Result<AttributeName, SelectionError> {
        let attr: AttributeName = name.parse()?;
        self.set(attr);
        Ok(attr)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(AttributeName::default())
    }
}

impl fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("expressed", &self.expressed)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
