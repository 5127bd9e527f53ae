//! Insertion-ordered, id-keyed contribution tables

use crate::registry::types::{
    Command, LanguageAssociation, PanelContribution, SidebarContribution, StatusBarContribution,
};

/// Something stored in a contribution table
pub trait Contribution: Clone {
    fn id(&self) -> &str;

    /// Sort key; entries without an explicit order sort as 0
    fn order(&self) -> i32 {
        0
    }
}

impl Contribution for SidebarContribution {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}

impl Contribution for PanelContribution {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Contribution for StatusBarContribution {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}

impl Contribution for Command {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Contribution for LanguageAssociation {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Table keyed by contribution id that remembers insertion order
///
/// Re-registering an existing id replaces the entry in place, so it keeps
/// its original position among entries of equal order.
#[derive(Debug, Clone)]
pub struct ContributionTable<T> {
    entries: Vec<T>,
}

impl<T> Default for ContributionTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Contribution> ContributionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the entry that was replaced, if any
    pub fn upsert(&mut self, entry: T) -> Option<T> {
        match self.entries.iter_mut().find(|e| e.id() == entry.id()) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Entries sorted ascending by order; ties keep insertion order
    pub fn sorted(&self) -> Vec<T> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| entry.order());
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
