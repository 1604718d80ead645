//! The per-session collection of lists.

use serde::{Deserialize, Serialize};

use super::id::next_id;
use super::validation::{validate_list_name, validate_list_name_except};
use super::{ListId, TodoList};
use crate::error::TodoError;
use crate::Result;

/// All lists owned by one session, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lists {
    lists: Vec<TodoList>,
    /// Highest list id ever issued.
    #[serde(default)]
    last_id: u64,
}

impl Lists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty list.
    ///
    /// The name is trimmed, then checked for length and uniqueness. On
    /// error the collection is left untouched.
    pub fn create(&mut self, name: &str) -> Result<&TodoList> {
        let name = name.trim();
        validate_list_name(name, &self.lists)?;

        let id = next_id(self.lists.iter().map(|l| l.id.as_u64()), self.last_id);
        self.last_id = id;
        let index = self.lists.len();
        self.lists
            .push(TodoList::new(ListId::from_raw(id), name.to_string()));

        Ok(&self.lists[index])
    }

    /// Look up a list by id.
    pub fn find(&self, id: ListId) -> Result<&TodoList> {
        self.lists
            .iter()
            .find(|l| l.id == id)
            .ok_or(TodoError::ListNotFound(id))
    }

    /// Look up a list by id for mutation.
    pub fn find_mut(&mut self, id: ListId) -> Result<&mut TodoList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(TodoError::ListNotFound(id))
    }

    /// Rename a list after validating the trimmed name.
    pub fn rename(&mut self, id: ListId, name: &str) -> Result<()> {
        let name = name.trim();
        // Existence is reported before validation problems.
        self.find(id)?;
        validate_list_name_except(name, &self.lists, id)?;

        self.find_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Remove a list, returning it.
    pub fn delete(&mut self, id: ListId) -> Result<TodoList> {
        let index = self
            .lists
            .iter()
            .position(|l| l.id == id)
            .ok_or(TodoError::ListNotFound(id))?;
        Ok(self.lists.remove(index))
    }

    pub fn as_slice(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoList> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<'a> IntoIterator for &'a Lists {
    type Item = &'a TodoList;
    type IntoIter = std::slice::Iter<'a, TodoList>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
