//! A single todo list and its items.

use serde::{Deserialize, Serialize};

use super::id::next_id;
use super::validation::validate_todo_name;
use super::{ListId, TodoId};
use crate::error::TodoError;
use crate::Result;

/// A named item with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

/// A named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
    /// Highest todo id ever issued in this list.
    #[serde(default)]
    last_todo_id: u64,
}

impl TodoList {
    /// Create an empty list. Callers are responsible for validating `name`.
    pub(crate) fn new(id: ListId, name: String) -> Self {
        Self {
            id,
            name,
            todos: Vec::new(),
            last_todo_id: 0,
        }
    }

    /// Add a todo with the given name to the end of the list.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn add_todo(&mut self, name: &str) -> Result<&Todo> {
        let name = name.trim();
        validate_todo_name(name)?;

        let id = next_id(self.todos.iter().map(|t| t.id.as_u64()), self.last_todo_id);
        self.last_todo_id = id;
        let index = self.todos.len();
        self.todos.push(Todo {
            id: TodoId::from_raw(id),
            name: name.to_string(),
            completed: false,
        });

        Ok(&self.todos[index])
    }

    /// Look up a todo by id.
    pub fn find_todo(&self, todo_id: TodoId) -> Result<&Todo> {
        self.todos
            .iter()
            .find(|t| t.id == todo_id)
            .ok_or_else(|| self.todo_not_found(todo_id))
    }

    /// Remove a todo, returning it.
    pub fn delete_todo(&mut self, todo_id: TodoId) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == todo_id)
            .ok_or_else(|| self.todo_not_found(todo_id))?;
        Ok(self.todos.remove(index))
    }

    /// Set the completion flag of one todo.
    pub fn set_todo_completed(&mut self, todo_id: TodoId, completed: bool) -> Result<()> {
        let list_id = self.id;
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or(TodoError::TodoNotFound { list_id, todo_id })?;
        todo.completed = completed;
        Ok(())
    }

    /// Mark every todo in the list as completed.
    pub fn complete_all(&mut self) {
        for todo in &mut self.todos {
            todo.completed = true;
        }
    }

    /// A list is complete when it has at least one todo and all are done.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.remaining_count() == 0
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.todos.len() - self.completed_count()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    fn todo_not_found(&self, todo_id: TodoId) -> TodoError {
        TodoError::TodoNotFound {
            list_id: self.id,
            todo_id,
        }
    }
}
