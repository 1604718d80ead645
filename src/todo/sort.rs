//! Display ordering: incomplete items first, complete items last.

use super::{Todo, TodoList};

/// Anything that can be complete or incomplete.
pub trait Completion {
    fn is_done(&self) -> bool;
}

impl Completion for Todo {
    fn is_done(&self) -> bool {
        self.completed
    }
}

impl Completion for TodoList {
    fn is_done(&self) -> bool {
        self.is_complete()
    }
}

/// Borrow `items` in display order.
///
/// Incomplete items come first, complete items after; each group keeps
/// its storage order. The underlying slice is never reordered.
pub fn sorted_view<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Completion + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (done, mut pending): (Vec<&T>, Vec<&T>) = items.into_iter().partition(|i| i.is_done());
    pending.extend(done);
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{ListId, Lists, TodoId};

    fn todo(id: u64, completed: bool) -> Todo {
        Todo {
            id: TodoId::from_raw(id),
            name: format!("todo {id}"),
            completed,
        }
    }

    #[test]
    fn test_incomplete_first_stable() {
        let todos = vec![
            todo(1, true),
            todo(2, false),
            todo(3, true),
            todo(4, false),
        ];

        let order: Vec<u64> = sorted_view(&todos).iter().map(|t| t.id.as_u64()).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);

        // Storage order untouched
        let stored: Vec<u64> = todos.iter().map(|t| t.id.as_u64()).collect();
        assert_eq!(stored, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty() {
        let todos: Vec<Todo> = Vec::new();
        assert!(sorted_view(&todos).is_empty());
    }

    #[test]
    fn test_lists_sorted_by_completion() {
        let mut lists = Lists::new();
        lists.create("done").unwrap();
        lists.create("empty").unwrap();
        lists.create("open").unwrap();

        let done = lists.find_mut(ListId::from_raw(1)).unwrap();
        done.add_todo("x").unwrap();
        done.complete_all();
        lists
            .find_mut(ListId::from_raw(3))
            .unwrap()
            .add_todo("y")
            .unwrap();

        let names: Vec<&str> = sorted_view(&lists).iter().map(|l| l.name.as_str()).collect();
        // Empty lists are not complete
        assert_eq!(names, vec!["empty", "open", "done"]);
    }
}
