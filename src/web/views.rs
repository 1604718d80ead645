//! HTML rendering.
//!
//! Pages are built as plain strings around a shared layout. Every piece of
//! user-supplied text is escaped with `html_escape` before it is written.

use std::borrow::Cow;
use std::fmt::Write;

use crate::session::Flash;
use crate::todo::{sorted_view, Lists, TodoList};

/// Delete forms are submitted in the background by `application.js`.
const JQUERY_URL: &str = "https://code.jquery.com/jquery-3.7.1.min.js";

/// Running text inside an element.
fn text(raw: &str) -> Cow<'_, str> {
    html_escape::encode_safe(raw)
}

/// The value of a double-quoted attribute.
fn attr(raw: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(raw)
}

/// ` class="complete"` for finished items, nothing otherwise.
fn complete_class(done: bool) -> &'static str {
    if done {
        r#" class="complete""#
    } else {
        ""
    }
}

fn layout(title: &str, flash: &Flash, content: &str) -> String {
    let mut messages = String::new();
    if let Some(error) = flash.error() {
        let _ = write!(
            messages,
            r#"<div class="flash error"><p>{}</p></div>"#,
            text(error)
        );
    }
    if let Some(success) = flash.success() {
        let _ = write!(
            messages,
            r#"<div class="flash success"><p>{}</p></div>"#,
            text(success)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{JQUERY_URL}"></script>
<script src="/javascripts/application.js"></script>
</head>
<body>
<header><h1><a href="/lists">Todo Tracker</a></h1></header>
<main>
{messages}
{content}
</main>
</body>
</html>
"#,
        title = text(title),
    )
}

/// `GET /lists`
pub fn lists_page(lists: &Lists, flash: &Flash) -> String {
    let mut items = String::new();
    for list in sorted_view(lists) {
        let _ = write!(
            items,
            r#"<li{class}><a href="/lists/{id}"><h2>{name}</h2><p>{done} / {total}</p></a></li>"#,
            class = complete_class(list.is_complete()),
            id = list.id,
            name = text(&list.name),
            done = list.completed_count(),
            total = list.len(),
        );
    }

    let content = format!(
        r#"<section id="lists">
<ul>{items}</ul>
</section>
<p><a class="add" href="/lists/new">New List</a></p>"#
    );
    layout("Todo Lists", flash, &content)
}

/// `GET /lists/new`, and the re-render after a rejected create.
pub fn new_list_page(flash: &Flash, entered: &str) -> String {
    let content = format!(
        r#"<form action="/lists" method="post">
<dl>
<dt><label for="list_name">Enter the name for your new list:</label></dt>
<dd><input id="list_name" name="list_name" placeholder="List Name" type="text" value="{value}"></dd>
</dl>
<fieldset class="actions">
<input type="submit" value="Save">
<a href="/lists">Cancel</a>
</fieldset>
</form>"#,
        value = attr(entered),
    );
    layout("New List", flash, &content)
}

/// `GET /lists/{id}`, and the re-render after a rejected todo.
pub fn list_page(list: &TodoList, flash: &Flash, entered_todo: &str) -> String {
    let id = list.id;
    let mut rows = String::new();
    for todo in sorted_view(&list.todos) {
        let next = if todo.completed { "false" } else { "true" };
        let _ = write!(
            rows,
            r#"<li{class}>
<form action="/lists/{id}/todos/{todo_id}" method="post" class="check">
<input type="hidden" name="completed" value="{next}"><button type="submit">Toggle</button>
</form>
<h3>{name}</h3>
<form action="/lists/{id}/todos/{todo_id}/delete" method="post" class="delete">
<button type="submit">Delete</button>
</form>
</li>"#,
            class = complete_class(todo.completed),
            todo_id = todo.id,
            name = text(&todo.name),
        );
    }

    let content = format!(
        r#"<section id="todos"{section_class}>
<header>
<h2>{name}</h2>
<ul>
<li><form action="/lists/{id}/complete_all" method="post"><button class="check" type="submit">Complete All</button></form></li>
<li><a class="edit" href="/lists/{id}/edit">Edit List</a></li>
</ul>
</header>
<ul>{rows}</ul>
</section>
<form action="/lists/{id}/todos" method="post">
<dl>
<dt><label for="todo">Enter a new todo item:</label></dt>
<dd><input id="todo" name="todo" placeholder="Something to do" type="text" value="{value}"></dd>
</dl>
<fieldset class="actions"><input type="submit" value="Add"></fieldset>
</form>
<p><a href="/lists">All Lists</a></p>"#,
        section_class = complete_class(list.is_complete()),
        name = text(&list.name),
        value = attr(entered_todo),
    );
    layout(&list.name, flash, &content)
}

/// `GET /lists/{id}/edit`, and the re-render after a rejected rename.
pub fn edit_list_page(list: &TodoList, flash: &Flash, entered: &str) -> String {
    let content = format!(
        r#"<section>
<h2>Editing '{name}'</h2>
<form action="/lists/{id}" method="post">
<dl>
<dt><label for="list_name">Enter the new name for the list:</label></dt>
<dd><input id="list_name" name="list_name" placeholder="List Name" type="text" value="{value}"></dd>
</dl>
<fieldset class="actions">
<input type="submit" value="Save">
<a href="/lists/{id}">Cancel</a>
</fieldset>
</form>
<form action="/lists/{id}/delete" method="post" class="delete">
<button type="submit">Delete List</button>
</form>
</section>"#,
        id = list.id,
        name = text(&list.name),
        value = attr(entered),
    );
    layout("Edit List", flash, &content)
}
