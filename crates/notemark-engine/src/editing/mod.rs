/*!
 * # Editing
 *
 * In-place edits of Markdown source text. Edits never re-render the
 * document from parsed elements: they locate the source line an element came
 * from and change only the bytes that encode the edited state.
 *
 * ## Module Structure
 *
 * - **`tasks`**: task-list checkbox toggling ([`tasks::TaskPatcher`])
 */

pub mod tasks;

pub use tasks::{TaskItem, TaskPatcher, ToggleError};
