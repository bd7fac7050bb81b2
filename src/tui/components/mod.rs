// Components module - form building blocks
//
// Each component is a focused, single-responsibility module:
// - Text field: editable name input
// - Results list: the entries of the search on screen
// - Logs panel: system log entries
// - Status bar: bound identity and form state
// - Toast: short-lived notifications

pub mod logs_panel;
pub mod results_list;
pub mod scrollbar;
pub mod status_bar;
pub mod text_field;
pub mod toast;

pub use results_list::ResultsList;
pub use text_field::TextField;
pub use toast::Toast;
