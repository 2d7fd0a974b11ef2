pub mod actions;
pub mod app;
pub mod column_dialog;
pub mod pagination;
pub mod table;
pub mod toolbar;
