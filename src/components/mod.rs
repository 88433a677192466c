pub mod confirm_dialog;
pub mod footer;
pub mod tab_bar;
pub mod table;
pub mod text_input;
