pub mod color;
pub mod entry_field;
pub mod status_bar;
pub mod tags;
