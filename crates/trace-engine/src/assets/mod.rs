pub mod catalog;
pub mod path_data;
