pub mod open_list;
