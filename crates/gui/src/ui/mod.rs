pub mod mode_panel;
pub mod status_bar;
pub mod world_list;
