mod gallery_cmds;

pub use gallery_cmds::{cmd_categories, cmd_config, cmd_list, cmd_show};
