pub mod edit;
pub mod serve;
pub mod show;

pub use edit::{add_button, add_label, embed_script, new_file, AddButtonArgs, AddLabelArgs, EmbedScriptArgs, NewArgs};
pub use serve::serve;
pub use show::{show, ShowArgs};
