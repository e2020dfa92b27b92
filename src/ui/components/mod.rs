pub mod cards;
pub mod dialog_component;
pub mod dialogs;
pub mod entity_list;
pub mod highlight;
pub mod sidebar_component;
pub mod status_bar;

pub use cards::{CardContext, CardView};
pub use dialog_component::DialogComponent;
pub use entity_list::EntityListComponent;
pub use sidebar_component::SidebarComponent;
pub use status_bar::{StatusBar, StatusKind};
