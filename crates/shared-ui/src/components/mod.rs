// Standalone components (no primitives)
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod form;
pub mod form_select;
pub mod input;
pub mod notice_banner;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod sheet;
pub mod skeleton;
pub mod textarea;

// Primitive wrapper
pub mod alert_dialog;

// Depends on alert_dialog and button
pub mod confirm_delete;

// Depends on button
pub mod sidebar;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use confirm_delete::*;
pub use data_table::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use notice_banner::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use sheet::*;
pub use sidebar::*;
pub use skeleton::*;
pub use textarea::*;
