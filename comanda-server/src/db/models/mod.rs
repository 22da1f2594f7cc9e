//! Database models
//!
//! One module per table. Each model comes with its create/update DTOs and,
//! where the record id leaks into API responses, a `*View` with string ids.

pub mod menu_item;
pub mod order;
pub mod section;
pub mod settings;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemView};
pub use order::{Order, OrderView};
pub use section::{Section, SectionCreate, SectionUpdate, SectionView};
pub use settings::{Settings, SettingsUpdate, SettingsView};
