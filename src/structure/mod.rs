// Mon Oct 19 2026 - Alex

pub mod alignment;
pub mod cache;
pub mod error;
pub mod field;
pub mod inheritance;
pub mod layout;
pub mod planner;
pub mod serializer;
pub mod type_info;
pub mod validator;
pub mod vtable;

pub use alignment::Alignment;
pub use cache::LayoutRegistry;
pub use error::StructureError;
pub use field::ResolvedField;
pub use inheritance::{ClassHierarchy, ClassNode, HierarchyOrder, HierarchyStats};
pub use layout::{MethodBinding, ResolvedLayout};
pub use planner::LayoutPlanner;
pub use serializer::{SerializableField, SerializableLayout, SerializableSlot};
pub use type_info::{PrimitiveType, TypeInfo};
pub use validator::StructureValidator;
pub use vtable::{VTable, VTableSlot};
