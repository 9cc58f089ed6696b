// Mon Oct 19 2026 - Alex

//! Names of everything the emitter generates, derived only from class,
//! method and field names so output is reproducible.

pub const VTABLE_FIELD: &str = "vtable";
pub const VTABLE_ENTRY_TYPE: &str = "vfn_t";

pub fn constructor(class: &str) -> String {
    format!("create_{}", class)
}

pub fn destructor(class: &str) -> String {
    format!("destroy_{}", class)
}

/// Public entry point of a method: the thunk for virtual methods, the
/// function itself for plain ones.
pub fn method(class: &str, method: &str) -> String {
    format!("{}_{}", class, method)
}

/// Function stored in the vtable slot.
pub fn implementation(class: &str, method: &str) -> String {
    format!("{}_{}_impl", class, method)
}

pub fn getter_method(field: &str) -> String {
    format!("get_{}", field)
}

pub fn setter_method(field: &str) -> String {
    format!("set_{}", field)
}
