// File format handlers
pub mod patch_names;
pub mod rbk;

pub use patch_names::{patch_name, PatchNameTable};
pub use rbk::{load_rbk, read_rbk, save_rbk, write_rbk, RbkError, RegistrationBank};
