// RBK-RS: reading and writing Casio registration bank (.RBK) files

pub mod core;
pub mod formats;
pub mod keyboards;
pub mod tlv;

// Re-export commonly used types
pub use self::core::{
    constants::*,
    registration::{Field, Registration, RegistrationError},
};
pub use formats::{
    load_rbk, patch_name, read_rbk, save_rbk, write_rbk, PatchNameTable, RbkError,
    RegistrationBank,
};
pub use keyboards::{format_for, list_keyboards, KeyboardFormat};
pub use tlv::{TlvError, SENTINEL};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
