//! Built-in checks.
//!
//! - **Structure** (`structural`): required fields and collection shape
//! - **Files** (`files`): referenced files exist and look like content
//! - **Integrity** (`integrity`): unique ids and skill → agent references
//! - **Layout** (`layout`): hooks and documentation shipped with the bundle

pub mod files;
pub mod integrity;
pub mod layout;
pub mod structural;

use crate::check::rule::BoxedCheck;

pub use files::FilesCheck;
pub use integrity::IntegrityCheck;
pub use layout::LayoutCheck;
pub use structural::StructureCheck;

/// Built-in checks in report order.
pub fn default_checks() -> Vec<BoxedCheck> {
    vec![
        Box::new(StructureCheck),
        Box::new(FilesCheck),
        Box::new(IntegrityCheck),
        Box::new(LayoutCheck),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ids_unique() {
        let checks = default_checks();
        let mut ids: Vec<&str> = checks.iter().map(|c| c.id()).collect();
        let original_len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "All check IDs must be unique");
    }
}
