use super::app::TuiMode;

#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub mode: TuiMode,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        key: "b",
        label: "Build",
        description: "Arrange and edit fields",
        mode: TuiMode::Build,
    },
    NavItem {
        key: "p",
        label: "Preview",
        description: "Fill the form as a respondent",
        mode: TuiMode::Preview,
    },
];

pub fn nav_index_for_mode(mode: TuiMode) -> Option<usize> {
    NAV_ITEMS.iter().position(|item| item.mode == mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn nav_items_have_unique_modes_and_keys() {
        let mut mode_set = HashSet::new();
        let mut key_set = HashSet::new();
        for item in NAV_ITEMS {
            assert!(
                mode_set.insert(std::mem::discriminant(&item.mode)),
                "Duplicate mode in NAV_ITEMS: {:?}",
                item.mode
            );
            assert!(
                key_set.insert(item.key),
                "Duplicate key in NAV_ITEMS: {}",
                item.key
            );
        }
    }

    #[test]
    fn nav_index_roundtrips() {
        for (idx, item) in NAV_ITEMS.iter().enumerate() {
            assert_eq!(
                nav_index_for_mode(item.mode),
                Some(idx),
                "nav_index_for_mode mismatch for {:?}",
                item.mode
            );
        }
    }
}
