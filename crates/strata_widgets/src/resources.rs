//! Resources embedded in the widget crate

use strata_core::ResourceBundle;

/// Logical path of the collapse toggle's skin
pub const COLLAPSIBLE_GROUP_STYLESHEET: &str = ":styles/collapsible_group.css";

/// Every embedded resource, keyed by logical path
///
/// Widgets read these when the context's bundle has no entry of its own;
/// an application overrides one by inserting the same key.
pub fn bundled_resources() -> ResourceBundle {
    ResourceBundle::new().with(
        COLLAPSIBLE_GROUP_STYLESHEET,
        include_bytes!("../resources/styles/collapsible_group.css").as_slice(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_is_bundled() {
        let bundle = bundled_resources();
        let source = bundle.read_to_string(COLLAPSIBLE_GROUP_STYLESHEET).unwrap();
        assert!(source.contains("#indicator:checked"));
    }
}
