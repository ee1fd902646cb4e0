use serde::{Deserialize, Serialize};

/// One node of the site navigation (a topic or sub-topic link).
/// An item without children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    /// Icon name, resolved by the renderer
    pub icon: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn leaf(id: &str, label: &str, icon: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            href: href.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(id: &str, label: &str, icon: &str, href: &str, children: Vec<NavItem>) -> Self {
        Self {
            children,
            ..Self::leaf(id, label, icon, href)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_omits_children_in_json() {
        let item = NavItem::leaf("dns", "DNS", "Link", "/networking/dns");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("children"));
        assert!(item.is_leaf());
    }

    #[test]
    fn test_missing_children_deserializes_as_leaf() {
        let json = r#"{"id":"home","label":"Overview","icon":"Home","href":"/"}"#;
        let item: NavItem = serde_json::from_str(json).unwrap();
        assert!(item.is_leaf());
        assert_eq!(item.href, "/");
    }

    #[test]
    fn test_branch_has_children() {
        let item = NavItem::branch(
            "storage",
            "Storage",
            "HardDrive",
            "/storage",
            vec![NavItem::leaf("object", "Object Storage", "File", "/storage/object")],
        );
        assert!(item.has_children());
        assert_eq!(item.children[0].id, "object");
    }
}
