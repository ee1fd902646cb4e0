use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::domain::models::NavItem;
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{log_lookup_miss, log_tree_rejected, log_tree_validated};

static BUILTIN_TREE: Lazy<NavigationTree> =
    Lazy::new(|| NavigationTree::new(builtin_items()).expect("built-in navigation tree is valid"));

/// Read-only navigation hierarchy of the site.
///
/// Ids are unique across every level and leaf hrefs are unique, both checked
/// on construction. Lookups walk the tree depth-first, so any nesting depth works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTree {
    items: Vec<NavItem>,
}

impl NavigationTree {
    pub fn new(items: Vec<NavItem>) -> Result<Self> {
        let tree = Self { items };
        match tree.validate() {
            Ok(()) => {
                log_tree_validated(tree.items.len(), tree.len());
                Ok(tree)
            }
            Err(e) => {
                log_tree_rejected(&e.to_string());
                Err(e)
            }
        }
    }

    /// The site navigation
    pub fn builtin() -> Self {
        BUILTIN_TREE.clone()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<NavItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Root items in declaration order
    pub fn list(&self) -> &[NavItem] {
        &self.items
    }

    /// Depth-first, pre-order walk over every item
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.items.iter()],
        }
    }

    /// Number of items across all levels
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&NavItem> {
        let found = self.iter().find(|item| item.id == id);
        if found.is_none() {
            log_lookup_miss("id", id);
        }
        found
    }

    pub fn find_by_href(&self, href: &str) -> Option<&NavItem> {
        let found = self.iter().find(|item| item.href == href);
        if found.is_none() {
            log_lookup_miss("href", href);
        }
        found
    }

    /// Chain from the root down to the parent of `id`.
    /// Empty for root items, `None` when `id` is not in the tree.
    pub fn ancestors(&self, id: &str) -> Option<Vec<&NavItem>> {
        let mut path = Vec::new();
        if path_to(&self.items, id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    /// Ids of the items that have children
    pub fn branch_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|item| item.has_children())
            .map(|item| item.id.as_str())
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|item| item.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut hrefs = HashSet::new();

        for item in self.iter() {
            if item.id.trim().is_empty() {
                return Err(AppError::EmptyNavId(item.label.clone()));
            }
            if !ids.insert(item.id.as_str()) {
                return Err(AppError::DuplicateNavId(item.id.clone()));
            }
            if item.is_leaf() && !hrefs.insert(item.href.as_str()) {
                return Err(AppError::DuplicateHref(item.href.clone()));
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a NavigationTree {
    type Item = &'a NavItem;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, NavItem>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a NavItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(item) => {
                    self.stack.push(item.children.iter());
                    return Some(item);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

fn path_to<'a>(items: &'a [NavItem], id: &str, path: &mut Vec<&'a NavItem>) -> bool {
    for item in items {
        if item.id == id {
            return true;
        }
        path.push(item);
        if path_to(&item.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn builtin_items() -> Vec<NavItem> {
    vec![
        NavItem::leaf("home", "Overview", "Home", "/"),
        NavItem::branch(
            "fundamentals",
            "Fundamentals",
            "BookOpen",
            "/fundamentals",
            vec![
                NavItem::leaf("cap-theorem", "CAP Theorem", "Triangle", "/fundamentals/cap-theorem"),
                NavItem::leaf("consistency", "Consistency Models", "RefreshCw", "/fundamentals/consistency"),
                NavItem::leaf("scaling", "Scaling", "TrendingUp", "/fundamentals/scaling"),
                NavItem::leaf("latency", "Latency vs Throughput", "Gauge", "/fundamentals/latency"),
            ],
        ),
        NavItem::branch(
            "compute",
            "Compute",
            "Cpu",
            "/compute",
            vec![
                NavItem::leaf("vms", "Virtual Machines", "Server", "/compute/virtual-machines"),
                NavItem::leaf("serverless", "Serverless", "Zap", "/compute/serverless"),
                NavItem::leaf("containers", "Containers", "Box", "/compute/containers"),
                NavItem::leaf("kubernetes", "Kubernetes", "Boxes", "/compute/kubernetes"),
            ],
        ),
        NavItem::branch(
            "storage",
            "Storage",
            "HardDrive",
            "/storage",
            vec![
                NavItem::leaf("object", "Object Storage", "File", "/storage/object"),
                NavItem::leaf("block", "Block Storage", "Database", "/storage/block"),
                NavItem::leaf("file", "File Storage", "Folder", "/storage/file"),
            ],
        ),
        NavItem::branch(
            "databases",
            "Databases",
            "Database",
            "/databases",
            vec![
                NavItem::leaf("sql", "SQL Databases", "Table", "/databases/sql"),
                NavItem::leaf("nosql", "NoSQL Databases", "FileJson", "/databases/nosql"),
                NavItem::leaf("cache", "Caching", "Layers", "/databases/caching"),
                NavItem::leaf("replication", "Replication", "Copy", "/databases/replication"),
            ],
        ),
        NavItem::branch(
            "networking",
            "Networking",
            "Network",
            "/networking",
            vec![
                NavItem::leaf("vpc", "VPC & Subnets", "Globe", "/networking/vpc"),
                NavItem::leaf("dns", "DNS", "Link", "/networking/dns"),
                NavItem::leaf("load-balancing", "Load Balancing", "Scale", "/networking/load-balancing"),
                NavItem::leaf("cdn", "CDN", "Radio", "/networking/cdn"),
            ],
        ),
        NavItem::branch(
            "messaging",
            "Messaging",
            "MessageSquare",
            "/messaging",
            vec![
                NavItem::leaf("queues", "Message Queues", "ListOrdered", "/messaging/queues"),
                NavItem::leaf("pubsub", "Pub/Sub", "Bell", "/messaging/pubsub"),
                NavItem::leaf("event-driven", "Event-Driven", "Activity", "/messaging/event-driven"),
            ],
        ),
        NavItem::branch(
            "security",
            "Security",
            "Shield",
            "/security",
            vec![
                NavItem::leaf("iam", "IAM", "Key", "/security/iam"),
                NavItem::leaf("encryption", "Encryption", "Lock", "/security/encryption"),
                NavItem::leaf("secrets", "Secrets Management", "KeyRound", "/security/secrets"),
            ],
        ),
        NavItem::branch(
            "compare",
            "Compare",
            "GitCompare",
            "/compare",
            vec![
                NavItem::leaf("sql-vs-nosql", "SQL vs NoSQL", "GitCompare", "/compare/sql-vs-nosql"),
                NavItem::leaf("kafka-vs-rabbitmq", "Kafka vs RabbitMQ", "GitCompare", "/compare/kafka-vs-rabbitmq"),
                NavItem::leaf("rest-vs-graphql", "REST vs GraphQL vs gRPC", "GitCompare", "/compare/api-design"),
            ],
        ),
        NavItem::branch(
            "decisions",
            "Decision Trees",
            "GitBranch",
            "/decisions",
            vec![
                NavItem::leaf("which-database", "Which Database?", "HelpCircle", "/decisions/which-database"),
                NavItem::leaf("serverless-or-not", "Serverless or Not?", "HelpCircle", "/decisions/serverless"),
                NavItem::leaf("which-queue", "Which Message Queue?", "HelpCircle", "/decisions/which-queue"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_tree() -> NavigationTree {
        NavigationTree::new(vec![
            NavItem::leaf("home", "Home", "Home", "/"),
            NavItem::branch(
                "a",
                "A",
                "Folder",
                "/a",
                vec![NavItem::branch(
                    "a1",
                    "A1",
                    "Folder",
                    "/a/1",
                    vec![NavItem::leaf("a1x", "A1X", "File", "/a/1/x")],
                )],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_root_order() {
        let tree = NavigationTree::builtin();
        let ids: Vec<&str> = tree.list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "home",
                "fundamentals",
                "compute",
                "storage",
                "databases",
                "networking",
                "messaging",
                "security",
                "compare",
                "decisions",
            ]
        );
    }

    #[test]
    fn test_builtin_item_count() {
        // 10 roots + 31 children
        assert_eq!(NavigationTree::builtin().len(), 41);
    }

    #[test]
    fn test_find_by_id_for_every_item() {
        let tree = NavigationTree::builtin();
        for item in tree.iter() {
            let found = tree.find_by_id(&item.id).unwrap();
            assert_eq!(found.id, item.id);
        }
    }

    #[test]
    fn test_find_by_id_missing() {
        let tree = NavigationTree::builtin();
        assert!(tree.find_by_id("mainframes").is_none());
        assert!(tree.find_by_id("").is_none());
    }

    #[test]
    fn test_find_by_id_child() {
        let tree = NavigationTree::builtin();
        let item = tree.find_by_id("rest-vs-graphql").unwrap();
        assert_eq!(item.label, "REST vs GraphQL vs gRPC");
        assert_eq!(item.href, "/compare/api-design");
    }

    #[test]
    fn test_find_by_id_deep_nesting() {
        let tree = nested_tree();
        assert_eq!(tree.find_by_id("a1x").unwrap().href, "/a/1/x");
    }

    #[test]
    fn test_iter_is_depth_first() {
        let tree = nested_tree();
        let ids: Vec<&str> = tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "a", "a1", "a1x"]);
    }

    #[test]
    fn test_find_by_href() {
        let tree = NavigationTree::builtin();
        assert_eq!(tree.find_by_href("/compute/serverless").unwrap().id, "serverless");
        assert_eq!(tree.find_by_href("/").unwrap().id, "home");
        assert_eq!(tree.find_by_href("/compute").unwrap().id, "compute");
        assert!(tree.find_by_href("/compute/mainframes").is_none());
    }

    #[test]
    fn test_ancestors() {
        let tree = nested_tree();
        let chain: Vec<&str> = tree
            .ancestors("a1x")
            .unwrap()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(chain, vec!["a", "a1"]);
        assert!(tree.ancestors("home").unwrap().is_empty());
        assert!(tree.ancestors("missing").is_none());
    }

    #[test]
    fn test_branch_ids() {
        let tree = NavigationTree::builtin();
        let branches = tree.branch_ids();
        assert_eq!(branches.len(), 9);
        assert!(branches.contains(&"fundamentals"));
        assert!(!branches.contains(&"home"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = NavigationTree::new(vec![
            NavItem::leaf("dns", "DNS", "Link", "/dns"),
            NavItem::branch(
                "networking",
                "Networking",
                "Network",
                "/networking",
                vec![NavItem::leaf("dns", "DNS", "Link", "/networking/dns")],
            ),
        ]);
        assert!(matches!(result, Err(AppError::DuplicateNavId(id)) if id == "dns"));
    }

    #[test]
    fn test_duplicate_leaf_href_rejected() {
        let result = NavigationTree::new(vec![
            NavItem::leaf("a", "A", "File", "/same"),
            NavItem::leaf("b", "B", "File", "/same"),
        ]);
        assert!(matches!(result, Err(AppError::DuplicateHref(href)) if href == "/same"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = NavigationTree::new(vec![NavItem::leaf(" ", "Blank", "File", "/blank")]);
        assert!(matches!(result, Err(AppError::EmptyNavId(label)) if label == "Blank"));
    }

    #[test]
    fn test_json_export_and_import() {
        let tree = NavigationTree::builtin();
        let json = tree.to_json().unwrap();
        let parsed = NavigationTree::from_json(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            NavigationTree::from_json("{not json"),
            Err(AppError::SerializationError(_))
        ));
    }
}
