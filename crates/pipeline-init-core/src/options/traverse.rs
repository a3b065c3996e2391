//! Structural algorithms over option trees: descent, ancestry
//! recovery, terminal-node discovery, subtree grafting, and stripping.

use super::node::{OptionKind, OptionNode};

impl OptionNode {
    /// Walk down the tree following `components` as child keys.
    /// Returns `None` the moment any component is absent.
    pub fn child<I, S>(&self, components: I) -> Option<&OptionNode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self;
        for component in components {
            current = current.children.get(component.as_ref())?;
        }
        Some(current)
    }

    /// Mutable variant of [`OptionNode::child`].
    pub fn child_mut<I, S>(&mut self, components: I) -> Option<&mut OptionNode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self;
        for component in components {
            current = current.children.get_mut(component.as_ref())?;
        }
        Some(current)
    }

    /// Recover the parent of the node sitting at `path`, along with the
    /// edge label it hangs under. Ancestry is recomputed by re-walking
    /// from this root; no parent pointers are stored anywhere.
    ///
    /// Returns `None` for the root itself (empty path) and for any
    /// prefix that cannot be resolved from here.
    pub fn parent_of<'a, 'p>(&'a self, path: &'p [String]) -> Option<(&'a OptionNode, &'p str)> {
        let (edge, prefix) = path.split_last()?;
        let parent = self.child(prefix)?;
        Some((parent, edge.as_str()))
    }

    /// The selectable values this node offers: a config node offers its
    /// own document name, any other node offers its children's keys.
    pub fn values(&self) -> Vec<String> {
        if let OptionKind::Config { name } = &self.kind {
            return vec![name.clone()];
        }
        self.children.keys().cloned().collect()
    }

    /// Whether this node marks its parent as a last child.
    fn ends_branching(&self) -> bool {
        !matches!(self.kind, OptionKind::Value { .. })
    }

    /// Collect the nodes below (or at) `self` that have no further
    /// useful branching: no children at all, or any immediate child
    /// that is a config node or a placeholder.
    ///
    /// The first qualifying child marks the whole current node as a
    /// last child and stops the scan of its siblings; mixed sibling
    /// sets are deliberately not descended into.
    pub fn last_childs(&self) -> Vec<&OptionNode> {
        let mut found = Vec::new();
        self.collect_last_childs(&mut found);
        found
    }

    fn collect_last_childs<'a>(&'a self, found: &mut Vec<&'a OptionNode>) {
        if self.children.is_empty() {
            found.push(self);
            return;
        }
        for child in self.children.values() {
            if child.ends_branching() {
                found.push(self);
                return;
            }
            child.collect_last_childs(found);
        }
    }

    /// Same discovery as [`OptionNode::last_childs`], but yielding each
    /// last child's position relative to `self` so callers can mutate.
    fn last_child_paths(&self) -> Vec<Vec<String>> {
        let mut trail = Vec::new();
        let mut found = Vec::new();
        self.collect_last_child_paths(&mut trail, &mut found);
        found
    }

    fn collect_last_child_paths(&self, trail: &mut Vec<String>, found: &mut Vec<Vec<String>>) {
        if self.children.is_empty() {
            found.push(trail.clone());
            return;
        }
        for (value, child) in &self.children {
            if child.ends_branching() {
                found.push(trail.clone());
                return;
            }
            trail.push(value.clone());
            child.collect_last_child_paths(trail, found);
            trail.pop();
        }
    }

    /// Strip document bindings from every last child's immediate
    /// children, degrading config nodes to placeholders. Lets a subtree
    /// of options be reused as a pure selector without its original
    /// bindings leaking through. Idempotent.
    pub fn remove_configs(&mut self) {
        for path in self.last_child_paths() {
            let Some(node) = self.child_mut(&path) else {
                continue;
            };
            for child in node.children.values_mut() {
                if matches!(child.kind, OptionKind::Config { .. }) {
                    child.kind = OptionKind::Placeholder;
                }
            }
        }
    }

    /// Attach an independent detached copy of `subtree` under every
    /// value currently offered by every last child. Copies share no
    /// structure with each other or with `subtree`; each one's paths
    /// are recomputed for its new position by the attachment.
    pub fn attach_to_last_childs(&mut self, subtree: &OptionNode) {
        for path in self.last_child_paths() {
            let Some(node) = self.child_mut(&path) else {
                continue;
            };
            for value in node.values() {
                node.add_option(value, subtree.detached_copy());
            }
        }
    }

    /// Fully independent structural clone of this subtree with all
    /// paths cleared. The copy is detached: reattach it with
    /// [`OptionNode::add_option`] to restore ancestry tracking.
    pub fn detached_copy(&self) -> OptionNode {
        let mut copy = self.clone();
        copy.rebase(Vec::new());
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-level tree: platform -> variant -> config document.
    fn sample_tree() -> OptionNode {
        let mut root = OptionNode::value("Platform", "PLATFORM");

        let mut android = OptionNode::value("Build variant", "VARIANT");
        android.add_config("debug", OptionNode::config("android-debug"));
        android.add_config("release", OptionNode::config("android-release"));
        root.add_option("android", android);

        let mut ios = OptionNode::value("Scheme", "SCHEME");
        ios.add_config("app", OptionNode::config("ios-app"));
        ios.add_config("tests", OptionNode::config("ios-tests"));
        root.add_option("ios", ios);

        root
    }

    #[test]
    fn test_child_resolves_component_sequences() {
        let root = sample_tree();

        let leaf = root.child(["android", "debug"]).unwrap();
        assert_eq!(leaf.config_name(), Some("android-debug"));

        assert!(root.child(["android", "missing"]).is_none());
        assert!(root.child(["windows"]).is_none());
    }

    #[test]
    fn test_parent_recovers_attachment_point() {
        let root = sample_tree();
        let leaf = root.child(["ios", "tests"]).unwrap();

        let (parent, edge) = root.parent_of(leaf.path()).unwrap();
        assert_eq!(parent.title(), Some("Scheme"));
        assert_eq!(edge, "tests");

        // Only the root has an empty path, and only the root has no parent.
        assert!(root.path().is_empty());
        assert!(root.parent_of(root.path()).is_none());
    }

    #[test]
    fn test_values_on_config_and_value_nodes() {
        let root = sample_tree();
        assert_eq!(root.values(), ["android", "ios"]);

        let leaf = root.child(["android", "debug"]).unwrap();
        assert_eq!(leaf.values(), ["android-debug"]);

        assert!(OptionNode::placeholder().values().is_empty());
    }

    #[test]
    fn test_last_childs_finds_nodes_above_configs() {
        let root = sample_tree();
        let last = root.last_childs();

        let titles: Vec<_> = last.iter().filter_map(|n| n.title()).collect();
        assert_eq!(titles, ["Build variant", "Scheme"]);
    }

    #[test]
    fn test_last_childs_short_circuits_on_first_terminal_child() {
        // "android" hangs a config child next to a value child; the
        // first terminal child marks the root itself as a last child
        // and the value branch is never descended into.
        let mut root = OptionNode::value("Platform", "PLATFORM");
        root.add_config("android", OptionNode::config("android-config"));
        let mut ios = OptionNode::value("Scheme", "SCHEME");
        ios.add_config("app", OptionNode::config("ios-app"));
        root.add_option("ios", ios);

        let last = root.last_childs();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title(), Some("Platform"));
    }

    #[test]
    fn test_leaf_without_children_is_its_own_last_child() {
        let lone = OptionNode::value("Project path", "PROJECT_PATH");
        let last = lone.last_childs();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title(), Some("Project path"));
    }

    #[test]
    fn test_remove_configs_is_idempotent() {
        let mut root = sample_tree();
        root.remove_configs();

        for components in [
            ["android", "debug"],
            ["android", "release"],
            ["ios", "app"],
            ["ios", "tests"],
        ] {
            let child = root.child(components).unwrap();
            assert_eq!(child.config_name(), None);
            assert_eq!(child.kind(), &OptionKind::Placeholder);
        }

        let stripped = root.clone();
        root.remove_configs();
        assert_eq!(root, stripped);
    }

    #[test]
    fn test_attach_to_last_childs_grafts_independent_copies() {
        let mut root = sample_tree();

        let mut sub = OptionNode::value("Export method", "EXPORT_METHOD");
        sub.add_config("development", OptionNode::config("dev-config"));

        root.attach_to_last_childs(&sub);

        // Two last children, each offering two values: four copies.
        let grafted: Vec<Vec<&str>> = vec![
            vec!["android", "debug"],
            vec!["android", "release"],
            vec!["ios", "app"],
            vec!["ios", "tests"],
        ];
        for components in &grafted {
            let copy = root.child(components).unwrap();
            assert_eq!(copy.title(), Some("Export method"));
            assert_eq!(copy.path(), *components);

            let leaf = copy.child(["development"]).unwrap();
            assert_eq!(leaf.config_name(), Some("dev-config"));
            assert_eq!(leaf.path().last().map(String::as_str), Some("development"));
        }

        // Copies are independent: mutating one leaves the others alone.
        root.child_mut(["android", "debug"])
            .unwrap()
            .add_config("ad-hoc", OptionNode::config("adhoc-config"));
        assert!(root.child(["android", "release", "ad-hoc"]).is_none());
        assert!(sub.child(["ad-hoc"]).is_none());
    }

    #[test]
    fn test_detached_copy_is_independent_and_pathless() {
        let root = sample_tree();
        let branch = root.child(["android"]).unwrap();

        let copy = branch.detached_copy();
        assert!(copy.path().is_empty());
        assert!(copy.child(["debug"]).unwrap().path().is_empty());

        // Serializable content is identical even though paths differ.
        assert_eq!(
            serde_yaml::to_string(&copy).unwrap(),
            serde_yaml::to_string(branch).unwrap()
        );

        // A copy of the copy carries the same content.
        assert_eq!(copy.detached_copy(), copy);

        // Mutating the copy never reaches the original tree.
        let mut copy = copy;
        copy.add_config("beta", OptionNode::config("beta-config"));
        assert!(root.child(["android", "beta"]).is_none());
    }
}
