//! Graphviz DOT export of polynomial diagrams.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Appearance of the generated graph.
#[derive(Debug, Clone)]
pub struct DotConfig {
    pub node_shape: &'static str,
    pub terminal_shape: &'static str,
    /// Style of `lo` edges (variable absent).
    pub lo_edge_style: &'static str,
    /// Style of `hi` edges (variable present).
    pub hi_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            lo_edge_style: "dashed",
            hi_edge_style: "solid",
        }
    }
}

impl ZddManager {
    /// Renders the diagrams of `roots` as a Graphviz digraph.
    ///
    /// Shared nodes appear once. Each root gets a labelled entry point `r{i}`.
    ///
    /// # Example
    ///
    /// ```
    /// use gb_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let p = mgr.add(mgr.var(1), mgr.one());
    /// let dot = mgr.to_dot(&[p]).unwrap();
    /// assert!(dot.starts_with("digraph"));
    /// ```
    pub fn to_dot(&self, roots: &[ZddId]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, roots: &[ZddId], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph ZDD {{")?;
        writeln!(dot, "  node [shape={}];", config.node_shape)?;

        writeln!(dot, "  {{ rank=sink;")?;
        writeln!(dot, "    zero [label=\"0\", shape={}];", config.terminal_shape)?;
        writeln!(dot, "    one [label=\"1\", shape={}];", config.terminal_shape)?;
        writeln!(dot, "  }}")?;

        let levels = self.nodes_by_level(roots);
        for (var, ids) in &levels {
            writeln!(dot, "  {{ rank=same; // {}", var)?;
            for id in ids {
                writeln!(dot, "    n{} [label=\"{}\"];", id.raw(), var)?;
            }
            writeln!(dot, "  }}")?;
        }

        for (_, ids) in &levels {
            for &id in ids {
                let node = self.node(id);
                writeln!(
                    dot,
                    "  n{} -> {} [style={}];",
                    id.raw(),
                    target(node.lo),
                    config.lo_edge_style
                )?;
                writeln!(
                    dot,
                    "  n{} -> {} [style={}];",
                    id.raw(),
                    target(node.hi),
                    config.hi_edge_style
                )?;
            }
        }

        for (i, &root) in roots.iter().enumerate() {
            writeln!(dot, "  r{} [label=\"{}\", shape=none];", i, root)?;
            writeln!(dot, "  r{} -> {} [style=bold];", i, target(root))?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    /// Decision nodes reachable from `roots`, grouped by variable, root level first.
    fn nodes_by_level(&self, roots: &[ZddId]) -> Vec<(Var, Vec<ZddId>)> {
        let mut visited = HashSet::new();
        let mut stack: Vec<ZddId> = roots.to_vec();
        let mut found = Vec::new();
        while let Some(id) = stack.pop() {
            if id.is_terminal() || !visited.insert(id) {
                continue;
            }
            let node = self.node(id);
            found.push((node.var, id));
            stack.push(node.lo);
            stack.push(node.hi);
        }
        found.sort_unstable();

        let mut levels: Vec<(Var, Vec<ZddId>)> = Vec::new();
        for (var, id) in found {
            match levels.last_mut() {
                Some((v, ids)) if *v == var => ids.push(id),
                _ => levels.push((var, vec![id])),
            }
        }
        levels
    }
}

fn target(id: ZddId) -> String {
    if id.is_zero() {
        "zero".to_string()
    } else if id.is_one() {
        "one".to_string()
    } else {
        format!("n{}", id.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dot_constants() {
        let mgr = ZddManager::new();
        let dot = mgr.to_dot(&[mgr.zero(), mgr.one()]).unwrap();
        assert!(dot.contains("r0 -> zero"));
        assert!(dot.contains("r1 -> one"));
        assert!(!dot.contains("rank=same"));
    }

    #[test]
    fn test_to_dot_shared_nodes() {
        let mgr = ZddManager::new();
        let x2 = mgr.var(2);
        let p = mgr.add(mgr.var(1), x2);
        let q = mgr.mul(mgr.var(1), x2);
        let dot = mgr.to_dot(&[p, q]).unwrap();

        assert!(dot.contains("label=\"x1\""));
        assert!(dot.contains("label=\"x2\""));
        // x2 is shared: declared once.
        assert_eq!(dot.matches(&format!("n{} [label", x2.raw())).count(), 1);
    }

    #[test]
    fn test_to_dot_with_config() {
        let mgr = ZddManager::new();
        let config = DotConfig {
            node_shape: "ellipse",
            ..DotConfig::default()
        };
        let dot = mgr.to_dot_with_config(&[mgr.var(3)], &config).unwrap();
        assert!(dot.contains("shape=ellipse"));
        assert!(dot.contains("style=dashed"));
    }
}
