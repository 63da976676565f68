use serde::{Deserialize, Serialize};

use abstutil::Counter;

use crate::{ContainerKind, Error, GeometryCollection, GeometryKind, NodeId, NodeKind, Options};

/// The key counting every visited feature and container record.
pub const TOTAL: &str = "Total";

/// How many of each element kind a document contains. Kinds that never occur are left out,
/// except `Total`, which is always present.
///
/// Keys are the geometry kinds, the container kinds, `Total`, and any ad-hoc kind named by a
/// string `properties.type`. An ad-hoc kind spelled like a fixed one shares its bucket, so a
/// feature tagged `"Polygon"` with Polygon geometry counts twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementCounts {
    counts: Counter<String>,
}

impl ElementCounts {
    pub fn get(&self, kind: &str) -> usize {
        self.counts.get(kind)
    }

    pub fn total(&self) -> usize {
        self.counts.get(TOTAL)
    }

    /// Every present kind, alphabetically. Callers wanting another display order should sort
    /// themselves.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of kinds present, including `Total`.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Combines counts taken over disjoint parts of a document. Order doesn't matter.
    pub fn merge(&mut self, other: ElementCounts) {
        self.counts.extend(other.counts);
    }
}

/// Walks every feature and container reachable from the document, depth-first in document
/// order, and counts element kinds.
///
/// The walk uses an explicit stack. Reaching any node a second time fails with
/// `CyclicStructure`; going deeper than `opts.max_depth` fails with `MalformedInput`.
pub fn summarize(collection: &GeometryCollection, opts: &Options) -> Result<ElementCounts, Error> {
    let mut summarizer = Summarizer::new(collection, opts);

    if let Some(root) = collection.single_root() {
        summarizer.visit_tree(root)?;
    } else {
        for id in collection.features() {
            summarizer.visit_tree(*id)?;
        }
        // Containers declared beside the features, outside any single one of them
        for id in collection.top_level_containers() {
            summarizer.visit_tree(*id)?;
        }
    }

    let mut counts = summarizer.counts;
    counts.retain(|kind, cnt| cnt > 0 || kind == TOTAL);
    debug!("Visited {} records", counts.get(TOTAL));
    Ok(ElementCounts { counts })
}

struct Summarizer<'a> {
    collection: &'a GeometryCollection,
    max_depth: usize,
    visited: Vec<bool>,
    counts: Counter<String>,
}

impl<'a> Summarizer<'a> {
    fn new(collection: &'a GeometryCollection, opts: &Options) -> Summarizer<'a> {
        let mut counts = Counter::new();
        for kind in GeometryKind::ALL {
            counts.touch(kind.name().to_string());
        }
        for kind in ContainerKind::ALL {
            counts.touch(kind.name().to_string());
        }
        counts.touch(TOTAL.to_string());

        Summarizer {
            collection,
            max_depth: opts.max_depth,
            visited: vec![false; collection.num_nodes()],
            counts,
        }
    }

    fn visit_tree(&mut self, start: NodeId) -> Result<(), Error> {
        let collection = self.collection;
        let mut stack = vec![(start, 1)];
        while let Some((id, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(Error::malformed(
                    id.to_string(),
                    format!("nested more than {} records deep", self.max_depth),
                ));
            }
            if self.visited[id.0] {
                return Err(Error::CyclicStructure { node: id });
            }
            self.visited[id.0] = true;

            let node = collection.node(id);
            self.counts.inc(TOTAL.to_string());
            if let NodeKind::Container(kind) = node.kind {
                self.counts.inc(kind.name().to_string());
            }
            // A GeometryCollection is one geometry; its members aren't counted separately
            if let Some(kind) = node.geometry_kind() {
                self.counts.inc(kind.name().to_string());
            }
            if let Some(ref tag) = node.type_tag {
                self.counts.inc(tag.clone());
            }

            for child in node.children().iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        Ok(())
    }
}
