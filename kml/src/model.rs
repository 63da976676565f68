use std::fmt;

use geojson::JsonObject;
use serde::{Deserialize, Serialize};

use geom::{GPSBounds, LonLat};

/// One of the fixed GeoJSON geometry types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    pub fn of(value: &geojson::Value) -> GeometryKind {
        match value {
            geojson::Value::Point(_) => GeometryKind::Point,
            geojson::Value::LineString(_) => GeometryKind::LineString,
            geojson::Value::Polygon(_) => GeometryKind::Polygon,
            geojson::Value::MultiPoint(_) => GeometryKind::MultiPoint,
            geojson::Value::MultiLineString(_) => GeometryKind::MultiLineString,
            geojson::Value::MultiPolygon(_) => GeometryKind::MultiPolygon,
            geojson::Value::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// The GeoJSON `type` string.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// KML elements that group other elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    Folder,
    Document,
    Placemark,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [
        ContainerKind::Folder,
        ContainerKind::Document,
        ContainerKind::Placemark,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Folder => "Folder",
            ContainerKind::Document => "Document",
            ContainerKind::Placemark => "Placemark",
        }
    }

    /// The key under `properties` listing records of this kind.
    pub fn relation(self) -> &'static str {
        match self {
            ContainerKind::Folder => "folders",
            ContainerKind::Document => "documents",
            ContainerKind::Placemark => "placemarks",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Feature,
    Container(ContainerKind),
}

/// Identifies a node within one `GeometryCollection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// A feature or container record. Geometry lives at the leaves, but any node may have one.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub name: Option<String>,
    /// An ad-hoc element kind named by a string `properties.type`.
    pub type_tag: Option<String>,
    pub geometry: Option<geojson::Geometry>,
    /// Every other property, untouched.
    pub properties: JsonObject,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Node {
        Node {
            kind,
            name: None,
            type_tag: None,
            geometry: None,
            properties: JsonObject::new(),
            children: Vec::new(),
        }
    }

    pub fn feature(geometry: Option<geojson::Value>) -> Node {
        let mut node = Node::new(NodeKind::Feature);
        node.geometry = geometry.map(geojson::Geometry::new);
        node
    }

    pub fn container(kind: ContainerKind) -> Node {
        Node::new(NodeKind::Container(kind))
    }

    pub fn named<I: Into<String>>(mut self, name: I) -> Node {
        self.name = Some(name.into());
        self
    }

    pub fn tagged<I: Into<String>>(mut self, tag: I) -> Node {
        self.type_tag = Some(tag.into());
        self
    }

    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        self.geometry.as_ref().map(|g| GeometryKind::of(&g.value))
    }

    /// In document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Root {
    /// The usual FeatureCollection: ordered top-level features, plus containers declared on the
    /// collection's own properties.
    Features {
        features: Vec<NodeId>,
        containers: Vec<NodeId>,
    },
    /// A document without a `features` list is treated as one node.
    Single(NodeId),
}

/// A converted document. Nodes live in an arena and refer to their children by `NodeId`.
///
/// Documents built from JSON are always trees, but `add_child` can link any existing node, so
/// shared or cyclic structures can be constructed; the analyses detect them instead of looping.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCollection {
    nodes: Vec<Node>,
    root: Root,
}

impl GeometryCollection {
    /// An empty FeatureCollection.
    pub fn new() -> GeometryCollection {
        GeometryCollection {
            nodes: Vec::new(),
            root: Root::Features {
                features: Vec::new(),
                containers: Vec::new(),
            },
        }
    }

    /// A document consisting of just one node, with no `features` list.
    pub fn single(node: Node) -> GeometryCollection {
        GeometryCollection {
            nodes: vec![node],
            root: Root::Single(NodeId(0)),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` to the end of `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(child.0 < self.nodes.len(), "{} doesn't exist", child);
        self.nodes[parent.0].children.push(child);
    }

    /// Appends a top-level feature.
    pub fn push_feature(&mut self, id: NodeId) {
        match self.root {
            Root::Features {
                ref mut features, ..
            } => features.push(id),
            Root::Single(_) => panic!("A single-node document can't have top-level features"),
        }
    }

    /// Appends a container declared on the collection's own properties, outside any feature.
    pub fn push_top_level(&mut self, id: NodeId) {
        match self.root {
            Root::Features {
                ref mut containers,
                ..
            } => containers.push(id),
            Root::Single(_) => panic!("A single-node document can't have top-level containers"),
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes in the arena, reachable or not.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The top-level features, in order. Empty for a single-node document.
    pub fn features(&self) -> &[NodeId] {
        match self.root {
            Root::Features { ref features, .. } => features,
            Root::Single(_) => &[],
        }
    }

    /// Containers declared next to `features`, rather than inside any one feature.
    pub fn top_level_containers(&self) -> &[NodeId] {
        match self.root {
            Root::Features { ref containers, .. } => containers,
            Root::Single(_) => &[],
        }
    }

    /// The node standing for the whole document, when there's no `features` list.
    pub fn single_root(&self) -> Option<NodeId> {
        match self.root {
            Root::Single(id) => Some(id),
            Root::Features { .. } => None,
        }
    }

    /// The box covering every valid position of the top-level geometry, for framing a map
    /// view. None if there's nothing to frame.
    pub fn gps_bounds(&self) -> Option<GPSBounds> {
        let mut bounds = GPSBounds::new();
        let roots: Vec<NodeId> = match self.root {
            Root::Features { ref features, .. } => features.clone(),
            Root::Single(id) => vec![id],
        };
        for id in roots {
            if let Some(ref geometry) = self.node(id).geometry {
                for_each_position(&geometry.value, &mut |pos| {
                    if let Ok(pt) = LonLat::from_position(pos) {
                        bounds.update(pt);
                    }
                });
            }
        }
        if bounds.is_empty() {
            None
        } else {
            Some(bounds)
        }
    }
}

impl Default for GeometryCollection {
    fn default() -> GeometryCollection {
        GeometryCollection::new()
    }
}

fn for_each_position<F: FnMut(&[f64])>(value: &geojson::Value, cb: &mut F) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            geojson::Value::Point(pos) => cb(&pos[..]),
            geojson::Value::MultiPoint(line) | geojson::Value::LineString(line) => {
                for pos in line {
                    cb(&pos[..]);
                }
            }
            geojson::Value::MultiLineString(rings) | geojson::Value::Polygon(rings) => {
                for pos in rings.iter().flatten() {
                    cb(&pos[..]);
                }
            }
            geojson::Value::MultiPolygon(polygons) => {
                for pos in polygons.iter().flatten().flatten() {
                    cb(&pos[..]);
                }
            }
            geojson::Value::GeometryCollection(members) => {
                stack.extend(members.iter().map(|g| &g.value));
            }
        }
    }
}
