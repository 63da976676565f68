use geojson::{JsonObject, JsonValue};

use crate::{ContainerKind, Error, GeometryCollection, GeometryKind, Node, NodeId, NodeKind, Options};

/// The keys that nest more records, and what kind of record each holds.
const RELATIONS: [(&str, NodeKind); 4] = [
    ("features", NodeKind::Feature),
    ("folders", NodeKind::Container(ContainerKind::Folder)),
    ("placemarks", NodeKind::Container(ContainerKind::Placemark)),
    ("documents", NodeKind::Container(ContainerKind::Document)),
];

/// The collection's own `properties` can only declare documents and folders beside the features.
const ROOT_RELATIONS: [(&str, NodeKind); 2] = [
    ("documents", NodeKind::Container(ContainerKind::Document)),
    ("folders", NodeKind::Container(ContainerKind::Folder)),
];

/// A record found but not yet turned into a node.
struct Pending {
    obj: JsonObject,
    kind: NodeKind,
    attach: Attach,
    path: String,
    depth: usize,
}

#[derive(Clone, Copy)]
enum Attach {
    Feature,
    TopLevel,
    Child(NodeId),
}

impl GeometryCollection {
    /// Loads the GeoJSON produced by converting a KML file.
    pub fn from_json_str(raw: &str, opts: &Options) -> Result<GeometryCollection, Error> {
        let value: JsonValue =
            serde_json::from_str(raw).map_err(|err| Error::malformed("", err.to_string()))?;
        GeometryCollection::from_json_value(value, opts)
    }

    /// Like `from_json_str`, for an already parsed value. Nested records are walked with an
    /// explicit work list, so adversarially deep input can't overflow the stack; anything nested
    /// more than `opts.max_depth` records deep is rejected.
    pub fn from_json_value(value: JsonValue, opts: &Options) -> Result<GeometryCollection, Error> {
        let mut obj = match value {
            JsonValue::Object(obj) => obj,
            other => {
                return Err(Error::malformed(
                    "",
                    format!("expected an object, got {}", describe(&other)),
                ))
            }
        };

        let mut collection;
        let mut initial: Vec<Pending> = Vec::new();
        let features = match obj.remove("features") {
            Some(JsonValue::Null) => None,
            other => other,
        };
        match features {
            Some(JsonValue::Array(features)) => {
                collection = GeometryCollection::new();
                for (idx, feature) in features.into_iter().enumerate() {
                    let path = format!("/features/{}", idx);
                    initial.push(Pending {
                        obj: expect_object(feature, &path)?,
                        kind: NodeKind::Feature,
                        attach: Attach::Feature,
                        path,
                        depth: 1,
                    });
                }
                // Containers can also be declared beside the features, outside any of them
                let mut properties = take_properties(&mut obj, "")?;
                for (obj, kind, path) in
                    take_relations(&mut properties, "/properties", &ROOT_RELATIONS)?
                {
                    initial.push(Pending {
                        obj,
                        kind,
                        attach: Attach::TopLevel,
                        path,
                        depth: 1,
                    });
                }
            }
            Some(other) => {
                return Err(Error::malformed(
                    "/features",
                    format!("expected an array, got {}", describe(&other)),
                ));
            }
            None => {
                let (node, children) = if is_bare_geometry(&obj) {
                    (
                        Node::feature(None).with_geometry(parse_geometry(
                            JsonValue::Object(obj),
                            "",
                        )?),
                        Vec::new(),
                    )
                } else {
                    read_record(obj, NodeKind::Feature, "")?
                };
                collection = GeometryCollection::single(node);
                for (obj, kind, path) in children {
                    initial.push(Pending {
                        obj,
                        kind,
                        attach: Attach::Child(NodeId(0)),
                        path,
                        depth: 1,
                    });
                }
            }
        }

        let mut stack: Vec<Pending> = initial.into_iter().rev().collect();
        while let Some(pending) = stack.pop() {
            if pending.depth > opts.max_depth {
                return Err(Error::malformed(
                    pending.path,
                    format!("nested more than {} records deep", opts.max_depth),
                ));
            }
            let (node, children) = read_record(pending.obj, pending.kind, &pending.path)?;
            let id = collection.add_node(node);
            match pending.attach {
                Attach::Feature => collection.push_feature(id),
                Attach::TopLevel => collection.push_top_level(id),
                Attach::Child(parent) => collection.add_child(parent, id),
            }
            // Reversed, so children are finished in document order
            for (obj, kind, path) in children.into_iter().rev() {
                stack.push(Pending {
                    obj,
                    kind,
                    attach: Attach::Child(id),
                    path,
                    depth: pending.depth + 1,
                });
            }
        }

        debug!(
            "Loaded {} top-level features and {} records total",
            collection.features().len(),
            collection.num_nodes()
        );
        Ok(collection)
    }
}

impl Node {
    fn with_geometry(mut self, geometry: geojson::Geometry) -> Node {
        self.geometry = Some(geometry);
        self
    }
}

/// Turns one JSON record into a node, returning the records nested in it.
///
/// Features keep everything interesting under `properties`. Container records may also put
/// their `name` and nested lists directly on the record.
fn read_record(
    mut obj: JsonObject,
    kind: NodeKind,
    path: &str,
) -> Result<(Node, Vec<(JsonObject, NodeKind, String)>), Error> {
    let mut node = Node::new(kind);
    if let Some(geometry) = obj.remove("geometry") {
        if !geometry.is_null() {
            node.geometry = Some(parse_geometry(geometry, &format!("{}/geometry", path))?);
        }
    }
    let mut properties = take_properties(&mut obj, path)?;

    let mut children = Vec::new();
    if let NodeKind::Container(_) = kind {
        if let Some(JsonValue::String(name)) = obj.remove("name") {
            node.name = Some(name);
        }
        children.extend(take_relations(&mut obj, path, &RELATIONS)?);
    }
    children.extend(take_relations(
        &mut properties,
        &format!("{}/properties", path),
        &RELATIONS,
    )?);

    if node.name.is_none() {
        if let Some(JsonValue::String(_)) = properties.get("name") {
            if let Some(JsonValue::String(name)) = properties.remove("name") {
                node.name = Some(name);
            }
        }
    }
    // Only a string names an element kind; anything else is an ordinary property
    if let Some(JsonValue::String(_)) = properties.get("type") {
        if let Some(JsonValue::String(tag)) = properties.remove("type") {
            node.type_tag = Some(tag);
        }
    }
    node.properties = properties;

    Ok((node, children))
}

fn parse_geometry(value: JsonValue, path: &str) -> Result<geojson::Geometry, Error> {
    serde_json::from_value::<geojson::Geometry>(value)
        .map_err(|err| Error::malformed(path, format!("bad geometry: {}", err)))
}

fn take_properties(obj: &mut JsonObject, path: &str) -> Result<JsonObject, Error> {
    match obj.remove("properties") {
        None | Some(JsonValue::Null) => Ok(JsonObject::new()),
        Some(JsonValue::Object(properties)) => Ok(properties),
        Some(other) => Err(Error::malformed(
            format!("{}/properties", path),
            format!("expected an object, got {}", describe(&other)),
        )),
    }
}

/// Removes the nested lists named by `relations` from `obj`, in that order. A null list is the
/// same as a missing one.
fn take_relations(
    obj: &mut JsonObject,
    path: &str,
    relations: &[(&str, NodeKind)],
) -> Result<Vec<(JsonObject, NodeKind, String)>, Error> {
    let mut results = Vec::new();
    for (key, kind) in relations {
        match obj.remove(*key) {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Array(list)) => {
                for (idx, item) in list.into_iter().enumerate() {
                    let item_path = format!("{}/{}/{}", path, key, idx);
                    results.push((expect_object(item, &item_path)?, *kind, item_path));
                }
            }
            Some(other) => {
                return Err(Error::malformed(
                    format!("{}/{}", path, key),
                    format!("expected an array, got {}", describe(&other)),
                ));
            }
        }
    }
    Ok(results)
}

fn expect_object(value: JsonValue, path: &str) -> Result<JsonObject, Error> {
    match value {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(Error::malformed(
            path,
            format!("expected an object, got {}", describe(&other)),
        )),
    }
}

fn is_bare_geometry(obj: &JsonObject) -> bool {
    match obj.get("type") {
        Some(JsonValue::String(t)) => GeometryKind::ALL.iter().any(|kind| kind.name() == t),
        _ => false,
    }
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
