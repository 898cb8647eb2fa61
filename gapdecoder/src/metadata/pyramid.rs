//! Image pyramid description parsing.

use roxmltree::{Document, Node};

use super::MetadataError;
use crate::coord::ZoomLevel;

/// Parses the pyramid XML into zoom levels, coarsest first.
///
/// The root element carries `tile_width`/`tile_height`; each
/// `pyramid_level` element, in document order, describes one level.
pub fn parse_pyramid(xml: &str) -> Result<Vec<ZoomLevel>, MetadataError> {
    let doc = Document::parse(xml).map_err(|e| MetadataError::Xml(e.to_string()))?;
    let root = doc.root_element();

    let tile_width = attribute(root, "tile_width")?;
    let tile_height = attribute(root, "tile_height")?;

    let levels = doc
        .descendants()
        .filter(|node| node.has_tag_name("pyramid_level"))
        .enumerate()
        .map(|(index, node)| -> Result<ZoomLevel, MetadataError> {
            Ok(ZoomLevel::new(
                index as u32,
                attribute(node, "num_tiles_x")?,
                attribute(node, "num_tiles_y")?,
                tile_width,
                tile_height,
                attribute(node, "empty_pels_x")?,
                attribute(node, "empty_pels_y")?,
            )?)
        })
        .collect::<Result<Vec<_>, MetadataError>>()?;

    if levels.is_empty() {
        return Err(MetadataError::EmptyPyramid);
    }
    Ok(levels)
}

fn attribute(node: Node<'_, '_>, name: &'static str) -> Result<u32, MetadataError> {
    let element = node.tag_name().name().to_string();
    let value = node
        .attribute(name)
        .ok_or_else(|| MetadataError::MissingAttribute {
            element: element.clone(),
            attribute: name,
        })?;
    value
        .trim()
        .parse()
        .map_err(|_| MetadataError::InvalidAttribute {
            element,
            attribute: name,
            value: value.to_string(),
        })
}
