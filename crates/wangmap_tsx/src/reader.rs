//! Event-driven `.tsx` parsing

use crate::{xml_err, TsxError};
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use wangmap_core::{
    Color, Tile, TileImage, Tileset, WangColor, WangId, WangSet, WangSetType, WangTile,
};

/// Read and parse a tileset definition file
pub fn load_tileset(path: impl AsRef<Path>) -> Result<Tileset, TsxError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| TsxError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let tileset = parse_tileset(&xml)?;
    debug!(
        "loaded tileset '{}' from {} ({} tiles, {} wang sets)",
        tileset.name,
        path.display(),
        tileset.tile_count(),
        tileset.wang_sets.len()
    );
    Ok(tileset)
}

/// Parse a tileset definition from an XML string
pub fn parse_tileset(xml: &str) -> Result<Tileset, TsxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Find the <tileset> root, skipping the declaration and comments
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = element_name(&e);
                if name != "tileset" {
                    return Err(TsxError::UnexpectedElement(name));
                }
                return parse_tileset_body(&mut reader, &e);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                if name != "tileset" {
                    return Err(TsxError::UnexpectedElement(name));
                }
                // Self-closing root: a tileset with no tiles at all
                return tileset_from_attrs(&parse_attributes(&e)?).map(|(tileset, _)| tileset);
            }
            Event::Eof => return Err(TsxError::Xml("missing <tileset> root element".to_string())),
            _ => {}
        }
    }
}

/// Build a tileset from the root attributes; also returns the declared
/// tile count for the post-parse consistency check
fn tileset_from_attrs(
    attrs: &HashMap<String, String>,
) -> Result<(Tileset, Option<u32>), TsxError> {
    let name = require(attrs, "tileset", "name")?.to_string();
    let tile_width = require_parse(attrs, "tileset", "tilewidth")?;
    let tile_height = require_parse(attrs, "tileset", "tileheight")?;

    let mut tileset = Tileset::new(name, tile_width, tile_height);
    if let Some(version) = attrs.get("version") {
        tileset.version = version.clone();
    }
    if let Some(tiled_version) = attrs.get("tiledversion") {
        tileset.tiled_version = tiled_version.clone();
    }
    if let Some(columns) = parse_optional(attrs, "tileset", "columns")? {
        tileset.columns = columns;
    }
    let declared_count = parse_optional(attrs, "tileset", "tilecount")?;
    Ok((tileset, declared_count))
}

fn parse_tileset_body(
    reader: &mut Reader<&[u8]>,
    root: &BytesStart<'_>,
) -> Result<Tileset, TsxError> {
    let attrs = parse_attributes(root)?;
    let (mut tileset, declared_count) = tileset_from_attrs(&attrs)?;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = element_name(&e);
                match name.as_str() {
                    "tile" => {
                        let tile = parse_tile(reader, &e)?;
                        tileset.insert_tile(tile);
                    }
                    "wangsets" => parse_wang_sets(reader, &mut tileset)?,
                    _ => skip_element(reader, &e)?,
                }
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                match name.as_str() {
                    // A tile with no image would be unusable; refuse it
                    "tile" => {
                        return Err(TsxError::MissingAttribute {
                            element: "tile".to_string(),
                            attribute: "image".to_string(),
                        })
                    }
                    "grid" => {}
                    _ => debug!("skipping <{}> element", name),
                }
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(TsxError::Xml("unclosed <tileset> element".to_string()));
            }
            _ => {}
        }
    }

    if let Some(declared) = declared_count {
        let parsed = tileset.tile_count() as u32;
        if declared != parsed {
            warn!(
                "tileset '{}': tilecount attribute is {} but {} tiles were parsed",
                tileset.name, declared, parsed
            );
        }
    }

    Ok(tileset)
}

/// Parse a `<tile>` element and its `<image>` child
fn parse_tile(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Tile, TsxError> {
    let attrs = parse_attributes(start)?;
    let id = require_parse(&attrs, "tile", "id")?;

    let mut image = None;
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Empty(e) => {
                let name = element_name(&e);
                if name == "image" {
                    image = Some(parse_image(&e)?);
                } else {
                    debug!("skipping <{}> inside <tile {}>", name, id);
                }
            }
            Event::Start(e) => {
                let name = element_name(&e);
                if name == "image" {
                    image = Some(parse_image(&e)?);
                } else {
                    skip_element(reader, &e)?;
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"tile" {
                    break;
                }
            }
            Event::Eof => return Err(TsxError::Xml("unclosed <tile> element".to_string())),
            _ => {}
        }
    }

    let image = image.ok_or_else(|| TsxError::MissingAttribute {
        element: "tile".to_string(),
        attribute: "image".to_string(),
    })?;
    Ok(Tile::new(id, image))
}

fn parse_image(e: &BytesStart<'_>) -> Result<TileImage, TsxError> {
    let attrs = parse_attributes(e)?;
    Ok(TileImage::new(
        require(&attrs, "image", "source")?.to_string(),
        require_parse(&attrs, "image", "width")?,
        require_parse(&attrs, "image", "height")?,
    ))
}

/// Parse the `<wangsets>` container
fn parse_wang_sets(reader: &mut Reader<&[u8]>, tileset: &mut Tileset) -> Result<(), TsxError> {
    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = element_name(&e);
                if name == "wangset" {
                    let ws = parse_wang_set(reader, &e)?;
                    tileset.add_wang_set(ws);
                } else {
                    skip_element(reader, &e)?;
                }
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                if name == "wangset" {
                    // Degenerate but legal: a set with no colors or tiles
                    let attrs = parse_attributes(&e)?;
                    tileset.add_wang_set(wang_set_from_attrs(&attrs)?);
                } else {
                    debug!("skipping <{}> inside <wangsets>", name);
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"wangsets" {
                    break;
                }
            }
            Event::Eof => return Err(TsxError::Xml("unclosed <wangsets> element".to_string())),
            _ => {}
        }
    }
    Ok(())
}

fn wang_set_from_attrs(attrs: &HashMap<String, String>) -> Result<WangSet, TsxError> {
    let name = require(attrs, "wangset", "name")?.to_string();
    let type_name = require(attrs, "wangset", "type")?;
    let set_type =
        WangSetType::from_name(type_name).ok_or_else(|| TsxError::InvalidAttribute {
            element: "wangset".to_string(),
            attribute: "type".to_string(),
            value: type_name.to_string(),
        })?;

    let mut ws = WangSet::new(name, set_type);
    ws.tile = parse_tile_ref(attrs, "wangset")?;
    Ok(ws)
}

/// Parse one `<wangset>` with its colors and wang tiles
fn parse_wang_set(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<WangSet, TsxError> {
    let attrs = parse_attributes(start)?;
    let mut ws = wang_set_from_attrs(&attrs)?;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Empty(e) => {
                let name = element_name(&e);
                match name.as_str() {
                    "wangcolor" => {
                        let attrs = parse_attributes(&e)?;
                        ws.colors.push(parse_wang_color(&attrs)?);
                    }
                    "wangtile" => {
                        let attrs = parse_attributes(&e)?;
                        ws.wang_tiles.push(parse_wang_tile(&attrs)?);
                    }
                    _ => debug!("skipping <{}> inside <wangset '{}'>", name, ws.name),
                }
            }
            Event::Start(e) => {
                // Tiled only nests children (custom properties) under a
                // color; parse the attributes, drop the rest
                let name = element_name(&e);
                match name.as_str() {
                    "wangcolor" => {
                        let attrs = parse_attributes(&e)?;
                        ws.colors.push(parse_wang_color(&attrs)?);
                        reader.read_to_end(e.name()).map_err(xml_err)?;
                    }
                    "wangtile" => {
                        let attrs = parse_attributes(&e)?;
                        ws.wang_tiles.push(parse_wang_tile(&attrs)?);
                        reader.read_to_end(e.name()).map_err(xml_err)?;
                    }
                    _ => skip_element(reader, &e)?,
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"wangset" {
                    break;
                }
            }
            Event::Eof => return Err(TsxError::Xml("unclosed <wangset> element".to_string())),
            _ => {}
        }
    }

    Ok(ws)
}

fn parse_wang_color(attrs: &HashMap<String, String>) -> Result<WangColor, TsxError> {
    // Authored files legitimately contain name=""
    let name = attrs.get("name").cloned().unwrap_or_default();
    let hex = require(attrs, "wangcolor", "color")?;
    let color = Color::from_hex(hex).ok_or_else(|| TsxError::InvalidAttribute {
        element: "wangcolor".to_string(),
        attribute: "color".to_string(),
        value: hex.to_string(),
    })?;

    let mut wc = WangColor::new(name, color);
    wc.tile = parse_tile_ref(attrs, "wangcolor")?;
    if let Some(probability) = parse_optional(attrs, "wangcolor", "probability")? {
        wc.probability = probability;
    }
    Ok(wc)
}

fn parse_wang_tile(attrs: &HashMap<String, String>) -> Result<WangTile, TsxError> {
    let tile_id = require_parse(attrs, "wangtile", "tileid")?;
    let text = require(attrs, "wangtile", "wangid")?;
    let wang_id = WangId::from_str(text).map_err(|_| TsxError::InvalidAttribute {
        element: "wangtile".to_string(),
        attribute: "wangid".to_string(),
        value: text.to_string(),
    })?;
    Ok(WangTile { tile_id, wang_id })
}

/// `tile="-1"` means "none" throughout the format
fn parse_tile_ref(
    attrs: &HashMap<String, String>,
    element: &str,
) -> Result<Option<u32>, TsxError> {
    match parse_optional::<i64>(attrs, element, "tile")? {
        None | Some(-1) => Ok(None),
        Some(id) if id >= 0 => Ok(Some(id as u32)),
        Some(id) => Err(TsxError::InvalidAttribute {
            element: element.to_string(),
            attribute: "tile".to_string(),
            value: id.to_string(),
        }),
    }
}

/// Collect an element's attributes into owned key/value pairs
fn parse_attributes(e: &BytesStart<'_>) -> Result<HashMap<String, String>, TsxError> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(xml_err)?
            .to_string();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Consume everything up to the matching end tag
fn skip_element(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<(), TsxError> {
    debug!("skipping <{}> element", element_name(start));
    reader.read_to_end(start.name()).map_err(xml_err)?;
    Ok(())
}

fn require<'a>(
    attrs: &'a HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<&'a str, TsxError> {
    attrs
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| TsxError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        })
}

/// Required attribute parsed into its target type
fn require_parse<T: FromStr>(
    attrs: &HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<T, TsxError> {
    let value = require(attrs, element, attribute)?;
    value.parse().map_err(|_| TsxError::InvalidAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Optional attribute; absent is fine, unparseable is not
fn parse_optional<T: FromStr>(
    attrs: &HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<Option<T>, TsxError> {
    match attrs.get(attribute) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| TsxError::InvalidAttribute {
                element: element.to_string(),
                attribute: attribute.to_string(),
                value: value.to_string(),
            }),
    }
}
