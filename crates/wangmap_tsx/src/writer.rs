//! `.tsx` re-emission in Tiled's layout
//!
//! Element order, attribute order, and the one-space indent all follow
//! what the editor itself writes, so emitted files diff cleanly against
//! authored ones.

use crate::{xml_err, TsxError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::path::Path;
use wangmap_core::{Tileset, WangSet};

/// Serialize and write a tileset definition file
pub fn write_tileset(tileset: &Tileset, path: impl AsRef<Path>) -> Result<(), TsxError> {
    let path = path.as_ref();
    let xml = tileset_to_string(tileset)?;
    std::fs::write(path, xml).map_err(|e| TsxError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Serialize a tileset definition to an XML string
pub fn tileset_to_string(tileset: &Tileset) -> Result<String, TsxError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    let mut root = BytesStart::new("tileset");
    root.push_attribute(("version", tileset.version.as_str()));
    if !tileset.tiled_version.is_empty() {
        root.push_attribute(("tiledversion", tileset.tiled_version.as_str()));
    }
    root.push_attribute(("name", tileset.name.as_str()));
    root.push_attribute(("tilewidth", tileset.tile_width.to_string().as_str()));
    root.push_attribute(("tileheight", tileset.tile_height.to_string().as_str()));
    root.push_attribute(("tilecount", tileset.tile_count().to_string().as_str()));
    root.push_attribute(("columns", tileset.columns.to_string().as_str()));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    // Tiled always writes the grid stanza for image-collection tilesets
    if tileset.columns == 0 {
        let mut grid = BytesStart::new("grid");
        grid.push_attribute(("orientation", "orthogonal"));
        grid.push_attribute(("width", "1"));
        grid.push_attribute(("height", "1"));
        writer.write_event(Event::Empty(grid)).map_err(xml_err)?;
    }

    for tile in tileset.tiles.values() {
        let mut t = BytesStart::new("tile");
        t.push_attribute(("id", tile.id.to_string().as_str()));
        writer.write_event(Event::Start(t)).map_err(xml_err)?;

        let mut image = BytesStart::new("image");
        image.push_attribute(("source", tile.image.source.as_str()));
        image.push_attribute(("width", tile.image.width.to_string().as_str()));
        image.push_attribute(("height", tile.image.height.to_string().as_str()));
        writer.write_event(Event::Empty(image)).map_err(xml_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("tile")))
            .map_err(xml_err)?;
    }

    if !tileset.wang_sets.is_empty() {
        writer
            .write_event(Event::Start(BytesStart::new("wangsets")))
            .map_err(xml_err)?;
        for ws in &tileset.wang_sets {
            write_wang_set(&mut writer, ws)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("wangsets")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("tileset")))
        .map_err(xml_err)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
    xml.push('\n');
    Ok(xml)
}

fn write_wang_set(writer: &mut Writer<Vec<u8>>, ws: &WangSet) -> Result<(), TsxError> {
    let mut start = BytesStart::new("wangset");
    start.push_attribute(("name", ws.name.as_str()));
    start.push_attribute(("type", ws.set_type.name()));
    start.push_attribute(("tile", tile_ref(ws.tile).as_str()));
    writer.write_event(Event::Start(start)).map_err(xml_err)?;

    for color in &ws.colors {
        let mut e = BytesStart::new("wangcolor");
        e.push_attribute(("name", color.name.as_str()));
        e.push_attribute(("color", color.color.to_hex().as_str()));
        e.push_attribute(("tile", tile_ref(color.tile).as_str()));
        e.push_attribute(("probability", color.probability.to_string().as_str()));
        writer.write_event(Event::Empty(e)).map_err(xml_err)?;
    }

    for wt in &ws.wang_tiles {
        let mut e = BytesStart::new("wangtile");
        e.push_attribute(("tileid", wt.tile_id.to_string().as_str()));
        e.push_attribute(("wangid", wt.wang_id.to_string().as_str()));
        writer.write_event(Event::Empty(e)).map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("wangset")))
        .map_err(xml_err)?;
    Ok(())
}

/// `None` is spelled `-1` throughout the format
fn tile_ref(tile: Option<u32>) -> String {
    match tile {
        Some(id) => id.to_string(),
        None => "-1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tileset;
    use wangmap_core::{Color, Tile, TileImage, WangColor, WangId, WangSetType};

    fn sample_tileset() -> Tileset {
        let mut tileset = Tileset::new("overworld".to_string(), 16, 16);
        tileset.tiled_version = "1.11.2".to_string();
        tileset.insert_tile(Tile::new(
            0,
            TileImage::new("grass.png".to_string(), 16, 16),
        ));
        tileset.insert_tile(Tile::new(
            7,
            TileImage::new("Paths/Path 1/Up_Edge.png".to_string(), 16, 16),
        ));

        let mut ws = WangSet::new("paths".to_string(), WangSetType::Corner);
        let mut color = WangColor::new("path".to_string(), Color::RED);
        color.probability = 0.5;
        ws.add_color(color);
        ws.add_wang_tile(7, WangId::from_corners(0, 1, 1, 0));
        tileset.add_wang_set(ws);
        tileset
    }

    #[test]
    fn test_model_round_trip() {
        let tileset = sample_tileset();
        let xml = tileset_to_string(&tileset).unwrap();
        let parsed = parse_tileset(&xml).unwrap();
        assert_eq!(parsed, tileset);
    }

    #[test]
    fn test_emitted_layout() {
        let xml = tileset_to_string(&sample_tileset()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<tileset version=\"1.10\" tiledversion=\"1.11.2\" name=\"overworld\" \
             tilewidth=\"16\" tileheight=\"16\" tilecount=\"2\" columns=\"0\">"
        ));
        assert!(xml.contains("<grid orientation=\"orthogonal\" width=\"1\" height=\"1\"/>"));
        assert!(xml.contains("<image source=\"Paths/Path 1/Up_Edge.png\" width=\"16\" height=\"16\"/>"));
        assert!(xml.contains("<wangset name=\"paths\" type=\"corner\" tile=\"-1\">"));
        assert!(xml.contains("<wangcolor name=\"path\" color=\"#ff0000\" tile=\"-1\" probability=\"0.5\"/>"));
        assert!(xml.contains("<wangtile tileid=\"7\" wangid=\"0,1,0,1,0,0,0,0\"/>"));
        assert!(xml.ends_with("</tileset>\n"));

        // Tiles come out in ascending id order
        let tile0 = xml.find("<tile id=\"0\">").unwrap();
        let tile7 = xml.find("<tile id=\"7\">").unwrap();
        assert!(tile0 < tile7);
    }

    #[test]
    fn test_authored_file_round_trip() {
        let authored = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.11.2" name="sinnoh_tileset_1x" tilewidth="64" tileheight="74" tilecount="2" columns="0">
 <grid orientation="orthogonal" width="1" height="1"/>
 <tile id="2">
  <image source="overworld/Paths/Path 1/Lower_Left_Corner@1x.png" width="16" height="16"/>
 </tile>
 <tile id="4">
  <image source="overworld/Paths/Path 1/Center@1x.png" width="16" height="16"/>
 </tile>
 <wangsets>
  <wangset name="sinnoh_paths" type="corner" tile="-1">
   <wangcolor name="path_1" color="#ff0000" tile="-1" probability="1"/>
   <wangtile tileid="2" wangid="0,0,0,1,0,1,0,1"/>
   <wangtile tileid="4" wangid="0,1,0,1,0,1,0,1"/>
  </wangset>
 </wangsets>
</tileset>
"#;
        let parsed = parse_tileset(authored).unwrap();
        let emitted = tileset_to_string(&parsed).unwrap();
        assert_eq!(emitted, authored);
    }
}
