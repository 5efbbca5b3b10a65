use codecforge::prelude::*;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fill {
    Empty,
    Solid,
    Hatched,
}

impl Fill {
    fn name(&self) -> &'static str {
        match self {
            Fill::Empty => "none",
            Fill::Solid => "solid",
            Fill::Hatched => "hatched",
        }
    }

    fn parse(name: &str) -> Result<Self, String> {
        match name {
            "none" => Ok(Fill::Empty),
            "solid" => Ok(Fill::Solid),
            "hatched" => Ok(Fill::Hatched),
            other => Err(format!("unknown fill '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Polygon {
    name: String,
    fill: Fill,
    vertices: Vec<Point>,
    note: Option<String>,
}

// ---------------------------------------------------------------------------
// Codecs
// ---------------------------------------------------------------------------

fn point_codec() -> impl Codec<Value = Point> {
    group((
        codecs::double().field("x", |p: &Point| &p.x),
        codecs::double().field("y", |p: &Point| &p.y),
    ))
    .create(|x, y| Point { x, y })
}

fn fill_codec() -> impl Codec<Value = Fill> {
    codecs::string().flat_xmap(
        |name: String| Fill::parse(&name),
        |fill: Fill| Ok::<_, String>(fill.name().to_string()),
    )
}

fn polygon_codec() -> impl Codec<Value = Polygon> {
    group((
        codecs::string().field("name", |p: &Polygon| &p.name),
        fill_codec().field("fill", |p: &Polygon| &p.fill),
        point_codec().list().field("vertices", |p: &Polygon| &p.vertices),
        codecs::string().optional().field("note", |p: &Polygon| &p.note),
    ))
    .create(|name, fill, vertices, note| Polygon {
        name,
        fill,
        vertices,
        note,
    })
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), CodecforgeError> {
    codecforge::logging::init(&LogConfig {
        filter: "codecforge_core=debug,geometry=info".into(),
        ..LogConfig::default()
    })?;

    let codec = polygon_codec();
    let json = JsonFormat::pretty();

    let square = Polygon {
        name: "square".into(),
        fill: Fill::Hatched,
        vertices: vec![
            Point { x: 0.0, y: 0.0 },
            Point { x: 1.0, y: 0.0 },
            Point { x: 1.0, y: 1.0 },
            Point { x: 0.0, y: 1.0 },
        ],
        note: None,
    };

    let text = json.encode_to_string(&codec, &square)?;
    println!("{text}");

    let decoded = json.decode_from_str(&codec, &text)?;
    tracing::info!(name = %decoded.name, vertices = decoded.vertices.len(), "decoded polygon");
    if decoded != square {
        tracing::error!(?decoded, "round trip changed the polygon");
        return Err(CodecError::custom("round trip changed the polygon").into());
    }

    let broken = r#"{"name": "blob", "fill": "dotted", "vertices": []}"#;
    if let Err(err) = json.decode_from_str(&codec, broken) {
        tracing::warn!(%err, "rejected polygon");
    }

    let tree = codec.encode(&MemoryProvider, &square)?;
    println!("{}", serde_json::to_string(&tree).map_err(JsonError::Write)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fill_is_rejected() {
        let broken = r#"{"name": "blob", "fill": "dotted", "vertices": []}"#;
        let err = JsonFormat::default()
            .decode_from_str(&polygon_codec(), broken)
            .unwrap_err();
        assert!(err.to_string().ends_with("unknown fill 'dotted'"));
    }

    #[test]
    fn test_polygon_round_trip() {
        let triangle = Polygon {
            name: "t".into(),
            fill: Fill::Solid,
            vertices: vec![Point { x: 0.0, y: 0.0 }, Point { x: 2.0, y: 0.5 }],
            note: Some("thin".into()),
        };
        let json = JsonFormat::default();
        let text = json.encode_to_string(&polygon_codec(), &triangle).unwrap();
        assert_eq!(json.decode_from_str(&polygon_codec(), &text).unwrap(), triangle);
    }
}
